use askama::{Error as AskamaError, Template};
use thiserror::Error;

use crate::domain::decor::Marker;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub source: &'static str,
    pub public_message: &'static str,
    #[source]
    pub error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

pub fn render_template<T: Template>(template: T) -> Result<String, TemplateRenderError> {
    template.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
    })
}

/// Head metadata for the post page: document title, search/social tags, and
/// the optional canonical override.
#[derive(Clone)]
pub struct PostMetaView {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub twitter_site: Option<String>,
    pub twitter_creator: String,
    pub og_url: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    /// Emitted as `<link rel="canonical">` only when present.
    pub canonical: Option<String>,
}

#[derive(Clone)]
pub struct ArticleHeaderView {
    pub subtitle: Option<String>,
    pub title: String,
    pub display_date: String,
    pub author: String,
    pub author_href: String,
}

#[derive(Clone)]
pub struct ShareLinksView {
    pub twitter_href: String,
    pub reddit_href: String,
}

#[derive(Clone, Copy)]
pub struct MarkerView {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl From<Marker> for MarkerView {
    fn from(marker: Marker) -> Self {
        Self {
            x: marker.x,
            y: marker.y,
            size: marker.size,
        }
    }
}

/// Everything the post page template needs, display-ready.
#[derive(Clone)]
pub struct PostPageView {
    pub language: String,
    pub meta: PostMetaView,
    pub header: ArticleHeaderView,
    pub teaser_image: Option<String>,
    /// Trusted article HTML, rendered verbatim.
    pub body_html: String,
    pub share: ShareLinksView,
    pub markers: Vec<MarkerView>,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub view: PostPageView,
}
