//! Binds a post document and site settings into the page view model.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

use crate::{
    application::error::AppError,
    config::{DecorSettings, SiteSettings},
    domain::{
        decor::{MarkerPlacer, ViewportProbe},
        document::{PostDocument, present},
    },
    presentation::views::{
        ArticleHeaderView, MarkerView, PostMetaView, PostPageView, ShareLinksView,
    },
    util::date,
};

/// Characters escaped by `encodeURIComponent`: everything except ASCII
/// alphanumerics and `- _ . ! ~ * ' ( )`. Spaces become `%20`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Composes the view model for an individual post page.
pub struct PostPageService {
    site: SiteSettings,
    placer: MarkerPlacer,
}

impl PostPageService {
    pub fn new(site: SiteSettings, decor: &DecorSettings) -> Self {
        Self {
            site,
            placer: MarkerPlacer::new(decor.fold_margin, decor.fallback_height),
        }
    }

    /// Build the display-ready view for `document`.
    ///
    /// The page URL is the site URL plus the slug. The canonical URL is the
    /// frontmatter override when one exists, and the canonical link element
    /// is emitted only in that case; share and Open Graph targets always use
    /// the page URL.
    pub fn compose(
        &self,
        document: &PostDocument,
        probe: &dyn ViewportProbe,
    ) -> Result<PostPageView, AppError> {
        document.validate()?;

        let frontmatter = &document.frontmatter;
        let page_url = join_site_url(&self.site.url, &document.fields.slug);
        let canonical = present(&frontmatter.url).map(str::to_string);

        let publication_date = frontmatter.parsed_date()?;
        let display_date = publication_date
            .format(date::DISPLAY_DATE_FORMAT)
            .map_err(|err| {
                AppError::unexpected(format!("failed to format publication date: {err}"))
            })?;

        let markers: Vec<MarkerView> = self
            .placer
            .place(probe)
            .into_iter()
            .map(MarkerView::from)
            .collect();
        debug!(
            slug = %document.fields.slug,
            markers = markers.len(),
            "composed backdrop markers"
        );

        Ok(PostPageView {
            language: self.site.language.clone(),
            meta: PostMetaView {
                title: frontmatter.title.clone(),
                description: frontmatter.subtitle.clone().unwrap_or_default(),
                keywords: self.site.keywords.join(", "),
                twitter_site: self.site.twitter_site.clone(),
                twitter_creator: format!("@{}", frontmatter.author),
                og_url: page_url.clone(),
                og_title: frontmatter.title.clone(),
                og_description: document.excerpt.clone(),
                og_image: frontmatter.image.clone(),
                canonical,
            },
            header: ArticleHeaderView {
                subtitle: present(&frontmatter.subtitle).map(str::to_string),
                title: frontmatter.title.clone(),
                display_date,
                author: frontmatter.author.clone(),
                author_href: format!("{}{}", self.site.profile_base_url, frontmatter.author),
            },
            teaser_image: present(&frontmatter.teaser_image).map(str::to_string),
            body_html: document.html.clone(),
            share: ShareLinksView {
                twitter_href: twitter_intent_url(&frontmatter.title, &frontmatter.author, &page_url),
                reddit_href: reddit_submit_url(&page_url, &frontmatter.title),
            },
            markers,
        })
    }
}

/// Append a slug to the site URL with exactly one `/` at the joint.
fn join_site_url(site_url: &str, slug: &str) -> String {
    let base = site_url.trim_end_matches('/');
    if slug.starts_with('/') {
        format!("{base}{slug}")
    } else {
        format!("{base}/{slug}")
    }
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

fn twitter_intent_url(title: &str, author: &str, page_url: &str) -> String {
    let text = format!("{title} by @{author} {page_url}");
    format!(
        "https://twitter.com/intent/tweet?text={}",
        encode_component(&text)
    )
}

fn reddit_submit_url(page_url: &str, title: &str) -> String {
    format!(
        "http://www.reddit.com/submit?url={}&title={}",
        encode_component(page_url),
        encode_component(title)
    )
}

#[cfg(test)]
mod tests {
    use crate::config::SiteAuthor;
    use crate::domain::decor::{FixedViewport, HeadlessViewport};

    use super::*;

    fn site() -> SiteSettings {
        SiteSettings {
            title: "Example Blog".to_string(),
            description: "Writing about examples".to_string(),
            url: "https://example.com".to_string(),
            language: "en".to_string(),
            keywords: vec!["blog".to_string(), "examples".to_string()],
            twitter_site: Some("@example".to_string()),
            profile_base_url: "https://github.com/".to_string(),
            author: SiteAuthor {
                name: "Example Team".to_string(),
                url: "https://example.com/about".to_string(),
            },
        }
    }

    fn decor() -> DecorSettings {
        DecorSettings {
            fold_margin: 200,
            fallback_height: 500,
        }
    }

    fn document() -> PostDocument {
        serde_json::from_str(
            r#"{
                "html": "<p>Hello <em>world</em></p>",
                "excerpt": "Hello world",
                "fields": { "slug": "/blog/hello-world/" },
                "frontmatter": {
                    "title": "Hello World",
                    "subtitle": "A greeting",
                    "image": "/images/hello.png",
                    "date": "2019-04-05T00:00:00.000Z",
                    "author": "octocat"
                }
            }"#,
        )
        .expect("valid document")
    }

    fn service() -> PostPageService {
        PostPageService::new(site(), &decor())
    }

    #[test]
    fn page_url_joins_site_url_and_slug() {
        let view = service()
            .compose(&document(), &HeadlessViewport)
            .expect("composes");
        assert_eq!(view.meta.og_url, "https://example.com/blog/hello-world/");
    }

    #[test]
    fn join_normalizes_the_slash_joint() {
        assert_eq!(
            join_site_url("https://example.com/", "/blog/x/"),
            "https://example.com/blog/x/"
        );
        assert_eq!(
            join_site_url("https://example.com", "blog/x/"),
            "https://example.com/blog/x/"
        );
    }

    #[test]
    fn canonical_is_absent_without_frontmatter_override() {
        let view = service()
            .compose(&document(), &HeadlessViewport)
            .expect("composes");
        assert!(view.meta.canonical.is_none());
    }

    #[test]
    fn canonical_uses_the_frontmatter_override() {
        let mut doc = document();
        doc.frontmatter.url = Some("https://elsewhere.example/post".to_string());
        let view = service().compose(&doc, &HeadlessViewport).expect("composes");
        assert_eq!(
            view.meta.canonical.as_deref(),
            Some("https://elsewhere.example/post")
        );
        // The Open Graph target still points at this site.
        assert_eq!(view.meta.og_url, "https://example.com/blog/hello-world/");
    }

    #[test]
    fn share_links_percent_encode_components() {
        let mut doc = document();
        doc.fields.slug = "/post".to_string();
        doc.frontmatter.title = "Hello World".to_string();
        let view = service().compose(&doc, &HeadlessViewport).expect("composes");

        assert_eq!(
            view.share.twitter_href,
            "https://twitter.com/intent/tweet?text=Hello%20World%20by%20%40octocat%20https%3A%2F%2Fexample.com%2Fpost"
        );
        assert!(view.share.twitter_href.contains("octocat"));
        assert_eq!(
            view.share.reddit_href,
            "http://www.reddit.com/submit?url=https%3A%2F%2Fexample.com%2Fpost&title=Hello%20World"
        );
    }

    #[test]
    fn display_date_is_en_gb_long_form() {
        let view = service()
            .compose(&document(), &HeadlessViewport)
            .expect("composes");
        assert_eq!(view.header.display_date, "Friday, 5 April 2019");
        assert_eq!(view.header.author_href, "https://github.com/octocat");
    }

    #[test]
    fn empty_subtitle_renders_nothing() {
        let mut doc = document();
        doc.frontmatter.subtitle = Some(String::new());
        let view = service().compose(&doc, &HeadlessViewport).expect("composes");
        assert!(view.header.subtitle.is_none());
    }

    #[test]
    fn marker_count_follows_the_probed_height() {
        let headless = service()
            .compose(&document(), &HeadlessViewport)
            .expect("composes");
        assert_eq!(headless.markers.len(), 2);

        let live = service()
            .compose(&document(), &FixedViewport(10_000))
            .expect("composes");
        assert_eq!(live.markers.len(), 35);
    }

    #[test]
    fn unparseable_date_is_a_domain_error() {
        let mut doc = document();
        doc.frontmatter.date = "tomorrow".to_string();
        assert!(service().compose(&doc, &HeadlessViewport).is_err());
    }
}
