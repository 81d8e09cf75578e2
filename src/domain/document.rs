//! The content pipeline's post document contract.
//!
//! Documents arrive as JSON from the (external) markdown pipeline with the
//! article body already rendered to HTML. That body is trusted,
//! pre-sanitized input; this crate emits it verbatim and never inspects it.

use serde::Deserialize;
use time::Date;

use crate::{domain::error::DomainError, util::date};

/// A single post document: rendered body, excerpt, routing fields, and
/// frontmatter.
#[derive(Debug, Clone, Deserialize)]
pub struct PostDocument {
    /// Pre-rendered, trusted article HTML.
    pub html: String,
    #[serde(default)]
    pub excerpt: String,
    pub fields: DocumentFields,
    pub frontmatter: Frontmatter,
}

/// Fields derived by the (external) routing layer.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentFields {
    pub slug: String,
}

/// Author-supplied metadata attached to the document.
///
/// Field names mirror the pipeline's camelCase (`teaserImage`). `subtitle`,
/// `teaserImage` and `url` are optional; an empty string counts as absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub teaser_image: Option<String>,
    /// ISO-parseable publication date.
    pub date: String,
    /// Author handle, used for display and for the profile link.
    pub author: String,
    /// Canonical URL override for posts first published elsewhere.
    #[serde(default)]
    pub url: Option<String>,
}

impl Frontmatter {
    pub fn parsed_date(&self) -> Result<Date, DomainError> {
        date::parse_publication_date(&self.date).ok_or_else(|| {
            DomainError::validation(format!(
                "frontmatter date `{}` is not ISO-parseable",
                self.date
            ))
        })
    }
}

impl PostDocument {
    /// Check the fields every post page needs before composition starts.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.frontmatter.title.trim().is_empty() {
            return Err(DomainError::validation("frontmatter title is empty"));
        }
        if self.frontmatter.author.trim().is_empty() {
            return Err(DomainError::validation("frontmatter author is empty"));
        }
        if self.fields.slug.trim().is_empty() {
            return Err(DomainError::validation("document slug is empty"));
        }
        self.frontmatter.parsed_date()?;
        Ok(())
    }
}

/// Treat empty and whitespace-only optional values as absent.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.trim().is_empty())
}
