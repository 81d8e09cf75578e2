//! Foglio renders the page for an individual blog post: a content document
//! (pre-rendered article HTML plus frontmatter) and site settings go in, a
//! complete HTML page comes out.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
pub mod util;
