//! Presentation layer: view models and the page template.

pub mod views;
