#![deny(clippy::all, clippy::pedantic)]

use foglio::{
    application::compose::PostPageService,
    config::{DecorSettings, SiteAuthor, SiteSettings},
    domain::{
        decor::{FixedViewport, HeadlessViewport},
        document::PostDocument,
    },
    presentation::views::{PostTemplate, render_template},
};

fn site_settings() -> SiteSettings {
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

fn decor_settings() -> DecorSettings {
    DecorSettings {
        fold_margin: 200,
        fallback_height: 500,
    }
}

fn document(frontmatter_extra: &str) -> PostDocument {
    let json = format!(
        r#"{{
            "html": "<p>Hello <em>world</em></p>",
            "excerpt": "Hello world",
            "fields": {{ "slug": "/blog/hello-world/" }},
            "frontmatter": {{
                "title": "Hello World",
                "image": "/images/hello.png",
                "date": "2019-04-05T00:00:00.000Z",
                "author": "octocat"{frontmatter_extra}
            }}
        }}"#
    );
    serde_json::from_str(&json).expect("valid document")
}

fn render_page(document: &PostDocument, viewport_height: Option<u32>) -> String {
    let service = PostPageService::new(site_settings(), &decor_settings());
    let view = match viewport_height {
        Some(height) => service.compose(document, &FixedViewport(height)),
        None => service.compose(document, &HeadlessViewport),
    }
    .expect("document composes");
    render_template(PostTemplate { view }).expect("template renders")
}

#[test]
fn renders_complete_head_metadata() {
    let page = render_page(&document(r#", "subtitle": "A greeting""#), None);

    assert!(page.contains(r#"<html lang="en">"#));
    assert!(page.contains("<title>Hello World</title>"));
    assert!(page.contains(r#"<meta name="description" content="A greeting">"#));
    assert!(page.contains(r#"<meta name="keywords" content="blog, examples">"#));
    assert!(page.contains(r#"<meta name="twitter:card" content="summary">"#));
    assert!(page.contains(r#"<meta name="twitter:site" content="@example">"#));
    assert!(page.contains(r#"<meta name="twitter:creator" content="@octocat">"#));
    assert!(
        page.contains(
            r#"<meta property="og:url" content="https://example.com/blog/hello-world/">"#
        )
    );
    assert!(page.contains(r#"<meta property="og:title" content="Hello World">"#));
    assert!(page.contains(r#"<meta property="og:description" content="Hello world">"#));
    assert!(page.contains(r#"<meta property="og:image" content="/images/hello.png">"#));
}

#[test]
fn optional_blocks_render_nothing_when_absent() {
    let page = render_page(&document(""), None);

    assert!(!page.contains("article-subtitle"));
    assert!(!page.contains(r#"rel="canonical""#));
    assert!(!page.contains("teaser-image"));
}

#[test]
fn optional_blocks_render_when_present() {
    let page = render_page(
        &document(
            r#",
                "subtitle": "A greeting",
                "teaserImage": "/images/hello-teaser.png",
                "url": "https://elsewhere.example/post""#,
        ),
        None,
    );

    assert!(page.contains(r#"<h2 class="article-subtitle">A greeting</h2>"#));
    assert!(page.contains(r#"<link rel="canonical" href="https://elsewhere.example/post">"#));
    assert!(page.contains("background-image: url(/images/hello-teaser.png)"));
}

#[test]
fn article_body_and_byline_render_verbatim() {
    let page = render_page(&document(""), None);

    assert!(page.contains("<p>Hello <em>world</em></p>"));
    assert!(page.contains("Friday, 5 April 2019 by"));
    assert!(page.contains(r#"<a href="https://github.com/octocat""#));
}

#[test]
fn share_links_target_the_page_url() {
    let page = render_page(&document(""), None);

    assert!(page.contains(
        "https://twitter.com/intent/tweet?text=Hello%20World%20by%20%40octocat%20https%3A%2F%2Fexample.com%2Fblog%2Fhello-world%2F"
    ));
    // The reddit URL's `&` is escaped in the attribute position.
    assert!(page.contains(
        "http://www.reddit.com/submit?url=https%3A%2F%2Fexample.com%2Fblog%2Fhello-world%2F&amp;title=Hello%20World"
    ));
}

#[test]
fn backdrop_depth_follows_the_viewport() {
    let headless = render_page(&document(""), None);
    assert_eq!(headless.matches("backdrop-logo").count(), 2);
    assert!(!headless.contains("top: 830px"));

    let live = render_page(&document(""), Some(4200));
    assert_eq!(live.matches("backdrop-logo").count(), 16);
    assert!(live.contains("top: 3860px"));
}
