use crate::{compile_components, compile_document, escape_css_url, escape_html, export_page, CompileOptions};
use pagecraft_model::{ComponentDescriptor, ContentSource, Document};

#[test]
fn test_button_output_is_deterministic() {
    let components = vec![ComponentDescriptor::button("/x", "Go")];

    let first = compile_components(&components, &CompileOptions::default());
    let second = compile_components(&components, &CompileOptions::default());

    assert_eq!(first, second);
    assert!(first.contains("href=\"/x\""));
    assert!(first.contains(">Go</a>"));
}

#[test]
fn test_compile_hero_header() {
    let components = vec![ComponentDescriptor::hero_header(
        "Summer Sale",
        "Everything 20% off",
        "Shop now",
        "/img/beach.jpg",
    )];

    let html = compile_components(&components, &CompileOptions::default());

    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<section class=\"hero-header\""));
    assert!(html.contains("background-image: url('/img/beach.jpg')"));
    assert!(html.contains("<h1>Summer Sale</h1>"));
    assert!(html.contains("<p>Everything 20% off</p>"));
    assert!(html.contains("<a href=\"#\" class=\"cta-button\">Shop now</a>"));
    assert!(html.trim_end().ends_with("</section>"));
}

#[test]
fn test_hero_without_background_has_no_style() {
    let components = vec![ComponentDescriptor::hero_header("A", "B", "C", "")];
    let html = compile_components(&components, &CompileOptions::compact());
    assert!(html.starts_with("<section class=\"hero-header\"><div"));
}

#[test]
fn test_compile_each_type_in_list_order() {
    let components = vec![
        ComponentDescriptor::dynamic_text("Welcome"),
        ComponentDescriptor::text("Body copy"),
        ComponentDescriptor::image("/logo.png", "Logo"),
        ComponentDescriptor::button("/shop", "Shop"),
    ];

    let html = compile_components(&components, &CompileOptions::compact());

    assert_eq!(
        html,
        "<h2 class=\"dynamic-text\">Welcome</h2>\
         <p class=\"text-block\">Body copy</p>\
         <img src=\"/logo.png\" alt=\"Logo\" />\
         <a href=\"/shop\" class=\"button\">Shop</a>"
    );
}

#[test]
fn test_pretty_output_indents_nested_elements() {
    let components = vec![ComponentDescriptor::hero_header("H", "S", "C", "")];
    let html = compile_components(&components, &CompileOptions::default());

    assert!(html.contains("\n  <div class=\"hero-content\">\n"));
    assert!(html.contains("\n    <h1>H</h1>\n"));
}

#[test]
fn test_unrecognized_component_renders_placeholder() {
    let unknown: ComponentDescriptor =
        serde_json::from_str(r#"{ "type": "countdown", "endsAt": "soon" }"#).unwrap();

    let html = compile_components(
        &[unknown, ComponentDescriptor::text("after")],
        &CompileOptions::compact(),
    );

    assert_eq!(
        html,
        "<!-- unrecognized component --><p class=\"text-block\">after</p>"
    );
}

#[test]
fn test_empty_list_produces_empty_output() {
    assert_eq!(compile_components(&[], &CompileOptions::default()), "");
}

#[test]
fn test_text_fields_are_escaped() {
    let components = vec![
        ComponentDescriptor::text("<script>alert('x')</script>"),
        ComponentDescriptor::button("/search?q=a&b=\"c\"", "Go"),
    ];

    let html = compile_components(&components, &CompileOptions::compact());

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    assert!(html.contains("href=\"/search?q=a&amp;b=&quot;c&quot;\""));
}

#[test]
fn test_escape_html_leaves_plain_text() {
    assert_eq!(escape_html("Go"), "Go");
    assert_eq!(escape_html("a & b"), "a &amp; b");
}

#[test]
fn test_compile_document_respects_content_source() {
    let mut doc = Document::with_components(vec![ComponentDescriptor::text("generated")]);
    doc.html = "<p>stale</p>".to_string();

    let html = compile_document(&doc, &CompileOptions::compact());
    assert_eq!(html, "<p class=\"text-block\">generated</p>");

    doc.source = ContentSource::Markup;
    assert_eq!(compile_document(&doc, &CompileOptions::compact()), "<p>stale</p>");
}

#[test]
fn test_export_page_is_standalone_document() {
    let page = export_page("<p>Hi</p>", "body { margin: 0; }", "Summer Sale");

    assert_eq!(page.file_name, "summer-sale.html");
    assert_eq!(page.mime_type, "text/html");
    assert!(page.contents.starts_with("<!DOCTYPE html>\n"));
    assert!(page.contents.contains("<meta name=\"viewport\""));
    assert!(page.contents.contains("<title>Summer Sale</title>"));
    assert!(page.contents.contains("<style>\nbody { margin: 0; }\n  </style>"));
    assert!(page.contents.contains("<body>\n<p>Hi</p>\n</body>"));
}

#[test]
fn test_export_page_escapes_title_and_defaults_file_name() {
    let page = export_page("", "", "<>");
    assert!(page.contents.contains("<title>&lt;&gt;</title>"));
    assert_eq!(page.file_name, "landing-page.html");
}

#[test]
fn test_background_image_cannot_leave_css_url() {
    let components = vec![ComponentDescriptor::hero_header(
        "H",
        "S",
        "C",
        "x'); color:red; background:url('y",
    )];
    let html = compile_components(&components, &CompileOptions::compact());

    assert!(html.contains("url('x%27%29;%20color:red;%20background:url%28%27y')"));
    assert!(!html.contains("&#39;"));
}

#[test]
fn test_css_url_escaping_keeps_plain_urls() {
    assert_eq!(escape_css_url("/img/beach.jpg?w=800&h=600"), "/img/beach.jpg?w=800&h=600");
    assert_eq!(escape_css_url("a b\\c\"d"), "a%20b%5Cc%22d");
}
