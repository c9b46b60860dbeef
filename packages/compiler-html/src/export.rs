//! Standalone "view page" export.
//!
//! Wraps a page's markup and stylesheet into a complete HTML document that
//! can be downloaded or opened on its own. This is a one-way export and has
//! no effect on the edit/save cycle.

use crate::compiler::escape_html;

pub const EXPORT_MIME_TYPE: &str = "text/html";

/// A rendered page ready to be written out or served
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedPage {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

impl ExportedPage {
    pub fn as_bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }
}

/// Build a standalone HTML document from page markup and stylesheet.
///
/// `html` and `css` are trusted page content and are inlined as-is; only the
/// title is escaped.
pub fn export_page(html: &str, css: &str, title: &str) -> ExportedPage {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n");
    out.push_str("<html>\n");
    out.push_str("<head>\n");
    out.push_str("  <meta charset=\"UTF-8\">\n");
    out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
    out.push_str("  <style>\n");
    out.push_str(css);
    if !css.is_empty() && !css.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("  </style>\n");
    out.push_str("</head>\n");
    out.push_str("<body>\n");
    out.push_str(html);
    if !html.is_empty() && !html.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("</body>\n");
    out.push_str("</html>\n");

    ExportedPage {
        file_name: export_file_name(title),
        mime_type: EXPORT_MIME_TYPE,
        contents: out,
    }
}

fn export_file_name(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "landing-page.html".to_string()
    } else {
        format!("{}.html", slug)
    }
}
