use pagecraft_model::{Component, ComponentDescriptor, Document};
use tracing::debug;

/// Options for HTML generation
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    /// Put each element on its own indented line
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl CompileOptions {
    /// Single-line output with no indentation
    pub fn compact() -> Self {
        Self {
            pretty: false,
            indent: String::new(),
        }
    }
}

struct Context<'a> {
    options: &'a CompileOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Generate markup for a component list.
///
/// Output order follows the list order and equal input always produces
/// byte-identical output. Unrecognized component types produce an invisible
/// placeholder comment.
pub fn compile_components(components: &[ComponentDescriptor], options: &CompileOptions) -> String {
    let mut ctx = Context::new(options);

    for descriptor in components {
        match descriptor {
            ComponentDescriptor::Known(component) => compile_component(component, &mut ctx),
            ComponentDescriptor::Unrecognized(_) => {
                debug!(component_type = %descriptor.type_name(), "Skipping unrecognized component");
                ctx.add_line("<!-- unrecognized component -->");
            }
        }
    }

    ctx.get_output()
}

/// Markup for a document according to its declared content source.
///
/// Component-driven documents are regenerated; hand-written markup is
/// returned unchanged.
pub fn compile_document(document: &Document, options: &CompileOptions) -> String {
    if document.renders_components() {
        compile_components(&document.components, options)
    } else {
        document.html.clone()
    }
}

fn compile_component(component: &Component, ctx: &mut Context) {
    match component {
        Component::HeroHeader {
            headline,
            subheadline,
            cta_text,
            cta_url,
            background_image,
            ..
        } => {
            if background_image.is_empty() {
                ctx.add_line("<section class=\"hero-header\">");
            } else {
                ctx.add_line(&format!(
                    "<section class=\"hero-header\" style=\"background-image: url('{}'); background-size: cover; background-position: center;\">",
                    escape_html(&escape_css_url(background_image))
                ));
            }
            ctx.indent();
            ctx.add_line("<div class=\"hero-content\">");
            ctx.indent();
            ctx.add_line(&format!("<h1>{}</h1>", escape_html(headline)));
            ctx.add_line(&format!("<p>{}</p>", escape_html(subheadline)));
            ctx.add_line(&format!(
                "<a href=\"{}\" class=\"cta-button\">{}</a>",
                escape_html(cta_url),
                escape_html(cta_text)
            ));
            ctx.dedent();
            ctx.add_line("</div>");
            ctx.dedent();
            ctx.add_line("</section>");
        }

        Component::Text { content, .. } => {
            ctx.add_line(&format!("<p class=\"text-block\">{}</p>", escape_html(content)));
        }

        Component::DynamicText { content, .. } => {
            ctx.add_line(&format!("<h2 class=\"dynamic-text\">{}</h2>", escape_html(content)));
        }

        Component::Button { url, text, .. } => {
            ctx.add_line(&format!(
                "<a href=\"{}\" class=\"button\">{}</a>",
                escape_html(url),
                escape_html(text)
            ));
        }

        Component::Image { src, alt, .. } => {
            ctx.add_line(&format!(
                "<img src=\"{}\" alt=\"{}\" />",
                escape_html(src),
                escape_html(alt)
            ));
        }
    }
}

/// Entity-encode markup-significant characters.
///
/// Every user-authored value reaches the output through this function, in
/// both text and attribute positions. Entity encoding does not protect a
/// value embedded in CSS inside an attribute, because the browser decodes
/// entities before the CSS parser runs; such values go through
/// [`escape_css_url`] first.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Percent-encode the characters that could end a quoted CSS `url('...')`.
///
/// Quotes, parentheses, backslashes, whitespace and control characters are
/// replaced; a well-formed URL keeps its meaning.
pub fn escape_css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '\'' | '"' | '(' | ')' | '\\' => out.push_str(&format!("%{:02X}", c as u32)),
            c if c.is_whitespace() || c.is_control() => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{:02X}", byte));
                }
            }
            c => out.push(c),
        }
    }
    out
}
