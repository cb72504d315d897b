use pagecraft_document::{Document, DocumentNode, TAG_TEXT};

const DOCTYPE_DECLARATION: &str = "<!doctype html>";

/// Attribute of the `Text` pseudo-tag holding its character data
const TEXT_ATTRIBUTE: &str = "text";

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Emit attributes whose value is still blank
    pub include_empty_attributes: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            include_empty_attributes: false,
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

    fn start_line(&mut self) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.options.indent);
            }
        }
    }

    fn end_line(&mut self) {
        if self.options.pretty {
            self.buffer.push('\n');
        }
    }

    fn add_line(&mut self, text: &str) {
        self.start_line();
        self.add(text);
        self.end_line();
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

/// Render the document's tag tree as an HTML page
pub fn compile_to_html(document: &Document, options: &CompileOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line(DOCTYPE_DECLARATION);
    compile_node(document.root(), &mut ctx);

    ctx.get_output()
}

/// The stylesheet text, verbatim
pub fn compile_css(document: &Document) -> String {
    document.stylesheet_text().to_string()
}

fn compile_node(node: &DocumentNode, ctx: &mut Context) {
    if node.name() == TAG_TEXT {
        let text = node.tag().attribute(TEXT_ATTRIBUTE).unwrap_or_default();
        ctx.add_line(&escape_html(text));
        // Text encloses nothing; anything nested under it follows the text
        for child in node.children() {
            compile_node(child, ctx);
        }
        return;
    }

    ctx.start_line();
    compile_open_tag(node, ctx);

    if node.children().is_empty() {
        if node.tag().has_closing_tag() {
            ctx.add(&format!("</{}>", node.name()));
        }
        ctx.end_line();
        return;
    }

    // Void tags never enclose anything; any children follow as siblings
    ctx.end_line();
    if node.tag().has_closing_tag() {
        ctx.indent();
    }

    for child in node.children() {
        compile_node(child, ctx);
    }

    if node.tag().has_closing_tag() {
        ctx.dedent();
        ctx.add_line(&format!("</{}>", node.name()));
    }
}

fn compile_open_tag(node: &DocumentNode, ctx: &mut Context) {
    ctx.add("<");
    ctx.add(node.name());

    for (name, value) in node.tag().attributes() {
        if value.is_empty() && !ctx.options.include_empty_attributes {
            continue;
        }
        ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
    }

    ctx.add(">");
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
