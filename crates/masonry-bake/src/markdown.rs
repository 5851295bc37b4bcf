//! Markdown-to-HTML rendering for card bodies.
//!
//! Parsing is CommonMark via `pulldown-cmark`; [`HtmlWriter`] turns the
//! event stream into the compact markup the board page uses. Top-level
//! blocks are separated by a single newline, lists carry no whitespace
//! between items, links open in a new tab, and raw HTML in the source is
//! escaped rather than passed through. Lines consisting only of bold text
//! (optionally followed by a colon) are first split into blocks of their
//! own so a `**Label**:` line never runs into the paragraph below it.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::html::{escape_attr, escape_text};

/// Render a markdown fragment to HTML. Blank input renders to nothing.
pub fn render(text: &str) -> String {
    let src = text.trim();
    if src.is_empty() {
        return String::new();
    }
    HtmlWriter::new(false).run(&isolate_bold_lines(src))
}

/// Render a single line of inline markdown without a surrounding `<p>`.
pub fn inline(text: &str) -> String {
    HtmlWriter::new(true).run(text.trim())
}

/// `**Label**` or `**Label**:` alone on a line.
fn is_bold_only(line: &str) -> bool {
    let t = line.trim();
    let t = t.strip_suffix(':').map_or(t, str::trim_end);
    let Some(inner) = t.strip_prefix("**").and_then(|s| s.strip_suffix("**")) else {
        return false;
    };
    !inner.is_empty() && !inner.contains('*')
}

fn is_fence(line: &str) -> bool {
    let t = line.trim_start();
    t.starts_with("```") || t.starts_with("~~~")
}

/// Surround bold-only lines with blank lines. Fenced code is left as is.
fn isolate_bold_lines(src: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut in_fence = false;
    for line in src.lines() {
        if is_fence(line) {
            in_fence = !in_fence;
        }
        if !in_fence && is_bold_only(line) {
            if lines.last().is_some_and(|l| !l.is_empty()) {
                lines.push("");
            }
            lines.push(line);
            lines.push("");
        } else {
            lines.push(line);
        }
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Writes `pulldown-cmark` events as HTML.
struct HtmlWriter {
    out: String,
    /// Open block containers. Blocks opened at depth zero are separated by
    /// a newline.
    depth: usize,
    /// Open block quotes. Paragraphs inside a quote render as bare text
    /// joined by spaces.
    quotes: usize,
    /// No paragraph inside the innermost quote has started yet.
    quote_fresh: bool,
    /// Open images. Their inner text becomes the `alt` attribute.
    images: usize,
    /// Omit `<p>` around top-level paragraphs.
    bare: bool,
}

impl HtmlWriter {
    fn new(bare: bool) -> Self {
        Self {
            out: String::new(),
            depth: 0,
            quotes: 0,
            quote_fresh: false,
            images: 0,
            bare,
        }
    }

    fn run(mut self, src: &str) -> String {
        for event in Parser::new_ext(src, Options::empty()) {
            match event {
                Event::Start(tag) => self.start_tag(tag),
                Event::End(tag) => self.end_tag(tag),
                Event::Text(text) => self.text(&text),
                Event::Code(code) => {
                    self.out.push_str("<code>");
                    self.out.push_str(&escape_text(&code));
                    self.out.push_str("</code>");
                },
                Event::Html(raw) | Event::InlineHtml(raw) => self.text(&raw),
                Event::SoftBreak => self.out.push(if self.quotes > 0 { ' ' } else { '\n' }),
                Event::HardBreak => self.out.push_str("<br>"),
                Event::Rule => {
                    self.open_block();
                    self.out.push_str("<hr>");
                    self.close_block();
                },
                _ => {},
            }
        }
        self.out
    }

    fn open_block(&mut self) {
        if self.depth == 0 && !self.out.is_empty() {
            self.out.push('\n');
        }
        self.depth += 1;
    }

    fn close_block(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Whether a paragraph at the current depth gets `<p>` tags.
    fn wraps_paragraph(&self) -> bool {
        self.quotes == 0 && !(self.bare && self.depth == 0)
    }

    fn text(&mut self, text: &str) {
        if self.images > 0 {
            self.out.push_str(&escape_attr(text));
        } else {
            self.out.push_str(&escape_text(text));
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        if self.images > 0 {
            if matches!(tag, Tag::Image { .. }) {
                self.images += 1;
            }
            return;
        }
        match tag {
            Tag::Paragraph | Tag::HtmlBlock => {
                let wrap = self.wraps_paragraph();
                self.open_block();
                if wrap {
                    self.out.push_str("<p>");
                } else if self.quotes > 0 && !std::mem::take(&mut self.quote_fresh) {
                    self.out.push(' ');
                }
            },
            Tag::Heading { level, .. } => {
                self.open_block();
                self.out.push_str(&format!("<{level}>"));
            },
            Tag::BlockQuote(_) => {
                self.open_block();
                self.quotes += 1;
                self.quote_fresh = true;
                self.out.push_str("<blockquote>");
            },
            Tag::CodeBlock(kind) => {
                self.open_block();
                self.out.push_str("<pre><code");
                if let CodeBlockKind::Fenced(info) = &kind
                    && let Some(lang) = info.split_whitespace().next()
                {
                    self.out
                        .push_str(&format!(" class=\"language-{}\"", escape_attr(lang)));
                }
                self.out.push('>');
            },
            Tag::List(Some(1)) => {
                self.open_block();
                self.out.push_str("<ol>");
            },
            Tag::List(Some(start)) => {
                self.open_block();
                self.out.push_str(&format!("<ol start=\"{start}\">"));
            },
            Tag::List(None) => {
                self.open_block();
                self.out.push_str("<ul>");
            },
            Tag::Item => {
                self.open_block();
                self.out.push_str("<li>");
            },
            Tag::Emphasis => self.out.push_str("<em>"),
            Tag::Strong => self.out.push_str("<strong>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                self.out.push_str(&format!("<a href=\"{}\"", escape_attr(&dest_url)));
                self.title_attr(&title);
                self.out
                    .push_str(" target=\"_blank\" rel=\"noopener noreferrer\">");
            },
            Tag::Image {
                dest_url, title, ..
            } => {
                self.images = 1;
                self.out.push_str(&format!("<img src=\"{}\"", escape_attr(&dest_url)));
                self.title_attr(&title);
                self.out.push_str(" alt=\"");
            },
            _ => {},
        }
    }

    fn title_attr(&mut self, title: &CowStr<'_>) {
        if !title.is_empty() {
            self.out
                .push_str(&format!(" title=\"{}\"", escape_attr(title)));
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        if self.images > 0 {
            if tag == TagEnd::Image {
                self.images -= 1;
                if self.images == 0 {
                    self.out.push_str("\" />");
                }
            }
            return;
        }
        match tag {
            TagEnd::Paragraph | TagEnd::HtmlBlock => {
                self.close_block();
                let end = self.out.trim_end_matches('\n').len();
                self.out.truncate(end);
                if self.wraps_paragraph() {
                    self.out.push_str("</p>");
                }
            },
            TagEnd::Heading(level) => {
                self.out.push_str(&format!("</{level}>"));
                self.close_block();
            },
            TagEnd::BlockQuote(_) => {
                self.out.push_str("</blockquote>");
                self.quotes = self.quotes.saturating_sub(1);
                self.quote_fresh = false;
                self.close_block();
            },
            TagEnd::CodeBlock => {
                self.out.push_str("</code></pre>");
                self.close_block();
            },
            TagEnd::List(ordered) => {
                self.out.push_str(if ordered { "</ol>" } else { "</ul>" });
                self.close_block();
            },
            TagEnd::Item => {
                self.out.push_str("</li>");
                self.close_block();
            },
            TagEnd::Emphasis => self.out.push_str("</em>"),
            TagEnd::Strong => self.out.push_str("</strong>"),
            TagEnd::Link => self.out.push_str("</a>"),
            _ => {},
        }
    }
}
