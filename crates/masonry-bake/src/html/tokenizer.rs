//! Span-preserving HTML tokenizer.
//!
//! A practical subset of HTML tokenization covering tags, attributes,
//! comments, DOCTYPE and RAWTEXT (`<script>`, `<style>`). Every token
//! records the byte range it was read from so edits can be applied to the
//! original source without re-serializing untouched markup. Character
//! references are left undecoded. Malformed input is handled gracefully --
//! the tokenizer never panics.

use std::ops::Range;

// ---------------------------------------------------------------------------
// Token types
// ---------------------------------------------------------------------------

/// A single token and the source bytes it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    StartTag(StartTag),
    EndTag { name: String },
    Text,
    Comment,
    Doctype,
}

/// An opening tag. Names are lowercased.
#[derive(Debug, Clone, PartialEq)]
pub struct StartTag {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub self_closing: bool,
}

impl StartTag {
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// A `name="value"` attribute with its source ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    /// The whole attribute, name through closing quote.
    pub span: Range<usize>,
    /// The value without quotes; `None` for a bare boolean attribute.
    pub value_span: Option<Range<usize>>,
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Data,
    /// Inside a RAWTEXT element; holds the element name.
    RawText(String),
}

/// Tokenizer over a UTF-8 document.
///
/// All syntax characters are ASCII, so scanning bytes never splits a
/// multi-byte character.
pub struct Tokenizer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    state: State,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            state: State::Data,
        }
    }

    /// Consume the input and return the token stream.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while self.pos < self.bytes.len() {
            let token = match std::mem::replace(&mut self.state, State::Data) {
                State::Data => self.data(),
                State::RawText(name) => self.raw_text(&name),
            };
            if let Some(token) = token {
                if let TokenKind::StartTag(tag) = &token.kind
                    && is_rawtext_element(&tag.name)
                    && !tag.self_closing
                {
                    self.state = State::RawText(tag.name.clone());
                }
                tokens.push(token);
            }
        }
        tokens
    }

    // -- helpers ------------------------------------------------------------

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn starts_with_ci(&self, s: &str) -> bool {
        self.bytes
            .get(self.pos..self.pos + s.len())
            .is_some_and(|b| b.eq_ignore_ascii_case(s.as_bytes()))
    }

    fn skip_whitespace(&mut self) {
        while self.peek_at(0).is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Advance until `pred` holds for the current byte (or EOF).
    fn scan_until(&mut self, pred: impl Fn(u8) -> bool) -> Range<usize> {
        let start = self.pos;
        while self.peek_at(0).is_some_and(|b| !pred(b)) {
            self.pos += 1;
        }
        start..self.pos
    }

    /// Advance past the next occurrence of `needle`, or to EOF.
    fn skip_past(&mut self, needle: &str) {
        match self.input[self.pos..].find(needle) {
            Some(i) => self.pos += i + needle.len(),
            None => self.pos = self.bytes.len(),
        }
    }

    // -- states -------------------------------------------------------------

    fn data(&mut self) -> Option<Token> {
        let start = self.pos;
        if self.peek_at(0) == Some(b'<') {
            if let Some(token) = self.markup() {
                return Some(token);
            }
            // A lone `<` is text.
            self.pos = start + 1;
        }
        while let Some(b) = self.peek_at(0) {
            if b == b'<' && self.pos > start {
                break;
            }
            self.pos += 1;
        }
        Some(Token {
            kind: TokenKind::Text,
            span: start..self.pos,
        })
    }

    /// Try to read markup at a `<`. Restores nothing on failure; the
    /// caller resets the position.
    fn markup(&mut self) -> Option<Token> {
        let start = self.pos;
        match self.peek_at(1)? {
            b'!' => {
                self.pos += 2;
                let kind = if self.starts_with_ci("--") {
                    self.pos += 2;
                    self.skip_past("-->");
                    TokenKind::Comment
                } else {
                    let doctype = self.starts_with_ci("doctype");
                    self.skip_past(">");
                    if doctype {
                        TokenKind::Doctype
                    } else {
                        TokenKind::Comment
                    }
                };
                Some(Token {
                    kind,
                    span: start..self.pos,
                })
            },
            b'/' if self.peek_at(2).is_some_and(|b| b.is_ascii_alphabetic()) => {
                self.pos += 2;
                let name = self.tag_name();
                self.skip_past(">");
                Some(Token {
                    kind: TokenKind::EndTag { name },
                    span: start..self.pos,
                })
            },
            b if b.is_ascii_alphabetic() => {
                self.pos += 1;
                let name = self.tag_name();
                let (attributes, self_closing) = self.attributes();
                Some(Token {
                    kind: TokenKind::StartTag(StartTag {
                        name,
                        attributes,
                        self_closing,
                    }),
                    span: start..self.pos,
                })
            },
            _ => None,
        }
    }

    fn tag_name(&mut self) -> String {
        let range = self.scan_until(|b| b.is_ascii_whitespace() || b == b'/' || b == b'>');
        self.input[range].to_ascii_lowercase()
    }

    /// Read attributes up to and including the closing `>`.
    fn attributes(&mut self) -> (Vec<Attribute>, bool) {
        let mut attributes = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek_at(0) {
                None => return (attributes, false),
                Some(b'>') => {
                    self.pos += 1;
                    return (attributes, false);
                },
                Some(b'/') if self.peek_at(1) == Some(b'>') => {
                    self.pos += 2;
                    return (attributes, true);
                },
                Some(b'/') => self.pos += 1,
                Some(_) => attributes.push(self.attribute()),
            }
        }
    }

    fn attribute(&mut self) -> Attribute {
        let start = self.pos;
        // Always consume at least one byte so a stray `=` cannot stall.
        self.pos += 1;
        self.scan_until(|b| b.is_ascii_whitespace() || matches!(b, b'=' | b'>' | b'/'));
        let name = self.input[start..self.pos].to_ascii_lowercase();
        let name_end = self.pos;

        self.skip_whitespace();
        if self.peek_at(0) != Some(b'=') {
            self.pos = name_end;
            return Attribute {
                name,
                value: String::new(),
                span: start..name_end,
                value_span: None,
            };
        }
        self.pos += 1;
        self.skip_whitespace();

        let value_span = match self.peek_at(0) {
            Some(q @ (b'"' | b'\'')) => {
                self.pos += 1;
                let range = self.scan_until(|b| b == q);
                if self.peek_at(0).is_some() {
                    self.pos += 1;
                }
                range
            },
            _ => self.scan_until(|b| b.is_ascii_whitespace() || b == b'>'),
        };
        Attribute {
            name,
            value: self.input[value_span.clone()].to_string(),
            span: start..self.pos,
            value_span: Some(value_span),
        }
    }

    fn raw_text(&mut self, name: &str) -> Option<Token> {
        let start = self.pos;
        let close = format!("</{name}");
        while self.pos < self.bytes.len() && !self.starts_with_ci(&close) {
            self.pos += 1;
        }
        if self.pos == start {
            // At the end tag already; let the data state read it.
            return self.data();
        }
        Some(Token {
            kind: TokenKind::Text,
            span: start..self.pos,
        })
    }
}

fn is_rawtext_element(name: &str) -> bool {
    matches!(name, "script" | "style")
}
