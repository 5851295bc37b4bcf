//! Arena-based element tree over a tokenized document.
//!
//! Nodes are stored in a flat `Vec` arena and linked by index, the same way
//! a layout DOM would be, but every node keeps the source ranges of its
//! tags. Queries return those ranges; nothing is ever re-serialized.

use std::ops::Range;

use super::tokenizer::{StartTag, Token, TokenKind, Tokenizer};

/// Index into the [`Document`]'s node arena.
pub type NodeId = usize;

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A parsed document borrowing its source text.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    source: &'a str,
    pub nodes: Vec<Node>,
    pub root: NodeId,
}

/// A single node.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Document,
    Element(ElementData),
    Text(Range<usize>),
    Comment(Range<usize>),
}

/// An element and where its tags sit in the source.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub tag: StartTag,
    /// The opening tag, `<` through `>`.
    pub open: Range<usize>,
    /// The closing tag; `None` for void or unclosed elements.
    pub close: Option<Range<usize>>,
}

impl ElementData {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.tag.attr(name).map(|a| a.value.as_str())
    }

    /// Whether the `class` attribute lists `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_ascii_whitespace().any(|c| c == class))
    }
}

impl<'a> Document<'a> {
    /// Tokenize and build the element tree.
    ///
    /// Stray end tags are ignored; an end tag closes the nearest open
    /// element of the same name, implicitly closing anything opened inside
    /// it. Elements still open at EOF stay unclosed.
    pub fn parse(source: &'a str) -> Self {
        let tokens = Tokenizer::new(source).tokenize();
        let mut doc = Self {
            source,
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
            root: 0,
        };
        let mut open: Vec<NodeId> = vec![doc.root];
        for Token { kind, span } in tokens {
            let parent = open.last().copied().unwrap_or(doc.root);
            match kind {
                TokenKind::StartTag(tag) => {
                    let leaf = tag.self_closing || VOID_ELEMENTS.contains(&tag.name.as_str());
                    let id = doc.push(
                        parent,
                        NodeKind::Element(ElementData {
                            tag,
                            open: span,
                            close: None,
                        }),
                    );
                    if !leaf {
                        open.push(id);
                    }
                },
                TokenKind::EndTag { name } => {
                    let Some(depth) = open
                        .iter()
                        .rposition(|&id| doc.element(id).is_some_and(|e| e.tag.name == name))
                    else {
                        continue;
                    };
                    let id = open[depth];
                    open.truncate(depth);
                    if let NodeKind::Element(el) = &mut doc.nodes[id].kind {
                        el.close = Some(span);
                    }
                },
                TokenKind::Text => {
                    doc.push(parent, NodeKind::Text(span));
                },
                TokenKind::Comment | TokenKind::Doctype => {
                    doc.push(parent, NodeKind::Comment(span));
                },
            }
        }
        doc
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Byte range between an element's tags. For an unclosed element this
    /// runs to the end of its last descendant.
    pub fn inner_range(&self, id: NodeId) -> Option<Range<usize>> {
        let el = self.element(id)?;
        let end = match &el.close {
            Some(close) => close.start,
            None => self.subtree_end(id),
        };
        Some(el.open.end..end)
    }

    /// End of an element's whole extent, closing tag included.
    pub fn outer_end(&self, id: NodeId) -> Option<usize> {
        let el = self.element(id)?;
        Some(el.close.as_ref().map_or_else(|| self.subtree_end(id), |c| c.end))
    }

    fn subtree_end(&self, id: NodeId) -> usize {
        let node = &self.nodes[id];
        let own = match &node.kind {
            NodeKind::Element(el) => el.close.as_ref().map_or(el.open.end, |c| c.end),
            NodeKind::Text(r) | NodeKind::Comment(r) => r.end,
            NodeKind::Document => 0,
        };
        node.children
            .iter()
            .map(|&c| self.subtree_end(c))
            .fold(own, usize::max)
    }

    /// First descendant of `id` (preorder, `id` excluded) whose element
    /// data satisfies `pred`.
    pub fn find_descendant(
        &self,
        id: NodeId,
        pred: impl Fn(&ElementData) -> bool + Copy,
    ) -> Option<NodeId> {
        for &child in &self.nodes.get(id)?.children {
            if self.element(child).is_some_and(pred) {
                return Some(child);
            }
            if let Some(found) = self.find_descendant(child, pred) {
                return Some(found);
            }
        }
        None
    }

    /// First element anywhere in the document satisfying `pred`.
    pub fn find(&self, pred: impl Fn(&ElementData) -> bool + Copy) -> Option<NodeId> {
        self.find_descendant(self.root, pred)
    }
}
