//! Splice a content plan into the board page.
//!
//! Cards are located as `div.card[data-card-id=…]`. For each planned card
//! the bake rewrites at most three places: the `.card-header h3` title, the
//! `data-span` attribute of the card's opening tag, and the card body. All
//! edits are byte-range replacements on the original source, so markup the
//! plan does not mention is left exactly as it was.

use std::io;
use std::path::Path;

use masonry_types::{BoardError, CardId, Result};

use crate::config::BakeConfig;
use crate::html::document::NodeKind;
use crate::html::{Document, Edit, ElementData, NodeId, apply_edits, escape_attr, escape_text};
use crate::markdown;
use crate::plan::{self, CardPlan, ContentPlan};

/// Result of baking a page on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BakeOutcome {
    pub cards: usize,
    pub changed: bool,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn is_div_with(el: &ElementData, class: &str) -> bool {
    el.tag.name == "div" && el.has_class(class)
}

/// Rewrite `html` according to `plan`. Cards named in the plan but absent
/// from the page are skipped with a warning.
///
/// Returns [`BoardError::Html`] when two planned edits overlap, as happens
/// when one planned card is nested inside another, or when an edit falls
/// outside the source.
pub fn update_page(html: &str, plan: &ContentPlan) -> Result<String> {
    let doc = Document::parse(html);
    let mut edits = Vec::new();
    for (id, card_plan) in plan {
        let Some(card) = find_card(&doc, id) else {
            log::warn!("Card {id} is not on the page -- skipping");
            continue;
        };
        edits.extend(title_edit(&doc, card, card_plan));
        edits.extend(span_edit(&doc, card, card_plan));
        edits.extend(body_edit(&doc, card, card_plan));
    }
    log::debug!("Applying {} page edits", edits.len());
    apply_edits(html, edits)
}

fn find_card(doc: &Document<'_>, id: &CardId) -> Option<NodeId> {
    doc.find(|el| is_div_with(el, "card") && el.attr("data-card-id") == Some(id.as_str()))
}

// -- Title -------------------------------------------------------------------

fn title_edit(doc: &Document<'_>, card: NodeId, plan: &CardPlan) -> Option<Edit> {
    let title = non_empty(&plan.title)?;
    let header = doc.find_descendant(card, |el| is_div_with(el, "card-header"))?;
    let h3 = doc.find_descendant(header, |el| el.tag.name == "h3")?;
    let inner = doc.inner_range(h3)?;

    let replacement = match leading_icon_end(doc, h3) {
        Some(icon_end) => format!(
            "{} {}",
            &doc.source()[inner.start..icon_end],
            escape_text(title)
        ),
        None => escape_text(title),
    };
    Some(Edit::replace(inner, replacement))
}

/// If the heading starts with an `<svg>` (after optional whitespace),
/// the offset just past it and any whitespace that follows.
fn leading_icon_end(doc: &Document<'_>, heading: NodeId) -> Option<usize> {
    let source = doc.source();
    let first = doc.nodes[heading].children.iter().copied().find(|&c| {
        !matches!(&doc.nodes[c].kind, NodeKind::Text(r) if source[r.clone()].trim().is_empty())
    })?;
    let svg = doc.element(first)?;
    if svg.tag.name != "svg" || svg.close.is_none() {
        return None;
    }
    let end = doc.outer_end(first)?;
    let inner_end = doc.inner_range(heading)?.end;
    let trailing = source[end..inner_end].len() - source[end..inner_end].trim_start().len();
    Some(end + trailing)
}

// -- Span --------------------------------------------------------------------

fn span_edit(doc: &Document<'_>, card: NodeId, plan: &CardPlan) -> Option<Edit> {
    let span = plan.span_value()?;
    let el = doc.element(card)?;
    match el.tag.attr("data-span") {
        Some(existing) => {
            let value = existing.value_span.clone()?;
            let numeric = !existing.value.is_empty()
                && existing.value.bytes().all(|b| b.is_ascii_digit());
            (numeric && existing.value != span.to_string())
                .then(|| Edit::replace(value, span.to_string()))
        },
        None => {
            let id_attr = el.tag.attr("data-card-id")?;
            Some(Edit::insert(
                id_attr.span.end,
                format!(" data-span=\"{span}\""),
            ))
        },
    }
}

// -- Body --------------------------------------------------------------------

fn body_edit(doc: &Document<'_>, card: NodeId, plan: &CardPlan) -> Option<Edit> {
    if plan.is_rte() {
        let content = non_empty(&plan.content)?;
        let body = doc.find_descendant(card, |el| {
            is_div_with(el, "card-content") && el.has_class("rte-content")
        })?;
        let editor = doc.find_descendant(body, |el| is_div_with(el, "rte-editor"))?;
        return Some(Edit::replace(
            doc.inner_range(editor)?,
            markdown::render(content),
        ));
    }

    let mut html = String::new();
    if let Some(src) = non_empty(&plan.image) {
        html.push_str(&format!("<img src=\"{}\" alt=\"\" />", escape_attr(src)));
    }
    if let Some(content) = non_empty(&plan.content) {
        html.push_str(&markdown::render(content));
    }
    if html.is_empty() {
        return None;
    }
    let body = doc.find_descendant(card, |el| {
        is_div_with(el, "card-content") && !el.has_class("rte-content")
    })?;
    Some(Edit::replace(doc.inner_range(body)?, html))
}

// -- Files -------------------------------------------------------------------

/// Bake the plan in `dir` into its page, writing only when the page changes.
pub fn bake_dir(dir: &Path, config: &BakeConfig) -> Result<BakeOutcome> {
    bake_files(&config.plan_path(dir), &config.page_path(dir), false)
}

/// Bake `plan_path` into `page_path`. With `dry_run` the page is never
/// written; the outcome still reports whether it would change.
pub fn bake_files(plan_path: &Path, page_path: &Path, dry_run: bool) -> Result<BakeOutcome> {
    let page = read(page_path)?;
    let plan = plan::parse(&read(plan_path)?);
    let updated = update_page(&page, &plan)?;
    let changed = updated != page;

    if !changed {
        log::info!("No changes applied to {}", page_path.display());
    } else if dry_run {
        log::info!("{} would be updated", page_path.display());
    } else {
        std::fs::write(page_path, &updated)?;
        log::info!(
            "{} updated from {}",
            page_path.display(),
            plan_path.display()
        );
    }
    Ok(BakeOutcome {
        cards: plan.len(),
        changed,
    })
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            BoardError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        } else {
            BoardError::Io(e)
        }
    })
}
