//! Content plan parsing.
//!
//! A content plan is a markdown file whose `## Cards` section holds one
//! `- **card-N.key**: value` line per field. A `content` field whose value
//! is `|` starts a multi-line block:
//!
//! ```text
//! ## Cards
//! - **card-1.title**: Roadmap
//! - **card-1.span**: 2
//! - **card-1.content**: |
//!   ## Q3
//!   - ship the bake tool
//! ```
//!
//! The block ends at the next field line, any `- **` line, or a `##` /
//! `###` heading. The section itself ends at the next `##` heading.

use std::collections::BTreeMap;

use masonry_types::CardId;

/// Everything the plan says about one card. Absent keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPlan {
    pub title: Option<String>,
    /// Raw span value; see [`CardPlan::span_value`].
    pub span: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    /// The `type` key. `rte` routes content into the rich-text editor.
    pub kind: Option<String>,
}

impl CardPlan {
    /// Leading decimal digits of the span value, if any.
    pub fn span_value(&self) -> Option<u32> {
        let raw = self.span.as_deref()?.trim_start();
        let digits = raw.bytes().take_while(u8::is_ascii_digit).count();
        raw[..digits].parse().ok()
    }

    pub fn is_rte(&self) -> bool {
        self.kind.as_deref() == Some("rte")
    }

    fn set(&mut self, card: &CardId, key: &str, value: String) {
        let slot = match key {
            "title" => &mut self.title,
            "span" => &mut self.span,
            "content" => &mut self.content,
            "image" => &mut self.image,
            "type" => &mut self.kind,
            _ => {
                log::debug!("Ignoring unknown plan key {card}.{key}");
                return;
            },
        };
        *slot = Some(value);
    }
}

/// Parsed plan, keyed by card id.
pub type ContentPlan = BTreeMap<CardId, CardPlan>;

/// A `- **card-N.key**: value` line.
struct Field<'a> {
    card: &'a str,
    key: &'a str,
    value: &'a str,
}

fn parse_field(line: &str) -> Option<Field<'_>> {
    let rest = line.trim_start().strip_prefix('-')?;
    let rest = rest.trim_start().strip_prefix("**")?;
    let (name, value) = rest.split_once("**:")?;
    let (card, key) = name.split_once('.')?;
    let number = card.strip_prefix("card-")?;
    let valid_card = !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit());
    let valid_key = !key.is_empty() && key.chars().all(|c| c.is_alphanumeric() || c == '_');
    (valid_card && valid_key).then(|| Field {
        card,
        key,
        value: value.trim(),
    })
}

/// `##` followed by whitespace.
fn is_h2(line: &str) -> bool {
    heading_with(line, "##")
}

fn is_h3(line: &str) -> bool {
    heading_with(line, "###")
}

fn heading_with(line: &str, hashes: &str) -> bool {
    line.strip_prefix(hashes)
        .and_then(|r| r.chars().next())
        .is_some_and(char::is_whitespace)
}

fn is_cards_heading(line: &str) -> bool {
    is_h2(line) && line[2..].trim_start().starts_with("Cards")
}

/// Ends a multi-line content block.
fn ends_block(line: &str) -> bool {
    let starts_bold_item = line
        .trim_start()
        .strip_prefix('-')
        .is_some_and(|r| r.trim_start().starts_with("**"));
    starts_bold_item || is_h2(line) || is_h3(line)
}

/// Strip two or more leading whitespace characters.
fn dedent(line: &str) -> &str {
    let trimmed = line.trim_start();
    if line.chars().take_while(|c| c.is_whitespace()).count() >= 2 {
        trimmed
    } else {
        line
    }
}

/// Content lines being collected for one card.
struct Pending {
    card: CardId,
    lines: Vec<String>,
}

impl Pending {
    fn flush(self, plan: &mut ContentPlan) {
        if self.lines.is_empty() {
            return;
        }
        let value = self.lines.join("\n").trim().to_string();
        plan.entry(self.card.clone())
            .or_default()
            .set(&self.card, "content", value);
    }
}

/// Parse the `## Cards` section of a content plan. A plan without one
/// yields an empty map.
pub fn parse(text: &str) -> ContentPlan {
    let mut plan = ContentPlan::new();
    let mut in_cards = false;
    let mut pending: Option<Pending> = None;

    for line in text.lines() {
        if is_cards_heading(line) {
            in_cards = true;
            continue;
        }
        if !in_cards {
            continue;
        }
        if is_h2(line) {
            break;
        }

        if let Some(block) = pending.as_mut()
            && !ends_block(line)
        {
            block.lines.push(dedent(line).to_string());
            continue;
        }
        if let Some(block) = pending.take() {
            block.flush(&mut plan);
        }

        let Some(field) = parse_field(line) else {
            continue;
        };
        let card = CardId::from(field.card);
        if field.key == "content" && field.value == "|" {
            pending = Some(Pending {
                card,
                lines: Vec::new(),
            });
        } else {
            plan.entry(card.clone())
                .or_default()
                .set(&card, field.key, field.value.to_string());
        }
    }

    if let Some(block) = pending {
        block.flush(&mut plan);
    }
    log::debug!("Content plan covers {} cards", plan.len());
    plan
}
