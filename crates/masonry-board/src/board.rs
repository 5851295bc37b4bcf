//! In-memory board.
//!
//! Columns hold an ordered list of children: cards and spacers. Geometry is
//! never stored; every rect is derived from the current grid width, gap and
//! child heights when asked for. Within a column the optional header comes
//! first, then children stack top to bottom separated by the gap.

use masonry_layout::span::compute_width_for_span;
use masonry_layout::{
    CardPlacement, ColumnContentProvider, ElementRef, GridGeometryProvider, GridMetrics,
    InsertPosition, LayoutSurface, Spacer, VisualChild,
};
use masonry_types::input::Direction;
use masonry_types::{BoardConfig, BoardError, CardId, Rect, Result};

/// A card on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    /// Height of the card's content before any resize.
    pub content_height: f32,
    /// Height set by a resize gesture, overriding `content_height`.
    pub explicit_height: Option<f32>,
    /// Number of columns the card spans.
    pub span: u32,
}

impl Card {
    /// Rendered height.
    pub fn height(&self) -> f32 {
        self.explicit_height.unwrap_or(self.content_height)
    }

    /// Visual span class, e.g. `span-2`.
    pub fn span_class(&self) -> String {
        format!("span-{}", self.span)
    }
}

#[derive(Debug, Clone)]
enum Child {
    Card(Card),
    Spacer(Spacer),
}

impl Child {
    fn element(&self) -> ElementRef {
        match self {
            Self::Card(card) => ElementRef::Card(card.id.clone()),
            Self::Spacer(spacer) => ElementRef::Spacer(spacer.owner.clone()),
        }
    }

    fn height(&self) -> f32 {
        match self {
            Self::Card(card) => card.height(),
            Self::Spacer(spacer) => spacer.height,
        }
    }

    fn is_card(&self, id: &CardId) -> bool {
        matches!(self, Self::Card(card) if &card.id == id)
    }

    fn is_spacer_for(&self, id: &CardId) -> bool {
        matches!(self, Self::Spacer(spacer) if &spacer.owner == id)
    }
}

/// A multi-column masonry board.
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    /// Live width of the grid container.
    grid_width: f32,
    columns: Vec<Vec<Child>>,
    next_card: u64,
}

impl Board {
    /// Create an empty board with the configured number of columns.
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;
        let columns = (0..config.column_count).map(|_| Vec::new()).collect();
        Ok(Self {
            grid_width: config.grid_width,
            columns,
            next_card: 1,
            config,
        })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn grid_width(&self) -> f32 {
        self.grid_width
    }

    // -- Cards ------------------------------------------------------------

    /// Append a new card to `column`. Ids are `card-<n>` from a counter that
    /// never reuses a value.
    pub fn add_card(&mut self, column: usize, title: &str, content_height: f32) -> Result<CardId> {
        let children = self
            .columns
            .get_mut(column)
            .ok_or(BoardError::ColumnNotFound(column))?;
        let id = CardId::numbered(self.next_card);
        self.next_card += 1;
        children.push(Child::Card(Card {
            id: id.clone(),
            title: title.to_string(),
            content_height,
            explicit_height: None,
            span: 1,
        }));
        log::debug!("added {id} to column {column}");
        Ok(id)
    }

    /// Append a new card of the configured default height.
    pub fn add_default_card(&mut self, column: usize, title: &str) -> Result<CardId> {
        self.add_card(column, title, self.config.default_card_height)
    }

    /// Remove a card together with its spacers.
    pub fn remove_card(&mut self, id: &CardId) -> Result<Card> {
        let (column, index) = self.locate(id).ok_or_else(|| not_found(id))?;
        let Child::Card(card) = self.columns[column].remove(index) else {
            return Err(not_found(id));
        };
        self.remove_spacers(id);
        log::debug!("removed {id} from column {column}");
        Ok(card)
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.columns.iter().flatten().find_map(|child| match child {
            Child::Card(card) if &card.id == id => Some(card),
            _ => None,
        })
    }

    fn card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.columns.iter_mut().flatten().find_map(|child| match child {
            Child::Card(card) if &card.id == id => Some(card),
            _ => None,
        })
    }

    /// Column index and child index of a card.
    pub fn locate(&self, id: &CardId) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(col, children)| {
            children
                .iter()
                .position(|child| child.is_card(id))
                .map(|index| (col, index))
        })
    }

    /// Card ids of a column in visual order, spacers skipped.
    pub fn column_cards(&self, column: usize) -> Result<Vec<CardId>> {
        let children = self
            .columns
            .get(column)
            .ok_or(BoardError::ColumnNotFound(column))?;
        Ok(children
            .iter()
            .filter_map(|child| match child {
                Child::Card(card) => Some(card.id.clone()),
                Child::Spacer(_) => None,
            })
            .collect())
    }

    /// Set or clear a card's resized height.
    pub fn set_card_height(&mut self, id: &CardId, height: Option<f32>) -> Result<()> {
        let card = self.card_mut(id).ok_or_else(|| not_found(id))?;
        card.explicit_height = height;
        Ok(())
    }

    /// Every card id on the board, column by column.
    pub fn card_ids(&self) -> Vec<CardId> {
        self.columns
            .iter()
            .flatten()
            .filter_map(|child| match child {
                Child::Card(card) => Some(card.id.clone()),
                Child::Spacer(_) => None,
            })
            .collect()
    }

    /// Spacers owned by a card as `(column, height)` pairs.
    pub fn spacers_for(&self, id: &CardId) -> Vec<(usize, f32)> {
        let mut out = Vec::new();
        for (col, children) in self.columns.iter().enumerate() {
            for child in children {
                if let Child::Spacer(spacer) = child {
                    if &spacer.owner == id {
                        out.push((col, spacer.height));
                    }
                }
            }
        }
        out
    }

    // -- Geometry ---------------------------------------------------------

    /// Document-relative top of the first child slot in every column.
    fn content_top(&self) -> f32 {
        let header = self
            .config
            .header_height
            .map_or(0.0, |h| h + self.config.gap);
        self.config.grid_top + header
    }

    /// Children of a column with their computed top and height.
    fn stack(&self, column: usize) -> Option<Vec<VisualChild>> {
        let children = self.columns.get(column)?;
        let mut top = self.content_top();
        let mut out = Vec::with_capacity(children.len());
        for child in children {
            let height = child.height();
            out.push(VisualChild {
                element: child.element(),
                top,
                height,
            });
            top += height + self.config.gap;
        }
        Some(out)
    }

    /// Rendered bounding box of a card.
    pub fn card_rect(&self, id: &CardId) -> Option<Rect> {
        self.placement(id).map(|p| p.rect)
    }

    /// Bounding box of a column, from the grid top to its last child.
    pub fn column_rect(&self, column: usize) -> Option<Rect> {
        let metrics = self.metrics()?;
        let stack = self.stack(column)?;
        let bottom = stack
            .last()
            .map_or(self.content_top(), |c| c.top + c.height);
        Some(Rect::new(
            metrics.column_x(column),
            self.config.grid_top,
            metrics.column_width,
            bottom - self.config.grid_top,
        ))
    }

    /// Column under a grid-relative x coordinate. Points inside a gap
    /// belong to no column.
    pub fn column_at(&self, x: f32) -> Option<usize> {
        (0..self.columns.len()).find(|&col| {
            self.column_rect(col)
                .is_some_and(|rect| x >= rect.x && x < rect.right())
        })
    }

    /// The card a dragged card would be inserted before when released at
    /// `y` over `column`: the first card whose vertical midpoint lies below
    /// the pointer. `None` means "append". The dragged card itself is
    /// ignored.
    pub fn drop_target(&self, column: usize, y: f32, dragged: Option<&CardId>) -> Option<CardId> {
        self.stack(column)?
            .into_iter()
            .filter_map(|child| match child.element {
                ElementRef::Card(id) if Some(&id) != dragged => Some(id),
                _ => None,
            })
            .find(|id| self.card_rect(id).is_some_and(|rect| y < rect.mid_y()))
    }

    // -- Moves ------------------------------------------------------------

    /// Move a card into `column`, positioned by the pointer's `y`.
    pub fn drop_card(&mut self, id: &CardId, column: usize, y: f32) -> Result<()> {
        if column >= self.columns.len() {
            return Err(BoardError::ColumnNotFound(column));
        }
        let before = self.drop_target(column, y, Some(id));
        let card = self.take_card(id)?;
        self.insert_card(column, before.as_ref(), card);
        log::debug!("dropped {id} into column {column}");
        Ok(())
    }

    /// Keyboard move to the neighbouring column, appended at its end.
    ///
    /// Returns `false` when the card is already at the edge or the
    /// direction is vertical.
    pub fn move_card_to_column(&mut self, id: &CardId, direction: Direction) -> Result<bool> {
        let (current, _) = self.locate(id).ok_or_else(|| not_found(id))?;
        let last = self.columns.len().saturating_sub(1);
        let target = match direction {
            Direction::Left => current.saturating_sub(1),
            Direction::Right => (current + 1).min(last),
            Direction::Up | Direction::Down => return Ok(false),
        };
        if target == current {
            return Ok(false);
        }
        let card = self.take_card(id)?;
        self.columns[target].push(Child::Card(card));
        log::debug!("moved {id} from column {current} to {target}");
        Ok(true)
    }

    /// Keyboard move within the column: swap with the previous or next card.
    /// Spacers are stepped over.
    pub fn move_card_in_column(&mut self, id: &CardId, direction: Direction) -> Result<bool> {
        let (column, index) = self.locate(id).ok_or_else(|| not_found(id))?;
        let children = &mut self.columns[column];
        let is_card = |c: &Child| matches!(c, Child::Card(_));
        match direction {
            Direction::Up => {
                let Some(prev) = children[..index].iter().rposition(is_card) else {
                    return Ok(false);
                };
                let card = children.remove(index);
                children.insert(prev, card);
            },
            Direction::Down => {
                let Some(next) = children[index + 1..]
                    .iter()
                    .position(is_card)
                    .map(|i| i + index + 1)
                else {
                    return Ok(false);
                };
                let other = children.remove(next);
                children.insert(index, other);
            },
            Direction::Left | Direction::Right => return Ok(false),
        }
        Ok(true)
    }

    /// Update the live grid width. At or below the compact breakpoint all
    /// resized heights are reset; returns whether that happened.
    pub fn set_viewport_width(&mut self, width: f32) -> bool {
        self.grid_width = width;
        let compact = width <= self.config.compact_breakpoint;
        if compact {
            for child in self.columns.iter_mut().flatten() {
                if let Child::Card(card) = child {
                    card.explicit_height = None;
                }
            }
        }
        log::debug!("viewport width {width}, compact: {compact}");
        compact
    }

    fn take_card(&mut self, id: &CardId) -> Result<Card> {
        let (column, index) = self.locate(id).ok_or_else(|| not_found(id))?;
        match self.columns[column].remove(index) {
            Child::Card(card) => Ok(card),
            Child::Spacer(_) => Err(not_found(id)),
        }
    }

    fn insert_card(&mut self, column: usize, before: Option<&CardId>, card: Card) {
        let children = &mut self.columns[column];
        let index = before
            .and_then(|b| children.iter().position(|c| c.is_card(b)))
            .unwrap_or(children.len());
        children.insert(index, Child::Card(card));
    }
}

fn not_found(id: &CardId) -> BoardError {
    BoardError::CardNotFound(id.clone())
}

impl GridGeometryProvider for Board {
    fn metrics(&self) -> Option<GridMetrics> {
        GridMetrics::from_grid(
            self.grid_width,
            self.columns.len() as u32,
            self.config.gap,
        )
    }
}

impl ColumnContentProvider for Board {
    fn children_of(&self, column: usize) -> Option<Vec<VisualChild>> {
        self.stack(column)
    }
}

impl LayoutSurface for Board {
    fn placement(&self, card: &CardId) -> Option<CardPlacement> {
        let (column, index) = self.locate(card)?;
        let metrics = self.metrics()?;
        let child = self.stack(column)?.into_iter().nth(index)?;
        let span = self.card(card)?.span;
        Some(CardPlacement {
            column,
            rect: Rect::new(
                metrics.column_x(column),
                child.top,
                compute_width_for_span(span, &metrics),
                child.height,
            ),
            span,
        })
    }

    fn set_span(&mut self, card: &CardId, span: u32) {
        if let Some(card) = self.card_mut(card) {
            card.span = span;
        }
    }

    fn remove_spacers(&mut self, owner: &CardId) -> usize {
        let mut removed = 0;
        for children in &mut self.columns {
            let before = children.len();
            children.retain(|child| !child.is_spacer_for(owner));
            removed += before - children.len();
        }
        removed
    }

    fn insert_spacer(&mut self, column: usize, position: InsertPosition, spacer: Spacer) {
        let Some(children) = self.columns.get_mut(column) else {
            return;
        };
        let index = match position {
            InsertPosition::Before(element) => children
                .iter()
                .position(|child| child.element() == element)
                .unwrap_or(children.len()),
            InsertPosition::End => children.len(),
        };
        children.insert(index, Child::Spacer(spacer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masonry_layout::SpanLayoutEngine;

    /// Default 3x300px grid, 20px gap; column 0 holds card-1 (100) and
    /// card-2 (200); column 1 holds card-3 (150); column 2 holds card-4 (120).
    fn board() -> Board {
        let mut b = Board::new(BoardConfig::default()).unwrap();
        b.add_card(0, "One", 100.0).unwrap();
        b.add_card(0, "Two", 200.0).unwrap();
        b.add_card(1, "Three", 150.0).unwrap();
        b.add_card(2, "Four", 120.0).unwrap();
        b
    }

    fn id(n: u64) -> CardId {
        CardId::numbered(n)
    }

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let mut b = board();
        b.remove_card(&id(4)).unwrap();
        let next = b.add_card(2, "Five", 80.0).unwrap();
        assert_eq!(next, id(5));
    }

    #[test]
    fn add_to_missing_column_errors() {
        let mut b = board();
        let err = b.add_card(7, "x", 10.0).unwrap_err();
        assert!(matches!(err, BoardError::ColumnNotFound(7)));
    }

    #[test]
    fn children_stack_with_gap() {
        let b = board();
        let stack = b.children_of(0).unwrap();
        assert_eq!(stack[0].top, 0.0);
        assert_eq!(stack[1].top, 120.0);
        assert_eq!(stack[1].height, 200.0);
    }

    #[test]
    fn header_offsets_children_and_is_not_reported() {
        let config = BoardConfig {
            header_height: Some(40.0),
            grid_top: 100.0,
            ..BoardConfig::default()
        };
        let mut b = Board::new(config).unwrap();
        b.add_card(0, "One", 50.0).unwrap();
        let stack = b.children_of(0).unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack[0].top, 160.0);
    }

    #[test]
    fn card_rect_uses_span_width() {
        let mut b = board();
        b.set_span(&id(1), 2);
        let rect = b.card_rect(&id(1)).unwrap();
        assert_eq!(rect, Rect::new(0.0, 0.0, 620.0, 100.0));
        assert_eq!(b.card(&id(1)).unwrap().span_class(), "span-2");
    }

    #[test]
    fn metrics_follow_viewport() {
        let mut b = board();
        assert_eq!(b.metrics().unwrap().column_width, 300.0);
        b.set_viewport_width(1240.0);
        assert_eq!(b.metrics().unwrap().column_width, 400.0);
    }

    #[test]
    fn default_card_uses_configured_height() {
        let config = BoardConfig {
            default_card_height: 240.0,
            ..BoardConfig::default()
        };
        let mut b = Board::new(config).unwrap();
        let card = b.add_default_card(1, "Notes").unwrap();
        assert_eq!(b.card(&card).unwrap().content_height, 240.0);
        assert_eq!(b.locate(&card), Some((1, 0)));
    }

    #[test]
    fn column_at_skips_gaps() {
        let b = board();
        assert_eq!(b.column_at(10.0), Some(0));
        assert_eq!(b.column_at(310.0), None);
        assert_eq!(b.column_at(330.0), Some(1));
        assert_eq!(b.column_at(939.0), Some(2));
        assert_eq!(b.column_at(941.0), None);
    }

    #[test]
    fn column_rect_spans_children() {
        let b = board();
        assert_eq!(b.column_rect(0).unwrap(), Rect::new(0.0, 0.0, 300.0, 320.0));
        assert_eq!(b.column_rect(1).unwrap().x, 320.0);
    }

    #[test]
    fn drop_target_uses_midpoints() {
        let b = board();
        // card-1 midpoint 50, card-2 midpoint 220.
        assert_eq!(b.drop_target(0, 10.0, None), Some(id(1)));
        assert_eq!(b.drop_target(0, 60.0, None), Some(id(2)));
        assert_eq!(b.drop_target(0, 400.0, None), None);
        assert_eq!(b.drop_target(0, 10.0, Some(&id(1))), Some(id(2)));
    }

    #[test]
    fn drop_moves_between_columns() {
        let mut b = board();
        b.drop_card(&id(3), 0, 60.0).unwrap();
        assert_eq!(b.column_cards(0).unwrap(), vec![id(1), id(3), id(2)]);
        assert!(b.column_cards(1).unwrap().is_empty());
    }

    #[test]
    fn drop_below_everything_appends() {
        let mut b = board();
        b.drop_card(&id(1), 2, 10_000.0).unwrap();
        assert_eq!(b.column_cards(2).unwrap(), vec![id(4), id(1)]);
    }

    #[test]
    fn drop_into_missing_column_leaves_card() {
        let mut b = board();
        assert!(b.drop_card(&id(1), 9, 0.0).is_err());
        assert_eq!(b.locate(&id(1)), Some((0, 0)));
    }

    #[test]
    fn keyboard_moves_between_columns_clamp_at_edges() {
        let mut b = board();
        assert!(!b.move_card_to_column(&id(1), Direction::Left).unwrap());
        assert!(b.move_card_to_column(&id(1), Direction::Right).unwrap());
        assert_eq!(b.column_cards(1).unwrap(), vec![id(3), id(1)]);
        assert!(!b.move_card_to_column(&id(4), Direction::Right).unwrap());
    }

    #[test]
    fn keyboard_moves_within_column() {
        let mut b = board();
        assert!(b.move_card_in_column(&id(2), Direction::Up).unwrap());
        assert_eq!(b.column_cards(0).unwrap(), vec![id(2), id(1)]);
        assert!(!b.move_card_in_column(&id(2), Direction::Up).unwrap());
        assert!(b.move_card_in_column(&id(2), Direction::Down).unwrap());
        assert_eq!(b.column_cards(0).unwrap(), vec![id(1), id(2)]);
        assert!(!b.move_card_in_column(&id(2), Direction::Down).unwrap());
    }

    #[test]
    fn keyboard_move_steps_over_spacers() {
        let mut b = board();
        b.insert_spacer(
            0,
            InsertPosition::Before(ElementRef::Card(id(2))),
            Spacer {
                owner: id(9),
                height: 30.0,
            },
        );
        assert!(b.move_card_in_column(&id(2), Direction::Up).unwrap());
        assert_eq!(b.column_cards(0).unwrap(), vec![id(2), id(1)]);
    }

    #[test]
    fn compact_viewport_resets_heights() {
        let mut b = board();
        b.set_card_height(&id(1), Some(400.0)).unwrap();
        assert!(!b.set_viewport_width(1024.0));
        assert_eq!(b.card(&id(1)).unwrap().height(), 400.0);
        assert!(b.set_viewport_width(768.0));
        assert_eq!(b.card(&id(1)).unwrap().height(), 100.0);
    }

    #[test]
    fn remove_card_drops_its_spacers() {
        let mut b = board();
        SpanLayoutEngine::default().apply_span(&mut b, &id(1), 3);
        assert_eq!(b.spacers_for(&id(1)).len(), 2);
        b.remove_card(&id(1)).unwrap();
        assert!(b.spacers_for(&id(1)).is_empty());
    }

    // -- Engine on a live board -------------------------------------------

    #[test]
    fn span_three_places_spacers_with_card_height() {
        let mut b = board();
        SpanLayoutEngine::default().apply_span(&mut b, &id(2), 3);
        assert_eq!(b.spacers_for(&id(2)), vec![(1, 200.0), (2, 200.0)]);
    }

    #[test]
    fn spacer_aligns_with_card_top() {
        let mut b = board();
        // card-2 sits at top 120; column 1 has card-3 at 0..150, so the
        // spacer goes after it.
        SpanLayoutEngine::default().apply_span(&mut b, &id(2), 2);
        let stack = b.children_of(1).unwrap();
        assert_eq!(stack[0].element, ElementRef::Card(id(3)));
        assert_eq!(stack[1].element, ElementRef::Spacer(id(2)));
        assert_eq!(stack[1].top, 170.0);
    }

    #[test]
    fn spacer_pushes_lower_siblings_down() {
        let mut b = board();
        SpanLayoutEngine::default().apply_span(&mut b, &id(1), 2);
        let stack = b.children_of(1).unwrap();
        assert_eq!(stack[0].element, ElementRef::Spacer(id(1)));
        assert_eq!(stack[1].top, 120.0);
    }

    #[test]
    fn resize_on_live_board() {
        let mut b = board();
        let change = SpanLayoutEngine::default()
            .resize_to_width(&mut b, &id(1), 650.0)
            .unwrap();
        assert_eq!(change.span, 2);
        assert_eq!(change.width, 620.0);
        assert_eq!(b.card_rect(&id(1)).unwrap().width, 620.0);
    }

    #[test]
    fn repeated_refresh_is_stable() {
        let mut b = board();
        let engine = SpanLayoutEngine::default();
        engine.apply_span(&mut b, &id(1), 3);
        let first: Vec<_> = (0..3).map(|c| b.children_of(c)).collect();
        engine.refresh_spacers(&mut b, &id(1), 3);
        let second: Vec<_> = (0..3).map(|c| b.children_of(c)).collect();
        assert_eq!(first, second);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn spacer_count_matches_clamped_span(
                host in 0usize..3,
                requested in 0u32..6,
                repeats in 1usize..4,
            ) {
                let mut b = Board::new(BoardConfig::default()).unwrap();
                let card = b.add_card(host, "c", 100.0).unwrap();
                let engine = SpanLayoutEngine::default();
                for _ in 0..repeats {
                    engine.request_span(&mut b, &card, requested);
                }
                let span = b.card(&card).unwrap().span;
                prop_assert!(host + span as usize <= 3);
                prop_assert_eq!(b.spacers_for(&card).len(), span as usize - 1);
            }
        }
    }
}
