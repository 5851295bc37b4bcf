//! Span layout engine.
//!
//! Turns a resize width or an explicit span request into a stored span and a
//! matching set of spacers. Every call is a full recomputation from the
//! surface's live geometry: spacers for a card are always removed before new
//! ones are inserted, so repeating a call changes nothing. Missing cards or
//! columns make the call a silent no-op.

use masonry_types::{BoardConfig, CardId};

use crate::span::{clamp_span_to_available_columns, compute_width_for_span, snap_span};
use crate::surface::{CardPlacement, InsertPosition, LayoutSurface, Spacer};

/// Result of applying a span to a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanChange {
    pub span: u32,
    /// Exact pixel width of the applied span.
    pub width: f32,
}

/// Computes spans and maintains spacers on a [`LayoutSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanLayoutEngine {
    /// Widest span a resize gesture may snap to.
    pub max_span: u32,
}

impl Default for SpanLayoutEngine {
    fn default() -> Self {
        Self { max_span: 3 }
    }
}

impl From<&BoardConfig> for SpanLayoutEngine {
    fn from(config: &BoardConfig) -> Self {
        Self::new(config.max_span)
    }
}

impl SpanLayoutEngine {
    pub fn new(max_span: u32) -> Self {
        Self {
            max_span: max_span.max(1),
        }
    }

    /// Snap a resize gesture's width to a span, clamp it to the columns right
    /// of the card's host, and apply it.
    pub fn resize_to_width<S: LayoutSurface + ?Sized>(
        &self,
        surface: &mut S,
        card: &CardId,
        desired_width: f32,
    ) -> Option<SpanChange> {
        let metrics = surface.metrics()?;
        let Some(placement) = surface.placement(card) else {
            log::debug!("resize: card {card} not on board");
            return None;
        };
        let snapped = snap_span(desired_width, &metrics, self.max_span);
        let span = clamp_span_to_available_columns(placement.column, snapped, metrics.column_count);
        log::debug!(
            "resize {card}: {desired_width:.1}px -> span {snapped} (clamped {span}) in column {}",
            placement.column
        );
        self.apply_span(surface, card, span);
        Some(SpanChange {
            span,
            width: compute_width_for_span(span, &metrics),
        })
    }

    /// Apply an explicit span request, clamped to the available columns.
    pub fn request_span<S: LayoutSurface + ?Sized>(
        &self,
        surface: &mut S,
        card: &CardId,
        requested: u32,
    ) -> Option<SpanChange> {
        let metrics = surface.metrics()?;
        let placement = surface.placement(card)?;
        let span =
            clamp_span_to_available_columns(placement.column, requested, metrics.column_count);
        self.apply_span(surface, card, span);
        Some(SpanChange {
            span,
            width: compute_width_for_span(span, &metrics),
        })
    }

    /// Re-clamp a card's stored span against its current host column and
    /// re-apply it. Used after a card lands in a new column or the grid
    /// changes shape.
    pub fn reflow<S: LayoutSurface + ?Sized>(
        &self,
        surface: &mut S,
        card: &CardId,
    ) -> Option<SpanChange> {
        let placement = surface.placement(card)?;
        self.request_span(surface, card, placement.span)
    }

    /// Store `span` on the card and rebuild its spacers.
    pub fn apply_span<S: LayoutSurface + ?Sized>(&self, surface: &mut S, card: &CardId, span: u32) {
        if surface.placement(card).is_none() {
            log::debug!("apply_span: card {card} not on board");
            return;
        }
        surface.set_span(card, span);
        self.refresh_spacers(surface, card, span);
    }

    /// Rebuild the spacers of a card spanning `span` columns.
    ///
    /// Old spacers are removed unconditionally. For each extra column the
    /// card overlaps, one spacer of the card's rendered height is inserted
    /// before the first child whose top is at or below the card's top, or
    /// appended when there is none.
    pub fn refresh_spacers<S: LayoutSurface + ?Sized>(
        &self,
        surface: &mut S,
        card: &CardId,
        span: u32,
    ) {
        let removed = surface.remove_spacers(card);
        if removed > 0 {
            log::debug!("removed {removed} spacer(s) for {card}");
        }
        if span <= 1 {
            return;
        }
        let Some(placement) = surface.placement(card) else {
            return;
        };
        for offset in 1..span as usize {
            let column = placement.column + offset;
            let Some(position) = spacer_position(surface, column, &placement) else {
                log::debug!("spacer for {card}: column {column} missing, skipped");
                continue;
            };
            surface.insert_spacer(
                column,
                position,
                Spacer {
                    owner: card.clone(),
                    height: placement.rect.height,
                },
            );
        }
    }
}

/// Insertion point aligning a spacer with the card's top in `column`.
fn spacer_position<S: LayoutSurface + ?Sized>(
    surface: &S,
    column: usize,
    placement: &CardPlacement,
) -> Option<InsertPosition> {
    let children = surface.children_of(column)?;
    let card_top = placement.rect.top();
    Some(
        children
            .into_iter()
            .find(|child| child.top >= card_top)
            .map_or(InsertPosition::End, |child| {
                InsertPosition::Before(child.element)
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ElementRef;
    use crate::test_utils::{MockSurface, SurfaceCall};

    fn id(s: &str) -> CardId {
        CardId::new(s)
    }

    /// Three 300px columns with 20px gaps; `card-a` at the top of column 0.
    fn surface() -> MockSurface {
        let mut s = MockSurface::new(300.0, 20.0, 3);
        s.add_card(0, "card-a", 0.0, 180.0);
        s.add_card(1, "card-b", 0.0, 100.0);
        s.add_card(1, "card-c", 120.0, 100.0);
        s.add_card(2, "card-d", 0.0, 250.0);
        s
    }

    #[test]
    fn engine_from_config_caps_resize_snap() {
        let config = BoardConfig {
            max_span: 2,
            ..BoardConfig::default()
        };
        let engine = SpanLayoutEngine::from(&config);
        assert_eq!(engine.max_span, 2);
        let mut s = surface();
        let change = engine.resize_to_width(&mut s, &id("card-a"), 2000.0).unwrap();
        assert_eq!(change.span, 2);
        assert_eq!(s.spacer_columns("card-a"), vec![1]);
    }

    #[test]
    fn resize_650_in_column_zero_snaps_to_two() {
        let mut s = surface();
        let engine = SpanLayoutEngine::default();
        let change = engine.resize_to_width(&mut s, &id("card-a"), 650.0).unwrap();
        assert_eq!(change, SpanChange { span: 2, width: 620.0 });
        assert_eq!(s.span_of("card-a"), Some(2));
        assert_eq!(s.spacer_columns("card-a"), vec![1]);
    }

    #[test]
    fn request_three_from_last_column_clamps_to_one() {
        let mut s = surface();
        let engine = SpanLayoutEngine::default();
        let change = engine.request_span(&mut s, &id("card-d"), 3).unwrap();
        assert_eq!(change.span, 1);
        assert_eq!(change.width, 300.0);
        assert!(s.spacer_columns("card-d").is_empty());
    }

    #[test]
    fn span_three_from_column_zero_places_two_spacers() {
        let mut s = surface();
        let engine = SpanLayoutEngine::default();
        engine.apply_span(&mut s, &id("card-a"), 3);
        assert_eq!(s.spacer_columns("card-a"), vec![1, 2]);
        for (_, spacer) in s.spacers_of("card-a") {
            assert_eq!(spacer.height, 180.0);
        }
    }

    #[test]
    fn spacer_goes_before_first_child_at_or_below_card_top() {
        let mut s = MockSurface::new(300.0, 20.0, 3);
        s.add_card(0, "card-a", 120.0, 100.0);
        s.add_card(1, "card-b", 0.0, 100.0);
        s.add_card(1, "card-c", 120.0, 100.0);
        SpanLayoutEngine::default().apply_span(&mut s, &id("card-a"), 2);
        let order: Vec<ElementRef> = s.column_elements(1);
        assert_eq!(
            order,
            vec![
                ElementRef::Card(id("card-b")),
                ElementRef::Spacer(id("card-a")),
                ElementRef::Card(id("card-c")),
            ]
        );
    }

    #[test]
    fn spacer_appended_when_nothing_below() {
        let mut s = MockSurface::new(300.0, 20.0, 3);
        s.add_card(0, "card-a", 500.0, 100.0);
        s.add_card(1, "card-b", 0.0, 100.0);
        SpanLayoutEngine::default().apply_span(&mut s, &id("card-a"), 2);
        assert_eq!(
            s.column_elements(1).last(),
            Some(&ElementRef::Spacer(id("card-a")))
        );
    }

    #[test]
    fn refresh_is_idempotent() {
        let mut s = surface();
        let engine = SpanLayoutEngine::default();
        engine.refresh_spacers(&mut s, &id("card-a"), 3);
        let once = s.snapshot();
        engine.refresh_spacers(&mut s, &id("card-a"), 3);
        assert_eq!(s.snapshot(), once);
    }

    #[test]
    fn span_one_removes_all_spacers() {
        let mut s = surface();
        let engine = SpanLayoutEngine::default();
        engine.apply_span(&mut s, &id("card-a"), 3);
        engine.apply_span(&mut s, &id("card-a"), 1);
        assert!(s.spacers_of("card-a").is_empty());
        assert_eq!(s.span_of("card-a"), Some(1));
    }

    #[test]
    fn removal_happens_before_insertion() {
        let mut s = surface();
        let engine = SpanLayoutEngine::default();
        engine.apply_span(&mut s, &id("card-a"), 3);
        s.calls.clear();
        engine.refresh_spacers(&mut s, &id("card-a"), 2);
        assert!(matches!(s.calls[0], SurfaceCall::RemoveSpacers { .. }));
        assert_eq!(
            s.calls
                .iter()
                .filter(|c| matches!(c, SurfaceCall::InsertSpacer { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn missing_card_is_silent_noop() {
        let mut s = surface();
        let engine = SpanLayoutEngine::default();
        let before = s.snapshot();
        assert!(engine.resize_to_width(&mut s, &id("card-zz"), 900.0).is_none());
        assert!(engine.request_span(&mut s, &id("card-zz"), 2).is_none());
        engine.apply_span(&mut s, &id("card-zz"), 2);
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn missing_column_is_skipped() {
        let mut s = surface();
        s.drop_column(2);
        SpanLayoutEngine::default().apply_span(&mut s, &id("card-a"), 3);
        assert_eq!(s.spacer_columns("card-a"), vec![1]);
    }

    #[test]
    fn max_span_limits_resize() {
        let mut s = surface();
        let engine = SpanLayoutEngine::new(2);
        let change = engine.resize_to_width(&mut s, &id("card-a"), 2_000.0).unwrap();
        assert_eq!(change.span, 2);
    }

    #[test]
    fn reflow_clamps_after_move() {
        let mut s = surface();
        let engine = SpanLayoutEngine::default();
        engine.apply_span(&mut s, &id("card-a"), 3);
        s.move_card("card-a", 1, 0.0);
        let change = engine.reflow(&mut s, &id("card-a")).unwrap();
        assert_eq!(change.span, 2);
        assert_eq!(s.spacer_columns("card-a"), vec![2]);
    }

    #[test]
    fn narrow_resize_after_span_shrinks_back() {
        let mut s = surface();
        let engine = SpanLayoutEngine::default();
        engine.resize_to_width(&mut s, &id("card-a"), 900.0);
        assert_eq!(s.span_of("card-a"), Some(3));
        engine.resize_to_width(&mut s, &id("card-a"), 320.0);
        assert_eq!(s.span_of("card-a"), Some(1));
        assert!(s.spacers_of("card-a").is_empty());
    }
}
