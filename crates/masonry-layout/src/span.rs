//! Span arithmetic: snapping a pixel width to a column span, clamping a span
//! to the columns available right of the host, and the exact width of a span.

use crate::metrics::GridMetrics;

/// Fraction of a column a width must reach past a span boundary before it
/// snaps to the next span.
pub const SNAP_FRACTION: f32 = 0.5;

/// Snap a desired pixel width to a column span.
///
/// The span grows from `n` to `n + 1` once the width passes the midpoint of
/// column `n + 1`, i.e. exceeds `n * (column_width + gap) + column_width / 2`.
/// Thresholds are checked from the widest span down; the first one exceeded
/// wins. The result lies in `1..=column_count`.
pub fn compute_span_from_width(desired_width: f32, metrics: &GridMetrics) -> u32 {
    snap_span(desired_width, metrics, metrics.column_count)
}

/// Like [`compute_span_from_width`] but never snapping past `max_span`.
pub fn snap_span(desired_width: f32, metrics: &GridMetrics, max_span: u32) -> u32 {
    let top = max_span.min(metrics.column_count);
    (2..=top)
        .rev()
        .find(|&span| desired_width > snap_threshold(span, metrics))
        .unwrap_or(1)
}

/// Width a card must exceed to snap to `span`.
pub fn snap_threshold(span: u32, metrics: &GridMetrics) -> f32 {
    span.saturating_sub(1) as f32 * (metrics.column_width + metrics.gap)
        + SNAP_FRACTION * metrics.column_width
}

/// Clamp a requested span so the card never extends past the last column.
///
/// Clamping only shrinks to the right; a card is never re-anchored to
/// another host column to fit a larger span. Always at least 1.
pub fn clamp_span_to_available_columns(
    host_column: usize,
    requested_span: u32,
    column_count: u32,
) -> u32 {
    let available = (column_count as usize).saturating_sub(host_column);
    let available = u32::try_from(available).unwrap_or(u32::MAX);
    requested_span.min(available).max(1)
}

/// Exact pixel width of `span` contiguous columns, including the gaps
/// between them but no outer gap.
pub fn compute_width_for_span(span: u32, metrics: &GridMetrics) -> f32 {
    metrics.column_width * span as f32 + metrics.gap * span.saturating_sub(1) as f32
}
