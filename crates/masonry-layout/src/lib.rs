//! masonry-layout: column-span computation and spacer placement.
//!
//! A card in the masonry grid physically lives in one column. When it is
//! widened past the midpoint of the next column it snaps to a larger span,
//! and invisible spacers are placed in the columns it overlaps so their
//! contents flow around it. The engine reads live geometry through the
//! provider traits in [`surface`] and holds no gesture state of its own.

pub mod engine;
pub mod metrics;
pub mod span;
pub mod surface;

#[cfg(test)]
pub(crate) mod test_utils;

pub use engine::{SpanChange, SpanLayoutEngine};
pub use metrics::{GridGeometryProvider, GridMetrics};
pub use span::{
    clamp_span_to_available_columns, compute_span_from_width, compute_width_for_span,
};
pub use surface::{
    CardPlacement, ColumnContentProvider, ElementRef, InsertPosition, LayoutSurface, Spacer,
    VisualChild,
};
