//! masonry-board: the in-memory card board.
//!
//! [`Board`] owns the columns, cards and spacers and computes their live
//! geometry on demand, so it can serve as the span engine's
//! [`LayoutSurface`](masonry_layout::LayoutSurface). [`InteractionSession`]
//! holds the one in-flight gesture (drag or resize) and turns input events
//! into board mutations and engine calls.

pub mod board;
pub mod interaction;

pub use board::{Board, Card};
pub use interaction::{Gesture, InteractionSession, Outcome};
