//! Platform-agnostic board input events.
//!
//! Whatever delivers pointer, drag, touch or keyboard input maps it to these
//! events. The layout engine never listens for input itself; the board's
//! interaction session consumes them.

use serde::{Deserialize, Serialize};

use crate::id::CardId;

/// A board input event.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardInput {
    /// A card was picked up for dragging (mouse drag or touch start).
    DragStart { card: CardId },
    /// The dragged card hovers over a column at document-relative `y`.
    DragOver { column: usize, y: f32 },
    /// The pointer left a column while dragging.
    DragLeave { column: usize },
    /// The dragged card was released over a column at `y`.
    Drop { column: usize, y: f32 },
    /// The dragged card was released at a grid-relative point, as a touch
    /// end reports it. The column is the one under `x`.
    DropAt { x: f32, y: f32 },
    /// The drag gesture finished (after a drop, or cancelled).
    DragEnd,
    /// Pointer pressed on a card's resize handle.
    ResizeStart { card: CardId, x: f32, y: f32 },
    /// Pointer moved while resizing.
    ResizeMove { x: f32, y: f32 },
    /// Pointer released; the last applied snap is kept.
    ResizeEnd,
    /// The span control of a card requested an explicit span.
    SpanRequest { card: CardId, span: u32 },
    /// Arrow key pressed while a card has keyboard focus.
    Key { card: CardId, direction: Direction },
    /// The viewport changed width.
    ViewportResize { width: f32 },
}

/// Arrow directions for keyboard movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// True for moves between columns.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}
