//! The engine's view of the board.
//!
//! The rendering surface is injected through these traits so the engine can
//! run against the in-memory board, a live document, or a test mock.

use masonry_types::{CardId, Rect};

use crate::metrics::GridGeometryProvider;

/// A visual child of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementRef {
    /// A card physically hosted by the column.
    Card(CardId),
    /// A spacer reserving room for the given spanning card.
    Spacer(CardId),
}

impl ElementRef {
    /// The card this element belongs to.
    pub fn card_id(&self) -> &CardId {
        match self {
            Self::Card(id) | Self::Spacer(id) => id,
        }
    }
}

/// A column child with its rendered vertical extent.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualChild {
    pub element: ElementRef,
    /// Document-relative top offset.
    pub top: f32,
    pub height: f32,
}

/// Where a card currently sits and how wide it spans.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPlacement {
    /// Index of the column hosting the card.
    pub column: usize,
    /// Rendered bounding box.
    pub rect: Rect,
    /// Stored span.
    pub span: u32,
}

/// An invisible placeholder tagged with its owning card.
#[derive(Debug, Clone, PartialEq)]
pub struct Spacer {
    pub owner: CardId,
    pub height: f32,
}

/// Where to put a new spacer within a column.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertPosition {
    /// Immediately before an existing child.
    Before(ElementRef),
    /// After the last child.
    End,
}

/// Ordered visual children of each column.
pub trait ColumnContentProvider {
    /// Children of column `column` in visual order, structural headers
    /// excluded. `None` if the column does not exist.
    fn children_of(&self, column: usize) -> Option<Vec<VisualChild>>;
}

/// A mutable board the engine can lay spans out on.
///
/// Mutations on absent targets are ignored.
pub trait LayoutSurface: GridGeometryProvider + ColumnContentProvider {
    /// Current placement of a card, or `None` if it is not on the board.
    fn placement(&self, card: &CardId) -> Option<CardPlacement>;

    /// Store a card's span and update its visual span class.
    fn set_span(&mut self, card: &CardId, span: u32);

    /// Remove every spacer owned by `owner`, returning how many were removed.
    fn remove_spacers(&mut self, owner: &CardId) -> usize;

    /// Insert a spacer into `column` at `position`.
    fn insert_spacer(&mut self, column: usize, position: InsertPosition, spacer: Spacer);
}
