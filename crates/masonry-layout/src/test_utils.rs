//! Shared test utilities for masonry-layout tests.
//!
//! Provides a [`MockSurface`] with hand-placed children that records every
//! mutation the engine makes, for assertion.

use masonry_types::{CardId, Rect};

use crate::metrics::{GridGeometryProvider, GridMetrics};
use crate::surface::{
    CardPlacement, ColumnContentProvider, ElementRef, InsertPosition, LayoutSurface, Spacer,
    VisualChild,
};

/// A recorded mutation.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum SurfaceCall {
    SetSpan {
        card: CardId,
        span: u32,
    },
    RemoveSpacers {
        owner: CardId,
        removed: usize,
    },
    InsertSpacer {
        column: usize,
        position: InsertPosition,
        owner: CardId,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct MockChild {
    element: ElementRef,
    top: f32,
    height: f32,
    span: u32,
}

/// A surface whose children keep the tops they were given. Inserting a
/// spacer does not push later children down.
pub struct MockSurface {
    column_width: f32,
    gap: f32,
    column_count: u32,
    /// `None` marks a column that is missing from the rendered grid.
    columns: Vec<Option<Vec<MockChild>>>,
    pub calls: Vec<SurfaceCall>,
}

impl MockSurface {
    pub fn new(column_width: f32, gap: f32, column_count: u32) -> Self {
        Self {
            column_width,
            gap,
            column_count,
            columns: (0..column_count).map(|_| Some(Vec::new())).collect(),
            calls: Vec::new(),
        }
    }

    /// Append a span-1 card to `column` at a fixed top.
    pub fn add_card(&mut self, column: usize, id: &str, top: f32, height: f32) {
        if let Some(Some(children)) = self.columns.get_mut(column) {
            children.push(MockChild {
                element: ElementRef::Card(CardId::new(id)),
                top,
                height,
                span: 1,
            });
        }
    }

    /// Move a card (keeping its span) to the end of another column.
    pub fn move_card(&mut self, id: &str, column: usize, top: f32) {
        let target = ElementRef::Card(CardId::new(id));
        let mut moved = None;
        for children in self.columns.iter_mut().flatten() {
            if let Some(i) = children.iter().position(|c| c.element == target) {
                moved = Some(children.remove(i));
            }
        }
        if let (Some(mut child), Some(Some(children))) = (moved, self.columns.get_mut(column)) {
            child.top = top;
            children.push(child);
        }
    }

    /// Simulate a column absent from the rendered grid.
    pub fn drop_column(&mut self, column: usize) {
        if let Some(slot) = self.columns.get_mut(column) {
            *slot = None;
        }
    }

    pub fn span_of(&self, id: &str) -> Option<u32> {
        let target = ElementRef::Card(CardId::new(id));
        self.columns
            .iter()
            .flatten()
            .flatten()
            .find(|c| c.element == target)
            .map(|c| c.span)
    }

    /// Spacers owned by `id`, with their column index.
    pub fn spacers_of(&self, id: &str) -> Vec<(usize, Spacer)> {
        let target = ElementRef::Spacer(CardId::new(id));
        let mut out = Vec::new();
        for (col, children) in self.columns.iter().enumerate() {
            for child in children.iter().flatten() {
                if child.element == target {
                    out.push((
                        col,
                        Spacer {
                            owner: CardId::new(id),
                            height: child.height,
                        },
                    ));
                }
            }
        }
        out
    }

    pub fn spacer_columns(&self, id: &str) -> Vec<usize> {
        self.spacers_of(id).into_iter().map(|(col, _)| col).collect()
    }

    pub fn column_elements(&self, column: usize) -> Vec<ElementRef> {
        self.columns
            .get(column)
            .and_then(Option::as_ref)
            .map(|children| children.iter().map(|c| c.element.clone()).collect())
            .unwrap_or_default()
    }

    /// Comparable copy of every column's contents.
    pub fn snapshot(&self) -> Vec<Option<Vec<(ElementRef, f32, f32, u32)>>> {
        self.columns
            .iter()
            .map(|col| {
                col.as_ref().map(|children| {
                    children
                        .iter()
                        .map(|c| (c.element.clone(), c.top, c.height, c.span))
                        .collect()
                })
            })
            .collect()
    }

    fn find_card(&self, card: &CardId) -> Option<(usize, &MockChild)> {
        let target = ElementRef::Card(card.clone());
        self.columns.iter().enumerate().find_map(|(col, children)| {
            children
                .as_ref()?
                .iter()
                .find(|c| c.element == target)
                .map(|c| (col, c))
        })
    }
}

impl GridGeometryProvider for MockSurface {
    fn metrics(&self) -> Option<GridMetrics> {
        Some(GridMetrics {
            gap: self.gap,
            column_count: self.column_count,
            column_width: self.column_width,
        })
    }
}

impl ColumnContentProvider for MockSurface {
    fn children_of(&self, column: usize) -> Option<Vec<VisualChild>> {
        let children = self.columns.get(column)?.as_ref()?;
        Some(
            children
                .iter()
                .map(|c| VisualChild {
                    element: c.element.clone(),
                    top: c.top,
                    height: c.height,
                })
                .collect(),
        )
    }
}

impl LayoutSurface for MockSurface {
    fn placement(&self, card: &CardId) -> Option<CardPlacement> {
        let (column, child) = self.find_card(card)?;
        let span = child.span;
        Some(CardPlacement {
            column,
            rect: Rect::new(
                column as f32 * (self.column_width + self.gap),
                child.top,
                self.column_width * span as f32 + self.gap * span.saturating_sub(1) as f32,
                child.height,
            ),
            span,
        })
    }

    fn set_span(&mut self, card: &CardId, span: u32) {
        let target = ElementRef::Card(card.clone());
        for child in self.columns.iter_mut().flatten().flatten() {
            if child.element == target {
                child.span = span;
            }
        }
        self.calls.push(SurfaceCall::SetSpan {
            card: card.clone(),
            span,
        });
    }

    fn remove_spacers(&mut self, owner: &CardId) -> usize {
        let target = ElementRef::Spacer(owner.clone());
        let mut removed = 0;
        for children in self.columns.iter_mut().flatten() {
            let before = children.len();
            children.retain(|c| c.element != target);
            removed += before - children.len();
        }
        self.calls.push(SurfaceCall::RemoveSpacers {
            owner: owner.clone(),
            removed,
        });
        removed
    }

    fn insert_spacer(&mut self, column: usize, position: InsertPosition, spacer: Spacer) {
        self.calls.push(SurfaceCall::InsertSpacer {
            column,
            position: position.clone(),
            owner: spacer.owner.clone(),
        });
        let Some(Some(children)) = self.columns.get_mut(column) else {
            return;
        };
        let index = match &position {
            InsertPosition::Before(element) => children
                .iter()
                .position(|c| &c.element == element)
                .unwrap_or(children.len()),
            InsertPosition::End => children.len(),
        };
        let top = children
            .get(index)
            .map(|c| c.top)
            .or_else(|| children.last().map(|c| c.top + c.height + self.gap))
            .unwrap_or(0.0);
        children.insert(
            index,
            MockChild {
                element: ElementRef::Spacer(spacer.owner),
                top,
                height: spacer.height,
                span: 1,
            },
        );
    }
}
