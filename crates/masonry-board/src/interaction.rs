//! Interaction session: the one gesture in flight.
//!
//! Drag and resize state lives here rather than in the engine. Each
//! [`BoardInput`] is applied synchronously to the board; failures on stale
//! targets (a card removed mid-gesture, a column that does not exist) are
//! logged at debug level and reported as [`Outcome::Ignored`].

use masonry_layout::{LayoutSurface, SpanChange, SpanLayoutEngine};
use masonry_types::input::{BoardInput, Direction};
use masonry_types::{CardId, Result};

use crate::board::Board;

/// The gesture currently in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        card: CardId,
        from_column: usize,
    },
    Resizing {
        card: CardId,
        start_x: f32,
        start_y: f32,
        start_width: f32,
        start_height: f32,
    },
}

/// Where a drop would land, for the drop indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct DropIndicator {
    pub column: usize,
    /// Card the dragged card would be inserted before; `None` appends.
    pub before: Option<CardId>,
}

/// What handling an input did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing changed.
    Ignored,
    DragStarted {
        card: CardId,
    },
    /// The drop indicator moved.
    Indicator(DropIndicator),
    /// The drop indicator was hidden.
    IndicatorCleared,
    /// A card moved to another position or column.
    Moved {
        card: CardId,
        column: usize,
        span: Option<SpanChange>,
    },
    DragEnded,
    ResizeStarted {
        card: CardId,
    },
    /// A resize step applied a new size.
    Resized {
        card: CardId,
        width: f32,
        height: f32,
        span: Option<SpanChange>,
    },
    ResizeEnded {
        card: CardId,
    },
    /// An explicit span request was applied.
    Spanned {
        card: CardId,
        span: SpanChange,
    },
    /// The viewport changed; `compact` reports a size reset.
    Reflowed {
        compact: bool,
    },
}

/// Owns gesture state and routes input to the board and engine.
#[derive(Debug, Clone, Default)]
pub struct InteractionSession {
    gesture: Gesture,
    indicator: Option<DropIndicator>,
}

impl InteractionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn indicator(&self) -> Option<&DropIndicator> {
        self.indicator.as_ref()
    }

    /// Apply one input event.
    pub fn handle(
        &mut self,
        board: &mut Board,
        engine: &SpanLayoutEngine,
        input: BoardInput,
    ) -> Outcome {
        let result = match input {
            BoardInput::DragStart { card } => Ok(self.drag_start(board, card)),
            BoardInput::DragOver { column, y } => Ok(self.drag_over(board, column, y)),
            BoardInput::DragLeave { column } => Ok(self.drag_leave(column)),
            BoardInput::Drop { column, y } => self.drop(board, engine, column, y),
            BoardInput::DropAt { x, y } => match board.column_at(x) {
                Some(column) => self.drop(board, engine, column, y),
                None => Ok(Outcome::Ignored),
            },
            BoardInput::DragEnd => Ok(self.drag_end()),
            BoardInput::ResizeStart { card, x, y } => Ok(self.resize_start(board, card, x, y)),
            BoardInput::ResizeMove { x, y } => self.resize_move(board, engine, x, y),
            BoardInput::ResizeEnd => Ok(self.resize_end()),
            BoardInput::SpanRequest { card, span } => Ok(engine
                .request_span(board, &card, span)
                .map_or(Outcome::Ignored, |span| Outcome::Spanned { card, span })),
            BoardInput::Key { card, direction } => self.key(board, engine, card, direction),
            BoardInput::ViewportResize { width } => Ok(self.viewport(board, engine, width)),
        };
        result.unwrap_or_else(|e| {
            log::debug!("input ignored: {e}");
            Outcome::Ignored
        })
    }

    // -- Drag and drop ------------------------------------------------------

    fn drag_start(&mut self, board: &Board, card: CardId) -> Outcome {
        let Some((from_column, _)) = board.locate(&card) else {
            return Outcome::Ignored;
        };
        log::debug!("drag started: {card}");
        self.gesture = Gesture::Dragging {
            card: card.clone(),
            from_column,
        };
        Outcome::DragStarted { card }
    }

    fn dragged(&self) -> Option<&CardId> {
        match &self.gesture {
            Gesture::Dragging { card, .. } => Some(card),
            _ => None,
        }
    }

    fn drag_over(&mut self, board: &Board, column: usize, y: f32) -> Outcome {
        let Some(card) = self.dragged() else {
            return Outcome::Ignored;
        };
        if column >= board.column_count() {
            return Outcome::Ignored;
        }
        let indicator = DropIndicator {
            column,
            before: board.drop_target(column, y, Some(card)),
        };
        self.indicator = Some(indicator.clone());
        Outcome::Indicator(indicator)
    }

    fn drag_leave(&mut self, column: usize) -> Outcome {
        match &self.indicator {
            Some(ind) if ind.column == column => {
                self.indicator = None;
                Outcome::IndicatorCleared
            },
            _ => Outcome::Ignored,
        }
    }

    fn drop(
        &mut self,
        board: &mut Board,
        engine: &SpanLayoutEngine,
        column: usize,
        y: f32,
    ) -> Result<Outcome> {
        let Some(card) = self.dragged().cloned() else {
            return Ok(Outcome::Ignored);
        };
        self.indicator = None;
        board.drop_card(&card, column, y)?;
        let span = engine.reflow(board, &card);
        log::debug!("card {card} dropped in column {column}");
        Ok(Outcome::Moved { card, column, span })
    }

    fn drag_end(&mut self) -> Outcome {
        if !matches!(self.gesture, Gesture::Dragging { .. }) {
            return Outcome::Ignored;
        }
        self.gesture = Gesture::Idle;
        self.indicator = None;
        log::debug!("drag ended");
        Outcome::DragEnded
    }

    // -- Resize -------------------------------------------------------------

    fn resize_start(&mut self, board: &Board, card: CardId, x: f32, y: f32) -> Outcome {
        let Some(rect) = board.card_rect(&card) else {
            return Outcome::Ignored;
        };
        log::debug!("resize started for {card}");
        self.gesture = Gesture::Resizing {
            card: card.clone(),
            start_x: x,
            start_y: y,
            start_width: rect.width,
            start_height: rect.height,
        };
        Outcome::ResizeStarted { card }
    }

    fn resize_move(
        &mut self,
        board: &mut Board,
        engine: &SpanLayoutEngine,
        x: f32,
        y: f32,
    ) -> Result<Outcome> {
        let Gesture::Resizing {
            card,
            start_x,
            start_y,
            start_width,
            start_height,
        } = &self.gesture
        else {
            return Ok(Outcome::Ignored);
        };
        let config = board.config();
        let width = (start_width + x - start_x).max(config.min_card_width);
        let height = (start_height + y - start_y).max(config.min_card_height);
        let card = card.clone();
        board.set_card_height(&card, Some(height))?;
        let span = engine.resize_to_width(board, &card, width);
        Ok(Outcome::Resized {
            card,
            width,
            height,
            span,
        })
    }

    fn resize_end(&mut self) -> Outcome {
        if !matches!(self.gesture, Gesture::Resizing { .. }) {
            return Outcome::Ignored;
        }
        let Gesture::Resizing { card, .. } = std::mem::take(&mut self.gesture) else {
            return Outcome::Ignored;
        };
        log::debug!("resize ended for {card}");
        Outcome::ResizeEnded { card }
    }

    // -- Keyboard and viewport ---------------------------------------------

    fn key(
        &mut self,
        board: &mut Board,
        engine: &SpanLayoutEngine,
        card: CardId,
        direction: Direction,
    ) -> Result<Outcome> {
        let moved = if direction.is_horizontal() {
            board.move_card_to_column(&card, direction)?
        } else {
            board.move_card_in_column(&card, direction)?
        };
        if !moved {
            return Ok(Outcome::Ignored);
        }
        let span = engine.reflow(board, &card);
        let column = board.locate(&card).map_or(0, |(col, _)| col);
        Ok(Outcome::Moved { card, column, span })
    }

    fn viewport(&mut self, board: &mut Board, engine: &SpanLayoutEngine, width: f32) -> Outcome {
        let compact = board.set_viewport_width(width);
        for card in board.card_ids() {
            let spanning = board.placement(&card).is_some_and(|p| p.span > 1);
            if spanning {
                engine.reflow(board, &card);
            }
        }
        Outcome::Reflowed { compact }
    }
}
