//! Foundation types for the masonry board.
//!
//! This crate holds the platform-agnostic types shared by every masonry
//! crate: card identifiers, rectangles, input events, board configuration,
//! and the error type.

pub mod config;
pub mod error;
pub mod geometry;
pub mod id;
pub mod input;

pub use config::BoardConfig;
pub use error::{BoardError, Result};
pub use geometry::Rect;
pub use id::CardId;
