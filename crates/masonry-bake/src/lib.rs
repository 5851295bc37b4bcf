//! Static bake for the masonry board page.
//!
//! Reads a markdown content plan, renders each card's body, and splices
//! titles, spans and bodies into the page HTML through a span-preserving
//! document model.

pub mod bake;
pub mod config;
pub mod html;
pub mod markdown;
pub mod plan;

pub use bake::{BakeOutcome, bake_dir, bake_files, update_page};
pub use config::BakeConfig;
pub use plan::{CardPlan, ContentPlan};
