//! Card identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a card, e.g. `card-3`.
///
/// Spacers are tagged with the id of the card that owns them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id for the `n`-th card created by a board (`card-<n>`).
    pub fn numbered(n: u64) -> Self {
        Self(format!("card-{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
