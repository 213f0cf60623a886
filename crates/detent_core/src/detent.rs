//! Sheet detents

use serde::{Deserialize, Serialize};

/// A named, discrete resting height of the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Detent {
    /// Partially presented (half height by default)
    #[default]
    Medium,
    /// Fully expanded
    Large,
}

impl Detent {
    /// Whether this detent corresponds to the published `expanded` flag
    pub fn is_expanded(&self) -> bool {
        matches!(self, Detent::Large)
    }
}

impl std::fmt::Display for Detent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Detent::Medium => f.write_str("medium"),
            Detent::Large => f.write_str("large"),
        }
    }
}
