//! Store configuration

use crate::undo::DEFAULT_UNDO_CAPACITY;
use cart_types::ConflictMode;
use serde::{Deserialize, Serialize};

/// Configuration for a [`CartStore`](crate::CartStore)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartConfig {
    /// Number of undo entries retained before the oldest is evicted
    pub undo_capacity: usize,
    /// Initial sticky conflict preference; `None` means prompt the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_conflict_mode: Option<ConflictMode>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            undo_capacity: DEFAULT_UNDO_CAPACITY,
            default_conflict_mode: None,
        }
    }
}
