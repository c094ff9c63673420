//! Cross-location conflict types

use super::item::{LocationRef, SourceItem};
use serde::{Deserialize, Serialize};

/// Sticky user preference governing automatic conflict resolution
///
/// When set, adds from a different location resolve without prompting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictMode {
    /// Clear the cart, candidate becomes the sole item
    Replace,
    /// Keep both locations side by side, no cross-location merge
    Separate,
    /// Re-home existing items to the candidate's location
    Merge,
}

/// Resolution verb for a pending conflict
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictAction {
    Replace,
    Separate,
    Merge,
    /// Drop the candidate, cart untouched
    Cancel,
}

impl ConflictAction {
    /// The mode this action corresponds to, `None` for cancel
    pub fn as_mode(&self) -> Option<ConflictMode> {
        match self {
            ConflictAction::Replace => Some(ConflictMode::Replace),
            ConflictAction::Separate => Some(ConflictMode::Separate),
            ConflictAction::Merge => Some(ConflictMode::Merge),
            ConflictAction::Cancel => None,
        }
    }
}

/// A provisional add blocked for user decision
///
/// At most one exists at a time; resolving it (or a later non-conflicting
/// add superseding it) is the only way to clear the slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingConflict {
    /// The candidate item, held until resolution
    pub item: SourceItem,
    /// Where the candidate comes from
    pub location: LocationRef,
    /// Name of the location the cart currently holds items from
    pub current_location_name: String,
}
