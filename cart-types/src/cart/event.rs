//! Cart events - notifications broadcast to subscribers after mutations

use super::conflict::ConflictAction;
use serde::{Deserialize, Serialize};

/// Notification emitted after a completed mutation
///
/// Events describe what already happened; listeners must not assume any
/// particular ordering beyond "state was fully updated before emission".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartEvent {
    /// A new line appeared, or an existing line's quantity grew by one
    ItemAdded {
        line_id: String,
        quantity: i32,
    },
    ItemRemoved {
        line_id: String,
    },
    QuantityChanged {
        line_id: String,
        quantity: i32,
    },
    CartCleared,
    LocationCleared {
        location_id: String,
    },
    /// A cross-location add was parked for user decision
    ConflictDetected {
        location_id: String,
    },
    ConflictResolved {
        action: ConflictAction,
    },
    /// A pending conflict was dropped by a later non-conflicting add
    ConflictSuperseded {
        location_id: String,
    },
    UndoApplied {
        kind: String,
    },
}

impl std::fmt::Display for CartEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartEvent::ItemAdded { .. } => write!(f, "ITEM_ADDED"),
            CartEvent::ItemRemoved { .. } => write!(f, "ITEM_REMOVED"),
            CartEvent::QuantityChanged { .. } => write!(f, "QUANTITY_CHANGED"),
            CartEvent::CartCleared => write!(f, "CART_CLEARED"),
            CartEvent::LocationCleared { .. } => write!(f, "LOCATION_CLEARED"),
            CartEvent::ConflictDetected { .. } => write!(f, "CONFLICT_DETECTED"),
            CartEvent::ConflictResolved { .. } => write!(f, "CONFLICT_RESOLVED"),
            CartEvent::ConflictSuperseded { .. } => write!(f, "CONFLICT_SUPERSEDED"),
            CartEvent::UndoApplied { .. } => write!(f, "UNDO_APPLIED"),
        }
    }
}
