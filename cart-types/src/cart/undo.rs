//! Undo entries - captured snapshots of destructive mutations
//!
//! Each entry carries enough prior state to reverse exactly one mutation.
//! Entries are consumed at most once (pop-and-apply); replaying one whose
//! target no longer exists is a silent no-op, never an error.

use super::item::CartItem;
use serde::{Deserialize, Serialize};

/// One reversible mutation record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UndoEntry {
    /// A line was removed (explicitly or via a quantity drop to zero)
    ItemRemoved {
        /// Position the line held before removal
        index: usize,
        item: Box<CartItem>,
    },
    /// The whole cart was emptied
    CartCleared {
        items: Vec<CartItem>,
        #[serde(skip_serializing_if = "Option::is_none")]
        active_location_id: Option<String>,
    },
    /// A line's quantity was changed
    QuantityChanged {
        line_id: String,
        prev_quantity: i32,
    },
    /// All lines of one location were removed
    LocationCleared { items: Vec<CartItem> },
}

impl UndoEntry {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            UndoEntry::ItemRemoved { .. } => "ITEM_REMOVED",
            UndoEntry::CartCleared { .. } => "CART_CLEARED",
            UndoEntry::QuantityChanged { .. } => "QUANTITY_CHANGED",
            UndoEntry::LocationCleared { .. } => "LOCATION_CLEARED",
        }
    }
}
