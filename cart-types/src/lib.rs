//! Shared types for the cart subsystem
//!
//! Common types consumed by the store crate and by UI callers:
//! line items, conflict records, undo entries, notification events,
//! error types, and small utilities.

pub mod cart;
pub mod error;
pub mod util;

// Re-exports
pub use cart::{
    CartEvent, CartItem, ConflictAction, ConflictMode, LocationKind, LocationRef,
    PendingConflict, SourceItem, UndoEntry,
};
pub use error::{CartError, CartResult};
pub use serde::{Deserialize, Serialize};
