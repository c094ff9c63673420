//! Cart Data Model
//!
//! This module provides the types the cart store operates on:
//! - Items: raw catalog input and the merged line items derived from it
//! - Conflicts: cross-location add records awaiting user resolution
//! - Undo: captured snapshots sufficient to reverse one destructive mutation
//! - Events: notifications broadcast to subscribers after each mutation

pub mod conflict;
pub mod event;
pub mod item;
pub mod undo;

// Re-exports
pub use conflict::{ConflictAction, ConflictMode, PendingConflict};
pub use event::CartEvent;
pub use item::{CartItem, LocationKind, LocationRef, SourceItem};
pub use undo::UndoEntry;
