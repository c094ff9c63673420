//! Cart store - in-memory state for the discovery app's shopping cart
//!
//! This crate owns the cart aggregate and everything around it:
//! - `money`: price-string parsing at the boundary and precise totals
//! - `policy`: the pure cross-location conflict decision
//! - `undo`: the bounded log of reversible destructive mutations
//! - `store`: the `CartStore` aggregate with its mutation operations
//!
//! # Mutation Flow
//!
//! ```text
//! add_item(item, location)
//!     ├─ 1. Validate (name, price string) - rejected adds mutate nothing
//!     ├─ 2. Consult conflict policy
//!     ├─ 3. Park a PendingConflict, or merge/append the line
//!     ├─ 4. Recalculate totals (Decimal, 2dp)
//!     ├─ 5. Notify subscribers
//!     └─ 6. Return typed outcome
//! ```
//!
//! All operations are synchronous and single-threaded: state, including
//! derived totals, is fully updated before any call returns.

pub mod config;
pub mod money;
pub mod policy;
pub mod store;
pub mod undo;

// Re-exports
pub use config::CartConfig;
pub use policy::ConflictDecision;
pub use store::{AddOutcome, CartStore, ListenerId};
pub use undo::UndoLog;
