//! Conflict policy - pure decision for cross-location adds
//!
//! The store consults this before touching state: same-location adds
//! proceed, cross-location adds either auto-resolve through the sticky
//! preference or require explicit user resolution.

use cart_types::{CartItem, ConflictMode};

/// Outcome of evaluating a candidate add against the current cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDecision {
    /// Empty cart or matching location: merge or append directly
    Proceed,
    /// Locations differ but a preference is set: resolve without prompting
    AutoResolve(ConflictMode),
    /// Locations differ and no preference: park a PendingConflict
    RequiresResolution,
}

/// Decide whether adding from `candidate_location_id` conflicts with the
/// current cart contents
pub fn evaluate_add(
    items: &[CartItem],
    candidate_location_id: &str,
    preference: Option<ConflictMode>,
) -> ConflictDecision {
    if items
        .iter()
        .all(|item| item.location_id == candidate_location_id)
    {
        // Vacuously true for an empty cart
        return ConflictDecision::Proceed;
    }

    match preference {
        Some(mode) => ConflictDecision::AutoResolve(mode),
        None => ConflictDecision::RequiresResolution,
    }
}
