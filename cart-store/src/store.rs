//! CartStore - the cart aggregate and its mutation operations
//!
//! This module handles:
//! - Candidate validation and conflict policy consultation
//! - Line merging, removal, quantity changes, clears
//! - Pending-conflict parking and resolution
//! - Undo replay
//! - Totals recomputation and subscriber notification after every mutation
//!
//! The store is constructed once at application start and handed to
//! callers by reference; there is no global singleton. All mutations are
//! synchronous: state, including derived totals, is fully updated before
//! subscribers are notified and before the call returns.

use crate::config::CartConfig;
use crate::money::{self, MAX_QUANTITY, Totals};
use crate::policy::{self, ConflictDecision};
use crate::undo::UndoLog;
use cart_types::cart::item::line_id;
use cart_types::util::now_millis;
use cart_types::{
    CartEvent, CartItem, CartResult, ConflictAction, ConflictMode, LocationRef, PendingConflict,
    SourceItem, UndoEntry,
};
use tracing::{debug, warn};

/// Subscriber handle returned by [`CartStore::subscribe`]
pub type ListenerId = u64;

/// Typed result of a successful `add_item` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended
    Added,
    /// An existing line's quantity grew
    Merged { quantity: i32 },
    /// The add was parked; the caller must resolve the conflict
    ConflictPending,
    /// A cross-location conflict was auto-resolved via the sticky mode
    Resolved(ConflictMode),
}

/// The cart aggregate
pub struct CartStore {
    items: Vec<CartItem>,
    active_location_id: Option<String>,
    conflict_mode: Option<ConflictMode>,
    pending_conflict: Option<PendingConflict>,
    undo: UndoLog,
    totals: Totals,
    error: Option<String>,
    listeners: Vec<(ListenerId, Box<dyn Fn(&CartEvent)>)>,
    next_listener_id: ListenerId,
    updated_at: i64,
}

impl CartStore {
    pub fn new() -> Self {
        Self::with_config(CartConfig::default())
    }

    pub fn with_config(config: CartConfig) -> Self {
        Self {
            items: Vec::new(),
            active_location_id: None,
            conflict_mode: config.default_conflict_mode,
            pending_conflict: None,
            undo: UndoLog::new(config.undo_capacity),
            totals: Totals::default(),
            error: None,
            listeners: Vec::new(),
            next_listener_id: 0,
            updated_at: now_millis(),
        }
    }

    // ========== Read surface ==========

    /// Lines in insertion order
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of unit_price × quantity across all lines
    pub fn total(&self) -> f64 {
        self.totals.total
    }

    /// Sum of quantities across all lines
    pub fn item_count(&self) -> i32 {
        self.totals.item_count
    }

    /// Last validation error; the caller clears it via [`clear_error`](Self::clear_error)
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pending_conflict(&self) -> Option<&PendingConflict> {
        self.pending_conflict.as_ref()
    }

    /// `Some(id)` iff every line shares that location
    pub fn active_location_id(&self) -> Option<&str> {
        self.active_location_id.as_deref()
    }

    pub fn conflict_mode(&self) -> Option<ConflictMode> {
        self.conflict_mode
    }

    /// Number of undoable mutations currently retained
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Last mutation timestamp (Unix milliseconds)
    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    // ========== Subscription ==========

    /// Register a listener invoked after every completed mutation
    pub fn subscribe(&mut self, listener: impl Fn(&CartEvent) + 'static) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns whether it was registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&self, event: &CartEvent) {
        debug!(event = %event, "cart event");
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }

    // ========== Mutations ==========

    /// Add one unit of `item` from `location`
    ///
    /// Validation runs before conflict evaluation; a rejected add mutates
    /// nothing and mirrors the message into the store's `error` field.
    /// Successful adds push no undo entry - only destructive operations do.
    pub fn add_item(&mut self, item: SourceItem, location: LocationRef) -> CartResult<AddOutcome> {
        let unit_price = match money::validate_item(&item.name, &item.price) {
            Ok(price) => price,
            Err(err) => {
                warn!(item_id = %item.id, error = %err, "rejected cart add");
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        match policy::evaluate_add(&self.items, &location.id, self.conflict_mode) {
            ConflictDecision::Proceed => {
                let superseded = self.take_superseded_conflict();
                let (outcome, event) = self.insert_line(item, &location, unit_price);
                self.finish_mutation();
                if let Some(event) = superseded {
                    self.notify(&event);
                }
                self.notify(&event);
                Ok(outcome)
            }
            ConflictDecision::AutoResolve(mode) => {
                debug!(mode = ?mode, location_id = %location.id, "auto-resolving cross-location add");
                let events = self.apply_resolution(mode, item, location, unit_price);
                self.finish_mutation();
                for event in &events {
                    self.notify(event);
                }
                Ok(AddOutcome::Resolved(mode))
            }
            ConflictDecision::RequiresResolution => {
                if self.pending_conflict.is_some() {
                    warn!(location_id = %location.id, "new conflicting add overwrites pending conflict");
                }
                let current_location_name = self
                    .items
                    .first()
                    .map(|i| i.location_name.clone())
                    .unwrap_or_default();
                let event = CartEvent::ConflictDetected {
                    location_id: location.id.clone(),
                };
                self.pending_conflict = Some(PendingConflict {
                    item,
                    location,
                    current_location_name,
                });
                self.finish_mutation();
                self.notify(&event);
                Ok(AddOutcome::ConflictPending)
            }
        }
    }

    /// Delete a line; the removed item is captured for undo
    pub fn remove_item(&mut self, line_id: &str) {
        let Some(index) = self.items.iter().position(|i| i.line_id == line_id) else {
            debug!(line_id, "remove_item: no such line");
            return;
        };

        let item = self.items.remove(index);
        self.undo.push(UndoEntry::ItemRemoved {
            index,
            item: Box::new(item),
        });
        self.refresh_active_location();
        self.finish_mutation();
        self.notify(&CartEvent::ItemRemoved {
            line_id: line_id.to_string(),
        });
    }

    /// Set a line's quantity; zero or less behaves exactly like removal
    pub fn update_quantity(&mut self, line_id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove_item(line_id);
            return;
        }

        let Some(item) = self.items.iter_mut().find(|i| i.line_id == line_id) else {
            debug!(line_id, "update_quantity: no such line");
            return;
        };

        let clamped = quantity.min(MAX_QUANTITY);
        if clamped != quantity {
            warn!(line_id, quantity, "quantity clamped to maximum");
        }

        let prev_quantity = item.quantity;
        item.quantity = clamped;
        self.undo.push(UndoEntry::QuantityChanged {
            line_id: line_id.to_string(),
            prev_quantity,
        });
        self.finish_mutation();
        self.notify(&CartEvent::QuantityChanged {
            line_id: line_id.to_string(),
            quantity: clamped,
        });
    }

    /// Empty the cart; the prior list is captured for undo
    ///
    /// Clearing an already empty cart still pushes an entry (capturing an
    /// empty list), keeping the operation idempotent for callers.
    pub fn clear_cart(&mut self) {
        let items = std::mem::take(&mut self.items);
        let active_location_id = self.active_location_id.take();
        self.undo.push(UndoEntry::CartCleared {
            items,
            active_location_id,
        });
        self.finish_mutation();
        self.notify(&CartEvent::CartCleared);
    }

    /// Remove every line belonging to `location_id`
    pub fn clear_location(&mut self, location_id: &str) {
        let removed: Vec<CartItem> = self
            .items
            .iter()
            .filter(|i| i.location_id == location_id)
            .cloned()
            .collect();
        self.items.retain(|i| i.location_id != location_id);

        self.undo.push(UndoEntry::LocationCleared { items: removed });
        self.refresh_active_location();
        self.finish_mutation();
        self.notify(&CartEvent::LocationCleared {
            location_id: location_id.to_string(),
        });
    }

    /// Consume the pending conflict, applying the chosen action
    ///
    /// No-op (with a warning) when nothing is pending; the slot is cleared
    /// exactly once either way.
    pub fn resolve_conflict(&mut self, action: ConflictAction) {
        let Some(pending) = self.pending_conflict.take() else {
            warn!(action = ?action, "resolve_conflict: nothing pending");
            return;
        };

        let Some(mode) = action.as_mode() else {
            // Cancel: drop the candidate, cart untouched
            self.finish_mutation();
            self.notify(&CartEvent::ConflictResolved { action });
            return;
        };

        // Re-entry at the boundary: the candidate was validated when
        // parked, so this parse only fails if state was tampered with
        let unit_price = match money::parse_price(&pending.item.price) {
            Ok(price) => price,
            Err(err) => {
                warn!(error = %err, "pending conflict held an unparseable price");
                self.error = Some(err.to_string());
                return;
            }
        };

        let mut events = self.apply_resolution(mode, pending.item, pending.location, unit_price);
        events.push(CartEvent::ConflictResolved { action });
        self.finish_mutation();
        for event in &events {
            self.notify(event);
        }
    }

    /// Pop the most recent undo entry and replay its inverse
    ///
    /// Never fails: a vanished target makes the replay a silent no-op, and
    /// the entry is consumed either way. Returns whether an entry existed.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.undo.pop() else {
            return false;
        };
        let kind = entry.kind();

        match entry {
            UndoEntry::ItemRemoved { index, item } => {
                if self.items.iter().any(|i| i.line_id == item.line_id) {
                    // Line was re-added after the removal; reinserting
                    // would double-count
                    debug!(line_id = %item.line_id, "undo: line exists again, skipping");
                } else {
                    let index = index.min(self.items.len());
                    self.items.insert(index, *item);
                }
            }
            UndoEntry::CartCleared { items, .. } => {
                self.items = items;
            }
            UndoEntry::QuantityChanged {
                line_id,
                prev_quantity,
            } => {
                match self.items.iter_mut().find(|i| i.line_id == line_id) {
                    Some(item) => item.quantity = prev_quantity,
                    None => debug!(%line_id, "undo: line no longer exists, skipping"),
                }
            }
            UndoEntry::LocationCleared { items } => {
                for item in items {
                    if !self.items.iter().any(|i| i.line_id == item.line_id) {
                        self.items.push(item);
                    }
                }
            }
        }

        self.refresh_active_location();
        self.finish_mutation();
        self.notify(&CartEvent::UndoApplied {
            kind: kind.to_string(),
        });
        true
    }

    /// Set or clear the sticky conflict preference
    pub fn set_conflict_mode(&mut self, mode: Option<ConflictMode>) {
        self.conflict_mode = mode;
    }

    /// Dismiss the last validation error
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ========== Internals ==========

    /// Merge into an existing line or append a new one
    fn insert_line(
        &mut self,
        source: SourceItem,
        location: &LocationRef,
        unit_price: f64,
    ) -> (AddOutcome, CartEvent) {
        let id = line_id(&location.id, &source.id);

        if let Some(item) = self.items.iter_mut().find(|i| i.line_id == id) {
            if item.quantity >= MAX_QUANTITY {
                warn!(line_id = %id, "quantity already at maximum, not incremented");
            } else {
                item.quantity += 1;
            }
            let quantity = item.quantity;
            let event = CartEvent::ItemAdded {
                line_id: id,
                quantity,
            };
            (AddOutcome::Merged { quantity }, event)
        } else {
            let item = CartItem::from_source(source, location, unit_price);
            let event = CartEvent::ItemAdded {
                line_id: item.line_id.clone(),
                quantity: 1,
            };
            self.items.push(item);
            self.refresh_active_location();
            (AddOutcome::Added, event)
        }
    }

    /// Apply a cross-location resolution, returning the events to emit
    fn apply_resolution(
        &mut self,
        mode: ConflictMode,
        item: SourceItem,
        location: LocationRef,
        unit_price: f64,
    ) -> Vec<CartEvent> {
        let mut events = Vec::new();

        match mode {
            ConflictMode::Replace => {
                // The replaced list stays reversible, same as clear_cart
                let items = std::mem::take(&mut self.items);
                let active_location_id = self.active_location_id.take();
                self.undo.push(UndoEntry::CartCleared {
                    items,
                    active_location_id,
                });
                events.push(CartEvent::CartCleared);
            }
            ConflictMode::Separate => {}
            ConflictMode::Merge => {
                // Re-home every line to the candidate's location by
                // reconstructing it from its source item; quantities merge
                // on line-id collision. Unit prices were normalized at add
                // time and carry over unchanged.
                let old_items = std::mem::take(&mut self.items);
                for old in old_items {
                    let new_id = line_id(&location.id, &old.source.id);
                    match self.items.iter_mut().find(|i| i.line_id == new_id) {
                        Some(existing) => {
                            existing.quantity =
                                (existing.quantity + old.quantity).min(MAX_QUANTITY);
                        }
                        None => {
                            let mut rehomed =
                                CartItem::from_source(old.source, &location, old.unit_price);
                            rehomed.quantity = old.quantity;
                            self.items.push(rehomed);
                        }
                    }
                }
                self.refresh_active_location();
            }
        }

        let (_, event) = self.insert_line(item, &location, unit_price);
        events.push(event);
        events
    }

    /// Emit the supersession notice for a pending conflict dropped by a
    /// later non-conflicting add
    fn take_superseded_conflict(&mut self) -> Option<CartEvent> {
        let pending = self.pending_conflict.take()?;
        warn!(
            location_id = %pending.location.id,
            item_id = %pending.item.id,
            "pending conflict superseded by non-conflicting add"
        );
        Some(CartEvent::ConflictSuperseded {
            location_id: pending.location.id,
        })
    }

    fn refresh_active_location(&mut self) {
        self.active_location_id = match self.items.first() {
            Some(first)
                if self
                    .items
                    .iter()
                    .all(|i| i.location_id == first.location_id) =>
            {
                Some(first.location_id.clone())
            }
            _ => None,
        };
    }

    /// Recompute derived state; runs after every mutation, before
    /// subscribers see the event
    fn finish_mutation(&mut self) {
        self.totals = money::recalculate_totals(&self.items);
        self.updated_at = now_millis();
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items.len())
            .field("total", &self.totals.total)
            .field("item_count", &self.totals.item_count)
            .field("active_location_id", &self.active_location_id)
            .field("pending_conflict", &self.pending_conflict.is_some())
            .field("undo_depth", &self.undo.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_types::{CartError, LocationKind};

    fn restaurant(id: &str) -> LocationRef {
        LocationRef::new(id, format!("Location {}", id), LocationKind::Restaurant)
    }

    fn pizza() -> SourceItem {
        SourceItem::new("i1", "Pizza", "$12.99")
    }

    #[test]
    fn test_add_appends_then_merges() {
        let mut store = CartStore::new();

        let outcome = store.add_item(pizza(), restaurant("L1")).unwrap();
        assert_eq!(outcome, AddOutcome::Added);

        let outcome = store.add_item(pizza(), restaurant("L1")).unwrap();
        assert_eq!(outcome, AddOutcome::Merged { quantity: 2 });

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].line_id, "L1-i1");
        assert_eq!(store.item_count(), 2);
        assert_eq!(store.total(), 25.98);
        assert_eq!(store.active_location_id(), Some("L1"));
    }

    #[test]
    fn test_validation_rejects_without_mutation() {
        let mut store = CartStore::new();

        let err = store
            .add_item(SourceItem::new("i1", "", "$5.00"), restaurant("L1"))
            .unwrap_err();
        assert_eq!(err, CartError::MissingName);
        assert!(store.error().is_some());
        assert!(store.items().is_empty());

        store.clear_error();
        assert!(store.error().is_none());

        let err = store
            .add_item(SourceItem::new("i2", "Soup", "abc"), restaurant("L1"))
            .unwrap_err();
        assert!(matches!(err, CartError::InvalidPrice(_)));
        assert!(store.error().unwrap().contains("price"));
        assert!(store.items().is_empty());
        assert_eq!(store.total(), 0.0);
    }

    #[test]
    fn test_cross_location_parks_conflict() {
        let mut store = CartStore::new();
        store.add_item(pizza(), restaurant("L1")).unwrap();

        let outcome = store
            .add_item(SourceItem::new("i9", "Apples", "$3.00"), restaurant("L2"))
            .unwrap();

        assert_eq!(outcome, AddOutcome::ConflictPending);
        let pending = store.pending_conflict().unwrap();
        assert_eq!(pending.location.id, "L2");
        assert_eq!(pending.current_location_name, "Location L1");
        // Cart untouched
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].location_id, "L1");
    }

    #[test]
    fn test_resolve_replace() {
        let mut store = CartStore::new();
        store.add_item(pizza(), restaurant("L1")).unwrap();
        store
            .add_item(SourceItem::new("i9", "Apples", "$3.00"), restaurant("L2"))
            .unwrap();

        store.resolve_conflict(ConflictAction::Replace);

        assert!(store.pending_conflict().is_none());
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].line_id, "L2-i9");
        assert_eq!(store.total(), 3.0);
        assert_eq!(store.active_location_id(), Some("L2"));

        // The replaced list is recoverable
        assert!(store.undo());
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].line_id, "L1-i1");
    }

    #[test]
    fn test_resolve_separate_keeps_both() {
        let mut store = CartStore::new();
        store.add_item(pizza(), restaurant("L1")).unwrap();
        store
            .add_item(SourceItem::new("i9", "Apples", "$3.00"), restaurant("L2"))
            .unwrap();

        store.resolve_conflict(ConflictAction::Separate);

        assert_eq!(store.items().len(), 2);
        assert_eq!(store.total(), 15.99);
        assert_eq!(store.item_count(), 2);
        // Mixed cart has no single active location
        assert_eq!(store.active_location_id(), None);
    }

    #[test]
    fn test_resolve_merge_rehomes_items() {
        let mut store = CartStore::new();
        store.add_item(pizza(), restaurant("L1")).unwrap();
        store.add_item(pizza(), restaurant("L1")).unwrap();
        store
            .add_item(SourceItem::new("i9", "Apples", "$3.00"), restaurant("L2"))
            .unwrap();

        store.resolve_conflict(ConflictAction::Merge);

        assert_eq!(store.items().len(), 2);
        let rehomed = store
            .items()
            .iter()
            .find(|i| i.line_id == "L2-i1")
            .expect("pizza re-homed to L2");
        assert_eq!(rehomed.quantity, 2);
        assert_eq!(rehomed.location_name, "Location L2");
        assert_eq!(store.active_location_id(), Some("L2"));
        assert_eq!(store.total(), 28.98);
    }

    #[test]
    fn test_resolve_cancel_keeps_cart() {
        let mut store = CartStore::new();
        store.add_item(pizza(), restaurant("L1")).unwrap();
        store
            .add_item(SourceItem::new("i9", "Apples", "$3.00"), restaurant("L2"))
            .unwrap();

        store.resolve_conflict(ConflictAction::Cancel);

        assert!(store.pending_conflict().is_none());
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].line_id, "L1-i1");
    }

    #[test]
    fn test_resolve_without_pending_is_noop() {
        let mut store = CartStore::new();
        store.add_item(pizza(), restaurant("L1")).unwrap();

        store.resolve_conflict(ConflictAction::Replace);

        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_sticky_mode_auto_resolves() {
        let mut store = CartStore::new();
        store.set_conflict_mode(Some(ConflictMode::Merge));
        store.add_item(pizza(), restaurant("L1")).unwrap();

        let outcome = store
            .add_item(SourceItem::new("i9", "Apples", "$3.00"), restaurant("L2"))
            .unwrap();

        assert_eq!(outcome, AddOutcome::Resolved(ConflictMode::Merge));
        assert!(store.pending_conflict().is_none());
        assert_eq!(store.items().len(), 2);
        assert_eq!(store.active_location_id(), Some("L2"));
    }

    #[test]
    fn test_supersession_is_surfaced() {
        let mut store = CartStore::new();
        store.add_item(pizza(), restaurant("L1")).unwrap();
        store
            .add_item(SourceItem::new("i9", "Apples", "$3.00"), restaurant("L2"))
            .unwrap();
        assert!(store.pending_conflict().is_some());

        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        // Same-location add proceeds and drops the pending conflict
        store.add_item(pizza(), restaurant("L1")).unwrap();

        assert!(store.pending_conflict().is_none());
        let events = seen.borrow();
        assert_eq!(
            events[0],
            CartEvent::ConflictSuperseded {
                location_id: "L2".to_string()
            }
        );
        assert!(matches!(events[1], CartEvent::ItemAdded { .. }));
    }

    #[test]
    fn test_update_quantity_and_undo() {
        let mut store = CartStore::new();
        store.add_item(pizza(), restaurant("L1")).unwrap();

        store.update_quantity("L1-i1", 5);
        assert_eq!(store.item_count(), 5);
        assert_eq!(store.total(), 64.95);

        assert!(store.undo());
        assert_eq!(store.item_count(), 1);
        assert_eq!(store.total(), 12.99);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut store = CartStore::new();
        store.add_item(pizza(), restaurant("L1")).unwrap();
        store.add_item(pizza(), restaurant("L1")).unwrap();

        store.update_quantity("L1-i1", 0);

        assert!(store.items().is_empty());
        assert_eq!(store.total(), 0.0);
        assert_eq!(store.item_count(), 0);

        // The removal (not a quantity change) was captured
        assert!(store.undo());
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 2);
    }

    #[test]
    fn test_remove_and_undo_restores_totals() {
        let mut store = CartStore::new();
        store.add_item(pizza(), restaurant("L1")).unwrap();
        store
            .add_item(SourceItem::new("i2", "Salad", "$6.50"), restaurant("L1"))
            .unwrap();
        let total_before = store.total();
        let count_before = store.item_count();

        store.remove_item("L1-i1");
        assert_eq!(store.items().len(), 1);

        assert!(store.undo());
        assert_eq!(store.total(), total_before);
        assert_eq!(store.item_count(), count_before);
        // Reinserted at its prior position
        assert_eq!(store.items()[0].line_id, "L1-i1");
    }

    #[test]
    fn test_undo_remove_after_readd_is_noop() {
        let mut store = CartStore::new();
        store.add_item(pizza(), restaurant("L1")).unwrap();
        store.remove_item("L1-i1");
        store.add_item(pizza(), restaurant("L1")).unwrap();

        assert!(store.undo());

        // Still a single quantity-1 line, not doubled
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 1);
    }

    #[test]
    fn test_clear_cart_idempotent() {
        let mut store = CartStore::new();
        store.add_item(pizza(), restaurant("L1")).unwrap();

        store.clear_cart();
        assert!(store.items().is_empty());
        assert_eq!(store.active_location_id(), None);

        store.clear_cart();
        assert!(store.items().is_empty());

        // Most recent entry captured an empty list
        assert!(store.undo());
        assert!(store.items().is_empty());
        // The one before restores the single line
        assert!(store.undo());
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.active_location_id(), Some("L1"));
    }

    #[test]
    fn test_clear_location_and_undo() {
        let mut store = CartStore::new();
        store.set_conflict_mode(Some(ConflictMode::Separate));
        store.add_item(pizza(), restaurant("L1")).unwrap();
        store
            .add_item(SourceItem::new("i9", "Apples", "$3.00"), restaurant("L2"))
            .unwrap();

        store.clear_location("L1");
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].location_id, "L2");
        assert_eq!(store.active_location_id(), Some("L2"));

        assert!(store.undo());
        assert_eq!(store.items().len(), 2);
        assert_eq!(store.active_location_id(), None);
    }

    #[test]
    fn test_undo_empty_log() {
        let mut store = CartStore::new();
        assert!(!store.undo());
    }

    #[test]
    fn test_undo_capacity_evicts_oldest() {
        let mut store = CartStore::with_config(CartConfig {
            undo_capacity: 2,
            default_conflict_mode: None,
        });
        store.add_item(pizza(), restaurant("L1")).unwrap();
        store.update_quantity("L1-i1", 2);
        store.update_quantity("L1-i1", 3);
        store.update_quantity("L1-i1", 4);

        assert_eq!(store.undo_depth(), 2);
        assert!(store.undo());
        assert!(store.undo());
        assert!(!store.undo());
        // The quantity=2 entry was evicted; we can only rewind to 2
        assert_eq!(store.items()[0].quantity, 2);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = CartStore::new();
        let count = std::rc::Rc::new(std::cell::Cell::new(0usize));
        let sink = count.clone();
        let id = store.subscribe(move |_| sink.set(sink.get() + 1));

        store.add_item(pizza(), restaurant("L1")).unwrap();
        assert_eq!(count.get(), 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.add_item(pizza(), restaurant("L1")).unwrap();
        assert_eq!(count.get(), 1);
    }
}
