//! # Active Order State
//!
//! Holds the single order currently being rung up at this terminal.
//!
//! ## Thread Safety
//! The order is wrapped in `Arc<Mutex<Option<Order>>>` because:
//! 1. Multiple service calls may touch the order
//! 2. Only one call should modify it at a time
//! 3. The terminal is single-station: at most ONE order is in progress
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Active Order Operations                               │
//! │                                                                         │
//! │  UI action                Service call            State change          │
//! │  ─────────                ────────────            ────────────          │
//! │                                                                         │
//! │  New order ─────────────► start() ──────────────► Some(Order::new())    │
//! │                                                                         │
//! │  Add drink ─────────────► with_order(|o| ...) ──► o.add_item(item)      │
//! │                                                                         │
//! │  Remove line ───────────► with_order(|o| ...) ──► o.remove_item(id)     │
//! │                                                                         │
//! │  Pay ───────────────────► take() after Paid ────► None                  │
//! │                                                                         │
//! │  Cancel ────────────────► cancel_and_clear() ───► None                  │
//! │                                                                         │
//! │  NOTE: All operations acquire the Mutex exclusively and release it      │
//! │        before any await point — the lock is sync and never held         │
//! │        across I/O.                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use milktea_core::{CoreError, CoreResult, Order};

/// Shared handle to the at-most-one order in progress.
#[derive(Debug, Clone, Default)]
pub struct ActiveOrder {
    inner: Arc<Mutex<Option<Order>>>,
}

impl ActiveOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh draft order and returns its id.
    ///
    /// Any previous order is dropped; callers decide beforehand whether the
    /// old one was finished or deliberately abandoned.
    pub fn start(&self) -> uuid::Uuid {
        let order = Order::new();
        let id = order.id;
        *self.lock() = Some(order);
        id
    }

    /// Runs a closure against the active order.
    ///
    /// ## Errors
    /// [`CoreError::NoActiveOrder`] when nothing has been started.
    pub fn with_order<T>(&self, f: impl FnOnce(&mut Order) -> T) -> CoreResult<T> {
        let mut guard = self.lock();
        let order = guard.as_mut().ok_or(CoreError::NoActiveOrder)?;
        Ok(f(order))
    }

    /// Takes the order out of the slot, leaving it empty.
    pub fn take(&self) -> CoreResult<Order> {
        self.lock().take().ok_or(CoreError::NoActiveOrder)
    }

    /// Puts an order back, e.g. after a failed persistence attempt.
    pub fn restore(&self, order: Order) {
        *self.lock() = Some(order);
    }

    /// Cancels the active order (if any) and clears the slot.
    ///
    /// Returns `true` if there was an order to cancel.
    pub fn cancel_and_clear(&self) -> bool {
        let mut guard = self.lock();
        match guard.take() {
            Some(mut order) => {
                order.cancel();
                true
            }
            None => false,
        }
    }

    /// Whether an order is currently in progress.
    pub fn is_active(&self) -> bool {
        self.lock().is_some()
    }

    /// Snapshot of the current order for display.
    pub fn snapshot(&self) -> Option<Order> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Order>> {
        // A poisoned mutex means a panic mid-mutation; the order is a plain
        // value, so continuing with it is safe.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
