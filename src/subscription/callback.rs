// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for light subscriptions.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::error::Error;
use crate::state::StateChange;
use crate::types::{LightMode, PowerState, RgbColor};

/// Unique identifier for a subscription.
///
/// Returned when registering a callback and used to unsubscribe later.
/// IDs are unique within a light's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type PowerCallback = Arc<dyn Fn(PowerState) + Send + Sync>;
type ColorCallback = Arc<dyn Fn(RgbColor) + Send + Sync>;
type ModeCallback = Arc<dyn Fn(LightMode) + Send + Sync>;
type StateChangedCallback = Arc<dyn Fn(&StateChange) + Send + Sync>;
type RefreshFailedCallback = Arc<dyn Fn(&Error) + Send + Sync>;
type DisconnectedCallback = Arc<dyn Fn() + Send + Sync>;

/// Registry for light subscription callbacks.
///
/// Thread-safe through `parking_lot::RwLock`; callbacks are stored in `Arc`
/// and invoked synchronously on the task that produced the event, so they
/// should return quickly.
#[derive(Default)]
pub struct CallbackRegistry {
    next_id: AtomicU64,
    power_callbacks: RwLock<HashMap<SubscriptionId, PowerCallback>>,
    color_callbacks: RwLock<HashMap<SubscriptionId, ColorCallback>>,
    mode_callbacks: RwLock<HashMap<SubscriptionId, ModeCallback>>,
    state_changed_callbacks: RwLock<HashMap<SubscriptionId, StateChangedCallback>>,
    refresh_failed_callbacks: RwLock<HashMap<SubscriptionId, RefreshFailedCallback>>,
    disconnected_callbacks: RwLock<HashMap<SubscriptionId, DisconnectedCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback for power state changes.
    pub fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PowerState) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.power_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for color changes.
    pub fn on_color_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(RgbColor) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.color_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for mode changes.
    pub fn on_mode_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(LightMode) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.mode_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback receiving every state change.
    pub fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.state_changed_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for failed scheduled refreshes.
    pub fn on_refresh_failed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Error) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.refresh_failed_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for when the light is disconnected.
    pub fn on_disconnected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.disconnected_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    // =========================================================================
    // Unsubscription
    // =========================================================================

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.power_callbacks.write().remove(&id).is_some()
            || self.color_callbacks.write().remove(&id).is_some()
            || self.mode_callbacks.write().remove(&id).is_some()
            || self.state_changed_callbacks.write().remove(&id).is_some()
            || self.refresh_failed_callbacks.write().remove(&id).is_some()
            || self.disconnected_callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.power_callbacks.write().clear();
        self.color_callbacks.write().clear();
        self.mode_callbacks.write().clear();
        self.state_changed_callbacks.write().clear();
        self.refresh_failed_callbacks.write().clear();
        self.disconnected_callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch methods
    // =========================================================================

    /// Dispatches a state change to the generic and the matching specific
    /// callbacks. Batches are dispatched element by element.
    pub fn dispatch(&self, change: &StateChange) {
        if let StateChange::Batch(changes) = change {
            for nested in changes {
                self.dispatch(nested);
            }
            return;
        }

        for callback in self.state_changed_callbacks.read().values() {
            callback(change);
        }

        match change {
            StateChange::Power(state) => {
                for callback in self.power_callbacks.read().values() {
                    callback(*state);
                }
            }
            StateChange::Color(color) => {
                for callback in self.color_callbacks.read().values() {
                    callback(*color);
                }
            }
            StateChange::Mode(mode) => {
                for callback in self.mode_callbacks.read().values() {
                    callback(*mode);
                }
            }
            StateChange::Batch(_) => {}
        }
    }

    /// Dispatches a failed scheduled refresh.
    pub fn dispatch_refresh_failed(&self, error: &Error) {
        for callback in self.refresh_failed_callbacks.read().values() {
            callback(error);
        }
    }

    /// Dispatches the disconnected event.
    pub fn dispatch_disconnected(&self) {
        for callback in self.disconnected_callbacks.read().values() {
            callback();
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.power_callbacks.read().len()
            + self.color_callbacks.read().len()
            + self.mode_callbacks.read().len()
            + self.state_changed_callbacks.read().len()
            + self.refresh_failed_callbacks.read().len()
            + self.disconnected_callbacks.read().len()
    }

    /// Returns `true` if no callbacks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callbacks", &self.len())
            .finish()
    }
}
