// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for lights that report events.

use crate::error::Error;
use crate::state::StateChange;
use crate::subscription::SubscriptionId;
use crate::types::{LightMode, PowerState, RgbColor};

/// Trait for types that support event subscriptions.
///
/// Callbacks run synchronously on the task that produced the event: the
/// caller's task for commands, the scheduler task for automatic refreshes.
/// Only changes that actually alter the mirrored state are reported.
///
/// # Examples
///
/// ```no_run
/// use magichome_lib::{Light, Subscribable};
///
/// # async fn example() -> magichome_lib::Result<()> {
/// let light = Light::with_address("192.168.1.42");
///
/// let sub_id = light.on_color_changed(|color| {
///     println!("Color is now {color}");
/// });
///
/// light.connect().await?;
/// light.unsubscribe(sub_id);
/// # Ok(())
/// # }
/// ```
pub trait Subscribable {
    /// Subscribes to power state changes.
    fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PowerState) + Send + Sync + 'static;

    /// Subscribes to color changes.
    fn on_color_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(RgbColor) + Send + Sync + 'static;

    /// Subscribes to mode changes.
    fn on_mode_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(LightMode) + Send + Sync + 'static;

    /// Subscribes to all state changes.
    ///
    /// The callback receives each individual change, never a batch.
    fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static;

    /// Subscribes to failures of the auto-refresh scheduler.
    ///
    /// Errors of refreshes the caller starts explicitly are returned to the
    /// caller instead.
    fn on_refresh_failed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Error) + Send + Sync + 'static;

    /// Subscribes to the disconnection of a connected light.
    fn on_disconnected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
