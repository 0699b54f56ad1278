// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for light events.
//!
//! Callbacks registered on a [`Light`](crate::Light) are notified when its
//! mirrored state changes (from a refresh or an optimistic command update),
//! when a scheduled refresh fails, and when the light is disconnected.
//!
//! # Usage
//!
//! ```no_run
//! use magichome_lib::{Light, Subscribable};
//!
//! # async fn example() -> magichome_lib::Result<()> {
//! let light = Light::with_address("192.168.1.42");
//!
//! let sub_id = light.on_power_changed(|state| {
//!     println!("Light is now {state}");
//! });
//! light.on_refresh_failed(|error| {
//!     eprintln!("Scheduled refresh failed: {error}");
//! });
//!
//! light.connect().await?;
//!
//! // Later, unsubscribe
//! light.unsubscribe(sub_id);
//! # Ok(())
//! # }
//! ```

mod callback;
mod subscribable;

pub use callback::{CallbackRegistry, SubscriptionId};
pub use subscribable::Subscribable;
