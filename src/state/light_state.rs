// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light state tracking.

use crate::types::{LightMode, PowerState, RgbColor};

use super::StateChange;

/// Local mirror of a light's state.
///
/// This is the public view of a [`Light`](crate::Light): its address,
/// whether it is connected, and the last known power, mode and color.
/// It serializes with `serde` for display or persistence.
///
/// `color` is only meaningful while `mode` is [`LightMode::Color`].
///
/// # Examples
///
/// ```
/// use magichome_lib::state::LightState;
/// use magichome_lib::types::{LightMode, PowerState};
///
/// let state = LightState::new();
/// assert_eq!(state.power(), PowerState::Off);
/// assert_eq!(state.mode(), LightMode::Unknown);
/// assert!(!state.is_connected());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LightState {
    address: Option<String>,
    connected: bool,
    power: PowerState,
    color: RgbColor,
    mode: LightMode,
}

impl LightState {
    /// Creates a new state: disconnected, off, unknown mode, no color.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the light's address, if known.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub(crate) fn set_address(&mut self, address: impl Into<String>) {
        self.address = Some(address.into());
    }

    /// Returns `true` while the light holds an open connection.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub(crate) fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Returns the power state.
    #[must_use]
    pub fn power(&self) -> PowerState {
        self.power
    }

    /// Returns `true` if the light is on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.power.is_on()
    }

    /// Returns the color.
    #[must_use]
    pub fn color(&self) -> RgbColor {
        self.color
    }

    /// Returns the mode.
    #[must_use]
    pub fn mode(&self) -> LightMode {
        self.mode
    }

    /// Applies a change, returning `true` if anything was modified.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Power(power) => replace(&mut self.power, *power),
            StateChange::Mode(mode) => replace(&mut self.mode, *mode),
            StateChange::Color(color) => replace(&mut self.color, *color),
            StateChange::Batch(changes) => changes
                .iter()
                .fold(false, |changed, c| self.apply(c) || changed),
        }
    }

    /// Applies a change and returns the individual changes that modified
    /// the state, flattened in application order.
    pub(crate) fn apply_diff(&mut self, change: &StateChange) -> Vec<StateChange> {
        let mut applied = Vec::new();
        self.collect_applied(change, &mut applied);
        applied
    }

    fn collect_applied(&mut self, change: &StateChange, applied: &mut Vec<StateChange>) {
        match change {
            StateChange::Batch(changes) => {
                for nested in changes {
                    self.collect_applied(nested, applied);
                }
            }
            single => {
                if self.apply(single) {
                    applied.push(single.clone());
                }
            }
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
