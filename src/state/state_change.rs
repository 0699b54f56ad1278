// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! State changes are applied to a [`LightState`](super::LightState) both
//! from decoded status frames and from optimistic command updates, and are
//! handed to subscribers when they actually change something.
//!
//! # Examples
//!
//! ```
//! use magichome_lib::state::{LightState, StateChange};
//! use magichome_lib::types::PowerState;
//!
//! let mut state = LightState::new();
//!
//! // Apply returns true if state actually changed
//! assert!(state.apply(&StateChange::Power(PowerState::On)));
//! assert!(!state.apply(&StateChange::Power(PowerState::On)));
//! ```

use crate::response::StatusResponse;
use crate::types::{LightMode, PowerState, RgbColor};

/// Represents a change in light state.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StateChange {
    /// Power state changed.
    Power(PowerState),

    /// Operating mode changed.
    Mode(LightMode),

    /// Color changed.
    Color(RgbColor),

    /// Multiple changes at once, applied in order.
    Batch(Vec<StateChange>),
}

impl StateChange {
    /// Creates the changes carried by a status frame.
    ///
    /// Ordered power, mode, color.
    #[must_use]
    pub fn from_status(status: &StatusResponse) -> Self {
        Self::Batch(vec![
            Self::Power(status.power()),
            Self::Mode(status.mode()),
            Self::Color(status.color()),
        ])
    }

    /// Creates the changes for a color command: the color, then color mode.
    #[must_use]
    pub fn color_set(color: RgbColor) -> Self {
        Self::Batch(vec![Self::Color(color), Self::Mode(LightMode::Color)])
    }
}
