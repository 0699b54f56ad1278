// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light state management types.
//!
//! [`LightState`] is the local mirror of a light, and [`StateChange`]
//! represents individual changes applied to it.
//!
//! # Examples
//!
//! ```
//! use magichome_lib::state::{LightState, StateChange};
//! use magichome_lib::types::{LightMode, RgbColor};
//!
//! let mut state = LightState::new();
//! state.apply(&StateChange::color_set(RgbColor::BLUE));
//!
//! assert_eq!(state.mode(), LightMode::Color);
//! assert_eq!(state.color(), RgbColor::BLUE);
//! ```

mod light_state;
mod state_change;

pub use light_state::LightState;
pub use state_change::StateChange;
