// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Magic Home light control.
//!
//! # Types
//!
//! - [`PowerState`] - On/Off, with the wire codes used by the controller
//! - [`RgbColor`] - 8-bit RGB color, or the unset color outside color mode
//! - [`LightMode`] - Operating mode reported in status frames

mod mode;
mod power;
mod rgb_color;

pub use mode::LightMode;
pub use power::PowerState;
pub use rgb_color::RgbColor;
