// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state of a light and its wire codes.

use std::fmt;

/// Represents the power state of a light.
///
/// # Examples
///
/// ```
/// use magichome_lib::types::PowerState;
///
/// assert_eq!(PowerState::from(true), PowerState::On);
/// assert!(PowerState::On.is_on());
/// assert_eq!(PowerState::On.code(), 0x23);
/// assert_eq!(PowerState::Off.code(), 0x24);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum PowerState {
    /// Power is off.
    #[default]
    Off,
    /// Power is on.
    On,
}

impl PowerState {
    /// Wire code for "on", used in power commands and status frames.
    pub const ON_CODE: u8 = 0x23;
    /// Wire code for "off", used in power commands.
    pub const OFF_CODE: u8 = 0x24;

    /// Returns the wire code sent for this state.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::On => Self::ON_CODE,
            Self::Off => Self::OFF_CODE,
        }
    }

    /// Decodes a status frame power byte.
    ///
    /// Only [`ON_CODE`](Self::ON_CODE) means on. Every other value,
    /// including garbage, decodes as off.
    #[must_use]
    pub const fn from_status_code(code: u8) -> Self {
        if code == Self::ON_CODE {
            Self::On
        } else {
            Self::Off
        }
    }

    /// Returns `true` if the state is [`PowerState::On`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }

    /// Returns the label used in logs and console output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<PowerState> for bool {
    fn from(value: PowerState) -> Self {
        value.is_on()
    }
}
