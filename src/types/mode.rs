// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating mode reported by a light.

use std::fmt;

/// Operating mode decoded from byte 3 of a status frame.
///
/// # Examples
///
/// ```
/// use magichome_lib::types::LightMode;
///
/// assert_eq!(LightMode::from_code(0x61), LightMode::Color);
/// assert_eq!(LightMode::from_code(0x60), LightMode::Custom);
/// assert_eq!(LightMode::from_code(0x2c), LightMode::Preset);
/// assert_eq!(LightMode::from_code(0x00), LightMode::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum LightMode {
    /// Static RGB color.
    Color,
    /// White channel.
    ///
    /// No status code maps to this mode; it only exists so callers can set
    /// it out-of-band and get the white color convention.
    White,
    /// User-programmed custom pattern.
    Custom,
    /// Built-in preset pattern.
    Preset,
    /// Any code outside the known table.
    #[default]
    Unknown,
}

impl LightMode {
    /// Decodes a status frame mode byte.
    ///
    /// Codes outside the table decode to [`LightMode::Unknown`]; this never fails.
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        match code {
            0x61 | 0x62 | 0x41 => Self::Color,
            0x60 => Self::Custom,
            0x2a..=0x2f => Self::Preset,
            _ if is_bcd_preset(code) => Self::Preset,
            _ => Self::Unknown,
        }
    }

    /// Returns the mode name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Color => "Color",
            Self::White => "White",
            Self::Custom => "Custom",
            Self::Preset => "Preset",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for LightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Some firmware reports preset numbers 25 to 38 as BCD (`0x25` reads as 25).
fn is_bcd_preset(code: u8) -> bool {
    let (high, low) = (code >> 4, code & 0x0f);
    if high > 9 || low > 9 {
        return false;
    }
    (25..=38).contains(&(high * 10 + low))
}
