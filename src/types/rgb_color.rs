// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type with hex parsing.
//!
//! Magic Home controllers only report a meaningful color while they are in
//! [`LightMode::Color`](super::LightMode::Color). For every other mode the
//! library reports [`RgbColor::TRANSPARENT`], which carries a zero alpha
//! channel so callers can tell "no color" apart from a real RGB value.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// RGB color with 8-bit channels (0-255) and an opacity marker.
///
/// The alpha channel is never sent to the light. It only distinguishes
/// real colors (opaque) from the unset color reported outside color mode.
///
/// # Examples
///
/// ```
/// use magichome_lib::types::RgbColor;
///
/// let color = RgbColor::new(255, 128, 0);
/// assert_eq!(color.red(), 255);
/// assert_eq!(color.green(), 128);
/// assert_eq!(color.blue(), 0);
/// assert!(!color.is_transparent());
///
/// let red = RgbColor::from_hex("#FF0000").unwrap();
/// assert_eq!(red, RgbColor::RED);
/// assert_eq!(red.to_hex_with_hash(), "#FF0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
    alpha: u8,
}

impl RgbColor {
    /// Pure red.
    pub const RED: Self = Self::new(255, 0, 0);
    /// Pure green.
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Pure blue.
    pub const BLUE: Self = Self::new(0, 0, 255);
    /// White, also reported while the light is in white mode.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Black (all channels off).
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Unset color, reported when the light is not in color mode.
    ///
    /// The channels are white with zero alpha; sending it to a light
    /// therefore produces white.
    pub const TRANSPARENT: Self = Self {
        red: 255,
        green: 255,
        blue: 255,
        alpha: 0,
    };

    /// Creates a new opaque RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: u8::MAX,
        }
    }

    /// Parses an RGB color from a hex string.
    ///
    /// Accepts formats: `#RRGGBB`, `RRGGBB`, `#RGB`, `RGB`
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` if the hex string is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use magichome_lib::types::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FF5733").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 87, 51));
    ///
    /// let short = RgbColor::from_hex("0F0").unwrap();
    /// assert_eq!(short, RgbColor::GREEN);
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let digits = hex.trim().trim_start_matches('#');

        if !digits.is_ascii() {
            return Err(ValueError::InvalidHexColor(hex.to_string()));
        }

        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (channel, c) in channels.iter_mut().zip(digits.chars()) {
                    *channel = parse_hex_char(c, hex)? * 17;
                }
                Ok(Self::new(channels[0], channels[1], channels[2]))
            }
            6 => Ok(Self::new(
                parse_hex_pair(&digits[0..2], hex)?,
                parse_hex_pair(&digits[2..4], hex)?,
                parse_hex_pair(&digits[4..6], hex)?,
            )),
            _ => Err(ValueError::InvalidHexColor(hex.to_string())),
        }
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns `true` for the unset color reported outside color mode.
    #[must_use]
    pub const fn is_transparent(&self) -> bool {
        self.alpha == 0
    }

    /// Returns the channels as an `(r, g, b)` tuple.
    #[must_use]
    pub const fn to_tuple(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Returns the color as a hex string without the hash prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Returns the color as a hex string with the hash prefix.
    #[must_use]
    pub fn to_hex_with_hash(&self) -> String {
        format!("#{}", self.to_hex())
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_transparent() {
            write!(f, "transparent")
        } else {
            write!(f, "{}", self.to_hex_with_hash())
        }
    }
}

impl FromStr for RgbColor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

fn parse_hex_char(c: char, input: &str) -> Result<u8, ValueError> {
    c.to_digit(16)
        .and_then(|d| u8::try_from(d).ok())
        .ok_or_else(|| ValueError::InvalidHexColor(input.to_string()))
}

fn parse_hex_pair(pair: &str, input: &str) -> Result<u8, ValueError> {
    u8::from_str_radix(pair, 16).map_err(|_| ValueError::InvalidHexColor(input.to_string()))
}
