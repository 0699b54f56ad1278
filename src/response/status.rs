// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status frame decoding.

use crate::error::ParseError;
use crate::types::{LightMode, PowerState, RgbColor};

/// Fixed size of the status frame a light sends after a status query.
pub const STATUS_RESPONSE_LEN: usize = 14;

/// Offset of the power code (`0x23` means on).
pub const POWER_OFFSET: usize = 2;
/// Offset of the mode code.
pub const MODE_OFFSET: usize = 3;
/// Offset of the red channel.
pub const RED_OFFSET: usize = 6;
/// Offset of the green channel.
pub const GREEN_OFFSET: usize = 7;
/// Offset of the blue channel.
pub const BLUE_OFFSET: usize = 8;

/// Decoded status frame.
///
/// Decoding never fails on content: unknown power codes read as off,
/// unknown mode codes as [`LightMode::Unknown`]. Only a frame shorter than
/// [`STATUS_RESPONSE_LEN`] is rejected.
///
/// # Examples
///
/// ```
/// use magichome_lib::response::StatusResponse;
/// use magichome_lib::types::{LightMode, PowerState, RgbColor};
///
/// let frame = [
///     0x81, 0x44, 0x23, 0x61, 0x21, 0x10, 0xff, 0x80, 0x00, 0x00, 0x04, 0x00, 0x0f, 0x00,
/// ];
/// let status = StatusResponse::parse(&frame).unwrap();
/// assert_eq!(status.power(), PowerState::On);
/// assert_eq!(status.mode(), LightMode::Color);
/// assert_eq!(status.color(), RgbColor::new(0xff, 0x80, 0x00));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResponse {
    power: PowerState,
    mode: LightMode,
    color: RgbColor,
    raw: [u8; STATUS_RESPONSE_LEN],
}

impl StatusResponse {
    /// Decodes a status frame.
    ///
    /// Bytes beyond [`STATUS_RESPONSE_LEN`] are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::TooShort` if fewer than 14 bytes are given.
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let raw: [u8; STATUS_RESPONSE_LEN] = bytes
            .get(..STATUS_RESPONSE_LEN)
            .and_then(|head| head.try_into().ok())
            .ok_or(ParseError::TooShort {
                expected: STATUS_RESPONSE_LEN,
                actual: bytes.len(),
            })?;

        let power = PowerState::from_status_code(raw[POWER_OFFSET]);
        let mode = LightMode::from_code(raw[MODE_OFFSET]);
        let color = color_for_mode(mode, &raw);

        Ok(Self {
            power,
            mode,
            color,
            raw,
        })
    }

    /// Returns the decoded power state.
    #[must_use]
    pub fn power(&self) -> PowerState {
        self.power
    }

    /// Returns `true` if the light reported itself on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.power.is_on()
    }

    /// Returns the decoded mode.
    #[must_use]
    pub fn mode(&self) -> LightMode {
        self.mode
    }

    /// Returns the decoded color.
    ///
    /// Only meaningful when [`mode`](Self::mode) is [`LightMode::Color`].
    #[must_use]
    pub fn color(&self) -> RgbColor {
        self.color
    }

    /// Returns the undecoded frame.
    #[must_use]
    pub fn raw(&self) -> &[u8; STATUS_RESPONSE_LEN] {
        &self.raw
    }
}

/// Picks the color reported for a mode.
///
/// Color mode reads the RGB bytes, white mode reports white, and every
/// other mode reports [`RgbColor::TRANSPARENT`].
#[must_use]
pub fn color_for_mode(mode: LightMode, frame: &[u8; STATUS_RESPONSE_LEN]) -> RgbColor {
    match mode {
        LightMode::Color => RgbColor::new(frame[RED_OFFSET], frame[GREEN_OFFSET], frame[BLUE_OFFSET]),
        LightMode::White => RgbColor::WHITE,
        LightMode::Custom | LightMode::Preset | LightMode::Unknown => RgbColor::TRANSPARENT,
    }
}
