// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static color command.

use crate::command::Command;
use crate::types::RgbColor;

/// Command to set a static RGB color.
///
/// The warm-white byte and the write mask are fixed (`00 00 0F`).
///
/// # Examples
///
/// ```
/// use magichome_lib::command::{ColorCommand, Command};
/// use magichome_lib::types::RgbColor;
///
/// let cmd = ColorCommand::new(RgbColor::new(1, 2, 3));
/// assert_eq!(cmd.payload(), vec![0x41, 1, 2, 3, 0x00, 0x00, 0x0f]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCommand {
    color: RgbColor,
}

impl ColorCommand {
    const OPCODE: u8 = 0x41;

    /// Creates a command for the given color.
    #[must_use]
    pub const fn new(color: RgbColor) -> Self {
        Self { color }
    }

    /// Returns the requested color.
    #[must_use]
    pub const fn color(&self) -> RgbColor {
        self.color
    }
}

impl Command for ColorCommand {
    fn payload(&self) -> Vec<u8> {
        let (r, g, b) = self.color.to_tuple();
        vec![Self::OPCODE, r, g, b, 0x00, 0x00, 0x0f]
    }
}
