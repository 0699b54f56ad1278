// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power control command.

use crate::command::Command;
use crate::types::PowerState;

/// Command to switch the light on or off.
///
/// # Examples
///
/// ```
/// use magichome_lib::command::{Command, PowerCommand};
/// use magichome_lib::types::PowerState;
///
/// let cmd = PowerCommand::from(PowerState::Off);
/// assert_eq!(cmd.payload(), vec![0x71, 0x24, 0x0f]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerCommand {
    /// Turn the light on.
    On,
    /// Turn the light off.
    Off,
}

impl PowerCommand {
    const OPCODE: u8 = 0x71;
    const TERMINATOR: u8 = 0x0f;

    /// Returns the power state this command requests.
    #[must_use]
    pub const fn state(&self) -> PowerState {
        match self {
            Self::On => PowerState::On,
            Self::Off => PowerState::Off,
        }
    }
}

impl From<PowerState> for PowerCommand {
    fn from(state: PowerState) -> Self {
        match state {
            PowerState::On => Self::On,
            PowerState::Off => Self::Off,
        }
    }
}

impl Command for PowerCommand {
    fn payload(&self) -> Vec<u8> {
        vec![Self::OPCODE, self.state().code(), Self::TERMINATOR]
    }
}
