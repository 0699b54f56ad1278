// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Magic Home command definitions.
//!
//! This module provides typed representations of the binary commands
//! understood by Magic Home controllers.
//!
//! # Available Commands
//!
//! | Command Type | Purpose | Payload |
//! |-------------|---------|---------|
//! | [`PowerCommand`] | Switch the light on or off | `71 23 0F` / `71 24 0F` |
//! | [`ColorCommand`] | Set a static RGB color | `41 R G B 00 00 0F` |
//! | [`StatusQuery`] | Request a 14-byte status frame | `81 8A 8B` |
//!
//! # Examples
//!
//! ```
//! use magichome_lib::command::{ColorCommand, Command, PowerCommand};
//! use magichome_lib::types::RgbColor;
//!
//! assert_eq!(PowerCommand::On.payload(), vec![0x71, 0x23, 0x0f]);
//! assert_eq!(PowerCommand::On.to_frame(true), vec![0x71, 0x23, 0x0f, 0xa3]);
//!
//! let cmd = ColorCommand::new(RgbColor::new(255, 0, 0));
//! assert_eq!(cmd.to_frame(false), vec![0x41, 0xff, 0x00, 0x00, 0x00, 0x00, 0x0f]);
//! ```

mod color;
mod power;
mod status;

pub use color::ColorCommand;
pub use power::PowerCommand;
pub use status::StatusQuery;

use crate::protocol::frame;

/// A command that can be sent to a Magic Home light.
pub trait Command {
    /// Returns the unframed command bytes.
    fn payload(&self) -> Vec<u8>;

    /// Returns the bytes written to the wire, with the trailing checksum
    /// appended when `use_checksum` is set.
    fn to_frame(&self, use_checksum: bool) -> Vec<u8> {
        frame(&self.payload(), use_checksum)
    }
}
