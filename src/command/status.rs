// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status query command.

use crate::command::Command;

/// Asks the light to reply with a 14-byte status frame.
///
/// The reply is decoded by [`StatusResponse`](crate::response::StatusResponse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusQuery;

impl Command for StatusQuery {
    fn payload(&self) -> Vec<u8> {
        vec![0x81, 0x8a, 0x8b]
    }
}
