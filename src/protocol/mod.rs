// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire protocol for Magic Home controllers.
//!
//! Controllers listen on TCP port [`DEFAULT_PORT`] and speak a small binary
//! protocol: each command is a short byte sequence, optionally followed by
//! a checksum byte (see [`frame`]), and a status query is answered with a
//! fixed 14-byte frame.
//!
//! - [`checksum`] / [`frame`]: the framing rule
//! - [`TcpClient`]: one connection, send and timed receive

pub(crate) mod frame;
mod tcp;

pub use frame::{checksum, frame};
pub use tcp::TcpClient;

/// Control port every Magic Home controller listens on.
pub const DEFAULT_PORT: u16 = 5577;
