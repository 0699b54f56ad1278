// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response decoding for Magic Home lights.
//!
//! The only reply the library reads is the 14-byte status frame; see
//! [`StatusResponse`] for its layout.

mod status;

pub use status::{
    BLUE_OFFSET, GREEN_OFFSET, MODE_OFFSET, POWER_OFFSET, RED_OFFSET, STATUS_RESPONSE_LEN,
    StatusResponse, color_for_mode,
};
