// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire framing for Magic Home commands.
//!
//! A frame is the command payload followed by an optional one-byte checksum.
//! There is no length prefix and no start or stop marker.

/// Returns the low 8 bits of the sum of all bytes.
///
/// # Examples
///
/// ```
/// use magichome_lib::protocol::checksum;
///
/// assert_eq!(checksum(&[1, 2, 3]), 6);
/// assert_eq!(checksum(&[0xff, 0x02]), 0x01);
/// assert_eq!(checksum(&[]), 0);
/// ```
#[must_use]
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, b| sum.wrapping_add(*b))
}

/// Builds the bytes written to the wire for a payload.
///
/// With `use_checksum` the payload is followed by [`checksum`] of the
/// payload; otherwise it is returned unchanged.
///
/// # Examples
///
/// ```
/// use magichome_lib::protocol::frame;
///
/// assert_eq!(frame(&[1, 2, 3], true), vec![1, 2, 3, 6]);
/// assert_eq!(frame(&[1, 2, 3], false), vec![1, 2, 3]);
/// ```
#[must_use]
pub fn frame(bytes: &[u8], use_checksum: bool) -> Vec<u8> {
    let mut framed = Vec::with_capacity(bytes.len() + 1);
    framed.extend_from_slice(bytes);
    if use_checksum {
        framed.push(checksum(bytes));
    }
    framed
}

/// Formats bytes as space-separated uppercase hex for log output.
pub(crate) fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
