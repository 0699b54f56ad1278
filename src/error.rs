// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `MagicHome` library.
//!
//! This module provides the error hierarchy for failures across the library:
//! value validation, transport communication, status frame decoding, and
//! light lifecycle misuse.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when talking to
/// a Magic Home controller.
#[derive(Debug, Error)]
pub enum Error {
    /// The light could not be reached.
    ///
    /// Returned by `connect` when the TCP connection cannot be established.
    /// The attempt is never retried.
    #[error("not able to connect to light at {address}: {reason}")]
    Connection {
        /// The address that was dialed.
        address: String,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred on the transport after connecting.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while decoding a status frame.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The light has no open connection.
    #[error("light is not connected")]
    NotConnected,

    /// `connect` was called on a light that is already connected.
    #[error("light is already connected")]
    AlreadyConnected,

    /// The light was disconnected and cannot be used again.
    #[error("light has been disconnected and cannot be reused")]
    Disposed,

    /// `connect` was called without any address to dial.
    #[error("no address configured for light")]
    NoAddress,

    /// `restore` was called before a state snapshot was captured.
    #[error("no initial state captured; connect before restoring")]
    NoSnapshot,
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A hex color string could not be parsed.
    #[error("invalid hex color: {0}")]
    InvalidHexColor(String),
}

/// Errors related to the TCP transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Reading from or writing to the socket failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No response arrived within the receive timeout.
    #[error("read timed out after {0} ms")]
    Timeout(u64),

    /// The light closed the connection.
    #[error("connection closed by light")]
    ConnectionClosed,
}

/// Errors related to decoding status frames.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer bytes were received than the fixed status frame size.
    #[error("status response too short: expected {expected} bytes, got {actual}")]
    TooShort {
        /// Required frame length.
        expected: usize,
        /// Number of bytes actually received.
        actual: usize,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
