// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TCP transport for Magic Home controllers.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::{Error, ProtocolError};
use crate::protocol::frame::hex;
use crate::response::STATUS_RESPONSE_LEN;

/// A single TCP connection to one light.
///
/// The client does no framing of its own: callers hand it finished frames
/// and decode what comes back. A connection is attempted exactly once; there
/// is no retry.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use magichome_lib::command::{Command, StatusQuery};
/// use magichome_lib::protocol::TcpClient;
///
/// # async fn example() -> magichome_lib::Result<()> {
/// let mut client = TcpClient::connect("192.168.1.42", 5577, None).await?;
/// let reply = client
///     .request(&StatusQuery.to_frame(true), Duration::from_secs(1))
///     .await?;
/// client.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TcpClient {
    address: String,
    stream: Option<TcpStream>,
}

impl TcpClient {
    /// Opens a connection to `address:port`.
    ///
    /// Without `connect_timeout` the operating system's connect timeout
    /// applies.
    ///
    /// # Errors
    ///
    /// Returns `Error::Connection` naming `address` if the light cannot be
    /// reached or the timeout elapses.
    pub async fn connect(
        address: &str,
        port: u16,
        connect_timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        tracing::debug!(address = %address, port, "Connecting to light");

        let connecting = TcpStream::connect((address, port));
        let result = match connect_timeout {
            Some(limit) => match tokio::time::timeout(limit, connecting).await {
                Ok(result) => result.map_err(|e| e.to_string()),
                Err(_) => Err(format!("timed out after {} ms", duration_ms(limit))),
            },
            None => connecting.await.map_err(|e| e.to_string()),
        };

        let stream = result.map_err(|reason| Error::Connection {
            address: address.to_string(),
            reason,
        })?;

        // Small frames, request/response: disable Nagle.
        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!(address = %address, error = %e, "Could not set TCP_NODELAY");
        }

        Ok(Self {
            address: address.to_string(),
            stream: Some(stream),
        })
    }

    /// Returns the address this client was opened with.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns `true` until [`close`](Self::close) is called.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Writes one frame to the light.
    ///
    /// Not bounded by the receive timeout.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Io` if the write fails, or
    /// `ProtocolError::ConnectionClosed` after [`close`](Self::close).
    pub async fn send(&mut self, frame: &[u8]) -> Result<(), ProtocolError> {
        let stream = self.stream.as_mut().ok_or(ProtocolError::ConnectionClosed)?;

        tracing::debug!(address = %self.address, frame = %hex(frame), "Sending frame");

        stream.write_all(frame).await?;
        stream.flush().await?;
        Ok(())
    }

    /// Reads one response buffer from the light.
    ///
    /// Performs a single read of at most [`STATUS_RESPONSE_LEN`] bytes and
    /// returns exactly what arrived. A short read is not an error here.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Timeout` if nothing arrives within `timeout`,
    /// `ProtocolError::ConnectionClosed` if the light closed the stream, or
    /// `ProtocolError::Io` on socket failure.
    pub async fn receive(&mut self, timeout: Duration) -> Result<Vec<u8>, ProtocolError> {
        let stream = self.stream.as_mut().ok_or(ProtocolError::ConnectionClosed)?;

        let mut buffer = [0u8; STATUS_RESPONSE_LEN];
        let read = tokio::time::timeout(timeout, stream.read(&mut buffer))
            .await
            .map_err(|_| ProtocolError::Timeout(duration_ms(timeout)))??;

        if read == 0 {
            return Err(ProtocolError::ConnectionClosed);
        }

        tracing::debug!(
            address = %self.address,
            len = read,
            bytes = %hex(&buffer[..read]),
            "Received response"
        );

        Ok(buffer[..read].to_vec())
    }

    /// Sends a frame and reads the reply.
    ///
    /// # Errors
    ///
    /// Returns any error from [`send`](Self::send) or [`receive`](Self::receive).
    pub async fn request(
        &mut self,
        frame: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, ProtocolError> {
        self.send(frame).await?;
        self.receive(timeout).await
    }

    /// Shuts the connection down. Safe to call more than once.
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown().await {
                tracing::debug!(address = %self.address, error = %e, "Shutdown failed");
            }
            tracing::debug!(address = %self.address, "Connection closed");
        }
    }
}

// Safe: timeouts in practical use never exceed u64::MAX milliseconds
#[allow(clippy::cast_possible_truncation)]
fn duration_ms(duration: Duration) -> u64 {
    duration.as_millis() as u64
}
