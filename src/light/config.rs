// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for a [`Light`](super::Light).

use std::time::Duration;

use crate::protocol::DEFAULT_PORT;

/// Configuration for a Magic Home light.
///
/// Holds connection parameters and the initial values of the runtime
/// settings. `use_checksum`, the receive timeout, and the auto-refresh flag
/// can still be changed on the light afterwards; the auto-refresh interval
/// is fixed once the light connects.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use magichome_lib::LightConfig;
///
/// let config = LightConfig::new("192.168.1.42")
///     .with_receive_timeout(Duration::from_millis(500))
///     .with_auto_refresh(true)
///     .with_auto_refresh_interval(Duration::from_secs(10));
///
/// assert_eq!(config.address(), Some("192.168.1.42"));
/// assert_eq!(config.port(), 5577);
/// assert!(config.use_checksum());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightConfig {
    address: Option<String>,
    port: u16,
    use_checksum: bool,
    receive_timeout: Duration,
    connect_timeout: Option<Duration>,
    auto_refresh_enabled: bool,
    auto_refresh_interval: Duration,
}

impl LightConfig {
    /// Default bound on a single read.
    pub const DEFAULT_RECEIVE_TIMEOUT: Duration = Duration::from_secs(1);
    /// Default period of the auto-refresh scheduler.
    pub const DEFAULT_AUTO_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

    /// Creates a configuration for the light at `address`.
    ///
    /// `address` is a hostname or IP address without a port.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Self::default()
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables or disables the trailing checksum byte on outgoing frames.
    #[must_use]
    pub fn with_checksum(mut self, use_checksum: bool) -> Self {
        self.use_checksum = use_checksum;
        self
    }

    /// Sets the bound on a single read.
    #[must_use]
    pub fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = timeout;
        self
    }

    /// Sets a bound on the TCP connect. Without one the OS default applies.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Enables or disables periodic refreshes.
    #[must_use]
    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh_enabled = enabled;
        self
    }

    /// Sets the auto-refresh period.
    #[must_use]
    pub fn with_auto_refresh_interval(mut self, interval: Duration) -> Self {
        self.auto_refresh_interval = interval;
        self
    }

    /// Returns the address, if set.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether frames carry a checksum.
    #[must_use]
    pub fn use_checksum(&self) -> bool {
        self.use_checksum
    }

    /// Returns the receive timeout.
    #[must_use]
    pub fn receive_timeout(&self) -> Duration {
        self.receive_timeout
    }

    /// Returns the connect timeout, if set.
    #[must_use]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// Returns whether auto-refresh starts enabled.
    #[must_use]
    pub fn auto_refresh_enabled(&self) -> bool {
        self.auto_refresh_enabled
    }

    /// Returns the auto-refresh period.
    #[must_use]
    pub fn auto_refresh_interval(&self) -> Duration {
        self.auto_refresh_interval
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: DEFAULT_PORT,
            use_checksum: true,
            receive_timeout: Self::DEFAULT_RECEIVE_TIMEOUT,
            connect_timeout: None,
            auto_refresh_enabled: false,
            auto_refresh_interval: Self::DEFAULT_AUTO_REFRESH_INTERVAL,
        }
    }
}
