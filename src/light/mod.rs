// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level light abstraction.
//!
//! A [`Light`] owns one TCP connection to one Magic Home controller and a
//! local mirror of its state. The mirror is written from the device only by
//! [`Light::refresh`]; power and color commands update it optimistically,
//! without reading anything back.
//!
//! # Lifecycle
//!
//! ```text
//! Disconnected --connect ok--> Connected --disconnect--> Disposed
//!      ^    |
//!      +----+ connect failed
//! ```
//!
//! A failed command does not mark the light disconnected. Once disconnected
//! a light cannot be reconnected; create a new one.
//!
//! # Concurrency
//!
//! The foreground caller and the auto-refresh scheduler share the transport.
//! Every transport use holds an async mutex for its whole send/receive
//! exchange, so a command can never interleave with a scheduled refresh.
//! Across operations there is no ordering beyond what the caller imposes.
//!
//! A reply that arrives after its read timed out, or the rest of a reply
//! that was cut short, stays in the socket. The next refresh reads those
//! bytes first and decodes a misaligned frame. Nothing resynchronizes the
//! stream; disconnect and use a new light if a refresh times out.

mod auto_refresh;
mod config;

pub use config::LightConfig;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};

use crate::command::{ColorCommand, Command, PowerCommand, StatusQuery};
use crate::error::Error;
use crate::protocol::TcpClient;
use crate::response::StatusResponse;
use crate::state::{LightState, StateChange};
use crate::subscription::{CallbackRegistry, Subscribable, SubscriptionId};
use crate::types::{LightMode, PowerState, RgbColor};

use auto_refresh::AutoRefresh;

/// State captured right after the first refresh following connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    color: RgbColor,
    power: PowerState,
}

/// State shared between a [`Light`] and its scheduler task.
#[derive(Debug)]
pub(crate) struct Shared {
    port: u16,
    connect_timeout: Option<Duration>,
    auto_refresh_interval: Duration,
    use_checksum: AtomicBool,
    receive_timeout: RwLock<Duration>,
    auto_refresh_enabled: AtomicBool,
    disposed: AtomicBool,
    client: tokio::sync::Mutex<Option<TcpClient>>,
    state: RwLock<LightState>,
    snapshot: RwLock<Option<Snapshot>>,
    callbacks: CallbackRegistry,
}

impl Shared {
    fn address(&self) -> Option<String> {
        self.state.read().address().map(str::to_string)
    }

    fn frame(&self, command: &impl Command) -> Vec<u8> {
        command.to_frame(self.use_checksum.load(Ordering::Relaxed))
    }

    /// Applies a change to the mirror and notifies subscribers of what
    /// actually changed. The state lock is released before dispatch.
    fn update(&self, change: &StateChange) {
        let applied = self.state.write().apply_diff(change);
        for change in &applied {
            self.callbacks.dispatch(change);
        }
    }

    fn ensure_usable(&self) -> Result<(), Error> {
        if self.disposed.load(Ordering::Acquire) {
            Err(Error::Disposed)
        } else {
            Ok(())
        }
    }

    /// Queries the light and overwrites power, mode and color.
    async fn refresh(&self) -> Result<StatusResponse, Error> {
        self.ensure_usable()?;
        let mut guard = self.client.lock().await;
        let client = guard.as_mut().ok_or(Error::NotConnected)?;
        self.refresh_with(client).await
    }

    async fn refresh_with(&self, client: &mut TcpClient) -> Result<StatusResponse, Error> {
        let frame = self.frame(&StatusQuery);
        let timeout = *self.receive_timeout.read();

        let bytes = client.request(&frame, timeout).await?;
        let status = StatusResponse::parse(&bytes)?;

        tracing::debug!(
            address = %client.address(),
            power = %status.power(),
            mode = %status.mode(),
            color = %status.color(),
            "Refreshed light state"
        );

        self.update(&StateChange::from_status(&status));
        Ok(status)
    }

    /// Sends a command without reading a reply.
    async fn send(&self, command: &impl Command) -> Result<(), Error> {
        self.ensure_usable()?;
        let frame = self.frame(command);
        let mut guard = self.client.lock().await;
        let client = guard.as_mut().ok_or(Error::NotConnected)?;
        client.send(&frame).await?;
        Ok(())
    }
}

/// A Magic Home light controller.
///
/// # Examples
///
/// ```no_run
/// use magichome_lib::{Light, RgbColor};
///
/// # async fn example() -> magichome_lib::Result<()> {
/// let light = Light::with_address("192.168.1.42");
/// light.connect().await?;
///
/// light.turn_on().await?;
/// light.set_color(RgbColor::RED).await?;
///
/// // Back to how the light was when we connected
/// light.restore().await?;
/// light.disconnect().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Light {
    shared: Arc<Shared>,
    scheduler: Mutex<Option<AutoRefresh>>,
}

impl Light {
    /// Creates a disconnected light with default settings and no address.
    ///
    /// Use [`connect_to`](Self::connect_to) to connect it.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(LightConfig::default())
    }

    /// Creates a disconnected light for `address` with default settings.
    #[must_use]
    pub fn with_address(address: impl Into<String>) -> Self {
        Self::from_config(LightConfig::new(address))
    }

    /// Creates a disconnected light from a configuration.
    #[must_use]
    pub fn from_config(config: LightConfig) -> Self {
        let mut state = LightState::new();
        if let Some(address) = config.address() {
            state.set_address(address);
        }

        let shared = Shared {
            port: config.port(),
            connect_timeout: config.connect_timeout(),
            auto_refresh_interval: config.auto_refresh_interval(),
            use_checksum: AtomicBool::new(config.use_checksum()),
            receive_timeout: RwLock::new(config.receive_timeout()),
            auto_refresh_enabled: AtomicBool::new(config.auto_refresh_enabled()),
            disposed: AtomicBool::new(false),
            client: tokio::sync::Mutex::new(None),
            state: RwLock::new(state),
            snapshot: RwLock::new(None),
            callbacks: CallbackRegistry::new(),
        };

        Self {
            shared: Arc::new(shared),
            scheduler: Mutex::new(None),
        }
    }

    // ========== Lifecycle ==========

    /// Connects to the configured address.
    ///
    /// See [`connect_to`](Self::connect_to).
    ///
    /// # Errors
    ///
    /// Returns `Error::NoAddress` if no address was configured, otherwise
    /// any error from [`connect_to`](Self::connect_to).
    pub async fn connect(&self) -> Result<(), Error> {
        let address = self.shared.address().ok_or(Error::NoAddress)?;
        self.connect_to(&address).await
    }

    /// Connects to the light at `address`.
    ///
    /// Opens the TCP connection (one attempt, no retry), refreshes the
    /// state, captures the snapshot used by [`restore`](Self::restore), and
    /// starts the auto-refresh scheduler. If the first refresh fails the
    /// connection is closed again and the light stays disconnected.
    ///
    /// # Errors
    ///
    /// Returns `Error::Connection` naming `address` if it cannot be reached,
    /// `Error::AlreadyConnected` or `Error::Disposed` on misuse, or the
    /// error of the first refresh. A [`disconnect`](Self::disconnect) that
    /// races the handshake wins: the new connection is closed and
    /// `Error::Disposed` returned.
    pub async fn connect_to(&self, address: &str) -> Result<(), Error> {
        let shared = &self.shared;
        shared.ensure_usable()?;

        let mut guard = shared.client.lock().await;
        shared.ensure_usable()?;
        if guard.is_some() {
            return Err(Error::AlreadyConnected);
        }

        let mut client = TcpClient::connect(address, shared.port, shared.connect_timeout).await?;

        let status = match shared.refresh_with(&mut client).await {
            Ok(status) => status,
            Err(error) => {
                client.close().await;
                tracing::warn!(address = %address, error = %error, "Initial refresh failed");
                return Err(error);
            }
        };

        // Disconnected while the handshake was in flight
        if let Err(error) = shared.ensure_usable() {
            client.close().await;
            return Err(error);
        }

        {
            let mut state = shared.state.write();
            state.set_address(address);
            state.set_connected(true);
        }
        *shared.snapshot.write() = Some(Snapshot {
            color: status.color(),
            power: status.power(),
        });
        *guard = Some(client);

        // Installed under the client lock so `disconnect` always sees it.
        *self.scheduler.lock() = Some(AutoRefresh::start(
            Arc::downgrade(&self.shared),
            shared.auto_refresh_interval,
        ));
        drop(guard);

        tracing::info!(
            address = %address,
            power = %status.power(),
            mode = %status.mode(),
            "Connected to light"
        );
        Ok(())
    }

    /// Closes the connection and stops the scheduler.
    ///
    /// The light cannot be used afterwards. Safe to call more than once.
    pub async fn disconnect(&self) {
        self.shared.disposed.store(true, Ordering::Release);

        let client = {
            let mut guard = self.shared.client.lock().await;
            self.scheduler.lock().take();
            guard.take()
        };
        let Some(mut client) = client else {
            return;
        };
        client.close().await;

        self.shared.state.write().set_connected(false);
        tracing::info!(address = %client.address(), "Disconnected from light");
        self.shared.callbacks.dispatch_disconnected();
    }

    // ========== Status ==========

    /// Queries the light and overwrites power, mode and color from its reply.
    ///
    /// This is the only operation that reads state from the device.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotConnected` or `Error::Disposed` on misuse, a
    /// protocol error on transport failure or timeout, or a parse error if
    /// the reply is shorter than a status frame.
    pub async fn refresh(&self) -> Result<StatusResponse, Error> {
        self.shared.refresh().await
    }

    // ========== Power Control ==========

    /// Switches the light on or off.
    ///
    /// The mirrored power state is updated once the command is sent,
    /// without confirming with the device.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be sent.
    pub async fn set_power(&self, state: impl Into<PowerState>) -> Result<(), Error> {
        let state = state.into();
        self.shared.send(&PowerCommand::from(state)).await?;
        self.shared.update(&StateChange::Power(state));
        Ok(())
    }

    /// Turns the light on.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be sent.
    pub async fn turn_on(&self) -> Result<(), Error> {
        self.set_power(PowerState::On).await
    }

    /// Turns the light off.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be sent.
    pub async fn turn_off(&self) -> Result<(), Error> {
        self.set_power(PowerState::Off).await
    }

    // ========== Color ==========

    /// Sets a static color.
    ///
    /// The mirrored color and mode ([`LightMode::Color`]) are updated once
    /// the command is sent, without confirming with the device.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be sent.
    pub async fn set_color(&self, color: RgbColor) -> Result<(), Error> {
        self.shared.send(&ColorCommand::new(color)).await?;
        self.shared.update(&StateChange::color_set(color));
        Ok(())
    }

    /// Sets a static color from its channels.
    ///
    /// # Errors
    ///
    /// Returns error if the command cannot be sent.
    pub async fn set_rgb(&self, red: u8, green: u8, blue: u8) -> Result<(), Error> {
        self.set_color(RgbColor::new(red, green, blue)).await
    }

    /// Replays the state captured at connect: its color, then its power.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoSnapshot` if the light never connected, or any
    /// error from the two commands.
    pub async fn restore(&self) -> Result<(), Error> {
        let snapshot = (*self.shared.snapshot.read()).ok_or(Error::NoSnapshot)?;
        self.set_color(snapshot.color).await?;
        self.set_power(snapshot.power).await
    }

    // ========== Accessors ==========

    /// Returns a copy of the mirrored state.
    #[must_use]
    pub fn state(&self) -> LightState {
        self.shared.state.read().clone()
    }

    /// Returns the light's address, if known.
    #[must_use]
    pub fn address(&self) -> Option<String> {
        self.shared.address()
    }

    /// Returns the TCP port used to connect.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.shared.port
    }

    /// Returns `true` while the light holds an open connection.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.shared.state.read().is_connected()
    }

    /// Returns the mirrored power state.
    #[must_use]
    pub fn power(&self) -> PowerState {
        self.shared.state.read().power()
    }

    /// Returns `true` if the light is mirrored as on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.power().is_on()
    }

    /// Returns the mirrored color.
    ///
    /// Only meaningful while [`mode`](Self::mode) is [`LightMode::Color`].
    #[must_use]
    pub fn color(&self) -> RgbColor {
        self.shared.state.read().color()
    }

    /// Returns the mirrored mode.
    #[must_use]
    pub fn mode(&self) -> LightMode {
        self.shared.state.read().mode()
    }

    /// Returns the color captured at connect.
    #[must_use]
    pub fn initial_color(&self) -> Option<RgbColor> {
        self.shared.snapshot.read().map(|s| s.color)
    }

    /// Returns the power state captured at connect.
    #[must_use]
    pub fn initial_power(&self) -> Option<PowerState> {
        self.shared.snapshot.read().map(|s| s.power)
    }

    // ========== Settings ==========

    /// Returns whether outgoing frames carry a checksum.
    #[must_use]
    pub fn use_checksum(&self) -> bool {
        self.shared.use_checksum.load(Ordering::Relaxed)
    }

    /// Enables or disables the trailing checksum byte.
    pub fn set_use_checksum(&self, use_checksum: bool) {
        self.shared
            .use_checksum
            .store(use_checksum, Ordering::Relaxed);
    }

    /// Returns the bound on a single read.
    #[must_use]
    pub fn receive_timeout(&self) -> Duration {
        *self.shared.receive_timeout.read()
    }

    /// Sets the bound on a single read.
    pub fn set_receive_timeout(&self, timeout: Duration) {
        *self.shared.receive_timeout.write() = timeout;
    }

    /// Returns whether scheduled refreshes run.
    #[must_use]
    pub fn auto_refresh_enabled(&self) -> bool {
        self.shared.auto_refresh_enabled.load(Ordering::Relaxed)
    }

    /// Enables or disables scheduled refreshes.
    ///
    /// The scheduler keeps ticking either way; this only gates its action.
    pub fn set_auto_refresh_enabled(&self, enabled: bool) {
        self.shared
            .auto_refresh_enabled
            .store(enabled, Ordering::Relaxed);
    }

    /// Returns the auto-refresh period.
    #[must_use]
    pub fn auto_refresh_interval(&self) -> Duration {
        self.shared.auto_refresh_interval
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new()
    }
}

// ========== Subscriptions ==========

impl Subscribable for Light {
    fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PowerState) + Send + Sync + 'static,
    {
        self.shared.callbacks.on_power_changed(callback)
    }

    fn on_color_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(RgbColor) + Send + Sync + 'static,
    {
        self.shared.callbacks.on_color_changed(callback)
    }

    fn on_mode_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(LightMode) + Send + Sync + 'static,
    {
        self.shared.callbacks.on_mode_changed(callback)
    }

    fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static,
    {
        self.shared.callbacks.on_state_changed(callback)
    }

    fn on_refresh_failed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Error) + Send + Sync + 'static,
    {
        self.shared.callbacks.on_refresh_failed(callback)
    }

    fn on_disconnected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.shared.callbacks.on_disconnected(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.callbacks.unsubscribe(id)
    }
}
