// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `MagicHome` Lib - A Rust library to control Magic Home LED controllers.
//!
//! Magic Home (also sold as Flux LED) Wi-Fi controllers listen on TCP port
//! 5577 and speak a small binary protocol. This library keeps one connection
//! per light, mirrors its state locally, and exposes async APIs on top.
//!
//! # Supported Features
//!
//! - **Power control**: Turn lights on/off
//! - **Color control**: Static RGB colors
//! - **Status queries**: Power, mode and color read back from the light
//! - **Restore**: Return to the color and power found at connect time
//! - **Auto-refresh**: Optional periodic status polling
//! - **Subscriptions**: Callbacks on state changes
//!
//! # Quick Start
//!
//! ```no_run
//! use magichome_lib::{Light, RgbColor};
//!
//! #[tokio::main]
//! async fn main() -> magichome_lib::Result<()> {
//!     let light = Light::with_address("192.168.1.42");
//!     light.connect().await?;
//!
//!     light.turn_on().await?;
//!     light.set_color(RgbColor::BLUE).await?;
//!     println!("Light is {} in {} mode", light.power(), light.mode());
//!
//!     light.restore().await?;
//!     light.disconnect().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Configured Light with Auto-Refresh
//!
//! ```no_run
//! use std::time::Duration;
//! use magichome_lib::{Light, LightConfig, Subscribable};
//!
//! #[tokio::main]
//! async fn main() -> magichome_lib::Result<()> {
//!     let config = LightConfig::new("192.168.1.42")
//!         .with_receive_timeout(Duration::from_millis(500))
//!         .with_auto_refresh(true)
//!         .with_auto_refresh_interval(Duration::from_secs(10));
//!
//!     let light = Light::from_config(config);
//!     light.on_power_changed(|state| println!("Light is now {state}"));
//!     light.on_refresh_failed(|error| eprintln!("Refresh failed: {error}"));
//!
//!     light.connect().await?;
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod error;
mod light;
pub mod protocol;
pub mod response;
pub mod state;
pub mod subscription;
pub mod types;

pub use command::{ColorCommand, Command, PowerCommand, StatusQuery};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use light::{Light, LightConfig};
pub use protocol::{DEFAULT_PORT, TcpClient};
pub use response::StatusResponse;
pub use state::{LightState, StateChange};
pub use subscription::{CallbackRegistry, Subscribable, SubscriptionId};
pub use types::{LightMode, PowerState, RgbColor};
