// SPDX-License-Identifier: MPL-2.0

//! Console program: connect to a light, cycle a few colors, then restore it.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example console -- [address] [#RRGGBB ...]
//! ```
//!
//! Without an address on the command line the program prompts for one.
//! Colors default to red, green and blue.
//! Set `RUST_LOG=magichome_lib=debug` to see every frame on the wire.

use std::env;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use magichome_lib::{Light, RgbColor, Subscribable};
use tracing_subscriber::EnvFilter;

fn prompt_address() -> io::Result<String> {
    print!("Light IP address: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = env::args().skip(1);
    let address = match args.next() {
        Some(address) => address,
        None => prompt_address()?,
    };
    if address.is_empty() {
        eprintln!("No address given");
        std::process::exit(1);
    }

    let mut colors = args
        .map(|arg| arg.parse::<RgbColor>())
        .collect::<Result<Vec<_>, _>>()?;
    if colors.is_empty() {
        colors = vec![RgbColor::RED, RgbColor::GREEN, RgbColor::BLUE];
    }

    let light = Light::with_address(&address);
    light.on_state_changed(|change| println!("  change: {change:?}"));

    println!("Connecting to {address}...");
    light.connect().await?;
    println!("Connected!");
    println!("{}", serde_json::to_string_pretty(&light.state())?);

    println!("Turning on the light...");
    light.turn_on().await?;

    for color in colors {
        println!("Setting color {color}...");
        light.set_color(color).await?;
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    println!("Refreshing...");
    let status = light.refresh().await?;
    println!("Light reports {} / {} / {}", status.power(), status.mode(), status.color());

    println!("Restoring initial state...");
    light.restore().await?;

    println!("Disconnecting...");
    light.disconnect().await;

    println!("Done!");
    Ok(())
}
