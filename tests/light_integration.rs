// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for `Light` against a fake controller on localhost.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use magichome_lib::protocol::checksum;
use magichome_lib::{
    Error, Light, LightConfig, LightMode, ParseError, PowerState, ProtocolError, RgbColor,
    StateChange, Subscribable,
};
use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// ============================================================================
// Fake controller
// ============================================================================

const QUERY: [u8; 3] = [0x81, 0x8a, 0x8b];

/// Builds a 14-byte status reply.
fn status(power: u8, mode: u8, red: u8, green: u8, blue: u8) -> Vec<u8> {
    let mut bytes = vec![
        0x81, 0x04, power, mode, 0x01, 0x10, red, green, blue, 0x00, 0x06, 0x00, 0x00,
    ];
    bytes.push(checksum(&bytes));
    bytes
}

fn with_checksum(payload: &[u8]) -> Vec<u8> {
    let mut bytes = payload.to_vec();
    bytes.push(checksum(payload));
    bytes
}

/// Minimal Magic Home controller.
///
/// Records every byte it receives and answers each status query with the
/// current reply. With no reply set it stays silent.
struct FakeLight {
    port: u16,
    received: Arc<Mutex<Vec<u8>>>,
    reply: Arc<Mutex<Option<Vec<u8>>>>,
    queries: Arc<AtomicUsize>,
    closed: Arc<AtomicBool>,
}

impl FakeLight {
    async fn start(reply: Option<Vec<u8>>) -> Self {
        Self::start_with_delay(reply, Duration::ZERO).await
    }

    /// Like [`start`](Self::start), but holds every reply back for `delay`.
    async fn start_with_delay(reply: Option<Vec<u8>>, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let received = Arc::new(Mutex::new(Vec::new()));
        let reply = Arc::new(Mutex::new(reply));
        let queries = Arc::new(AtomicUsize::new(0));
        let closed = Arc::new(AtomicBool::new(false));

        let (r, rep, q, c) = (
            Arc::clone(&received),
            Arc::clone(&reply),
            Arc::clone(&queries),
            Arc::clone(&closed),
        );
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buffer = [0u8; 64];
            loop {
                let n = match socket.read(&mut buffer).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => n,
                };

                let answers = {
                    let mut all = r.lock();
                    all.extend_from_slice(&buffer[..n]);
                    let total = all.windows(3).filter(|w| *w == QUERY).count();
                    total - q.swap(total, Ordering::SeqCst)
                };

                let current = rep.lock().clone();
                if answers > 0 && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                if let Some(bytes) = current {
                    for _ in 0..answers {
                        if socket.write_all(&bytes).await.is_err() {
                            break;
                        }
                    }
                }
            }
            c.store(true, Ordering::SeqCst);
        });

        Self {
            port,
            received,
            reply,
            queries,
            closed,
        }
    }

    fn config(&self) -> LightConfig {
        LightConfig::new("127.0.0.1")
            .with_port(self.port)
            .with_receive_timeout(Duration::from_millis(300))
    }

    fn set_reply(&self, reply: Option<Vec<u8>>) {
        *self.reply.lock() = reply;
    }

    fn received(&self) -> Vec<u8> {
        self.received.lock().clone()
    }

    fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Waits until the fake has received at least `len` bytes.
    async fn wait_for_bytes(&self, len: usize) -> Vec<u8> {
        wait_until(|| self.received.lock().len() >= len).await;
        self.received()
    }
}

/// Splits a recorded byte stream into checksummed frames.
///
/// Returns `None` if the stream does not consist of whole power, color and
/// status query frames back to back.
fn split_frames(mut stream: &[u8]) -> Option<Vec<Vec<u8>>> {
    let mut frames = Vec::new();
    while let Some(&first) = stream.first() {
        let payload_len = match first {
            0x71 | 0x81 => 3,
            0x41 => 7,
            _ => return None,
        };
        if stream.len() <= payload_len {
            return None;
        }
        let (frame, rest) = stream.split_at(payload_len + 1);
        if checksum(&frame[..payload_len]) != frame[payload_len] {
            return None;
        }
        frames.push(frame.to_vec());
        stream = rest;
    }
    Some(frames)
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met in time");
}

// ============================================================================
// Connect
// ============================================================================

mod connect {
    use super::*;

    #[tokio::test]
    async fn connect_refreshes_and_captures_snapshot() {
        let fake = FakeLight::start(Some(status(0x24, 0x61, 10, 20, 30))).await;
        let light = Light::from_config(fake.config());

        light.connect().await.unwrap();

        assert!(light.is_connected());
        assert_eq!(light.address().as_deref(), Some("127.0.0.1"));
        assert_eq!(light.power(), PowerState::Off);
        assert_eq!(light.mode(), LightMode::Color);
        assert_eq!(light.color(), RgbColor::new(10, 20, 30));
        assert_eq!(light.initial_color(), Some(RgbColor::new(10, 20, 30)));
        assert_eq!(light.initial_power(), Some(PowerState::Off));
        assert_eq!(fake.received(), with_checksum(&QUERY));
    }

    #[tokio::test]
    async fn connect_to_overrides_address() {
        let fake = FakeLight::start(Some(status(0x23, 0x61, 1, 2, 3))).await;
        let light = Light::from_config(LightConfig::default().with_port(fake.port));

        light.connect_to("127.0.0.1").await.unwrap();

        assert_eq!(light.address().as_deref(), Some("127.0.0.1"));
        assert!(light.is_on());
    }

    #[tokio::test]
    async fn refused_connection_names_address() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let light = Light::from_config(LightConfig::new("127.0.0.1").with_port(port));
        let err = light.connect().await.unwrap_err();

        match &err {
            Error::Connection { address, .. } => assert_eq!(address, "127.0.0.1"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("127.0.0.1"));
        assert!(!light.is_connected());
        assert!(matches!(light.turn_on().await, Err(Error::NotConnected)));
    }

    #[tokio::test]
    async fn silent_light_times_out_and_stays_disconnected() {
        let fake = FakeLight::start(None).await;
        let light = Light::from_config(
            fake.config()
                .with_receive_timeout(Duration::from_millis(100)),
        );

        let err = light.connect().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::Timeout(100))
        ));
        assert!(!light.is_connected());
        wait_until(|| fake.closed.load(Ordering::SeqCst)).await;
    }

    #[tokio::test]
    async fn short_reply_is_rejected() {
        let fake = FakeLight::start(Some(vec![0x81, 0x04, 0x23, 0x61, 0x01])).await;
        let light = Light::from_config(fake.config());

        let err = light.connect().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Parse(ParseError::TooShort {
                expected: 14,
                actual: 5
            })
        ));
        assert!(!light.is_connected());
    }

    #[tokio::test]
    async fn disconnect_during_handshake_wins() {
        let fake = FakeLight::start_with_delay(
            Some(status(0x23, 0x61, 1, 2, 3)),
            Duration::from_millis(200),
        )
        .await;
        let light = Arc::new(Light::from_config(
            fake.config()
                .with_receive_timeout(Duration::from_secs(1))
                .with_auto_refresh(true)
                .with_auto_refresh_interval(Duration::from_millis(20)),
        ));

        let failures = Arc::new(AtomicUsize::new(0));
        let f = Arc::clone(&failures);
        light.on_refresh_failed(move |_| {
            f.fetch_add(1, Ordering::SeqCst);
        });

        let connecting = {
            let light = Arc::clone(&light);
            tokio::spawn(async move { light.connect().await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        light.disconnect().await;

        let result = connecting.await.unwrap();
        assert!(matches!(result, Err(Error::Disposed)));
        assert!(!light.is_connected());
        wait_until(|| fake.closed.load(Ordering::SeqCst)).await;

        // No scheduler survives the teardown
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(failures.load(Ordering::SeqCst), 0);
        assert_eq!(fake.queries(), 1);
    }

    #[tokio::test]
    async fn second_connect_is_rejected() {
        let fake = FakeLight::start(Some(status(0x23, 0x61, 1, 2, 3))).await;
        let light = Light::from_config(fake.config());

        light.connect().await.unwrap();
        assert!(matches!(
            light.connect().await,
            Err(Error::AlreadyConnected)
        ));
    }
}

// ============================================================================
// Commands
// ============================================================================

mod commands {
    use super::*;

    #[tokio::test]
    async fn power_and_color_update_state_optimistically() {
        let fake = FakeLight::start(Some(status(0x24, 0x25, 0, 0, 0))).await;
        let light = Light::from_config(fake.config());
        light.connect().await.unwrap();

        assert_eq!(light.mode(), LightMode::Preset);
        assert_eq!(light.color(), RgbColor::TRANSPARENT);

        light.turn_on().await.unwrap();
        light.set_rgb(0, 0, 255).await.unwrap();

        assert!(light.is_on());
        assert_eq!(light.color(), RgbColor::BLUE);
        assert_eq!(light.mode(), LightMode::Color);

        let mut expected = with_checksum(&QUERY);
        expected.extend(with_checksum(&[0x71, 0x23, 0x0f]));
        expected.extend(with_checksum(&[0x41, 0x00, 0x00, 0xff, 0x00, 0x00, 0x0f]));
        assert_eq!(fake.wait_for_bytes(expected.len()).await, expected);

        // Commands are never read back
        assert_eq!(fake.queries(), 1);
    }

    #[tokio::test]
    async fn checksum_can_be_disabled() {
        let fake = FakeLight::start(Some(status(0x23, 0x61, 1, 2, 3))).await;
        let light = Light::from_config(fake.config().with_checksum(false));
        light.connect().await.unwrap();

        light.turn_off().await.unwrap();
        light.set_use_checksum(true);
        light.turn_on().await.unwrap();

        let mut expected = QUERY.to_vec();
        expected.extend([0x71, 0x24, 0x0f]);
        expected.extend(with_checksum(&[0x71, 0x23, 0x0f]));
        assert_eq!(fake.wait_for_bytes(expected.len()).await, expected);
    }

    #[tokio::test]
    async fn restore_replays_color_then_power() {
        let fake = FakeLight::start(Some(status(0x24, 0x61, 10, 20, 30))).await;
        let light = Light::from_config(fake.config());
        light.connect().await.unwrap();

        light.turn_on().await.unwrap();
        light.set_color(RgbColor::RED).await.unwrap();
        light.restore().await.unwrap();

        assert_eq!(light.power(), PowerState::Off);
        assert_eq!(light.color(), RgbColor::new(10, 20, 30));
        assert_eq!(light.mode(), LightMode::Color);

        let mut expected = with_checksum(&QUERY);
        expected.extend(with_checksum(&[0x71, 0x23, 0x0f]));
        expected.extend(with_checksum(&[0x41, 0xff, 0x00, 0x00, 0x00, 0x00, 0x0f]));
        expected.extend(with_checksum(&[0x41, 10, 20, 30, 0x00, 0x00, 0x0f]));
        expected.extend(with_checksum(&[0x71, 0x24, 0x0f]));
        assert_eq!(fake.wait_for_bytes(expected.len()).await, expected);
    }

    #[tokio::test]
    async fn refresh_overwrites_optimistic_state() {
        let fake = FakeLight::start(Some(status(0x23, 0x61, 1, 2, 3))).await;
        let light = Light::from_config(fake.config());
        light.connect().await.unwrap();

        light.set_color(RgbColor::GREEN).await.unwrap();
        fake.set_reply(Some(status(0x23, 0x60, 0, 0, 0)));
        let response = light.refresh().await.unwrap();

        assert_eq!(response.mode(), LightMode::Custom);
        assert_eq!(light.mode(), LightMode::Custom);
        assert_eq!(light.color(), RgbColor::TRANSPARENT);
        assert_eq!(fake.queries(), 2);
    }

    #[tokio::test]
    async fn disconnect_closes_and_disposes() {
        let fake = FakeLight::start(Some(status(0x23, 0x61, 1, 2, 3))).await;
        let light = Light::from_config(fake.config());
        light.connect().await.unwrap();

        let disconnected = Arc::new(AtomicUsize::new(0));
        let d = Arc::clone(&disconnected);
        light.on_disconnected(move || {
            d.fetch_add(1, Ordering::SeqCst);
        });

        light.disconnect().await;
        light.disconnect().await;

        assert!(!light.is_connected());
        assert_eq!(disconnected.load(Ordering::SeqCst), 1);
        assert!(matches!(light.turn_on().await, Err(Error::Disposed)));
        wait_until(|| fake.closed.load(Ordering::SeqCst)).await;
    }
}

// ============================================================================
// Subscriptions
// ============================================================================

mod subscriptions {
    use super::*;

    #[tokio::test]
    async fn only_actual_changes_are_reported() {
        let fake = FakeLight::start(Some(status(0x24, 0x61, 1, 2, 3))).await;
        let light = Light::from_config(fake.config());

        let changes = Arc::new(Mutex::new(Vec::new()));
        let c = Arc::clone(&changes);
        light.on_state_changed(move |change| c.lock().push(change.clone()));

        light.connect().await.unwrap();
        assert_eq!(
            *changes.lock(),
            vec![
                StateChange::Mode(LightMode::Color),
                StateChange::Color(RgbColor::new(1, 2, 3)),
            ]
        );

        changes.lock().clear();
        light.refresh().await.unwrap();
        assert!(changes.lock().is_empty());

        light.turn_on().await.unwrap();
        light.turn_on().await.unwrap();
        assert_eq!(*changes.lock(), vec![StateChange::Power(PowerState::On)]);
    }

    #[tokio::test]
    async fn specific_callbacks_and_unsubscribe() {
        let fake = FakeLight::start(Some(status(0x23, 0x61, 1, 2, 3))).await;
        let light = Light::from_config(fake.config());
        light.connect().await.unwrap();

        let colors = Arc::new(Mutex::new(Vec::new()));
        let c = Arc::clone(&colors);
        let id = light.on_color_changed(move |color| c.lock().push(color));

        light.set_color(RgbColor::RED).await.unwrap();
        assert!(light.unsubscribe(id));
        light.set_color(RgbColor::GREEN).await.unwrap();

        assert_eq!(*colors.lock(), vec![RgbColor::RED]);
    }
}

// ============================================================================
// Auto-refresh
// ============================================================================

mod auto_refresh {
    use super::*;

    #[tokio::test]
    async fn scheduler_picks_up_device_changes() {
        let fake = FakeLight::start(Some(status(0x24, 0x61, 1, 2, 3))).await;
        let light = Light::from_config(
            fake.config()
                .with_auto_refresh(true)
                .with_auto_refresh_interval(Duration::from_millis(30)),
        );
        light.connect().await.unwrap();

        fake.set_reply(Some(status(0x23, 0x61, 9, 8, 7)));

        wait_until(|| light.color() == RgbColor::new(9, 8, 7)).await;
        assert!(light.is_on());
        // Snapshot is only taken at connect
        assert_eq!(light.initial_color(), Some(RgbColor::new(1, 2, 3)));
    }

    #[tokio::test]
    async fn first_tick_fires_immediately() {
        let fake = FakeLight::start(Some(status(0x24, 0x61, 1, 2, 3))).await;
        let light = Light::from_config(
            fake.config()
                .with_auto_refresh(true)
                .with_auto_refresh_interval(Duration::from_secs(10)),
        );
        light.connect().await.unwrap();

        tokio::time::timeout(Duration::from_millis(500), async {
            while fake.queries() < 2 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("scheduler did not refresh right after connect");
    }

    #[tokio::test]
    async fn commands_never_interleave_with_scheduled_refreshes() {
        let fake = FakeLight::start(Some(status(0x23, 0x61, 1, 2, 3))).await;
        let light = Arc::new(Light::from_config(
            fake.config()
                .with_auto_refresh(true)
                .with_auto_refresh_interval(Duration::from_millis(5)),
        ));

        let failures = Arc::new(AtomicUsize::new(0));
        let f = Arc::clone(&failures);
        light.on_refresh_failed(move |_| {
            f.fetch_add(1, Ordering::SeqCst);
        });
        light.connect().await.unwrap();

        let commands = {
            let light = Arc::clone(&light);
            tokio::spawn(async move {
                for i in 0..60u8 {
                    light.set_rgb(i, 0x10, 0x20).await.unwrap();
                    light.turn_on().await.unwrap();
                    tokio::task::yield_now().await;
                }
            })
        };
        let mut foreground_refreshes = 0;
        for _ in 0..30 {
            let response = light.refresh().await.unwrap();
            assert_eq!(response.raw().len(), 14);
            assert_eq!(response.color(), RgbColor::new(1, 2, 3));
            foreground_refreshes += 1;
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        commands.await.unwrap();

        // Connect, foreground refreshes, and at least a few scheduled ones
        wait_until(|| fake.queries() >= 1 + foreground_refreshes + 3).await;
        light.disconnect().await;
        wait_until(|| fake.closed.load(Ordering::SeqCst)).await;

        let frames = split_frames(&fake.received()).expect("frames were interleaved");
        let queries = frames.iter().filter(|f| f[..3] == QUERY).count();
        let colors = frames.iter().filter(|f| f[0] == 0x41).count();
        assert_eq!(queries, fake.queries());
        assert_eq!(colors, 60);
        assert_eq!(failures.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn disabled_scheduler_does_not_query() {
        let fake = FakeLight::start(Some(status(0x24, 0x61, 1, 2, 3))).await;
        let light = Light::from_config(
            fake.config()
                .with_auto_refresh_interval(Duration::from_millis(20)),
        );
        light.connect().await.unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(fake.queries(), 1);

        light.set_auto_refresh_enabled(true);
        wait_until(|| fake.queries() > 1).await;
    }

    #[tokio::test]
    async fn scheduler_failures_reach_callback() {
        let fake = FakeLight::start(Some(status(0x24, 0x61, 1, 2, 3))).await;
        let light = Light::from_config(
            fake.config()
                .with_auto_refresh(true)
                .with_auto_refresh_interval(Duration::from_millis(30)),
        );

        let failures = Arc::new(Mutex::new(Vec::new()));
        let f = Arc::clone(&failures);
        light.on_refresh_failed(move |error| f.lock().push(error.to_string()));

        light.connect().await.unwrap();
        fake.set_reply(Some(vec![0x81, 0x04]));

        wait_until(|| !failures.lock().is_empty()).await;
        assert!(failures.lock()[0].contains("too short"));
        // A failed refresh does not disconnect
        assert!(light.is_connected());
    }
}
