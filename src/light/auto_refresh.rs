// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Background auto-refresh scheduler.

use std::sync::Weak;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::Shared;

/// `tokio::time::interval` panics on a zero period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Periodic refresh task owned by a connected light.
///
/// The task ticks for as long as it lives, whether or not auto-refresh is
/// enabled; each tick checks the flag. It holds only a weak reference to the
/// light, and is aborted when this handle is dropped.
#[derive(Debug)]
pub(crate) struct AutoRefresh {
    handle: JoinHandle<()>,
}

impl AutoRefresh {
    /// Spawns the scheduler. The first tick fires immediately.
    pub(crate) fn start(shared: Weak<Shared>, period: Duration) -> Self {
        let handle = tokio::spawn(run(shared, period.max(MIN_PERIOD)));
        Self { handle }
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run(shared: Weak<Shared>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let Some(shared) = shared.upgrade() else {
            tracing::debug!("Light dropped, stopping auto-refresh");
            break;
        };

        if shared.disposed.load(Ordering::Acquire) {
            break;
        }

        if !shared.auto_refresh_enabled.load(Ordering::Relaxed) {
            continue;
        }

        if let Err(error) = shared.refresh().await {
            tracing::warn!(
                address = shared.address().as_deref().unwrap_or("<unknown>"),
                error = %error,
                "Scheduled refresh failed"
            );
            shared.callbacks.dispatch_refresh_failed(&error);
        }
    }
}
