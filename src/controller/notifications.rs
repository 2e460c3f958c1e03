//! Notification polling.
//!
//! The marketplace has no push channel; notifications are fetched once on
//! start and then every [`DEFAULT_POLL_INTERVAL`]. The poller hands out a
//! stream and never spawns, so the app drives it from whatever executor it
//! runs on.

use super::backend::MarketBackend;
use crate::domain::notification::Notification;
use crate::error::SdkError;
use crate::network::DEFAULT_POLL_INTERVAL;
use futures_util::stream::Stream;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// One poll result: the full notification list, or the error of that poll.
pub type PollResult = Result<Vec<Notification>, SdkError>;

pub type NotificationStream<'a> = Pin<Box<dyn Stream<Item = PollResult> + 'a>>;

#[derive(Debug)]
pub struct NotificationPoller {
    interval: Duration,
    running: Arc<AtomicBool>,
}

impl Default for NotificationPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl NotificationPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Start polling. Any stream from an earlier `start` ends before its
    /// next fetch.
    ///
    /// The first poll happens immediately. A failed poll is yielded and
    /// polling continues; the stream ends only after [`stop`](Self::stop).
    pub fn start<'a, B: MarketBackend + ?Sized>(
        &mut self,
        backend: &'a B,
    ) -> NotificationStream<'a> {
        self.stop();
        let running = Arc::new(AtomicBool::new(true));
        self.running = running.clone();
        let interval = self.interval;

        Box::pin(async_stream::stream! {
            loop {
                if !running.load(Ordering::Acquire) {
                    break;
                }
                let result = backend.notifications().await;
                if let Err(e) = &result {
                    tracing::warn!("Notification poll failed: {}", e);
                }
                if !running.load(Ordering::Acquire) {
                    break;
                }
                yield result;
                futures_timer::Delay::new(interval).await;
            }
            tracing::debug!("Notification polling stopped");
        })
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

impl Drop for NotificationPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
