//! # Validity Countdown
//!
//! Ticks once per second after issuance, reporting how long the credential
//! stays valid:
//!
//! ```text
//! QR valid for: 3h 12m 5s (until midnight)
//! QR valid for: 12m 5s (until midnight)
//! QR expired (new day)
//! ```
//!
//! The countdown runs as a tokio task behind a [`CountdownHandle`]. The
//! handle cancels the task explicitly or when dropped, so a countdown never
//! outlives the credential display that started it. It only reads the
//! `expiresAt` already computed at issuance.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use qrpass_core::EpochMillis;

/// Line shown once the credential has expired.
pub const EXPIRED_LINE: &str = "QR expired (new day)";

/// Render the remaining validity, or `None` once nothing remains.
///
/// Hours are omitted when zero. Components are floored.
pub fn format_remaining(remaining_ms: i64) -> Option<String> {
    if remaining_ms <= 0 {
        return None;
    }
    let hours = remaining_ms / 3_600_000;
    let minutes = (remaining_ms % 3_600_000) / 60_000;
    let seconds = (remaining_ms % 60_000) / 1_000;
    Some(if hours > 0 {
        format!("QR valid for: {hours}h {minutes}m {seconds}s (until midnight)")
    } else {
        format!("QR valid for: {minutes}m {seconds}s (until midnight)")
    })
}

/// How a countdown stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEnd {
    /// The expiry instant passed.
    Expired,
    /// The handle cancelled the task.
    Cancelled,
}

/// Countdown towards a credential's expiry.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    expires_at: EpochMillis,
    period: Duration,
}

impl Countdown {
    /// A countdown to `expires_at`, ticking every second.
    pub fn new(expires_at: EpochMillis) -> Self {
        Self {
            expires_at,
            period: Duration::from_secs(1),
        }
    }

    /// Override the tick period.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Start ticking on the current tokio runtime. `emit` receives each
    /// rendered line; the first arrives immediately.
    pub fn spawn<F>(self, mut emit: F) -> CountdownHandle
    where
        F: FnMut(String) + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let remaining = EpochMillis::now().millis_until(self.expires_at);
                match format_remaining(remaining) {
                    Some(line) => emit(line),
                    None => {
                        emit(EXPIRED_LINE.to_string());
                        return CountdownEnd::Expired;
                    }
                }
            }
        });
        CountdownHandle { task: Some(task) }
    }
}

/// Owner of a running countdown task. Dropping it cancels the task.
#[derive(Debug)]
pub struct CountdownHandle {
    task: Option<JoinHandle<CountdownEnd>>,
}

impl CountdownHandle {
    /// Stop the countdown.
    pub fn cancel(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Wait for the countdown to stop.
    ///
    /// Cancel-safe: if this future is dropped the task keeps running and
    /// the handle can still cancel it.
    pub async fn finished(&mut self) -> CountdownEnd {
        let Some(task) = self.task.as_mut() else {
            return CountdownEnd::Cancelled;
        };
        let end = task.await.unwrap_or(CountdownEnd::Cancelled);
        self.task = None;
        end
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
