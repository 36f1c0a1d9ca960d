//! Periodic drivers for the tick and display cadences.
//!
//! A driver is a tokio task running a synchronous job on a fixed
//! cadence. Each driver is cancellable on its own: `stop()` signals the
//! task, waits up to [`SHUTDOWN_GRACE`], and aborts it if the wait
//! expires, so no tick can fire after shutdown completes.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::ShutdownError;

/// Cadence shared by the tick and display drivers.
pub const TICK_CADENCE: Duration = Duration::from_secs(1);

/// Bounded wait for a driver to wind down before it is aborted.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// A cancellable fixed-cadence task.
pub struct PeriodicDriver {
    name: &'static str,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl PeriodicDriver {
    /// Spawn `job` every `cadence`, first firing after `delay`.
    ///
    /// Missed ticks are skipped rather than burst, keeping the cadence
    /// at roughly one invocation per period under load.
    pub fn spawn<F>(name: &'static str, cadence: Duration, delay: Duration, mut job: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (shutdown, mut cancelled) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + delay;
            let mut ticker = tokio::time::interval_at(start, cadence);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = cancelled.changed() => break,
                    _ = ticker.tick() => job(),
                }
            }
        });
        Self {
            name,
            shutdown,
            handle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Cancel the driver and wait for it to finish, bounded by
    /// [`SHUTDOWN_GRACE`].
    ///
    /// # Errors
    ///
    /// Returns [`ShutdownError::Timeout`] if the task had to be aborted.
    /// The task is no longer running in either case.
    pub async fn stop(mut self) -> Result<(), ShutdownError> {
        let _ = self.shutdown.send(true);
        match tokio::time::timeout(SHUTDOWN_GRACE, &mut self.handle).await {
            Ok(_) => Ok(()),
            Err(_) => {
                self.handle.abort();
                Err(ShutdownError::Timeout {
                    driver: self.name,
                    grace_secs: SHUTDOWN_GRACE.as_secs(),
                })
            }
        }
    }
}
