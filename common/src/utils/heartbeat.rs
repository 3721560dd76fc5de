//! Browser liveness tracking.
//!
//! The front-end pings the server while its tab is open. When the pings stop for
//! longer than the configured timeout, the watchdog raises a shutdown signal so the
//! binary can exit.

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use tokio::sync::watch;
use tracing::{debug, info};

/// Source of the current instant, injectable so timeouts can be tested.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = *self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        self.origin + offset
    }
}

pub struct HeartbeatMonitor {
    clock: Arc<dyn Clock>,
    last_heartbeat: Mutex<Instant>,
    timeout: Duration,
}

impl HeartbeatMonitor {
    /// Starts the monitor with the heartbeat stamped at the current instant.
    pub fn new(clock: Arc<dyn Clock>, timeout: Duration) -> Self {
        let now = clock.now();
        Self {
            clock,
            last_heartbeat: Mutex::new(now),
            timeout,
        }
    }

    pub fn with_system_clock(timeout: Duration) -> Self {
        Self::new(Arc::new(SystemClock), timeout)
    }

    pub fn touch(&self) {
        let now = self.clock.now();
        *self
            .last_heartbeat
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn elapsed(&self) -> Duration {
        let last = *self
            .last_heartbeat
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.clock.now().saturating_duration_since(last)
    }

    /// True once strictly more than `timeout` has passed since the last heartbeat.
    pub fn is_expired(&self) -> bool {
        self.elapsed() > self.timeout
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Checks the monitor every `interval` and flips `shutdown` to `true` on expiry.
///
/// Returns after signalling, or when every receiver of `shutdown` is gone.
pub async fn watch_heartbeat(
    monitor: Arc<HeartbeatMonitor>,
    interval: Duration,
    shutdown: watch::Sender<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        if shutdown.is_closed() {
            debug!("Heartbeat watchdog stopping, no shutdown listeners left");
            return;
        }

        if monitor.is_expired() {
            info!("========================================");
            info!("  Page closed - shutting down server");
            info!("========================================");
            info!(
                elapsed_secs = monitor.elapsed().as_secs(),
                timeout_secs = monitor.timeout().as_secs(),
                "Heartbeat timed out"
            );
            shutdown.send_replace(true);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor_with_manual_clock(timeout: Duration) -> (Arc<ManualClock>, HeartbeatMonitor) {
        let clock = Arc::new(ManualClock::new());
        let monitor = HeartbeatMonitor::new(clock.clone(), timeout);
        (clock, monitor)
    }

    #[test]
    fn fresh_monitor_is_not_expired() {
        let (_clock, monitor) = monitor_with_manual_clock(Duration::from_secs(10));

        assert_eq!(monitor.elapsed(), Duration::ZERO);
        assert!(!monitor.is_expired());
    }

    #[test]
    fn expires_only_after_timeout_is_exceeded() {
        let (clock, monitor) = monitor_with_manual_clock(Duration::from_secs(10));

        clock.advance(Duration::from_secs(10));
        assert!(!monitor.is_expired(), "exactly the timeout is still alive");

        clock.advance(Duration::from_millis(1));
        assert!(monitor.is_expired());
    }

    #[test]
    fn touch_resets_elapsed_time() {
        let (clock, monitor) = monitor_with_manual_clock(Duration::from_secs(10));

        // Pings every 6 seconds keep the monitor alive indefinitely.
        for _ in 0..5 {
            clock.advance(Duration::from_secs(6));
            assert!(!monitor.is_expired());
            monitor.touch();
        }

        assert_eq!(monitor.elapsed(), Duration::ZERO);
        clock.advance(Duration::from_secs(11));
        assert!(monitor.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn watchdog_signals_shutdown_when_expired() {
        let (clock, monitor) = monitor_with_manual_clock(Duration::from_secs(10));
        clock.advance(Duration::from_secs(11));

        let (tx, mut rx) = watch::channel(false);
        let handle = tokio::spawn(watch_heartbeat(
            Arc::new(monitor),
            Duration::from_secs(5),
            tx,
        ));

        rx.wait_for(|stop| *stop)
            .await
            .expect("watchdog should signal shutdown");
        handle.await.expect("watchdog task should finish");
    }

    #[tokio::test(start_paused = true)]
    async fn watchdog_stays_quiet_while_heartbeats_arrive() {
        let (_clock, monitor) = monitor_with_manual_clock(Duration::from_secs(10));

        let (tx, mut rx) = watch::channel(false);
        let handle = tokio::spawn(watch_heartbeat(
            Arc::new(monitor),
            Duration::from_secs(5),
            tx,
        ));

        let waited = tokio::time::timeout(Duration::from_secs(60), rx.changed()).await;
        assert!(waited.is_err(), "no shutdown expected without expiry");
        assert!(!*rx.borrow());

        drop(rx);
        handle.await.expect("watchdog should stop once receivers are gone");
    }
}
