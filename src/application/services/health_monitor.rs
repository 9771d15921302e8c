//! Background polling of the remote service's liveness.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::entities::{HealthState, HealthStatus};
use crate::domain::ports::HealthProbe;

/// Polling period used when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

/// Lifecycle state of a [`HealthMonitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitorState {
    /// No check has been dispatched yet.
    #[default]
    Uninitialized,
    Checking,
    Healthy,
    Unhealthy,
}

/// Latest observation published by the monitor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonitorSnapshot {
    pub state: MonitorState,
    pub error: Option<String>,
}

impl MonitorSnapshot {
    /// Converts to the interface's [`HealthStatus`]; an uninitialized monitor
    /// reads as `checking`.
    pub fn to_health_status(&self) -> HealthStatus {
        let status = match self.state {
            MonitorState::Uninitialized | MonitorState::Checking => HealthState::Checking,
            MonitorState::Healthy => HealthState::Healthy,
            MonitorState::Unhealthy => HealthState::Unhealthy,
        };

        HealthStatus {
            status,
            error: self.error.clone(),
        }
    }
}

impl From<HealthStatus> for MonitorSnapshot {
    fn from(status: HealthStatus) -> Self {
        let state = match status.status {
            HealthState::Checking => MonitorState::Checking,
            HealthState::Healthy => MonitorState::Healthy,
            HealthState::Unhealthy => MonitorState::Unhealthy,
        };

        Self {
            state,
            error: status.error,
        }
    }
}

/// Which checks may still publish.
///
/// `epoch` advances on every start and stop; `latest_seq` is the most
/// recently issued check. Only that check, in the current epoch, publishes.
#[derive(Debug, Default)]
struct CheckGuard {
    epoch: u64,
    latest_seq: u64,
}

struct Shared {
    guard: Mutex<CheckGuard>,
    tx: watch::Sender<MonitorSnapshot>,
}

impl Shared {
    fn advance_epoch(&self) -> u64 {
        let mut guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        guard.epoch += 1;
        guard.epoch
    }

    /// Issues a sequence number for a check in `epoch`, or `None` if the
    /// epoch has already ended.
    fn issue(&self, epoch: u64, mark_checking: bool) -> Option<u64> {
        let mut guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        if guard.epoch != epoch {
            return None;
        }

        guard.latest_seq += 1;
        if mark_checking {
            self.tx.send_replace(MonitorSnapshot {
                state: MonitorState::Checking,
                error: None,
            });
        }

        Some(guard.latest_seq)
    }

    fn publish(&self, epoch: u64, seq: u64, status: HealthStatus) {
        let guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        if guard.epoch != epoch || guard.latest_seq != seq {
            debug!(epoch, seq, "Discarding stale health check result");
            return;
        }

        debug!(status = %status.status, "Health check completed");
        self.tx.send_replace(MonitorSnapshot::from(status));
    }

    async fn run_periodic(&self, probe: &dyn HealthProbe, epoch: u64) {
        let Some(seq) = self.issue(epoch, false) else {
            return;
        };

        let status = probe.check().await;
        self.publish(epoch, seq, status);
    }
}

/// Repeatedly checks the remote service and keeps the latest result.
///
/// The scheduling handle lives inside the monitor and nothing else can
/// cancel or reschedule it. Dropping the monitor stops it.
///
/// # Concurrency
///
/// - `start()` dispatches the first check right away, then one per interval
/// - A check already in flight when `stop()` is called still completes, but
///   its result is discarded; results only publish within the start/stop
///   window they were issued in
/// - When checks overlap, only the most recently issued one publishes
pub struct HealthMonitor {
    probe: Arc<dyn HealthProbe>,
    interval: Duration,
    shared: Arc<Shared>,
    shutdown: Option<CancellationToken>,
}

impl HealthMonitor {
    pub fn new(probe: Arc<dyn HealthProbe>, interval: Duration) -> Self {
        let (tx, _rx) = watch::channel(MonitorSnapshot::default());

        Self {
            probe,
            interval,
            shared: Arc::new(Shared {
                guard: Mutex::new(CheckGuard::default()),
                tx,
            }),
            shutdown: None,
        }
    }

    /// Creates a monitor polling at `HEALTH_INTERVAL_SECS`.
    pub fn from_config(probe: Arc<dyn HealthProbe>, config: &Config) -> Self {
        Self::new(probe, config.health_interval())
    }

    /// Dispatches one check now and schedules a repeat every interval.
    ///
    /// Does nothing if the monitor is already running.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(&mut self) {
        if self.shutdown.is_some() {
            debug!("Health monitor already running");
            return;
        }

        let epoch = self.shared.advance_epoch();
        let token = CancellationToken::new();

        // Issued here so a stop() right after start() still lets it run.
        if let Some(seq) = self.shared.issue(epoch, true) {
            let shared = Arc::clone(&self.shared);
            let probe = Arc::clone(&self.probe);
            tokio::spawn(async move {
                let status = probe.check().await;
                shared.publish(epoch, seq, status);
            });
        }

        let shared = Arc::clone(&self.shared);
        let probe = Arc::clone(&self.probe);
        let period = self.interval;
        let cancelled = token.clone();
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => {
                        debug!("Health monitor schedule cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        shared.run_periodic(probe.as_ref(), epoch).await;
                    }
                }
            }
        });

        self.shutdown = Some(token);
        info!(interval_secs = self.interval.as_secs_f64(), "Health monitor started");
    }

    /// Cancels the scheduled repeats. Safe to call any number of times.
    pub fn stop(&mut self) {
        let Some(token) = self.shutdown.take() else {
            return;
        };

        token.cancel();
        self.shared.advance_epoch();
        info!("Health monitor stopped");
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        self.shared.tx.borrow().clone()
    }

    /// Current liveness as the interface displays it.
    pub fn status(&self) -> HealthStatus {
        self.snapshot().to_health_status()
    }

    /// Receives every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<MonitorSnapshot> {
        self.shared.tx.subscribe()
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}
