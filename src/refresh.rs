//! Background data refresh system
//!
//! Rebuilds the dashboard snapshot in a background task, on a fixed interval and
//! whenever a refresh is requested, and delivers it to the main application over
//! a tokio channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::service::{Dashboard, PaddockService};

/// Refresh period bounds; a zero period panics in tokio and a huge one overflows `Instant`
const MIN_INTERVAL: Duration = Duration::from_millis(1);
const MAX_INTERVAL: Duration = Duration::from_secs(86_400);

/// Messages sent from background refresh to main app
#[derive(Debug, Clone)]
pub enum RefreshMessage {
    /// Refresh started
    RefreshStarted,
    /// A new snapshot is ready
    Updated(Box<Dashboard>),
}

/// Configuration for refresh intervals
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Interval between automatic refreshes
    pub interval: Duration,
    /// Whether automatic refresh is enabled; requested refreshes always run
    pub enabled: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300), // 5 minutes
            enabled: true,
        }
    }
}

/// Handle for controlling the background refresh system
pub struct RefreshHandle {
    /// Channel for receiving refresh messages
    pub receiver: mpsc::Receiver<RefreshMessage>,
    /// Channel for requesting an immediate refresh
    request_tx: mpsc::Sender<()>,
    /// Flag to signal shutdown
    shutdown_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Creates a new RefreshHandle and spawns the background refresh task
    ///
    /// The task builds a first snapshot immediately, then one per `config.interval`
    /// and one per [`request_refresh`](Self::request_refresh) call.
    pub fn spawn(service: Arc<PaddockService>, config: RefreshConfig) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(32);
        let (request_tx, mut request_rx) = mpsc::channel::<()>(1);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        tokio::spawn(async move {
            let period = config.interval.clamp(MIN_INTERVAL, MAX_INTERVAL);
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // Skip the first tick (immediate); the initial refresh runs below
            interval.tick().await;

            loop {
                if !refresh_once(&service, &msg_tx).await {
                    break;
                }

                tokio::select! {
                    _ = interval.tick(), if config.enabled => {
                        debug!("scheduled refresh");
                    }
                    Some(()) = request_rx.recv() => {
                        debug!("requested refresh");
                        interval.reset();
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        Self {
            receiver: msg_rx,
            request_tx,
            shutdown_tx,
        }
    }

    /// Requests an immediate refresh; ignored if one is already pending
    pub fn request_refresh(&self) {
        let _ = self.request_tx.try_send(());
    }

    /// Shuts down the background refresh task
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Builds one snapshot and sends it; returns false once the receiver is gone
async fn refresh_once(service: &PaddockService, tx: &mpsc::Sender<RefreshMessage>) -> bool {
    if tx.send(RefreshMessage::RefreshStarted).await.is_err() {
        return false;
    }
    let dashboard = service.snapshot().await;
    tx.send(RefreshMessage::Updated(Box::new(dashboard)))
        .await
        .is_ok()
}

/// Checks for pending refresh messages without blocking
///
/// # Returns
/// * `Some(RefreshMessage)` if a message was available
/// * `None` if no messages are pending
pub fn try_recv(handle: &mut RefreshHandle) -> Option<RefreshMessage> {
    handle.receiver.try_recv().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResponseCache;
    use crate::data::OpenF1Client;
    use crate::service::ServiceConfig;

    const WAIT: Duration = Duration::from_secs(10);

    fn offline_service() -> Arc<PaddockService> {
        let client = OpenF1Client::new("http://127.0.0.1:9", Duration::from_millis(500))
            .expect("Client should build");
        Arc::new(PaddockService::new(
            Arc::new(ResponseCache::new()),
            client,
            ServiceConfig {
                year: 2024,
                ttl: Duration::from_secs(60),
            },
        ))
    }

    async fn next_update(handle: &mut RefreshHandle) -> Box<Dashboard> {
        loop {
            let msg = tokio::time::timeout(WAIT, handle.receiver.recv())
                .await
                .expect("Timed out waiting for refresh")
                .expect("Refresh channel closed");
            if let RefreshMessage::Updated(dashboard) = msg {
                return dashboard;
            }
        }
    }

    #[test]
    fn test_refresh_config_default() {
        let config = RefreshConfig::default();
        assert_eq!(config.interval, Duration::from_secs(300));
        assert!(config.enabled);
    }

    #[tokio::test]
    async fn test_spawn_delivers_initial_snapshot() {
        let mut handle = RefreshHandle::spawn(offline_service(), RefreshConfig::default());

        let first = tokio::time::timeout(WAIT, handle.receiver.recv())
            .await
            .expect("Timed out waiting for refresh");
        assert!(matches!(first, Some(RefreshMessage::RefreshStarted)));

        let dashboard = next_update(&mut handle).await;
        assert!(dashboard.driver_standings.is_empty());
        assert!(dashboard.standings_degraded);
    }

    #[tokio::test]
    async fn test_request_refresh_builds_another_snapshot() {
        let config = RefreshConfig {
            enabled: false,
            ..Default::default()
        };
        let mut handle = RefreshHandle::spawn(offline_service(), config);
        let first = next_update(&mut handle).await;

        handle.request_refresh();
        let second = next_update(&mut handle).await;

        assert!(second.refreshed_at >= first.refreshed_at);
    }

    #[tokio::test]
    async fn test_disabled_refresh_stays_quiet_after_initial_snapshot() {
        let config = RefreshConfig {
            interval: Duration::from_millis(10),
            enabled: false,
        };
        let mut handle = RefreshHandle::spawn(offline_service(), config);
        next_update(&mut handle).await;

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(try_recv(&mut handle).is_none());
    }

    #[tokio::test]
    async fn test_requested_refreshes_survive_huge_interval() {
        let config = RefreshConfig {
            interval: Duration::from_secs(u64::MAX),
            enabled: true,
        };
        let mut handle = RefreshHandle::spawn(offline_service(), config);
        next_update(&mut handle).await;

        handle.request_refresh();
        next_update(&mut handle).await;
        handle.request_refresh();
        let third = next_update(&mut handle).await;

        assert!(third.standings_degraded);
    }

    #[tokio::test]
    async fn test_shutdown_closes_channel() {
        let config = RefreshConfig {
            enabled: false,
            ..Default::default()
        };
        let mut handle = RefreshHandle::spawn(offline_service(), config);
        next_update(&mut handle).await;

        let RefreshHandle {
            mut receiver,
            request_tx,
            shutdown_tx,
        } = handle;
        drop(request_tx);
        let _ = shutdown_tx.send(()).await;

        let closed = tokio::time::timeout(WAIT, receiver.recv())
            .await
            .expect("Timed out waiting for shutdown");
        assert!(closed.is_none());
    }
}
