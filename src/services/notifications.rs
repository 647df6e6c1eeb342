use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::WatchStream;

use crate::client::ApiClient;

const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Keeps the unread notification count fresh while a session is signed in.
/// The first fetch happens immediately.
pub struct NotificationPoller {
    counts: watch::Receiver<u32>,
    task: Option<JoinHandle<()>>,
}

impl NotificationPoller {
    /// Intervals shorter than 10ms are raised to 10ms.
    pub fn spawn(client: Arc<ApiClient>, interval: Duration) -> Self {
        let interval = interval.max(MIN_INTERVAL);
        let (tx, counts) = watch::channel(0u32);
        let task = tokio::spawn(poll_loop(client, interval, tx));
        Self {
            counts,
            task: Some(task),
        }
    }

    pub fn unread(&self) -> u32 {
        *self.counts.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.counts.clone()
    }

    pub fn stream(&self) -> WatchStream<u32> {
        WatchStream::new(self.counts.clone())
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Waits for the loop to end on its own, which happens on sign-out.
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for NotificationPoller {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn poll_loop(client: Arc<ApiClient>, interval: Duration, tx: watch::Sender<u32>) {
    let mut auth = client.session().subscribe();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !client.session().is_authenticated() {
                    break;
                }
                match client.notifications().unread_count().await {
                    Ok(count) => {
                        tx.send_if_modified(|current| {
                            let changed = *current != count;
                            *current = count;
                            changed
                        });
                    }
                    Err(e) => tracing::debug!(error = %e, "unread count poll failed"),
                }
            }
            changed = auth.changed() => {
                if changed.is_err() || !*auth.borrow_and_update() {
                    break;
                }
            }
        }
    }

    tracing::debug!("notification poller stopped");
}

/// Text for the bell badge. Nothing is shown for zero.
pub fn badge_label(unread: u32) -> Option<String> {
    match unread {
        0 => None,
        1..=9 => Some(unread.to_string()),
        _ => Some("9+".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use serde_json::json;

    use crate::api::testing::{json_response, sign_in, test_session, MockTransport};
    use crate::models::Role;

    #[test]
    fn test_badge_label() {
        assert_eq!(badge_label(0), None);
        assert_eq!(badge_label(1).as_deref(), Some("1"));
        assert_eq!(badge_label(9).as_deref(), Some("9"));
        assert_eq!(badge_label(10).as_deref(), Some("9+"));
    }

    #[tokio::test]
    async fn test_publishes_count_and_stops_on_logout() {
        let hits = Arc::new(AtomicU32::new(0));
        let counter = hits.clone();
        let transport = MockTransport::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            json_response(200, json!({"count": 5}))
        });
        let session = test_session();
        sign_in(&session, "abc", Role::User);
        let client = Arc::new(ApiClient::new(Arc::new(transport), session.clone()));

        let poller = NotificationPoller::spawn(client, Duration::from_millis(20));
        let mut counts = poller.subscribe();
        tokio::time::timeout(Duration::from_secs(2), counts.wait_for(|c| *c == 5))
            .await
            .expect("count never arrived")
            .unwrap();
        assert_eq!(poller.unread(), 5);

        session.logout();
        tokio::time::timeout(Duration::from_secs(2), poller.join())
            .await
            .expect("poller kept running after logout");

        let after = hits.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(hits.load(Ordering::SeqCst), after);
    }

    #[tokio::test]
    async fn test_zero_interval_is_clamped() {
        let transport = MockTransport::new(|_| json_response(200, json!({"count": 3})));
        let session = test_session();
        sign_in(&session, "abc", Role::User);
        let client = Arc::new(ApiClient::new(Arc::new(transport), session));

        let poller = NotificationPoller::spawn(client, Duration::ZERO);
        let mut counts = poller.subscribe();
        tokio::time::timeout(Duration::from_secs(2), counts.wait_for(|c| *c == 3))
            .await
            .expect("count never arrived")
            .unwrap();
        assert!(!poller.is_finished());
    }

    #[tokio::test]
    async fn test_does_not_poll_when_signed_out() {
        let transport = MockTransport::new(|_| json_response(200, json!({"count": 1})));
        let sent = transport.sent.clone();
        let client = Arc::new(ApiClient::new(Arc::new(transport), test_session()));

        let poller = NotificationPoller::spawn(client, Duration::from_millis(10));
        tokio::time::timeout(Duration::from_secs(2), poller.join())
            .await
            .unwrap();
        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_polls_keep_last_count() {
        let transport = MockTransport::new(|_| json_response(500, json!({})));
        let session = test_session();
        sign_in(&session, "abc", Role::Provider);
        let client = Arc::new(ApiClient::new(Arc::new(transport), session.clone()));

        let poller = NotificationPoller::spawn(client, Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(poller.unread(), 0);
        assert!(!poller.is_finished());
        assert!(session.is_authenticated());
    }
}
