//! Delayed, cancellable browser launch.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Delay between server startup and opening the browser.
pub const OPEN_DELAY: Duration = Duration::from_millis(1200);

/// Opens `url` in the user's default browser without waiting for it.
pub fn open_in_default_browser(url: &str) {
    match open::that_detached(url) {
        Ok(()) => info!("Opened browser at {}", url),
        Err(e) => warn!("Failed to open browser at {}: {}", url, e),
    }
}

/// Handle to a scheduled browser launch.
#[derive(Debug)]
pub struct BrowserTask {
    url: String,
    cancel: CancellationToken,
    handle: JoinHandle<bool>,
}

impl BrowserTask {
    /// Schedules `opener(url)` to run once after `delay`.
    ///
    /// The opener never runs if the task is cancelled before the delay
    /// elapses.
    pub fn schedule<F>(url: String, delay: Duration, opener: F) -> Self
    where
        F: FnOnce(&str) + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let target = url.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => false,
                _ = tokio::time::sleep(delay) => {
                    opener(&target);
                    true
                }
            }
        });

        info!("Browser will open {} in {}ms", url, delay.as_millis());
        BrowserTask {
            url,
            cancel,
            handle,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Cancels the launch if it has not fired yet.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Waits for the task to finish. Returns whether the browser was opened.
    pub async fn join(self) -> bool {
        self.handle.await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl FnOnce(&str) + Send + 'static) {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let sink = opened.clone();
        (opened, move |url: &str| sink.lock().unwrap().push(url.to_string()))
    }

    #[tokio::test]
    async fn test_fires_once_after_delay() {
        let (opened, opener) = recorder();
        let task = BrowserTask::schedule(
            "http://127.0.0.1:5000".to_string(),
            Duration::from_millis(10),
            opener,
        );
        assert_eq!(task.url(), "http://127.0.0.1:5000");
        assert!(task.join().await);
        assert_eq!(*opened.lock().unwrap(), vec!["http://127.0.0.1:5000"]);
    }

    #[tokio::test]
    async fn test_cancel_before_delay() {
        let (opened, opener) = recorder();
        let task = BrowserTask::schedule(
            "http://127.0.0.1:5000".to_string(),
            Duration::from_secs(60),
            opener,
        );
        task.cancel();
        assert!(!task.join().await);
        assert!(opened.lock().unwrap().is_empty());
    }
}
