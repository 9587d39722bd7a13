use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Enforces a process-wide minimum spacing between outgoing provider calls.
///
/// One last-request timestamp behind an async mutex; the lock is held across
/// the wait, so concurrent callers serialize and no two requests are ever
/// issued closer together than the configured spacing. This is a token-less
/// pacer — it guarantees spacing, nothing more. There is no burst allowance.
pub struct RequestPacer {
    min_spacing: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(min_spacing: Duration) -> Self {
        Self {
            min_spacing,
            last_request: Mutex::new(None),
        }
    }

    /// Waits until at least `min_spacing` has elapsed since the previous
    /// call, then records the new request time.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.min_spacing;
            if ready_at > Instant::now() {
                sleep_until(ready_at).await;
            }
        }
        *last = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_call_passes_immediately() {
        let pacer = RequestPacer::new(Duration::from_millis(250));
        let started = Instant::now();
        pacer.wait().await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_calls_are_spaced() {
        let pacer = RequestPacer::new(Duration::from_millis(250));
        let started = Instant::now();
        pacer.wait().await;
        pacer.wait().await;
        pacer.wait().await;
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spacing_holds_across_concurrent_callers() {
        let pacer = Arc::new(RequestPacer::new(Duration::from_millis(250)));
        let started = Instant::now();

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let pacer = pacer.clone();
                tokio::spawn(async move { pacer.wait().await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        // 4 calls, 3 gaps
        assert!(started.elapsed() >= Duration::from_millis(750));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_spacing_already_elapsed() {
        let pacer = RequestPacer::new(Duration::from_millis(250));
        pacer.wait().await;
        tokio::time::sleep(Duration::from_millis(400)).await;

        let resumed = Instant::now();
        pacer.wait().await;
        assert_eq!(resumed.elapsed(), Duration::ZERO);
    }
}
