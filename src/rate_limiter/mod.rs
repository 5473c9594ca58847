use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Spaces out requests to the results site.
///
/// The first request goes out immediately; each later one waits until at
/// least `delay` has passed since the previous request started.
pub struct RateLimiter {
    delay: Duration,
    last_request: Option<Instant>,
    request_count: usize,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_request: None,
            request_count: 0,
        }
    }

    pub async fn wait(&mut self) {
        if let Some(remaining) = self.remaining() {
            sleep(remaining).await;
        }
        self.last_request = Some(Instant::now());
        self.request_count += 1;
    }

    pub fn request_count(&self) -> usize {
        self.request_count
    }

    fn remaining(&self) -> Option<Duration> {
        let elapsed = self.last_request?.elapsed();
        self.delay.checked_sub(elapsed).filter(|d| !d.is_zero())
    }
}
