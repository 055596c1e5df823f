//! Token bucket rate limiter for outbound scoring requests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::time::sleep;

/// Token bucket: tokens refill continuously with elapsed time, capped
/// at the burst capacity; `acquire` waits until a token is available.
#[derive(Clone)]
pub struct TokenBucketRateLimiter {
    state: Arc<Mutex<BucketState>>,
    capacity: f64,
    refill_rate: f64,
}

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucketRateLimiter {
    /// `requests_per_second` sets the refill rate; `burst_size` the
    /// bucket capacity.
    pub fn new(requests_per_second: f64, burst_size: u32) -> Self {
        let capacity = f64::from(burst_size).max(1.0);
        Self {
            state: Arc::new(Mutex::new(BucketState {
                tokens: capacity,
                last_refill: Instant::now(),
            })),
            capacity,
            refill_rate: requests_per_second.max(f64::EPSILON),
        }
    }

    /// Wait until one token is available, then consume it.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().await;
                let elapsed = state.last_refill.elapsed().as_secs_f64();
                state.tokens = (state.tokens + elapsed * self.refill_rate).min(self.capacity);
                state.last_refill = Instant::now();

                if state.tokens >= 1.0 {
                    state.tokens -= 1.0;
                    return;
                }
                Duration::from_secs_f64((1.0 - state.tokens) / self.refill_rate)
            };
            sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_burst_is_immediate() {
        let limiter = TokenBucketRateLimiter::new(1.0, 3);
        let start = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_empty_bucket_waits_for_refill() {
        let limiter = TokenBucketRateLimiter::new(50.0, 1);
        limiter.acquire().await;
        let start = Instant::now();
        limiter.acquire().await;
        // One token at 50 rps refills in ~20ms.
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
