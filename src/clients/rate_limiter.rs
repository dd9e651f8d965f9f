//! Token-bucket admission control for outbound requests.
//!
//! The bucket starts full with `capacity` tokens (the configured
//! requests-per-minute). A refill task owned by the limiter adds one token
//! every `60s / capacity`, never exceeding the capacity. Each request takes
//! one token before its first attempt.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::clients::errors::HttpError;

/// How often a waiting caller re-checks the bucket when no refill wakes it.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

const REFILL_WINDOW: Duration = Duration::from_secs(60);

/// Shared token bucket.
#[derive(Debug)]
struct Bucket {
    tokens: Mutex<u32>,
    capacity: u32,
    refilled: Notify,
}

impl Bucket {
    fn try_take(&self) -> bool {
        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        if *tokens == 0 {
            return false;
        }
        *tokens -= 1;
        true
    }

    fn add_one(&self) {
        {
            let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
            if *tokens < self.capacity {
                *tokens += 1;
            }
        }
        self.refilled.notify_waiters();
    }

    fn available(&self) -> u32 {
        *self.tokens.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Token-bucket rate limiter shared by every request of a client.
///
/// The refill task is spawned on the first [`acquire`](Self::acquire), so a
/// limiter can be built outside a Tokio runtime. [`close`](Self::close) (or
/// dropping the limiter) stops it. After closing, callers may still drain
/// tokens that are left; once the bucket is empty `acquire` fails with
/// [`HttpError::RateLimiterClosed`] instead of waiting forever.
///
/// # Example
///
/// ```rust
/// use tokio_util::sync::CancellationToken;
/// use trendyol_api::clients::RateLimiter;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let limiter = RateLimiter::new(2);
/// let cancel = CancellationToken::new();
///
/// limiter.acquire(&cancel).await.unwrap();
/// assert_eq!(limiter.available(), 1);
/// limiter.close();
/// # }
/// ```
#[derive(Debug)]
pub struct RateLimiter {
    bucket: Arc<Bucket>,
    interval: Duration,
    shutdown: CancellationToken,
    refill_task: Mutex<Option<JoinHandle<()>>>,
}

// Verify RateLimiter is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RateLimiter>();
};

impl RateLimiter {
    /// Creates a full bucket admitting `requests_per_minute` requests per minute.
    ///
    /// A zero rate is treated as one request per minute; the configuration
    /// builder rejects zero before it gets here.
    #[must_use]
    pub fn new(requests_per_minute: u32) -> Self {
        let capacity = requests_per_minute.max(1);
        Self {
            bucket: Arc::new(Bucket {
                tokens: Mutex::new(capacity),
                capacity,
                refilled: Notify::new(),
            }),
            interval: REFILL_WINDOW / capacity,
            shutdown: CancellationToken::new(),
            refill_task: Mutex::new(None),
        }
    }

    /// Returns the maximum number of tokens.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.bucket.capacity
    }

    /// Returns the time between single-token refills.
    #[must_use]
    pub const fn refill_interval(&self) -> Duration {
        self.interval
    }

    /// Returns the number of tokens currently in the bucket.
    #[must_use]
    pub fn available(&self) -> u32 {
        self.bucket.available()
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Takes one token, waiting for a refill if the bucket is empty.
    ///
    /// An available token is always taken, even if `cancel` has already
    /// fired.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Cancelled`] if `cancel` fires while waiting.
    /// - [`HttpError::RateLimiterClosed`] if the limiter is closed and empty.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), HttpError> {
        self.ensure_refill_task();

        loop {
            // Registered before the check so a refill in between is not missed.
            let refilled = self.bucket.refilled.notified();

            if self.bucket.try_take() {
                return Ok(());
            }
            if self.is_closed() {
                return Err(HttpError::RateLimiterClosed);
            }

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(HttpError::Cancelled),
                () = self.shutdown.cancelled() => {}
                () = refilled => {}
                () = tokio::time::sleep(POLL_INTERVAL) => {}
            }
        }
    }

    /// Stops the refill task and wakes every waiting caller.
    pub fn close(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }
        self.shutdown.cancel();
        if let Some(handle) = self
            .refill_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
        self.bucket.refilled.notify_waiters();
        tracing::debug!("rate limiter closed");
    }

    fn ensure_refill_task(&self) {
        let mut task = self
            .refill_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // A finished task means the runtime it ran on has shut down.
        if self.is_closed() || task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        let bucket = Arc::clone(&self.bucket);
        let shutdown = self.shutdown.clone();
        let interval = self.interval;

        *task = Some(tokio::spawn(async move {
            tracing::debug!(
                capacity = bucket.capacity,
                interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
                "rate limiter refill task started"
            );
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    () = shutdown.cancelled() => break,
                    _ = ticker.tick() => bucket.add_one(),
                }
            }
            tracing::debug!("rate limiter refill task stopped");
        }));
    }
}

impl Drop for RateLimiter {
    fn drop(&mut self) {
        self.shutdown.cancel();
        if let Some(handle) = self
            .refill_task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_new_bucket_is_full() {
        let limiter = RateLimiter::new(60);
        assert_eq!(limiter.capacity(), 60);
        assert_eq!(limiter.available(), 60);
        assert_eq!(limiter.refill_interval(), Duration::from_secs(1));
        assert!(!limiter.is_closed());
    }

    #[test]
    fn test_zero_rate_is_clamped() {
        let limiter = RateLimiter::new(0);
        assert_eq!(limiter.capacity(), 1);
        assert_eq!(limiter.refill_interval(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_is_immediate_while_tokens_remain() {
        let limiter = RateLimiter::new(3);
        let cancel = CancellationToken::new();
        let start = Instant::now();

        for _ in 0..3 {
            limiter.acquire(&cancel).await.unwrap();
        }

        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(limiter.available(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_excess_acquire_waits_for_refill() {
        // 3 per minute: one token every 20s.
        let limiter = RateLimiter::new(3);
        let cancel = CancellationToken::new();
        for _ in 0..3 {
            limiter.acquire(&cancel).await.unwrap();
        }

        let start = Instant::now();
        limiter.acquire(&cancel).await.unwrap();
        let waited = start.elapsed();

        assert!(waited >= Duration::from_secs(20), "waited {waited:?}");
        assert!(waited < Duration::from_secs(21), "waited {waited:?}");
        assert_eq!(limiter.available(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokens_never_exceed_capacity() {
        let limiter = RateLimiter::new(4);
        let cancel = CancellationToken::new();
        limiter.acquire(&cancel).await.unwrap();

        tokio::time::sleep(Duration::from_secs(600)).await;

        assert_eq!(limiter.available(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_the_budget() {
        let limiter = Arc::new(RateLimiter::new(5));
        let start = Instant::now();

        let mut handles = Vec::new();
        for _ in 0..10 {
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move {
                limiter.acquire(&CancellationToken::new()).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // Five extra tokens at one per 12s.
        assert!(start.elapsed() >= Duration::from_secs(60));
        assert_eq!(limiter.available(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_interrupts_wait() {
        let limiter = RateLimiter::new(1);
        let cancel = CancellationToken::new();
        limiter.acquire(&cancel).await.unwrap();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        let result = limiter.acquire(&cancel).await;

        assert!(matches!(result, Err(HttpError::Cancelled)));
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_bucket_parks_caller_until_cancelled() {
        let limiter = RateLimiter::new(1);
        let cancel = CancellationToken::new();
        limiter.acquire(&cancel).await.unwrap();

        let mut waiting = tokio_test::task::spawn(limiter.acquire(&cancel));
        tokio_test::assert_pending!(waiting.poll());

        cancel.cancel();
        assert!(waiting.is_woken());
        let result = tokio_test::assert_ready!(waiting.poll());
        assert!(matches!(result, Err(HttpError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_available_token_wins_over_cancelled_signal() {
        let limiter = RateLimiter::new(2);
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert!(limiter.acquire(&cancel).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_limiter_drains_then_fails() {
        let limiter = RateLimiter::new(2);
        let cancel = CancellationToken::new();
        limiter.acquire(&cancel).await.unwrap();

        limiter.close();
        assert!(limiter.is_closed());

        assert!(limiter.acquire(&cancel).await.is_ok());
        let result = limiter.acquire(&cancel).await;
        assert!(matches!(result, Err(HttpError::RateLimiterClosed)));

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(limiter.available(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_wakes_pending_waiter() {
        let limiter = Arc::new(RateLimiter::new(1));
        limiter.acquire(&CancellationToken::new()).await.unwrap();

        let waiter = {
            let limiter = Arc::clone(&limiter);
            tokio::spawn(async move { limiter.acquire(&CancellationToken::new()).await })
        };
        tokio::task::yield_now().await;

        limiter.close();
        let result = waiter.await.unwrap();
        assert!(matches!(result, Err(HttpError::RateLimiterClosed)));
    }

    #[test]
    fn test_refill_resumes_on_a_later_runtime() {
        let limiter = RateLimiter::new(600);
        let cancel = CancellationToken::new();

        let first = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        first.block_on(async {
            while limiter.available() > 0 {
                limiter.acquire(&cancel).await.unwrap();
            }
        });
        drop(first);

        let second = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let result = second.block_on(async {
            tokio::time::timeout(Duration::from_secs(2), limiter.acquire(&cancel)).await
        });

        assert!(matches!(result, Ok(Ok(()))));
    }

    #[test]
    fn test_close_is_idempotent_without_runtime() {
        let limiter = RateLimiter::new(10);
        limiter.close();
        limiter.close();
        assert!(limiter.is_closed());
    }
}
