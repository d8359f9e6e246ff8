use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Runs `operation` up to `max_attempts` times, sleeping `backoff(attempt)`
/// between failures. `should_abort` classifies errors that waiting will not
/// cure (quota exhaustion); such an error is returned immediately regardless
/// of the attempts remaining. Attempts are numbered from 1.
pub async fn retry<T, E, F, Fut, B, A>(
    mut operation: F,
    max_attempts: u32,
    backoff: B,
    should_abort: A,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    B: Fn(u32) -> Duration,
    A: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let mut attempt = 1;
    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if should_abort(&err) || attempt >= max_attempts {
                    return Err(err);
                }
                let delay = backoff(attempt);
                warn!(attempt, max_attempts, %err, ?delay, "attempt failed, backing off");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// 1000ms doubling per retry: 1000, 2000, 4000, ...
pub fn doubling_backoff(base: Duration) -> impl Fn(u32) -> Duration {
    move |attempt| base * 2u32.saturating_pow(attempt.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn doubling_backoff_starts_at_base_and_doubles() {
        let backoff = doubling_backoff(Duration::from_millis(1000));
        assert_eq!(backoff(1), Duration::from_millis(1000));
        assert_eq!(backoff(2), Duration::from_millis(2000));
        assert_eq!(backoff(3), Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_without_sleeping_on_first_attempt() {
        let start = tokio::time::Instant::now();
        let result: Result<u32, String> = retry(
            |_| async { Ok(7) },
            3,
            doubling_backoff(Duration::from_millis(1000)),
            |_| false,
        )
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_attempts_with_full_backoff() {
        let calls = Cell::new(0u32);
        let start = tokio::time::Instant::now();
        let result: Result<(), String> = retry(
            |_| {
                calls.set(calls.get() + 1);
                async { Err("transient".to_string()) }
            },
            3,
            doubling_backoff(Duration::from_millis(1000)),
            |_| false,
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.get(), 3);
        // 1000ms after the first failure, 2000ms after the second.
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn aborting_error_returns_without_waiting() {
        let calls = Cell::new(0u32);
        let start = tokio::time::Instant::now();
        let result: Result<(), String> = retry(
            |_| {
                calls.set(calls.get() + 1);
                async { Err("quota".to_string()) }
            },
            3,
            doubling_backoff(Duration::from_millis(1000)),
            |e| e == "quota",
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_transient_failures() {
        let calls = Cell::new(0u32);
        let result: Result<u32, String> = retry(
            |attempt| {
                calls.set(calls.get() + 1);
                async move {
                    if attempt < 3 {
                        Err("transient".to_string())
                    } else {
                        Ok(attempt)
                    }
                }
            },
            3,
            doubling_backoff(Duration::from_millis(1000)),
            |_| false,
        )
        .await;
        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.get(), 3);
    }
}
