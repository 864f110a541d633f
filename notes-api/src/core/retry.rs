//! Startup retry for storage connections.
//!
//! Request handling never retries; this is only used while the server
//! is establishing its backend connection.

use std::future::Future;
use std::iter;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

const INITIAL_DELAY: Duration = Duration::from_millis(500);
const MAX_DELAY: Duration = Duration::from_secs(10);

/// Connection attempts separated by doubling delays, capped at [`MAX_DELAY`]
#[derive(Clone, Debug)]
pub struct StartupBackoff {
    attempts: u32,
    initial: Duration,
    max: Duration,
}

impl StartupBackoff {
    /// At least one attempt is always made
    pub fn new(attempts: u32) -> Self {
        Self {
            attempts: attempts.max(1),
            initial: INITIAL_DELAY,
            max: MAX_DELAY,
        }
    }

    /// Pauses between consecutive attempts
    fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let max = self.max;
        iter::successors(Some(self.initial.min(max)), move |d| {
            Some(d.saturating_mul(2).min(max))
        })
        .take(self.attempts as usize - 1)
    }

    /// Run `connect` until it succeeds or the attempts are used up.
    ///
    /// The last error is returned unchanged.
    pub async fn connect<F, Fut, T, E>(&self, target: &str, mut connect: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut delays = self.delays();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let err = match connect().await {
                Ok(connection) => {
                    if attempt > 1 {
                        info!("Connected to {} on attempt {}", target, attempt);
                    }
                    return Ok(connection);
                },
                Err(err) => err,
            };

            let Some(delay) = delays.next() else {
                error!("Giving up on {} after {} attempts: {}", target, attempt, err);
                return Err(err);
            };

            warn!(
                "{} unreachable (attempt {}/{}): {}. Retrying in {:?}",
                target, attempt, self.attempts, err, delay
            );
            sleep(delay).await;
        }
    }
}
