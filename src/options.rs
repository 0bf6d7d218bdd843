use std::time::Duration;

use crate::{Error, Result};

/// Default number of redirects followed by a single call.
pub const DEFAULT_MAX_REDIRECTS: usize = 9;
/// Default delay before the first redirected attempt.
pub const DEFAULT_MIN_REDIRECT_BACKOFF: Duration = Duration::from_millis(100);
/// Default upper bound for the delay between redirected attempts.
pub const DEFAULT_MAX_REDIRECT_BACKOFF: Duration = Duration::from_secs(13);

/// Configures redirect, backoff and timeout behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Maximum number of leader redirects followed per call.
    pub max_redirects: usize,
    /// Backoff before the first redirected attempt. Must be non-zero.
    pub min_redirect_backoff: Duration,
    /// Cap for the exponential redirect backoff.
    pub max_redirect_backoff: Duration,
    /// Per-request timeout. Not applied to SUBSCRIBE, whose response is a
    /// long-lived event stream.
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            min_redirect_backoff: DEFAULT_MIN_REDIRECT_BACKOFF,
            max_redirect_backoff: DEFAULT_MAX_REDIRECT_BACKOFF,
            timeout: None,
        }
    }
}

impl ClientOptions {
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_redirect_backoff(mut self, min: Duration, max: Duration) -> Self {
        self.min_redirect_backoff = min;
        self.max_redirect_backoff = max;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Checks the backoff bounds.
    pub fn validate(&self) -> Result<()> {
        if self.min_redirect_backoff.is_zero() {
            return Err(Error::InvalidOptions(
                "min_redirect_backoff must be non-zero".to_owned(),
            ));
        }
        if self.max_redirect_backoff < self.min_redirect_backoff {
            return Err(Error::InvalidOptions(format!(
                "max_redirect_backoff ({:?}) must be >= min_redirect_backoff ({:?})",
                self.max_redirect_backoff, self.min_redirect_backoff
            )));
        }
        Ok(())
    }
}
