//! Caller-supplied deadline and cancellation for core operations.

use std::future::{Future, pending};
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::AppError;

/// Bounds how long a core operation may run.
///
/// Every store and cache call issued on behalf of a caller is raced against the
/// deadline. When the deadline fires the in-flight future is dropped, which for
/// a database transaction means it is rolled back rather than committed.
///
/// # Examples
///
/// ```ignore
/// let deadline = Deadline::after(Duration::from_millis(250));
/// let link = deadline.run(repo.find_by_slug("promo")).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    at: Option<Instant>,
    cancel: Option<CancellationToken>,
}

impl Deadline {
    /// No time limit and no cancellation.
    pub fn none() -> Self {
        Self::default()
    }

    /// Expires `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self {
            at: Some(Instant::now() + timeout),
            cancel: None,
        }
    }

    /// Expires at an absolute instant.
    pub fn at(instant: Instant) -> Self {
        Self {
            at: Some(instant),
            cancel: None,
        }
    }

    /// Attaches a cancellation token; cancelling it aborts the operation.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Runs `fut` to completion unless the deadline fires first.
    ///
    /// # Errors
    ///
    /// - [`AppError::Cancelled`] if the cancellation token fires (checked first)
    /// - [`AppError::Timeout`] if the deadline passes
    /// - whatever `fut` itself returns
    pub async fn run<F, T>(&self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        let cancelled = async {
            match &self.cancel {
                Some(token) => token.cancelled().await,
                None => pending::<()>().await,
            }
        };

        let expired = async {
            match self.at {
                Some(at) => tokio::time::sleep_until(at).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(AppError::Cancelled),
            _ = expired => Err(AppError::Timeout),
            res = fut => res,
        }
    }
}
