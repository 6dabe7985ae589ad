//! Deadline wrapper for budgeted external calls

use std::future::Future;
use std::time::Duration;

use crate::error::{Error, Result};

/// Race a fallible operation against a deadline.
///
/// On expiry the future is dropped, which cancels it at its next await
/// point. A request already sent to a remote service may still complete
/// there; callers must not depend on the losing branch's effects.
pub async fn with_timeout<F, T>(operation: F, budget: Duration, what: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(budget, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("{} exceeded its {:?} budget", what, budget);
            Err(Error::timeout(what))
        }
    }
}
