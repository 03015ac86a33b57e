//! Small async helpers shared by ingestion and search.

use std::future::Future;
use std::time::Duration;

use crate::error::{Result, ScreenrackError};

/// Run `fut` with a deadline, mapping expiry to [`ScreenrackError::Timeout`].
pub async fn with_timeout<T, F>(label: &str, timeout: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(ScreenrackError::timeout(format!(
            "{label} exceeded {}ms",
            timeout.as_millis()
        ))),
    }
}
