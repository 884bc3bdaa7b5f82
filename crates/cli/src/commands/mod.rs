//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod products;

use std::future::Future;

use groovy_storefront::error::AppError;
use tracing::warn;

/// Run `attempt` until it succeeds, fails for good, or `retries` run out.
///
/// Only retryable errors (a failed catalog fetch) are retried.
pub async fn with_retries<T, F, Fut>(retries: u32, mut attempt: F) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut tries = 0;
    loop {
        match attempt().await {
            Err(e) if e.is_retryable() && tries < retries => {
                tries += 1;
                warn!("{e} (retry {tries}/{retries})");
            }
            result => return result,
        }
    }
}
