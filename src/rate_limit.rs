use crate::error::{Result, ScrapeError};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Limiter shared by every clone of a client.
pub type SharedRateLimiter = Arc<DefaultDirectRateLimiter>;

/// Builds a limiter allowing `rate` requests per second.
///
/// The burst size equals the rate, so the first `rate` requests go out at
/// once and later ones are spaced `1 / rate` seconds apart. Waiters reserve
/// their slot, so they wake one at a time.
pub fn per_second(rate: u32) -> Result<SharedRateLimiter> {
    let rate = NonZeroU32::new(rate).ok_or_else(|| {
        ScrapeError::Config("rate limit must be at least 1 request per second".to_string())
    })?;
    Ok(Arc::new(RateLimiter::direct(Quota::per_second(rate))))
}
