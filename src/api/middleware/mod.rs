pub mod cors;
pub mod rate_limit;

pub use cors::Cors;
pub use rate_limit::{IpRateLimiter, RateLimit};
