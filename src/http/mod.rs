//! HTTP client module
//!
//! Provides the HTTP client used by the fetch coordinator.
//!
//! # Features
//!
//! - **Base URL joining**: relative endpoint paths resolve against a base
//! - **Rate Limiting**: optional token bucket rate limiter using governor
//! - **Status mapping**: non-2xx responses become `Error::HttpStatus`

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
