//! HTTP client layer: `MarketHttp` with bearer-token injection.

pub mod client;

pub use client::{AuthMode, MarketHttp};
