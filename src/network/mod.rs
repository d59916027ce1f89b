//! HTTP networking module
//!
//! Provides the outbound-call capability used to reach the MediaWiki API.

mod client;
mod error;
mod request;
mod user_agent;

pub use client::HttpClient;
pub use error::UpstreamError;
pub use request::{Fetcher, UpstreamRequest, UpstreamResponse};
pub use user_agent::generate_user_agent;
