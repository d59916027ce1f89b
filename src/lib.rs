//! WikiAgent: answers natural-language questions from Wikipedia
//!
//! A question is searched on the MediaWiki API, the top hit's extract and
//! thumbnail are fetched, and the result is normalized into an [`Answer`].

pub mod config;
pub mod metrics;
pub mod network;
pub mod resolver;
pub mod web;
pub mod wiki;

pub use config::Settings;
pub use resolver::{Answer, Outcome, Question, ResolveError, Resolver};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for upstream requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 5;

/// Maximum timeout that can be set
pub const MAX_TIMEOUT: u64 = 30;
