//! Question and answer types

use crate::network::UpstreamError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const NO_RESULTS_TITLE: &str = "No Results";
pub const NO_RESULTS_ANSWER: &str = "No relevant Wikipedia article found.";
pub const ERROR_TITLE: &str = "Error";
pub const ERROR_ANSWER: &str = "Error fetching data from Wikipedia.";
pub const NO_EXTRACT_ANSWER: &str = "No extract available for this article.";

/// Free-text question, treated as opaque
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Question(String);

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Question {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Question {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured answer. Every field is always present; `image` serializes as
/// `null` when the article has no thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub title: String,
    pub answer: String,
    pub sources: Vec<String>,
    pub image: Option<String>,
}

impl Answer {
    pub fn no_results() -> Self {
        Self {
            title: NO_RESULTS_TITLE.to_string(),
            answer: NO_RESULTS_ANSWER.to_string(),
            sources: Vec::new(),
            image: None,
        }
    }

    pub fn error() -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            answer: ERROR_ANSWER.to_string(),
            sources: Vec::new(),
            image: None,
        }
    }
}

/// Coarse result kind, for callers that should not match on titles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Answered,
    NotFound,
    Error,
}

/// Why a question could not be answered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no matching article")]
    NotFound,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ResolveError {
    pub fn outcome(&self) -> Outcome {
        match self {
            ResolveError::NotFound => Outcome::NotFound,
            ResolveError::Upstream(_) => Outcome::Error,
        }
    }
}

impl From<ResolveError> for Answer {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound => Answer::no_results(),
            ResolveError::Upstream(_) => Answer::error(),
        }
    }
}
