//! Metrics collection module
//!
//! Tracks how questions were resolved and how long resolution took.

use crate::resolver::Outcome;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// Resolution times kept for the rolling average
const RESPONSE_TIME_WINDOW: usize = 100;

/// Global metrics collector
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total question count
    total_questions: AtomicU64,
    answered: AtomicU64,
    not_found: AtomicU64,
    errors: AtomicU64,
    /// Recent resolution times in ms
    response_times: RwLock<VecDeque<u64>>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one resolved question
    pub fn record(&self, outcome: Outcome, elapsed: Duration) {
        self.total_questions.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            Outcome::Answered => &self.answered,
            Outcome::NotFound => &self.not_found,
            Outcome::Error => &self.errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        let mut times = self
            .response_times
            .write()
            .unwrap_or_else(|e| e.into_inner());
        if times.len() >= RESPONSE_TIME_WINDOW {
            times.pop_front();
        }
        times.push_back(elapsed.as_millis() as u64);
    }

    /// Get total questions
    pub fn total_questions(&self) -> u64 {
        self.total_questions.load(Ordering::Relaxed)
    }

    /// Average resolution time over the recent window
    pub fn avg_response_time(&self) -> Option<u64> {
        let times = self.response_times.read().unwrap_or_else(|e| e.into_inner());
        if times.is_empty() {
            None
        } else {
            Some(times.iter().sum::<u64>() / times.len() as u64)
        }
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_questions: self.total_questions(),
            answered: self.answered.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            avg_response_time_ms: self.avg_response_time(),
        }
    }
}

/// Serializable view of [`Metrics`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub total_questions: u64,
    pub answered: u64,
    pub not_found: u64,
    pub errors: u64,
    pub avg_response_time_ms: Option<u64>,
}
