//! Configuration for pipeline runs.
//!
//! Provides configuration structures for I/O behaviour, concurrency, and the
//! tunable remediation policies, with defaults suited to local runs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Bounded retry with exponential backoff for collaborator I/O calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first (1 = no retry).
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent attempt.
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 500,
        }
    }
}

impl RetryConfig {
    /// Backoff delay before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u64 << (retry.saturating_sub(1)).min(16);
        Duration::from_millis(self.backoff_ms.saturating_mul(factor))
    }
}

/// Timeouts and retries applied to every source read and table write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IoConfig {
    /// Per-call timeout in seconds for reads and writes.
    pub timeout_secs: u64,
    pub retry: RetryConfig,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            retry: RetryConfig::default(),
        }
    }
}

impl IoConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Remediation for user rows whose join date precedes the date of birth.
///
/// The rest of such a row has always looked legitimate in practice, so the
/// default keeps and annotates it; the assumption may not hold for other
/// deployments, hence the knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuspectDatePolicy {
    /// Keep the row and set the flag column (default).
    Flag,
    /// Drop the row like an anchor failure.
    Drop,
}

/// Global configuration for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtlConfig {
    /// Directory holding local source dumps for the file-backed reader.
    pub data_dir: PathBuf,
    /// Directory the warehouse writer places its tables in.
    pub output_dir: PathBuf,
    /// Maximum cleaning routines run concurrently.
    pub workers: usize,
    pub io: IoConfig,
    pub suspect_join_date: SuspectDatePolicy,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            output_dir: PathBuf::from("./warehouse"),
            workers: 4,
            io: IoConfig::default(),
            suspect_join_date: SuspectDatePolicy::Flag,
        }
    }
}

impl EtlConfig {
    /// Set the source data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the warehouse output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the concurrent routine limit.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the per-call I/O timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.io.timeout_secs = secs;
        self
    }

    /// Choose the remediation for join-before-birth user rows.
    pub fn with_suspect_join_date(mut self, policy: SuspectDatePolicy) -> Self {
        self.suspect_join_date = policy;
        self
    }
}
