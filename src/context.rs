// src/context.rs
//! Per-run state handed explicitly through the pipeline.

use crate::error_recovery::RetryPolicy;
use crate::pipeline::TicketScope;
use crate::report::RunMetrics;
use crate::types::{PageSize, TicketPattern};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// The knobs that shape one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub pattern: TicketPattern,
    pub page_size: PageSize,
    pub scope: TicketScope,
    pub retry: RetryPolicy,
    pub max_pages: Option<u32>,
    pub run_timeout: Option<Duration>,
}

impl RunSettings {
    pub fn new(pattern: TicketPattern) -> Self {
        Self {
            pattern,
            page_size: PageSize::default(),
            scope: TicketScope {
                open_only: true,
                client_id: None,
            },
            retry: RetryPolicy::default(),
            max_pages: None,
            run_timeout: None,
        }
    }
}

/// Identity, configuration and counters of the run in progress.
#[derive(Debug)]
pub struct RunContext {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub settings: RunSettings,
    pub log_file: Option<PathBuf>,
    metrics: RunMetrics,
    clock_start: Instant,
}

impl RunContext {
    pub fn new(settings: RunSettings) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            settings,
            log_file: None,
            metrics: RunMetrics::new(),
            clock_start: Instant::now(),
        }
    }

    pub fn with_log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    pub(crate) fn metrics_mut(&mut self) -> &mut RunMetrics {
        &mut self.metrics
    }

    pub fn elapsed(&self) -> Duration {
        self.clock_start.elapsed()
    }

    /// True once the optional run timeout has elapsed.
    pub fn deadline_passed(&self) -> bool {
        self.settings
            .run_timeout
            .is_some_and(|limit| self.elapsed() >= limit)
    }
}
