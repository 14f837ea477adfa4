// src/output/types.rs
//! Plan and report types for summary delivery.

use std::path::{Path, PathBuf};

/// Destinations for one rendered document, in delivery order.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    pub operations: Vec<DeliveryTarget>,
}

impl OutputPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation(mut self, operation: DeliveryTarget) -> Self {
        self.operations.push(operation);
        self
    }

    /// Plans delivery of a summary document to an optional file and,
    /// when `to_stdout` is set, standard output.
    pub fn for_summary(content: &str, summary_file: Option<&Path>, to_stdout: bool) -> Self {
        let mut plan = Self::new();
        if let Some(path) = summary_file {
            plan = plan.with_operation(DeliveryTarget::WriteFile {
                path: path.to_path_buf(),
                content: content.to_string(),
            });
        }
        if to_stdout {
            plan = plan.with_operation(DeliveryTarget::PrintToStdout {
                content: content.to_string(),
            });
        }
        plan
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// A single delivery operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Write content to a file, creating parent directories
    WriteFile { path: PathBuf, content: String },
    /// Print to stdout
    PrintToStdout { content: String },
}

/// Result of executing an output plan.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    pub completed: Vec<DeliveryTarget>,
    pub failed: Vec<FailedOperation>,
    pub bytes_written: usize,
}

impl OutputReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completed(mut self, operation: DeliveryTarget, bytes_written: usize) -> Self {
        self.bytes_written += bytes_written;
        self.completed.push(operation);
        self
    }

    pub fn with_failed(mut self, operation: FailedOperation) -> Self {
        self.failed.push(operation);
        self
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A failed operation with error information.
#[derive(Debug, Clone)]
pub struct FailedOperation {
    pub operation: DeliveryTarget,
    pub error: String,
}
