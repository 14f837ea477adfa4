// src/report/render.rs
use super::RunMetrics;
use std::fmt;

/// Formatted end-of-run summary, one entry per output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    lines: Vec<String>,
}

impl RunReport {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Writes every line to the log at info level.
    pub fn log(&self) {
        for line in &self.lines {
            log::info!("event=run_summary {}", line);
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Renders processed, succeeded and failed counts, then the failed ids.
pub fn render(metrics: &RunMetrics) -> RunReport {
    let mut lines = vec![
        format!("Tickets processed: {}", metrics.processed_count()),
        format!("Succeeded: {}", metrics.success_count()),
        format!("Failed: {}", metrics.error_count()),
    ];

    if metrics.error_count() > 0 {
        let ids: Vec<&str> = metrics
            .failed_ticket_ids()
            .iter()
            .map(|id| id.as_str())
            .collect();
        lines.push(format!("Failed tickets: {}", ids.join(", ")));
    }

    if metrics.skipped_count() > 0 {
        lines.push(format!(
            "Skipped (run deadline): {}",
            metrics.skipped_count()
        ));
    }

    RunReport { lines }
}
