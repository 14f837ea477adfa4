// src/run.rs
//! One triage run: retrieve, filter, triage with retries, report.

use crate::api::collect_all_tickets;
use crate::context::RunContext;
use crate::error::AppError;
use crate::filter::TicketFilter;
use crate::pipeline::{TicketSink, TicketSource, TriageEngine};
use crate::processor::{BatchOutcome, RetryingProcessor};
use crate::report::{render, RunStatus, RunSummary};
use chrono::Utc;

/// How a run ended, plus the error that stopped it early, if any.
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub batch: BatchOutcome,
    pub error: Option<AppError>,
}

impl RunOutcome {
    pub fn into_result(self) -> Result<RunSummary, AppError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.summary),
        }
    }

    /// Like [`into_result`](Self::into_result), folding in how delivery of
    /// the summary went. A failed delivery is logged; it only becomes the
    /// result when the run itself ended without an error.
    pub fn into_result_after_delivery(
        self,
        delivery: Result<(), AppError>,
    ) -> Result<RunSummary, AppError> {
        if let Err(err) = delivery {
            log::error!(
                "event=summary_delivery_failed run_id={} error={}",
                self.summary.run_id,
                err
            );
            if self.error.is_none() {
                return Err(err);
            }
        }
        self.into_result()
    }
}

/// Wires a ticket source, triage engine and ticket sink into a pipeline.
pub struct TriageRun<'a> {
    source: &'a dyn TicketSource,
    engine: &'a dyn TriageEngine,
    sink: &'a dyn TicketSink,
}

impl<'a> TriageRun<'a> {
    pub fn new(
        source: &'a dyn TicketSource,
        engine: &'a dyn TriageEngine,
        sink: &'a dyn TicketSink,
    ) -> Self {
        Self {
            source,
            engine,
            sink,
        }
    }

    /// Runs the pipeline to the end. The summary report is logged on every
    /// path, including a failed retrieval.
    pub async fn execute(&self, ctx: &mut RunContext) -> RunOutcome {
        let settings = ctx.settings.clone();
        log::info!(
            "event=run_started run_id={} pattern={} page_size={} max_retries={} open_only={}",
            ctx.run_id,
            settings.pattern.as_str(),
            settings.page_size.get(),
            settings.retry.max_retries,
            settings.scope.open_only
        );

        let retrieved = match collect_all_tickets(
            self.source,
            settings.page_size,
            &settings.scope,
            settings.max_pages,
        )
        .await
        {
            Ok(retrieved) => retrieved,
            Err(err) => {
                log::error!("event=run_aborted run_id={} error={}", ctx.run_id, err);
                return finish(ctx, RunStatus::RetrievalFailed, 0, 0, BatchOutcome::default(), Some(err));
            }
        };

        let tickets_retrieved = retrieved.items.len();
        log::info!(
            "event=retrieval_complete tickets={} pages={}",
            tickets_retrieved,
            retrieved.pages_fetched
        );

        let filter = TicketFilter::new(settings.pattern.clone());
        let matched = filter.select(retrieved.items);
        log::info!(
            "event=filter_applied pattern={} matched={}/{}",
            settings.pattern.as_str(),
            matched.len(),
            tickets_retrieved
        );

        let processor = RetryingProcessor::new(self.engine, self.sink, settings.retry);
        let batch = processor.process_all(&matched, ctx).await;

        let (status, error) = if batch.deadline_hit() {
            let limit_secs = settings.run_timeout.map(|t| t.as_secs()).unwrap_or_default();
            (
                RunStatus::DeadlineExceeded,
                Some(AppError::DeadlineExceeded {
                    limit_secs,
                    skipped: batch.skipped,
                }),
            )
        } else {
            (RunStatus::Completed, None)
        };

        finish(ctx, status, tickets_retrieved, matched.len(), batch, error)
    }
}

fn finish(
    ctx: &RunContext,
    status: RunStatus,
    tickets_retrieved: usize,
    tickets_matched: usize,
    batch: BatchOutcome,
    error: Option<AppError>,
) -> RunOutcome {
    render(ctx.metrics()).log();
    log::info!(
        "event=run_finished run_id={} status={} elapsed_ms={}",
        ctx.run_id,
        status,
        ctx.elapsed().as_millis()
    );

    RunOutcome {
        summary: RunSummary {
            run_id: ctx.run_id,
            started_at: ctx.started_at,
            finished_at: Utc::now(),
            status,
            pattern: ctx.settings.pattern.as_str().to_string(),
            tickets_retrieved,
            tickets_matched,
            metrics: ctx.metrics().clone(),
            log_file: ctx.log_file.clone(),
        },
        batch,
        error,
    }
}
