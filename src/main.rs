// src/main.rs

use chrono::Local;
use clap::Parser;
use psa_triage::logging;
use psa_triage::output::{deliver, OutputPlan};
use psa_triage::{
    AppError, CommandLineInput, FileTicketSource, LlmTriageEngine, OpenAiClient, PipelineConfig,
    PsaHttpClient, RunContext, RunSummary, SimulatedTicketSink, TicketSink, TicketSource,
    TriageRun,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

/// Sets up console and run-file logging. Returns the log file path.
fn setup_logging(log_dir: &Path, verbose: bool) -> Result<PathBuf, AppError> {
    fs::create_dir_all(log_dir)?;
    let log_file_path = logging::log_file_path(log_dir, &Local::now().naive_local());

    log4rs::init_config(logging::build_config(&log_file_path, verbose)?)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(log_file_path)
}

/// Builds the collaborators named by `config` and runs the pipeline once.
async fn execute_pipeline(config: &PipelineConfig, ctx: &mut RunContext) -> Result<RunSummary, AppError> {
    let psa_client = config
        .psa
        .as_ref()
        .map(|psa| PsaHttpClient::new(psa.base_url.clone(), &psa.api_key))
        .transpose()?;

    let source: Box<dyn TicketSource> = match (&config.tickets_file, &psa_client) {
        (Some(path), _) => Box::new(FileTicketSource::load(path).await?),
        (None, Some(client)) => Box::new(client.clone()),
        (None, None) => {
            return Err(AppError::MissingConfiguration(
                "PSA_BASE_URL and PSA_API_KEY are required without --tickets-file".to_string(),
            ))
        }
    };

    let sink: Box<dyn TicketSink> = match (&psa_client, config.apply_updates) {
        (Some(client), true) => {
            log::info!("Ticket updates will be posted to the PSA");
            Box::new(client.clone())
        }
        _ => Box::new(SimulatedTicketSink::new(config.update_delay)),
    };

    let completion = &config.completion;
    let llm = OpenAiClient::new(
        completion.api_key.clone(),
        completion.model.clone(),
        completion.base_url.clone(),
    );
    log::info!("Triage model: {}", completion.model);
    let engine = LlmTriageEngine::new(Arc::new(llm))?;

    let outcome = TriageRun::new(source.as_ref(), &engine, sink.as_ref())
        .execute(ctx)
        .await;

    let delivery = deliver_summary(config, &outcome.summary);
    outcome.into_result_after_delivery(delivery)
}

/// Writes the JSON run summary wherever the user asked for it.
fn deliver_summary(config: &PipelineConfig, summary: &RunSummary) -> Result<(), AppError> {
    let json = summary.to_json()?;
    let plan = OutputPlan::for_summary(&json, config.summary_file.as_deref(), config.json);
    if plan.is_empty() {
        return Ok(());
    }

    let report = deliver(plan);
    if !report.is_success() {
        return Err(AppError::DeliveryFailed {
            failures: report.failed.iter().map(|f| f.error.clone()).collect(),
        });
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before clap reads TRIAGE_MODEL.
    dotenvy::dotenv().ok();
    let cli = CommandLineInput::parse();

    let log_file = match setup_logging(&cli.log_dir, cli.verbose) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    let config = match PipelineConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            log::error!("event=config_invalid error={}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    let mut ctx = RunContext::new(config.run.clone()).with_log_file(log_file);

    match execute_pipeline(&config, &mut ctx).await {
        Ok(summary) => {
            log::info!(
                "Run {} completed: {} processed, {} failed",
                summary.run_id,
                summary.metrics.processed_count(),
                summary.metrics.error_count()
            );
            if let Some(path) = &summary.log_file {
                log::info!("Run log: {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("event=run_failed run_id={} error={}", ctx.run_id, e);
            ExitCode::from(e.exit_code())
        }
    }
}
