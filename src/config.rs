// src/config.rs
use crate::constants::{
    DEFAULT_COMPLETION_BASE_URL, DEFAULT_LOG_DIR, DEFAULT_MAX_RETRIES, DEFAULT_PAGE_SIZE,
    DEFAULT_TRIAGE_MODEL, RETRY_BACKOFF, SIMULATED_UPDATE_DELAY_MS,
};
use crate::context::RunSettings;
use crate::error::AppError;
use crate::error_recovery::RetryPolicy;
use crate::pipeline::TicketScope;
use crate::types::{ApiKey, ClientId, PageSize, TicketPattern, ValidatedUrl};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Regular expression matched against ticket ids (e.g. "^TICKET-")
    pub pattern: String,

    /// Tickets requested per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Extra attempts granted to a ticket after its first failure
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Only retrieve tickets belonging to this client
    #[arg(long)]
    pub client_id: Option<String>,

    /// Retrieve closed tickets as well as open ones
    #[arg(long, default_value_t = false)]
    pub include_closed: bool,

    /// Stop retrieval after this many pages
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: Option<u32>,

    /// Wall-clock limit for the run, in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub run_timeout: Option<u64>,

    /// Post triage notes to the PSA instead of simulating the update
    #[arg(long, default_value_t = false)]
    pub apply_updates: bool,

    /// Delay of the simulated update, in milliseconds
    #[arg(long, default_value_t = SIMULATED_UPDATE_DELAY_MS)]
    pub update_delay_ms: u64,

    /// Read tickets from a JSON export instead of the PSA API
    #[arg(long)]
    pub tickets_file: Option<PathBuf>,

    /// Write the run summary as JSON to this file
    #[arg(long)]
    pub summary_file: Option<PathBuf>,

    /// Print the run summary as JSON to stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Directory that receives the run log file
    #[arg(long, default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Completion model name
    #[arg(long, env = "TRIAGE_MODEL", default_value = DEFAULT_TRIAGE_MODEL)]
    pub model: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Connection details for the PSA REST API.
#[derive(Debug, Clone)]
pub struct PsaConnection {
    pub base_url: ValidatedUrl,
    pub api_key: ApiKey,
}

/// Connection details for the completion service.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub api_key: ApiKey,
    pub base_url: ValidatedUrl,
    pub model: String,
}

/// Resolved pipeline configuration, validated before any network call.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub run: RunSettings,
    pub completion: CompletionSettings,
    /// Present when tickets come from, or updates go to, the PSA API.
    pub psa: Option<PsaConnection>,
    pub tickets_file: Option<PathBuf>,
    pub apply_updates: bool,
    pub update_delay: Duration,
    pub summary_file: Option<PathBuf>,
    pub json: bool,
}

impl PipelineConfig {
    /// Resolves a complete pipeline configuration from CLI input and the
    /// process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Like [`resolve`](Self::resolve), reading variables through `env`.
    pub fn resolve_with<F>(cli: CommandLineInput, env: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pattern = TicketPattern::new(cli.pattern)?;
        let page_size = PageSize::new(cli.page_size)?;

        let completion = CompletionSettings {
            api_key: ApiKey::new(required(&env, "OPENAI_API_KEY")?)?,
            base_url: ValidatedUrl::parse(
                &env("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_COMPLETION_BASE_URL.to_string()),
            )?,
            model: cli.model,
        };

        let needs_psa = cli.tickets_file.is_none() || cli.apply_updates;
        let psa = if needs_psa {
            Some(PsaConnection {
                base_url: ValidatedUrl::parse(&required(&env, "PSA_BASE_URL")?)?,
                api_key: ApiKey::new(required(&env, "PSA_API_KEY")?)?,
            })
        } else {
            None
        };

        let client_id = cli.client_id.map(ClientId::new).transpose()?;

        let run = RunSettings {
            pattern,
            page_size,
            scope: TicketScope {
                open_only: !cli.include_closed,
                client_id,
            },
            retry: RetryPolicy::new(cli.max_retries, RETRY_BACKOFF),
            max_pages: cli.max_pages,
            run_timeout: cli.run_timeout.map(Duration::from_secs),
        };

        Ok(PipelineConfig {
            run,
            completion,
            psa,
            tickets_file: cli.tickets_file,
            apply_updates: cli.apply_updates,
            update_delay: Duration::from_millis(cli.update_delay_ms),
            summary_file: cli.summary_file,
            json: cli.json,
        })
    }
}

fn required<F>(env: &F, name: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    env(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} environment variable not set", name))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cli(args: &[&str]) -> CommandLineInput {
        let mut argv = vec!["psa-triage"];
        argv.extend_from_slice(args);
        CommandLineInput::try_parse_from(argv).unwrap()
    }

    fn env(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|v| v.to_string())
    }

    const FULL_ENV: &[(&str, &str)] = &[
        ("OPENAI_API_KEY", "sk-test-0123456789"),
        ("PSA_BASE_URL", "https://psa.example.com/api/v1"),
        ("PSA_API_KEY", "psa-token-0123456789"),
    ];

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::resolve_with(cli(&["^TICKET-"]), env(FULL_ENV)).unwrap();

        assert_eq!(config.run.page_size.get(), 100);
        assert_eq!(config.run.retry.max_retries, 0);
        assert!(config.run.scope.open_only);
        assert_eq!(config.completion.base_url.as_str(), "https://api.openai.com/v1");
        assert!(config.psa.is_some());
        assert!(!config.apply_updates);
        assert_eq!(config.update_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_missing_completion_key_is_fatal() {
        let result = PipelineConfig::resolve_with(
            cli(&["^TICKET-"]),
            env(&[
                ("PSA_BASE_URL", "https://psa.example.com"),
                ("PSA_API_KEY", "psa-token-0123456789"),
            ]),
        );

        match result {
            Err(AppError::MissingConfiguration(msg)) => assert!(msg.contains("OPENAI_API_KEY")),
            other => panic!("expected missing configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_tickets_file_does_not_need_psa() {
        let config = PipelineConfig::resolve_with(
            cli(&["^T-", "--tickets-file", "tickets.json"]),
            env(&[("OPENAI_API_KEY", "sk-test-0123456789")]),
        )
        .unwrap();
        assert!(config.psa.is_none());
    }

    #[test]
    fn test_apply_updates_needs_psa_even_with_tickets_file() {
        let result = PipelineConfig::resolve_with(
            cli(&["^T-", "--tickets-file", "tickets.json", "--apply-updates"]),
            env(&[("OPENAI_API_KEY", "sk-test-0123456789")]),
        );
        assert!(matches!(result, Err(AppError::MissingConfiguration(_))));
    }

    #[test]
    fn test_invalid_pattern_and_page_size_are_rejected() {
        let bad_pattern = PipelineConfig::resolve_with(cli(&["(unclosed"]), env(FULL_ENV));
        assert!(matches!(bad_pattern, Err(AppError::ValidationError(_))));

        let bad_size =
            PipelineConfig::resolve_with(cli(&["^T-", "--page-size", "0"]), env(FULL_ENV));
        assert!(matches!(bad_size, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_scope_and_limits() {
        let config = PipelineConfig::resolve_with(
            cli(&[
                "^T-",
                "--client-id",
                "acme",
                "--include-closed",
                "--max-retries",
                "3",
                "--max-pages",
                "5",
                "--run-timeout",
                "120",
            ]),
            env(FULL_ENV),
        )
        .unwrap();

        assert!(!config.run.scope.open_only);
        assert_eq!(config.run.scope.client_id.as_ref().map(|c| c.as_str()), Some("acme"));
        assert_eq!(config.run.retry.max_attempts(), 4);
        assert_eq!(config.run.max_pages, Some(5));
        assert_eq!(config.run.run_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_missing_pattern_is_a_usage_error() {
        assert!(CommandLineInput::try_parse_from(["psa-triage"]).is_err());
    }
}
