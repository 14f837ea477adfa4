// tests/common/mod.rs
//! In-memory pipeline collaborators that record how they were called.

#![allow(dead_code)]

use parking_lot::Mutex;
use psa_triage::{
    AppError, PageSize, Priority, RetryPolicy, RunSettings, Ticket, TicketFailure, TicketId,
    TicketPage, TicketPattern, TicketScope, TicketSink, TicketSource, TriageEngine, TriageResult,
};
use std::collections::HashMap;
use std::time::Duration;

pub fn ticket(id: &str, description: &str) -> Ticket {
    let description = (!description.is_empty()).then(|| description.to_string());
    Ticket::new(TicketId::new(id).unwrap(), description)
}

/// Run settings with no backoff, so retries do not slow tests down.
pub fn settings(pattern: &str, max_retries: u32) -> RunSettings {
    let mut settings = RunSettings::new(TicketPattern::new(pattern).unwrap());
    settings.retry = RetryPolicy::new(max_retries, Duration::ZERO);
    settings
}

/// Serves a fixed list of pages; page `n` is `pages[n - 1]`, and anything
/// past the end is empty.
pub struct StaticSource {
    pages: Vec<Vec<Ticket>>,
    fail_on_page: Option<u32>,
    pub requested: Mutex<Vec<u32>>,
}

impl StaticSource {
    pub fn new(pages: Vec<Vec<Ticket>>) -> Self {
        Self {
            pages,
            fail_on_page: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn single(tickets: Vec<Ticket>) -> Self {
        Self::new(vec![tickets])
    }

    /// Pages holding the given number of generated tickets each.
    pub fn sized(sizes: &[usize]) -> Self {
        let pages = sizes
            .iter()
            .enumerate()
            .map(|(page, &size)| {
                (0..size)
                    .map(|i| ticket(&format!("TICKET-{}-{}", page + 1, i), "generated"))
                    .collect()
            })
            .collect();
        Self::new(pages)
    }

    pub fn failing_on(mut self, page: u32) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().len()
    }
}

#[async_trait::async_trait]
impl TicketSource for StaticSource {
    async fn fetch_page(
        &self,
        page_number: u32,
        _page_size: PageSize,
        _scope: &TicketScope,
    ) -> Result<TicketPage, AppError> {
        self.requested.lock().push(page_number);
        if self.fail_on_page == Some(page_number) {
            return Err(AppError::MalformedResponse("backend unavailable".to_string()));
        }
        let items = self
            .pages
            .get(page_number as usize - 1)
            .cloned()
            .unwrap_or_default();
        Ok(TicketPage::new(page_number, items))
    }
}

/// How the scripted engine treats one ticket.
#[derive(Debug, Clone, Copy)]
pub enum Script {
    Succeed,
    /// Fail this many calls, then succeed.
    FailTimes(u32),
    AlwaysFail,
}

/// Triage engine whose behavior is scripted per ticket id. Unscripted
/// tickets succeed.
#[derive(Default)]
pub struct ScriptedEngine {
    scripts: HashMap<String, Script>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ticket_id: &str, script: Script) -> Self {
        self.scripts.insert(ticket_id.to_string(), script);
        self
    }

    pub fn calls_for(&self, ticket_id: &str) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|(id, _)| id == ticket_id)
            .map(|(_, description)| description.clone())
            .collect()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait::async_trait]
impl TriageEngine for ScriptedEngine {
    async fn generate_triage(
        &self,
        ticket_id: &TicketId,
        description: &str,
    ) -> Result<TriageResult, TicketFailure> {
        let attempt = {
            let mut calls = self.calls.lock();
            calls.push((ticket_id.to_string(), description.to_string()));
            calls.iter().filter(|(id, _)| id == ticket_id.as_str()).count() as u32
        };

        let fail = match self.scripts.get(ticket_id.as_str()).copied().unwrap_or(Script::Succeed) {
            Script::Succeed => false,
            Script::FailTimes(n) => attempt <= n,
            Script::AlwaysFail => true,
        };
        if fail {
            return Err(TicketFailure::TriageParse("response was not JSON".to_string()));
        }

        Ok(TriageResult {
            ticket_id: ticket_id.clone(),
            priority: Priority::Medium,
            actionable_steps: vec!["Reproduce the issue".to_string()],
            comments: String::new(),
        })
    }
}

/// Sink that accepts every update and remembers which tickets it saw.
#[derive(Default)]
pub struct RecordingSink {
    pub updated: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl TicketSink for RecordingSink {
    async fn apply_triage(&self, ticket_id: &TicketId, result: &TriageResult) -> Result<(), TicketFailure> {
        assert_eq!(&result.ticket_id, ticket_id);
        self.updated.lock().push(ticket_id.to_string());
        Ok(())
    }
}
