// src/model/triage.rs
use crate::types::TicketId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Urgency assigned by triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!(
                "invalid priority '{}', expected one of low, medium, high",
                other
            )),
        }
    }
}

/// Structured outcome of triaging one ticket.
///
/// Serializes to the triage payload schema consumed by ticket sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    pub ticket_id: TicketId,
    pub priority: Priority,
    pub actionable_steps: Vec<String>,
    pub comments: String,
}

impl TriageResult {
    /// Renders the result as a plain-text ticket note.
    pub fn to_note(&self) -> String {
        let mut note = format!("Automated triage - priority: {}\n", self.priority);
        note.push_str("Actionable steps:\n");
        for (index, step) in self.actionable_steps.iter().enumerate() {
            note.push_str(&format!("{}. {}\n", index + 1, step));
        }
        if !self.comments.is_empty() {
            note.push_str(&format!("Comments: {}\n", self.comments));
        }
        note
    }
}
