use std::fmt;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::field::FieldKind;

/// What happens after a recorded failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure and move on to the next unit of work.
    Continue,
    /// Record the failure and abort the remaining phases.
    Halt,
}

impl FailurePolicy {
    pub fn from_continue_flag(continue_on_error: bool) -> Self {
        if continue_on_error {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Halt
        }
    }
}

/// Result of one visible, enabled element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FillOutcome {
    pub kind: FieldKind,
    /// 1-based position among the elements discovered for `kind`.
    pub index: usize,
    pub success: bool,
    /// Committed value on success, error text on failure.
    pub detail: String,
}

/// Run-scoped accumulator. Counts only grow and errors are only appended.
#[derive(Debug)]
pub struct RunLedger {
    started: Instant,
    policy: FailurePolicy,
    filled: usize,
    errors: Vec<String>,
    outcomes: Vec<FillOutcome>,
}

impl RunLedger {
    pub fn start(policy: FailurePolicy) -> Self {
        Self {
            started: Instant::now(),
            policy,
            filled: 0,
            errors: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn outcomes(&self) -> &[FillOutcome] {
        &self.outcomes
    }

    /// Fold one element's result into the ledger.
    ///
    /// Returns `Err(Error::Aborted)` for a failure under [`FailurePolicy::Halt`].
    pub fn record(
        &mut self,
        kind: FieldKind,
        index: usize,
        result: std::result::Result<String, Error>,
    ) -> Result<()> {
        match result {
            Ok(value) => {
                self.filled += 1;
                info!("Filled {kind} {index}: {}", preview(&value));
                self.outcomes.push(FillOutcome {
                    kind,
                    index,
                    success: true,
                    detail: value,
                });
                Ok(())
            }
            Err(err) => {
                let message = format!("{} {index}: {err}", kind.failure_prefix());
                self.outcomes.push(FillOutcome {
                    kind,
                    index,
                    success: false,
                    detail: err.to_string(),
                });
                self.fail(message)
            }
        }
    }

    /// Record a failure that is not tied to one element (discovery, submission).
    pub fn fail(&mut self, message: String) -> Result<()> {
        error!("{message}");
        self.errors.push(message.clone());
        match self.policy {
            FailurePolicy::Continue => Ok(()),
            FailurePolicy::Halt => Err(Error::Aborted(message)),
        }
    }

    /// Append an error that never aborts, whatever the policy.
    pub fn note(&mut self, message: String) {
        error!("{message}");
        self.errors.push(message);
    }

    /// Close the ledger. Consumes it, so a run reports exactly once.
    pub fn summarize(self, submitted: bool, aborted: bool) -> RunSummary {
        RunSummary {
            duration: self.started.elapsed(),
            filled: self.filled,
            errors: self.errors,
            outcomes: self.outcomes,
            submitted,
            aborted,
        }
    }
}

fn preview(value: &str) -> String {
    value.chars().take(30).collect()
}

/// The single user-visible report of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    #[serde(rename = "duration_secs", serialize_with = "as_secs")]
    pub duration: Duration,
    pub filled: usize,
    pub errors: Vec<String>,
    pub outcomes: Vec<FillOutcome>,
    pub submitted: bool,
    pub aborted: bool,
}

fn as_secs<S: Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{rule}")?;
        writeln!(f, "EXECUTION SUMMARY")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Duration: {:.2} seconds", self.duration.as_secs_f64())?;
        writeln!(f, "Fields Filled: {}", self.filled)?;
        writeln!(f, "Submitted: {}", if self.submitted { "yes" } else { "no" })?;
        if self.aborted {
            writeln!(f, "Run aborted before completion")?;
        }
        writeln!(f, "Errors: {}", self.errors.len())?;
        if !self.errors.is_empty() {
            writeln!(f)?;
            writeln!(f, "Error Details:")?;
            for (i, error) in self.errors.iter().enumerate() {
                writeln!(f, "  {}. {error}", i + 1)?;
            }
        }
        write!(f, "{rule}")
    }
}
