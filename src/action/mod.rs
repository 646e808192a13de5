//! The "send validation notification" capability and its two implementations.

mod ifttt;
mod template;

pub use ifttt::{IftttNotificationAction, NotificationPayload};
pub use template::TemplateNotificationAction;

use futures_util::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;

use crate::core::{ResultIdentifier, ValidationResult};
use crate::error::ActionError;
use crate::observability::prom;

pub const NOTIFICATION_SUCCEEDED: &str = "IFTTT notification succeeded.";
pub const NO_NOTIFICATION_SENT: &str = "No IFTTT notification sent.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Sent,
    Skipped,
    Failed,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Sent => "sent",
            Outcome::Skipped => "skipped",
            Outcome::Failed => "failed",
        }
    }
}

/// Returned to the host; serializes as `{"IFTTT_notification_result": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeReport {
    #[serde(rename = "IFTTT_notification_result")]
    pub message: &'static str,
    #[serde(skip)]
    pub outcome: Outcome,
}

impl OutcomeReport {
    pub fn new(outcome: Outcome) -> Self {
        let message = match outcome {
            Outcome::Sent => NOTIFICATION_SUCCEEDED,
            Outcome::Skipped | Outcome::Failed => NO_NOTIFICATION_SENT,
        };
        Self { message, outcome }
    }

    pub fn is_sent(&self) -> bool {
        self.outcome == Outcome::Sent
    }
}

/// Optional arguments the host passes alongside the result. Actions ignore
/// the ones they have no use for.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub data_asset: Option<String>,
    pub payload: Option<Value>,
    pub expectation_suite_identifier: Option<String>,
    pub checkpoint_identifier: Option<String>,
}

impl RunContext {
    pub fn with_checkpoint(mut self, checkpoint: impl Into<String>) -> Self {
        self.checkpoint_identifier = Some(checkpoint.into());
        self
    }
}

pub trait ValidationAction: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Ok(None)` means the action declined to run at all.
    fn run<'a>(
        &'a self,
        result: Option<&'a ValidationResult>,
        identifier: &'a ResultIdentifier,
        ctx: &'a RunContext,
    ) -> BoxFuture<'a, Result<Option<OutcomeReport>, ActionError>>;

    /// Drive [`run`](Self::run) on a fresh current-thread runtime.
    ///
    /// Must not be called from inside an async runtime.
    fn run_blocking(
        &self,
        result: Option<&ValidationResult>,
        identifier: &ResultIdentifier,
        ctx: &RunContext,
    ) -> Result<Option<OutcomeReport>, ActionError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        rt.block_on(self.run(result, identifier, ctx))
    }
}

pub(crate) fn report(action: &str, outcome: Outcome) -> OutcomeReport {
    prom::observe_outcome(action, outcome);
    OutcomeReport::new(outcome)
}
