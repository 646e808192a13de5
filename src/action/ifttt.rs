use futures_util::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::{report, Outcome, OutcomeReport, RunContext, ValidationAction};
use crate::config::action::{require, IftttConfig};
use crate::core::{ResultIdentifier, ValidationResult};
use crate::error::ActionError;
use crate::services::http;

const NAME: &str = "IFTTTNotificationAction";

/// JSON body POSTed to the maker webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationPayload<'a> {
    pub success: bool,
    pub checkpoint: Option<&'a str>,
    pub expectation_suite_name: &'a str,
    pub data_asset_name: &'a str,
    pub run_id: Value,
    pub batch_id: String,
    pub successful_expectations_count: u64,
    pub evaluated_expectations_count: u64,
}

impl<'a> NotificationPayload<'a> {
    pub fn new(result: &'a ValidationResult, checkpoint: Option<&'a str>) -> Self {
        Self {
            success: result.is_success(),
            checkpoint,
            expectation_suite_name: result.suite_name(),
            data_asset_name: result.data_asset_name(),
            run_id: result.run_id(),
            batch_id: result.batch_id(),
            successful_expectations_count: result.statistics.successful_expectations,
            evaluated_expectations_count: result.statistics.evaluated_expectations,
        }
    }
}

/// Posts a structured summary to `{endpoint}/trigger/{event}/json/with/key/{key}`.
#[derive(Debug, Clone)]
pub struct IftttNotificationAction {
    cfg: IftttConfig,
    webhook: Url,
}

impl IftttNotificationAction {
    pub fn new(cfg: IftttConfig) -> Result<Self, ActionError> {
        require(&cfg.webhook_key, "webhook_key")?;
        require(&cfg.event_name, "event_name")?;

        let invalid = |source| ActionError::InvalidUrl {
            url: cfg.endpoint.clone(),
            source,
        };
        let mut webhook = Url::parse(&cfg.endpoint).map_err(invalid)?;
        webhook
            .path_segments_mut()
            .map_err(|_| invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend([
                "trigger",
                cfg.event_name.as_str(),
                "json",
                "with",
                "key",
                cfg.webhook_key.as_str(),
            ]);

        Ok(Self { cfg, webhook })
    }

    pub fn config(&self) -> &IftttConfig {
        &self.cfg
    }

    pub fn webhook(&self) -> &str {
        self.webhook.as_str()
    }

    async fn notify(
        &self,
        result: Option<&ValidationResult>,
        identifier: &ResultIdentifier,
        ctx: &RunContext,
    ) -> Result<Option<OutcomeReport>, ActionError> {
        tracing::debug!(target: "validation_notify", "{}.run", NAME);

        let Some(result) = result else {
            tracing::warn!(
                target: "validation_notify",
                "No validation result was passed to {} action. Skipping action.",
                NAME
            );
            return Ok(None);
        };

        if !identifier.is_validation_result() {
            return Err(ActionError::UnsupportedIdentifier {
                kind: identifier.kind(),
            });
        }

        let success = result.is_success();
        if !self.cfg.notify_on.should_notify(success) {
            tracing::debug!(
                target: "validation_notify",
                success,
                notify_on = ?self.cfg.notify_on,
                "notification filtered out"
            );
            return Ok(Some(report(NAME, Outcome::Skipped)));
        }

        let payload = NotificationPayload::new(result, ctx.checkpoint_identifier.as_deref());
        let delivery = http::post_json(self.webhook(), &payload).await;

        let outcome = if delivery.is_delivered() {
            Outcome::Sent
        } else {
            Outcome::Failed
        };
        Ok(Some(report(NAME, outcome)))
    }
}

impl ValidationAction for IftttNotificationAction {
    fn name(&self) -> &'static str {
        NAME
    }

    fn run<'a>(
        &'a self,
        result: Option<&'a ValidationResult>,
        identifier: &'a ResultIdentifier,
        ctx: &'a RunContext,
    ) -> BoxFuture<'a, Result<Option<OutcomeReport>, ActionError>> {
        Box::pin(self.notify(result, identifier, ctx))
    }
}
