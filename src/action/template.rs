use futures_util::future::BoxFuture;
use url::Url;

use super::{report, Outcome, OutcomeReport, RunContext, ValidationAction};
use crate::config::action::{require, TemplateConfig, ACTION_PLACEHOLDER};
use crate::core::{ResultIdentifier, ValidationResult};
use crate::error::ActionError;
use crate::services::http;

const NAME: &str = "TemplateNotificationAction";

/// Fires a bodiless POST at a URL whose `{action}` token names the outcome.
///
/// The URL is derived per call; the stored template is never rewritten, so
/// one instance can serve concurrent runs.
#[derive(Debug, Clone)]
pub struct TemplateNotificationAction {
    cfg: TemplateConfig,
}

impl TemplateNotificationAction {
    pub fn new(cfg: TemplateConfig) -> Result<Self, ActionError> {
        require(&cfg.webhook_template, "webhook_template")?;
        require(&cfg.pass_action, "pass_action")?;
        require(&cfg.fail_action, "fail_action")?;
        if !cfg.webhook_template.contains(ACTION_PLACEHOLDER) {
            return Err(ActionError::MissingPlaceholder(cfg.webhook_template));
        }
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.cfg
    }

    pub fn webhook_for(&self, success: bool) -> String {
        let action = if success {
            &self.cfg.pass_action
        } else {
            &self.cfg.fail_action
        };
        self.cfg.webhook_template.replace(ACTION_PLACEHOLDER, action)
    }

    async fn notify(
        &self,
        result: Option<&ValidationResult>,
    ) -> Result<Option<OutcomeReport>, ActionError> {
        tracing::debug!(target: "validation_notify", "{}.run", NAME);

        let result = result.ok_or(ActionError::MissingValidationResult)?;
        let webhook = self.webhook_for(result.is_success());

        if let Err(e) = Url::parse(&webhook) {
            tracing::error!(
                target: "validation_notify",
                url = %webhook,
                "derived webhook url is invalid: {}",
                e
            );
            return Ok(Some(report(NAME, Outcome::Failed)));
        }

        let outcome = if http::post_empty(&webhook).await.is_delivered() {
            Outcome::Sent
        } else {
            Outcome::Failed
        };
        Ok(Some(report(NAME, outcome)))
    }
}

impl ValidationAction for TemplateNotificationAction {
    fn name(&self) -> &'static str {
        NAME
    }

    fn run<'a>(
        &'a self,
        result: Option<&'a ValidationResult>,
        _identifier: &'a ResultIdentifier,
        _ctx: &'a RunContext,
    ) -> BoxFuture<'a, Result<Option<OutcomeReport>, ActionError>> {
        Box::pin(self.notify(result))
    }
}
