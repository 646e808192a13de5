use serde::{Deserialize, Serialize};

use crate::action::{IftttNotificationAction, TemplateNotificationAction, ValidationAction};
use crate::error::ActionError;

pub const IFTTT_ENDPOINT: &str = "https://maker.ifttt.com";
pub const ACTION_PLACEHOLDER: &str = "{action}";

/// Which validation outcomes trigger a notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyOn {
    #[default]
    All,
    Success,
    Failure,
}

impl NotifyOn {
    pub fn should_notify(self, success: bool) -> bool {
        match self {
            NotifyOn::All => true,
            NotifyOn::Success => success,
            NotifyOn::Failure => !success,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IftttConfig {
    pub webhook_key: String,
    pub event_name: String,
    #[serde(default)]
    pub notify_on: NotifyOn,
    /// Base URL of the maker service; only overridden for tests or proxies.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    IFTTT_ENDPOINT.to_string()
}

impl IftttConfig {
    pub fn new(webhook_key: impl Into<String>, event_name: impl Into<String>) -> Self {
        Self {
            webhook_key: webhook_key.into(),
            event_name: event_name.into(),
            notify_on: NotifyOn::All,
            endpoint: default_endpoint(),
        }
    }

    pub fn notify_on(mut self, notify_on: NotifyOn) -> Self {
        self.notify_on = notify_on;
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// URL template with an `{action}` token replaced by `pass_action` or `fail_action`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub webhook_template: String,
    pub pass_action: String,
    pub fail_action: String,
}

impl TemplateConfig {
    pub fn new(
        webhook_template: impl Into<String>,
        pass_action: impl Into<String>,
        fail_action: impl Into<String>,
    ) -> Self {
        Self {
            webhook_template: webhook_template.into(),
            pass_action: pass_action.into(),
            fail_action: fail_action.into(),
        }
    }
}

/// Action entry as it appears in a checkpoint's action list.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "class_name")]
pub enum ActionConfig {
    #[serde(rename = "IFTTTNotificationAction")]
    Ifttt(IftttConfig),
    #[serde(rename = "TemplateNotificationAction")]
    Template(TemplateConfig),
}

impl ActionConfig {
    pub fn build(self) -> Result<Box<dyn ValidationAction>, ActionError> {
        let action: Box<dyn ValidationAction> = match self {
            ActionConfig::Ifttt(cfg) => Box::new(IftttNotificationAction::new(cfg)?),
            ActionConfig::Template(cfg) => Box::new(TemplateNotificationAction::new(cfg)?),
        };
        Ok(action)
    }
}

pub(crate) fn require(value: &str, field: &'static str) -> Result<(), ActionError> {
    if value.trim().is_empty() {
        return Err(ActionError::MissingConfig(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_truth_table() {
        let cases = [
            (NotifyOn::All, true, true),
            (NotifyOn::All, false, true),
            (NotifyOn::Success, true, true),
            (NotifyOn::Success, false, false),
            (NotifyOn::Failure, true, false),
            (NotifyOn::Failure, false, true),
        ];
        for (filter, success, expected) in cases {
            assert_eq!(filter.should_notify(success), expected, "{filter:?} / {success}");
        }
    }

    #[test]
    fn parses_ifttt_entry_with_defaults() {
        let cfg: ActionConfig = serde_json::from_value(json!({
            "class_name": "IFTTTNotificationAction",
            "webhook_key": "k",
            "event_name": "ge_run",
        }))
        .unwrap();
        match cfg {
            ActionConfig::Ifttt(c) => {
                assert_eq!(c.notify_on, NotifyOn::All);
                assert_eq!(c.endpoint, IFTTT_ENDPOINT);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_notify_on() {
        let parsed = serde_json::from_value::<ActionConfig>(json!({
            "class_name": "IFTTTNotificationAction",
            "webhook_key": "k",
            "event_name": "e",
            "notify_on": "sometimes",
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn builds_template_action() {
        let cfg: ActionConfig = serde_json::from_value(json!({
            "class_name": "TemplateNotificationAction",
            "webhook_template": "https://maker.ifttt.com/trigger/{action}/with/key/k",
            "pass_action": "dq_pass",
            "fail_action": "dq_fail",
        }))
        .unwrap();
        let action = cfg.build().unwrap();
        assert_eq!(action.name(), "TemplateNotificationAction");
    }

    #[test]
    fn build_rejects_empty_key() {
        let cfg = ActionConfig::Ifttt(IftttConfig::new("  ", "e"));
        assert!(matches!(cfg.build(), Err(ActionError::MissingConfig("webhook_key"))));
    }
}
