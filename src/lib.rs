pub mod action;
pub mod config;
pub mod core;
pub mod error;
pub mod observability;
pub mod services;

pub use action::{
    IftttNotificationAction, NotificationPayload, Outcome, OutcomeReport, RunContext,
    TemplateNotificationAction, ValidationAction,
};
pub use config::{global, initiate, ActionConfig, IftttConfig, NotifierGlobalConfig, NotifyOn, TemplateConfig};
pub use crate::core::{ResultIdentifier, RunIdentifier, ValidationResult, ValidationStatistics};
pub use error::ActionError;

// Prometheus metrics
pub use observability::prom::metrics_handler;
