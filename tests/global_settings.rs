//! Tests that depend on the process-wide notifier config. They live in their
//! own binary and all install the same settings.

mod common;

use std::time::Duration;

use common::{capture_logs, result_identifier, sample_result, FakeWebhook};
use validation_notify::action::NO_NOTIFICATION_SENT;
use validation_notify::config::set_global;
use validation_notify::{
    IftttConfig, IftttNotificationAction, NotifierGlobalConfig, Outcome, RunContext,
    ValidationAction,
};

fn install() {
    set_global(NotifierGlobalConfig {
        request_timeout_ms: Some(300),
        log_payloads: true,
    });
}

fn action(endpoint: &str) -> IftttNotificationAction {
    IftttNotificationAction::new(IftttConfig::new("k3y", "ge_run").endpoint(endpoint)).unwrap()
}

#[actix_web::test]
async fn timed_out_send_is_logged_error_not_raised() {
    install();
    let hook = FakeWebhook::start_with_delay(200, Duration::from_secs(3)).await;
    let action = action(&hook.base);
    let (logs, _guard) = capture_logs();

    let report = action
        .run(Some(&sample_result(true)), &result_identifier(), &RunContext::default())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.outcome, Outcome::Failed);
    assert_eq!(report.message, NO_NOTIFICATION_SENT);
    assert_eq!(hook.hits().len(), 1);

    let logs = logs.contents();
    assert!(logs.contains("ERROR validation_notify::http:"), "{logs}");
    assert!(!logs.contains("Failed to connect"), "{logs}");

    hook.stop().await;
}

#[actix_web::test]
async fn payload_is_logged_when_enabled() {
    install();
    let hook = FakeWebhook::start(200).await;
    let action = action(&hook.base);
    let (logs, _guard) = capture_logs();

    let report = action
        .run(Some(&sample_result(true)), &result_identifier(), &RunContext::default())
        .await
        .unwrap()
        .unwrap();
    assert!(report.is_sent());

    let logs = logs.contents();
    assert!(logs.contains("webhook payload"), "{logs}");
    assert!(logs.contains(r#""data_asset_name":"A1""#), "{logs}");

    hook.stop().await;
}
