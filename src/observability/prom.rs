use actix_web::HttpResponse;
use once_cell::sync::OnceCell;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::action::Outcome;

static REGISTRY: OnceCell<Registry> = OnceCell::new();
static NOTIFICATIONS: OnceCell<IntCounterVec> = OnceCell::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let registry = Registry::new();
        if let Ok(counter) = IntCounterVec::new(
            Opts::new(
                "validation_notify_notifications_total",
                "Validation notifications by action and outcome",
            ),
            &["action", "outcome"],
        ) {
            registry.register(Box::new(counter.clone())).ok();
            NOTIFICATIONS.set(counter).ok();
        }
        registry
    })
}

// Called by actions once per report
pub fn observe_outcome(action: &str, outcome: Outcome) {
    registry();
    if let Some(c) = NOTIFICATIONS.get() {
        c.with_label_values(&[action, outcome.as_str()]).inc();
    }
}

#[cfg(test)]
fn outcome_count(action: &str, outcome: Outcome) -> u64 {
    registry();
    NOTIFICATIONS
        .get()
        .map(|c| c.with_label_values(&[action, outcome.as_str()]).get())
        .unwrap_or(0)
}

pub async fn metrics_handler() -> HttpResponse {
    encode(registry())
}

fn encode(registry: &Registry) -> HttpResponse {
    let encoder = TextEncoder::new();
    let mf = registry.gather();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&mf, &mut buf) {
        return HttpResponse::InternalServerError().body(format!("encode error: {e}"));
    }
    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buf)
}
