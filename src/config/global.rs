use std::time::Duration;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;

// -------------------------------------------------------
// Global Config Struct
// -------------------------------------------------------
#[derive(Clone, Debug, Default)]
pub struct NotifierGlobalConfig {
    /// Per-request timeout for webhook calls (ms). None => block until the network resolves.
    pub request_timeout_ms: Option<u64>,

    /// Log each outbound webhook payload at DEBUG level
    pub log_payloads: bool,
}

impl NotifierGlobalConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

static GLOBAL: OnceCell<RwLock<NotifierGlobalConfig>> = OnceCell::new();

// -------------------------------------------------------
// INITIATE (GLOBAL INIT + TRACING SETUP)
// -------------------------------------------------------
pub fn initiate(cfg: NotifierGlobalConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let mut filter = EnvFilter::from_default_env();
    for directive in ["validation_notify=info", "validation_notify::http=debug"] {
        if let Ok(d) = directive.parse() {
            filter = filter.add_directive(d);
        }
    }

    let fmt_layer = fmt::layer().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    set_global(cfg);

    tracing::info!(target: "validation_notify", "validation-notify global initiated");
}

/// Replace the global config without touching the tracing subscriber.
pub fn set_global(cfg: NotifierGlobalConfig) {
    let cell = GLOBAL.get_or_init(|| RwLock::new(NotifierGlobalConfig::default()));
    *cell.write() = cfg;
}

// -------------------------------------------------------
// GETTER
// -------------------------------------------------------
pub fn global() -> NotifierGlobalConfig {
    GLOBAL
        .get()
        .map(|g| g.read().clone())
        .unwrap_or_default()
}
