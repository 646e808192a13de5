use crate::config::global;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;

/// Label only: delivery is a single attempt.
const MAX_RETRIES_LABEL: u32 = 10;

/// Result of one webhook attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    ConnectFailed,
    Errored(String),
    Rejected { status: u16, body: String },
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered)
    }
}

/// POST `body` as `application/json` to `url`, exactly once.
pub async fn post_json<T: Serialize + ?Sized>(url: &str, body: &T) -> Delivery {
    let cfg = global();
    if cfg.log_payloads {
        if let Ok(text) = serde_json::to_string(body) {
            tracing::debug!(target: "validation_notify::http", %url, payload = %text, "webhook payload");
        }
    }
    match client() {
        Ok(c) => deliver(c.post(url).json(body), url).await,
        Err(e) => client_failed(e),
    }
}

/// POST with no body and no extra headers, exactly once.
pub async fn post_empty(url: &str) -> Delivery {
    match client() {
        Ok(c) => deliver(c.post(url), url).await,
        Err(e) => client_failed(e),
    }
}

// one client per call; nothing is pooled across invocations
fn client() -> reqwest::Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = global().request_timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

fn client_failed(e: reqwest::Error) -> Delivery {
    tracing::error!(target: "validation_notify::http", "{}", e);
    Delivery::Errored(e.to_string())
}

/// Every failure is logged here and folded into the returned [`Delivery`].
async fn deliver(req: RequestBuilder, url: &str) -> Delivery {
    let res = match req.send().await {
        Ok(r) => r,
        Err(e) if e.is_connect() => {
            tracing::warn!(
                target: "validation_notify::http",
                "Failed to connect to IFTTT webhook at {} after {} retries.",
                url,
                MAX_RETRIES_LABEL
            );
            return Delivery::ConnectFailed;
        }
        Err(e) => {
            tracing::error!(target: "validation_notify::http", "{}", e);
            return Delivery::Errored(e.to_string());
        }
    };

    let status = res.status();
    if status == StatusCode::OK {
        tracing::debug!(target: "validation_notify::http", %url, "webhook delivered");
        return Delivery::Delivered;
    }

    let text = res.text().await.unwrap_or_default();
    tracing::warn!(
        target: "validation_notify::http",
        "Request to IFTTT webhook at {} returned error {}: {}",
        url,
        status.as_u16(),
        text
    );
    Delivery::Rejected {
        status: status.as_u16(),
        body: text,
    }
}
