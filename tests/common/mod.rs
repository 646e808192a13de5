#![allow(dead_code)]

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{dev::ServerHandle, http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tracing_subscriber::fmt::MakeWriter;
use validation_notify::{ResultIdentifier, RunIdentifier, ValidationResult};

#[derive(Debug, Clone)]
pub struct Hit {
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Hit {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

struct Recorder {
    hits: Arc<Mutex<Vec<Hit>>>,
    status: StatusCode,
    delay: Duration,
}

/// Local stand-in for the maker webhook endpoint.
pub struct FakeWebhook {
    pub base: String,
    hits: Arc<Mutex<Vec<Hit>>>,
    handle: ServerHandle,
}

impl FakeWebhook {
    pub async fn start(status: u16) -> Self {
        Self::start_with_delay(status, Duration::ZERO).await
    }

    /// Records each hit, then holds the response for `delay`.
    pub async fn start_with_delay(status: u16, delay: Duration) -> Self {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(Recorder {
            hits: hits.clone(),
            status: StatusCode::from_u16(status).unwrap(),
            delay,
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .default_service(web::to(record))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base: format!("http://{addr}"),
            hits,
            handle,
        }
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn record(req: HttpRequest, body: web::Bytes, state: web::Data<Recorder>) -> HttpResponse {
    state.hits.lock().push(Hit {
        path: req.path().to_string(),
        content_type: req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    });
    if !state.delay.is_zero() {
        actix_web::rt::time::sleep(state.delay).await;
    }
    let text = if state.status == StatusCode::OK {
        "Congratulations! You've fired the event"
    } else {
        "upstream exploded"
    };
    HttpResponse::build(state.status).body(text)
}

/// An address nothing listens on.
pub fn closed_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Route this thread's logs into a buffer until the guard drops.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buf = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buf.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buf, guard)
}

pub fn result_identifier() -> ResultIdentifier {
    ResultIdentifier::ValidationResult {
        expectation_suite_name: "S".into(),
        run_id: RunIdentifier::default(),
        batch_identifier: "batch-1".into(),
    }
}

pub fn sample_result(success: bool) -> ValidationResult {
    ValidationResult::new(success)
        .with_statistics(10, 8)
        .with_meta("expectation_suite_name", json!("S"))
        .with_meta("run_id", json!("R123"))
        .with_meta("batch_kwargs", json!({ "data_asset_name": "A1" }))
}
