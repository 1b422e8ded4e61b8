#![allow(dead_code)]

use async_trait::async_trait;
use cexsign::{ExchangeConfig, ExchangeError, HttpRequest, Params, Transport};
use parking_lot::Mutex;
use serde_json::{json, Value};

pub const FROZEN_MILLIS: u64 = 1_700_000_000_000;

/// Standard credentials used across tests
pub fn test_config() -> ExchangeConfig {
    ExchangeConfig::new("test_key", "test_secret").passphrase("test_passphrase")
}

/// Object literal to ordered params
pub fn params(value: Value) -> Option<Params> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Transport that records every request and answers with a canned body
#[derive(Debug)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    response: Value,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::with_response(json!({"ok": true}))
    }

    pub fn with_response(response: Value) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response,
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<Value, ExchangeError> {
        self.requests.lock().push(request);
        Ok(self.response.clone())
    }
}
