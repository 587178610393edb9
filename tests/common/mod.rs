//! Shared helpers for the integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use combocurve_api::api::auth::combocurve_headers;
use combocurve_api::{AuthProvider, ClientConfig, ComboCurveClient, Record};
use reqwest::header::HeaderMap;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";
pub const TOKEN: &str = "test-token";

/// Static credentials that count how often headers were requested
#[derive(Default)]
pub struct CountingAuth {
    calls: AtomicUsize,
}

impl CountingAuth {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthProvider for CountingAuth {
    async fn auth_headers(&self) -> anyhow::Result<HeaderMap> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        combocurve_headers(API_KEY, TOKEN)
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Client pointed at the mock server, plus its auth counter
pub fn client_for(server: &MockServer) -> (ComboCurveClient, Arc<CountingAuth>) {
    init_logging();
    let auth = Arc::new(CountingAuth::default());
    let config = ClientConfig::builder().base_url(server.uri()).build();
    let client = ComboCurveClient::new(config, auth.clone()).unwrap();
    (client, auth)
}

/// `Link` header value pointing at `url` as the next page
pub fn next_link(url: &str) -> String {
    format!("<{}>; rel=\"next\"", url)
}

pub fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap()
}

/// `n` records of the form `{"seq": i}`
pub fn numbered(n: usize) -> Vec<Record> {
    (0..n).map(|i| record(json!({ "seq": i }))).collect()
}
