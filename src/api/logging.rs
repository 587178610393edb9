//! Structured logging with correlation tracking for ComboCurve API operations
//!
//! One logical operation (a paginated read or a chunked write) gets one
//! correlation id; every page request, response, and chunk boundary is logged
//! against it.

use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::{Map, Value, json};

use super::config::{LogLevel, MonitoringConfig};

/// Structured logger for API operations with correlation tracking
#[derive(Debug, Clone)]
pub struct ApiLogger {
    config: MonitoringConfig,
}

/// Context for a single logical API operation
#[derive(Debug, Clone)]
pub struct OperationContext {
    pub correlation_id: String,
    pub method: Method,
    pub url: String,
    pub start_time: Instant,
}

impl ApiLogger {
    pub fn new(config: MonitoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MonitoringConfig {
        &self.config
    }

    /// Start tracking a new operation
    pub fn start_operation(&self, method: &Method, url: &str) -> OperationContext {
        let correlation_id = if self.config.correlation_ids {
            uuid::Uuid::new_v4().to_string()
        } else {
            String::new()
        };

        let context = OperationContext {
            correlation_id,
            method: method.clone(),
            url: url.to_string(),
            start_time: Instant::now(),
        };

        if self.config.request_logging && self.should_log(LogLevel::Debug) {
            let log_data = json!({
                "event": "operation_started",
                "correlation_id": context.correlation_id,
                "method": context.method.as_str(),
                "url": context.url,
                "timestamp": chrono::Utc::now().to_rfc3339()
            });

            debug!("API Operation Started: {}", log_data);
        }

        context
    }

    /// Log one outgoing page request
    pub fn log_request(&self, context: &OperationContext, url: &str, page: usize, headers: &HeaderMap) {
        if !self.config.request_logging || !self.should_log(LogLevel::Debug) {
            return;
        }

        let log_data = json!({
            "event": "http_request",
            "correlation_id": context.correlation_id,
            "method": context.method.as_str(),
            "url": url,
            "page": page,
            "headers": sanitize_headers(headers),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        debug!("HTTP Request: {}", log_data);
    }

    /// Log one page response
    pub fn log_response(&self, context: &OperationContext, url: &str, status_code: u16, duration: Duration) {
        if !self.config.request_logging {
            return;
        }

        let log_data = json!({
            "event": "http_response",
            "correlation_id": context.correlation_id,
            "method": context.method.as_str(),
            "url": url,
            "status_code": status_code,
            "duration_ms": duration.as_millis(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if status_code >= 400 {
            if self.should_log(LogLevel::Warn) {
                warn!("HTTP Response (Error): {}", log_data);
            }
        } else if self.should_log(LogLevel::Debug) {
            debug!("HTTP Response: {}", log_data);
        }
    }

    /// Log the start of one write chunk
    pub fn log_chunk(&self, context: &OperationContext, index: usize, size: usize) {
        if !self.config.request_logging || !self.should_log(LogLevel::Debug) {
            return;
        }

        let log_data = json!({
            "event": "chunk_started",
            "correlation_id": context.correlation_id,
            "method": context.method.as_str(),
            "url": context.url,
            "chunk": index,
            "records": size,
        });

        debug!("Write Chunk: {}", log_data);
    }

    /// Log completion of the whole operation
    pub fn complete_operation(&self, context: &OperationContext, pages: usize, error_message: Option<&str>) {
        if !self.config.performance_metrics {
            return;
        }

        let log_data = json!({
            "event": "operation_completed",
            "correlation_id": context.correlation_id,
            "method": context.method.as_str(),
            "url": context.url,
            "pages": pages,
            "success": error_message.is_none(),
            "error_message": error_message,
            "duration_ms": context.elapsed().as_millis(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        match error_message {
            None if self.should_log(LogLevel::Info) => info!("API Operation Completed: {}", log_data),
            Some(_) if self.should_log(LogLevel::Error) => error!("API Operation Failed: {}", log_data),
            _ => {}
        }
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level <= self.config.log_level
    }
}

impl OperationContext {
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Header map as JSON with credentials redacted
fn sanitize_headers(headers: &HeaderMap) -> Value {
    let mut sanitized = Map::new();

    for (name, value) in headers {
        let key = name.as_str();
        let redact = key.contains("authorization") || key.contains("token") || key.contains("key");
        let value = if redact {
            "[REDACTED]".to_string()
        } else {
            value.to_str().unwrap_or("[binary]").to_string()
        };
        sanitized.insert(key.to_string(), Value::String(value));
    }

    Value::Object(sanitized)
}
