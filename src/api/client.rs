use std::sync::Arc;
use std::time::Instant;

use reqwest::Method;
use reqwest::header::HeaderValue;
use serde_json::Value;

use super::auth::AuthProvider;
use super::config::ClientConfig;
use super::constants::headers;
use super::error::ApiError;
use super::logging::{ApiLogger, OperationContext};
use super::pagination::Page;
use super::query::Params;

/// ComboCurve REST API client with connection pooling.
///
/// Resource methods (projects, wells, econ models, ...) are implemented on this
/// type in [`crate::resources`]; the request engine lives in
/// [`super::pagination`] and [`super::chunked`].
#[derive(Clone)]
pub struct ComboCurveClient {
    config: ClientConfig,
    http_client: reqwest::Client,
    auth: Arc<dyn AuthProvider>,
    api_logger: ApiLogger,
}

impl ComboCurveClient {
    pub fn new(config: ClientConfig, auth: Arc<dyn AuthProvider>) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self::with_http_client(config, auth, http_client))
    }

    /// Create a client around a caller-configured HTTP client
    pub fn with_http_client(config: ClientConfig, auth: Arc<dyn AuthProvider>, http_client: reqwest::Client) -> Self {
        let api_logger = ApiLogger::new(config.monitoring.clone());
        Self {
            config,
            http_client,
            auth,
            api_logger,
        }
    }

    /// Client configured from the environment (see [`ClientConfig::from_env`]
    /// and [`super::auth::StaticAuth::from_env`])
    pub fn from_env() -> anyhow::Result<Self> {
        let config = ClientConfig::from_env()?;
        let auth = super::auth::StaticAuth::from_env()?;
        Self::new(config, Arc::new(auth))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Absolute URL for an API path such as `/projects`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    pub(crate) fn logger(&self) -> &ApiLogger {
        &self.api_logger
    }

    /// Send one request with freshly fetched auth headers and buffer the response.
    ///
    /// Non-2xx statuses fail with the request's method, URL and parameters
    /// attached. Nothing is retried.
    pub(crate) async fn send_request(
        &self,
        context: &OperationContext,
        method: &Method,
        url: &str,
        params: Option<&Params>,
        body: Option<&Value>,
        page: usize,
    ) -> anyhow::Result<Page> {
        let mut request_headers = self.auth.auth_headers().await?;
        if !context.correlation_id.is_empty() {
            if let Ok(value) = HeaderValue::from_str(&context.correlation_id) {
                request_headers.insert(headers::X_CORRELATION_ID, value);
            }
        }
        self.api_logger.log_request(context, url, page, &request_headers);

        let mut request = self.http_client.request(method.clone(), url).headers(request_headers);
        if let Some(params) = params {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let transport_error = |source: reqwest::Error| ApiError::Transport {
            method: method.clone(),
            url: url.to_string(),
            params: params.cloned(),
            source,
        };

        let request_start = Instant::now();
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        self.api_logger
            .log_response(context, url, status.as_u16(), request_start.elapsed());

        let response_headers = response.headers().clone();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(ApiError::Status {
                method: method.clone(),
                url: url.to_string(),
                params: params.cloned(),
                status,
                body: text,
            }
            .into());
        }

        Ok(Page {
            method: method.clone(),
            url: url.to_string(),
            status,
            headers: response_headers,
            body: text,
        })
    }
}

impl std::fmt::Debug for ComboCurveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComboCurveClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::StaticAuth;

    #[test]
    fn test_url_building() {
        let config = ClientConfig::builder().base_url("http://localhost:9000/v1").build();
        let client = ComboCurveClient::new(config, Arc::new(StaticAuth::new("k", "t"))).unwrap();

        assert_eq!(client.base_url(), "http://localhost:9000/v1");
        assert_eq!(client.url("/projects"), "http://localhost:9000/v1/projects");
    }
}
