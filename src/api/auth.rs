//! Per-request authentication headers
//!
//! The request engine asks its [`AuthProvider`] for headers before every HTTP
//! request, so a long paginated read keeps working across token expiry as long
//! as the provider refreshes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tokio::sync::RwLock;

use super::constants::headers;
use super::error::ApiError;
use super::models::TokenInfo;

/// Produces the authorization headers for one outgoing request
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Headers reflecting a currently valid credential
    async fn auth_headers(&self) -> anyhow::Result<HeaderMap>;
}

/// Obtains fresh access tokens, e.g. by signing a service-account JWT
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_token(&self) -> anyhow::Result<TokenInfo>;
}

/// `x-api-key` plus `Authorization: Bearer <token>` header pair
pub fn combocurve_headers(api_key: &str, access_token: &str) -> anyhow::Result<HeaderMap> {
    let mut map = HeaderMap::new();

    let mut key = HeaderValue::from_str(api_key)
        .map_err(|e| ApiError::Auth(format!("API key is not a valid header value: {}", e)))?;
    key.set_sensitive(true);
    map.insert(headers::API_KEY, key);

    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", access_token))
        .map_err(|e| ApiError::Auth(format!("Access token is not a valid header value: {}", e)))?;
    bearer.set_sensitive(true);
    map.insert(AUTHORIZATION, bearer);

    Ok(map)
}

/// Fixed API key and access token
#[derive(Clone)]
pub struct StaticAuth {
    api_key: String,
    access_token: String,
}

impl StaticAuth {
    pub fn new(api_key: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            access_token: access_token.into(),
        }
    }

    /// Read `COMBOCURVE_API_KEY` and `COMBOCURVE_ACCESS_TOKEN`
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let api_key = std::env::var("COMBOCURVE_API_KEY")
            .map_err(|_| ApiError::Auth("COMBOCURVE_API_KEY is not set".to_string()))?;
        let access_token = std::env::var("COMBOCURVE_ACCESS_TOKEN")
            .map_err(|_| ApiError::Auth("COMBOCURVE_ACCESS_TOKEN is not set".to_string()))?;

        Ok(Self::new(api_key, access_token))
    }
}

impl std::fmt::Debug for StaticAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticAuth").finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn auth_headers(&self) -> anyhow::Result<HeaderMap> {
        combocurve_headers(&self.api_key, &self.access_token)
    }
}

/// Shared token cache in front of a [`TokenSource`].
///
/// A cached token is reused until it is within `refresh_margin` of expiring,
/// then the source is asked for a new one. Concurrent callers that find the
/// token stale refresh it once; the others reuse the result.
pub struct CachedAuth<S> {
    source: S,
    api_key: String,
    refresh_margin: Duration,
    token: RwLock<Option<TokenInfo>>,
}

impl<S: TokenSource> CachedAuth<S> {
    pub fn new(source: S, api_key: impl Into<String>) -> Self {
        Self {
            source,
            api_key: api_key.into(),
            refresh_margin: Duration::from_secs(300), // refresh 5 minutes before expiry
            token: RwLock::new(None),
        }
    }

    pub fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    /// Drop the cached token so the next request fetches a new one
    pub async fn invalidate(&self) {
        *self.token.write().await = None;
    }

    async fn current_token(&self) -> anyhow::Result<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            if !token.needs_refresh(self.refresh_margin) {
                return Ok(token.access_token.clone());
            }
        }

        let mut guard = self.token.write().await;
        // another caller may have refreshed while we waited for the lock
        if let Some(token) = guard.as_ref() {
            if !token.needs_refresh(self.refresh_margin) {
                return Ok(token.access_token.clone());
            }
        }

        log::debug!("Fetching new ComboCurve access token");
        let token = self.source.fetch_token().await?;
        let access_token = token.access_token.clone();
        *guard = Some(token);
        Ok(access_token)
    }
}

#[async_trait]
impl<S: TokenSource> AuthProvider for CachedAuth<S> {
    async fn auth_headers(&self) -> anyhow::Result<HeaderMap> {
        let token = self.current_token().await?;
        combocurve_headers(&self.api_key, &token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        expires_in: Duration,
    }

    #[async_trait]
    impl TokenSource for CountingSource {
        async fn fetch_token(&self) -> anyhow::Result<TokenInfo> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(TokenInfo::new(format!("token-{}", n), self.expires_in))
        }
    }

    #[tokio::test]
    async fn test_static_auth_headers() {
        let auth = StaticAuth::new("my-key", "my-token");
        let headers = auth.auth_headers().await.unwrap();

        assert_eq!(headers.get("x-api-key").unwrap(), "my-key");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer my-token");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
    }

    #[tokio::test]
    async fn test_invalid_header_value_is_auth_error() {
        let auth = StaticAuth::new("bad\nkey", "token");
        let err = auth.auth_headers().await.unwrap_err();

        assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Auth(_))));
    }

    #[tokio::test]
    async fn test_cached_auth_reuses_valid_token() {
        let calls = Arc::new(AtomicUsize::new(0));
        let auth = CachedAuth::new(
            CountingSource { calls: calls.clone(), expires_in: Duration::from_secs(3600) },
            "key",
        );

        for _ in 0..3 {
            let headers = auth.auth_headers().await.unwrap();
            assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer token-1");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        auth.invalidate().await;
        let headers = auth.auth_headers().await.unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer token-2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cached_auth_refreshes_inside_margin() {
        let calls = Arc::new(AtomicUsize::new(0));
        let auth = CachedAuth::new(
            CountingSource { calls: calls.clone(), expires_in: Duration::from_secs(60) },
            "key",
        )
        .with_refresh_margin(Duration::from_secs(120));

        auth.auth_headers().await.unwrap();
        auth.auth_headers().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
