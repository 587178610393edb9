use std::time::{Duration, SystemTime};

/// Access token handed out by a [`super::auth::TokenSource`]
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub access_token: String,
    pub expires_at: SystemTime,
}

impl TokenInfo {
    pub fn new(access_token: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: SystemTime::now() + expires_in,
        }
    }

    /// True once we are within `margin` of the expiry time
    pub fn needs_refresh(&self, margin: Duration) -> bool {
        match self.expires_at.duration_since(SystemTime::now()) {
            Ok(remaining) => remaining <= margin,
            Err(_) => true, // already expired
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_margin() {
        let token = TokenInfo::new("abc", Duration::from_secs(3600));
        assert!(!token.needs_refresh(Duration::from_secs(60)));
        assert!(token.needs_refresh(Duration::from_secs(7200)));

        let expired = TokenInfo {
            access_token: "old".to_string(),
            expires_at: SystemTime::now() - Duration::from_secs(1),
        };
        assert!(expired.needs_refresh(Duration::ZERO));
    }
}
