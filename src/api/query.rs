//! Query string helpers
//!
//! Resource URLs may carry caller filters baked into the URL itself, while the
//! page-size hint travels as a separate parameter list so the pagination engine
//! can drop it after the first page.

use super::constants::PAGE_SIZE_PARAM;

/// Query parameters sent alongside the first request of a paginated sequence
pub type Params = Vec<(String, String)>;

/// Caller-supplied filters appended to a resource URL, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pairs: Vec<(String, String)>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `key=value` filter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Render as `?k=v&k2=v2`, or an empty string when there are no filters
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }

        let parts: Vec<String> = self
            .pairs
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect();

        format!("?{}", parts.join("&"))
    }

    /// Append these filters to `url`
    pub fn apply(&self, url: &str) -> String {
        format!("{}{}", url, self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Filters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Append optional filters to a base URL
pub fn with_filters(url: String, filters: Option<&Filters>) -> String {
    match filters {
        Some(filters) if !filters.is_empty() => filters.apply(&url),
        _ => url,
    }
}

/// Parameters carrying only the page-size hint
pub fn take(limit: u32) -> Params {
    vec![(PAGE_SIZE_PARAM.to_string(), limit.to_string())]
}
