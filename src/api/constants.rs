//! API constants for the ComboCurve REST API

/// Default base URL including the API version
pub const API_BASE_URL: &str = "https://api.combocurve.com/v1";

/// Query parameter carrying the page-size hint on the first request of a sequence
pub const PAGE_SIZE_PARAM: &str = "take";

/// Query parameter asking the server to assemble export pages in parallel
pub const CONCURRENCY_PARAM: &str = "concurrency";

/// Standard headers
pub mod headers {
    /// Header carrying the ComboCurve API key
    pub const API_KEY: &str = "x-api-key";

    /// Response header carrying the next-page cursor
    pub const LINK: &str = "link";

    /// Number of records removed by a DELETE
    pub const X_DELETE_COUNT: &str = "x-delete-count";

    /// Correlation header attached to every request of one logical operation
    pub const X_CORRELATION_ID: &str = "x-correlation-id";
}

/// Page-size hints and write batch limits per resource family
pub mod limits {
    pub const DEFAULT_TAKE: u32 = 200;
    pub const WELLS_TAKE: u32 = 1000;
    pub const WELLS_PATCH: usize = 1000;
    pub const DIRECTIONAL_TAKE: u32 = 1000;
    pub const PRODUCTION_TAKE: u32 = 20_000;
    pub const PRODUCTION_WRITE: usize = 20_000;
    pub const ECON_MODELS_WRITE: usize = 500;
    pub const MONTHLY_EXPORT_TAKE: u32 = 100;
    /// Server-side worker hint sent with the first monthly export page request
    pub const MONTHLY_EXPORT_CONCURRENCY: u32 = 10;
    pub const FORECAST_OUTPUTS_TAKE: u32 = 1000;
}
