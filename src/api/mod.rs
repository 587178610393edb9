//! ComboCurve REST API client core
//!
//! The request engine is split in two: [`pagination`] follows `Link` headers
//! across pages and [`chunked`] splits bulk writes into bounded chunks, each
//! chunk paginated on its own. Both run every request through
//! [`ComboCurveClient`], which asks its [`AuthProvider`] for fresh headers
//! each time.

pub mod auth;
pub mod chunked;
pub mod client;
pub mod config;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod query;
pub mod records;
pub mod sort;

pub use auth::{AuthProvider, CachedAuth, StaticAuth, TokenSource};
pub use chunked::{ChunkPlan, plan_chunks};
pub use client::ComboCurveClient;
pub use config::{ClientConfig, ClientConfigBuilder, LogLevel, MonitoringConfig};
pub use envelope::{BulkError, BulkResult, BulkWriteSummary};
pub use error::ApiError;
pub use logging::{ApiLogger, OperationContext};
pub use models::TokenInfo;
pub use pagination::{Page, next_page_url};
pub use query::{Filters, Params};
pub use records::{Record, RecordList, ResponseBody, flatten_output, flatten_outputs, normalize};
pub use sort::{SortOrder, keysort};
