//! Async client for the ComboCurve REST API.
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use combocurve_api::ComboCurveClient;
//!
//! let client = ComboCurveClient::from_env()?;
//! let projects = client.get_projects(None).await?;
//! println!("{} projects", projects.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod resources;

pub use api::{
    ApiError, AuthProvider, CachedAuth, ClientConfig, ComboCurveClient, Filters, Record, RecordList, SortOrder,
    StaticAuth, TokenSource,
};
pub use resources::econ_models::EconModelType;
