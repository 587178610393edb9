//! Resource façades
//!
//! Each module adds methods for one resource family to [`ComboCurveClient`].
//! They only build URLs and pick page sizes, chunk limits and sort orders; all
//! I/O goes through the pagination and chunked write engines.

pub mod directional;
pub mod econ_models;
pub mod econ_runs;
pub mod forecasts;
pub mod production;
pub mod projects;
pub mod root;
pub mod scenarios;
pub mod type_curves;
pub mod wells;

use crate::api::query::take;
use crate::api::sort::{SortOrder, keysort};
use crate::api::{ComboCurveClient, RecordList};

impl ComboCurveClient {
    /// Paginated GET with a page-size hint, stably sorted for presentation
    pub(crate) async fn get_sorted(&self, url: &str, limit: u32, order: &SortOrder) -> anyhow::Result<RecordList> {
        let items = self.get_items(url, Some(take(limit))).await?;
        keysort(items, order, false)
    }
}
