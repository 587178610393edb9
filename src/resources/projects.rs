use crate::api::constants::limits::DEFAULT_TAKE;
use crate::api::query::{Filters, with_filters};
use crate::api::sort::SortOrder;
use crate::api::{ComboCurveClient, Record, RecordList};

impl ComboCurveClient {
    pub fn projects_url(&self, filters: Option<&Filters>) -> String {
        with_filters(self.url("/projects"), filters)
    }

    pub fn project_by_id_url(&self, project_id: &str) -> String {
        format!("{}/{}", self.projects_url(None), project_id)
    }

    /// Projects sorted by name, then most recently updated
    pub async fn get_projects(&self, filters: Option<&Filters>) -> anyhow::Result<RecordList> {
        let url = self.projects_url(filters);
        self.get_sorted(&url, DEFAULT_TAKE, &SortOrder::by_name()).await
    }

    /// Create projects. The result holds the bulk-write envelopes, see
    /// [`crate::api::BulkWriteSummary`].
    pub async fn post_projects(&self, data: &[Record]) -> anyhow::Result<RecordList> {
        let url = self.projects_url(None);
        self.post_items(&url, data, None).await
    }

    pub async fn get_project_by_id(&self, project_id: &str) -> anyhow::Result<Record> {
        let url = self.project_by_id_url(project_id);
        self.get_item(&url, None).await
    }
}
