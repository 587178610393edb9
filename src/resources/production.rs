//! Daily and monthly production of a project
//!
//! Production volumes are large: pages carry up to [`PRODUCTION_TAKE`] rows
//! and writes are chunked at [`PRODUCTION_WRITE`].

use crate::api::constants::limits::{PRODUCTION_TAKE, PRODUCTION_WRITE};
use crate::api::query::{Filters, take, with_filters};
use crate::api::{ComboCurveClient, Record, RecordList};

/// Production frequency, which picks the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Monthly,
}

impl Frequency {
    fn collection(self) -> &'static str {
        match self {
            Self::Daily => "daily-productions",
            Self::Monthly => "monthly-productions",
        }
    }
}

impl ComboCurveClient {
    pub fn project_productions_url(&self, project_id: &str, frequency: Frequency, filters: Option<&Filters>) -> String {
        let url = self.url(&format!("/projects/{}/{}", project_id, frequency.collection()));
        with_filters(url, filters)
    }

    pub async fn get_project_daily_productions(
        &self,
        project_id: &str,
        filters: Option<&Filters>,
    ) -> anyhow::Result<RecordList> {
        let url = self.project_productions_url(project_id, Frequency::Daily, filters);
        self.get_items(&url, Some(take(PRODUCTION_TAKE))).await
    }

    pub async fn get_project_monthly_productions(
        &self,
        project_id: &str,
        filters: Option<&Filters>,
    ) -> anyhow::Result<RecordList> {
        let url = self.project_productions_url(project_id, Frequency::Monthly, filters);
        self.get_items(&url, Some(take(PRODUCTION_TAKE))).await
    }

    pub async fn post_project_productions(
        &self,
        project_id: &str,
        frequency: Frequency,
        data: &[Record],
    ) -> anyhow::Result<RecordList> {
        let url = self.project_productions_url(project_id, frequency, None);
        self.post_items(&url, data, Some(PRODUCTION_WRITE)).await
    }

    pub async fn put_project_productions(
        &self,
        project_id: &str,
        frequency: Frequency,
        data: &[Record],
    ) -> anyhow::Result<RecordList> {
        let url = self.project_productions_url(project_id, frequency, None);
        self.put_items(&url, data, Some(PRODUCTION_WRITE)).await
    }

    pub async fn patch_project_productions(
        &self,
        project_id: &str,
        frequency: Frequency,
        data: &[Record],
    ) -> anyhow::Result<RecordList> {
        let url = self.project_productions_url(project_id, frequency, None);
        self.patch_items(&url, data, Some(PRODUCTION_WRITE)).await
    }
}
