//! Company wells and project wells
//!
//! Listings are sorted by `wellName`. Bulk patches are split into chunks of
//! [`WELLS_PATCH`] records.

use crate::api::constants::limits::{WELLS_PATCH, WELLS_TAKE};
use crate::api::query::{Filters, take, with_filters};
use crate::api::sort::SortOrder;
use crate::api::{ComboCurveClient, Record, RecordList};

impl ComboCurveClient {
    pub fn company_wells_url(&self, filters: Option<&Filters>) -> String {
        with_filters(self.url("/wells"), filters)
    }

    pub fn company_well_by_id_url(&self, well_id: &str) -> String {
        self.url(&format!("/wells/{}", well_id))
    }

    /// Company-scoped wells that were added to a project
    pub fn project_company_wells_url(&self, project_id: &str, filters: Option<&Filters>) -> String {
        with_filters(self.url(&format!("/projects/{}/company-wells", project_id)), filters)
    }

    pub fn project_company_well_by_id_url(&self, project_id: &str, well_id: &str) -> String {
        self.url(&format!("/projects/{}/company-wells/{}", project_id, well_id))
    }

    /// Project-scoped wells
    pub fn project_wells_url(&self, project_id: &str, filters: Option<&Filters>) -> String {
        with_filters(self.url(&format!("/projects/{}/wells", project_id)), filters)
    }

    pub fn project_well_by_id_url(&self, project_id: &str, well_id: &str) -> String {
        self.url(&format!("/projects/{}/wells/{}", project_id, well_id))
    }

    pub fn well_comments_url(&self, filters: Option<&Filters>) -> String {
        with_filters(self.url("/well-comments"), filters)
    }

    pub async fn get_company_wells(&self, filters: Option<&Filters>) -> anyhow::Result<RecordList> {
        let url = self.company_wells_url(filters);
        self.get_sorted(&url, WELLS_TAKE, &SortOrder::by_well_name()).await
    }

    pub async fn get_company_well_by_id(&self, well_id: &str) -> anyhow::Result<Record> {
        let url = self.company_well_by_id_url(well_id);
        self.get_item(&url, Some(take(WELLS_TAKE))).await
    }

    pub async fn get_project_company_wells(
        &self,
        project_id: &str,
        filters: Option<&Filters>,
    ) -> anyhow::Result<RecordList> {
        let url = self.project_company_wells_url(project_id, filters);
        self.get_sorted(&url, WELLS_TAKE, &SortOrder::by_well_name()).await
    }

    pub async fn get_project_company_well_by_id(&self, project_id: &str, well_id: &str) -> anyhow::Result<Record> {
        let url = self.project_company_well_by_id_url(project_id, well_id);
        self.get_item(&url, Some(take(WELLS_TAKE))).await
    }

    pub async fn get_project_wells(&self, project_id: &str, filters: Option<&Filters>) -> anyhow::Result<RecordList> {
        let url = self.project_wells_url(project_id, filters);
        self.get_sorted(&url, WELLS_TAKE, &SortOrder::by_well_name()).await
    }

    pub async fn get_project_well_by_id(&self, project_id: &str, well_id: &str) -> anyhow::Result<Record> {
        let url = self.project_well_by_id_url(project_id, well_id);
        self.get_item(&url, Some(take(WELLS_TAKE))).await
    }

    pub async fn get_well_comments(&self, filters: Option<&Filters>) -> anyhow::Result<RecordList> {
        let url = self.well_comments_url(filters);
        self.get_items(&url, Some(take(WELLS_TAKE))).await
    }

    pub async fn patch_company_wells(&self, data: &[Record]) -> anyhow::Result<RecordList> {
        let url = self.company_wells_url(None);
        self.patch_items(&url, data, Some(WELLS_PATCH)).await
    }

    pub async fn patch_company_well_by_id(&self, well_id: &str, data: Record) -> anyhow::Result<RecordList> {
        let url = self.company_well_by_id_url(well_id);
        self.patch_items(&url, &[data], None).await
    }

    pub async fn patch_project_company_wells(&self, project_id: &str, data: &[Record]) -> anyhow::Result<RecordList> {
        let url = self.project_company_wells_url(project_id, None);
        self.patch_items(&url, data, Some(WELLS_PATCH)).await
    }

    pub async fn patch_project_company_well_by_id(
        &self,
        project_id: &str,
        well_id: &str,
        data: Record,
    ) -> anyhow::Result<RecordList> {
        let url = self.project_company_well_by_id_url(project_id, well_id);
        self.patch_items(&url, &[data], None).await
    }

    pub async fn patch_project_wells(&self, project_id: &str, data: &[Record]) -> anyhow::Result<RecordList> {
        let url = self.project_wells_url(project_id, None);
        self.patch_items(&url, data, Some(WELLS_PATCH)).await
    }

    pub async fn patch_project_well_by_id(
        &self,
        project_id: &str,
        well_id: &str,
        data: Record,
    ) -> anyhow::Result<RecordList> {
        let url = self.project_well_by_id_url(project_id, well_id);
        self.patch_items(&url, &[data], None).await
    }
}
