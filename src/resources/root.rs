//! Company-level resources that do not belong to a project

use crate::api::constants::limits::DEFAULT_TAKE;
use crate::api::query::{Filters, take, with_filters};
use crate::api::{ComboCurveClient, Record, RecordList};

/// Collections that carry custom columns
pub mod collections {
    pub const WELLS: &str = "wells";
    pub const DAILY_PRODUCTIONS: &str = "daily-productions";
    pub const MONTHLY_PRODUCTIONS: &str = "monthly-productions";
}

impl ComboCurveClient {
    pub fn custom_columns_url(&self, collection: &str, filters: Option<&Filters>) -> String {
        with_filters(self.url(&format!("/custom-columns/{}", collection)), filters)
    }

    pub fn well_identifiers_url(&self) -> String {
        self.url("/well-identifiers")
    }

    pub fn tags_url(&self, filters: Option<&Filters>) -> String {
        with_filters(self.url("/tags"), filters)
    }

    pub fn root_econ_runs_url(&self, filters: Option<&Filters>) -> String {
        with_filters(self.url("/econ-runs"), filters)
    }

    pub fn root_econ_run_by_id_url(&self, econ_run_id: &str) -> String {
        self.url(&format!("/econ-runs/{}", econ_run_id))
    }

    pub fn root_forecast_daily_volumes_url(&self, filters: Option<&Filters>) -> String {
        with_filters(self.url("/forecasts/daily-volumes"), filters)
    }

    pub fn root_forecast_monthly_volumes_url(&self, filters: Option<&Filters>) -> String {
        with_filters(self.url("/forecasts/monthly-volumes"), filters)
    }

    /// Custom column definitions of one collection, returned as a single record
    pub async fn get_custom_columns(&self, collection: &str, filters: Option<&Filters>) -> anyhow::Result<Record> {
        let url = self.custom_columns_url(collection, filters);
        self.get_item(&url, None).await
    }

    pub async fn get_custom_columns_wells(&self, filters: Option<&Filters>) -> anyhow::Result<Record> {
        self.get_custom_columns(collections::WELLS, filters).await
    }

    pub async fn get_custom_columns_daily_production(&self, filters: Option<&Filters>) -> anyhow::Result<Record> {
        self.get_custom_columns(collections::DAILY_PRODUCTIONS, filters).await
    }

    pub async fn get_custom_columns_monthly_production(&self, filters: Option<&Filters>) -> anyhow::Result<Record> {
        self.get_custom_columns(collections::MONTHLY_PRODUCTIONS, filters).await
    }

    /// Update well identifiers. Each record names a `wellId` and its `newInfo`.
    pub async fn patch_well_identifiers(&self, data: &[Record]) -> anyhow::Result<RecordList> {
        let url = self.well_identifiers_url();
        self.patch_items(&url, data, None).await
    }

    pub async fn get_tags(&self, filters: Option<&Filters>) -> anyhow::Result<RecordList> {
        let url = self.tags_url(filters);
        self.get_items(&url, Some(take(DEFAULT_TAKE))).await
    }

    /// Econ runs across every project of the company
    pub async fn get_root_econ_runs(&self, filters: Option<&Filters>) -> anyhow::Result<RecordList> {
        let url = self.root_econ_runs_url(filters);
        self.get_items(&url, Some(take(DEFAULT_TAKE))).await
    }

    pub async fn get_root_econ_run_by_id(&self, econ_run_id: &str) -> anyhow::Result<Record> {
        let url = self.root_econ_run_by_id_url(econ_run_id);
        self.get_item(&url, Some(take(DEFAULT_TAKE))).await
    }

    pub async fn get_root_forecast_daily_volumes(&self, filters: Option<&Filters>) -> anyhow::Result<RecordList> {
        let url = self.root_forecast_daily_volumes_url(filters);
        self.get_items(&url, Some(take(DEFAULT_TAKE))).await
    }

    pub async fn get_root_forecast_monthly_volumes(&self, filters: Option<&Filters>) -> anyhow::Result<RecordList> {
        let url = self.root_forecast_monthly_volumes_url(filters);
        self.get_items(&url, Some(take(DEFAULT_TAKE))).await
    }
}
