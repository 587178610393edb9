//! Project forecasts, their outputs, volumes and segment parameters

use std::fmt;
use std::pin::pin;

use futures::TryStreamExt;
use reqwest::Method;
use serde_json::json;

use crate::api::constants::limits::{DEFAULT_TAKE, FORECAST_OUTPUTS_TAKE};
use crate::api::query::{Filters, take, with_filters};
use crate::api::sort::SortOrder;
use crate::api::{ComboCurveClient, Record, RecordList};

/// Default number of well ids per `POST .../wells` request
pub const FORECAST_WELLS_CHUNK: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Oil,
    Gas,
    Water,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Oil => "oil",
            Self::Gas => "gas",
            Self::Water => "water",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probabilistic series of a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Best,
    P10,
    P50,
    P90,
}

impl Series {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::P10 => "p10",
            Self::P50 => "p50",
            Self::P90 => "p90",
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn by_well() -> SortOrder {
    SortOrder::new([("well", 0)])
}

impl ComboCurveClient {
    pub fn forecasts_url(&self, project_id: &str, filters: Option<&Filters>) -> String {
        with_filters(self.url(&format!("/projects/{}/forecasts", project_id)), filters)
    }

    pub fn forecast_by_id_url(&self, project_id: &str, forecast_id: &str) -> String {
        format!("{}/{}", self.forecasts_url(project_id, None), forecast_id)
    }

    pub fn forecast_wells_url(&self, project_id: &str, forecast_id: &str) -> String {
        format!("{}/wells", self.forecast_by_id_url(project_id, forecast_id))
    }

    pub fn forecast_aries_url(&self, project_id: &str, forecast_id: &str, filters: Option<&Filters>) -> String {
        let url = format!("{}/aries", self.forecast_by_id_url(project_id, forecast_id));
        with_filters(url, filters)
    }

    pub fn forecast_outputs_url(&self, project_id: &str, forecast_id: &str, filters: Option<&Filters>) -> String {
        let url = format!("{}/outputs", self.forecast_by_id_url(project_id, forecast_id));
        with_filters(url, filters)
    }

    pub fn forecast_output_by_id_url(&self, project_id: &str, forecast_id: &str, output_id: &str) -> String {
        format!("{}/{}", self.forecast_outputs_url(project_id, forecast_id, None), output_id)
    }

    pub fn forecast_daily_volumes_url(&self, project_id: &str, forecast_id: &str, filters: Option<&Filters>) -> String {
        let url = format!("{}/daily-volumes", self.forecast_by_id_url(project_id, forecast_id));
        with_filters(url, filters)
    }

    pub fn forecast_monthly_volumes_url(
        &self,
        project_id: &str,
        forecast_id: &str,
        filters: Option<&Filters>,
    ) -> String {
        let url = format!("{}/monthly-volumes", self.forecast_by_id_url(project_id, forecast_id));
        with_filters(url, filters)
    }

    pub fn forecast_segment_parameters_url(
        &self,
        project_id: &str,
        forecast_id: &str,
        well_id: &str,
        phase: Phase,
        series: Series,
    ) -> String {
        format!(
            "{}/parameters/{}/{}/{}",
            self.forecast_by_id_url(project_id, forecast_id),
            well_id,
            phase,
            series
        )
    }

    pub async fn get_forecasts(&self, project_id: &str, filters: Option<&Filters>) -> anyhow::Result<RecordList> {
        let url = self.forecasts_url(project_id, filters);
        self.get_sorted(&url, DEFAULT_TAKE, &SortOrder::by_name()).await
    }

    pub async fn post_forecasts(&self, project_id: &str, data: &[Record]) -> anyhow::Result<RecordList> {
        let url = self.forecasts_url(project_id, None);
        self.post_items(&url, data, None).await
    }

    pub async fn get_forecast_by_id(&self, project_id: &str, forecast_id: &str) -> anyhow::Result<Record> {
        let url = self.forecast_by_id_url(project_id, forecast_id);
        self.get_item(&url, Some(take(DEFAULT_TAKE))).await
    }

    /// Scope wells to a forecast. The endpoint takes `{"wellIds": [...]}`
    /// objects, so ids are sent `chunk_size` at a time.
    pub async fn post_forecast_wells(
        &self,
        project_id: &str,
        forecast_id: &str,
        well_ids: &[String],
        chunk_size: usize,
    ) -> anyhow::Result<RecordList> {
        let url = self.forecast_wells_url(project_id, forecast_id);
        let bodies = well_ids
            .chunks(chunk_size.max(1))
            .map(|chunk| Some(json!({ "wellIds": chunk })));

        let mut pages = pin!(self.write_pages(Method::POST, url, bodies, None));
        let mut items = Vec::new();
        while let Some(page) = pages.try_next().await? {
            items.extend(page.records()?);
        }
        Ok(items)
    }

    /// ARIES-formatted forecast parameters per well
    pub async fn get_forecast_aries(
        &self,
        project_id: &str,
        forecast_id: &str,
        filters: Option<&Filters>,
    ) -> anyhow::Result<RecordList> {
        let url = self.forecast_aries_url(project_id, forecast_id, filters);
        self.get_items(&url, Some(take(FORECAST_OUTPUTS_TAKE))).await
    }

    pub async fn get_forecast_outputs(
        &self,
        project_id: &str,
        forecast_id: &str,
        filters: Option<&Filters>,
    ) -> anyhow::Result<RecordList> {
        let url = self.forecast_outputs_url(project_id, forecast_id, filters);
        self.get_items(&url, Some(take(FORECAST_OUTPUTS_TAKE))).await
    }

    pub async fn get_forecast_output_by_id(
        &self,
        project_id: &str,
        forecast_id: &str,
        output_id: &str,
    ) -> anyhow::Result<Record> {
        let url = self.forecast_output_by_id_url(project_id, forecast_id, output_id);
        self.get_item(&url, Some(take(DEFAULT_TAKE))).await
    }

    /// Daily volumes sorted by well
    pub async fn get_forecast_daily_volumes(
        &self,
        project_id: &str,
        forecast_id: &str,
        filters: Option<&Filters>,
    ) -> anyhow::Result<RecordList> {
        let url = self.forecast_daily_volumes_url(project_id, forecast_id, filters);
        self.get_sorted(&url, DEFAULT_TAKE, &by_well()).await
    }

    /// Monthly volumes sorted by well
    pub async fn get_forecast_monthly_volumes(
        &self,
        project_id: &str,
        forecast_id: &str,
        filters: Option<&Filters>,
    ) -> anyhow::Result<RecordList> {
        let url = self.forecast_monthly_volumes_url(project_id, forecast_id, filters);
        self.get_sorted(&url, DEFAULT_TAKE, &by_well()).await
    }

    pub async fn post_forecast_segment_parameters(
        &self,
        project_id: &str,
        forecast_id: &str,
        well_id: &str,
        phase: Phase,
        series: Series,
        data: &[Record],
    ) -> anyhow::Result<RecordList> {
        let url = self.forecast_segment_parameters_url(project_id, forecast_id, well_id, phase, series);
        self.post_items(&url, data, None).await
    }

    pub async fn put_forecast_segment_parameters(
        &self,
        project_id: &str,
        forecast_id: &str,
        well_id: &str,
        phase: Phase,
        series: Series,
        data: &[Record],
    ) -> anyhow::Result<RecordList> {
        let url = self.forecast_segment_parameters_url(project_id, forecast_id, well_id, phase, series);
        self.put_items(&url, data, None).await
    }

    pub async fn delete_forecast_segment_parameters(
        &self,
        project_id: &str,
        forecast_id: &str,
        well_id: &str,
        phase: Phase,
        series: Series,
    ) -> anyhow::Result<RecordList> {
        let url = self.forecast_segment_parameters_url(project_id, forecast_id, well_id, phase, series);
        self.delete_items(&url, &[], None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClientConfig, StaticAuth};
    use std::sync::Arc;

    #[test]
    fn test_segment_parameters_url() {
        let config = ClientConfig::builder().base_url("https://cc.test/v1").build();
        let client = ComboCurveClient::new(config, Arc::new(StaticAuth::new("k", "t"))).unwrap();

        assert_eq!(
            client.forecast_segment_parameters_url("p1", "f1", "w1", Phase::Gas, Series::P50),
            "https://cc.test/v1/projects/p1/forecasts/f1/parameters/w1/gas/p50"
        );
    }
}
