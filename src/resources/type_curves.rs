use crate::api::constants::limits::DEFAULT_TAKE;
use crate::api::query::{Filters, take, with_filters};
use crate::api::sort::SortOrder;
use crate::api::{ComboCurveClient, Record, RecordList};

impl ComboCurveClient {
    pub fn type_curves_url(&self, project_id: &str, filters: Option<&Filters>) -> String {
        with_filters(self.url(&format!("/projects/{}/type-curves", project_id)), filters)
    }

    pub fn type_curve_by_id_url(&self, project_id: &str, type_curve_id: &str) -> String {
        format!("{}/{}", self.type_curves_url(project_id, None), type_curve_id)
    }

    pub fn type_curve_representative_wells_url(&self, project_id: &str, type_curve_id: &str) -> String {
        format!("{}/representative-wells", self.type_curve_by_id_url(project_id, type_curve_id))
    }

    pub fn type_curve_daily_fits_url(&self, project_id: &str, type_curve_id: &str) -> String {
        format!("{}/daily-fits", self.type_curve_by_id_url(project_id, type_curve_id))
    }

    pub fn type_curve_monthly_fits_url(&self, project_id: &str, type_curve_id: &str) -> String {
        format!("{}/monthly-fits", self.type_curve_by_id_url(project_id, type_curve_id))
    }

    pub async fn get_type_curves(&self, project_id: &str, filters: Option<&Filters>) -> anyhow::Result<RecordList> {
        let url = self.type_curves_url(project_id, filters);
        self.get_sorted(&url, DEFAULT_TAKE, &SortOrder::by_name()).await
    }

    pub async fn get_type_curve_by_id(&self, project_id: &str, type_curve_id: &str) -> anyhow::Result<Record> {
        let url = self.type_curve_by_id_url(project_id, type_curve_id);
        self.get_item(&url, Some(take(DEFAULT_TAKE))).await
    }

    /// Representative wells sorted by well name
    pub async fn get_type_curve_representative_wells(
        &self,
        project_id: &str,
        type_curve_id: &str,
    ) -> anyhow::Result<RecordList> {
        let url = self.type_curve_representative_wells_url(project_id, type_curve_id);
        let order = SortOrder::new([("wellName", 0), ("id", 1)]);
        self.get_sorted(&url, DEFAULT_TAKE, &order).await
    }

    pub async fn get_type_curve_daily_fits(&self, project_id: &str, type_curve_id: &str) -> anyhow::Result<RecordList> {
        let url = self.type_curve_daily_fits_url(project_id, type_curve_id);
        self.get_items(&url, Some(take(DEFAULT_TAKE))).await
    }

    pub async fn get_type_curve_monthly_fits(
        &self,
        project_id: &str,
        type_curve_id: &str,
    ) -> anyhow::Result<RecordList> {
        let url = self.type_curve_monthly_fits_url(project_id, type_curve_id);
        self.get_items(&url, Some(take(DEFAULT_TAKE))).await
    }
}
