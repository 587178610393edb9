use crate::api::constants::limits::DIRECTIONAL_TAKE;
use crate::api::query::{Filters, take, with_filters};
use crate::api::{ComboCurveClient, RecordList};

impl ComboCurveClient {
    pub fn directional_surveys_url(&self, project_id: &str, filters: Option<&Filters>) -> String {
        with_filters(self.url(&format!("/projects/{}/directional-surveys", project_id)), filters)
    }

    pub async fn get_directional_surveys(
        &self,
        project_id: &str,
        filters: Option<&Filters>,
    ) -> anyhow::Result<RecordList> {
        let url = self.directional_surveys_url(project_id, filters);
        self.get_items(&url, Some(take(DIRECTIONAL_TAKE))).await
    }
}
