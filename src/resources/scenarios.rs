//! Scenarios and their combos, qualifiers and well assignments
//!
//! Deletes are body-less requests against a filtered URL; they report how
//! many records the server removed.

use crate::api::constants::limits::DEFAULT_TAKE;
use crate::api::error::ApiError;
use crate::api::query::{Filters, take, with_filters};
use crate::api::sort::SortOrder;
use crate::api::{ComboCurveClient, Record, RecordList};

use super::econ_models::EconModelType;

impl ComboCurveClient {
    pub fn scenarios_url(&self, project_id: &str, filters: Option<&Filters>) -> String {
        with_filters(self.url(&format!("/projects/{}/scenarios", project_id)), filters)
    }

    pub fn scenario_by_id_url(&self, project_id: &str, scenario_id: &str) -> String {
        format!("{}/{}", self.scenarios_url(project_id, None), scenario_id)
    }

    pub fn scenario_combos_url(&self, project_id: &str, scenario_id: &str, filters: Option<&Filters>) -> String {
        let url = format!("{}/combos", self.scenario_by_id_url(project_id, scenario_id));
        with_filters(url, filters)
    }

    /// Qualifiers URL, narrowed to one econ model family when `econ_name` is set
    pub fn scenario_qualifiers_url(
        &self,
        project_id: &str,
        scenario_id: &str,
        econ_name: Option<EconModelType>,
        filters: Option<&Filters>,
    ) -> String {
        let url = format!("{}/qualifiers", self.scenario_by_id_url(project_id, scenario_id));
        let mut filters = filters.cloned().unwrap_or_default();
        if let Some(econ_name) = econ_name {
            filters = filters.with("econName", econ_name.tag());
        }
        with_filters(url, Some(&filters))
    }

    pub fn scenario_wells_url(&self, project_id: &str, scenario_id: &str, filters: Option<&Filters>) -> String {
        let url = format!("{}/well-assignments", self.scenario_by_id_url(project_id, scenario_id));
        with_filters(url, filters)
    }

    pub async fn get_scenarios(&self, project_id: &str, filters: Option<&Filters>) -> anyhow::Result<RecordList> {
        let url = self.scenarios_url(project_id, filters);
        self.get_sorted(&url, DEFAULT_TAKE, &SortOrder::by_name()).await
    }

    pub async fn get_scenario_by_id(&self, project_id: &str, scenario_id: &str) -> anyhow::Result<Record> {
        let url = self.scenario_by_id_url(project_id, scenario_id);
        self.get_item(&url, None).await
    }

    pub async fn post_scenarios(&self, project_id: &str, data: &[Record]) -> anyhow::Result<RecordList> {
        let url = self.scenarios_url(project_id, None);
        self.post_items(&url, data, None).await
    }

    pub async fn put_scenarios(&self, project_id: &str, data: &[Record]) -> anyhow::Result<RecordList> {
        let url = self.scenarios_url(project_id, None);
        self.put_items(&url, data, None).await
    }

    /// Delete scenarios matching a name and/or id. Returns the delete count.
    pub async fn delete_scenarios(
        &self,
        project_id: &str,
        scenario_name: Option<&str>,
        scenario_id: Option<&str>,
    ) -> anyhow::Result<u64> {
        if scenario_name.is_none() && scenario_id.is_none() {
            anyhow::bail!("Must provide at least one of scenario name or scenario id");
        }

        let mut filters = Filters::new();
        if let Some(name) = scenario_name {
            filters = filters.with("name", name);
        }
        if let Some(id) = scenario_id {
            filters = filters.with("id", id);
        }

        let url = self.scenarios_url(project_id, Some(&filters));
        self.delete_matching(&url).await
    }

    pub async fn get_scenario_combos(&self, project_id: &str, scenario_id: &str) -> anyhow::Result<RecordList> {
        let url = self.scenario_combos_url(project_id, scenario_id, None);
        self.get_items(&url, Some(take(DEFAULT_TAKE))).await
    }

    pub async fn post_scenario_combos(
        &self,
        project_id: &str,
        scenario_id: &str,
        data: &[Record],
    ) -> anyhow::Result<RecordList> {
        let url = self.scenario_combos_url(project_id, scenario_id, None);
        self.post_items(&url, data, None).await
    }

    pub async fn put_scenario_combos(
        &self,
        project_id: &str,
        scenario_id: &str,
        data: &[Record],
    ) -> anyhow::Result<RecordList> {
        let url = self.scenario_combos_url(project_id, scenario_id, None);
        self.put_items(&url, data, None).await
    }

    pub async fn delete_scenario_combo(&self, project_id: &str, scenario_id: &str, saved_name: &str) -> anyhow::Result<u64> {
        let filters = Filters::new().with("savedName", saved_name);
        let url = self.scenario_combos_url(project_id, scenario_id, Some(&filters));
        self.delete_matching(&url).await
    }

    pub async fn get_scenario_qualifiers(
        &self,
        project_id: &str,
        scenario_id: &str,
        econ_name: Option<EconModelType>,
    ) -> anyhow::Result<Record> {
        let url = self.scenario_qualifiers_url(project_id, scenario_id, econ_name, None);
        self.get_item(&url, None).await
    }

    pub async fn post_scenario_qualifiers(
        &self,
        project_id: &str,
        scenario_id: &str,
        data: &[Record],
    ) -> anyhow::Result<RecordList> {
        let url = self.scenario_qualifiers_url(project_id, scenario_id, None, None);
        self.post_items(&url, data, None).await
    }

    pub async fn put_scenario_qualifiers(
        &self,
        project_id: &str,
        scenario_id: &str,
        data: &[Record],
    ) -> anyhow::Result<RecordList> {
        let url = self.scenario_qualifiers_url(project_id, scenario_id, None, None);
        self.put_items(&url, data, None).await
    }

    /// Delete qualifiers by comma-separated names within one econ model family
    pub async fn delete_scenario_qualifiers(
        &self,
        project_id: &str,
        scenario_id: &str,
        econ_name: EconModelType,
        qualifier_names: &str,
    ) -> anyhow::Result<u64> {
        let filters = Filters::new().with("qualifierNames", qualifier_names);
        let url = self.scenario_qualifiers_url(project_id, scenario_id, Some(econ_name), Some(&filters));
        self.delete_matching(&url).await
    }

    pub async fn get_scenario_wells(&self, project_id: &str, scenario_id: &str) -> anyhow::Result<RecordList> {
        let url = self.scenario_wells_url(project_id, scenario_id, None);
        self.get_items(&url, None).await
    }

    pub async fn post_scenario_wells(
        &self,
        project_id: &str,
        scenario_id: &str,
        data: &[Record],
    ) -> anyhow::Result<RecordList> {
        let url = self.scenario_wells_url(project_id, scenario_id, None);
        self.post_items(&url, data, None).await
    }

    pub async fn put_scenario_wells(
        &self,
        project_id: &str,
        scenario_id: &str,
        data: &[Record],
    ) -> anyhow::Result<RecordList> {
        let url = self.scenario_wells_url(project_id, scenario_id, None);
        self.put_items(&url, data, None).await
    }

    /// Remove well assignments given as comma-separated well ids
    pub async fn delete_scenario_wells(&self, project_id: &str, scenario_id: &str, wells: &str) -> anyhow::Result<u64> {
        let filters = Filters::new().with("wells", wells);
        let url = self.scenario_wells_url(project_id, scenario_id, Some(&filters));
        self.delete_matching(&url).await
    }

    /// Id of the scenario named `name`, if the project has one
    pub async fn find_scenario_id(&self, project_id: &str, name: &str) -> anyhow::Result<String> {
        let scenarios = self.get_scenarios(project_id, None).await?;
        crate::api::records::extract_id(&scenarios, name, "name", "id").ok_or_else(|| {
            ApiError::NotFound {
                url: self.scenarios_url(project_id, Some(&Filters::new().with("name", name))),
            }
            .into()
        })
    }
}
