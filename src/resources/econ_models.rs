//! Econ models
//!
//! Every model family lives under `/projects/{id}/econ-models/{route}`. The
//! family is selected with [`EconModelType`] instead of one method per family.

use std::fmt;
use std::str::FromStr;

use crate::api::constants::limits::{DEFAULT_TAKE, ECON_MODELS_WRITE};
use crate::api::error::ApiError;
use crate::api::query::{Filters, with_filters};
use crate::api::sort::SortOrder;
use crate::api::{ComboCurveClient, Record, RecordList};

/// Econ model families known to the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EconModelType {
    GeneralOptions,
    ActualOrForecast,
    ReservesCategory,
    Escalation,
    Differentials,
    Pricing,
    OwnershipReversion,
    ProductionTaxes,
    Risking,
    StreamProperties,
    Expenses,
    Emission,
    FluidModel,
    Capex,
    Dates,
    Depreciation,
}

impl EconModelType {
    pub const ALL: [EconModelType; 16] = [
        Self::GeneralOptions,
        Self::ActualOrForecast,
        Self::ReservesCategory,
        Self::Escalation,
        Self::Differentials,
        Self::Pricing,
        Self::OwnershipReversion,
        Self::ProductionTaxes,
        Self::Risking,
        Self::StreamProperties,
        Self::Expenses,
        Self::Emission,
        Self::FluidModel,
        Self::Capex,
        Self::Dates,
        Self::Depreciation,
    ];

    /// The `econModelType` tag used by the API
    pub fn tag(self) -> &'static str {
        match self {
            Self::GeneralOptions => "general_options",
            Self::ActualOrForecast => "actual_or_forecast",
            Self::ReservesCategory => "reserves_category",
            Self::Escalation => "escalation",
            Self::Differentials => "differentials",
            Self::Pricing => "pricing",
            Self::OwnershipReversion => "ownership_reversion",
            Self::ProductionTaxes => "production_taxes",
            Self::Risking => "risking",
            Self::StreamProperties => "stream_properties",
            Self::Expenses => "expenses",
            Self::Emission => "emission",
            Self::FluidModel => "fluid_model",
            Self::Capex => "capex",
            Self::Dates => "dates",
            Self::Depreciation => "depreciation",
        }
    }

    /// URL segment under `econ-models/`
    pub fn route(self) -> &'static str {
        match self {
            Self::GeneralOptions => "general-options",
            Self::ActualOrForecast => "actual-forecast",
            Self::ReservesCategory => "reserves-categories",
            Self::Escalation => "escalations",
            Self::Differentials => "differentials",
            Self::Pricing => "pricing",
            Self::OwnershipReversion => "ownership-reversions",
            Self::ProductionTaxes => "production-taxes",
            Self::Risking => "riskings",
            Self::StreamProperties => "stream-properties",
            Self::Expenses => "expenses",
            Self::Emission => "emissions",
            Self::FluidModel => "fluid-models",
            Self::Capex => "capex",
            Self::Dates => "date-settings",
            Self::Depreciation => "depreciation",
        }
    }
}

impl fmt::Display for EconModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Accepts the tag or the route segment, ignoring case
impl FromStr for EconModelType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let given = s.trim();
        Self::ALL
            .into_iter()
            .find(|model| model.tag().eq_ignore_ascii_case(given) || model.route().eq_ignore_ascii_case(given))
            .ok_or_else(|| ApiError::InvalidModelType {
                given: s.to_string(),
                valid: Self::ALL.iter().map(|model| model.tag()).collect(),
            })
    }
}

impl ComboCurveClient {
    pub fn econ_models_url(&self, project_id: &str, filters: Option<&Filters>) -> String {
        with_filters(self.url(&format!("/projects/{}/econ-models", project_id)), filters)
    }

    pub fn econ_models_by_type_url(
        &self,
        project_id: &str,
        model_type: EconModelType,
        filters: Option<&Filters>,
    ) -> String {
        let url = format!("{}/{}", self.econ_models_url(project_id, None), model_type.route());
        with_filters(url, filters)
    }

    pub fn econ_model_by_id_url(&self, project_id: &str, model_type: EconModelType, model_id: &str) -> String {
        format!("{}/{}", self.econ_models_by_type_url(project_id, model_type, None), model_id)
    }

    pub fn econ_model_assignments_url(&self, project_id: &str, model_type: EconModelType, model_id: &str) -> String {
        format!("{}/assignments", self.econ_model_by_id_url(project_id, model_type, model_id))
    }

    /// Every econ model of a project, across families
    pub async fn get_econ_models(&self, project_id: &str, filters: Option<&Filters>) -> anyhow::Result<RecordList> {
        let url = self.econ_models_url(project_id, filters);
        self.get_sorted(&url, DEFAULT_TAKE, &SortOrder::by_name()).await
    }

    pub async fn get_econ_models_by_type(
        &self,
        project_id: &str,
        model_type: EconModelType,
        filters: Option<&Filters>,
    ) -> anyhow::Result<RecordList> {
        let url = self.econ_models_by_type_url(project_id, model_type, filters);
        self.get_sorted(&url, DEFAULT_TAKE, &SortOrder::by_name()).await
    }

    pub async fn get_econ_model_by_id(
        &self,
        project_id: &str,
        model_type: EconModelType,
        model_id: &str,
    ) -> anyhow::Result<Record> {
        let url = self.econ_model_by_id_url(project_id, model_type, model_id);
        self.get_item(&url, None).await
    }

    pub async fn get_econ_model_assignments(
        &self,
        project_id: &str,
        model_type: EconModelType,
        model_id: &str,
    ) -> anyhow::Result<Record> {
        let url = self.econ_model_assignments_url(project_id, model_type, model_id);
        self.get_item(&url, None).await
    }

    pub async fn post_econ_models(
        &self,
        project_id: &str,
        model_type: EconModelType,
        data: &[Record],
    ) -> anyhow::Result<RecordList> {
        let url = self.econ_models_by_type_url(project_id, model_type, None);
        self.post_items(&url, data, Some(ECON_MODELS_WRITE)).await
    }

    pub async fn put_econ_models(
        &self,
        project_id: &str,
        model_type: EconModelType,
        data: &[Record],
    ) -> anyhow::Result<RecordList> {
        let url = self.econ_models_by_type_url(project_id, model_type, None);
        self.put_items(&url, data, Some(ECON_MODELS_WRITE)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_and_route() {
        assert_eq!("pricing".parse::<EconModelType>().unwrap(), EconModelType::Pricing);
        assert_eq!("Reserves_Category".parse::<EconModelType>().unwrap(), EconModelType::ReservesCategory);
        assert_eq!("date-settings".parse::<EconModelType>().unwrap(), EconModelType::Dates);
    }

    #[test]
    fn test_unknown_type_lists_valid_tags() {
        let err = "royalties".parse::<EconModelType>().unwrap_err();
        match &err {
            ApiError::InvalidModelType { given, valid } => {
                assert_eq!(given, "royalties");
                assert_eq!(valid.len(), EconModelType::ALL.len());
                assert!(valid.contains(&"expenses"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("Valid types are: general_options, actual_or_forecast"));
    }

    #[test]
    fn test_tags_and_routes_are_unique() {
        for (i, a) in EconModelType::ALL.iter().enumerate() {
            for b in &EconModelType::ALL[i + 1..] {
                assert_ne!(a.tag(), b.tag());
                assert_ne!(a.route(), b.route());
            }
        }
    }
}
