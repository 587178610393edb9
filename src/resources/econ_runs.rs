//! Scenario econ runs, one-liners and monthly exports
//!
//! One-liner and monthly export rows nest their economics under an `output`
//! object; these methods return them flattened with
//! [`flatten_outputs`](crate::api::records::flatten_outputs).

use std::collections::BTreeSet;
use std::future::ready;

use futures::stream::{Stream, TryStreamExt};
use serde_json::Value;

use crate::api::constants::CONCURRENCY_PARAM;
use crate::api::constants::limits::{DEFAULT_TAKE, MONTHLY_EXPORT_CONCURRENCY, MONTHLY_EXPORT_TAKE};
use crate::api::error::{ApiError, json_kind};
use crate::api::query::{Params, take};
use crate::api::records::{flatten_outputs, normalize};
use crate::api::sort::{SortOrder, keysort};
use crate::api::{ComboCurveClient, Record, RecordList};

/// Newest run first: `runDate`, then `status`, then `id`, descending
pub fn econ_run_order() -> SortOrder {
    SortOrder::new([("runDate", 0), ("status", 1), ("id", 2)])
}

/// Page-size and concurrency hints for monthly export reads
fn monthly_export_params() -> Params {
    let mut params = take(MONTHLY_EXPORT_TAKE);
    params.push((CONCURRENCY_PARAM.to_string(), MONTHLY_EXPORT_CONCURRENCY.to_string()));
    params
}

/// Rows under the `results` key of one monthly export page, flattened
fn export_results(mut page: Record) -> anyhow::Result<RecordList> {
    let results = page.remove("results").unwrap_or(Value::Null);
    flatten_outputs(normalize(results)?)
}

impl ComboCurveClient {
    pub fn econ_runs_url(&self, project_id: &str, scenario_id: &str) -> String {
        self.url(&format!("/projects/{}/scenarios/{}/econ-runs", project_id, scenario_id))
    }

    pub fn econ_run_by_id_url(&self, project_id: &str, scenario_id: &str, econ_run_id: &str) -> String {
        format!("{}/{}", self.econ_runs_url(project_id, scenario_id), econ_run_id)
    }

    pub fn econ_run_one_liners_url(&self, project_id: &str, scenario_id: &str, econ_run_id: &str) -> String {
        format!("{}/one-liners", self.econ_run_by_id_url(project_id, scenario_id, econ_run_id))
    }

    pub fn econ_run_combo_names_url(&self, project_id: &str, scenario_id: &str, econ_run_id: &str) -> String {
        format!("{}/combo-names", self.econ_run_by_id_url(project_id, scenario_id, econ_run_id))
    }

    pub fn econ_run_monthly_exports_url(&self, project_id: &str, scenario_id: &str, econ_run_id: &str) -> String {
        format!("{}/monthly-exports", self.econ_run_by_id_url(project_id, scenario_id, econ_run_id))
    }

    pub fn econ_run_monthly_export_url(
        &self,
        project_id: &str,
        scenario_id: &str,
        econ_run_id: &str,
        monthly_export_id: &str,
    ) -> String {
        format!(
            "{}/{}",
            self.econ_run_monthly_exports_url(project_id, scenario_id, econ_run_id),
            monthly_export_id
        )
    }

    /// Econ runs of a scenario, newest first.
    ///
    /// With `add_combo_names` each run gets a `comboNames` field, costing one
    /// extra paginated fetch per run.
    pub async fn get_econ_runs(
        &self,
        project_id: &str,
        scenario_id: &str,
        add_combo_names: bool,
    ) -> anyhow::Result<RecordList> {
        let url = self.econ_runs_url(project_id, scenario_id);
        let mut runs = self.get_items(&url, Some(take(DEFAULT_TAKE))).await?;

        if add_combo_names {
            self.add_combo_names(&mut runs, project_id, scenario_id).await?;
        }

        keysort(runs, &econ_run_order(), true)
    }

    pub async fn get_econ_run_by_id(
        &self,
        project_id: &str,
        scenario_id: &str,
        econ_run_id: &str,
        add_combo_names: bool,
    ) -> anyhow::Result<Record> {
        let url = self.econ_run_by_id_url(project_id, scenario_id, econ_run_id);
        let mut runs = self.get_items(&url, None).await?;

        if add_combo_names {
            self.add_combo_names(&mut runs, project_id, scenario_id).await?;
        }

        keysort(runs, &econ_run_order(), true)?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound { url }.into())
    }

    /// Distinct combo names of an econ run, sorted
    pub async fn get_econ_run_combo_names(
        &self,
        project_id: &str,
        scenario_id: &str,
        econ_run_id: &str,
    ) -> anyhow::Result<Vec<String>> {
        let url = self.econ_run_combo_names_url(project_id, scenario_id, econ_run_id);
        let values = self.get_values(&url, Some(take(DEFAULT_TAKE))).await?;

        let names = values
            .into_iter()
            .map(|value| match value {
                Value::String(name) => Ok(name),
                other => Err(ApiError::UnexpectedShape { kind: json_kind(&other) }),
            })
            .collect::<Result<BTreeSet<String>, _>>()?;

        Ok(names.into_iter().collect())
    }

    async fn add_combo_names(&self, runs: &mut RecordList, project_id: &str, scenario_id: &str) -> anyhow::Result<()> {
        for run in runs.iter_mut() {
            let econ_run_id = match run.get("id") {
                Some(Value::String(id)) => id.clone(),
                Some(other) => other.to_string(),
                None => {
                    return Err(ApiError::MissingSortKey {
                        field: "id".to_string(),
                        available: run.keys().cloned().collect(),
                    }
                    .into());
                }
            };

            let names = self
                .get_econ_run_combo_names(project_id, scenario_id, &econ_run_id)
                .await?;
            run.insert(
                "comboNames".to_string(),
                Value::Array(names.into_iter().map(Value::String).collect()),
            );
        }
        Ok(())
    }

    /// One-liner economics of every well in an econ run
    pub async fn get_econ_run_one_liners(
        &self,
        project_id: &str,
        scenario_id: &str,
        econ_run_id: &str,
    ) -> anyhow::Result<RecordList> {
        let url = self.econ_run_one_liners_url(project_id, scenario_id, econ_run_id);
        let items = self.get_items(&url, Some(take(DEFAULT_TAKE))).await?;
        flatten_outputs(items)
    }

    /// Start a monthly export and return its id
    pub async fn post_econ_run_monthly_export(
        &self,
        project_id: &str,
        scenario_id: &str,
        econ_run_id: &str,
    ) -> anyhow::Result<String> {
        let url = self.econ_run_monthly_exports_url(project_id, scenario_id, econ_run_id);
        let items = self.post_items(&url, &[], Some(0)).await?;

        let id = items
            .first()
            .and_then(|item| item.get("id"))
            .ok_or_else(|| ApiError::NotFound { url: url.clone() })?;

        Ok(match id {
            Value::String(id) => id.clone(),
            other => other.to_string(),
        })
    }

    /// Every row of a finished monthly export, in page order
    pub async fn get_econ_run_monthly_export(
        &self,
        project_id: &str,
        scenario_id: &str,
        econ_run_id: &str,
        monthly_export_id: &str,
    ) -> anyhow::Result<RecordList> {
        let url = self.econ_run_monthly_export_url(project_id, scenario_id, econ_run_id, monthly_export_id);
        let pages = self.get_items(&url, Some(monthly_export_params())).await?;

        let mut rows = Vec::new();
        for page in pages {
            rows.extend(export_results(page)?);
        }
        Ok(rows)
    }

    /// Rows of a monthly export, one batch per response page, fetched lazily
    pub fn stream_econ_run_monthly_export(
        &self,
        project_id: &str,
        scenario_id: &str,
        econ_run_id: &str,
        monthly_export_id: &str,
    ) -> impl Stream<Item = anyhow::Result<RecordList>> + use<'_> {
        let url = self.econ_run_monthly_export_url(project_id, scenario_id, econ_run_id, monthly_export_id);
        let rows = self
            .get_items_stream(url, Some(monthly_export_params()))
            .and_then(|pages| {
                ready(pages.into_iter().try_fold(Vec::new(), |mut rows, page| -> anyhow::Result<RecordList> {
                    rows.extend(export_results(page)?);
                    Ok(rows)
                }))
            });
        crate::api::pagination::stop_after_error(rows)
    }
}
