//! Bulk-write acknowledgement envelopes
//!
//! Write endpoints answer 2xx even when some records were rejected. Each
//! acknowledgement page carries per-item results plus success/failure counts;
//! [`BulkWriteSummary::from_records`] merges the envelopes of every page and
//! chunk so callers can inspect failures in one place.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::records::Record;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkWriteSummary {
    #[serde(default)]
    pub general_errors: Vec<BulkError>,
    #[serde(default)]
    pub results: Vec<BulkResult>,
    #[serde(default)]
    pub failed_count: u64,
    #[serde(default)]
    pub success_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkError {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkResult {
    pub status: String,
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl BulkResult {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }
}

impl BulkWriteSummary {
    /// Merge the acknowledgement envelopes returned by a chunked write
    pub fn from_records(records: &[Record]) -> anyhow::Result<Self> {
        let mut summary = Self::default();
        for record in records {
            let page: Self = serde_json::from_value(Value::Object(record.clone()))?;
            summary.general_errors.extend(page.general_errors);
            summary.results.extend(page.results);
            summary.failed_count += page.failed_count;
            summary.success_count += page.success_count;
        }
        Ok(summary)
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count > 0 || !self.general_errors.is_empty()
    }

    /// Per-item results whose status is not `Success`
    pub fn failures(&self) -> impl Iterator<Item = &BulkResult> {
        self.results.iter().filter(|result| !result.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merges_envelopes_across_chunks() {
        let records: Vec<Record> = vec![
            json!({
                "generalErrors": [{
                    "name": "ValidationError",
                    "message": "The field 'id' is required.",
                    "location": "In body of request at position [0]"
                }],
                "results": [
                    {"status": "Success", "code": 200, "name": "Acme", "id": "61698aa08eca904d9cc5b622"}
                ],
                "failedCount": 1,
                "successCount": 1
            }),
            json!({
                "results": [
                    {"status": "Error", "code": 400, "name": "Other"}
                ],
                "failedCount": 1,
                "successCount": 0
            }),
        ]
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect();

        let summary = BulkWriteSummary::from_records(&records).unwrap();

        assert_eq!(summary.success_count, 1);
        assert_eq!(summary.failed_count, 2);
        assert_eq!(summary.results.len(), 2);
        assert_eq!(summary.general_errors[0].name, "ValidationError");
        assert!(summary.has_failures());

        let failures: Vec<&BulkResult> = summary.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].fields.get("name"), Some(&json!("Other")));
        assert_eq!(summary.results[0].fields.get("id"), Some(&json!("61698aa08eca904d9cc5b622")));
    }

    #[test]
    fn test_empty_input() {
        let summary = BulkWriteSummary::from_records(&[]).unwrap();
        assert!(!summary.has_failures());
        assert_eq!(summary, BulkWriteSummary::default());
    }
}
