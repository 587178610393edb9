//! Record normalization
//!
//! ComboCurve endpoints answer with either a single JSON object or an array of
//! objects. Everything above the transport works on a flat [`RecordList`], so
//! responses are classified once into a [`ResponseBody`] and then flattened.

use serde_json::{Map, Value};

use super::error::{ApiError, json_kind};

/// One API resource instance as an ordered field map
pub type Record = Map<String, Value>;

/// Records in the order they were received (page order, then within-page order)
pub type RecordList = Vec<Record>;

/// Shape of a parsed response body
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Single(Record),
    Many(RecordList),
}

impl ResponseBody {
    /// Classify a parsed body. `null` counts as an empty list.
    pub fn classify(value: Value) -> anyhow::Result<Self> {
        match value {
            Value::Object(record) => Ok(Self::Single(record)),
            Value::Array(items) => {
                let records = items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(record) => Ok(record),
                        other => Err(ApiError::UnexpectedShape { kind: json_kind(&other) }),
                    })
                    .collect::<Result<RecordList, _>>()?;
                Ok(Self::Many(records))
            }
            Value::Null => Ok(Self::Many(Vec::new())),
            other => Err(ApiError::UnexpectedShape { kind: json_kind(&other) }.into()),
        }
    }

    pub fn into_records(self) -> RecordList {
        match self {
            Self::Single(record) => vec![record],
            Self::Many(records) => records,
        }
    }
}

/// Convert a parsed response body into a uniform list of records
pub fn normalize(body: Value) -> anyhow::Result<RecordList> {
    Ok(ResponseBody::classify(body)?.into_records())
}

/// Wrap a list of records back into a JSON array, e.g. to use as a request body
pub fn to_value(records: &[Record]) -> Value {
    Value::Array(records.iter().cloned().map(Value::Object).collect())
}

/// Merge a record's nested `output` object into the record itself.
///
/// Records without an `output` key are dropped (`None`). A `null` output means
/// the well had no economic output and only the header fields are kept.
pub fn flatten_output(mut record: Record) -> anyhow::Result<Option<Record>> {
    let Some(output) = record.remove("output") else {
        return Ok(None);
    };

    match output {
        Value::Null => Ok(Some(record)),
        Value::Object(fields) => {
            record.extend(fields);
            Ok(Some(record))
        }
        other => Err(ApiError::UnexpectedShape { kind: json_kind(&other) }.into()),
    }
}

/// Apply [`flatten_output`] to every record, keeping input order
pub fn flatten_outputs(records: RecordList) -> anyhow::Result<RecordList> {
    let mut flat = Vec::with_capacity(records.len());
    for record in records {
        if let Some(record) = flatten_output(record)? {
            flat.push(record);
        }
    }
    Ok(flat)
}

/// Look up the `id_key` of the record whose `name_key` equals `name`
pub fn extract_id(records: &[Record], name: &str, name_key: &str, id_key: &str) -> Option<String> {
    let record = records
        .iter()
        .find(|record| record.get(name_key).and_then(Value::as_str) == Some(name))?;

    match record.get(id_key)? {
        Value::String(id) => Some(id.clone()),
        other => Some(other.to_string()),
    }
}
