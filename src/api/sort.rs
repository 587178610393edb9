//! Stable multi-key record sorting
//!
//! Resource listings are returned in a deterministic presentation order. The
//! order is declared as field name to rank (0 = primary key).

use std::cmp::Ordering;

use serde_json::Value;

use super::error::ApiError;
use super::records::{Record, RecordList};

/// Field ranks used to build each record's sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    // sorted by rank
    fields: Vec<(String, usize)>,
}

impl SortOrder {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut fields: Vec<(String, usize)> =
            fields.into_iter().map(|(name, rank)| (name.into(), rank)).collect();
        fields.sort_by_key(|(_, rank)| *rank);
        Self { fields }
    }

    /// Common listing order: `name`, `updatedAt`, `createdAt`, then `id`
    pub fn by_name() -> Self {
        Self::new([("name", 0), ("updatedAt", 1), ("createdAt", 2), ("id", 3)])
    }

    /// Same as [`SortOrder::by_name`] keyed on `wellName`
    pub fn by_well_name() -> Self {
        Self::new([("wellName", 0), ("updatedAt", 1), ("createdAt", 2), ("id", 3)])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// String values of the ordered fields. Non-string values are skipped.
    fn key<'a>(&self, record: &'a Record) -> Result<Vec<&'a str>, ApiError> {
        let mut key = Vec::with_capacity(self.fields.len());
        for (field, _) in &self.fields {
            let value = record.get(field).ok_or_else(|| ApiError::MissingSortKey {
                field: field.clone(),
                available: record.keys().cloned().collect(),
            })?;
            if let Value::String(s) = value {
                key.push(s.as_str());
            }
        }
        Ok(key)
    }
}

/// Stable sort of `records` by `order`.
///
/// Every record must carry every field named in `order`; a missing field
/// fails the whole sort. `reverse` flips the comparison, equal keys keep their
/// input order either way.
pub fn keysort(records: RecordList, order: &SortOrder, reverse: bool) -> anyhow::Result<RecordList> {
    let mut keyed: Vec<(Vec<String>, Record)> = Vec::with_capacity(records.len());
    for record in records {
        let key = order.key(&record)?.into_iter().map(str::to_owned).collect();
        keyed.push((key, record));
    }

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering: Ordering = a.cmp(b);
        if reverse { ordering.reverse() } else { ordering }
    });

    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}
