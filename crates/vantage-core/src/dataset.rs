//! Tabular record model used as chart input.
//!
//! A [`Dataset`] is an immutable, ordered table of [`Record`]s that all share
//! one schema: the same set of field names, and for each name the same
//! [`ValueKind`]. The schema is taken from the first record; field order
//! inside later records may differ.
//!
//! ```
//! use vantage_core::dataset::{Dataset, Record, Value};
//!
//! let dataset = Dataset::build([
//!     Record::new()
//!         .with("Stage", Value::categorical("Endowment"))
//!         .with("Share", Value::number(10.0)),
//!     Record::new()
//!         .with("Share", Value::number(60.0))
//!         .with("Stage", Value::categorical("Short-term Grants")),
//! ])
//! .unwrap();
//!
//! let sorted = dataset.sort_by("Share", false).unwrap();
//! assert_eq!(
//!     sorted.records()[0].get("Stage").and_then(Value::as_str),
//!     Some("Short-term Grants")
//! );
//! // The original dataset is untouched.
//! assert_eq!(
//!     dataset.records()[0].get("Stage").and_then(Value::as_str),
//!     Some("Endowment")
//! );
//! ```

use std::{cmp::Ordering, fmt};

use chrono::NaiveDate;
use log::debug;
use thiserror::Error;

/// Errors raised while building or transforming a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("schema mismatch in row {row}: {reason}")]
    SchemaMismatch { row: usize, reason: String },

    #[error("unknown field `{0}`")]
    UnknownField(String),
}

/// The type of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Categorical,
    Number,
    Date,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Categorical => "categorical",
            ValueKind::Number => "number",
            ValueKind::Date => "date",
        };
        f.write_str(name)
    }
}

/// A single typed cell of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Categorical(String),
    Number(f64),
    Date(NaiveDate),
}

impl Value {
    /// Creates a categorical value
    pub fn categorical(label: impl Into<String>) -> Self {
        Value::Categorical(label.into())
    }

    /// Creates a numeric value
    pub fn number(value: f64) -> Self {
        Value::Number(value)
    }

    /// Creates a date value
    pub fn date(date: NaiveDate) -> Self {
        Value::Date(date)
    }

    /// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns the chrono parse error when `raw` is not a valid date.
    pub fn parse_date(raw: &str) -> Result<Self, chrono::ParseError> {
        raw.parse::<NaiveDate>().map(Value::Date)
    }

    /// Returns the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Categorical(_) => ValueKind::Categorical,
            Value::Number(_) => ValueKind::Number,
            Value::Date(_) => ValueKind::Date,
        }
    }

    /// Returns the label of a categorical value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Categorical(label) => Some(label),
            _ => None,
        }
    }

    /// Returns the number of a numeric value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the date of a date value
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// Total order between two values of the same kind.
    ///
    /// Values of different kinds are ordered by kind so the comparison stays
    /// total; a validated dataset never compares across kinds.
    fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Categorical(a), Value::Categorical(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            _ => kind_rank(self.kind()).cmp(&kind_rank(other.kind())),
        }
    }
}

fn kind_rank(kind: ValueKind) -> u8 {
    match kind {
        ValueKind::Categorical => 0,
        ValueKind::Number => 1,
        ValueKind::Date => 2,
    }
}

/// An ordered sequence of named values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, replacing the value in place when the name already exists.
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    /// Looks up a field value by exact name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Iterates over `(name, value)` pairs in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Name and kind of one dataset column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    name: String,
    kind: ValueKind,
}

impl FieldSpec {
    /// Returns the field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value kind shared by every record
    pub fn kind(&self) -> ValueKind {
        self.kind
    }
}

/// An immutable table of records sharing one schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    schema: Vec<FieldSpec>,
    records: Vec<Record>,
}

impl Dataset {
    /// Validates `records` against the schema of the first record and builds a dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::SchemaMismatch`] when a record's field-name set
    /// differs from the first record's, or a field's value kind changes.
    pub fn build(records: impl IntoIterator<Item = Record>) -> Result<Self, DatasetError> {
        let records: Vec<Record> = records.into_iter().collect();

        let schema: Vec<FieldSpec> = records
            .first()
            .map(|first| {
                first
                    .fields()
                    .map(|(name, value)| FieldSpec {
                        name: name.to_string(),
                        kind: value.kind(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        for (row, record) in records.iter().enumerate().skip(1) {
            if record.len() != schema.len() {
                return Err(DatasetError::SchemaMismatch {
                    row,
                    reason: format!(
                        "expected {} fields, found {}",
                        schema.len(),
                        record.len()
                    ),
                });
            }

            for spec in &schema {
                let value = record.get(&spec.name).ok_or_else(|| DatasetError::SchemaMismatch {
                    row,
                    reason: format!("missing field `{}`", spec.name),
                })?;

                if value.kind() != spec.kind {
                    return Err(DatasetError::SchemaMismatch {
                        row,
                        reason: format!(
                            "field `{}` is {} but was {} in row 0",
                            spec.name,
                            value.kind(),
                            spec.kind
                        ),
                    });
                }
            }
        }

        debug!(rows = records.len(), fields = schema.len(); "Dataset built");

        Ok(Self { schema, records })
    }

    /// Returns a new dataset whose rows are stably sorted by `field`.
    ///
    /// Rows with equal keys keep their relative order in both directions.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::UnknownField`] if `field` is not part of the schema.
    /// An empty dataset has no schema and sorts to an empty dataset.
    pub fn sort_by(&self, field: &str, ascending: bool) -> Result<Dataset, DatasetError> {
        if !self.records.is_empty() && self.field_kind(field).is_none() {
            return Err(DatasetError::UnknownField(field.to_string()));
        }

        let mut records = self.records.clone();
        records.sort_by(|a, b| {
            let ordering = match (a.get(field), b.get(field)) {
                (Some(a), Some(b)) => a.compare(b),
                _ => Ordering::Equal,
            };
            if ascending { ordering } else { ordering.reverse() }
        });

        Ok(Dataset {
            schema: self.schema.clone(),
            records,
        })
    }

    /// Returns the rows in order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the column definitions, in the first record's field order
    pub fn schema(&self) -> &[FieldSpec] {
        &self.schema
    }

    /// Returns the kind of `field`, if it exists
    pub fn field_kind(&self, field: &str) -> Option<ValueKind> {
        self.schema
            .iter()
            .find(|spec| spec.name == field)
            .map(FieldSpec::kind)
    }

    /// Returns the number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Sorting keeps every row and leaves keys in non-decreasing order.
    fn check_sort_is_ordered_permutation(keys: Vec<i32>) -> Result<(), TestCaseError> {
        let records = keys.iter().enumerate().map(|(idx, key)| {
            Record::new()
                .with("Row", Value::number(idx as f64))
                .with("Key", Value::number(f64::from(*key)))
        });
        let dataset = Dataset::build(records).unwrap();
        let sorted = dataset.sort_by("Key", true).unwrap();

        prop_assert_eq!(sorted.len(), keys.len());

        let pairs: Vec<(f64, f64)> = sorted
            .records()
            .iter()
            .map(|r| {
                (
                    r.get("Key").and_then(Value::as_number).unwrap(),
                    r.get("Row").and_then(Value::as_number).unwrap(),
                )
            })
            .collect();

        for window in pairs.windows(2) {
            prop_assert!(window[0].0 <= window[1].0);
            if window[0].0 == window[1].0 {
                // Stability: equal keys keep their original row order
                prop_assert!(window[0].1 < window[1].1);
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn sort_is_ordered_permutation(keys in prop::collection::vec(-5i32..5, 0..30)) {
            check_sort_is_ordered_permutation(keys)?;
        }
    }
}
