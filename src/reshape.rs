//! Long-to-wide reshaping: flat (period, category, metric, value) records become one
//! row per period with metrics as fields.

use crate::period::PeriodRange;
use crate::source::{Dataset, RawRow};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Label used when a text field is missing from a row.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Source column names for flat records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub period: String,
    pub category: String,
    pub metric: String,
    pub value: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            period: "REPORT_DATE".to_string(),
            category: "CATEGORY".to_string(),
            metric: "METRIC".to_string(),
            value: "VALUE".to_string(),
        }
    }
}

impl ColumnMap {
    pub fn resolve_period<'a>(&self, row: &'a RawRow) -> Option<Cow<'a, str>> {
        row.text_either_separator(&self.period)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlatRecord {
    pub period: String,
    pub category: String,
    pub metric: String,
    pub value: f64,
}

impl FlatRecord {
    pub fn new(period: &str, category: &str, metric: &str, value: f64) -> Self {
        Self {
            period: period.to_string(),
            category: category.to_string(),
            metric: metric.to_string(),
            value,
        }
    }

    /// Missing text fields become [`UNKNOWN_LABEL`]; a missing or non-numeric value becomes 0.
    pub fn from_row(row: &RawRow, columns: &ColumnMap) -> Self {
        Self {
            period: owned_or_unknown(columns.resolve_period(row)),
            category: owned_or_unknown(row.text(&columns.category)),
            metric: owned_or_unknown(row.text(&columns.metric)),
            value: row.number(&columns.value).unwrap_or(0.0),
        }
    }
}

fn owned_or_unknown(value: Option<Cow<'_, str>>) -> String {
    value.map_or_else(|| UNKNOWN_LABEL.to_string(), Cow::into_owned)
}

/// Which metrics a pivoted row carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MetricSet {
    /// Every metric seen, in first-seen order.
    #[default]
    Open,
    /// Exactly these metrics in this order; absent ones are 0, others are dropped.
    Fixed(Vec<String>),
}

impl MetricSet {
    pub fn from_names(names: Vec<String>) -> Self {
        if names.is_empty() {
            Self::Open
        } else {
            Self::Fixed(names)
        }
    }

    fn accepts(&self, metric: &str) -> bool {
        match self {
            Self::Open => true,
            Self::Fixed(names) => names.iter().any(|n| n == metric),
        }
    }
}

/// One period with its metric values, metric order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotedRow {
    pub period: String,
    values: Vec<(String, f64)>,
}

impl PivotedRow {
    pub fn new(period: &str) -> Self {
        Self {
            period: period.to_string(),
            values: Vec::new(),
        }
    }

    fn seeded(period: &str, metrics: &MetricSet) -> Self {
        let mut row = Self::new(period);
        if let MetricSet::Fixed(names) = metrics {
            row.values = names.iter().map(|n| (n.clone(), 0.0)).collect();
        }
        row
    }

    pub fn get(&self, metric: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name == metric)
            .map(|(_, v)| *v)
    }

    /// Replaces an existing metric in place, otherwise appends it.
    pub fn set(&mut self, metric: &str, value: f64) {
        match self.values.iter_mut().find(|(name, _)| name == metric) {
            Some(slot) => slot.1 = value,
            None => self.values.push((metric.to_string(), value)),
        }
    }

    pub fn with(mut self, metric: &str, value: f64) -> Self {
        self.set(metric, value);
        self
    }

    pub fn metrics(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> &[(String, f64)] {
        &self.values
    }
}

/// One row per distinct period in first-seen order. A later record for the same
/// (period, metric) overwrites the earlier one.
pub fn pivot_records(records: &[FlatRecord], metrics: &MetricSet) -> Vec<PivotedRow> {
    let mut rows: Vec<PivotedRow> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let idx = *index.entry(record.period.as_str()).or_insert_with(|| {
            rows.push(PivotedRow::seeded(&record.period, metrics));
            rows.len() - 1
        });
        if metrics.accepts(&record.metric) {
            rows[idx].set(&record.metric, record.value);
        }
    }

    rows
}

/// Back to one record per (period, metric) cell.
pub fn unpivot(rows: &[PivotedRow], category: &str) -> Vec<FlatRecord> {
    rows.iter()
        .flat_map(|row| {
            row.values
                .iter()
                .map(|(metric, value)| FlatRecord::new(&row.period, category, metric, *value))
        })
        .collect()
}

/// How to pull a series out of a dataset group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReshapeOptions {
    pub columns: ColumnMap,
    pub metrics: MetricSet,
    pub range: PeriodRange,
    /// Keep only records of this category.
    pub category: Option<String>,
}

/// Pivot the rows of `group`. A missing group, or one without a rows array, is logged
/// and yields no rows.
pub fn extract_series(dataset: &Dataset, group: &str, options: &ReshapeOptions) -> Vec<PivotedRow> {
    let Some(found) = dataset.group(group) else {
        warn!(group, "row group not found; no series produced");
        return Vec::new();
    };
    let Some(rows) = found.rows.as_deref() else {
        warn!(group, "row group has no rows array; no series produced");
        return Vec::new();
    };

    let records: Vec<FlatRecord> = rows
        .iter()
        .map(|row| FlatRecord::from_row(row, &options.columns))
        .filter(|r| options.range.is_unbounded() || options.range.contains(&r.period))
        .filter(|r| {
            options
                .category
                .as_deref()
                .map_or(true, |c| r.category == c)
        })
        .collect();

    let pivoted = pivot_records(&records, &options.metrics);
    debug!(
        group,
        records = records.len(),
        periods = pivoted.len(),
        "series extracted"
    );
    pivoted
}
