//! Dashboard JSON source: an object of named row groups.
//!
//! ```json
//! { "pd_backtest": { "rows": [ { "REPORT_DATE": "2024 Q1", "METRIC": "obv_def_rate", "VALUE": 0.02 } ] } }
//! ```
//!
//! A group may also be a bare array of rows. A group whose `rows` is missing or not an
//! array is kept (as malformed) so callers can report it instead of failing the load.

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, warn};

/// One flat row: column name to string/number/bool/null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Map<String, Value>,
}

impl RawRow {
    pub fn new(cells: Map<String, Value>) -> Self {
        Self { cells }
    }

    /// Text view of a cell. Numbers and booleans are stringified; null and empty strings are `None`.
    pub fn text(&self, column: &str) -> Option<Cow<'_, str>> {
        match self.cells.get(column)? {
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    /// Numeric view of a cell. Accepts JSON numbers and numeric strings.
    pub fn number(&self, column: &str) -> Option<f64> {
        match self.cells.get(column)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// [`RawRow::text`], falling back to the column name with `_` and `-` swapped
    /// (exports disagree on `REPORT_DATE` vs `REPORT-DATE`).
    pub fn text_either_separator(&self, column: &str) -> Option<Cow<'_, str>> {
        self.text(column).or_else(|| {
            let alt: String = column
                .chars()
                .map(|c| match c {
                    '_' => '-',
                    '-' => '_',
                    c => c,
                })
                .collect();
            self.text(&alt)
        })
    }
}

/// A named group of rows. `rows` is `None` when the source had no usable rows array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowGroup {
    pub name: String,
    pub rows: Option<Vec<RawRow>>,
}

impl RowGroup {
    fn from_value(name: &str, value: Value) -> Self {
        let rows = match value {
            Value::Array(items) => Some(rows_from_array(name, items)),
            Value::Object(mut obj) => match obj.remove("rows") {
                Some(Value::Array(items)) => Some(rows_from_array(name, items)),
                _ => None,
            },
            _ => None,
        };
        Self {
            name: name.to_string(),
            rows,
        }
    }
}

fn rows_from_array(group: &str, items: Vec<Value>) -> Vec<RawRow> {
    let total = items.len();
    let rows: Vec<RawRow> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(cells) => Some(RawRow::new(cells)),
            _ => None,
        })
        .collect();
    if rows.len() < total {
        warn!(
            group,
            skipped = total - rows.len(),
            "skipped row entries that are not JSON objects"
        );
    }
    rows
}

/// All row groups of one dashboard file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    groups: Vec<RowGroup>,
}

impl Dataset {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        Self::from_json_str(&content).wrap_err_with(|| format!("Failed to load {}", path.display()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(eyre!(
                "Expected a JSON object of named row groups at the top level"
            ));
        };
        let groups: Vec<RowGroup> = map
            .into_iter()
            .map(|(name, v)| RowGroup::from_value(&name, v))
            .collect();
        debug!(groups = groups.len(), "dataset parsed");
        Ok(Self { groups })
    }

    pub fn from_groups(groups: Vec<RowGroup>) -> Self {
        Self { groups }
    }

    pub fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.name.clone()).collect()
    }

    pub fn group(&self, name: &str) -> Option<&RowGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Rows of a group; `None` for a missing group or a group without a rows array.
    pub fn rows(&self, name: &str) -> Option<&[RawRow]> {
        self.group(name)?.rows.as_deref()
    }

    /// First group whose rows carry `column`.
    pub fn first_group_with_column(&self, column: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| {
                g.rows
                    .as_ref()
                    .is_some_and(|rows| rows.iter().any(|r| r.contains(column)))
            })
            .map(|g| g.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
