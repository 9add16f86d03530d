use crate::reshape::UNKNOWN_LABEL;
use crate::source::RawRow;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Path of labels from the top level down to a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowKey(pub Vec<String>);

impl RowKey {
    pub fn root(label: &str) -> Self {
        Self(vec![label.to_string()])
    }

    pub fn child(&self, label: &str) -> Self {
        let mut path = self.0.clone();
        path.push(label.to_string());
        Self(path)
    }

    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" / "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: String,
    /// Identity used by the visibility filter.
    pub group_key: String,
    pub values: Vec<f64>,
    pub total: f64,
    pub children: Vec<TableRow>,
}

impl TableRow {
    pub fn leaf(label: &str, values: Vec<f64>) -> Self {
        Self {
            label: label.to_string(),
            group_key: label.to_string(),
            total: values.iter().sum(),
            values,
            children: Vec::new(),
        }
    }

    pub fn parent(label: &str, values: Vec<f64>, children: Vec<TableRow>) -> Self {
        Self {
            children,
            ..Self::leaf(label, values)
        }
    }

    pub fn with_group_key(mut self, key: &str) -> Self {
        self.group_key = key.to_string();
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Which source columns make up the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSpec {
    pub parent_column: String,
    pub child_column: String,
    /// Distinct values of this column become the table's value columns.
    pub column_field: String,
    pub value_column: String,
}

impl Default for TableSpec {
    fn default() -> Self {
        Self {
            parent_column: "REGION".to_string(),
            child_column: "COUNTRY".to_string(),
            column_field: "REPORT_DATE".to_string(),
            value_column: "VALUE".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableModel {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

// Parent under construction: own cells plus children, all in first-seen order.
struct ParentAcc {
    label: String,
    own: Option<Vec<f64>>,
    children: Vec<(String, Vec<f64>)>,
}

impl TableModel {
    pub fn new(columns: Vec<String>, rows: Vec<TableRow>) -> Self {
        Self { columns, rows }
    }

    /// Groups flat rows into parents and children. Rows with an empty child cell hold
    /// the parent's own values; a parent without them stores the sum of its children.
    pub fn from_rows(rows: &[RawRow], spec: &TableSpec) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in rows {
            let column = column_label(row, &spec.column_field);
            if !columns.contains(&column) {
                columns.push(column);
            }
        }

        let width = columns.len();
        let mut parents: Vec<ParentAcc> = Vec::new();
        for row in rows {
            let parent_label = text_or_unknown(row, &spec.parent_column);
            let column = column_label(row, &spec.column_field);
            let col = columns.iter().position(|c| *c == column).unwrap_or(0);
            let value = row.number(&spec.value_column).unwrap_or(0.0);

            let idx = match parents.iter().position(|p| p.label == parent_label) {
                Some(idx) => idx,
                None => {
                    parents.push(ParentAcc {
                        label: parent_label,
                        own: None,
                        children: Vec::new(),
                    });
                    parents.len() - 1
                }
            };
            let parent = &mut parents[idx];

            let cells = match row.text(&spec.child_column) {
                None => parent.own.get_or_insert_with(|| vec![0.0; width]),
                Some(child) => {
                    let pos = match parent.children.iter().position(|(l, _)| *l == child) {
                        Some(pos) => pos,
                        None => {
                            parent.children.push((child.into_owned(), vec![0.0; width]));
                            parent.children.len() - 1
                        }
                    };
                    &mut parent.children[pos].1
                }
            };
            cells[col] += value;
        }

        let rows: Vec<TableRow> = parents
            .into_iter()
            .map(|p| {
                let children: Vec<TableRow> = p
                    .children
                    .into_iter()
                    .map(|(label, values)| TableRow::leaf(&label, values))
                    .collect();
                let values = p.own.unwrap_or_else(|| {
                    let mut sum = vec![0.0; width];
                    for child in &children {
                        add_into(&mut sum, &child.values);
                    }
                    sum
                });
                TableRow::parent(&p.label, values, children)
            })
            .collect();

        debug!(columns = width, parents = rows.len(), "table model built");
        Self { columns, rows }
    }

    /// Group keys of every non-top-level row, first-seen order, no duplicates.
    pub fn known_group_keys(&self) -> Vec<String> {
        fn collect(rows: &[TableRow], out: &mut Vec<String>) {
            for row in rows {
                if !out.contains(&row.group_key) {
                    out.push(row.group_key.clone());
                }
                collect(&row.children, out);
            }
        }
        let mut keys = Vec::new();
        for row in &self.rows {
            collect(&row.children, &mut keys);
        }
        keys
    }

    /// Keys of every row that has children.
    pub fn parent_keys(&self) -> Vec<RowKey> {
        fn collect(rows: &[TableRow], prefix: Option<&RowKey>, out: &mut Vec<RowKey>) {
            for row in rows {
                let key = match prefix {
                    Some(p) => p.child(&row.label),
                    None => RowKey::root(&row.label),
                };
                if !row.is_leaf() {
                    collect(&row.children, Some(&key), out);
                    out.push(key);
                }
            }
        }
        let mut keys = Vec::new();
        collect(&self.rows, None, &mut keys);
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn text_or_unknown(row: &RawRow, column: &str) -> String {
    row.text(column)
        .map_or_else(|| UNKNOWN_LABEL.to_string(), |s| s.into_owned())
}

// Value columns are usually periods, so `REPORT-DATE` exports still resolve.
fn column_label(row: &RawRow, column: &str) -> String {
    row.text_either_separator(column)
        .map_or_else(|| UNKNOWN_LABEL.to_string(), |s| s.into_owned())
}

/// Elementwise `acc += values`, growing `acc` if needed.
pub(crate) fn add_into(acc: &mut Vec<f64>, values: &[f64]) {
    if acc.len() < values.len() {
        acc.resize(values.len(), 0.0);
    }
    for (a, v) in acc.iter_mut().zip(values) {
        *a += v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(rows: serde_json::Value) -> Vec<RawRow> {
        rows.as_array()
            .unwrap()
            .iter()
            .map(|v| RawRow::new(v.as_object().cloned().unwrap()))
            .collect()
    }

    #[test]
    fn groups_parents_children_and_columns() {
        let rows = raw(json!([
            {"REGION": "EU", "COUNTRY": "DE", "REPORT_DATE": "2024 Q1", "VALUE": 1},
            {"REGION": "EU", "COUNTRY": "FR", "REPORT_DATE": "2024 Q1", "VALUE": 3},
            {"REGION": "EU", "COUNTRY": "DE", "REPORT_DATE": "2024 Q2", "VALUE": 2},
            {"REGION": "EU", "COUNTRY": "FR", "REPORT_DATE": "2024 Q2", "VALUE": 4},
            {"REGION": "US", "COUNTRY": "", "REPORT_DATE": "2024 Q1", "VALUE": 10}
        ]));
        let model = TableModel::from_rows(&rows, &TableSpec::default());
        assert_eq!(model.columns, vec!["2024 Q1", "2024 Q2"]);
        assert_eq!(model.rows.len(), 2);

        let eu = &model.rows[0];
        assert_eq!(eu.values, vec![4.0, 6.0]);
        assert_eq!(eu.total, 10.0);
        assert_eq!(eu.children[0].values, vec![1.0, 2.0]);
        assert_eq!(eu.children[1].values, vec![3.0, 4.0]);

        let us = &model.rows[1];
        assert!(us.is_leaf());
        assert_eq!(us.values, vec![10.0, 0.0]);
    }

    #[test]
    fn own_rows_are_stored_values() {
        let rows = raw(json!([
            {"REGION": "EU", "REPORT_DATE": "Q1", "VALUE": 99},
            {"REGION": "EU", "COUNTRY": "DE", "REPORT_DATE": "Q1", "VALUE": 1}
        ]));
        let model = TableModel::from_rows(&rows, &TableSpec::default());
        assert_eq!(model.rows[0].values, vec![99.0]);
        assert_eq!(model.rows[0].children.len(), 1);
    }

    #[test]
    fn missing_labels_are_unknown() {
        let rows = raw(json!([{"COUNTRY": "DE", "VALUE": "2.5"}]));
        let model = TableModel::from_rows(&rows, &TableSpec::default());
        assert_eq!(model.columns, vec![UNKNOWN_LABEL]);
        assert_eq!(model.rows[0].label, UNKNOWN_LABEL);
        assert_eq!(model.rows[0].children[0].values, vec![2.5]);
    }

    #[test]
    fn hyphenated_column_field_resolves() {
        let rows = raw(json!([
            {"REGION": "EU", "COUNTRY": "DE", "REPORT-DATE": "2024 Q1", "VALUE": 1},
            {"REGION": "EU", "COUNTRY": "DE", "REPORT-DATE": "2024 Q2", "VALUE": 2}
        ]));
        let model = TableModel::from_rows(&rows, &TableSpec::default());
        assert_eq!(model.columns, vec!["2024 Q1", "2024 Q2"]);
        assert_eq!(model.rows[0].children[0].values, vec![1.0, 2.0]);
    }

    #[test]
    fn keys() {
        let model = TableModel::new(
            vec!["a".into()],
            vec![
                TableRow::parent(
                    "EU",
                    vec![0.0],
                    vec![TableRow::leaf("DE", vec![1.0]), TableRow::leaf("FR", vec![2.0])],
                ),
                TableRow::parent("NA", vec![0.0], vec![TableRow::leaf("DE", vec![1.0])]),
                TableRow::leaf("Other", vec![5.0]),
            ],
        );
        assert_eq!(model.known_group_keys(), vec!["DE", "FR"]);
        assert_eq!(
            model.parent_keys(),
            vec![RowKey::root("EU"), RowKey::root("NA")]
        );
        assert_eq!(RowKey::root("EU").child("DE").to_string(), "EU / DE");
        assert_eq!(RowKey::root("EU").child("DE").depth(), 1);
    }
}
