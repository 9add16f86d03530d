use super::model::{add_into, RowKey, TableRow};
use super::state::TableState;
use serde::{Deserialize, Serialize};

/// What to do with a parent whose children are all filtered out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyParentPolicy {
    #[default]
    Hide,
    ZeroFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Leaf,
    /// `rolled_up` is set when the values shown are the sum of visible children.
    Parent { expanded: bool, rolled_up: bool },
    EmptyParent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderLine {
    pub key: RowKey,
    pub label: String,
    pub depth: usize,
    pub kind: LineKind,
    pub values: Vec<f64>,
    pub total: f64,
}

impl RenderLine {
    pub fn is_parent(&self) -> bool {
        matches!(self.kind, LineKind::Parent { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRender {
    pub lines: Vec<RenderLine>,
    pub totals: Vec<f64>,
    pub grand_total: f64,
}

impl TableRender {
    pub fn line(&self, index: usize) -> Option<&RenderLine> {
        self.lines.get(index)
    }

    pub fn position(&self, key: &RowKey) -> Option<usize> {
        self.lines.iter().position(|l| &l.key == key)
    }
}

/// Values a row adds to the column totals: a leaf its own values, a parent the sum
/// over its visible children. `None` when nothing beneath is visible.
fn contribution(row: &TableRow, state: &TableState) -> Option<Vec<f64>> {
    if row.is_leaf() {
        return Some(row.values.clone());
    }
    let mut sum: Option<Vec<f64>> = None;
    for child in row.children.iter().filter(|c| state.is_visible(&c.group_key)) {
        if let Some(values) = contribution(child, state) {
            add_into(sum.get_or_insert_with(Vec::new), &values);
        }
    }
    sum
}

/// Flattens the tree into display order and computes column totals.
pub fn plan(rows: &[TableRow], state: &TableState, policy: EmptyParentPolicy) -> TableRender {
    let width = rows.iter().map(|r| r.values.len()).max().unwrap_or(0);
    let mut out = TableRender {
        lines: Vec::new(),
        totals: vec![0.0; width],
        grand_total: 0.0,
    };

    for row in rows {
        let key = RowKey::root(&row.label);
        walk(row, key, 0, state, policy, width, &mut out.lines);
        if let Some(values) = contribution(row, state) {
            add_into(&mut out.totals, &values);
        }
    }
    out.grand_total = out.totals.iter().sum();
    out
}

fn walk(
    row: &TableRow,
    key: RowKey,
    depth: usize,
    state: &TableState,
    policy: EmptyParentPolicy,
    width: usize,
    lines: &mut Vec<RenderLine>,
) {
    let line = |kind: LineKind, values: Vec<f64>| RenderLine {
        key: key.clone(),
        label: row.label.clone(),
        depth,
        kind,
        total: values.iter().sum(),
        values,
    };

    if row.is_leaf() {
        lines.push(line(LineKind::Leaf, row.values.clone()));
        return;
    }

    let Some(rollup) = contribution(row, state) else {
        if policy == EmptyParentPolicy::ZeroFill {
            lines.push(line(LineKind::EmptyParent, vec![0.0; width]));
        }
        return;
    };

    let expanded = state.is_expanded(&key);
    let values = if expanded { rollup } else { row.values.clone() };
    lines.push(line(
        LineKind::Parent {
            expanded,
            rolled_up: expanded,
        },
        values,
    ));

    if expanded {
        for child in row
            .children
            .iter()
            .filter(|c| state.is_visible(&c.group_key))
        {
            walk(
                child,
                key.child(&child.label),
                depth + 1,
                state,
                policy,
                width,
                lines,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::state::{reduce, TableAction};

    fn rows() -> Vec<TableRow> {
        vec![
            TableRow::parent(
                "EU",
                vec![40.0, 60.0],
                vec![
                    TableRow::leaf("DE", vec![1.0, 2.0]),
                    TableRow::leaf("FR", vec![3.0, 4.0]),
                ],
            ),
            TableRow::leaf("Other", vec![10.0, 0.0]),
        ]
    }

    fn known() -> TableState {
        TableState::new(vec!["DE".into(), "FR".into()])
    }

    fn labels(render: &TableRender) -> Vec<(&str, usize)> {
        render
            .lines
            .iter()
            .map(|l| (l.label.as_str(), l.depth))
            .collect()
    }

    #[test]
    fn expanded_parent_rolls_up_visible_children() {
        let state = reduce(&known(), TableAction::ToggleExpansion(RowKey::root("EU")));
        let render = plan(&rows(), &state, EmptyParentPolicy::Hide);
        assert_eq!(labels(&render), vec![("EU", 0), ("DE", 1), ("FR", 1), ("Other", 0)]);
        assert_eq!(render.lines[0].values, vec![4.0, 6.0]);
        assert_eq!(render.lines[0].total, 10.0);
        assert_eq!(
            render.lines[0].kind,
            LineKind::Parent {
                expanded: true,
                rolled_up: true
            }
        );
        assert_eq!(render.lines[2].key, RowKey::root("EU").child("FR"));
    }

    #[test]
    fn hiding_a_child_leaves_the_other() {
        let state = reduce(&known(), TableAction::ToggleExpansion(RowKey::root("EU")));
        let state = reduce(&state, TableAction::ToggleVisibility("FR".into()));
        let render = plan(&rows(), &state, EmptyParentPolicy::Hide);
        assert_eq!(labels(&render), vec![("EU", 0), ("DE", 1), ("Other", 0)]);
        assert_eq!(render.lines[0].values, vec![1.0, 2.0]);
        assert_eq!(render.totals, vec![11.0, 2.0]);
    }

    #[test]
    fn collapsed_parent_shows_stored_values() {
        let render = plan(&rows(), &known(), EmptyParentPolicy::Hide);
        assert_eq!(labels(&render), vec![("EU", 0), ("Other", 0)]);
        assert_eq!(render.lines[0].values, vec![40.0, 60.0]);
    }

    #[test]
    fn totals_do_not_depend_on_expansion() {
        let collapsed = plan(&rows(), &known(), EmptyParentPolicy::Hide);
        let state = reduce(&known(), TableAction::ToggleExpansion(RowKey::root("EU")));
        let expanded = plan(&rows(), &state, EmptyParentPolicy::Hide);
        assert_eq!(collapsed.totals, vec![14.0, 6.0]);
        assert_eq!(expanded.totals, collapsed.totals);
        assert_eq!(expanded.grand_total, 20.0);
    }

    #[test]
    fn toggle_twice_restores_lines() {
        let base = plan(&rows(), &known(), EmptyParentPolicy::Hide);
        let key = RowKey::root("EU");
        let s = reduce(&known(), TableAction::ToggleExpansion(key.clone()));
        let s = reduce(&s, TableAction::ToggleExpansion(key));
        assert_eq!(plan(&rows(), &s, EmptyParentPolicy::Hide), base);
    }

    #[test]
    fn empty_parent_policies() {
        let s = reduce(&known(), TableAction::ToggleVisibility("DE".into()));
        let s = reduce(&s, TableAction::ToggleVisibility("FR".into()));

        let hidden = plan(&rows(), &s, EmptyParentPolicy::Hide);
        assert_eq!(labels(&hidden), vec![("Other", 0)]);
        assert_eq!(hidden.totals, vec![10.0, 0.0]);

        let zero = plan(&rows(), &s, EmptyParentPolicy::ZeroFill);
        assert_eq!(labels(&zero), vec![("EU", 0), ("Other", 0)]);
        assert_eq!(zero.lines[0].kind, LineKind::EmptyParent);
        assert_eq!(zero.lines[0].values, vec![0.0, 0.0]);
        assert_eq!(zero.totals, hidden.totals);

        let cleared = reduce(&s, TableAction::ClearFilters);
        assert_eq!(plan(&rows(), &cleared, EmptyParentPolicy::Hide).lines.len(), 2);
    }

    #[test]
    fn nested_rows_roll_up_through_levels() {
        let tree = vec![TableRow::parent(
            "World",
            vec![0.0],
            vec![TableRow::parent(
                "EU",
                vec![0.0],
                vec![TableRow::leaf("DE", vec![2.0]), TableRow::leaf("FR", vec![5.0])],
            )],
        )];
        let s = TableState::new(vec!["EU".into(), "DE".into(), "FR".into()]);
        let world = RowKey::root("World");
        let s = reduce(&s, TableAction::ExpandAll(vec![world.clone(), world.child("EU")]));
        let s = reduce(&s, TableAction::ToggleVisibility("FR".into()));
        let render = plan(&tree, &s, EmptyParentPolicy::Hide);
        assert_eq!(labels(&render), vec![("World", 0), ("EU", 1), ("DE", 2)]);
        assert_eq!(render.lines[0].values, vec![2.0]);
        assert_eq!(render.grand_total, 2.0);
    }

    #[test]
    fn empty_input() {
        let render = plan(&[], &TableState::default(), EmptyParentPolicy::Hide);
        assert!(render.lines.is_empty());
        assert!(render.totals.is_empty());
        assert_eq!(render.grand_total, 0.0);
    }
}
