use super::model::RowKey;
use std::collections::BTreeSet;
use tracing::debug;

/// Expansion and visibility for one table. Never mutated in place; see [`reduce`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    expanded: BTreeSet<RowKey>,
    visible: BTreeSet<String>,
    /// Group keys in the current data, first-seen order.
    known: Vec<String>,
}

impl TableState {
    /// Everything collapsed, every known key visible.
    pub fn new(known: Vec<String>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(known.len());
        for key in known {
            if !deduped.contains(&key) {
                deduped.push(key);
            }
        }
        Self {
            expanded: BTreeSet::new(),
            visible: deduped.iter().cloned().collect(),
            known: deduped,
        }
    }

    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.expanded.contains(key)
    }

    pub fn is_visible(&self, group_key: &str) -> bool {
        self.visible.contains(group_key)
    }

    pub fn known(&self) -> &[String] {
        &self.known
    }

    pub fn visible(&self) -> &BTreeSet<String> {
        &self.visible
    }

    pub fn expanded(&self) -> &BTreeSet<RowKey> {
        &self.expanded
    }

    pub fn all_visible(&self) -> bool {
        self.visible.len() == self.known.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    ToggleExpansion(RowKey),
    ToggleVisibility(String),
    ClearFilters,
    ExpandAll(Vec<RowKey>),
    CollapseAll,
    DataChanged(Vec<String>),
}

/// Next state for `action`. Visibility only ever holds known keys.
pub fn reduce(state: &TableState, action: TableAction) -> TableState {
    debug!(?action, "table action");
    match action {
        TableAction::ToggleExpansion(key) => {
            let mut next = state.clone();
            if !next.expanded.remove(&key) {
                next.expanded.insert(key);
            }
            next
        }
        TableAction::ToggleVisibility(group_key) => {
            if !state.known.contains(&group_key) {
                return state.clone();
            }
            let mut next = state.clone();
            if !next.visible.remove(&group_key) {
                next.visible.insert(group_key);
            }
            next
        }
        TableAction::ClearFilters => TableState {
            visible: state.known.iter().cloned().collect(),
            ..state.clone()
        },
        TableAction::ExpandAll(keys) => {
            let mut next = state.clone();
            next.expanded.extend(keys);
            next
        }
        TableAction::CollapseAll => TableState {
            expanded: BTreeSet::new(),
            ..state.clone()
        },
        TableAction::DataChanged(known) => TableState::new(known),
    }
}
