//! Expandable parent/child summary table.
//!
//! [`model`] builds the row tree from flat rows, [`state`] holds expansion and
//! visibility as immutable snapshots changed only through [`state::reduce`], and
//! [`layout`] walks the tree into a flat list of lines plus column totals.

pub mod layout;
pub mod model;
pub mod state;

pub use layout::{plan, EmptyParentPolicy, LineKind, RenderLine, TableRender};
pub use model::{RowKey, TableModel, TableRow, TableSpec};
pub use state::{reduce, TableAction, TableState};
