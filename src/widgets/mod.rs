pub mod chart;
pub mod controls;
pub mod debug;
pub mod filter_list;
pub mod hier_table;
