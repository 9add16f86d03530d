//! Shared CLI definitions for dashui.
//!
//! Used by the main application and by the build script (manpage) and
//! gen_docs binary (command-line-options markdown).

use clap::{CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;

/// How a parent row is drawn when every one of its children is filtered out.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum EmptyParents {
    /// Leave the parent out of the table entirely
    Hide,
    /// Keep the parent row and show zeros in every column
    ZeroFill,
}

/// Command-line arguments for dashui
#[derive(Clone, Parser, Debug)]
#[command(
    name = "dashui",
    version,
    about = "Dashboard charts and rollup tables in the terminal"
)]
pub struct Args {
    /// Path to the dashboard JSON file (an object of named row groups).
    /// Not required with --generate-config or --clear-cache
    #[arg(required_unless_present_any = ["generate_config", "clear_cache"], value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Row group to chart on startup (default: config [chart] group, else the first group)
    #[arg(long = "chart-group", value_name = "GROUP")]
    pub chart_group: Option<String>,

    /// Row group used for the rollup table (default: config [table] group)
    #[arg(long = "table-group", value_name = "GROUP")]
    pub table_group: Option<String>,

    /// Metric to chart. Repeat to chart several; when omitted every metric in the group is charted
    #[arg(long = "metric", value_name = "NAME")]
    pub metrics: Vec<String>,

    /// First period to include in the chart (inclusive), e.g. "2023 Q4"
    #[arg(long = "period-from", value_name = "PERIOD")]
    pub period_from: Option<String>,

    /// Last period to include in the chart (inclusive), e.g. "2024 Q4"
    #[arg(long = "period-to", value_name = "PERIOD")]
    pub period_to: Option<String>,

    /// What to do with a parent row whose children are all filtered out
    #[arg(long = "empty-parents", value_enum)]
    pub empty_parents: Option<EmptyParents>,

    /// Enable debug mode to show operational information
    #[arg(long = "debug", action)]
    pub debug: bool,

    /// Write the log to this file instead of the cache directory
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Generate default configuration file at ~/.config/dashui/config.toml
    #[arg(long = "generate-config", action)]
    pub generate_config: bool,

    /// Force overwrite existing config file when using --generate-config
    #[arg(long = "force", requires = "generate_config", action)]
    pub force: bool,

    /// Clear all cache data (log files) and exit
    #[arg(long = "clear-cache", action)]
    pub clear_cache: bool,
}

/// Escape `|` and newlines for use in markdown table cells.
fn escape_table_cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\n', '\r'], " ")
}

fn value_placeholder(arg: &clap::Arg) -> String {
    arg.get_value_names()
        .map(|names| {
            names
                .iter()
                .map(|n: &clap::builder::Str| format!("<{}>", n.as_ref() as &str))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Render command-line options as markdown.
///
/// Used by the gen_docs binary.
pub fn render_options_markdown() -> String {
    let mut cmd = Args::command();
    cmd.build();

    let mut out = String::from("# Command Line Options\n\n");

    out.push_str("## Usage\n\n```\n");
    out.push_str(&cmd.render_usage().to_string());
    out.push_str("\n```\n\n");

    out.push_str("## Options\n\n");
    out.push_str("| Option | Description |\n");
    out.push_str("|--------|-------------|\n");

    for arg in cmd.get_arguments() {
        let id = arg.get_id().as_ref().to_string();
        if id == "help" || id == "version" {
            continue;
        }

        let option_str = if arg.is_positional() {
            let placeholder = value_placeholder(arg);
            if arg.is_required_set() {
                placeholder
            } else {
                format!("[{placeholder}]")
            }
        } else {
            let mut parts = Vec::new();
            if let Some(s) = arg.get_short() {
                parts.push(format!("-{s}"));
            }
            if let Some(l) = arg.get_long() {
                parts.push(format!("--{l}"));
            }
            let op = parts.join(", ");
            let placeholder = if arg.get_action().takes_values() {
                value_placeholder(arg)
            } else {
                String::new()
            };
            if placeholder.is_empty() {
                op
            } else {
                format!("{op} {placeholder}")
            }
        };

        let help = arg
            .get_help()
            .map(|h| escape_table_cell(&h.to_string()))
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!("| `{option_str}` | {help} |\n"));
    }

    out
}
