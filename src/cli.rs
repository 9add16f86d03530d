//! CLI arguments, shared with the build script through the `dashui-cli` crate.

pub use dashui_cli::{Args, EmptyParents};

use crate::config::AppConfig;
use crate::hierarchy::EmptyParentPolicy;
use crate::period::PeriodRange;

impl From<EmptyParents> for EmptyParentPolicy {
    fn from(value: EmptyParents) -> Self {
        match value {
            EmptyParents::Hide => EmptyParentPolicy::Hide,
            EmptyParents::ZeroFill => EmptyParentPolicy::ZeroFill,
        }
    }
}

impl AppConfig {
    /// Command-line flags take precedence over the config file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(group) = &args.chart_group {
            self.chart.group = Some(group.clone());
        }
        if let Some(group) = &args.table_group {
            self.table.group = Some(group.clone());
        }
        if !args.metrics.is_empty() {
            self.chart.metrics = args.metrics.clone();
        }
        if args.period_from.is_some() || args.period_to.is_some() {
            self.chart.period_range = PeriodRange::new(
                args.period_from
                    .clone()
                    .or_else(|| self.chart.period_range.from.clone()),
                args.period_to
                    .clone()
                    .or_else(|| self.chart.period_range.to.clone()),
            );
        }
        if let Some(policy) = args.empty_parents {
            self.table.empty_parents = policy.into();
        }
        if args.debug {
            self.debug.enabled = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "dashui",
            "data.json",
            "--chart-group",
            "sales",
            "--metric",
            "x",
            "--metric",
            "y",
            "--period-to",
            "2024 Q4",
            "--empty-parents",
            "zero-fill",
        ]);
        let mut config = AppConfig::default();
        config.chart.period_range = PeriodRange::new(Some("2023 Q1".into()), None);
        config.apply_args(&args);

        assert_eq!(config.chart.group.as_deref(), Some("sales"));
        assert_eq!(config.chart.metrics, vec!["x", "y"]);
        assert_eq!(config.chart.period_range.from.as_deref(), Some("2023 Q1"));
        assert_eq!(config.chart.period_range.to.as_deref(), Some("2024 Q4"));
        assert_eq!(config.table.empty_parents, EmptyParentPolicy::ZeroFill);
        assert!(!config.debug.enabled);
    }

    #[test]
    fn path_optional_with_early_exit_flags() {
        let args = Args::parse_from(["dashui", "--clear-cache"]);
        assert!(args.path.is_none());
        assert!(Args::try_parse_from(["dashui"]).is_err());
    }
}
