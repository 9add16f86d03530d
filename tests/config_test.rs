use dashui::config::{AppConfig, ConfigManager, CONFIG_FILE_NAME};
use dashui::EmptyParentPolicy;
use std::fs;
use tempfile::TempDir;

// Helper to create a temporary config directory for testing
fn setup_test_config_dir() -> (TempDir, ConfigManager) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_manager = ConfigManager::with_dir(temp_dir.path().to_path_buf());
    (temp_dir, config_manager)
}

fn write_user_config(manager: &ConfigManager, content: &str) {
    manager.ensure_config_dir().expect("Failed to create config dir");
    fs::write(manager.config_path(CONFIG_FILE_NAME), content).expect("Failed to write config");
}

#[test]
fn test_default_config() {
    let config = AppConfig::default();

    assert_eq!(config.version, "0.1");

    assert_eq!(config.source.columns.period, "REPORT_DATE");
    assert_eq!(config.source.columns.metric, "METRIC");

    assert!(config.chart.group.is_none());
    assert!(config.chart.metrics.is_empty());
    assert!(config.chart.show_legend);
    assert!(config.chart.period_range.is_unbounded());

    assert_eq!(config.table.parent_column, "REGION");
    assert_eq!(config.table.child_column, "COUNTRY");
    assert_eq!(config.table.empty_parents, EmptyParentPolicy::Hide);
    assert_eq!(config.table.totals_label, "Total");

    assert_eq!(config.performance.event_poll_interval_ms, 25);
    assert_eq!(config.theme.colors.keybind_hints, "cyan");
    assert!(!config.debug.enabled);
}

#[test]
fn test_generate_default_config() {
    let (_temp_dir, config_manager) = setup_test_config_dir();

    let template = config_manager.generate_default_config();

    assert!(template.contains("# [source.columns]"));
    assert!(template.contains("# [chart]"));
    assert!(template.contains("# [table]"));
    assert!(template.contains("# [theme.colors]"));
    assert!(template.contains("# [performance]"));
    assert!(template.contains("# [debug]"));
    assert!(template.contains("# version = \"0.1\""));
}

#[test]
fn test_generated_template_parses_to_defaults() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    let template = config_manager.generate_default_config();
    let config: AppConfig = toml::from_str(&template).expect("template should parse");
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_write_default_config() {
    let (_temp_dir, config_manager) = setup_test_config_dir();

    let config_path = config_manager
        .write_default_config(false)
        .expect("Failed to write config");

    assert!(config_path.exists());
    let content = fs::read_to_string(&config_path).expect("Failed to read config");
    assert!(content.contains("# [table]"));
}

#[test]
fn test_write_config_without_force_fails_if_exists() {
    let (_temp_dir, config_manager) = setup_test_config_dir();

    config_manager
        .write_default_config(false)
        .expect("First write should succeed");

    let result = config_manager.write_default_config(false);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("already exists"));
}

#[test]
fn test_write_config_with_force_overwrites() {
    let (_temp_dir, config_manager) = setup_test_config_dir();

    let first_path = config_manager
        .write_default_config(false)
        .expect("First write should succeed");
    let second_path = config_manager
        .write_default_config(true)
        .expect("Second write with force should succeed");

    assert_eq!(first_path, second_path);
    assert!(first_path.exists());
}

#[test]
fn test_load_config_with_no_file() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    let config = AppConfig::load_from(&config_manager).expect("Should load default config");
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_load_minimal_config_keeps_other_defaults() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    write_user_config(
        &config_manager,
        r#"
[chart]
group = "pd_backtest"
metrics = ["predicted", "observed"]

[chart.period_range]
from = "2023 Q4"

[table]
empty_parents = "zero-fill"
totals_label = "All regions"
"#,
    );

    let config = AppConfig::load_from(&config_manager).expect("Failed to load config");

    assert_eq!(config.chart.group.as_deref(), Some("pd_backtest"));
    assert_eq!(config.chart.metrics, vec!["predicted", "observed"]);
    assert_eq!(config.chart.period_range.from.as_deref(), Some("2023 Q4"));
    assert!(config.chart.period_range.to.is_none());
    assert_eq!(config.table.empty_parents, EmptyParentPolicy::ZeroFill);
    assert_eq!(config.table.totals_label, "All regions");

    assert_eq!(config.table.parent_column, "REGION");
    assert_eq!(config.performance.event_poll_interval_ms, 25);
}

#[test]
fn test_load_rejects_invalid_values() {
    // with NO_COLOR every color parses to Reset and nothing is rejected
    std::env::remove_var("NO_COLOR");
    let (_temp_dir, config_manager) = setup_test_config_dir();
    write_user_config(
        &config_manager,
        r#"
[theme.colors]
error = "not_a_color"
"#,
    );
    let err = AppConfig::load_from(&config_manager).unwrap_err().to_string();
    assert!(err.contains("Invalid configuration"), "got: {}", err);
    assert!(err.contains("theme.colors.error"), "got: {}", err);
}

#[test]
fn test_load_rejects_malformed_toml() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    write_user_config(&config_manager, "[chart\ngroup = ");
    let err = AppConfig::load_from(&config_manager).unwrap_err().to_string();
    assert!(err.contains("Failed to parse config file"), "got: {}", err);
}

#[test]
fn test_merge_configs() {
    let mut base = AppConfig::default();
    let mut override_config = AppConfig::default();

    override_config.source.columns.value = "AMOUNT".to_string();
    override_config.table.indent_width = 4;
    override_config.performance.event_poll_interval_ms = 50;
    override_config.theme.colors.keybind_hints = "blue".to_string();

    base.merge(override_config);

    assert_eq!(base.source.columns.value, "AMOUNT");
    assert_eq!(base.table.indent_width, 4);
    assert_eq!(base.performance.event_poll_interval_ms, 50);
    assert_eq!(base.theme.colors.keybind_hints, "blue");

    // unmodified values remain default
    assert_eq!(base.source.columns.metric, "METRIC");
    assert_eq!(base.table.decimals, 2);
}

#[test]
fn test_validate_config_valid() {
    assert!(AppConfig::default().validate().is_ok());
}

#[test]
fn test_validate_config_invalid_version() {
    let config = AppConfig {
        version: "1.0".to_string(),
        ..Default::default()
    };
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("Unsupported config version"));
}

#[test]
fn test_validate_zero_poll_interval() {
    let mut config = AppConfig::default();
    config.performance.event_poll_interval_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_export_size() {
    let mut config = AppConfig::default();
    config.chart.export_height = 0;
    assert!(config.validate().is_err());
}
