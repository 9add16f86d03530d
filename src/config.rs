use crate::hierarchy::{EmptyParentPolicy, TableSpec};
use crate::period::PeriodRange;
use crate::reshape::ColumnMap;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use supports_color::Stream;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Manages config directory and config file operations
#[derive(Clone)]
pub struct ConfigManager {
    pub(crate) config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager with a custom config directory (primarily for testing)
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn new(app_name: &str) -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| eyre!("Could not determine config directory"))?
            .join(app_name);
        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self, path: &str) -> PathBuf {
        self.config_dir.join(path)
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Default configuration as TOML with every field commented out, so that
    /// uncommenting a line is all it takes to override it.
    pub fn generate_default_config(&self) -> String {
        let toml_str = toml::to_string_pretty(&AppConfig::default())
            .unwrap_or_else(|e| panic!("Failed to serialize default config: {}", e));
        let comments: HashMap<&str, &str> = FIELD_COMMENTS.iter().copied().collect();

        let mut out = String::new();
        out.push_str("# dashui configuration file\n");
        out.push_str("# This file uses TOML format. See https://toml.io/ for syntax reference.\n\n");

        let mut section = String::new();
        let mut seen: HashSet<String> = HashSet::new();
        for line in toml_str.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                if !section.is_empty() {
                    push_unset_options(&mut out, &section, &seen, &comments);
                }
                section = trimmed[1..trimmed.len() - 1].to_string();
                if let Some((_, header)) = SECTION_HEADERS.iter().find(|(s, _)| *s == section) {
                    out.push_str(header);
                    out.push('\n');
                }
                out.push_str("# ");
                out.push_str(line);
                out.push('\n');
                continue;
            }
            match trimmed.split_once('=') {
                Some((field, _)) if !trimmed.starts_with('#') => {
                    let path = if section.is_empty() {
                        field.trim().to_string()
                    } else {
                        format!("{}.{}", section, field.trim())
                    };
                    if let Some(comment) = comments.get(path.as_str()) {
                        push_comment(&mut out, comment);
                    }
                    out.push_str("# ");
                    out.push_str(line);
                    out.push('\n');
                    seen.insert(path);
                }
                _ => {
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
        if !section.is_empty() {
            push_unset_options(&mut out, &section, &seen, &comments);
        }
        out
    }

    /// Write default configuration to config file
    pub fn write_default_config(&self, force: bool) -> Result<PathBuf> {
        let config_path = self.config_path(CONFIG_FILE_NAME);
        if config_path.exists() && !force {
            return Err(eyre!(
                "Config file already exists at {}. Use --force to overwrite.",
                config_path.display()
            ));
        }
        self.ensure_config_dir()?;
        std::fs::write(&config_path, self.generate_default_config())?;
        Ok(config_path)
    }
}

fn push_comment(out: &mut String, comment: &str) {
    for comment_line in comment.lines() {
        out.push_str("# ");
        out.push_str(comment_line);
        out.push('\n');
    }
}

// Optional fields are not serialized when unset; list them anyway so they can be discovered.
fn push_unset_options(
    out: &mut String,
    section: &str,
    seen: &HashSet<String>,
    comments: &HashMap<&str, &str>,
) {
    for (path, example) in OPTION_FIELDS {
        let Some((field_section, name)) = path.rsplit_once('.') else {
            continue;
        };
        if field_section != section || seen.contains(*path) {
            continue;
        }
        if let Some(comment) = comments.get(path) {
            push_comment(out, comment);
        }
        out.push_str(&format!("# {} = {}\n", name, example));
    }
}

const OPTION_FIELDS: &[(&str, &str)] = &[
    ("chart.group", "\"pd_backtest\""),
    ("chart.category", "\"retail\""),
    ("chart.period_range.from", "\"2023 Q4\""),
    ("chart.period_range.to", "\"2024 Q4\""),
    ("table.group", "\"exposure_by_region\""),
];

const SECTION_HEADERS: &[(&str, &str)] = &[
    (
        "source.columns",
        "# ============================================================================\n# Source Columns\n# ============================================================================\n# Column names of the flat records used for charts",
    ),
    (
        "chart",
        "# ============================================================================\n# Chart View\n# ============================================================================",
    ),
    (
        "table",
        "# ============================================================================\n# Summary Table\n# ============================================================================",
    ),
    (
        "theme.colors",
        "# ============================================================================\n# Color Theme\n# ============================================================================\n# Supported formats:\n#   - Named colors: \"red\", \"blue\", \"bright_red\", \"dark_gray\", etc. (case-insensitive)\n#   - Hex colors: \"#ff0000\"\n#   - Indexed colors: \"indexed(0-255)\"\n# Colors automatically adapt to your terminal's capabilities",
    ),
    (
        "performance",
        "# ============================================================================\n# Performance Settings\n# ============================================================================",
    ),
    (
        "debug",
        "# ============================================================================\n# Debug Settings\n# ============================================================================",
    ),
];

const FIELD_COMMENTS: &[(&str, &str)] = &[
    (
        "version",
        "Configuration format version (for future compatibility)",
    ),
    ("source.columns.period", "Column holding the period label"),
    (
        "source.columns.category",
        "Column holding the record category",
    ),
    ("source.columns.metric", "Column holding the metric name"),
    ("source.columns.value", "Column holding the numeric value"),
    (
        "chart.group",
        "Row group charted on startup\nWhen unset, the first group with a metric column is used",
    ),
    (
        "chart.metrics",
        "Metrics to chart, in legend order\nEmpty = every metric found, missing metrics plot as 0 otherwise",
    ),
    ("chart.category", "Only chart records of this category"),
    (
        "chart.period_range.from",
        "First period to chart (inclusive), e.g. \"2023 Q4\"",
    ),
    (
        "chart.period_range.to",
        "Last period to chart (inclusive), e.g. \"2024 Q4\"",
    ),
    ("chart.y_from_zero", "Start the y axis at zero"),
    ("chart.show_legend", "Show the series legend"),
    (
        "chart.export_width",
        "Width in pixels of exported chart images",
    ),
    (
        "chart.export_height",
        "Height in pixels of exported chart images",
    ),
    (
        "table.group",
        "Row group shown in the summary table\nWhen unset, the first group with the parent column is used",
    ),
    ("table.parent_column", "Column naming the top-level rows"),
    (
        "table.child_column",
        "Column naming the child rows; an empty value marks the parent's own values",
    ),
    (
        "table.column_field",
        "Column whose distinct values become table columns",
    ),
    ("table.value_column", "Column summed into each cell"),
    (
        "table.empty_parents",
        "Parents whose children are all filtered out: \"hide\" or \"zero-fill\"",
    ),
    ("table.indent_width", "Spaces per nesting level"),
    ("table.totals_label", "Label of the totals row"),
    ("table.decimals", "Decimal places shown in table cells"),
    (
        "performance.event_poll_interval_ms",
        "Event polling interval in milliseconds\nLower values = more responsive but higher CPU usage",
    ),
    ("debug.enabled", "Show the debug row by default"),
    ("debug.show_events", "Include event counters in the debug row"),
];

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration format version (for future compatibility)
    pub version: String,
    pub source: SourceConfig,
    pub chart: ChartConfig,
    pub table: TableConfig,
    pub theme: ThemeConfig,
    pub performance: PerformanceConfig,
    pub debug: DebugConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            source: SourceConfig::default(),
            chart: ChartConfig::default(),
            table: TableConfig::default(),
            theme: ThemeConfig::default(),
            performance: PerformanceConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub columns: ColumnMap,
}

impl SourceConfig {
    pub fn merge(&mut self, other: Self) {
        let default = ColumnMap::default();
        let ColumnMap {
            period,
            category,
            metric,
            value,
        } = other.columns;
        if period != default.period {
            self.columns.period = period;
        }
        if category != default.category {
            self.columns.category = category;
        }
        if metric != default.metric {
            self.columns.metric = metric;
        }
        if value != default.value {
            self.columns.value = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub group: Option<String>,
    pub metrics: Vec<String>,
    pub category: Option<String>,
    pub y_from_zero: bool,
    pub show_legend: bool,
    pub export_width: u32,
    pub export_height: u32,
    pub period_range: PeriodRange,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            group: None,
            metrics: Vec::new(),
            category: None,
            y_from_zero: false,
            show_legend: true,
            export_width: 1024,
            export_height: 576,
            period_range: PeriodRange::default(),
        }
    }
}

impl ChartConfig {
    pub fn merge(&mut self, other: Self) {
        let default = ChartConfig::default();
        if other.group.is_some() {
            self.group = other.group;
        }
        if !other.metrics.is_empty() {
            self.metrics = other.metrics;
        }
        if other.category.is_some() {
            self.category = other.category;
        }
        if other.y_from_zero != default.y_from_zero {
            self.y_from_zero = other.y_from_zero;
        }
        if other.show_legend != default.show_legend {
            self.show_legend = other.show_legend;
        }
        if other.export_width != default.export_width {
            self.export_width = other.export_width;
        }
        if other.export_height != default.export_height {
            self.export_height = other.export_height;
        }
        if other.period_range.from.is_some() {
            self.period_range.from = other.period_range.from;
        }
        if other.period_range.to.is_some() {
            self.period_range.to = other.period_range.to;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub group: Option<String>,
    pub parent_column: String,
    pub child_column: String,
    pub column_field: String,
    pub value_column: String,
    pub empty_parents: EmptyParentPolicy,
    pub indent_width: usize,
    pub totals_label: String,
    pub decimals: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        let spec = TableSpec::default();
        Self {
            group: None,
            parent_column: spec.parent_column,
            child_column: spec.child_column,
            column_field: spec.column_field,
            value_column: spec.value_column,
            empty_parents: EmptyParentPolicy::default(),
            indent_width: 2,
            totals_label: "Total".to_string(),
            decimals: 2,
        }
    }
}

impl TableConfig {
    pub fn spec(&self) -> TableSpec {
        TableSpec {
            parent_column: self.parent_column.clone(),
            child_column: self.child_column.clone(),
            column_field: self.column_field.clone(),
            value_column: self.value_column.clone(),
        }
    }

    pub fn merge(&mut self, other: Self) {
        let default = TableConfig::default();
        if other.group.is_some() {
            self.group = other.group;
        }
        if other.parent_column != default.parent_column {
            self.parent_column = other.parent_column;
        }
        if other.child_column != default.child_column {
            self.child_column = other.child_column;
        }
        if other.column_field != default.column_field {
            self.column_field = other.column_field;
        }
        if other.value_column != default.value_column {
            self.value_column = other.value_column;
        }
        if other.empty_parents != default.empty_parents {
            self.empty_parents = other.empty_parents;
        }
        if other.indent_width != default.indent_width {
            self.indent_width = other.indent_width;
        }
        if other.totals_label != default.totals_label {
            self.totals_label = other.totals_label;
        }
        if other.decimals != default.decimals {
            self.decimals = other.decimals;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub colors: ColorConfig,
}

impl ThemeConfig {
    pub fn merge(&mut self, other: Self) {
        self.colors.merge(other.colors);
    }
}

/// Declares `ColorConfig` with one string field per theme color and its default,
/// plus the name/value listing that validation, merging and [`Theme`] iterate over.
macro_rules! color_config {
    ($($field:ident => $default:expr),+ $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct ColorConfig {
            $(pub $field: String,)+
        }

        impl Default for ColorConfig {
            fn default() -> Self {
                Self {
                    $($field: $default.to_string(),)+
                }
            }
        }

        impl ColorConfig {
            /// (name, configured value) for every color.
            pub fn entries(&self) -> Vec<(&'static str, &str)> {
                vec![$((stringify!($field), self.$field.as_str()),)+]
            }

            pub fn merge(&mut self, other: Self) {
                let default = ColorConfig::default();
                $(
                    if other.$field != default.$field {
                        self.$field = other.$field;
                    }
                )+
            }
        }
    };
}

color_config! {
    keybind_hints => "cyan",
    keybind_labels => "indexed(252)",
    controls_bg => "indexed(235)",
    text_primary => "default",
    text_secondary => "indexed(240)",
    dimmed => "dark_gray",
    success => "green",
    error => "red",
    warning => "yellow",
    table_header => "white",
    table_header_bg => "indexed(235)",
    table_selected => "reversed",
    parent_row => "bright_white",
    totals_row => "yellow",
    filter_checked => "green",
    sidebar_border => "indexed(240)",
    modal_border_active => "yellow",
    chart_axis => "indexed(245)",
    chart_series_color_1 => "cyan",
    chart_series_color_2 => "magenta",
    chart_series_color_3 => "green",
    chart_series_color_4 => "yellow",
    chart_series_color_5 => "blue",
    chart_series_color_6 => "red",
    chart_series_color_7 => "bright_cyan",
}

impl ColorConfig {
    fn validate(&self, parser: &ColorParser) -> Result<()> {
        for (name, value) in self.entries() {
            parser.parse(value).map_err(|e| {
                eyre!(
                    "theme.colors.{}: {}. Use a valid color name (e.g. red, cyan, bright_red), \
                     hex (#rrggbb), or indexed(0-255)",
                    name,
                    e
                )
            })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub event_poll_interval_ms: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            event_poll_interval_ms: 25,
        }
    }
}

impl PerformanceConfig {
    pub fn merge(&mut self, other: Self) {
        let default = PerformanceConfig::default();
        if other.event_poll_interval_ms != default.event_poll_interval_ms {
            self.event_poll_interval_ms = other.event_poll_interval_ms;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub enabled: bool,
    pub show_events: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            show_events: true,
        }
    }
}

impl DebugConfig {
    pub fn merge(&mut self, other: Self) {
        let default = DebugConfig::default();
        if other.enabled != default.enabled {
            self.enabled = other.enabled;
        }
        if other.show_events != default.show_events {
            self.show_events = other.show_events;
        }
    }
}

// Configuration loading and merging
impl AppConfig {
    /// Load configuration from all layers (default → user)
    pub fn load(app_name: &str) -> Result<Self> {
        let manager = ConfigManager::new(app_name)?;
        Self::load_from(&manager)
    }

    /// Defaults merged with `config.toml` under `manager`'s directory, if present.
    pub fn load_from(manager: &ConfigManager) -> Result<Self> {
        let config_path = manager.config_path(CONFIG_FILE_NAME);
        let mut config = AppConfig::default();
        if config_path.exists() {
            config.merge(Self::read_file(&config_path)?);
        }
        config.validate().map_err(|e| {
            eyre!(
                "Invalid configuration in {}: {}",
                config_path.display(),
                e
            )
        })?;
        Ok(config)
    }

    fn read_file(config_path: &Path) -> Result<AppConfig> {
        let content = std::fs::read_to_string(config_path).map_err(|e| {
            eyre!(
                "Failed to read config file at {}: {}",
                config_path.display(),
                e
            )
        })?;
        toml::from_str(&content).map_err(|e| {
            eyre!(
                "Failed to parse config file at {}: {}",
                config_path.display(),
                e
            )
        })
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: AppConfig) {
        if other.version != AppConfig::default().version {
            self.version = other.version;
        }
        self.source.merge(other.source);
        self.chart.merge(other.chart);
        self.table.merge(other.table);
        self.theme.merge(other.theme);
        self.performance.merge(other.performance);
        self.debug.merge(other.debug);
    }

    pub fn validate(&self) -> Result<()> {
        if !self.version.starts_with("0.1") {
            return Err(eyre!(
                "Unsupported config version: {}. Expected 0.1.x",
                self.version
            ));
        }
        if self.performance.event_poll_interval_ms == 0 {
            return Err(eyre!("event_poll_interval_ms must be greater than 0"));
        }
        if self.chart.export_width == 0 || self.chart.export_height == 0 {
            return Err(eyre!(
                "chart.export_width and chart.export_height must be greater than 0"
            ));
        }
        if self.table.indent_width > 8 {
            return Err(eyre!(
                "table.indent_width must be at most 8, got {}",
                self.table.indent_width
            ));
        }
        if self.table.decimals > 10 {
            return Err(eyre!(
                "table.decimals must be at most 10, got {}",
                self.table.decimals
            ));
        }
        let parser = ColorParser::new();
        self.theme.colors.validate(&parser)?;
        Ok(())
    }
}

/// Color parser with terminal capability detection
pub struct ColorParser {
    supports_true_color: bool,
    supports_256: bool,
    no_color: bool,
}

impl ColorParser {
    /// Create a new ColorParser with automatic terminal capability detection
    pub fn new() -> Self {
        let support = supports_color::on(Stream::Stdout);
        Self {
            supports_true_color: support.as_ref().map(|s| s.has_16m).unwrap_or(false),
            supports_256: support.as_ref().map(|s| s.has_256).unwrap_or(false),
            no_color: std::env::var("NO_COLOR").is_ok(),
        }
    }

    /// Parser for fixed capabilities, independent of the running terminal.
    pub fn with_capabilities(true_color: bool, colors_256: bool) -> Self {
        Self {
            supports_true_color: true_color,
            supports_256: colors_256,
            no_color: false,
        }
    }

    /// Parse a color string (hex, indexed or named) into a terminal color
    pub fn parse(&self, s: &str) -> Result<Color> {
        if self.no_color {
            return Ok(Color::Reset);
        }
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();

        if trimmed.starts_with('#') {
            let (r, g, b) = parse_hex(trimmed)?;
            return Ok(self.convert_rgb_to_terminal_color(r, g, b));
        }

        if let Some(inner) = lower
            .strip_prefix("indexed(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let num = inner.trim().parse::<u8>().map_err(|_| {
                eyre!(
                    "Invalid indexed color: '{}'. Expected format: indexed(0-255)",
                    trimmed
                )
            })?;
            return Ok(Color::Indexed(num));
        }

        let normalized = lower.replace(' ', "_");
        let color = match normalized.as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright_black" | "gray" | "grey" | "dark_gray" | "dark_grey" => Color::Indexed(8),
            "bright_red" => Color::Indexed(9),
            "bright_green" => Color::Indexed(10),
            "bright_yellow" => Color::Indexed(11),
            "bright_blue" => Color::Indexed(12),
            "bright_magenta" => Color::Indexed(13),
            "bright_cyan" => Color::Indexed(14),
            "bright_white" => Color::Indexed(15),
            "light_gray" | "light_grey" => Color::Indexed(7),
            // "reversed" is applied as a modifier at render time
            "reset" | "default" | "none" | "reversed" => Color::Reset,
            _ => {
                return Err(eyre!(
                    "Unknown color name: '{}'. Supported: basic ANSI colors (red, blue, etc.), \
                     bright variants (bright_red, etc.), or hex colors (#ff0000)",
                    trimmed
                ))
            }
        };
        Ok(color)
    }

    fn convert_rgb_to_terminal_color(&self, r: u8, g: u8, b: u8) -> Color {
        if self.supports_true_color {
            Color::Rgb(r, g, b)
        } else if self.supports_256 {
            Color::Indexed(rgb_to_256_color(r, g, b))
        } else {
            rgb_to_basic_ansi(r, g, b)
        }
    }
}

impl Default for ColorParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_hex(s: &str) -> Result<(u8, u8, u8)> {
    let digits = s
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.is_ascii())
        .ok_or_else(|| eyre!("Invalid hex color format: '{}'. Expected format: #rrggbb", s))?;
    let component = |range: std::ops::Range<usize>, name: &str| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| eyre!("Invalid {} component in hex color: {}", name, s))
    };
    Ok((
        component(0..2, "red")?,
        component(2..4, "green")?,
        component(4..6, "blue")?,
    ))
}

/// Nearest entry of the xterm 256-color palette: the grayscale ramp for
/// near-gray input, the 6x6x6 cube otherwise.
pub fn rgb_to_256_color(r: u8, g: u8, b: u8) -> u8 {
    let max_diff = r.max(g).max(b) as i16 - r.min(g).min(b) as i16;
    if max_diff < 10 {
        let gray = (r as u16 + g as u16 + b as u16) / 3;
        return if gray < 8 {
            16
        } else if gray > 247 {
            231
        } else {
            232 + ((gray - 8) * 24 / 240) as u8
        };
    }
    let scale = |c: u8| (c as u16 * 5 / 255) as u8;
    16 + 36 * scale(r) + 6 * scale(g) + scale(b)
}

/// Nearest of the 8 basic ANSI colors
pub fn rgb_to_basic_ansi(r: u8, g: u8, b: u8) -> Color {
    let max_diff = r.max(g).max(b) as i16 - r.min(g).min(b) as i16;
    if max_diff < 30 {
        let avg = (r as u16 + g as u16 + b as u16) / 3;
        return if avg < 64 { Color::Black } else { Color::White };
    }
    match (r > 128, g > 128, b > 128) {
        (false, false, false) => Color::Black,
        (true, false, false) => Color::Red,
        (false, true, false) => Color::Green,
        (true, true, false) => Color::Yellow,
        (false, false, true) => Color::Blue,
        (true, false, true) => Color::Magenta,
        (false, true, true) => Color::Cyan,
        (true, true, true) => Color::White,
    }
}

/// Theme containing parsed colors ready for use
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub colors: HashMap<String, Color>,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Result<Self> {
        Self::from_config_with(config, &ColorParser::new())
    }

    pub fn from_config_with(config: &ThemeConfig, parser: &ColorParser) -> Result<Self> {
        let mut colors = HashMap::new();
        for (name, value) in config.colors.entries() {
            colors.insert(name.to_string(), parser.parse(value)?);
        }
        Ok(Self { colors })
    }

    /// Get a color by name, returns Reset if not found
    pub fn get(&self, name: &str) -> Color {
        self.colors.get(name).copied().unwrap_or(Color::Reset)
    }

    /// Color of the n-th chart series, cycling through the configured palette.
    pub fn series_color(&self, index: usize) -> Color {
        self.get(&format!("chart_series_color_{}", index % 7 + 1))
    }
}
