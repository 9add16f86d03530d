use crate::config::{AppConfig, Theme};
use ratatui::style::Color;

/// Snapshot of theme colors and display configuration for rendering.
/// Passed to widgets to avoid threading many individual parameters.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub keybind_hints: Color,
    pub keybind_labels: Color,
    pub controls_bg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub dimmed: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub modal_border_active: Color,
    pub sidebar_border: Color,

    pub table_header: Color,
    pub table_header_bg: Color,
    pub parent_row: Color,
    pub totals_row: Color,
    pub filter_checked: Color,
    pub chart_axis: Color,
    pub series: Vec<Color>,

    pub indent_width: usize,
    pub decimals: usize,
    pub totals_label: String,
    pub show_legend: bool,
}

impl RenderContext {
    pub fn from_theme_and_config(theme: &Theme, config: &AppConfig) -> Self {
        Self {
            keybind_hints: theme.get("keybind_hints"),
            keybind_labels: theme.get("keybind_labels"),
            controls_bg: theme.get("controls_bg"),
            text_primary: theme.get("text_primary"),
            text_secondary: theme.get("text_secondary"),
            dimmed: theme.get("dimmed"),
            success: theme.get("success"),
            warning: theme.get("warning"),
            error: theme.get("error"),
            modal_border_active: theme.get("modal_border_active"),
            sidebar_border: theme.get("sidebar_border"),

            table_header: theme.get("table_header"),
            table_header_bg: theme.get("table_header_bg"),
            parent_row: theme.get("parent_row"),
            totals_row: theme.get("totals_row"),
            filter_checked: theme.get("filter_checked"),
            chart_axis: theme.get("chart_axis"),
            series: (0..7).map(|i| theme.series_color(i)).collect(),

            indent_width: config.table.indent_width,
            decimals: config.table.decimals,
            totals_label: config.table.totals_label.clone(),
            show_legend: config.chart.show_legend,
        }
    }

    pub fn series_color(&self, index: usize) -> Color {
        if self.series.is_empty() {
            return Color::Reset;
        }
        self.series[index % self.series.len()]
    }
}
