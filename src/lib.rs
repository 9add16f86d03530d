use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use tracing::{debug, info, warn};

use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Tabs};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

pub mod cache;
pub mod chart_data;
pub mod chart_export;
pub mod cli;
pub mod config;
pub mod error_display;
pub mod help_strings;
pub mod hierarchy;
pub mod logging;
pub mod period;
pub mod render;
pub mod reshape;
pub mod source;
pub mod widgets;

pub use cache::CacheManager;
pub use chart_data::LineChartData;
pub use chart_export::ChartExportFormat;
pub use cli::Args;
pub use config::{
    rgb_to_256_color, rgb_to_basic_ansi, AppConfig, ColorParser, ConfigManager, Theme,
};
pub use hierarchy::{EmptyParentPolicy, RowKey, TableAction, TableModel, TableRender, TableState};
pub use source::Dataset;

use chart_export::{default_export_path, write_chart, ChartExportOptions};
use error_display::user_message_from_report;
use hierarchy::{plan, reduce};
use render::overlays::{render_error_modal, render_help_overlay};
use render::{app_layout, table_with_sidebar, RenderContext};
use reshape::{extract_series, MetricSet, ReshapeOptions};
use widgets::chart::LineChart;
use widgets::controls::{Controls, CHART_CONTROLS, FILTER_CONTROLS, TABLE_CONTROLS};
use widgets::debug::DebugState;
use widgets::filter_list::FilterList;
use widgets::hier_table::HierTable;

/// Application name used for cache directory and other app-specific paths
pub const APP_NAME: &str = "dashui";

const FILTER_SIDEBAR_WIDTH: u16 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Chart,
    Table,
}

/// Which pane of the table view receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFocus {
    Rows,
    Filter,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Show the loading status, then load on the next turn of the loop.
    Open(PathBuf),
    DoLoad(PathBuf),
    Table(TableAction),
    SelectChartGroup(usize),
    ExportChart(ChartExportFormat),
    DoExportChart(PathBuf, ChartExportFormat),
    Resize(u16, u16),
    Exit,
    Crash(String),
}

pub struct App {
    path: Option<PathBuf>,
    dataset: Option<Dataset>,
    events: Sender<AppEvent>,
    config: AppConfig,
    ctx: RenderContext,
    view: View,
    focus: TableFocus,
    chart_groups: Vec<String>,
    chart_group: usize,
    chart: LineChartData,
    table_group: Option<String>,
    table: TableModel,
    table_state: TableState,
    table_render: TableRender,
    cursor: usize,
    filter_cursor: usize,
    status: Option<String>,
    error: Option<String>,
    show_help: bool,
    help_scroll: usize,
    busy: bool,
    debug: DebugState,
}

impl App {
    pub fn new(events: Sender<AppEvent>) -> App {
        let config = AppConfig::default();
        let theme = Theme::from_config(&config.theme).unwrap_or_else(|e| {
            warn!(error = %e, "failed to build default theme; using fallback colors");
            Theme::default()
        });
        Self::new_with_config(events, theme, config)
    }

    pub fn new_with_config(events: Sender<AppEvent>, theme: Theme, config: AppConfig) -> App {
        let ctx = RenderContext::from_theme_and_config(&theme, &config);
        let debug = DebugState {
            enabled: config.debug.enabled,
            show_events: config.debug.show_events,
            ..DebugState::default()
        };
        App {
            path: None,
            dataset: None,
            events,
            config,
            ctx,
            view: View::Chart,
            focus: TableFocus::Rows,
            chart_groups: Vec::new(),
            chart_group: 0,
            chart: LineChartData::default(),
            table_group: None,
            table: TableModel::default(),
            table_state: TableState::default(),
            table_render: TableRender::default(),
            cursor: 0,
            filter_cursor: 0,
            status: None,
            error: None,
            show_help: false,
            help_scroll: 0,
            busy: false,
            debug,
        }
    }

    pub fn send_event(&mut self, event: AppEvent) -> Result<()> {
        self.events.send(event)?;
        Ok(())
    }

    pub fn enable_debug(&mut self) {
        self.debug.enabled = true;
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn focus(&self) -> TableFocus {
        self.focus
    }

    pub fn chart_groups(&self) -> &[String] {
        &self.chart_groups
    }

    pub fn chart_group(&self) -> Option<&str> {
        self.chart_groups.get(self.chart_group).map(String::as_str)
    }

    pub fn chart_data(&self) -> &LineChartData {
        &self.chart
    }

    pub fn table_group(&self) -> Option<&str> {
        self.table_group.as_deref()
    }

    pub fn table_model(&self) -> &TableModel {
        &self.table
    }

    pub fn table_state(&self) -> &TableState {
        &self.table_state
    }

    pub fn table_render(&self) -> &TableRender {
        &self.table_render
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn filter_cursor(&self) -> usize {
        self.filter_cursor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    /// Read the dataset, pick the chart and table groups and rebuild both views.
    /// Returns the group keys of the new table.
    fn load(&mut self, path: &Path) -> Result<Vec<String>> {
        let dataset = Dataset::from_path(path)?;
        info!(path = %path.display(), groups = dataset.group_names().len(), "dataset loaded");

        let metric_column = &self.config.source.columns.metric;
        let mut chart_groups: Vec<String> = dataset
            .group_names()
            .into_iter()
            .filter(|g| {
                dataset
                    .rows(g)
                    .is_some_and(|rows| rows.iter().any(|r| r.contains(metric_column)))
            })
            .collect();
        let configured = self.config.chart.group.clone();
        if let Some(group) = &configured {
            if !chart_groups.contains(group) {
                warn!(group = %group, "configured chart group has no metric rows");
                chart_groups.insert(0, group.clone());
            }
        }
        // Keep the current selection across reloads when the group still exists.
        let previous = self.chart_group().map(str::to_string);
        let position = |group: &String| chart_groups.iter().position(|c| c == group);
        self.chart_group = previous
            .as_ref()
            .and_then(position)
            .or_else(|| configured.as_ref().and_then(position))
            .unwrap_or(0);
        self.chart_groups = chart_groups;

        self.table_group = self.config.table.group.clone().or_else(|| {
            dataset
                .first_group_with_column(&self.config.table.parent_column)
                .map(str::to_string)
        });
        self.table = match &self.table_group {
            Some(group) => match dataset.rows(group) {
                Some(rows) => TableModel::from_rows(rows, &self.config.table.spec()),
                None => {
                    warn!(group = %group, "table group missing or has no rows array");
                    TableModel::default()
                }
            },
            None => TableModel::default(),
        };

        self.dataset = Some(dataset);
        self.path = Some(path.to_path_buf());
        self.rebuild_chart();
        Ok(self.table.known_group_keys())
    }

    fn rebuild_chart(&mut self) {
        let (Some(dataset), Some(group)) = (&self.dataset, self.chart_groups.get(self.chart_group))
        else {
            self.chart = LineChartData::default();
            return;
        };
        let options = ReshapeOptions {
            columns: self.config.source.columns.clone(),
            metrics: MetricSet::from_names(self.config.chart.metrics.clone()),
            range: self.config.chart.period_range.clone(),
            category: self.config.chart.category.clone(),
        };
        let rows = extract_series(dataset, group, &options);
        self.chart = LineChartData::from_rows(&rows, &self.config.chart.metrics);
    }

    fn apply_table_action(&mut self, action: TableAction) {
        self.debug.last_action = format!("{:?}", action);
        let anchor = self
            .table_render
            .line(self.cursor)
            .map(|line| line.key.clone());
        self.table_state = reduce(&self.table_state, action);
        self.replan();
        if let Some(pos) = anchor.and_then(|key| self.table_render.position(&key)) {
            self.cursor = pos;
        }
    }

    fn replan(&mut self) {
        self.table_render = plan(
            &self.table.rows,
            &self.table_state,
            self.config.table.empty_parents,
        );
        self.cursor = self
            .cursor
            .min(self.table_render.lines.len().saturating_sub(1));
        self.filter_cursor = self
            .filter_cursor
            .min(self.table_state.known().len().saturating_sub(1));
        self.debug.table_summary = format!(
            "lines={} visible={}/{}",
            self.table_render.lines.len(),
            self.table_state.visible().len(),
            self.table_state.known().len()
        );
    }

    fn export_path(&self, format: ChartExportFormat) -> Option<PathBuf> {
        let group = self.chart_group()?;
        let dir = self
            .path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        Some(default_export_path(dir, group, format))
    }

    fn key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        self.debug.on_key(event);
        if event.kind != KeyEventKind::Press {
            return None;
        }

        if self.error.is_some() {
            self.error = None;
            return None;
        }

        if self.show_help {
            match event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) => {
                    self.show_help = false;
                    self.help_scroll = 0;
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.help_scroll = self.help_scroll.saturating_add(1);
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.help_scroll = self.help_scroll.saturating_sub(1);
                }
                KeyCode::PageDown => {
                    self.help_scroll = self.help_scroll.saturating_add(10);
                }
                KeyCode::PageUp => {
                    self.help_scroll = self.help_scroll.saturating_sub(10);
                }
                KeyCode::Home => {
                    self.help_scroll = 0;
                }
                _ => {}
            }
            return None;
        }

        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppEvent::Exit)
            }
            KeyCode::Char('q') => Some(AppEvent::Exit),
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = true;
                None
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.view = match self.view {
                    View::Chart => View::Table,
                    View::Table => View::Chart,
                };
                self.focus = TableFocus::Rows;
                self.debug.last_action = format!("View({:?})", self.view);
                None
            }
            KeyCode::Char('r') => self.path.clone().map(AppEvent::Open),
            _ => match self.view {
                View::Chart => self.chart_key(event),
                View::Table => match self.focus {
                    TableFocus::Rows => self.table_key(event),
                    TableFocus::Filter => self.filter_key(event),
                },
            },
        }
    }

    fn chart_key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        let n = self.chart_groups.len();
        match event.code {
            KeyCode::Char(']') | KeyCode::Right if n > 0 => {
                Some(AppEvent::SelectChartGroup((self.chart_group + 1) % n))
            }
            KeyCode::Char('[') | KeyCode::Left if n > 0 => {
                Some(AppEvent::SelectChartGroup((self.chart_group + n - 1) % n))
            }
            KeyCode::Char('x') => Some(AppEvent::ExportChart(ChartExportFormat::Png)),
            KeyCode::Char('X') => Some(AppEvent::ExportChart(ChartExportFormat::Svg)),
            KeyCode::Esc => Some(AppEvent::Exit),
            _ => None,
        }
    }

    fn table_key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        let last = self.table_render.lines.len().saturating_sub(1);
        match event.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(last);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.cursor = 0;
                None
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = last;
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let line = self.table_render.line(self.cursor)?;
                line.is_parent()
                    .then(|| AppEvent::Table(TableAction::ToggleExpansion(line.key.clone())))
            }
            KeyCode::Char('e') => Some(AppEvent::Table(TableAction::ExpandAll(
                self.table.parent_keys(),
            ))),
            KeyCode::Char('E') => Some(AppEvent::Table(TableAction::CollapseAll)),
            KeyCode::Char('c') => Some(AppEvent::Table(TableAction::ClearFilters)),
            KeyCode::Char('f') => {
                if !self.table_state.known().is_empty() {
                    self.focus = TableFocus::Filter;
                }
                None
            }
            KeyCode::Esc => Some(AppEvent::Exit),
            _ => None,
        }
    }

    fn filter_key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        let last = self.table_state.known().len().saturating_sub(1);
        match event.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.filter_cursor = (self.filter_cursor + 1).min(last);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.filter_cursor = self.filter_cursor.saturating_sub(1);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self
                .table_state
                .known()
                .get(self.filter_cursor)
                .map(|key| AppEvent::Table(TableAction::ToggleVisibility(key.clone()))),
            KeyCode::Char('c') => Some(AppEvent::Table(TableAction::ClearFilters)),
            KeyCode::Char('f') | KeyCode::Esc => {
                self.focus = TableFocus::Rows;
                None
            }
            _ => None,
        }
    }

    pub fn event(&mut self, event: &AppEvent) -> Option<AppEvent> {
        self.debug.num_events += 1;
        match event {
            AppEvent::Key(key) => self.key(key),
            AppEvent::Open(path) => {
                self.busy = true;
                self.status = Some(format!("Loading {}", path.display()));
                // Return DoLoad so the status renders before the blocking read
                Some(AppEvent::DoLoad(path.clone()))
            }
            AppEvent::DoLoad(path) => {
                self.busy = false;
                match self.load(path) {
                    Ok(known) => {
                        self.status = Some(format!("Loaded {}", path.display()));
                        let group = self.chart_group;
                        if let Err(e) = self.send_event(AppEvent::SelectChartGroup(group)) {
                            warn!(error = %e, "event channel closed");
                        }
                        Some(AppEvent::Table(TableAction::DataChanged(known)))
                    }
                    Err(e) => {
                        let msg = user_message_from_report(&e, Some(path.as_path()));
                        warn!(path = %path.display(), error = %e, "load failed");
                        if self.dataset.is_none() {
                            return Some(AppEvent::Crash(msg));
                        }
                        // A failed reload keeps the data already on screen
                        self.status = None;
                        self.error = Some(msg);
                        None
                    }
                }
            }
            AppEvent::Table(action) => {
                if matches!(action, TableAction::DataChanged(_)) {
                    self.cursor = 0;
                    self.filter_cursor = 0;
                }
                self.apply_table_action(action.clone());
                None
            }
            AppEvent::SelectChartGroup(index) => {
                if !self.chart_groups.is_empty() {
                    self.chart_group = index % self.chart_groups.len();
                    self.debug.last_action = format!("SelectChartGroup({})", self.chart_group);
                    self.rebuild_chart();
                }
                None
            }
            AppEvent::ExportChart(format) => {
                if self.chart.is_empty() {
                    self.status = Some("No data to export".to_string());
                    return None;
                }
                let path = self.export_path(*format)?;
                self.busy = true;
                self.status = Some(format!("Exporting {}", path.display()));
                Some(AppEvent::DoExportChart(path, *format))
            }
            AppEvent::DoExportChart(path, format) => {
                self.busy = false;
                let options = ChartExportOptions {
                    title: self.chart_group().map(str::to_string),
                    y_label: self.config.source.columns.value.clone(),
                    y_from_zero: self.config.chart.y_from_zero,
                };
                let size = (self.config.chart.export_width, self.config.chart.export_height);
                match write_chart(path, *format, &self.chart, &options, size) {
                    Ok(()) => {
                        info!(path = %path.display(), format = format.as_str(), "chart exported");
                        self.status = Some(format!("Chart written to {}", path.display()));
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "chart export failed");
                        self.status = None;
                        self.error = Some(user_message_from_report(&e, None));
                    }
                }
                None
            }
            AppEvent::Resize(cols, rows) => {
                debug!(cols, rows, "resize");
                None
            }
            AppEvent::Exit | AppEvent::Crash(_) => None,
        }
    }

    fn controls(&self) -> Controls {
        let controls = match self.view {
            View::Chart => {
                let summary = match self.chart_group() {
                    Some(group) => format!(
                        "{} ({}/{})",
                        group,
                        self.chart_group + 1,
                        self.chart_groups.len()
                    ),
                    None => String::new(),
                };
                Controls::from_context(&CHART_CONTROLS, &self.ctx).with_summary(summary)
            }
            View::Table => {
                let pairs: &[(&'static str, &'static str)] = match self.focus {
                    TableFocus::Rows => &TABLE_CONTROLS,
                    TableFocus::Filter => &FILTER_CONTROLS,
                };
                Controls::from_context(pairs, &self.ctx)
                    .with_summary(format!("{} rows", self.table_render.lines.len()))
            }
        };
        controls.with_busy(self.busy)
    }

    fn help(&self) -> (&'static str, &'static str) {
        match (self.view, self.focus) {
            (View::Chart, _) => ("Chart Help", help_strings::chart()),
            (View::Table, TableFocus::Rows) => ("Table Help", help_strings::table()),
            (View::Table, TableFocus::Filter) => ("Filter Help", help_strings::filter()),
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.debug.num_frames += 1;
        let layout = app_layout(area, self.debug.enabled);

        let selected = match self.view {
            View::Chart => 0,
            View::Table => 1,
        };
        Tabs::new(vec!["Chart", "Table"])
            .select(selected)
            .style(Style::default().fg(self.ctx.text_secondary))
            .highlight_style(
                Style::default()
                    .fg(self.ctx.keybind_hints)
                    .add_modifier(Modifier::BOLD),
            )
            .render(layout.tabs, buf);

        match self.view {
            View::Chart => {
                let title = self
                    .chart_group()
                    .map(|g| format!(" {} ", g))
                    .unwrap_or_default();
                LineChart::new(&self.chart, &self.ctx)
                    .title(&title)
                    .y_from_zero(self.config.chart.y_from_zero)
                    .render(layout.main_view, buf);
            }
            View::Table => {
                let show_filter = !self.table_state.known().is_empty();
                let (table_area, sidebar) = if show_filter {
                    table_with_sidebar(layout.main_view, FILTER_SIDEBAR_WIDTH)
                } else {
                    (layout.main_view, Rect::default())
                };
                let title = self
                    .table_group
                    .as_deref()
                    .map(|g| format!(" {} ", g))
                    .unwrap_or_default();
                let cursor = (!self.table_render.lines.is_empty()).then_some(self.cursor);
                HierTable::new(&self.table_render, &self.table.columns, &self.ctx)
                    .cursor(cursor)
                    .focused(self.focus == TableFocus::Rows)
                    .title(&title)
                    .render(table_area, buf);
                if show_filter {
                    FilterList::new(&self.table_state, &self.ctx)
                        .cursor(self.filter_cursor)
                        .focused(self.focus == TableFocus::Filter)
                        .render(sidebar, buf);
                }
            }
        }

        if let Some(status) = &self.status {
            Paragraph::new(Line::from(status.as_str()))
                .style(Style::default().fg(self.ctx.text_secondary))
                .render(layout.status, buf);
        }

        (&self.controls()).render(layout.control_bar, buf);
        if let Some(debug_area) = layout.debug {
            (&self.debug).render(debug_area, buf);
        }

        if self.show_help {
            let (title, text) = self.help();
            render_help_overlay(area, buf, title, text, &mut self.help_scroll, &self.ctx);
        }
        if let Some(message) = &self.error {
            render_error_modal(area, buf, message, &self.ctx);
        }
    }
}
