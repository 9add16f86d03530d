use crate::hierarchy::{LineKind, RenderLine, TableRender};
use crate::render::RenderContext;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

const EXPANDED_MARKER: &str = "▾ ";
const COLLAPSED_MARKER: &str = "▸ ";
const NO_MARKER: &str = "  ";

pub fn format_value(v: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, v)
}

/// Label cell text: indentation, expansion marker, label.
pub fn line_label(line: &RenderLine, indent_width: usize) -> String {
    let marker = match line.kind {
        LineKind::Parent { expanded: true, .. } => EXPANDED_MARKER,
        LineKind::Parent {
            expanded: false, ..
        } => COLLAPSED_MARKER,
        LineKind::Leaf | LineKind::EmptyParent => NO_MARKER,
    };
    format!(
        "{}{}{}",
        " ".repeat(line.depth * indent_width),
        marker,
        line.label
    )
}

/// Draws a planned table: one row per render line, a totals footer, cursor highlight.
pub struct HierTable<'a> {
    render: &'a TableRender,
    columns: &'a [String],
    ctx: &'a RenderContext,
    cursor: Option<usize>,
    focused: bool,
    title: &'a str,
}

impl<'a> HierTable<'a> {
    pub fn new(render: &'a TableRender, columns: &'a [String], ctx: &'a RenderContext) -> Self {
        Self {
            render,
            columns,
            ctx,
            cursor: None,
            focused: true,
            title: "",
        }
    }

    pub fn cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    fn widths(&self) -> Vec<Constraint> {
        let decimals = self.ctx.decimals;
        let value_width = |header: &str, values: &mut dyn Iterator<Item = f64>| {
            values
                .map(|v| format_value(v, decimals).len())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0) as u16
        };

        let mut widths = vec![Constraint::Min(12)];
        for (i, header) in self.columns.iter().enumerate() {
            let mut values = self
                .render
                .lines
                .iter()
                .filter_map(|l| l.values.get(i).copied())
                .chain(self.render.totals.get(i).copied());
            widths.push(Constraint::Length(value_width(header, &mut values)));
        }
        let mut totals = self
            .render
            .lines
            .iter()
            .map(|l| l.total)
            .chain(std::iter::once(self.render.grand_total));
        widths.push(Constraint::Length(value_width("Total", &mut totals)));
        widths
    }

    fn value_cells(&self, values: &[f64], total: f64) -> Vec<Cell<'static>> {
        let decimals = self.ctx.decimals;
        (0..self.columns.len())
            .map(|i| values.get(i).copied().unwrap_or(0.0))
            .chain(std::iter::once(total))
            .map(|v| Cell::from(Line::from(format_value(v, decimals)).right_aligned()))
            .collect()
    }
}

impl Widget for HierTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused {
            self.ctx.modal_border_active
        } else {
            self.ctx.sidebar_border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title)
            .border_style(Style::default().fg(border));

        if self.render.lines.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new("No rows to show")
                .style(Style::default().fg(self.ctx.text_secondary))
                .centered()
                .render(inner, buf);
            return;
        }

        let header_style = Style::default()
            .fg(self.ctx.table_header)
            .bg(self.ctx.table_header_bg)
            .add_modifier(Modifier::BOLD);
        let header = Row::new(
            std::iter::once(Cell::from(""))
                .chain(
                    self.columns
                        .iter()
                        .map(|c| Cell::from(Line::from(c.clone()).right_aligned())),
                )
                .chain(std::iter::once(Cell::from(
                    Line::from("Total").right_aligned(),
                ))),
        )
        .style(header_style);

        let rows: Vec<Row> = self
            .render
            .lines
            .iter()
            .map(|line| {
                let style = match line.kind {
                    LineKind::Parent { .. } => Style::default().fg(self.ctx.parent_row),
                    LineKind::EmptyParent => Style::default().fg(self.ctx.dimmed),
                    LineKind::Leaf => Style::default().fg(self.ctx.text_primary),
                };
                let mut cells = vec![Cell::from(line_label(line, self.ctx.indent_width))];
                cells.extend(self.value_cells(&line.values, line.total));
                Row::new(cells).style(style)
            })
            .collect();

        let mut footer_cells = vec![Cell::from(self.ctx.totals_label.clone())];
        footer_cells.extend(self.value_cells(&self.render.totals, self.render.grand_total));
        let footer = Row::new(footer_cells).style(
            Style::default()
                .fg(self.ctx.totals_row)
                .add_modifier(Modifier::BOLD),
        );

        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::UNDERLINED)
        };
        let table = Table::new(rows, self.widths())
            .header(header)
            .footer(footer)
            .block(block)
            .column_spacing(2)
            .row_highlight_style(highlight);

        let mut state = TableState::default().with_selected(self.cursor);
        StatefulWidget::render(table, area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, Theme};
    use crate::hierarchy::{plan, reduce, EmptyParentPolicy, RowKey, TableAction, TableRow, TableState as HierState};

    fn ctx() -> RenderContext {
        RenderContext::from_theme_and_config(&Theme::default(), &AppConfig::default())
    }

    fn rendered(render: &TableRender, columns: &[String]) -> Vec<String> {
        let ctx = ctx();
        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);
        HierTable::new(render, columns, &ctx)
            .cursor(Some(0))
            .render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn labels_are_indented_with_markers() {
        let rows = vec![TableRow::parent(
            "EU",
            vec![0.0],
            vec![TableRow::leaf("DE", vec![1.0])],
        )];
        let state = HierState::new(vec!["DE".into()]);
        let collapsed = plan(&rows, &state, EmptyParentPolicy::Hide);
        assert_eq!(line_label(&collapsed.lines[0], 2), "▸ EU");

        let state = reduce(&state, TableAction::ToggleExpansion(RowKey::root("EU")));
        let expanded = plan(&rows, &state, EmptyParentPolicy::Hide);
        assert_eq!(line_label(&expanded.lines[0], 2), "▾ EU");
        assert_eq!(line_label(&expanded.lines[1], 2), "    DE");
    }

    #[test]
    fn renders_rows_and_totals_footer() {
        let rows = vec![
            TableRow::parent(
                "EU",
                vec![4.0, 6.0],
                vec![
                    TableRow::leaf("DE", vec![1.0, 2.0]),
                    TableRow::leaf("FR", vec![3.0, 4.0]),
                ],
            ),
            TableRow::leaf("US", vec![10.0, 0.0]),
        ];
        let state = HierState::new(vec!["DE".into(), "FR".into()]);
        let render = plan(&rows, &state, EmptyParentPolicy::Hide);
        let columns = vec!["2024 Q1".to_string(), "2024 Q2".to_string()];
        let lines = rendered(&render, &columns);
        let all = lines.join("\n");
        assert!(all.contains("2024 Q1"));
        assert!(all.contains("▸ EU"));
        assert!(all.contains("US"));
        let total_line = lines.iter().find(|l| l.contains("14.00")).unwrap();
        assert!(total_line.contains("Total"));
        assert!(total_line.contains("20.00"));
    }

    #[test]
    fn value_format() {
        assert_eq!(format_value(1.0 / 3.0, 2), "0.33");
        assert_eq!(format_value(5.0, 0), "5");
    }
}
