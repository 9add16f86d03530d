use crate::chart_data::{format_axis_label, LineChartData};
use crate::render::RenderContext;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Widget},
};

/// Line chart of one row group: one braille line per metric, periods on the x axis.
pub struct LineChart<'a> {
    data: &'a LineChartData,
    ctx: &'a RenderContext,
    title: &'a str,
    y_from_zero: bool,
}

impl<'a> LineChart<'a> {
    pub fn new(data: &'a LineChartData, ctx: &'a RenderContext) -> Self {
        Self {
            data,
            ctx,
            title: "",
            y_from_zero: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn y_from_zero(mut self, y_from_zero: bool) -> Self {
        self.y_from_zero = y_from_zero;
        self
    }

    /// Roughly one x label per 12 columns, at least two.
    fn max_x_labels(width: u16) -> usize {
        ((width / 12) as usize).max(2)
    }
}

impl Widget for LineChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title)
            .border_style(Style::default().fg(self.ctx.sidebar_border));

        if self.data.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new("No data points for this group")
                .style(Style::default().fg(self.ctx.text_secondary))
                .centered()
                .render(inner, buf);
            return;
        }

        let datasets: Vec<Dataset> = self
            .data
            .series
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.points.is_empty())
            .map(|(i, s)| {
                Dataset::default()
                    .name(s.name.as_str())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(self.ctx.series_color(i)))
                    .data(&s.points)
            })
            .collect();

        let bounds = self.data.bounds(self.y_from_zero);
        let label_style = Style::default().fg(self.ctx.text_primary);
        let x_labels: Vec<Span> = self
            .data
            .x_labels(Self::max_x_labels(area.width))
            .into_iter()
            .map(|l| Span::styled(l, label_style))
            .collect();
        let y_mid = (bounds.y_min + bounds.y_max) / 2.0;
        let y_labels: Vec<Span> = [bounds.y_min, y_mid, bounds.y_max]
            .into_iter()
            .map(|v| Span::styled(format_axis_label(v), label_style))
            .collect();

        let axis_style = Style::default().fg(self.ctx.chart_axis);
        let x_axis = Axis::default()
            .title("Period")
            .bounds([bounds.x_min, bounds.x_max])
            .style(axis_style)
            .labels(x_labels);
        let y_axis = Axis::default()
            .bounds([bounds.y_min, bounds.y_max])
            .style(axis_style)
            .labels(y_labels);

        let legend = self.ctx.show_legend.then_some(LegendPosition::TopRight);
        Chart::new(datasets)
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .legend_position(legend)
            .render(area, buf);
    }
}
