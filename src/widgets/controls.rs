use crate::render::RenderContext;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph, Widget},
};

pub const CHART_CONTROLS: [(&str, &str); 6] = [
    ("Tab", "Table"),
    ("[ ]", "Group"),
    ("x", "Export"),
    ("r", "Reload"),
    ("?", "Help"),
    ("q", "Quit"),
];

pub const TABLE_CONTROLS: [(&str, &str); 8] = [
    ("Tab", "Chart"),
    ("Enter", "Expand"),
    ("e/E", "All"),
    ("f", "Filter"),
    ("c", "Clear"),
    ("r", "Reload"),
    ("?", "Help"),
    ("q", "Quit"),
];

pub const FILTER_CONTROLS: [(&str, &str); 4] = [
    ("Space", "Toggle"),
    ("c", "Clear"),
    ("Esc", "Back"),
    ("?", "Help"),
];

/// Key hints bar. Pairs that do not fit are dropped from the right; the busy
/// indicator slot keeps a fixed width so the layout never shifts.
pub struct Controls {
    pub controls: Vec<(&'static str, &'static str)>,
    pub summary: Option<String>,
    pub bg_color: Color,
    pub key_color: Color,
    pub label_color: Color,
    pub busy: bool,
}

impl Controls {
    pub fn from_context(controls: &[(&'static str, &'static str)], ctx: &RenderContext) -> Self {
        Self {
            controls: controls.to_vec(),
            summary: None,
            bg_color: ctx.controls_bg,
            key_color: ctx.keybind_hints,
            label_color: ctx.keybind_labels,
            busy: false,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

impl Widget for &Controls {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let no_bg = self.bg_color == Color::Reset;
        if !no_bg {
            Block::default()
                .style(Style::default().bg(self.bg_color))
                .render(area, buf);
        }

        const BUSY_WIDTH: u16 = 3;
        let summary_width = self
            .summary
            .as_ref()
            .map_or(0, |s| s.chars().count() as u16 + 1);
        let pair_width = |(key, action): &(&str, &str)| -> u16 {
            (key.chars().count() as u16 + 1) + (action.chars().count() as u16 + 1)
        };

        let mut available = area.width.saturating_sub(summary_width + BUSY_WIDTH);
        let n_show = self
            .controls
            .iter()
            .take_while(|pair| {
                let need = pair_width(*pair);
                if available >= need {
                    available -= need;
                    true
                } else {
                    false
                }
            })
            .count();

        let mut constraints: Vec<Constraint> = self
            .controls
            .iter()
            .take(n_show)
            .flat_map(|(key, action)| {
                [
                    Constraint::Length(key.chars().count() as u16 + 1),
                    Constraint::Length(action.chars().count() as u16 + 1),
                ]
            })
            .collect();
        constraints.push(Constraint::Fill(1));
        constraints.push(Constraint::Length(summary_width));
        constraints.push(Constraint::Length(BUSY_WIDTH));
        let layout = Layout::new(Direction::Horizontal, constraints).split(area);

        let base = if no_bg {
            Style::default()
        } else {
            Style::default().bg(self.bg_color)
        };
        let key_style = base.fg(self.key_color);
        let label_style = base.fg(self.label_color);

        for (i, (key, action)) in self.controls.iter().take(n_show).enumerate() {
            Paragraph::new(*key).style(key_style).render(layout[i * 2], buf);
            Paragraph::new(*action)
                .style(label_style)
                .render(layout[i * 2 + 1], buf);
        }

        let fill_idx = n_show * 2;
        if let Some(summary) = &self.summary {
            Paragraph::new(summary.as_str())
                .style(label_style)
                .right_aligned()
                .render(layout[fill_idx + 1], buf);
        }
        let busy = if self.busy { "…" } else { " " };
        Paragraph::new(busy)
            .style(key_style)
            .centered()
            .render(layout[fill_idx + 2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls(pairs: &[(&'static str, &'static str)]) -> Controls {
        Controls {
            controls: pairs.to_vec(),
            summary: Some("3 rows".into()),
            bg_color: Color::Reset,
            key_color: Color::Cyan,
            label_color: Color::White,
            busy: false,
        }
    }

    fn line(buf: &Buffer, width: u16) -> String {
        (0..width).map(|x| buf[(x, 0)].symbol()).collect()
    }

    #[test]
    fn shows_pairs_and_summary() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        (&controls(&TABLE_CONTROLS)).render(area, &mut buf);
        let text = line(&buf, 80);
        assert!(text.starts_with("Tab Chart Enter Expand"));
        assert!(text.contains("3 rows"));
    }

    #[test]
    fn drops_pairs_that_do_not_fit() {
        let area = Rect::new(0, 0, 24, 1);
        let mut buf = Buffer::empty(area);
        (&controls(&CHART_CONTROLS)).render(area, &mut buf);
        let text = line(&buf, 24);
        assert!(text.starts_with("Tab Table"));
        assert!(!text.contains("Quit"));
    }
}
