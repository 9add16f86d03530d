use crate::hierarchy::TableState;
use crate::render::RenderContext;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

/// Checklist of the group keys in the current table.
pub struct FilterList<'a> {
    state: &'a TableState,
    ctx: &'a RenderContext,
    cursor: usize,
    focused: bool,
}

impl<'a> FilterList<'a> {
    pub fn new(state: &'a TableState, ctx: &'a RenderContext) -> Self {
        Self {
            state,
            ctx,
            cursor: 0,
            focused: false,
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for FilterList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let shown = self.state.visible().len();
        let total = self.state.known().len();
        let border = if self.focused {
            self.ctx.modal_border_active
        } else {
            self.ctx.sidebar_border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Groups {}/{}", shown, total))
            .border_style(Style::default().fg(border));

        let items: Vec<ListItem> = self
            .state
            .known()
            .iter()
            .map(|key| {
                let (mark, style) = if self.state.is_visible(key) {
                    ("[x] ", Style::default().fg(self.ctx.filter_checked))
                } else {
                    ("[ ] ", Style::default().fg(self.ctx.dimmed))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, style),
                    Span::styled(key.as_str(), Style::default().fg(self.ctx.text_primary)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let selected = (self.focused && total > 0).then(|| self.cursor.min(total - 1));
        let mut list_state = ListState::default().with_selected(selected);
        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, Theme};
    use crate::hierarchy::{reduce, TableAction};

    #[test]
    fn marks_hidden_groups() {
        let ctx = RenderContext::from_theme_and_config(&Theme::default(), &AppConfig::default());
        let state = TableState::new(vec!["DE".into(), "FR".into()]);
        let state = reduce(&state, TableAction::ToggleVisibility("FR".into()));
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        FilterList::new(&state, &ctx).focused(true).render(area, &mut buf);
        let rows: Vec<String> = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect();
        assert!(rows[0].contains("Groups 1/2"));
        assert!(rows[1].contains("[x] DE"));
        assert!(rows[2].contains("[ ] FR"));
    }
}
