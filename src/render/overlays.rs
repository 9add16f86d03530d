//! Overlay rendering (help, error).

use crate::render::context::RenderContext;
use crate::render::layout::centered_rect;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Widget;
use ratatui::style::Style;
use ratatui::widgets::{
    Block, BorderType, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState, StatefulWidget, Wrap,
};

/// Renders the help overlay. Clamps `scroll` to the last page so the caller can persist it.
pub fn render_help_overlay(
    area: Rect,
    buf: &mut Buffer,
    title: &str,
    text: &str,
    scroll: &mut usize,
    ctx: &RenderContext,
) {
    let popup_area = centered_rect(area, 80, 80);
    Clear.render(popup_area, buf);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ctx.modal_border_active));
    let inner = block.inner(popup_area);
    block.render(popup_area, buf);

    let total = text.lines().count();
    let height = inner.height as usize;
    let max_scroll = total.saturating_sub(height);
    *scroll = (*scroll).min(max_scroll);

    Paragraph::new(text)
        .style(Style::default().fg(ctx.text_primary))
        .scroll((*scroll as u16, 0))
        .render(inner, buf);

    if total > height {
        let mut state = ScrollbarState::new(max_scroll + 1).position(*scroll);
        Scrollbar::new(ScrollbarOrientation::VerticalRight).render(popup_area, buf, &mut state);
    }
}

/// Renders the error modal; any key dismisses it.
pub fn render_error_modal(area: Rect, buf: &mut Buffer, message: &str, ctx: &RenderContext) {
    let popup_area = centered_rect(area, 70, 40);
    Clear.render(popup_area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("Error")
        .border_style(Style::default().fg(ctx.error));
    let inner = block.inner(popup_area);
    block.render(popup_area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    Paragraph::new(message)
        .style(Style::default().fg(ctx.error))
        .wrap(Wrap { trim: true })
        .render(chunks[0], buf);
    Paragraph::new("Press any key")
        .style(Style::default().fg(ctx.dimmed))
        .centered()
        .render(chunks[1], buf);
}
