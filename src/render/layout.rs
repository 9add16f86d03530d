use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Top-level layout: view tabs, main view, status line, control bar, optional debug row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub tabs: Rect,
    pub main_view: Rect,
    pub status: Rect,
    pub control_bar: Rect,
    pub debug: Option<Rect>,
}

pub fn app_layout(area: Rect, debug_enabled: bool) -> AppLayout {
    let mut constraints = vec![
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ];
    if debug_enabled {
        constraints.push(Constraint::Length(1));
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    AppLayout {
        tabs: layout[0],
        main_view: layout[1],
        status: layout[2],
        control_bar: layout[3],
        debug: debug_enabled.then(|| layout[4]),
    }
}

/// Table on the left, filter list sidebar on the right.
pub fn table_with_sidebar(area: Rect, sidebar_width: u16) -> (Rect, Rect) {
    let width = sidebar_width.min(area.width / 2);
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Length(width)])
        .split(area);
    (layout[0], layout[1])
}

/// Centered rect within `r` with given percentage width and height.
pub fn centered_rect(r: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_layout_minimal() {
        let layout = app_layout(Rect::new(0, 0, 100, 50), false);
        assert_eq!(layout.tabs.height, 1);
        assert_eq!(layout.main_view.y, 1);
        assert_eq!(layout.main_view.height, 47);
        assert_eq!(layout.status.y, 48);
        assert_eq!(layout.control_bar.y, 49);
        assert_eq!(layout.debug, None);
    }

    #[test]
    fn app_layout_with_debug() {
        let layout = app_layout(Rect::new(0, 0, 100, 50), true);
        assert_eq!(layout.main_view.height, 46);
        assert_eq!(layout.control_bar.y, 48);
        assert_eq!(layout.debug.map(|r| (r.y, r.height)), Some((49, 1)));
    }

    #[test]
    fn sidebar_never_takes_more_than_half() {
        let (table, sidebar) = table_with_sidebar(Rect::new(0, 0, 40, 10), 30);
        assert_eq!(sidebar.width, 20);
        assert_eq!(table.width, 20);
    }

    #[test]
    fn centered_rect_50_50() {
        let centered = centered_rect(Rect::new(0, 0, 100, 100), 50, 50);
        assert_eq!((centered.x, centered.y), (25, 25));
        assert_eq!((centered.width, centered.height), (50, 50));
    }
}
