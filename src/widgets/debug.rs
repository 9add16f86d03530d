use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Paragraph, Widget},
};

#[derive(Default)]
pub struct DebugState {
    pub enabled: bool,
    pub show_events: bool,
    pub num_events: usize,
    pub num_frames: usize,
    pub num_key_events: usize,
    pub last_key_event_name: String,
    /// Last table action or view change, e.g. "ToggleExpansion(EU)".
    pub last_action: String,
    /// Render lines and visible/known groups at the last frame.
    pub table_summary: String,
}

impl DebugState {
    pub fn on_key(&mut self, event: &crossterm::event::KeyEvent) {
        self.num_key_events += 1;
        self.last_key_event_name = format!("{:?}", event.code);
    }
}

impl Widget for &DebugState {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = if self.show_events {
            format!(
                "events={} keys={} last_key={} frames={} last_action={} table={}",
                self.num_events,
                self.num_key_events,
                self.last_key_event_name,
                self.num_frames,
                self.last_action,
                self.table_summary
            )
        } else {
            format!(
                "last_action={} table={}",
                self.last_action, self.table_summary
            )
        };
        Paragraph::new(text).render(area, buf);
    }
}
