#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dashui::{App, AppEvent};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use tempfile::TempDir;

pub const SAMPLE_DASHBOARD: &str = r#"{
  "pd_backtest": {
    "rows": [
      {"REPORT_DATE": "2024 Q1", "CATEGORY": "retail", "METRIC": "predicted", "VALUE": 0.021},
      {"REPORT_DATE": "2024 Q1", "CATEGORY": "retail", "METRIC": "observed", "VALUE": 0.018},
      {"REPORT_DATE": "2024 Q2", "CATEGORY": "retail", "METRIC": "predicted", "VALUE": 0.023},
      {"REPORT_DATE": "2024 Q2", "CATEGORY": "retail", "METRIC": "observed", "VALUE": 0.025},
      {"REPORT_DATE": "2024 Q3", "CATEGORY": "retail", "METRIC": "predicted", "VALUE": 0.022}
    ]
  },
  "lgd_backtest": {
    "rows": [
      {"REPORT-DATE": "2024 Q1", "CATEGORY": "corporate", "METRIC": "lgd", "VALUE": "0.45"},
      {"REPORT-DATE": "2024 Q2", "CATEGORY": "corporate", "METRIC": "lgd", "VALUE": "0.41"}
    ]
  },
  "exposure_by_region": {
    "rows": [
      {"REGION": "EU", "COUNTRY": "DE", "REPORT_DATE": "2024 Q1", "VALUE": 1},
      {"REGION": "EU", "COUNTRY": "DE", "REPORT_DATE": "2024 Q2", "VALUE": 2},
      {"REGION": "EU", "COUNTRY": "FR", "REPORT_DATE": "2024 Q1", "VALUE": 3},
      {"REGION": "EU", "COUNTRY": "FR", "REPORT_DATE": "2024 Q2", "VALUE": 4},
      {"REGION": "US", "REPORT_DATE": "2024 Q1", "VALUE": 10}
    ]
  },
  "broken": {"rows": "not an array"}
}"#;

/// Writes `content` as `dashboard.json` in a fresh temp dir.
pub fn write_dashboard(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dashboard.json");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

pub fn sample_dashboard() -> (TempDir, PathBuf) {
    write_dashboard(SAMPLE_DASHBOARD)
}

pub fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn char_key(c: char) -> AppEvent {
    key(KeyCode::Char(c))
}

/// Runs `event` and every follow-up it produces, returned or sent on the channel,
/// the way the main loop would. Returns the first `Exit` or `Crash` seen.
pub fn drive(app: &mut App, rx: &Receiver<AppEvent>, event: AppEvent) -> Option<AppEvent> {
    let mut pending = vec![event];
    while let Some(event) = pending.pop() {
        if matches!(event, AppEvent::Exit | AppEvent::Crash(_)) {
            return Some(event);
        }
        if let Some(next) = app.event(&event) {
            pending.push(next);
        }
        while let Ok(sent) = rx.try_recv() {
            pending.insert(0, sent);
        }
    }
    None
}

pub fn open(app: &mut App, rx: &Receiver<AppEvent>, path: &Path) -> Option<AppEvent> {
    drive(app, rx, AppEvent::Open(path.to_path_buf()))
}
