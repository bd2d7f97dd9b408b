// src/app.rs

use crate::core::models::{ScanConfig, ScanReport};
use crate::core::scanner::ScanProgress;
use crate::logging;
use ratatui::widgets::{ScrollbarState, TableState};
use std::path::PathBuf;

/// Frames of the scanning spinner shown while a scan is in flight.
pub const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Number of log lines tailed into the log panel.
const LOG_TAIL_LINES: usize = 200;

pub enum ExportStatus {
    Idle,
    Success(String),
    Error(String),
}

pub enum AppState {
    Idle,
    Scanning,
    Finished,
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    pub total_subdomains: usize,
    pub active_subdomains: usize,
    pub findings: usize,
    pub duration_secs: f64,
}

pub struct App {
    pub should_quit: bool,
    pub state: AppState,
    pub show_disclaimer: bool,
    pub input: String,
    // Scan options, toggled from the idle screen.
    pub check_active: bool,
    pub check_vulnerable: bool,
    pub verify_ssl: bool,
    pub scan_report: Option<ScanReport>,
    pub summary: ScanSummary,
    /// Most recent progress event while a scan runs.
    pub progress: Option<ScanProgress>,
    pub results_table_state: TableState,
    pub export_status: ExportStatus,
    pub spinner_frame: usize,
    pub show_logs: bool,
    pub log_content: Vec<String>,
    pub log_horizontal_scroll: usize,
    pub log_horizontal_scroll_state: ScrollbarState,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            state: AppState::Idle,
            show_disclaimer: true,
            input: String::new(),
            check_active: false,
            check_vulnerable: false,
            verify_ssl: true,
            scan_report: None,
            summary: ScanSummary::default(),
            progress: None,
            results_table_state: TableState::default(),
            export_status: ExportStatus::Idle,
            spinner_frame: 0,
            show_logs: false,
            log_content: Vec::new(),
            log_horizontal_scroll: 0,
            log_horizontal_scroll_state: ScrollbarState::default(),
        }
    }

    /// Builds the immutable configuration for the scan that is about to
    /// start. The custom wordlist path comes from the environment since the
    /// TUI has no file picker.
    pub fn build_config(&self, target_domain: String) -> ScanConfig {
        ScanConfig {
            target_domain,
            check_active: self.check_active,
            check_vulnerable: self.check_vulnerable,
            custom_wordlist: std::env::var_os("WAYBACK_WORDLIST").map(PathBuf::from),
            verify_ssl: self.verify_ssl,
            ..ScanConfig::default()
        }
    }

    /// Called on every loop iteration: advances the spinner and, when the
    /// log panel is open, refreshes the tailed log lines.
    pub fn on_tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        if self.show_logs {
            self.refresh_logs();
        }
    }

    /// Re-reads the tail of the tracing log file into the log panel buffer.
    pub fn refresh_logs(&mut self) {
        if let Ok(content) = std::fs::read_to_string(logging::get_log_path()) {
            let lines: Vec<&str> = content.lines().collect();
            let start = lines.len().saturating_sub(LOG_TAIL_LINES);
            self.log_content = lines[start..].iter().map(|l| l.to_string()).collect();
        }
    }

    pub fn update_summary(&mut self) {
        if let Some(report) = &self.scan_report {
            self.summary = ScanSummary {
                total_subdomains: report.subdomains.len(),
                active_subdomains: report.active_count(),
                findings: report.vulnerable_parameters.len(),
                duration_secs: report.duration_secs().unwrap_or_default(),
            };
        }
    }

    pub fn select_next(&mut self) {
        let len = self
            .scan_report
            .as_ref()
            .map(|r| r.subdomains.len())
            .unwrap_or(0);
        if len == 0 {
            return;
        }
        let next = match self.results_table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.results_table_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        let previous = match self.results_table_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.results_table_state.select(Some(previous));
    }

    pub fn scroll_log_left(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_sub(4);
        self.log_horizontal_scroll_state = self
            .log_horizontal_scroll_state
            .position(self.log_horizontal_scroll);
    }

    pub fn scroll_log_right(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_add(4);
        self.log_horizontal_scroll_state = self
            .log_horizontal_scroll_state
            .position(self.log_horizontal_scroll);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.input = String::new();
        self.scan_report = None;
        self.summary = ScanSummary::default();
        self.progress = None;
        self.results_table_state = TableState::default();
        self.export_status = ExportStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Subdomain;

    fn finished_app(hosts: &[&str]) -> App {
        let mut app = App::new();
        let mut report = ScanReport::new(ScanConfig::default());
        for host in hosts {
            report.subdomains.push(Subdomain::unchecked(*host));
        }
        app.scan_report = Some(report);
        app.state = AppState::Finished;
        app
    }

    #[test]
    fn selection_stays_within_bounds() {
        let mut app = finished_app(&["a.example.com", "b.example.com"]);
        app.select_next();
        assert_eq!(app.results_table_state.selected(), Some(0));
        app.select_next();
        app.select_next(); // already at the last row
        assert_eq!(app.results_table_state.selected(), Some(1));
        app.select_previous();
        assert_eq!(app.results_table_state.selected(), Some(0));
    }

    #[test]
    fn selection_on_empty_results_is_a_no_op() {
        let mut app = finished_app(&[]);
        app.select_next();
        assert_eq!(app.results_table_state.selected(), None);
    }

    #[test]
    fn reset_returns_to_a_clean_idle_state() {
        let mut app = finished_app(&["a.example.com"]);
        app.input = "example.com".to_string();
        app.reset();
        assert!(matches!(app.state, AppState::Idle));
        assert!(app.input.is_empty());
        assert!(app.scan_report.is_none());
    }

    #[test]
    fn config_carries_the_idle_screen_toggles() {
        let mut app = App::new();
        app.check_active = true;
        app.verify_ssl = false;
        let config = app.build_config("example.com".to_string());
        assert!(config.check_active);
        assert!(!config.check_vulnerable);
        assert!(!config.verify_ssl);
        assert_eq!(config.target_domain, "example.com");
    }
}
