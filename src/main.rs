// src/main.rs

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

mod app;
mod core;
mod export;
mod logging;
mod ui;

use app::{App, AppState, ExportStatus};
use crate::core::domain::clean_domain;
use crate::core::models::ScanReport;
use crate::core::scanner::{self, ScanProgress};

/// Messages sent from the background scan task to the UI loop.
enum ScanEvent {
    Progress(ScanProgress),
    Completed(Box<ScanReport>),
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::initialize_logging()?;

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut app = App::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(&mut app, &tx)?;
        }
        app.on_tick();

        while let Ok(event) = rx.try_recv() {
            match event {
                ScanEvent::Progress(progress) => app.progress = Some(progress),
                ScanEvent::Completed(report) => {
                    app.scan_report = Some(*report);
                    app.state = AppState::Finished;
                    app.update_summary();
                }
            }
        }
    }

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

/// Single event handler keeping the input logic in one place.
fn handle_events(app: &mut App, tx: &mpsc::UnboundedSender<ScanEvent>) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            if app.show_disclaimer {
                handle_disclaimer_input(app, key.code);
                return Ok(());
            }
            match app.state {
                AppState::Idle => handle_idle_input(app, key, tx),
                AppState::Finished => handle_finished_input(app, key.code),
                AppState::Scanning => {
                    if key.code == KeyCode::Char('q') {
                        app.quit();
                    }
                }
            }
        }
    }
    Ok(())
}

/// The disclaimer popup blocks everything until acknowledged.
fn handle_disclaimer_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Enter => app.show_disclaimer = false,
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

/// Handles input while the app is waiting for a target (Idle).
fn handle_idle_input(app: &mut App, key: KeyEvent, tx: &mpsc::UnboundedSender<ScanEvent>) {
    // Ctrl-combinations toggle the scan options; plain characters feed the
    // target input box.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('a') => app.check_active = !app.check_active,
            KeyCode::Char('v') => app.check_vulnerable = !app.check_vulnerable,
            KeyCode::Char('s') => app.verify_ssl = !app.verify_ssl,
            KeyCode::Char('l') => app.show_logs = !app.show_logs,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Enter => {
            if app.input.is_empty() {
                return;
            }
            let target_domain = clean_domain(&app.input);
            if target_domain.is_empty() {
                return;
            }

            app.state = AppState::Scanning;
            app.progress = None;
            let config = app.build_config(target_domain);

            let progress_tx = tx.clone();
            let observer: scanner::ProgressObserver = Arc::new(move |progress| {
                let _ = progress_tx.send(ScanEvent::Progress(progress));
            });

            let result_tx = tx.clone();
            tokio::spawn(async move {
                let report = scanner::run_full_scan(config, Some(observer)).await;
                let _ = result_tx.send(ScanEvent::Completed(Box::new(report)));
            });
        }
        _ => {}
    }
}

/// Handles input while the report is displayed (Finished).
fn handle_finished_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('n') => app.reset(),
        KeyCode::Char('l') => app.show_logs = !app.show_logs,
        KeyCode::Char('e') => {
            if let Some(report) = &app.scan_report {
                app.export_status = match export::export_report(report) {
                    Ok(path) => ExportStatus::Success(path.display().to_string()),
                    Err(e) => ExportStatus::Error(e.to_string()),
                };
            }
        }
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        KeyCode::Left => app.scroll_log_left(),
        KeyCode::Right => app.scroll_log_right(),
        _ => {}
    }
}
