// src/ui/widgets/summary.rs

use crate::app::{App, AppState, ExportStatus};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Renders the summary widget.
///
/// While idle it shows the scan options and how to toggle them; once the
/// scan has finished it shows the high-level counts, the scan duration and
/// the export status.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title("Summary");
    frame.render_widget(summary_container, area);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(5), // Options / counts section
            Constraint::Length(2), // Spacer
            Constraint::Length(3), // Duration / export section
            Constraint::Min(0),
        ])
        .split(area);

    match app.state {
        AppState::Idle | AppState::Scanning => {
            let options_block = Block::default().title("SCAN OPTIONS".bold());
            let options_to_render = [
                ("Liveness probing  (^A)", app.check_active),
                ("Parameter check   (^V)", app.check_vulnerable),
                ("TLS verification  (^S)", app.verify_ssl),
            ];
            let mut option_lines = Vec::new();
            for (name, enabled) in options_to_render {
                let (icon, style) = if enabled {
                    ("✓", Style::default().fg(Color::Green))
                } else {
                    ("✗", Style::default().fg(Color::Red))
                };
                option_lines.push(Line::from(vec![
                    Span::styled(format!("{} ", icon), style),
                    Span::raw(name),
                ]));
            }
            frame.render_widget(
                Paragraph::new(option_lines).block(options_block),
                summary_chunks[0],
            );
        }
        AppState::Finished => {
            let counts_block = Block::default().title("RESULTS".bold());
            let counts_text = Text::from(vec![
                Line::from(vec![
                    Span::raw("Subdomains: "),
                    Span::styled(
                        app.summary.total_subdomains.to_string(),
                        Style::default().fg(Color::Cyan),
                    ),
                ]),
                Line::from(vec![
                    Span::raw("Active:     "),
                    Span::styled(
                        app.summary.active_subdomains.to_string(),
                        Style::default().fg(Color::Green),
                    ),
                ]),
                Line::from(vec![
                    Span::raw("Findings:   "),
                    Span::styled(
                        app.summary.findings.to_string(),
                        Style::default().fg(Color::Red),
                    ),
                ]),
            ]);
            frame.render_widget(
                Paragraph::new(counts_text).block(counts_block),
                summary_chunks[0],
            );

            let status_block = Block::default().title("SCAN".bold());
            let mut status_lines = vec![Line::from(format!(
                "Duration: {:.2}s",
                app.summary.duration_secs
            ))];
            match &app.export_status {
                ExportStatus::Idle => {}
                ExportStatus::Success(path) => status_lines.push(Line::from(Span::styled(
                    format!("Saved to {}", path),
                    Style::default().fg(Color::Green),
                ))),
                ExportStatus::Error(message) => status_lines.push(Line::from(Span::styled(
                    format!("Export failed: {}", message),
                    Style::default().fg(Color::Red),
                ))),
            }
            frame.render_widget(
                Paragraph::new(status_lines).block(status_block),
                summary_chunks[2],
            );
        }
    }
}
