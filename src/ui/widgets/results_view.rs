// src/ui/widgets/results_view.rs

use crate::app::{App, AppState, SPINNER_CHARS};
use crate::core::models::Subdomain;
use crate::core::scanner::ScanProgress;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap},
};

/// Renders the main content area: a placeholder while idle, a spinner with
/// live progress while scanning, and the subdomain table plus the flagged
/// parameters once the scan has finished.
pub fn render_results_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Discovered Subdomains (navigate with ↑ ↓)");

    if !matches!(app.state, AppState::Finished) {
        let content = match app.state {
            AppState::Idle => Paragraph::new(
                "Enter a target domain above and press Enter.\nResults will appear here...",
            )
            .alignment(Alignment::Center),
            AppState::Scanning => {
                let spinner_char = SPINNER_CHARS[app.spinner_frame];
                Paragraph::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", spinner_char),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(progress_label(app.progress)),
                ]))
                .alignment(Alignment::Center)
            }
            _ => Paragraph::new(""),
        };
        frame.render_widget(content.block(main_block), area);
        return;
    }

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let Some(report) = &app.scan_report else {
        return;
    };

    if report.subdomains.is_empty() {
        let hints = Paragraph::new(
            "No subdomains were discovered.\n\n\
             Check that the domain name is correct, raise the timeout if the\n\
             upstream sources are slow, or disable TLS verification with ^S\n\
             if the target uses an invalid certificate.",
        )
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(hints, inner_area);
        return;
    }

    // Subdomain table on top, flagged parameters below.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Min(0)])
        .split(inner_area);

    let rows: Vec<Row> = report.subdomains.iter().map(subdomain_row).collect();
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(45),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Percentage(25),
        ],
    )
    .header(
        Row::new(["Subdomain", "Status", "Length", "Server"])
            .style(Style::default().bold().fg(Color::Magenta)),
    )
    .row_highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    frame.render_stateful_widget(table, chunks[0], &mut app.results_table_state);

    let findings_block = Block::default()
        .borders(Borders::TOP)
        .title("Flagged Parameters");
    if report.vulnerable_parameters.is_empty() {
        let placeholder = if report.config.check_vulnerable {
            "No flagged parameters were found."
        } else {
            "Parameter check disabled (^V on the start screen)."
        };
        frame.render_widget(
            Paragraph::new(placeholder)
                .block(findings_block)
                .alignment(Alignment::Center),
            chunks[1],
        );
    } else {
        let items: Vec<ListItem> = report
            .vulnerable_parameters
            .iter()
            .map(|finding| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<12}", finding.parameter),
                        Style::default().fg(Color::Red),
                    ),
                    Span::styled(finding.url.clone(), Style::default().fg(Color::Yellow)),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items).block(findings_block), chunks[1]);
    }
}

/// Renders one subdomain as a table row, coloring the status column the way
/// an operator would triage it.
fn subdomain_row(subdomain: &Subdomain) -> Row<'_> {
    let status_cell = match subdomain.status {
        Some(200) => Cell::from("200").style(Style::default().fg(Color::Green)),
        Some(status) if status >= 400 => {
            Cell::from(status.to_string()).style(Style::default().fg(Color::Yellow))
        }
        Some(status) => Cell::from(status.to_string()).style(Style::default().fg(Color::Blue)),
        None => Cell::from("N/A").style(Style::default().fg(Color::DarkGray)),
    };

    let length_cell = match subdomain.response_length {
        Some(length) => Cell::from(length.to_string()),
        None => Cell::from("N/A").style(Style::default().fg(Color::DarkGray)),
    };

    let server_cell = match &subdomain.server {
        Some(server) => Cell::from(server.clone()).style(Style::default().fg(Color::Magenta)),
        None => Cell::from("N/A").style(Style::default().fg(Color::DarkGray)),
    };

    Row::new(vec![
        Cell::from(subdomain.url.clone()).style(Style::default().fg(Color::Cyan)),
        status_cell,
        length_cell,
        server_cell,
    ])
}

/// Human-readable label for the most recent progress event.
fn progress_label(progress: Option<ScanProgress>) -> String {
    match progress {
        Some(ScanProgress::Fetching) | None => {
            "Fetching from crt.sh and the Wayback Machine...".to_string()
        }
        Some(ScanProgress::Probing { completed, total }) => {
            format!("Probing subdomains... {completed}/{total}")
        }
        Some(ScanProgress::Flagging { completed, total }) => {
            format!("Checking parameters... {completed}/{total}")
        }
    }
}
