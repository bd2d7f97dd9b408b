// src/ui/widgets/footer.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Renders the footer widget, which displays the actions available in the
/// current state.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let spans = if app.show_disclaimer {
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("Enter", Style::new().bold().fg(Color::Yellow)),
            Span::raw(" to acknowledge."),
        ])
    } else {
        match app.state {
            // While the user is typing a target.
            AppState::Idle => Line::from(vec![
                Span::styled("Enter", Style::new().bold().fg(Color::Yellow)),
                Span::raw(" scan  "),
                Span::styled("^A", Style::new().bold().fg(Color::Yellow)),
                Span::raw(" active-check  "),
                Span::styled("^V", Style::new().bold().fg(Color::Yellow)),
                Span::raw(" param-check  "),
                Span::styled("^S", Style::new().bold().fg(Color::Yellow)),
                Span::raw(" ssl-verify  "),
                Span::styled("^L", Style::new().bold().fg(Color::Yellow)),
                Span::raw(" logs  "),
                Span::styled("Esc", Style::new().bold().fg(Color::Yellow)),
                Span::raw(" quit"),
            ]),
            // While the report is displayed.
            AppState::Finished => Line::from(vec![
                Span::styled("[N]", Style::new().bold().fg(Color::Yellow)),
                Span::raw("ew scan  "),
                Span::styled("[E]", Style::new().bold().fg(Color::Yellow)),
                Span::raw("xport  "),
                Span::styled("[L]", Style::new().bold().fg(Color::Yellow)),
                Span::raw("ogs  "),
                Span::styled("↑ ↓", Style::new().bold().fg(Color::Yellow)),
                Span::raw(" navigate  "),
                Span::styled("[Q]", Style::new().bold().fg(Color::Yellow)),
                Span::raw("uit"),
            ]),
            // During the scan.
            AppState::Scanning => Line::from("Scanning... Press Q to quit."),
        }
    };

    let footer = Paragraph::new(spans).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
