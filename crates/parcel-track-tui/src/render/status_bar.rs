use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(msg) = &app.status_message {
        let style = if msg.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        Line::from(Span::styled(format!(" {}", msg.text), style))
    } else if app.page.modals.visible().is_some() {
        let hint_style = Style::default().fg(Color::DarkGray);
        Line::from(vec![
            Span::styled(" \u{23ce}", hint_style), // ⏎ Enter symbol
            Span::styled(" confirm  ", hint_style),
            Span::styled("Esc", hint_style),
            Span::styled(" cancel", hint_style),
        ])
    } else {
        let hint_style = Style::default().fg(Color::DarkGray);
        Line::from(vec![
            Span::styled(" \u{2191}\u{2193}", hint_style),
            Span::styled(" navigate  ", hint_style),
            Span::styled("\u{23ce}", hint_style),
            Span::styled(" history  ", hint_style),
            Span::styled("r", hint_style),
            Span::styled(" rename  ", hint_style),
            Span::styled("d", hint_style),
            Span::styled(" delete  ", hint_style),
            Span::styled("q", hint_style),
            Span::styled(" quit", hint_style),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);
}
