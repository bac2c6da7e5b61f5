use parcel_track::{ModalKind, ModalRegion};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::render::centered_rect;

const ERROR_MESSAGE: &str = "Could not complete the request. Please try again.";

/// Render the rename or delete dialog on top of the list.
pub fn render(frame: &mut Frame, area: Rect, app: &App, kind: ModalKind) {
    let region = app.page.modals.region(kind);
    let popup_area = centered_rect(50, 30, area);
    frame.render_widget(Clear, popup_area);

    let border_color = match kind {
        ModalKind::TitleInput => Color::Cyan,
        ModalKind::Delete => Color::Red,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", kind.title()));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .constraints([
            Constraint::Min(2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let label = region
        .package()
        .and_then(|id| app.page.list.row(id))
        .map(|row| row.label.as_str())
        .unwrap_or("this package");

    let body = match kind {
        ModalKind::TitleInput => vec![
            Line::from(format!(" New title for {label}:")),
            Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    format!("{}\u{2588}", region.input),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
        ],
        ModalKind::Delete => vec![Line::from(format!(
            " Stop tracking {label}? This cannot be undone."
        ))],
    };
    frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), chunks[0]);

    if region.error_visible {
        let error = Line::from(Span::styled(
            format!(" {ERROR_MESSAGE}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(error), chunks[1]);
    }

    frame.render_widget(Paragraph::new(footer(region, kind)), chunks[2]);
}

fn footer(region: &ModalRegion, kind: ModalKind) -> Line<'static> {
    let enabled = region.controls_enabled();
    let button_style = if enabled {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let confirm = match kind {
        ModalKind::TitleInput => "[Enter] Save",
        ModalKind::Delete => "[Enter] Delete",
    };

    let mut spans = vec![
        Span::styled(" [Esc] Cancel  ", button_style),
        Span::styled(confirm, button_style),
    ];
    if region.spinner.is_some() {
        spans.push(Span::styled(
            "  Loading...",
            Style::default().fg(Color::Blue),
        ));
    }
    Line::from(spans)
}
