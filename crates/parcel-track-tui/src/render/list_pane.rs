use parcel_track::{PackageRow, Section, SectionNode};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Packages ({}) ", app.page.list.rows().len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(prompt) = app.page.list.empty_prompt() {
        let line = Line::from(Span::styled(
            format!(" {prompt}"),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), inner);
        return;
    }

    let mut lines = Vec::new();
    let mut cursor_line = 0;
    for (index, row) in app.page.list.rows().iter().enumerate() {
        let selected = index == app.cursor;
        if selected {
            cursor_line = lines.len();
        }
        let section = app.page.accordion.section(row.id);
        lines.push(row_line(row, section, selected));
        if let Some(section) = section {
            section_lines(section, &mut lines);
        }
    }

    let scroll = scroll_offset(cursor_line, inner.height);
    let paragraph = Paragraph::new(lines).scroll((scroll, 0));
    frame.render_widget(paragraph, inner);
}

/// Vertical offset that keeps the selected row inside the viewport.
fn scroll_offset(cursor_line: usize, height: u16) -> u16 {
    if height == 0 {
        return 0;
    }
    let offset = cursor_line.saturating_sub(usize::from(height) - 1);
    u16::try_from(offset).unwrap_or(u16::MAX)
}

fn row_line<'a>(row: &'a PackageRow, section: Option<&Section>, selected: bool) -> Line<'a> {
    let marker = if section.is_some_and(Section::is_expanded) {
        "\u{25be}" // ▾
    } else {
        "\u{25b8}" // ▸
    };

    let label_style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::raw(format!(" {marker} ")),
        Span::styled(row.label.as_str(), label_style),
    ];
    if let Some(number) = &row.tracking_number {
        spans.push(Span::styled(
            format!("  {number}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn section_lines<'a>(section: &'a Section, lines: &mut Vec<Line<'a>>) {
    for node in &section.body {
        match node {
            SectionNode::Spinner(_) => lines.push(Line::from(Span::styled(
                "     Loading...",
                Style::default().fg(Color::Blue),
            ))),
            SectionNode::Records(records) => {
                for record in records {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("     {}", record.date),
                            Style::default().add_modifier(Modifier::ITALIC),
                        ),
                        Span::raw("  "),
                        Span::styled(
                            format!("[{}]", record.time),
                            Style::default().fg(Color::Blue),
                        ),
                        Span::raw("  "),
                        Span::raw(record.data.as_str()),
                    ]));
                }
            }
            SectionNode::Placeholder(text) => lines.push(Line::from(Span::styled(
                format!("     {text}"),
                Style::default().fg(Color::DarkGray),
            ))),
            SectionNode::Failure(text) => lines.push(Line::from(Span::styled(
                format!("     {text}"),
                Style::default().fg(Color::Red),
            ))),
        }
    }
}
