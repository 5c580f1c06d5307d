//! UI rendering for the inspector.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, List, ListItem},
    style::{Color, Style, Modifier},
};
use crate::control::ControlSignals;
use crate::trace::TraceEntry;
use super::app::InspectorApp;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &InspectorApp) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(frame.area());

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(chunks[0]);

    draw_listing(frame, left_chunks[0], app);
    draw_status(frame, left_chunks[1], app);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(14),
            Constraint::Length(5),
            Constraint::Length(4),
        ])
        .split(chunks[1]);

    draw_signals(frame, right_chunks[0], app.current());
    draw_fields(frame, right_chunks[1], app.current());
    draw_help(frame, right_chunks[2]);
}

/// Draw the program listing.
fn draw_listing(frame: &mut Frame, area: Rect, app: &InspectorApp) {
    let rows = (area.height as usize).saturating_sub(2);
    let start = app.scroll_offset(rows);

    let items: Vec<ListItem> = app
        .entries
        .iter()
        .enumerate()
        .skip(start)
        .take(rows)
        .map(|(i, entry)| {
            let is_selected = i == app.selected;
            let prefix = if is_selected { "▶ " } else { "  " };
            let text = format!(
                "{}{:04x}: {:08x}  {}",
                prefix,
                entry.address,
                entry.word,
                entry.mnemonic()
            );

            let style = if entry.is_fault() {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            let style = if is_selected {
                style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                style
            };

            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(" Program ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));

    frame.render_widget(list, area);
}

/// Draw the control-signal panel, or the fault for the selection.
fn draw_signals(frame: &mut Frame, area: Rect, entry: Option<&TraceEntry>) {
    let content = match entry.map(|e| &e.outcome) {
        Some(Ok(signals)) => signal_lines(signals),
        Some(Err(e)) => vec![Line::from(Span::styled(
            format!("Decode fault: {}", e),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))],
        None => vec![Line::from("Empty program")],
    };

    let paragraph = Paragraph::new(content)
        .block(Block::default()
            .title(" Control Signals ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)));

    frame.render_widget(paragraph, area);
}

fn signal_lines(signals: &ControlSignals) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = signals
        .flags()
        .into_iter()
        .map(|(name, value)| {
            Line::from(vec![
                Span::raw(format!("{:<10}", name)),
                Span::styled(format!("{}", value as u8), bit_style(value)),
            ])
        })
        .collect();

    lines.push(Line::from(vec![
        Span::raw(format!("{:<10}", "ALUOp")),
        Span::styled(format!("{} ({:?})", signals.alu_op, signals.alu_op), Style::default().fg(Color::Yellow)),
    ]));
    lines.push(Line::from(vec![
        Span::raw(format!("{:<10}", "ALUCtrl")),
        Span::styled(format!("{}", signals.alu_control), Style::default().fg(Color::Yellow)),
    ]));
    lines
}

/// Draw the field breakdown of the selected word.
fn draw_fields(frame: &mut Frame, area: Rect, entry: Option<&TraceEntry>) {
    let content = match entry {
        Some(e) => vec![
            Line::from(format!("{:?}-type  word={:#010x}", e.instruction.format(), e.word)),
            Line::from(format!("{}", e.instruction)),
        ],
        None => Vec::new(),
    };

    let paragraph = Paragraph::new(content)
        .block(Block::default()
            .title(" Fields ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)));

    frame.render_widget(paragraph, area);
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &InspectorApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(" Status ")
            .borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("↑↓/jk: Select  g/G: First/Last"),
        Line::from("f: Next fault  q: Quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default()
        .title(" Help ")
        .borders(Borders::ALL));

    frame.render_widget(help, area);
}

/// Asserted signals in green, deasserted in gray.
fn bit_style(value: bool) -> Style {
    if value {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
