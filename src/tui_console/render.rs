use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::capability::Severity;
use crate::console::SlotOrigin;

use super::app::App;
use super::modal;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let slots_height = (app.slots.len() as u16).saturating_add(2);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(slots_height),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_slots(frame, app, parts[0]);
    draw_output(frame, app, parts[1]);
    draw_input_line(frame, app, parts[2]);

    if let Some(m) = &app.modal {
        modal::draw_modal(frame, m);
    }
}

fn draw_slots(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let lines: Vec<Line> = app
        .slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let marker = if i == app.selected { "▸" } else { " " };
            let mut spans = vec![
                Span::styled(
                    format!("{marker} {} ", i + 1),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(slot.text.clone()),
            ];
            if slot.origin == SlotOrigin::AutoFilled {
                spans.push(Span::styled(
                    "  (auto)",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let line = Line::from(spans);
            if i == app.selected {
                line.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Commands")),
        area,
    );
}

fn draw_output(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(toast) = &app.toast {
        lines.push(Line::from(Span::styled(
            format!(" {} ", toast.title),
            Style::default()
                .fg(Color::Black)
                .bg(severity_color(toast.severity)),
        )));
    }

    let visible = area.height.saturating_sub(2) as usize;
    let budget = visible.saturating_sub(lines.len());
    let start = app.log.len().saturating_sub(budget);
    for entry in &app.log[start..] {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", entry.at),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("{:<5} ", entry.severity.as_str()),
                Style::default().fg(severity_color(entry.severity)),
            ),
            Span::raw(entry.line.clone()),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Output")),
        area,
    );
}

fn draw_input_line(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    match &app.editing {
        Some(input) => {
            frame.render_widget(
                Paragraph::new(input.buf.as_str()).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("Edit slot {}  Enter save · Esc cancel", app.selected + 1)),
                ),
                area,
            );
            let x = input.buf[..input.cursor].chars().count() as u16;
            frame.set_cursor_position((area.x + 1 + x, area.y + 1));
        }
        None => {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "Enter run · e edit · ↑/↓ select · q quit",
                    Style::default().fg(Color::DarkGray),
                )))
                .block(Block::default().borders(Borders::ALL)),
                area,
            );
        }
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Error => Color::Red,
    }
}
