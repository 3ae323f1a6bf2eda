use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, ModalState};

pub(super) fn draw_modal(frame: &mut ratatui::Frame, modal: &ModalState) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 80);
    let h = area.height.saturating_sub(6).clamp(6, 18);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    let box_area = ratatui::layout::Rect {
        x,
        y,
        width: w,
        height: h,
    };

    frame.render_widget(ratatui::widgets::Clear, box_area);

    let title = Line::from(vec![
        Span::styled(modal.title.clone(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled("Esc", Style::default().fg(Color::Gray)),
    ]);
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(block.clone(), box_area);
    let inner = block.inner(box_area);

    let lines: Vec<Line> = modal.lines.iter().map(|s| Line::from(s.as_str())).collect();
    let scroll = modal.scroll.min(modal.lines.len().saturating_sub(1)) as u16;
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        inner,
    );
}

pub(super) fn handle_modal_key(app: &mut App, key: KeyEvent) {
    let Some(m) = app.modal.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.modal = None;
        }
        KeyCode::Up => {
            m.scroll = m.scroll.saturating_sub(1);
        }
        KeyCode::Down => {
            if m.scroll < m.lines.len().saturating_sub(1) {
                m.scroll += 1;
            }
        }
        KeyCode::PageUp => {
            m.scroll = m.scroll.saturating_sub(10);
        }
        KeyCode::PageDown => {
            m.scroll = (m.scroll + 10).min(m.lines.len().saturating_sub(1));
        }
        _ => {}
    }
}
