//! Upload feature view: the drop zone and the file prompt.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::UploadState;
use crate::common::render_container;

pub fn render_upload(frame: &mut Frame, upload: &UploadState, locked: bool, area: Rect) {
    let border = if locked { Color::DarkGray } else { Color::Cyan };
    let inner = render_container(frame, area, "Resume", border);

    let mut lines = Vec::new();
    match upload.slot.pending() {
        Some(file) => {
            lines.push(Line::from(vec![
                Span::styled("📄 ", Style::default()),
                Span::styled(
                    file.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", file.display_size()),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Drop a PDF here, or press o to choose a file (PDF, max 10MB)",
                Style::default().fg(Color::Gray),
            )));
        }
    }

    if let Some(prompt) = &upload.prompt {
        lines.push(Line::from(vec![
            Span::styled("Path: ", Style::default().fg(Color::Cyan)),
            Span::raw(prompt.display()),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
