//! Top-level view. Pure function of `AppState`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::auth::ViewState;
use crate::state::AppState;
use crate::{analysis, auth, upload};

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    if app.auth.restoring || app.auth.view != ViewState::Dashboard {
        auth::render_auth(frame, &app.auth, app.spinner_frame, area);
        return;
    }

    let upload_height = if app.upload.is_prompt_open() { 4 } else { 3 };
    let [header, upload_area, analysis_area, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(upload_height),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(area);

    let email = app
        .auth
        .session
        .user()
        .map_or("", |user| user.email.as_str());
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                " cvlens ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {email}"), Style::default().fg(Color::Gray)),
        ])),
        header,
    );

    upload::render_upload(frame, &app.upload, app.analysis.is_in_flight(), upload_area);
    analysis::render_analysis(frame, &app.analysis, app.spinner_frame, analysis_area);

    let hint = if app.upload.is_prompt_open() {
        " Enter load · Esc cancel"
    } else {
        " o open file · paste to drop · a analyze · c clear · l log out · q quit"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        footer,
    );
}
