//! Auth feature view: credential forms, success screen, restoration notice.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::{AuthState, FormField, ViewState};
use crate::common::{TextField, centered_area, render_container, spinner};

const FORM_WIDTH: u16 = 56;
const FORM_HEIGHT: u16 = 13;

/// Renders every non-dashboard view.
pub fn render_auth(frame: &mut Frame, auth: &AuthState, spinner_frame: usize, area: Rect) {
    let popup = centered_area(area, FORM_WIDTH, FORM_HEIGHT);

    if auth.restoring {
        let inner = render_container(frame, popup, "cvlens", Color::Cyan);
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{} Restoring session…", spinner(spinner_frame)),
                Style::default().fg(Color::Yellow),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    }

    match &auth.view {
        ViewState::LoggingIn | ViewState::Registering => {
            let title = if auth.view == ViewState::LoggingIn {
                "Log in"
            } else {
                "Create account"
            };
            let inner = render_container(frame, popup, title, Color::Cyan);
            let lines = form_lines(auth, spinner_frame);
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
        }
        ViewState::SuccessTransition { message } => {
            let inner = render_container(frame, popup, "Welcome", Color::Green);
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    message.clone(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    spinner(spinner_frame),
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), inner);
        }
        ViewState::Dashboard => {}
    }
}

fn form_lines(auth: &AuthState, spinner_frame: usize) -> Vec<Line<'static>> {
    let form = &auth.form;
    let mut lines = vec![
        Line::from(""),
        field_line("Email   ", &form.email, form.focus == FormField::Email),
        Line::from(""),
        field_line("Password", &form.password, form.focus == FormField::Password),
        Line::from(""),
    ];

    if auth.submitting {
        lines.push(Line::from(Span::styled(
            format!("{} Submitting…", spinner(spinner_frame)),
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(error) = &auth.error {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(""));
    }

    let toggle_hint = if auth.view == ViewState::LoggingIn {
        "Ctrl+R register"
    } else {
        "Ctrl+R log in"
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Tab switch field · Enter submit · {toggle_hint} · Esc quit"),
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn field_line(label: &str, field: &TextField, focused: bool) -> Line<'static> {
    let marker = if focused { "› " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if focused { "▏" } else { "" };

    Line::from(vec![
        Span::styled(format!("{marker}{label} "), label_style),
        Span::raw(field.display()),
        Span::styled(cursor.to_string(), Style::default().fg(Color::Cyan)),
    ])
}
