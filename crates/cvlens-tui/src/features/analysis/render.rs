//! Analysis feature view.

use cvlens_core::analysis::ScoreTier;
use cvlens_core::error::Severity;
use cvlens_core::service::AnalysisResult;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::{AnalysisPhase, AnalysisState};
use crate::common::{render_container, spinner};

fn tier_color(tier: ScoreTier) -> Color {
    match tier {
        ScoreTier::Strong => Color::Green,
        ScoreTier::Fair => Color::Yellow,
        ScoreTier::Weak => Color::Red,
    }
}

pub fn render_analysis(frame: &mut Frame, analysis: &AnalysisState, spinner_frame: usize, area: Rect) {
    let inner = render_container(frame, area, "Analysis", Color::Cyan);

    let lines = match &analysis.phase {
        AnalysisPhase::Idle => vec![Line::from(Span::styled(
            "Press a to analyze the selected resume.",
            Style::default().fg(Color::Gray),
        ))],
        AnalysisPhase::Validating => vec![busy_line(spinner_frame, "Checking session…")],
        AnalysisPhase::Submitting => vec![busy_line(spinner_frame, "Analyzing resume…")],
        AnalysisPhase::Failed(error) => {
            let color = match error.severity() {
                Severity::Warning => Color::Yellow,
                Severity::Error => Color::Red,
            };
            vec![Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(color),
            ))]
        }
        AnalysisPhase::Succeeded(result) => result_lines(result),
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn busy_line(spinner_frame: usize, label: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("{} {label}", spinner(spinner_frame)),
        Style::default().fg(Color::Yellow),
    ))
}

fn result_lines(result: &AnalysisResult) -> Vec<Line<'static>> {
    let tier = ScoreTier::of(result.score);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("ATS score ", bold),
            Span::styled(
                format!("{}/100", result.score),
                Style::default()
                    .fg(tier_color(tier))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  ({})", tier.label()), Style::default().fg(Color::Gray)),
            Span::raw("  "),
            if result.ready {
                Span::styled("✓ ATS ready", Style::default().fg(Color::Green))
            } else {
                Span::styled("✗ not ATS ready", Style::default().fg(Color::Red))
            },
        ]),
        Line::from(""),
    ];

    push_section(&mut lines, "Strengths", &result.strengths, "+ ");
    push_section(&mut lines, "Improvements", &result.improvements, "- ");
    if !result.skills.is_empty() {
        lines.push(Line::from(Span::styled("Skills", bold)));
        lines.push(Line::from(result.skills.join(", ")));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled("Experience", bold)));
    lines.push(Line::from(result.experience_summary.clone()));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Recommendation", bold)));
    lines.push(Line::from(result.recommendation.clone()));
    lines
}

fn push_section(lines: &mut Vec<Line<'static>>, title: &str, items: &[String], bullet: &str) {
    if items.is_empty() {
        return;
    }
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for item in items {
        lines.push(Line::from(format!("{bullet}{item}")));
    }
    lines.push(Line::from(""));
}
