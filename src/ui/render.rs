use crate::schema::FieldKind;
use crate::submission::SubmissionState;
use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{body_columns, layout_regions};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR, STATUS_OK,
    STATUS_WARN,
};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    let view = app.view();
    frame.render_widget(Header::new(app.endpoint(), &view.state).widget(), header);
    frame.render_widget(Clear, body);

    let (form_area, result_area) = body_columns(body);
    frame.render_widget(form_panel(app, form_area), form_area);
    frame.render_widget(result_panel(app), result_area);

    frame.render_widget(Footer::new(app.editor().is_editing()).widget(footer), footer);
}

fn panel_block(title: &'static str) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER))
}

fn form_panel<'a>(app: &'a App, area: Rect) -> Paragraph<'a> {
    let schema = app.schema();
    let values = &app.view().values;
    let editor = app.editor();
    let label_width = schema
        .fields()
        .iter()
        .map(|field| field.label.chars().count())
        .max()
        .unwrap_or(0);

    // Keep the focused row visible on short terminals
    let visible = area.height.saturating_sub(2) as usize;
    let skip = (editor.focused() + 1).saturating_sub(visible.max(1));

    let lines: Vec<Line> = schema
        .fields()
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(idx, field)| {
            let focused = idx == editor.focused();
            let marker = if focused { "› " } else { "  " };
            let label = format!("{}{:<width$}  ", marker, field.label, width = label_width);

            let value_span = match editor.buffer().filter(|_| focused) {
                Some(buffer) => Span::styled(
                    format!("{}▏", buffer),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ),
                None => {
                    let value = values.get(&field.name);
                    let text = value.map(|v| v.to_string()).unwrap_or_default();
                    let invalid = value.is_some_and(|v| !v.is_finite());
                    let color = if invalid {
                        STATUS_ERROR
                    } else if field.kind == FieldKind::Numeric {
                        HEADER_TEXT
                    } else {
                        MUTED_TEXT
                    };
                    Span::styled(text, Style::default().fg(color))
                }
            };

            let line = Line::from(vec![
                Span::styled(label, Style::default().fg(HEADER_TEXT)),
                value_span,
            ]);
            if focused {
                line.style(Style::default().bg(ACTIVE_HIGHLIGHT))
            } else {
                line
            }
        })
        .collect();

    Paragraph::new(lines).block(panel_block(" Customer "))
}

fn result_panel<'a>(app: &'a App) -> Paragraph<'a> {
    let state = &app.view().state;
    let mut lines = Vec::new();

    let button_style = if state.is_in_flight() {
        Style::default().fg(MUTED_TEXT).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(
        format!("[ {} ]", app.submit_label()),
        button_style,
    )));
    lines.push(Line::from(""));

    match state {
        SubmissionState::Idle => {
            lines.push(Line::from(Span::styled(
                "Press Ctrl+S to score the customer.",
                Style::default().fg(MUTED_TEXT),
            )));
        }
        SubmissionState::Submitting { .. } => {
            let frame = SPINNER_FRAMES[app.spinner_frame() % SPINNER_FRAMES.len()];
            lines.push(Line::from(Span::styled(
                format!("{} Waiting for the scoring service", frame),
                Style::default().fg(STATUS_WARN),
            )));
        }
        SubmissionState::Succeeded(result) => {
            lines.push(Line::from(vec![
                Span::styled("Outcome: ", Style::default().fg(HEADER_TEXT)),
                Span::styled(
                    result.prediction.label(),
                    Style::default().fg(STATUS_OK).add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(format!(
                "Probability yes: {:.3}",
                result.probability_yes
            )));
            lines.push(Line::from(format!(
                "Probability no:  {:.3}",
                result.probability_no
            )));
            if !result.is_consistent() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Probabilities do not sum to 1",
                    Style::default().fg(STATUS_WARN),
                )));
            }
        }
        SubmissionState::Failed(message) => {
            lines.push(Line::from(Span::styled(
                "Error",
                Style::default().fg(STATUS_ERROR).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                message.as_str(),
                Style::default().fg(STATUS_ERROR),
            )));
        }
    }

    if let Some(error) = app.edit_error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error,
            Style::default().fg(STATUS_ERROR),
        )));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel_block(" Prediction "))
}
