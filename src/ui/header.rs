use crate::submission::SubmissionState;
use crate::ui::theme::{
    GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_OK, STATUS_WARN,
};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header<'a> {
    endpoint: &'a str,
    state: &'a SubmissionState,
}

impl<'a> Header<'a> {
    pub fn new(endpoint: &'a str, state: &'a SubmissionState) -> Self {
        Self { endpoint, state }
    }

    pub fn widget(&self) -> Paragraph<'a> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let (status, color) = match self.state {
            SubmissionState::Idle => ("Ready", HEADER_TEXT),
            SubmissionState::Submitting { .. } => ("Scoring", STATUS_WARN),
            SubmissionState::Succeeded(_) => ("Scored", STATUS_OK),
            SubmissionState::Failed(_) => ("Failed", STATUS_ERROR),
        };

        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("●", Style::default().fg(color)),
            Span::styled("  ", text_style),
            Span::styled(
                "Bank Marketing Predictor",
                text_style.add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(status, Style::default().fg(color)),
            Span::styled("  │  ", separator_style),
            Span::styled(self.endpoint, text_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
