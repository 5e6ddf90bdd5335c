//! Pipeline failure screen

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::cli::tui::init::state::WizardState;
use crate::cli::tui::init::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, state: &WizardState, theme: &Theme) {
    let Some(error) = &state.last_error else {
        return;
    };

    let block = Block::default()
        .title(format!(" ✗ Generation failed ({}) ", error.kind().as_str()))
        .borders(Borders::ALL)
        .border_style(theme.error);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", error), theme.error)),
    ];

    // Underlying causes, outermost first
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        lines.push(Line::from(Span::styled(format!("    caused by: {}", cause), theme.muted)));
        source = cause.source();
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

pub fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    super::render_help_bar(frame, area, theme, &[("Any key", "Exit")]);
}
