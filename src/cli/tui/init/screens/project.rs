//! Project name, group and artifact form

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::cli::tui::init::state::{FormField, WizardState};
use crate::cli::tui::init::theme::Theme;

/// Render the project form
pub fn render(frame: &mut Frame, area: Rect, state: &WizardState, theme: &Theme) {
    let main_block = Block::default()
        .title(" New Spring Boot project ")
        .borders(Borders::ALL);

    let inner = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Spacing
            Constraint::Length(3),      // Project name
            Constraint::Length(3),      // Group id
            Constraint::Length(3),      // Artifact id
            Constraint::Length(1),      // Spacing
            Constraint::Min(1),         // Hint or validation message
        ])
        .split(inner);

    for (field, chunk) in FormField::ALL.iter().zip(&chunks[1..4]) {
        render_field(frame, *chunk, state, *field, theme);
    }

    let message = match &state.form.validation_error {
        Some(error) => Line::from(Span::styled(format!("  ✗ {}", error), theme.error)),
        None => Line::from(Span::styled(
            "  Leave the artifact id empty to derive it from the project name",
            theme.muted,
        )),
    };
    frame.render_widget(Paragraph::new(message), chunks[5]);
}

fn render_field(frame: &mut Frame, area: Rect, state: &WizardState, field: FormField, theme: &Theme) {
    let input = state.form.input(field);
    let focused = state.form.focused == field;

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(theme.border(focused));

    // Keep the cursor visible when the value is wider than the box
    let width = area.width.saturating_sub(2) as usize;
    let scroll = input.visual_scroll(width.saturating_sub(1));

    let paragraph = Paragraph::new(input.value())
        .style(if focused { theme.focused } else { ratatui::style::Style::default() })
        .scroll((0, scroll as u16))
        .block(block);
    frame.render_widget(paragraph, area);

    if focused {
        let x = input.visual_cursor().saturating_sub(scroll) as u16;
        frame.set_cursor_position(Position::new(area.x + 1 + x, area.y + 1));
    }
}

pub fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    super::render_help_bar(
        frame,
        area,
        theme,
        &[("Tab/↑↓", "Switch field"), ("Enter", "Continue"), ("Esc", "Exit")],
    );
}
