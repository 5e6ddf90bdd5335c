//! Generation progress screen

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::cli::tui::init::state::WizardState;
use crate::cli::tui::init::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, state: &WizardState, theme: &Theme) {
    let main_block = Block::default()
        .title(format!(" Generating {}... ", state.spec.project_name))
        .borders(Borders::ALL);

    let inner = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Spacing
            Constraint::Length(1),      // Overall progress
            Constraint::Length(1),      // Spacing
            Constraint::Length(1),      // Current stage
            Constraint::Length(1),      // Dependencies
            Constraint::Min(0),
        ])
        .split(inner);

    let percent = (state.progress.clamp(0.0, 1.0) * 100.0).round() as u16;
    let gauge = Gauge::default()
        .percent(percent)
        .label(format!("{}%", percent))
        .gauge_style(theme.gauge);
    frame.render_widget(gauge, chunks[1]);

    let stage_text = state
        .stage
        .map(|stage| stage.describe())
        .unwrap_or_else(|| "Preparing request...".to_string());
    let stage_line = Line::from(vec![
        Span::styled(format!(" {} ", Theme::spinner(state.tick_count)), theme.focused),
        Span::raw(stage_text),
        Span::styled(format!("  {}ms", state.elapsed_ms()), theme.muted),
    ]);
    frame.render_widget(Paragraph::new(stage_line), chunks[3]);

    let dependencies = if state.spec.dependencies.is_empty() {
        "none".to_string()
    } else {
        state.spec.dependencies.join(", ")
    };
    let dependency_line = Line::from(vec![
        Span::styled("   Dependencies: ", theme.muted),
        Span::raw(dependencies),
    ]);
    frame.render_widget(Paragraph::new(dependency_line), chunks[4]);
}

pub fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    super::render_help_bar(frame, area, theme, &[("q/Esc", "Cancel and exit")]);
}
