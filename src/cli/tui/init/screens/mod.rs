/// Screen modules for the init wizard
pub mod project;
pub mod dependencies;
pub mod generating;
pub mod success;
pub mod failure;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::cli::tui::init::state::{Step, WizardState};
use crate::cli::tui::init::theme::Theme;

/// Draw whichever screen the state calls for
///
/// Rendering only reads the state; every change goes through the app's
/// event handling.
pub fn render(frame: &mut Frame, state: &WizardState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Step breadcrumb
            Constraint::Min(0),         // Screen body
            Constraint::Length(1),      // Help bar
        ])
        .split(frame.area());

    render_breadcrumb(frame, chunks[0], state, theme);

    if state.is_failed() {
        failure::render(frame, chunks[1], state, theme);
        failure::render_help(frame, chunks[2], theme);
        return;
    }

    match state.step {
        Step::NameInput => {
            project::render(frame, chunks[1], state, theme);
            project::render_help(frame, chunks[2], theme);
        }
        Step::DependencySelect => {
            dependencies::render(frame, chunks[1], state, theme);
            dependencies::render_help(frame, chunks[2], theme);
        }
        Step::Generating => {
            generating::render(frame, chunks[1], state, theme);
            generating::render_help(frame, chunks[2], theme);
        }
        Step::Done => {
            success::render(frame, chunks[1], state, theme);
            success::render_help(frame, chunks[2], theme);
        }
    }
}

fn render_breadcrumb(frame: &mut Frame, area: Rect, state: &WizardState, theme: &Theme) {
    let steps = [Step::NameInput, Step::DependencySelect, Step::Generating, Step::Done];

    let mut spans = vec![Span::styled(" Spring Initializr ", theme.highlight)];
    for step in steps {
        spans.push(Span::styled(" › ", theme.muted));
        spans.push(Span::styled(step.name(), theme.step_style(step, state.step)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render a help bar from key hints
pub(crate) fn render_help_bar(frame: &mut Frame, area: Rect, theme: &Theme, hints: &[(&str, &str)]) {
    let help = Paragraph::new(Line::from(theme.help_spans(hints)))
        .style(theme.help_bar);
    frame.render_widget(help, area);
}
