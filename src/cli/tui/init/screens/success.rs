//! Success summary screen

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::cli::tui::init::state::WizardState;
use crate::cli::tui::init::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, state: &WizardState, theme: &Theme) {
    // Main container with success styling
    let main_block = Block::default()
        .title(" ✅ Project created ")
        .borders(Borders::ALL)
        .border_style(theme.success);

    let inner = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),      // Success message
            Constraint::Length(7),      // Summary table
            Constraint::Min(0),
        ])
        .split(inner);

    let message = Line::from(vec![
        Span::raw("  Project "),
        Span::styled(state.spec.project_name.as_str(), theme.highlight),
        Span::raw(" is ready."),
    ]);
    frame.render_widget(Paragraph::new(message), chunks[0]);

    render_summary_table(frame, chunks[1], state, theme);
}

fn render_summary_table(frame: &mut Frame, area: Rect, state: &WizardState, theme: &Theme) {
    let (location, contents) = match &state.generated {
        Some(project) => (
            project.destination.display().to_string(),
            format!(
                "{} directories, {} files ({} bytes)",
                project.summary.directories, project.summary.files, project.summary.bytes_written
            ),
        ),
        None => (String::new(), String::new()),
    };

    let dependencies = if state.spec.dependencies.is_empty() {
        "none".to_string()
    } else {
        state.spec.dependencies.join(", ")
    };

    let rows = vec![
        Row::new(vec![
            Cell::from("Coordinates"),
            Cell::from(format!("{}:{}", state.spec.group_id, state.spec.artifact_id)),
        ]),
        Row::new(vec![Cell::from("Dependencies"), Cell::from(dependencies)]),
        Row::new(vec![
            Cell::from("Location"),
            Cell::from(location).style(theme.highlight),
        ]),
        Row::new(vec![Cell::from("Contents"), Cell::from(contents)]),
    ];

    let table = Table::new(rows, vec![Constraint::Length(14), Constraint::Min(20)])
        .block(
            Block::default()
                .title(" Summary ")
                .borders(Borders::ALL)
                .border_style(Style::default()),
        )
        .column_spacing(3);

    frame.render_widget(table, area);
}

pub fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    super::render_help_bar(frame, area, theme, &[("Enter/q", "Exit")]);
}
