//! Dependency multi-select screen

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::cli::tui::init::state::WizardState;
use crate::cli::tui::init::theme::Theme;

/// Render the dependency list
pub fn render(frame: &mut Frame, area: Rect, state: &WizardState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),      // Project summary
            Constraint::Min(3),         // Option list
        ])
        .split(area);

    let summary = Line::from(vec![
        Span::raw("  "),
        Span::styled(state.spec.project_name.as_str(), theme.highlight),
        Span::styled(
            format!("  {}:{}", state.spec.group_id, state.spec.artifact_id),
            theme.muted,
        ),
    ]);
    frame.render_widget(Paragraph::new(summary), chunks[0]);

    let items: Vec<ListItem> = state
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let selected = state.is_selected(idx);
            let pointer = if idx == state.cursor { "›" } else { " " };
            let line = Line::from(vec![
                Span::styled(format!("{} ", pointer), theme.focused),
                Span::styled(
                    Theme::checkbox(selected),
                    if selected { theme.success } else { Style::default() },
                ),
                Span::raw(" "),
                Span::raw(option.name.as_str()),
                Span::styled(format!("  ({})", option.id), theme.muted),
            ]);
            ListItem::new(line)
        })
        .collect();

    let title = if state.selected_indices().is_empty() {
        " Dependencies ".to_string()
    } else {
        format!(" Dependencies ({} selected) ", state.selected_indices().len())
    };

    let list = List::new(items)
        .block(Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(theme.border(true)))
        .highlight_style(theme.selected);

    let mut list_state = ListState::default().with_selected(Some(state.cursor));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

pub fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    super::render_help_bar(
        frame,
        area,
        theme,
        &[("↑↓", "Move"), ("Space", "Toggle"), ("Enter", "Generate"), ("q", "Quit")],
    );
}
