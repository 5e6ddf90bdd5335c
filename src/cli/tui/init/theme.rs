use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::cli::tui::init::state::Step;

/// Spinner frames shown while the pipeline runs
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Consistent theme for the TUI
pub struct Theme {
    pub selected: Style,
    pub focused: Style,
    pub error: Style,
    pub success: Style,
    pub muted: Style,
    pub highlight: Style,
    pub key: Style,
    pub help_bar: Style,
    pub gauge: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            selected: Style::default()
                .bg(Color::Rgb(50, 50, 80))
                .add_modifier(Modifier::BOLD),
            focused: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            error: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            muted: Style::default()
                .fg(Color::DarkGray),
            highlight: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            key: Style::default()
                .fg(Color::Cyan),
            help_bar: Style::default()
                .bg(Color::DarkGray),
            gauge: Style::default()
                .fg(Color::Green)
                .bg(Color::Black),
        }
    }
}

impl Theme {
    /// Border style for a pane, highlighted when it has focus
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Blue)
        } else {
            Style::default()
        }
    }

    /// Get the spinner frame for a tick count
    pub fn spinner(tick_count: usize) -> &'static str {
        SPINNER[tick_count % SPINNER.len()]
    }

    /// Get the checkbox for a dependency row
    pub fn checkbox(selected: bool) -> &'static str {
        if selected {
            "[x]"
        } else {
            "[ ]"
        }
    }

    /// Breadcrumb style for a step relative to the current one
    pub fn step_style(&self, step: Step, current: Step) -> Style {
        if step == current {
            self.highlight
        } else if step < current {
            Style::default().fg(Color::Green)
        } else {
            self.muted
        }
    }

    /// Key hint spans for a help bar: `key` then its description
    pub fn help_spans<'a>(&self, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
        let mut spans = vec![Span::raw(" ")];
        for (idx, (key, action)) in hints.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled("  •  ", self.muted));
            }
            spans.push(Span::styled(*key, self.key));
            spans.push(Span::raw(format!(" {}", action)));
        }
        spans
    }
}
