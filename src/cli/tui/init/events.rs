use ratatui::crossterm::event::KeyEvent;

use crate::generator::{GeneratedProject, PipelineError, PipelineEvent, Stage};

/// All possible events in the application
#[derive(Debug)]
pub enum AppEvent {
    // Input events
    Key(KeyEvent),
    Resize(u16, u16),

    // Async task events - generation pipeline
    PipelineProgress(Stage),
    PipelineComplete(GeneratedProject),
    PipelineFailed(PipelineError),

    // UI events
    Tick, // for the spinner and elapsed time
}

impl From<PipelineEvent> for AppEvent {
    fn from(event: PipelineEvent) -> Self {
        match event {
            PipelineEvent::Progress(stage) => AppEvent::PipelineProgress(stage),
            PipelineEvent::Complete(project) => AppEvent::PipelineComplete(project),
            PipelineEvent::Failed(error) => AppEvent::PipelineFailed(error),
        }
    }
}
