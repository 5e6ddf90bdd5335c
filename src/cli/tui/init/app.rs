use std::sync::Arc;
use std::time::Duration;
use ratatui::{
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    DefaultTerminal, Frame,
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time;
use tui_input::backend::crossterm::EventHandler;

use crate::generator::{Pipeline, ProjectSpec};
use crate::Result;
use super::state::*;
use super::events::AppEvent;
use super::theme::Theme;

/// Idle time after which a tick is delivered
const TICK_RATE: Duration = Duration::from_millis(50);

/// How long the input reader blocks before checking for shutdown
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Main application struct
pub struct App {
    /// Current state of the wizard
    state: WizardState,
    /// Whether the app should quit
    should_quit: bool,
    /// Theme for styling
    theme: Theme,
    /// Generation pipeline started from the dependency step
    pipeline: Arc<Pipeline>,
    /// Event sender handed to background tasks
    event_tx: Option<UnboundedSender<AppEvent>>,
}

impl App {
    /// Create a new app instance
    pub fn new(state: WizardState, pipeline: Arc<Pipeline>) -> Self {
        Self {
            state,
            should_quit: false,
            theme: Theme::default(),
            pipeline,
            event_tx: None,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Attach the channel background tasks post their events to
    pub fn connect(&mut self, event_tx: UnboundedSender<AppEvent>) {
        self.event_tx = Some(event_tx);
    }

    /// Run the application until the user quits
    pub async fn run(mut self) -> Result<ExitStatus> {
        // Initialize terminal
        let mut terminal = ratatui::init();
        terminal.clear()?;

        // Create event channel
        let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();
        self.connect(event_tx.clone());

        spawn_input_reader(event_tx);

        // Main render loop
        let result = self.main_loop(&mut terminal, &mut event_rx).await;

        // Cleanup
        ratatui::restore();
        result?;

        Ok(self.into_exit_status())
    }

    /// Main event loop
    async fn main_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        event_rx: &mut UnboundedReceiver<AppEvent>,
    ) -> Result<()> {
        loop {
            // Draw UI
            terminal.draw(|frame| self.render(frame))?;

            // Handle events with timeout for animations
            match time::timeout(TICK_RATE, event_rx.recv()).await {
                Ok(Some(event)) => self.dispatch(event)?,
                Ok(None) => break, // Channel closed
                Err(_) => self.dispatch(AppEvent::Tick)?,
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Render the current state
    fn render(&self, frame: &mut Frame) {
        super::screens::render(frame, &self.state, &self.theme);
    }

    /// Apply one event, including any transition it triggers
    pub fn dispatch(&mut self, event: AppEvent) -> Result<()> {
        if let Some(transition) = self.handle_event(event)? {
            self.transition_state(transition)?;
        }
        Ok(())
    }

    /// Handle an event
    fn handle_event(&mut self, event: AppEvent) -> Result<Option<StateTransition>> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(_, _) => Ok(None),
            AppEvent::Tick => {
                self.state.tick_count = self.state.tick_count.wrapping_add(1);
                Ok(None)
            }
            // Pipeline results apply whichever step is showing
            AppEvent::PipelineProgress(stage) => {
                tracing::debug!("Pipeline stage: {:?}", stage);
                self.state.advance_progress(stage);
                Ok(None)
            }
            AppEvent::PipelineComplete(project) => {
                self.state.complete(project);
                Ok(None)
            }
            AppEvent::PipelineFailed(error) => {
                tracing::warn!("{}: {}", error.kind().as_str(), error);
                self.state.fail(error);
                Ok(None)
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<StateTransition>> {
        // Handle global keys first
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Esc || ctrl_c {
            return Ok(Some(StateTransition::Quit));
        }

        // A failed run shows its error until the next key press
        if self.state.is_failed() {
            return Ok(Some(StateTransition::Quit));
        }

        if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) && !self.state.step.accepts_text() {
            return Ok(Some(StateTransition::Quit));
        }

        // Route to step-specific handler
        let transition = match self.state.step {
            Step::NameInput => Self::handle_name_input_key(&mut self.state.form, key),
            Step::DependencySelect => Self::handle_dependency_key(&mut self.state, key),
            // Input is ignored while the pipeline runs
            Step::Generating => None,
            Step::Done => (key.code == KeyCode::Enter).then_some(StateTransition::Continue),
        };
        Ok(transition)
    }

    fn handle_name_input_key(form: &mut ProjectForm, key: KeyEvent) -> Option<StateTransition> {
        match key.code {
            KeyCode::Enter => return Some(StateTransition::Continue),
            KeyCode::Tab | KeyCode::Down => form.focused = form.focused.next(),
            KeyCode::BackTab | KeyCode::Up => form.focused = form.focused.previous(),
            _ => {
                // Let tui-input handle editing keys
                if form.focused_input_mut().handle_event(&Event::Key(key)).is_some() {
                    form.validation_error = None;
                }
            }
        }
        None
    }

    fn handle_dependency_key(state: &mut WizardState, key: KeyEvent) -> Option<StateTransition> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => state.move_cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => state.move_cursor_down(),
            KeyCode::Char(' ') => state.toggle_at_cursor(),
            KeyCode::Enter => return Some(StateTransition::Continue),
            _ => {}
        }
        None
    }

    /// Transition to the next step
    fn transition_state(&mut self, transition: StateTransition) -> Result<()> {
        match transition {
            StateTransition::Continue => match self.state.step {
                Step::NameInput => {
                    if self.state.confirm_project() {
                        tracing::info!(
                            "Project '{}' ({}:{})",
                            self.state.spec.project_name,
                            self.state.spec.group_id,
                            self.state.spec.artifact_id
                        );
                    }
                }
                Step::DependencySelect => {
                    if let Some(spec) = self.state.begin_generation() {
                        self.start_pipeline(spec);
                    }
                }
                // Already running; a second confirm must not start another run
                Step::Generating => {}
                Step::Done => self.should_quit = true,
            },
            StateTransition::Quit => {
                self.should_quit = true;
            }
        }
        Ok(())
    }

    fn start_pipeline(&self, spec: ProjectSpec) {
        let Some(tx) = &self.event_tx else {
            tracing::error!("No event channel connected; generation not started");
            return;
        };

        let event_tx = tx.clone();
        self.pipeline.spawn(spec, move |event| {
            let _ = event_tx.send(AppEvent::from(event));
        });
    }

    /// Consume the app and report how the wizard ended
    pub fn into_exit_status(mut self) -> ExitStatus {
        if let Some(error) = self.state.last_error.take() {
            return ExitStatus::Failed(error);
        }

        match self.state.generated.take() {
            Some(project) if self.state.step == Step::Done => ExitStatus::Completed(project),
            _ => ExitStatus::Quit,
        }
    }
}

/// Forward terminal key and resize events into the app channel
///
/// Runs on a blocking worker and stops once the app drops its receiver.
fn spawn_input_reader(input_tx: UnboundedSender<AppEvent>) {
    tokio::task::spawn_blocking(move || {
        while !input_tx.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    tracing::error!("Terminal input error: {}", e);
                    break;
                }
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    let _ = input_tx.send(AppEvent::Key(key));
                }
                Ok(Event::Resize(width, height)) => {
                    let _ = input_tx.send(AppEvent::Resize(width, height));
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("Terminal input error: {}", e);
                    break;
                }
            }
        }
    });
}
