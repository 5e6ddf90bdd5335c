use std::time::Instant;
use tui_input::Input;

use crate::generator::{DependencyOption, GeneratedProject, PipelineError, ProjectSpec, Stage};

/// Fixed progress gain for each intermediate pipeline stage
pub const PROGRESS_STEP: f64 = 0.4;

/// Intermediate stages never report more than this; only completion reaches 1.0
pub const MAX_INTERMEDIATE_PROGRESS: f64 = 0.9;

/// Steps of the wizard, in the only order they can be visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    NameInput,
    DependencySelect,
    Generating,
    Done,
}

impl Step {
    /// Get the name of the step
    pub fn name(&self) -> &'static str {
        match self {
            Step::NameInput => "Project",
            Step::DependencySelect => "Dependencies",
            Step::Generating => "Generating",
            Step::Done => "Done",
        }
    }

    /// Steps where `q` is text rather than a quit key
    pub fn accepts_text(&self) -> bool {
        matches!(self, Step::NameInput)
    }
}

/// Which field is focused on the project form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    ProjectName,
    GroupId,
    ArtifactId,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::ProjectName => "Project name",
            FormField::GroupId => "Group id",
            FormField::ArtifactId => "Artifact id",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            FormField::ProjectName => FormField::GroupId,
            FormField::GroupId => FormField::ArtifactId,
            FormField::ArtifactId => FormField::ProjectName,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            FormField::ProjectName => FormField::ArtifactId,
            FormField::GroupId => FormField::ProjectName,
            FormField::ArtifactId => FormField::GroupId,
        }
    }

    pub const ALL: [FormField; 3] = [FormField::ProjectName, FormField::GroupId, FormField::ArtifactId];
}

/// Text inputs of the first step
#[derive(Debug, Default)]
pub struct ProjectForm {
    pub project_name: Input,
    pub group_id: Input,
    /// Left blank to derive it from the project name
    pub artifact_id: Input,
    pub focused: FormField,
    pub validation_error: Option<String>,
}

impl ProjectForm {
    pub fn input(&self, field: FormField) -> &Input {
        match field {
            FormField::ProjectName => &self.project_name,
            FormField::GroupId => &self.group_id,
            FormField::ArtifactId => &self.artifact_id,
        }
    }

    pub fn focused_input_mut(&mut self) -> &mut Input {
        match self.focused {
            FormField::ProjectName => &mut self.project_name,
            FormField::GroupId => &mut self.group_id,
            FormField::ArtifactId => &mut self.artifact_id,
        }
    }
}

/// Complete wizard state, owned and mutated by the event loop only
#[derive(Debug)]
pub struct WizardState {
    pub step: Step,
    pub form: ProjectForm,
    /// Read-only dependency catalog
    pub options: Vec<DependencyOption>,
    pub cursor: usize,
    /// Selected option indices in selection order
    selected: Vec<usize>,
    pub progress: f64,
    pub stage: Option<Stage>,
    pub spec: ProjectSpec,
    pub last_error: Option<PipelineError>,
    pub generated: Option<GeneratedProject>,
    pipeline_started: bool,
    pub started_at: Option<Instant>,
    /// Spinner animation frame, advanced on ticks
    pub tick_count: usize,
}

impl WizardState {
    pub fn new(options: Vec<DependencyOption>, default_group_id: &str) -> Self {
        let form = ProjectForm {
            group_id: Input::new(default_group_id.to_string()),
            ..ProjectForm::default()
        };

        Self {
            step: Step::NameInput,
            form,
            options,
            cursor: 0,
            selected: Vec::new(),
            progress: 0.0,
            stage: None,
            spec: ProjectSpec::default(),
            last_error: None,
            generated: None,
            pipeline_started: false,
            started_at: None,
            tick_count: 0,
        }
    }

    /// Pre-fill the form and selection from values given on the command line
    ///
    /// Unknown dependency ids are ignored.
    pub fn prefill(&mut self, name: Option<&str>, artifact_id: Option<&str>, dependencies: &[String]) {
        if let Some(name) = name {
            self.form.project_name = Input::new(name.to_string());
        }
        if let Some(artifact_id) = artifact_id {
            self.form.artifact_id = Input::new(artifact_id.to_string());
        }
        for id in dependencies {
            if let Some(index) = self.options.iter().position(|option| &option.id == id) {
                if !self.selected.contains(&index) {
                    self.selected.push(index);
                }
            }
        }
    }

    /// Validate the form and move to dependency selection
    ///
    /// Returns false and records a validation message when the project name
    /// is blank.
    pub fn confirm_project(&mut self) -> bool {
        if self.step != Step::NameInput {
            return false;
        }

        let name = self.form.project_name.value().trim().to_string();
        if name.is_empty() {
            self.form.validation_error = Some("Project name must not be empty".to_string());
            self.form.focused = FormField::ProjectName;
            return false;
        }

        self.spec = ProjectSpec::from_input(
            &name,
            self.form.group_id.value(),
            self.form.artifact_id.value(),
        );

        self.form.validation_error = None;
        self.step = Step::DependencySelect;
        true
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.options.len() {
            self.cursor += 1;
        }
    }

    /// Select or deselect the option under the cursor
    pub fn toggle_at_cursor(&mut self) {
        if self.cursor >= self.options.len() {
            return;
        }

        if let Some(position) = self.selected.iter().position(|&i| i == self.cursor) {
            self.selected.remove(position);
        } else {
            self.selected.push(self.cursor);
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Selected option indices in selection order
    pub fn selected_indices(&self) -> &[usize] {
        &self.selected
    }

    /// Selected dependency ids in selection order
    pub fn selected_dependencies(&self) -> Vec<String> {
        self.selected
            .iter()
            .filter_map(|&i| self.options.get(i))
            .map(|option| option.id.clone())
            .collect()
    }

    /// Snapshot the selection and enter the generating step
    ///
    /// Returns the spec to hand to the pipeline. Only the first call from the
    /// dependency step yields a spec; every later call returns `None`.
    pub fn begin_generation(&mut self) -> Option<ProjectSpec> {
        if self.step != Step::DependencySelect || self.pipeline_started {
            return None;
        }

        self.spec.dependencies = self.selected_dependencies();
        self.progress = 0.0;
        self.stage = None;
        self.step = Step::Generating;
        self.pipeline_started = true;
        self.started_at = Some(Instant::now());

        Some(self.spec.clone())
    }

    pub fn pipeline_started(&self) -> bool {
        self.pipeline_started
    }

    /// Record an intermediate stage
    pub fn advance_progress(&mut self, stage: Stage) {
        if self.step != Step::Generating || self.last_error.is_some() {
            return;
        }

        let next = (self.progress + PROGRESS_STEP).min(MAX_INTERMEDIATE_PROGRESS);
        self.progress = self.progress.max(next);
        self.stage = Some(stage);
    }

    /// Record a successful run
    pub fn complete(&mut self, project: GeneratedProject) {
        if self.step != Step::Generating || self.last_error.is_some() {
            return;
        }

        self.progress = 1.0;
        self.generated = Some(project);
        self.step = Step::Done;
    }

    /// Record a failed run; the step stays where it is
    pub fn fail(&mut self, error: PipelineError) {
        self.last_error = Some(error);
    }

    pub fn is_failed(&self) -> bool {
        self.last_error.is_some()
    }

    /// Milliseconds since generation started
    pub fn elapsed_ms(&self) -> u64 {
        self.started_at
            .map(|start| start.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }
}

/// State transitions for the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateTransition {
    Continue, // Go to next step
    Quit,     // Exit wizard
}

/// How the wizard ended
#[derive(Debug)]
pub enum ExitStatus {
    Completed(GeneratedProject),
    Quit,
    Failed(PipelineError),
}

impl ExitStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, ExitStatus::Failed(_))
    }
}
