use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use spring_init::cli::tui::init::app::App;
use spring_init::cli::tui::init::events::AppEvent;
use spring_init::cli::tui::init::state::{ExitStatus, FormField, Step, WizardState};
use spring_init::config::default_catalog;
use spring_init::generator::{
    ArchiveFetcher, ExtractionSummary, FetchError, FetchedArchive, GeneratedProject, Pipeline,
    PipelineError, ProjectSpec, Stage, ZipExtractor,
};

/// Fetcher that always answers with a server error
struct UnavailableFetcher;

#[async_trait]
impl ArchiveFetcher for UnavailableFetcher {
    async fn fetch(&self, _spec: &ProjectSpec) -> Result<FetchedArchive, FetchError> {
        Err(FetchError::Status {
            status: 503,
            url: "http://localhost/starter.zip".to_string(),
        })
    }
}

fn app() -> App {
    let pipeline = Pipeline::new(
        Arc::new(UnavailableFetcher),
        Arc::new(ZipExtractor),
        PathBuf::from("."),
    );
    App::new(WizardState::new(default_catalog(), "com.example"), Arc::new(pipeline))
}

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.dispatch(key(KeyCode::Char(c))).unwrap();
    }
}

fn generated_project() -> GeneratedProject {
    GeneratedProject {
        destination: PathBuf::from("./demo"),
        summary: ExtractionSummary {
            directories: 1,
            files: 2,
            bytes_written: 42,
        },
    }
}

#[test]
fn test_step_names() {
    assert_eq!(Step::NameInput.name(), "Project");
    assert_eq!(Step::DependencySelect.name(), "Dependencies");
    assert_eq!(Step::Generating.name(), "Generating");
    assert_eq!(Step::Done.name(), "Done");
}

#[test]
fn test_enter_with_name_moves_to_dependencies() {
    let mut app = app();
    type_text(&mut app, "demo");
    app.dispatch(key(KeyCode::Enter)).unwrap();

    let state = app.state();
    assert_eq!(state.step, Step::DependencySelect);
    assert_eq!(state.spec.project_name, "demo");
    assert_eq!(state.spec.group_id, "com.example");
    assert_eq!(state.spec.artifact_id, "demo");
    assert!(!app.should_quit());
}

#[test]
fn test_empty_name_is_rejected() {
    let mut app = app();
    type_text(&mut app, "   ");
    app.dispatch(key(KeyCode::Enter)).unwrap();

    let state = app.state();
    assert_eq!(state.step, Step::NameInput);
    assert!(state.form.validation_error.is_some());

    // Typing clears the message
    let mut app = app;
    type_text(&mut app, "x");
    assert!(app.state().form.validation_error.is_none());
}

#[test]
fn test_q_is_text_while_naming() {
    let mut app = app();
    type_text(&mut app, "quarkus-vs-q");

    assert!(!app.should_quit());
    assert_eq!(app.state().form.project_name.value(), "quarkus-vs-q");
}

#[test]
fn test_q_quits_outside_text_entry() {
    let mut app = app();
    type_text(&mut app, "demo");
    app.dispatch(key(KeyCode::Enter)).unwrap();
    app.dispatch(key(KeyCode::Char('q'))).unwrap();

    assert!(app.should_quit());
    assert!(matches!(app.into_exit_status(), ExitStatus::Quit));
}

#[test]
fn test_esc_and_ctrl_c_quit_anywhere() {
    let mut app = app();
    app.dispatch(key(KeyCode::Esc)).unwrap();
    assert!(app.should_quit());

    let mut app = app_with_name("demo");
    app.dispatch(AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)))
        .unwrap();
    assert!(app.should_quit());
}

fn app_with_name(name: &str) -> App {
    let mut app = app();
    type_text(&mut app, name);
    app.dispatch(key(KeyCode::Enter)).unwrap();
    app
}

#[test]
fn test_tab_cycles_fields_and_edits_focused_one() {
    let mut app = app();
    type_text(&mut app, "Order Service");
    assert_eq!(app.state().form.focused, FormField::ProjectName);

    app.dispatch(key(KeyCode::Tab)).unwrap();
    assert_eq!(app.state().form.focused, FormField::GroupId);

    app.dispatch(key(KeyCode::Tab)).unwrap();
    assert_eq!(app.state().form.focused, FormField::ArtifactId);
    type_text(&mut app, "orders");

    app.dispatch(key(KeyCode::BackTab)).unwrap();
    assert_eq!(app.state().form.focused, FormField::GroupId);

    app.dispatch(key(KeyCode::Enter)).unwrap();
    let spec = &app.state().spec;
    assert_eq!(spec.project_name, "Order Service");
    assert_eq!(spec.artifact_id, "orders");
}

#[test]
fn test_blank_artifact_id_is_derived_from_name() {
    let app = app_with_name("Order Service");
    assert_eq!(app.state().spec.artifact_id, "order-service");
}

#[test]
fn test_pipeline_events_drive_progress_to_done() {
    let mut app = app_with_name("demo");
    // No channel connected, so Enter only moves the state
    app.dispatch(key(KeyCode::Enter)).unwrap();
    assert_eq!(app.state().step, Step::Generating);
    assert_eq!(app.state().progress, 0.0);

    app.dispatch(AppEvent::PipelineProgress(Stage::Downloading)).unwrap();
    let after_download = app.state().progress;
    assert!(after_download > 0.0 && after_download < 1.0);

    app.dispatch(AppEvent::PipelineProgress(Stage::Extracting { bytes: 2048 })).unwrap();
    let after_extract = app.state().progress;
    assert!(after_extract >= after_download && after_extract < 1.0);

    app.dispatch(AppEvent::PipelineComplete(generated_project())).unwrap();
    assert_eq!(app.state().step, Step::Done);
    assert_eq!(app.state().progress, 1.0);

    app.dispatch(key(KeyCode::Enter)).unwrap();
    assert!(app.should_quit());
    match app.into_exit_status() {
        ExitStatus::Completed(project) => assert_eq!(project.destination, PathBuf::from("./demo")),
        other => panic!("expected completion, got {:?}", other),
    }
}

#[test]
fn test_progress_never_reaches_one_before_completion() {
    let mut app = app_with_name("demo");
    app.dispatch(key(KeyCode::Enter)).unwrap();

    for _ in 0..10 {
        app.dispatch(AppEvent::PipelineProgress(Stage::Downloading)).unwrap();
    }
    assert!(app.state().progress < 1.0);
}

#[test]
fn test_failure_is_shown_until_next_key() {
    let mut app = app_with_name("demo");
    app.dispatch(key(KeyCode::Enter)).unwrap();

    let error = PipelineError::from(FetchError::Status {
        status: 500,
        url: "http://localhost/starter.zip".to_string(),
    });
    app.dispatch(AppEvent::PipelineFailed(error)).unwrap();

    assert!(app.state().is_failed());
    assert_eq!(app.state().step, Step::Generating);
    assert!(!app.should_quit());

    app.dispatch(key(KeyCode::Char('x'))).unwrap();
    assert!(app.should_quit());

    let status = app.into_exit_status();
    assert!(status.is_failure());
}

#[test]
fn test_completion_after_failure_is_ignored() {
    let mut app = app_with_name("demo");
    app.dispatch(key(KeyCode::Enter)).unwrap();

    app.dispatch(AppEvent::PipelineFailed(PipelineError::from(FetchError::Status {
        status: 502,
        url: "http://localhost/starter.zip".to_string(),
    })))
    .unwrap();
    app.dispatch(AppEvent::PipelineComplete(generated_project())).unwrap();

    assert_eq!(app.state().step, Step::Generating);
    assert!(app.state().generated.is_none());
}

#[test]
fn test_ticks_only_advance_the_spinner() {
    let mut app = app_with_name("demo");
    let before = app.state().step;

    app.dispatch(AppEvent::Tick).unwrap();
    app.dispatch(AppEvent::Tick).unwrap();

    assert_eq!(app.state().tick_count, 2);
    assert_eq!(app.state().step, before);
}

#[tokio::test]
async fn test_connected_app_reports_pipeline_failure() {
    let mut app = app_with_name("demo");
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    app.connect(tx);

    app.dispatch(key(KeyCode::Enter)).unwrap();
    assert_eq!(app.state().step, Step::Generating);

    while !app.state().is_failed() {
        let event = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
            .await
            .expect("pipeline did not report back")
            .expect("channel closed");
        app.dispatch(event).unwrap();
    }

    let error = app.state().last_error.as_ref().unwrap();
    assert!(matches!(error, PipelineError::Fetch(FetchError::Status { status: 503, .. })));
}
