/// Interactive init wizard implementation
pub mod app;
pub mod state;
pub mod events;
pub mod screens;
pub mod theme;

use std::sync::Arc;

use crate::generator::Pipeline;
use crate::Result;
use state::{ExitStatus, WizardState};

/// Entry point for the init wizard
pub async fn run(state: WizardState, pipeline: Arc<Pipeline>) -> Result<ExitStatus> {
    let app = app::App::new(state, pipeline);
    app.run().await
}
