/// Terminal User Interface module for interactive commands
pub mod init;

use std::sync::Arc;

use crate::cli::Cli;
use crate::config::Config;
use crate::generator::Pipeline;
use crate::Result;
use init::state::{ExitStatus, WizardState};

/// Run the interactive init wizard against the configured service
///
/// Values given on the command line pre-fill the form and the selection.
pub async fn run_init_wizard(config: &Config, cli: &Cli) -> Result<ExitStatus> {
    let pipeline = Pipeline::for_service(config.service.clone(), cli.output_dir.clone())?;

    let mut state = WizardState::new(config.dependencies.clone(), &config.defaults.group_id);
    state.prefill(cli.name.as_deref(), cli.artifact_id.as_deref(), &cli.dependencies);

    init::run(state, Arc::new(pipeline)).await
}
