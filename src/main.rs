//! Entry point wiring the CLI to the trigger run.

use std::process::ExitCode;

use anyhow::Result;
use tracing::instrument::WithSubscriber;
use trigger_vectorization_pipeline::{cli::Cli, config::Settings, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return Ok(ExitCode::from(err.exit_code()));
        }
    };
    let dispatch = logging::build_dispatch(&settings)?;

    match cli.dispatch(settings).with_subscriber(dispatch).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) => Ok(ExitCode::from(err.exit_code())),
    }
}
