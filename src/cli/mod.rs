//! Command-line interface wiring for the vectorization trigger.

use clap::Parser;

use crate::{config::Settings, error::TriggerError, pipeline::TriggerResult};

pub mod trigger;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Trigger the Vectorization Service via a POST request.",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub args: trigger::Args,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Fire the trigger described by the parsed flags.
    pub async fn dispatch(self, settings: Settings) -> Result<TriggerResult, TriggerError> {
        trigger::run(self.args, settings).await
    }
}
