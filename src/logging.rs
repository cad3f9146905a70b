//! Log sink construction using `tracing`.
//!
//! The sink is returned as a [`Dispatch`] and handed to the trigger run rather
//! than installed as the process-wide default.

use std::{
    fs::{File, OpenOptions},
    io::IsTerminal,
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use tracing::{level_filters::LevelFilter, Dispatch, Subscriber};
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    prelude::*,
    registry::LookupSpan,
    EnvFilter, Layer,
};

use crate::config::{error_file_in, log_file_in, LogTarget, Settings};

/// Build the sink selected by `settings`.
pub fn build_dispatch(settings: &Settings) -> Result<Dispatch> {
    let env_filter = env_filter(&settings.log_filter)?;
    match &settings.log_target {
        LogTarget::Console => {
            let ansi = std::io::stdout().is_terminal();
            let registry = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer(std::io::stdout, ansi));
            Ok(Dispatch::new(registry))
        }
        LogTarget::File { dir } => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log dir {}", dir.display()))?;
            let log_file = open_append(&log_file_in(dir))?;
            let error_file = open_append(&error_file_in(dir))?;
            let registry = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer(Mutex::new(log_file), false))
                .with(fmt_layer(Mutex::new(error_file), false).with_filter(LevelFilter::ERROR));
            Ok(Dispatch::new(registry))
        }
    }
}

/// Same line format against an arbitrary writer, without colour.
pub fn dispatch_with_writer<W>(filter: &str, writer: W) -> Result<Dispatch>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry()
        .with(env_filter(filter)?)
        .with(fmt_layer(writer, false));
    Ok(Dispatch::new(registry))
}

fn env_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).with_context(|| format!("invalid log filter {directive:?}"))
}

/// Timestamp, level, span tag and message; nothing else.
fn fmt_layer<S, W>(writer: W, ansi: bool) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_level(true)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}
