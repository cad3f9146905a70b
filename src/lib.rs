//! Trigger for a remote vectorization pipeline job.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
