//! Trigger construction and dispatch for the remote vectorization pipeline.

pub mod client;
pub mod request;

pub use client::{TriggerResult, VectorizationClient};
pub use request::{DatasetRef, Mode, RequestParams, TriggerRequest};
