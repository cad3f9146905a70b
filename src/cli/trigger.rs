//! The trigger run: validate flags, post once, report the outcome.

use clap::Args as ClapArgs;
use tracing::{debug, error, info, instrument};

use crate::{
    config::Settings,
    error::TriggerError,
    pipeline::{Mode, RequestParams, TriggerRequest, TriggerResult, VectorizationClient},
};

/// Flags accepted by the trigger.
///
/// Required flags are optional here so that a missing one is reported through
/// the same validation path as every other bad input.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Base URL of the Vectorization Service (e.g. http://localhost:5001).
    #[arg(long = "vectorizationServiceUrl", value_name = "URL")]
    pub vectorization_service_url: Option<String>,
    /// Dataset path or URL to vectorize; required in development mode.
    #[arg(long = "url", value_name = "DATASET")]
    pub url: Option<String>,
    /// Unique job id for the vectorization/aggregation process.
    #[arg(long = "jobId", value_name = "ID")]
    pub job_id: Option<String>,
    /// Client identifiers, as bare tokens (client1 client2) or a JSON array ('["client1"]').
    #[arg(long = "clientsList", value_name = "CLIENTS", num_args = 1..)]
    pub clients_list: Vec<String>,
    /// Study id the service resolves to a dataset; required in production mode.
    #[arg(long = "studyId", value_name = "ID")]
    pub study_id: Option<String>,
}

impl From<Args> for RequestParams {
    fn from(args: Args) -> Self {
        Self {
            vectorization_service_url: args.vectorization_service_url,
            url: args.url,
            job_id: args.job_id,
            clients_list: args.clients_list,
            study_id: args.study_id,
        }
    }
}

#[instrument(name = "trigger-vectorization-pipeline", skip_all)]
pub async fn run(args: Args, settings: Settings) -> Result<TriggerResult, TriggerError> {
    info!(
        "Starting Vectorization Pipeline Trigger (vectorizationServiceUrl: {}, url: {}, jobId: {}, clientsList: {:?}, studyId: {})",
        shown(&args.vectorization_service_url),
        shown(&args.url),
        shown(&args.job_id),
        args.clients_list,
        shown(&args.study_id)
    );

    let mode = match settings.mode() {
        Ok(mode) => mode,
        Err(err) => {
            error!("{err}");
            return Err(err);
        }
    };
    info!("Running in {mode} mode");

    if mode == Mode::Development && args.study_id.is_some() {
        debug!("studyId is not sent in development mode");
    }

    let request = match TriggerRequest::resolve(args.into(), mode) {
        Ok(request) => request,
        Err(err) => {
            error!("{err}");
            return Err(err);
        }
    };

    info!(
        "Sending POST to {} with body: {}",
        request.endpoint,
        request.body_json()
    );

    let client = match VectorizationClient::new() {
        Ok(client) => client,
        Err(err) => {
            error!("{err}");
            return Err(err);
        }
    };
    info!("Initiating HTTP POST request to vectorization service");
    let result = match client.trigger(&request).await {
        Ok(result) => result,
        Err(err) => {
            error!("Error sending request: {err}");
            return Err(err);
        }
    };

    info!("Response code: {}", result.status_code);
    info!("Response body: {}", result.body);

    if !result.succeeded() {
        error!("Vectorization trigger request failed.");
        return Err(TriggerError::Http {
            status: result.status_code,
            body: result.body,
        });
    }

    info!("Vectorization trigger request succeeded.");
    Ok(result)
}

fn shown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}
