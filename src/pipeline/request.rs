//! Validation of trigger parameters and construction of the `/vectorize` body.

use std::fmt;

use reqwest::Url;
use serde::Serialize;
use tracing::warn;

use crate::error::TriggerError;

const VECTORIZE_PATH: &str = "vectorize";

/// Request-construction path, selected once per run by `PRODUCTION_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The dataset is named explicitly with `--url`.
    Development,
    /// The service resolves the dataset from `--studyId` via the Feature Extraction Tool.
    Production,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// Raw parameters as they arrive from the command line.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    pub vectorization_service_url: Option<String>,
    pub url: Option<String>,
    pub job_id: Option<String>,
    pub clients_list: Vec<String>,
    pub study_id: Option<String>,
}

/// Dataset reference carried in the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetRef {
    /// Literal path or URL of the dataset (development).
    Url(String),
    /// Study identifier resolved server-side (production).
    Study(String),
}

/// A validated trigger, ready to be posted.
#[derive(Debug, Clone)]
pub struct TriggerRequest {
    pub endpoint: Url,
    pub job_id: String,
    pub clients_list: Vec<String>,
    pub dataset: DatasetRef,
}

/// JSON body accepted by the vectorization service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorizeBody<'a> {
    pub job_id: &'a str,
    pub clients_list: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_id: Option<&'a str>,
}

impl TriggerRequest {
    /// Validate `params` for `mode`. Nothing touches the network here.
    pub fn resolve(params: RequestParams, mode: Mode) -> Result<Self, TriggerError> {
        let base = required(params.vectorization_service_url, "--vectorizationServiceUrl")?;
        let job_id = required(params.job_id, "--jobId")?;
        if params.clients_list.is_empty() {
            return Err(TriggerError::validation("missing required argument --clientsList"));
        }
        let clients_list = parse_clients_list(&params.clients_list)?;
        let endpoint = vectorize_endpoint(&base)?;

        let url = present(params.url);
        let study_id = present(params.study_id);
        let dataset = match mode {
            Mode::Development => {
                let url = url.ok_or_else(|| {
                    TriggerError::validation(
                        "missing required argument --url (required in development mode)",
                    )
                })?;
                DatasetRef::Url(url)
            }
            Mode::Production => {
                let study_id = study_id.ok_or_else(|| {
                    TriggerError::validation(
                        "missing required argument --studyId (required in production mode)",
                    )
                })?;
                if let Some(url) = url {
                    warn!(%url, "--url is ignored in production mode");
                }
                DatasetRef::Study(study_id)
            }
        };

        Ok(Self {
            endpoint,
            job_id,
            clients_list,
            dataset,
        })
    }

    pub fn body(&self) -> VectorizeBody<'_> {
        let (url, study_id) = match &self.dataset {
            DatasetRef::Url(url) => (Some(url.as_str()), None),
            DatasetRef::Study(id) => (None, Some(id.as_str())),
        };
        VectorizeBody {
            job_id: &self.job_id,
            clients_list: &self.clients_list,
            url,
            study_id,
        }
    }

    /// Body rendered for log lines.
    pub fn body_json(&self) -> String {
        serde_json::to_string(&self.body()).unwrap_or_else(|err| format!("<unserialisable: {err}>"))
    }
}

/// Flatten `--clientsList` values.
///
/// A value starting with `[` is read as a JSON array of strings, anything else
/// is a bare client id. Both forms may be mixed; the result keeps argument order.
pub fn parse_clients_list(values: &[String]) -> Result<Vec<String>, TriggerError> {
    let mut clients = Vec::new();
    for value in values {
        let trimmed = value.trim();
        if trimmed.starts_with('[') {
            let parsed: Vec<String> = serde_json::from_str(trimmed).map_err(|err| {
                TriggerError::validation(format!(
                    "--clientsList value {trimmed:?} is not a JSON array of strings: {err}"
                ))
            })?;
            if parsed.is_empty() {
                return Err(TriggerError::validation("--clientsList JSON array is empty"));
            }
            for client in parsed {
                let client = client.trim();
                if client.is_empty() {
                    return Err(TriggerError::validation(
                        "--clientsList contains an empty client id",
                    ));
                }
                clients.push(client.to_string());
            }
        } else if trimmed.is_empty() {
            return Err(TriggerError::validation(
                "--clientsList contains an empty client id",
            ));
        } else {
            clients.extend(trimmed.split_whitespace().map(str::to_string));
        }
    }
    Ok(clients)
}

/// `<base>/vectorize`, tolerating a trailing slash on the base.
pub fn vectorize_endpoint(base: &str) -> Result<Url, TriggerError> {
    let trimmed = base.trim().trim_end_matches('/');
    let endpoint = format!("{trimmed}/{VECTORIZE_PATH}");
    let url = Url::parse(&endpoint).map_err(|err| {
        TriggerError::validation(format!(
            "--vectorizationServiceUrl {base:?} is not a valid URL: {err}"
        ))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TriggerError::validation(format!(
            "--vectorizationServiceUrl must use http or https, got {other}"
        ))),
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, flag: &str) -> Result<String, TriggerError> {
    present(value).ok_or_else(|| TriggerError::validation(format!("missing required argument {flag}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> RequestParams {
        RequestParams {
            vectorization_service_url: Some("http://localhost:5001".into()),
            url: Some("metadata-test.json".into()),
            job_id: Some("test_job_123".into()),
            clients_list: vec![r#"["client1"]"#.into()],
            study_id: Some("study_12345".into()),
        }
    }

    #[test]
    fn development_body_carries_literal_url() {
        let request = TriggerRequest::resolve(params(), Mode::Development).unwrap();
        assert_eq!(request.endpoint.as_str(), "http://localhost:5001/vectorize");
        assert_eq!(
            request.body_json(),
            r#"{"jobId":"test_job_123","clientsList":["client1"],"url":"metadata-test.json"}"#
        );
    }

    #[test]
    fn production_body_carries_study_id_only() {
        let request = TriggerRequest::resolve(params(), Mode::Production).unwrap();
        assert_eq!(request.dataset, DatasetRef::Study("study_12345".into()));
        assert_eq!(
            request.body_json(),
            r#"{"jobId":"test_job_123","clientsList":["client1"],"studyId":"study_12345"}"#
        );
    }

    #[test]
    fn mode_specific_requirements() {
        let mut no_url = params();
        no_url.url = None;
        assert!(TriggerRequest::resolve(no_url.clone(), Mode::Production).is_ok());
        let err = TriggerRequest::resolve(no_url, Mode::Development).unwrap_err();
        assert!(err.to_string().contains("--url"));

        let mut no_study = params();
        no_study.study_id = Some("   ".into());
        assert!(TriggerRequest::resolve(no_study.clone(), Mode::Development).is_ok());
        let err = TriggerRequest::resolve(no_study, Mode::Production).unwrap_err();
        assert!(err.to_string().contains("--studyId"));
    }

    #[test]
    fn clients_list_accepts_both_forms_in_order() {
        let values = vec![
            "client1".to_string(),
            r#"["client2", "client3"]"#.to_string(),
            "client4 client5".to_string(),
        ];
        assert_eq!(
            parse_clients_list(&values).unwrap(),
            vec!["client1", "client2", "client3", "client4", "client5"]
        );
    }

    #[test]
    fn clients_list_rejects_malformed_json_and_blanks() {
        assert!(parse_clients_list(&["[client1".to_string()]).is_err());
        assert!(parse_clients_list(&["[1, 2]".to_string()]).is_err());
        assert!(parse_clients_list(&["[]".to_string()]).is_err());
        assert!(parse_clients_list(&["  ".to_string()]).is_err());
    }

    #[test]
    fn endpoint_trims_trailing_slash_and_checks_scheme() {
        assert_eq!(
            vectorize_endpoint("http://svc:5001/").unwrap().as_str(),
            "http://svc:5001/vectorize"
        );
        assert_eq!(
            vectorize_endpoint("https://svc/api").unwrap().as_str(),
            "https://svc/api/vectorize"
        );
        assert!(vectorize_endpoint("localhost:5001").is_err());
        assert!(vectorize_endpoint("not a url").is_err());
    }
}
