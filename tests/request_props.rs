use proptest::prelude::*;
use serde_json::Value;
use trigger_vectorization_pipeline::pipeline::{Mode, RequestParams, TriggerRequest};

fn params(job_id: &str, clients: Vec<String>) -> RequestParams {
    RequestParams {
        vectorization_service_url: Some("http://localhost:5001/".into()),
        url: Some("metadata-test.json".into()),
        job_id: Some(job_id.to_string()),
        clients_list: clients,
        study_id: Some("study_12345".into()),
    }
}

proptest! {
    #[test]
    fn development_body_echoes_job_and_clients(
        job_id in "[A-Za-z0-9_-]{1,24}",
        clients in prop::collection::vec("[a-z0-9]{1,12}", 1..5),
    ) {
        let as_json = serde_json::to_string(&clients).unwrap();
        for supplied in [vec![as_json], clients.clone()] {
            let request = TriggerRequest::resolve(params(&job_id, supplied), Mode::Development).unwrap();
            prop_assert_eq!(request.endpoint.as_str(), "http://localhost:5001/vectorize");
            let body: Value = serde_json::from_str(&request.body_json()).unwrap();
            prop_assert_eq!(&body["jobId"], &Value::from(job_id.clone()));
            prop_assert_eq!(&body["clientsList"], &Value::from(clients.clone()));
            prop_assert_eq!(&body["url"], &Value::from("metadata-test.json"));
            prop_assert!(body.get("studyId").is_none());
        }
    }

    #[test]
    fn production_body_never_carries_a_dataset_path(
        job_id in "[A-Za-z0-9_-]{1,24}",
        clients in prop::collection::vec("[a-z0-9]{1,12}", 1..5),
    ) {
        let request = TriggerRequest::resolve(params(&job_id, clients), Mode::Production).unwrap();
        let body: Value = serde_json::from_str(&request.body_json()).unwrap();
        prop_assert!(body.get("url").is_none());
        prop_assert_eq!(&body["studyId"], &Value::from("study_12345"));
    }

    #[test]
    fn missing_core_argument_is_always_a_validation_error(
        which in 0usize..3,
        production in any::<bool>(),
    ) {
        let mut p = params("job", vec!["client1".into()]);
        match which {
            0 => p.job_id = None,
            1 => p.clients_list.clear(),
            _ => p.vectorization_service_url = None,
        }
        let mode = if production { Mode::Production } else { Mode::Development };
        let err = TriggerRequest::resolve(p, mode).unwrap_err();
        prop_assert_eq!(err.exit_code(), 2);
    }
}
