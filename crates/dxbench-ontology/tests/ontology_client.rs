//! Integration tests for OrphadataClient and Enricher.
//!
//! Uses wiremock for HTTP mocking. Tests cover name encoding, payload shapes,
//! status mapping (403/404/5xx) and end-to-end enrichment to a file.

use std::sync::Arc;

use dxbench_ontology::{
    DiseaseLookup, Enricher, LabelMap, OntologyConfig, OntologyError, OrphadataClient,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NAMES: &str = "/rd-cross-referencing/orphacodes/names";

fn create_test_client(mock_server: &MockServer) -> OrphadataClient {
    let config = OntologyConfig::default().with_url(mock_server.uri());
    OrphadataClient::new(config).expect("failed to create client")
}

#[tokio::test]
async fn test_lookup_success_normalizes_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/Marfan%20syndrome", NAMES)))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "results": {
                "ORPHAcode": 558,
                "Preferred term": "Marfan syndrome",
                "OrphanetURL": "http://www.orpha.net/consor/cgi-bin/OC_Exp.php?lng=EN&Expert=558",
                "Synonym": [],
                "SummaryInformation": [{ "Definition": "A systemic disease of connective tissue." }]
            }}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let disease = client
        .lookup(" Marfan_syndrome ")
        .await
        .expect("lookup failed")
        .expect("expected a match");

    assert_eq!(disease.orphacode, 558);
    assert_eq!(disease.preferred_term, "Marfan syndrome");
    assert!(disease.synonyms.is_empty());
    assert_eq!(
        disease.definition.as_deref(),
        Some("A systemic disease of connective tissue.")
    );
}

#[tokio::test]
async fn test_lookup_404_is_no_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert_eq!(client.lookup("Nonexistent disease").await.unwrap(), None);
}

#[tokio::test]
async fn test_lookup_403_is_permission_denied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.lookup("Fabry disease").await.unwrap_err();
    assert!(matches!(err, OntologyError::PermissionDenied { .. }));
    assert!(err.to_string().contains("403"));
}

#[tokio::test]
async fn test_lookup_5xx_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    match client.lookup("Fabry disease").await {
        Err(OntologyError::Status { status, body, .. }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_lookup_uses_configured_lang() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("lang", "fr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "results": [{ "ORPHAcode": "166", "Preferred term": "Maladie de Fabry" }] }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = OntologyConfig::default()
        .with_url(mock_server.uri())
        .with_lang("FR");
    let client = OrphadataClient::new(config).unwrap();
    let disease = client.lookup("Fabry disease").await.unwrap().unwrap();
    assert_eq!(disease.orphacode, 166);
    assert_eq!(disease.preferred_term, "Maladie de Fabry");
}

#[tokio::test]
async fn test_enrich_writes_only_matched_labels() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/Marfan%20syndrome", NAMES)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "results": { "ORPHAcode": 558, "Preferred term": "Marfan syndrome" } }
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/Made%20up%20syndrome", NAMES)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/Empty%20results", NAMES)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "results": null } })))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("labels_with_info.json");
    let labels = vec![
        "Marfan_syndrome".to_string(),
        "Made up syndrome".to_string(),
        "Empty results".to_string(),
    ];

    let (map, report) = Enricher::new(Arc::new(create_test_client(&mock_server)), &out)
        .run(labels)
        .await
        .expect("enrichment failed");

    assert_eq!(report.matched, 1);
    assert_eq!(report.unmatched, 2);
    assert!(map.contains_key("Marfan_syndrome"));

    let on_disk: LabelMap = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(on_disk.len(), 1);
    assert_eq!(on_disk["Marfan_syndrome"].orphacode, 558);
}
