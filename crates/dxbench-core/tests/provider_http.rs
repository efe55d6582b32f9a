//! HTTP behavior of the chat-completions backends.
//!
//! Uses wiremock in place of the hosted API and the local vLLM server.

use std::time::Duration;

use dxbench_core::errors::ProviderError;
use dxbench_core::providers::llm::local::LocalServerClient;
use dxbench_core::providers::llm::openai::OpenAIClient;
use dxbench_core::LlmClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
}

fn openai(server: &MockServer, concurrency: usize) -> OpenAIClient {
    OpenAIClient::new(
        "gpt-5.2".into(),
        "sk-test".into(),
        &format!("{}/v1", server.uri()),
        Duration::from_secs(5),
        concurrency,
    )
    .expect("client")
}

#[tokio::test]
async fn test_openai_sends_single_user_message_and_trims_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-5.2",
            "messages": [{ "role": "user", "content": "Case: cough" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "  {\"final_diagnosis\": \"Asthma\"}\n",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let resp = openai(&server, 1).complete("Case: cough").await.expect("complete");
    assert_eq!(resp.text, "{\"final_diagnosis\": \"Asthma\"}");
    assert_eq!(resp.reasoning, None);
    assert_eq!(resp.provider, "openai");
}

#[tokio::test]
async fn test_openai_request_has_no_temperature() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .mount(&server)
        .await;

    openai(&server, 1).complete("x").await.expect("complete");

    let requests = server.received_requests().await.expect("recording on");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("temperature").is_none());
}

#[tokio::test]
async fn test_status_429_is_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let err = openai(&server, 1).complete("x").await.unwrap_err();
    match err.downcast_ref::<ProviderError>() {
        Some(ProviderError::RateLimited { status, body, .. }) => {
            assert_eq!(*status, 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("expected RateLimited, got {:?}", other),
    }
}

#[tokio::test]
async fn test_status_500_is_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = openai(&server, 1).complete("x").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProviderError>(),
        Some(ProviderError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_missing_content_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = openai(&server, 1).complete("x").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProviderError>(),
        Some(ProviderError::MissingContent { .. })
    ));
}

#[tokio::test]
async fn test_undecodable_success_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = openai(&server, 1).complete("x").await.unwrap_err();
    match err.downcast_ref::<ProviderError>() {
        Some(ProviderError::InvalidResponse { provider, .. }) => assert_eq!(provider, "openai"),
        other => panic!("expected InvalidResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_batch_preserves_prompt_order_under_concurrency() {
    let server = MockServer::start().await;

    for (prompt, answer, delay_ms) in [("case-a", "A", 150), ("case-b", "B", 0), ("case-c", "C", 60)] {
        Mock::given(method("POST"))
            .and(body_string_contains(prompt))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion(answer))
                    .set_delay(Duration::from_millis(delay_ms)),
            )
            .mount(&server)
            .await;
    }

    let prompts = vec!["case-a".to_string(), "case-b".into(), "case-c".into()];
    let out = openai(&server, 3).complete_batch(&prompts).await.expect("batch");
    let texts: Vec<_> = out.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, ["A", "B", "C"]);
}

#[tokio::test]
async fn test_local_server_returns_reasoning_and_sampling_params() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer EMPTY"))
        .and(body_partial_json(json!({
            "model": "Qwen/Qwen3-8B",
            "temperature": 0.0,
            "max_tokens": 2048
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": {
                "content": "{\"final_diagnosis\": \"GERD\"}",
                "reasoning_content": "burning after meals"
            }}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LocalServerClient::new(
        "Qwen/Qwen3-8B".into(),
        &format!("{}/v1/", server.uri()),
        None,
        Duration::from_secs(5),
    )
    .expect("client")
    .with_sampling(0.0, Some(2048));

    let resp = client.complete("which?").await.expect("complete");
    assert_eq!(resp.text, "{\"final_diagnosis\": \"GERD\"}");
    assert_eq!(resp.reasoning.as_deref(), Some("burning after meals"));
    assert_eq!(resp.provider, "local");
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let client = LocalServerClient::new(
        "m".into(),
        "http://127.0.0.1:9/v1",
        Some("k".into()),
        Duration::from_secs(2),
    )
    .expect("client");

    let err = client.complete("x").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProviderError>(),
        Some(ProviderError::Network { .. })
    ));
}
