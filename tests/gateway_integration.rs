//! Integration tests for the agent gateway against mock HTTP servers.

use foundry::config::AgentConfig;
use foundry::gateway::{AgentGateway, ErrorKind, InferenceRequest};
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(uri: String) -> AgentGateway {
    AgentGateway::new(&AgentConfig {
        base_url: uri,
        timeout_seconds: 1,
    })
}

#[tokio::test]
async fn test_health_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "model_loaded": true,
            "config": {"model_path": "models/phi-2.gguf", "device": "cpu"}
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(mock_server.uri());
    let health = gateway.get_health().await.unwrap();

    assert_eq!(health.status, "healthy");
    assert!(health.model_loaded);
    assert_eq!(health.config["device"], "cpu");
}

#[tokio::test]
async fn test_non_json_200_is_protocol_error() {
    let mock_server = MockServer::start().await;

    // e.g. a captive portal or reverse proxy interstitial
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html><head><title>Please sign in</title></head></html>"),
        )
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(mock_server.uri());
    let error = gateway.get_health().await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Protocol);
}

#[tokio::test]
async fn test_wrong_shape_json_is_protocol_error() {
    let mock_server = MockServer::start().await;

    // valid JSON, but not the health shape
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2, 3])))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(mock_server.uri());
    let error = gateway.get_health().await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Protocol);
}

#[tokio::test]
async fn test_404_is_not_found() {
    let mock_server = MockServer::start().await;
    // nothing mounted: wiremock answers 404

    let gateway = gateway_for(mock_server.uri());
    let error = gateway.get_model_info().await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::NotFound);
    assert!(error.to_string().contains("/model-info"));
}

#[tokio::test]
async fn test_5xx_is_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/metrics"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(mock_server.uri());
    let error = gateway.get_metrics().await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ServerError);
}

#[tokio::test]
async fn test_other_status_keeps_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/inference"))
        .respond_with(ResponseTemplate::new(422).set_body_string("validation error"))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(mock_server.uri());
    let request = InferenceRequest {
        prompt: "hello".to_string(),
        max_tokens: 64,
        temperature: 0.7,
        model_id: None,
    };
    let error = gateway.run_inference(&request).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Other(422));
}

#[tokio::test]
async fn test_connection_refused_is_unreachable() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let gateway = gateway_for(uri);
    let error = gateway.get_health().await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Unreachable);
    assert!(error.to_string().contains("check the agent is running"));
}

#[tokio::test]
async fn test_slow_agent_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "healthy"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(mock_server.uri());
    let error = gateway.get_health().await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn test_inference_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/inference"))
        .and(body_json(serde_json::json!({
            "prompt": "hello",
            "max_tokens": 64,
            "temperature": 0.7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": "hi",
            "processing_time": 0.12,
            "model_info": {"model_path": "models/phi-2.gguf", "runtime": "llama.cpp"}
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(mock_server.uri());
    let request = InferenceRequest {
        prompt: "hello".to_string(),
        max_tokens: 64,
        temperature: 0.7,
        model_id: None,
    };
    let result = gateway.run_inference(&request).await.unwrap();

    assert_eq!(result.response, "hi");
    assert_eq!(result.processing_time, 0.12);
    assert_eq!(result.model_info["runtime"], "llama.cpp");
}

#[tokio::test]
async fn test_metrics_round_trip_preserves_record_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "summary": {
                "total_inferences": 2,
                "avg_latency_ms": 140.5,
                "avg_tokens_per_second": 21.0,
                "avg_memory_mb": 800.0,
                "last_inference": "2024-05-01T12:00:00",
                "first_inference": "2024-05-01T10:00:00"
            },
            "recent_records": [
                ["2024-05-01T12:00:00", 42, 153.2, 64, 18.5, 812.4, "m.gguf", 0.7, 64],
                ["2024-05-01T10:00:00", 10, 90.0, 8, 88.9, 500.0, null, null, null]
            ]
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(mock_server.uri());
    let metrics = gateway.get_metrics().await.unwrap();

    assert_eq!(metrics.summary.total_inferences, 2);
    assert_eq!(metrics.recent_records.len(), 2);
    // agent order, newest first, untouched
    assert_eq!(metrics.recent_records[0].timestamp(), "2024-05-01T12:00:00");
    assert_eq!(metrics.recent_records[1].timestamp(), "2024-05-01T10:00:00");
}

#[tokio::test]
async fn test_demo_model_pass_throughs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/demo-models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{"id": "phi-2", "name": "Phi-2"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/demo-models/phi-2/sample-prompts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "prompts": ["What is an eigenvalue?"]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/demo-models/current"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"model_id": "phi-2"})),
        )
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(mock_server.uri());

    let models = gateway.get_demo_models().await.unwrap();
    assert_eq!(models["models"][0]["id"], "phi-2");

    let prompts = gateway.get_sample_prompts("phi-2").await.unwrap();
    assert_eq!(prompts["prompts"][0], "What is an eigenvalue?");

    let current = gateway.get_current_demo_model().await.unwrap();
    assert_eq!(current["model_id"], "phi-2");
}
