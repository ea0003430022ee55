use super::harness::{GatewayTestServer, chat_reply};
use reqwest::StatusCode;
use serde_json::Value;
use solution_explorer::config::RouteConfig;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn health_and_catalog_listing() {
    let upstream = MockServer::start().await;
    let server = GatewayTestServer::start(&upstream).await;
    let client = reqwest::Client::new();

    let health: Value = client
        .get(server.url("/health"))
        .send()
        .await
        .expect("health request should complete")
        .json()
        .await
        .expect("health should be json");
    assert_eq!(health["status"], "ok");

    let listing: Value = client
        .get(server.url("/api/solutions?q=image"))
        .send()
        .await
        .expect("list request should complete")
        .json()
        .await
        .expect("listing should be json");
    let ids: Vec<u64> = listing["solutions"]
        .as_array()
        .expect("solutions should be an array")
        .iter()
        .filter_map(|s| s["id"].as_u64())
        .collect();
    assert_eq!(ids, vec![2, 3, 4]);
    assert_eq!(listing["tags"].as_array().map(Vec::len), Some(10));
}

#[tokio::test]
async fn chat_run_calls_upstream_with_selected_model() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "model": "deepseek-ai/DeepSeek-R1-Distill-Llama-70B-free",
            "messages": [{"role": "user", "content": "What is Rust?"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("A language.")))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = GatewayTestServer::start(&upstream).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/solutions/1/run"))
        .json(&serde_json::json!({
            "input": "What is Rust?",
            "model": "deepseek-ai/DeepSeek-R1-Distill-Llama-70B-free"
        }))
        .send()
        .await
        .expect("run request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("run output should be json");
    assert_eq!(body["kind"], "chat");
    assert_eq!(body["result"]["text"], "A language.");
}

#[tokio::test]
async fn routing_run_classifies_then_executes() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "model": "router/model",
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(
            r#"{"route": "route/coder", "reason": "It asks for code."}"#,
        )))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({"model": "route/coder"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("fn main() {}")))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = GatewayTestServer::start_with(&upstream, |config| {
        config.models.router_model = "router/model".into();
        config.models.routes = RouteConfig::from_iter([
            ("route/coder", "Best for code"),
            ("route/writer", "Best for stories"),
        ]);
    })
    .await;

    let response = reqwest::Client::new()
        .post(server.url("/api/solutions/6/run"))
        .json(&serde_json::json!({"input": "Write a hello world program"}))
        .send()
        .await
        .expect("run request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("run output should be json");
    assert_eq!(body["kind"], "routes");
    let routed = &body["result"][0];
    assert_eq!(routed["prompt"], "Write a hello world program");
    assert_eq!(routed["output"]["selection"]["route"], "route/coder");
    assert_eq!(routed["output"]["response"], "fn main() {}");
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway_without_secrets() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("internal failure for sk-test-key"),
        )
        .mount(&upstream)
        .await;
    let server = GatewayTestServer::start(&upstream).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/solutions/5/run"))
        .json(&serde_json::json!({"input": "Sally"}))
        .send()
        .await
        .expect("run request should complete");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.expect("error should be json");
    assert_eq!(body["error"], "Error fetching response.");
    assert!(!body.to_string().contains("sk-test-key"));
}

#[tokio::test]
async fn blank_input_is_rejected_before_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("unused")))
        .expect(0)
        .mount(&upstream)
        .await;
    let server = GatewayTestServer::start(&upstream).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/solutions/7/run"))
        .json(&serde_json::json!({"input": "  \n "}))
        .send()
        .await
        .expect("run request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_image_url_is_rejected() {
    let upstream = MockServer::start().await;
    let server = GatewayTestServer::start(&upstream).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/solutions/3/run"))
        .json(&serde_json::json!({"input": "ftp://example.com/cat.png"}))
        .send()
        .await
        .expect("run request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(upstream.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn unknown_solution_is_not_found() {
    let upstream = MockServer::start().await;
    let server = GatewayTestServer::start(&upstream).await;

    let response = reqwest::Client::new()
        .get(server.url("/api/solutions/404"))
        .send()
        .await
        .expect("get request should complete");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("error should be json");
    assert_eq!(body["error"], "Solution not found");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let upstream = MockServer::start().await;
    let server = GatewayTestServer::start(&upstream).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/solutions/1/run"))
        .json(&serde_json::json!({"input": "x".repeat(70_000)}))
        .send()
        .await
        .expect("oversized request should complete");

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
