use super::harness::{GatewayTestServer, chat_reply, form_body};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn index_lists_catalog_and_filters_by_tag() {
    let upstream = MockServer::start().await;
    let server = GatewayTestServer::start(&upstream).await;
    let client = reqwest::Client::new();

    let all = client
        .get(server.url("/"))
        .send()
        .await
        .expect("index request should complete")
        .text()
        .await
        .expect("index should have a body");
    for id in 1..=8 {
        assert!(all.contains(&format!("href=\"/solutions/{id}\"")), "{id}");
    }

    let workflows = client
        .get(server.url("/?tags=Workflow"))
        .send()
        .await
        .expect("filtered index request should complete")
        .text()
        .await
        .expect("filtered index should have a body");
    assert!(workflows.contains("href=\"/solutions/5\""));
    assert!(!workflows.contains("href=\"/solutions/1\""));
}

#[tokio::test]
async fn unknown_page_is_not_found() {
    let upstream = MockServer::start().await;
    let server = GatewayTestServer::start(&upstream).await;

    let response = reqwest::Client::new()
        .get(server.url("/solutions/999"))
        .send()
        .await
        .expect("page request should complete");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = response.text().await.expect("page should have a body");
    assert!(html.contains("Solution not found"));
}

#[tokio::test]
async fn chain_form_renders_every_step() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("$10")))
        .expect(3)
        .mount(&upstream)
        .await;
    let server = GatewayTestServer::start(&upstream).await;

    let response = reqwest::Client::new()
        .post(server.url("/solutions/5"))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(form_body(&[("input", "Sally earns $12 an hour.")]))
        .send()
        .await
        .expect("form submit should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.expect("page should have a body");
    for step in 1..=3 {
        assert!(html.contains(&format!("Response {step}:")), "step {step}");
    }
    assert!(html.contains("Sally earns $12 an hour."));
}

#[tokio::test]
async fn failing_form_shows_generic_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&upstream)
        .await;
    let server = GatewayTestServer::start(&upstream).await;

    let response = reqwest::Client::new()
        .post(server.url("/solutions/1"))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(form_body(&[("input", "hello")]))
        .send()
        .await
        .expect("form submit should complete");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = response.text().await.expect("page should have a body");
    assert!(html.contains("Error fetching response."));
    assert!(!html.contains("overloaded"));
}
