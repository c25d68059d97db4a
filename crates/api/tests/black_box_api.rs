use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use storefront_api::app::{AppServices, build_app, services::demo_catalog};
use storefront_catalog::{HttpCatalog, InMemoryCatalog};
use storefront_checkout::CheckoutConfig;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(services: AppServices) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = build_app(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn demo() -> Self {
        Self::spawn(AppServices::in_memory(
            Arc::new(demo_catalog()),
            CheckoutConfig::default(),
        ))
        .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn get_json(client: &reqwest::Client, url: String) -> (StatusCode, Value) {
    let res = client.get(url).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn health_is_ok_and_carries_request_id() {
    let server = TestServer::demo().await;
    let res = reqwest::get(server.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn incoming_request_id_is_echoed() {
    let server = TestServer::demo().await;
    let id = "0190b6a4-3c5e-7000-8000-000000000001";
    let res = reqwest::Client::new()
        .get(server.url("/health"))
        .header("x-request-id", id)
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], id);
}

#[tokio::test]
async fn checkout_ready_with_explicit_discount() {
    let server = TestServer::demo().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, server.url("/checkout/1?discount=20")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "discount": 20.0,
            "outcome": {
                "status": "ready",
                "title": "Backpack",
                "original": 109.95,
                "discounted": 87.96
            }
        })
    );
}

#[tokio::test]
async fn checkout_uses_default_discount() {
    let server = TestServer::demo().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, server.url("/checkout/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["discount"], 15.0);
    assert_eq!(body["outcome"]["discounted"], 93.46);
}

#[tokio::test]
async fn checkout_out_of_stock_and_not_found_are_200() {
    let server = TestServer::demo().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, server.url("/checkout/42?discount=50")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], json!({"status": "out_of_stock", "title": "Ghost Item"}));

    let (status, body) = get_json(&client, server.url("/checkout/9999")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], json!({"status": "not_found", "id": 9999}));
}

#[tokio::test]
async fn checkout_rejects_bad_input() {
    let server = TestServer::demo().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, server.url("/checkout/1?discount=101")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = get_json(&client, server.url("/checkout/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn unreachable_catalog_checks_out_as_not_found() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let server = TestServer::spawn(AppServices::http(
        HttpCatalog::new(dead),
        CheckoutConfig::default(),
    ))
    .await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, server.url("/checkout/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], json!({"status": "not_found", "id": 1}));

    // Listing has no outcome type to fold into, so the failure surfaces.
    let (status, body) = get_json(&client, server.url("/products")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "catalog_unavailable");
}

#[tokio::test]
async fn batch_checkout_correlates_ids() {
    let server = TestServer::demo().await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/checkout/batch"))
        .json(&json!({"ids": [42, 1, 9999], "discount": 20}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["id"], 42);
    assert_eq!(results[0]["outcome"]["status"], "out_of_stock");
    assert_eq!(results[1]["id"], 1);
    assert_eq!(results[1]["outcome"]["discounted"], 87.96);
    assert_eq!(results[2]["outcome"], json!({"status": "not_found", "id": 9999}));
}

#[tokio::test]
async fn batch_checkout_validates_discount() {
    let server = TestServer::demo().await;
    let res = reqwest::Client::new()
        .post(server.url("/checkout/batch"))
        .json(&json!({"ids": [1], "discount": -5}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn products_list_sorts_and_cheapest_matches() {
    let server = TestServer::demo().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, server.url("/products?sort=price&order=desc")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![4, 1, 3, 2, 42]);

    let (status, body) = get_json(&client, server.url("/products/cheapest")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 42);

    let (status, body) = get_json(&client, server.url("/products?sort=weight")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn product_lookup_and_patch() {
    let server = TestServer::demo().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, server.url("/products/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Backpack");
    assert_eq!(body["rating"]["count"], 230);

    let (status, _) = get_json(&client, server.url("/products/9999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Restock the ghost item, then it checks out.
    let res = client
        .patch(server.url("/products/42"))
        .json(&json!({"availability": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let (_, body) = get_json(&client, server.url("/checkout/42?discount=0")).await;
    assert_eq!(body["outcome"]["status"], "ready");
    assert_eq!(body["outcome"]["discounted"], 10.0);
}

#[tokio::test]
async fn patch_rejected_for_read_only_catalog() {
    let server = TestServer::spawn(AppServices::http(
        HttpCatalog::new("http://127.0.0.1:9"),
        CheckoutConfig::default(),
    ))
    .await;

    let res = reqwest::Client::new()
        .patch(server.url("/products/1"))
        .json(&json!({"title": "New title"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn empty_catalog_has_no_cheapest_item() {
    let server = TestServer::spawn(AppServices::in_memory(
        Arc::new(InMemoryCatalog::new()),
        CheckoutConfig::default(),
    ))
    .await;

    let res = reqwest::get(server.url("/products/cheapest")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

async fn send_json(request: reqwest::RequestBuilder, body: Value) -> (StatusCode, Value) {
    let res = request.json(&body).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn malformed_batch_bodies_get_json_400() {
    let server = TestServer::demo().await;
    let client = reqwest::Client::new();
    let url = server.url("/checkout/batch");

    for body in [
        json!({"ids": [-1]}),
        json!({"ids": [1], "discount": "abc"}),
        json!({"discount": 20}),
    ] {
        let (status, err) = send_json(client.post(&url), body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(err["error"], "validation_error", "body {body}");
        assert!(err["message"].as_str().is_some_and(|m| !m.is_empty()));
    }
}

#[tokio::test]
async fn malformed_patch_bodies_get_json_400() {
    let server = TestServer::demo().await;
    let client = reqwest::Client::new();
    let url = server.url("/products/1");

    for body in [json!({"price": -5}), json!({"colour": "red"})] {
        let (status, err) = send_json(client.patch(&url), body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(err["error"], "validation_error", "body {body}");
    }

    // Nothing was applied.
    let (_, product) = get_json(&client, server.url("/products/1")).await;
    assert_eq!(product["price"], 109.95);
}

#[tokio::test]
async fn fractional_discount_over_http() {
    let server = TestServer::demo().await;
    let client = reqwest::Client::new();

    // 109.95 * (1 - 12.345 / 100) = 96.3766.. -> 96.38
    let (status, body) = get_json(&client, server.url("/checkout/1?discount=12.345")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["discount"], 12.345);
    assert_eq!(body["outcome"]["discounted"], 96.38);
}
