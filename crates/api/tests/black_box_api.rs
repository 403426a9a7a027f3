use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use storefront_api::app::services::AppServices;
use storefront_products::ProductStore;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Spawn the production router (seeded store) on an ephemeral port.
    async fn spawn() -> Self {
        Self::serve(storefront_api::app::build_app()).await
    }

    async fn spawn_with(services: Arc<AppServices>) -> Self {
        Self::serve(storefront_api::app::build_app_with_services(services)).await
    }

    async fn serve(app: axum::Router) -> Self {
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

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn body_json(res: reqwest::Response) -> serde_json::Value {
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_ok_and_carries_request_id() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let request_id = res.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn list_returns_seed_products_in_envelope() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/api/products/list")).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["status"], 200);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], 1);
    assert_eq!(data[0]["name"], "Product1");
    assert_eq!(data[0]["price"].as_f64(), Some(10.0));
    assert_eq!(data[1]["id"], 2);
    assert_eq!(data[1]["name"], "Product2");
}

#[tokio::test]
async fn list_filters_by_name() {
    let srv = TestServer::spawn().await;

    let body = body_json(reqwest::get(srv.url("/api/products/list?name=Product1")).await.unwrap()).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Product1");

    let body = body_json(reqwest::get(srv.url("/api/products/list?name=")).await.unwrap()).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let body = body_json(reqwest::get(srv.url("/api/products/list?name=missing")).await.unwrap()).await;
    assert_eq!(body["status"], 200);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn get_existing_and_missing_product() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/api/products/2")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"]["id"], 2);
    assert_eq!(body["data"]["name"], "Product2");

    let res = reqwest::get(srv.url("/api/products/999")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = body_json(res).await;
    assert_eq!(body, json!({ "status": 404, "error": "Product not found" }));
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/api/products/abc")).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "invalid product id");
}

#[tokio::test]
async fn create_assigns_next_id_and_location() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/products"))
        .json(&json!({ "name": "Widget", "price": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(
        res.headers().get("location").unwrap().to_str().unwrap(),
        "/api/products/3"
    );
    let body = body_json(res).await;
    assert_eq!(body["status"], 201);
    assert_eq!(body["data"]["id"], 3);
    assert_eq!(body["data"]["name"], "Widget");
    assert_eq!(body["data"]["price"].as_f64(), Some(5.0));

    let res = reqwest::get(srv.url("/api/products/3")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["data"]["name"], "Widget");
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/products"))
        .json(&json!({ "id": 42, "name": "Gadget", "price": 2.5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = body_json(res).await;
    assert_eq!(body["data"]["id"], 3);
    assert_eq!(body["data"]["price"].as_f64(), Some(2.5));
}

#[tokio::test]
async fn create_reports_all_validation_errors() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/products"))
        .json(&json!({ "name": "", "price": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["status"], 400);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], "name");
    assert_eq!(errors[0]["message"], "Name is required.");
    assert_eq!(errors[1]["field"], "price");
    assert_eq!(errors[1]["message"], "Price must be greater than zero.");

    // Missing fields behave like empty ones.
    let res = client
        .post(srv.url("/api/products"))
        .json(&json!({ "name": "Widget" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["message"], "Price must be greater than zero.");

    // Store unchanged.
    let body = body_json(reqwest::get(srv.url("/api/products/list")).await.unwrap()).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/products"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["status"], 400);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn update_validates_then_overwrites() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Invalid payload: rejected, product 1 untouched.
    let res = client
        .put(srv.url("/api/products/1"))
        .json(&json!({ "name": "", "price": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["errors"][0]["message"], "Name is required.");

    let body = body_json(reqwest::get(srv.url("/api/products/1")).await.unwrap()).await;
    assert_eq!(body["data"]["name"], "Product1");

    // Validation runs before the existence check.
    let res = client
        .put(srv.url("/api/products/999"))
        .json(&json!({ "name": "", "price": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .put(srv.url("/api/products/999"))
        .json(&json!({ "name": "Valid", "price": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .put(srv.url("/api/products/1"))
        .json(&json!({ "name": "Renamed", "price": 12.75 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "Renamed");
    assert_eq!(body["data"]["price"].as_f64(), Some(12.75));
}

#[tokio::test]
async fn patch_only_changes_meaningful_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .patch(srv.url("/api/products/1"))
        .json(&json!({ "name": "", "price": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["data"]["name"], "Product1");
    assert_eq!(body["data"]["price"].as_f64(), Some(10.0));

    let res = client
        .patch(srv.url("/api/products/1"))
        .json(&json!({ "price": 11 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["data"]["name"], "Product1");
    assert_eq!(body["data"]["price"].as_f64(), Some(11.0));

    let res = client
        .patch(srv.url("/api/products/999"))
        .json(&json!({ "name": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = body_json(res).await;
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.delete(srv.url("/api/products/2")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.text().await.unwrap().is_empty());

    let res = reqwest::get(srv.url("/api/products/2")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.delete(srv.url("/api/products/2")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn handlers_share_the_injected_store() {
    let store = Arc::new(ProductStore::new());
    let services = Arc::new(AppServices::new(store.clone()));
    let srv = TestServer::spawn_with(services).await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/products"))
        .json(&json!({ "name": "First", "price": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = body_json(res).await;
    assert_eq!(body["data"]["id"], 1);

    assert_eq!(store.len(), 1);
    assert_eq!(store.list(Some("First")).len(), 1);
}

#[tokio::test]
async fn blank_names_fail_create_and_update() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/products"))
        .json(&json!({ "name": "   ", "price": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "name");
    assert_eq!(errors[0]["message"], "Name is required.");

    let res = client
        .put(srv.url("/api/products/1"))
        .json(&json!({ "name": " ", "price": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["errors"][0]["message"], "Name is required.");

    let body = body_json(reqwest::get(srv.url("/api/products/list")).await.unwrap()).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["name"], "Product1");
}

#[tokio::test]
async fn price_round_trips_without_precision_loss() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/products"))
        .header("content-type", "application/json")
        .body(r#"{"name":"x","price":1234567890.123456789}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let text = res.text().await.unwrap();
    assert!(text.contains(r#""price":1234567890.123456789"#), "body was {text}");

    let text = reqwest::get(srv.url("/api/products/3"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(text.contains(r#""price":1234567890.123456789"#), "body was {text}");
}

#[tokio::test]
async fn wrong_value_type_is_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (method, path) in [
        (reqwest::Method::POST, "/api/products"),
        (reqwest::Method::PUT, "/api/products/1"),
        (reqwest::Method::PATCH, "/api/products/1"),
    ] {
        let res = client
            .request(method.clone(), srv.url(path))
            .json(&json!({ "name": "x", "price": "abc" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{method} {path}");
        let body = body_json(res).await;
        assert_eq!(body["status"], 400);
        assert!(body["error"].is_string());
    }

    let body = body_json(reqwest::get(srv.url("/api/products/1")).await.unwrap()).await;
    assert_eq!(body["data"]["name"], "Product1");
}

#[tokio::test]
async fn bad_query_string_uses_error_envelope() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/api/products/list?name=a&name=b"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["status"], 400);
    assert!(body["error"].is_string());
}
