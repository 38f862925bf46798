//! Router-level tests over the in-memory store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use intake_api::{build_router, AppState};
use intake_core::repositories::OrganizationRepository;
use intake_core::{Organization, OrganizationKind, UserRole};
use intake_infrastructure::MemoryStore;
use intake_shared::config::AppConfig;

struct TestApp {
    router: Router,
    state: AppState,
    store: Arc<MemoryStore>,
}

impl TestApp {
    fn new() -> Self {
        let config = AppConfig::defaults().expect("default config");
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(config, store.clone(), store.clone(), store.clone());
        Self {
            router: build_router(state.clone()),
            state,
            store,
        }
    }

    async fn organization(&self, name: &str) -> Organization {
        let org = Organization::new(name.to_string(), OrganizationKind::Client, None).unwrap();
        OrganizationRepository::create(self.store.as_ref(), &org)
            .await
            .unwrap()
    }

    fn token(&self, organization_id: Option<Uuid>, role: UserRole) -> String {
        self.state
            .jwt
            .generate_access_token(&Uuid::new_v4(), organization_id.as_ref(), role.as_str())
            .unwrap()
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn upload(&self, token: &str, name: &str, category: &str) -> String {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/v1/documents",
                Some(token),
                Some(json!({
                    "name": name,
                    "url": format!("https://files.example.com/{}", name),
                    "size_bytes": 4096,
                    "media_kind": "PDF",
                    "category": category,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    async fn create_order(&self, token: &str, document_ids: &[&str]) -> (StatusCode, Value) {
        self.call(
            Method::POST,
            "/api/v1/orders",
            Some(token),
            Some(json!({ "document_ids": document_ids })),
        )
        .await
    }
}

fn document<'a>(order: &'a Value, id: &str) -> &'a Value {
    order["documents"]
        .as_array()
        .unwrap()
        .iter()
        .find(|doc| doc["id"] == id)
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/api/v1/orders", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new();
    let (status, _) = app
        .call(Method::GET, "/api/v1/orders", Some("not.a.jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_review_round_trip() {
    let app = TestApp::new();
    let org = app.organization("Acme Ltd").await;
    let client = app.token(Some(org.id), UserRole::Client);
    let operator = app.token(None, UserRole::EntryOperator);

    let d1 = app.upload(&client, "invoice-1.pdf", "SALES_INVOICE").await;
    let d2 = app.upload(&client, "statement-1.pdf", "BANK_STATEMENT").await;

    let (status, unassigned) = app
        .call(Method::GET, "/api/v1/documents/unassigned", Some(&client), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unassigned["data"].as_array().unwrap().len(), 2);

    // Create
    let (status, created) = app.create_order(&client, &[&d1, &d2]).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["data"]["order_number"], "ORD-000001");
    assert_eq!(created["data"]["status"], "PENDING");
    let order_id = created["data"]["id"].as_str().unwrap().to_string();

    // Operator queue
    let (status, queue) = app
        .call(Method::GET, "/api/v1/operator/orders", Some(&operator), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let queue = queue["data"].as_array().unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["client_name"], "Acme Ltd");
    assert_eq!(queue[0]["stats"]["total"], 2);
    assert_eq!(queue[0]["stats"]["pending"], 2);

    // Submit
    let submit_uri = format!("/api/v1/orders/{}/submit", order_id);
    let (status, submitted) = app.call(Method::POST, &submit_uri, Some(&operator), None).await;
    assert_eq!(status, StatusCode::OK, "{submitted}");
    assert_eq!(submitted["data"]["status"], "REVIEW_PENDING");

    let (_, pending) = app
        .call(Method::GET, "/api/v1/orders/review", Some(&client), None)
        .await;
    assert_eq!(pending["data"].as_array().unwrap().len(), 1);

    // Reject D2
    let review_uri = format!("/api/v1/orders/{}/review", order_id);
    let (status, reviewed) = app
        .call(
            Method::POST,
            &review_uri,
            Some(&client),
            Some(json!({
                "action": "REJECT_PARTIAL",
                "rejections": [{ "document_id": d2, "reason": "Blurry" }],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{reviewed}");
    assert_eq!(reviewed["data"]["status"], "RETURNED");
    assert_eq!(reviewed["data"]["approved"], 1);
    assert_eq!(reviewed["data"]["rejected"], 1);

    let order_uri = format!("/api/v1/orders/{}", order_id);
    let (_, detail) = app.call(Method::GET, &order_uri, Some(&client), None).await;
    let detail = &detail["data"];
    assert_eq!(detail["order"]["status"], "RETURNED");
    assert_eq!(document(detail, &d1)["approval_status"], "APPROVED");
    assert_eq!(document(detail, &d1)["status"], "COMPLETED");
    assert_eq!(document(detail, &d2)["approval_status"], "REJECTED");
    assert_eq!(document(detail, &d2)["status"], "RETURNED");
    assert_eq!(document(detail, &d2)["rejection_reason"], "Blurry");

    // Resubmit and approve everything
    let (status, _) = app.call(Method::POST, &submit_uri, Some(&operator), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, approved) = app
        .call(
            Method::POST,
            &review_uri,
            Some(&client),
            Some(json!({ "action": "APPROVE_ALL", "rejections": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{approved}");
    assert_eq!(approved["data"]["status"], "COMPLETED");
    assert_eq!(approved["data"]["approved"], 2);

    let (_, detail) = app.call(Method::GET, &order_uri, Some(&client), None).await;
    assert_eq!(document(&detail["data"], &d2)["approval_status"], "APPROVED");
    assert!(document(&detail["data"], &d2)["rejection_reason"].is_null());

    // Completed is terminal
    let (status, body) = app.call(Method::POST, &submit_uri, Some(&operator), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INVALID_STATUS_TRANSITION");

    let completed_uri = format!("/api/v1/orders/completed?organization_ids={}", org.id);
    let (_, completed) = app.call(Method::GET, &completed_uri, Some(&client), None).await;
    assert_eq!(completed["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_order_numbers_increase() {
    let app = TestApp::new();
    let org = app.organization("Acme Ltd").await;
    let client = app.token(Some(org.id), UserRole::Client);

    for expected in ["ORD-000001", "ORD-000002", "ORD-000003"] {
        let doc = app.upload(&client, "page.pdf", "SALES_INVOICE").await;
        let (status, body) = app.create_order(&client, &[&doc]).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["order_number"], expected);
    }

    let (_, mine) = app.call(Method::GET, "/api/v1/orders", Some(&client), None).await;
    let numbers: Vec<&str> = mine["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["order"]["order_number"].as_str().unwrap())
        .collect();
    assert_eq!(numbers.len(), 3);
    assert!(numbers.contains(&"ORD-000003"));
}

#[tokio::test]
async fn test_foreign_documents_not_attached() {
    let app = TestApp::new();
    let acme = app.organization("Acme Ltd").await;
    let globex = app.organization("Globex").await;
    let acme_client = app.token(Some(acme.id), UserRole::Client);
    let globex_client = app.token(Some(globex.id), UserRole::Client);

    let own = app.upload(&acme_client, "own.pdf", "SALES_INVOICE").await;
    let foreign = app.upload(&globex_client, "foreign.pdf", "SALES_INVOICE").await;

    let (status, created) = app.create_order(&acme_client, &[&own, &foreign]).await;
    assert_eq!(status, StatusCode::CREATED);
    let order_uri = format!("/api/v1/orders/{}", created["data"]["id"].as_str().unwrap());

    let (_, detail) = app.call(Method::GET, &order_uri, Some(&acme_client), None).await;
    let documents = detail["data"]["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["id"], own.as_str());

    let (_, unassigned) = app
        .call(Method::GET, "/api/v1/documents/unassigned", Some(&globex_client), None)
        .await;
    assert_eq!(unassigned["data"][0]["id"], foreign.as_str());
}

#[tokio::test]
async fn test_review_by_other_tenant_is_forbidden() {
    let app = TestApp::new();
    let acme = app.organization("Acme Ltd").await;
    let globex = app.organization("Globex").await;
    let acme_client = app.token(Some(acme.id), UserRole::Client);
    let intruder = app.token(Some(globex.id), UserRole::Client);
    let operator = app.token(None, UserRole::EntryOperator);

    let doc = app.upload(&acme_client, "a.pdf", "SALES_INVOICE").await;
    let (_, created) = app.create_order(&acme_client, &[&doc]).await;
    let order_id = created["data"]["id"].as_str().unwrap().to_string();
    app.call(
        Method::POST,
        &format!("/api/v1/orders/{}/submit", order_id),
        Some(&operator),
        None,
    )
    .await;

    let (status, body) = app
        .call(
            Method::POST,
            &format!("/api/v1/orders/{}/review", order_id),
            Some(&intruder),
            Some(json!({ "action": "APPROVE_ALL" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let (_, detail) = app
        .call(
            Method::GET,
            &format!("/api/v1/orders/{}", order_id),
            Some(&acme_client),
            None,
        )
        .await;
    assert_eq!(detail["data"]["order"]["status"], "REVIEW_PENDING");
    assert!(detail["data"]["documents"][0]["approval_status"].is_null());
}

#[tokio::test]
async fn test_failed_reviews_write_nothing() {
    let app = TestApp::new();
    let org = app.organization("Acme Ltd").await;
    let client = app.token(Some(org.id), UserRole::Client);
    let operator = app.token(None, UserRole::Admin);

    let d1 = app.upload(&client, "a.pdf", "SALES_INVOICE").await;
    let d2 = app.upload(&client, "b.pdf", "SALES_INVOICE").await;
    let (_, created) = app.create_order(&client, &[&d1, &d2]).await;
    let order_id = created["data"]["id"].as_str().unwrap().to_string();
    let review_uri = format!("/api/v1/orders/{}/review", order_id);

    // Review before submit
    let (status, _) = app
        .call(
            Method::POST,
            &review_uri,
            Some(&client),
            Some(json!({ "action": "APPROVE_ALL" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    app.call(
        Method::POST,
        &format!("/api/v1/orders/{}/submit", order_id),
        Some(&operator),
        None,
    )
    .await;

    let (status, body) = app
        .call(
            Method::POST,
            &review_uri,
            Some(&client),
            Some(json!({
                "action": "REJECT_PARTIAL",
                "rejections": [{ "document_id": d1, "reason": "   " }],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REJECTION_REASON");

    let (status, body) = app
        .call(
            Method::POST,
            &review_uri,
            Some(&client),
            Some(json!({
                "action": "REJECT_PARTIAL",
                "rejections": [{ "document_id": Uuid::new_v4(), "reason": "Missing page" }],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (_, detail) = app
        .call(
            Method::GET,
            &format!("/api/v1/orders/{}", order_id),
            Some(&client),
            None,
        )
        .await;
    assert_eq!(detail["data"]["order"]["status"], "REVIEW_PENDING");
    for doc in detail["data"]["documents"].as_array().unwrap() {
        assert!(doc["approval_status"].is_null());
        assert_eq!(doc["status"], "UPLOADED");
    }
}

#[tokio::test]
async fn test_operator_queue_hidden_from_clients() {
    let app = TestApp::new();
    let org = app.organization("Acme Ltd").await;
    let client = app.token(Some(org.id), UserRole::Client);

    let doc = app.upload(&client, "a.pdf", "SALES_INVOICE").await;
    app.create_order(&client, &[&doc]).await;

    let (status, body) = app
        .call(Method::GET, "/api/v1/operator/orders", Some(&client), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}
