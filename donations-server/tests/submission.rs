//! End-to-end tests of `POST /donation` against the in-memory store

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use donations_server::store::DonationId;
use donations_server::{build_router, AppState, MemoryStore, WriteMode};

fn app(store: Arc<MemoryStore>, mode: WriteMode) -> Router {
    build_router(AppState::new(store, mode), &[])
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/donation")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn single_item_submission_is_stored() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) = post_json(
        app(store.clone(), WriteMode::Independent),
        json!({"nome": "Ana", "items": [{"nome_item": "Rice", "quantidade": 5, "unidade": "kg"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(!body["message"].as_str().unwrap().is_empty());

    let donations = store.donations();
    assert_eq!(donations.len(), 1);
    let donor = &donations[0].donor;
    assert_eq!(donor.nome, "Ana");
    assert_eq!(donor.endereco, "");
    assert_eq!(donor.cep, "");
    assert_eq!(donor.obs, "");

    let items = store.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].donation_id, donations[0].id);
    assert_eq!(items[0].nome_item, "Rice");
    assert_eq!(items[0].quantidade.as_f64(), 5.0);
    assert_eq!(items[0].unidade, "kg");
}

#[tokio::test]
async fn every_item_references_the_new_donation() {
    let store = Arc::new(MemoryStore::new());
    let items: Vec<Value> = (1..=6)
        .map(|n| json!({"nome_item": format!("item {n}"), "quantidade": n, "unidade": "un"}))
        .collect();

    let (status, _) = post_json(
        app(store.clone(), WriteMode::Independent),
        json!({ "items": items }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let donation_id = store.donations()[0].id;
    assert_eq!(store.items().len(), 6);
    assert!(store.items().iter().all(|item| item.donation_id == donation_id));
}

#[tokio::test]
async fn empty_items_are_rejected_without_writes() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) =
        post_json(app(store.clone(), WriteMode::Independent), json!({"items": []})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Nenhum item enviado.");
    assert!(store.donations().is_empty());
}

#[tokio::test]
async fn missing_or_non_array_items_are_rejected() {
    for body in [json!({"nome": "Ana"}), json!({"items": "arroz"}), json!({"items": null})] {
        let store = Arc::new(MemoryStore::new());
        let (status, response) = post_json(app(store.clone(), WriteMode::Independent), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "Nenhum item enviado.");
        assert!(store.donations().is_empty());
    }
}

#[tokio::test]
async fn item_without_unit_is_rejected_without_writes() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) = post_json(
        app(store.clone(), WriteMode::Independent),
        json!({"items": [{"nome_item": "Beans", "quantidade": 2}]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Cada item precisa ter nome, quantidade e unidade.");
    assert!(store.donations().is_empty());
    assert!(store.items().is_empty());
}

#[tokio::test]
async fn one_invalid_item_blocks_the_valid_ones() {
    let store = Arc::new(MemoryStore::new());
    let (status, _) = post_json(
        app(store.clone(), WriteMode::Independent),
        json!({"items": [
            {"nome_item": "Arroz", "quantidade": 5, "unidade": "kg"},
            {"nome_item": "Leite", "quantidade": 0, "unidade": "l"}
        ]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.donations().is_empty());
    assert!(store.items().is_empty());
}

#[tokio::test]
async fn failing_second_item_leaves_partial_donation() {
    let store = Arc::new(MemoryStore::new().fail_item_attempt(2));
    let (status, body) = post_json(
        app(store.clone(), WriteMode::Independent),
        json!({"nome": "Ana", "items": [
            {"nome_item": "Arroz", "quantidade": 5, "unidade": "kg"},
            {"nome_item": "Feijão", "quantidade": 2, "unidade": "kg"}
        ]}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Erro interno ao salvar a doação.");

    let donations = store.donations();
    assert_eq!(donations.len(), 1);
    assert_eq!(store.items_for(donations[0].id).len(), 1);
}

#[tokio::test]
async fn atomic_mode_keeps_nothing_on_item_failure() {
    let store = Arc::new(MemoryStore::new().fail_item_attempt(2));
    let (status, _) = post_json(
        app(store.clone(), WriteMode::Atomic),
        json!({"items": [
            {"nome_item": "Arroz", "quantidade": 5, "unidade": "kg"},
            {"nome_item": "Feijão", "quantidade": 2, "unidade": "kg"}
        ]}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(store.donations().is_empty());
    assert!(store.items().is_empty());
}

#[tokio::test]
async fn store_outage_is_generic_500() {
    let store = Arc::new(MemoryStore::new().fail_donation_insert());
    let (status, body) = post_json(
        app(store.clone(), WriteMode::Independent),
        json!({"items": [{"nome_item": "Arroz", "quantidade": 1, "unidade": "kg"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Erro interno ao salvar a doação.");
    assert!(!body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn malformed_json_is_400_envelope() {
    let store = Arc::new(MemoryStore::new());
    let request = Request::builder()
        .method("POST")
        .uri("/donation")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"items\": ["))
        .unwrap();

    let (status, body) = send(app(store.clone(), WriteMode::Independent), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(store.donations().is_empty());
}

#[tokio::test]
async fn top_level_array_counts_as_no_items() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) = post_json(app(store.clone(), WriteMode::Independent), json!([1])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Nenhum item enviado.");
    assert!(store.donations().is_empty());
}

#[tokio::test]
async fn scalar_body_is_malformed() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) =
        post_json(app(store.clone(), WriteMode::Independent), json!("arroz")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Requisição JSON inválida.");
    assert!(store.donations().is_empty());
}

#[tokio::test]
async fn body_without_json_content_type_counts_as_no_items() {
    let store = Arc::new(MemoryStore::new());
    let request = Request::builder()
        .method("POST")
        .uri("/donation")
        .body(Body::from("nome=Ana"))
        .unwrap();

    let (status, body) = send(app(store.clone(), WriteMode::Independent), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Nenhum item enviado.");
}

#[tokio::test]
async fn numeric_address_fields_are_stored_as_text() {
    let store = Arc::new(MemoryStore::new());
    let (status, _) = post_json(
        app(store.clone(), WriteMode::Independent),
        json!({"numero": 120, "cep": "50000-000", "items": [
            {"nome_item": "Arroz", "quantidade": "2.5", "unidade": "kg"}
        ]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let donation = &store.donations()[0];
    assert_eq!(donation.id, DonationId(1));
    assert_eq!(donation.donor.numero, "120");
    assert_eq!(donation.donor.cep, "50000-000");
    assert_eq!(store.items()[0].quantidade.as_str(), "2.5");
}

#[tokio::test]
async fn root_is_plain_text_liveness() {
    let store = Arc::new(MemoryStore::new());
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app(store, WriteMode::Independent).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Backend funcionando!");
}

#[tokio::test]
async fn health_reports_version() {
    let store = Arc::new(MemoryStore::new());
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(store, WriteMode::Independent), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
