//! End-to-end over HTTP: the real router on an ephemeral port.

mod common;

use member_graph::api;
use member_graph::app_state::AppState;
use member_graph::db::{MemoryStore, SharedStore};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

async fn spawn_app() -> SocketAddr {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let state = AppState::new(store, Arc::new(common::memory_config()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, api::app(state)).await.unwrap();
    });

    addr
}

async fn graphql(addr: SocketAddr, body: Value) -> Value {
    reqwest::Client::new()
        .post(format!("http://{addr}/graphql"))
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn create_and_fetch_user_over_http() {
    let addr = spawn_app().await;

    let created = graphql(
        addr,
        json!({
            "query": "mutation($dto: CreateUserInput!) { createUser(dto: $dto) { id name balance } }",
            "variables": { "dto": { "name": "Alice", "balance": 100 } }
        }),
    )
    .await;
    assert!(created.get("errors").is_none(), "{created}");
    let id = created["data"]["createUser"]["id"].as_str().unwrap().to_string();
    assert!(common::is_uuid_format(&id));

    let fetched = graphql(
        addr,
        json!({
            "query": "query($id: UUID!) { user(id: $id) { name balance } }",
            "variables": { "id": id }
        }),
    )
    .await;
    assert_eq!(fetched, json!({ "data": { "user": { "name": "Alice", "balance": 100.0 } } }));
}

#[tokio::test]
async fn invalid_uuid_lands_in_errors() {
    let addr = spawn_app().await;
    let response = graphql(addr, json!({ "query": "{ user(id: \"nope\") { id } }" })).await;

    assert!(response["errors"].as_array().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn health_and_sdl_endpoints() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();

    let live = client.get(format!("http://{addr}/health/live")).send().await.unwrap();
    assert_eq!(live.status(), reqwest::StatusCode::OK);

    let ready: Value = client
        .get(format!("http://{addr}/health/ready"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ready["success"], json!(true));

    let sdl = client
        .get(format!("http://{addr}/graphql/sdl"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(sdl.contains("type Query"));

    let playground = client.get(format!("http://{addr}/graphql")).send().await.unwrap();
    assert_eq!(playground.status(), reqwest::StatusCode::OK);
}
