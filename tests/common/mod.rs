//! Shared harness: a GraphQL service over a fresh in-memory store.

#![allow(dead_code)]

use async_graphql::{Request, Variables};
use member_graph::config::{Config, StoreKind};
use member_graph::db::{MemoryStore, SharedStore};
use member_graph::graphql::GraphqlService;
use serde_json::Value;
use std::sync::Arc;

pub const NIL_ID: &str = "00000000-0000-0000-0000-000000000000";

pub struct TestApi {
    pub service: GraphqlService,
    pub store: SharedStore,
}

pub fn memory_config() -> Config {
    Config {
        data_store: StoreKind::Memory,
        ..Config::default()
    }
}

impl TestApi {
    pub fn new() -> Self {
        let store: SharedStore = Arc::new(MemoryStore::new());
        Self {
            service: GraphqlService::new(store.clone(), &memory_config()),
            store,
        }
    }

    /// Executes and returns `(data, error messages)`.
    pub async fn run(&self, query: &str, variables: Value) -> (Value, Vec<String>) {
        let request = Request::new(query).variables(Variables::from_json(variables));
        let response = self.service.execute(request).await;
        let errors = response.errors.iter().map(|e| e.message.clone()).collect();
        let data = response.data.into_json().expect("response data is JSON");
        (data, errors)
    }

    /// Executes and panics on any GraphQL error.
    pub async fn ok(&self, query: &str, variables: Value) -> Value {
        let (data, errors) = self.run(query, variables).await;
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        data
    }

    pub async fn create_user(&self, name: &str, balance: f64) -> String {
        let data = self
            .ok(
                "mutation($dto: CreateUserInput!) { createUser(dto: $dto) { id } }",
                serde_json::json!({ "dto": { "name": name, "balance": balance } }),
            )
            .await;
        data["createUser"]["id"].as_str().unwrap().to_string()
    }

    pub async fn create_post(&self, author_id: &str, title: &str) -> String {
        let data = self
            .ok(
                "mutation($dto: CreatePostInput!) { createPost(dto: $dto) { id } }",
                serde_json::json!({
                    "dto": { "title": title, "content": format!("{title} body"), "authorId": author_id }
                }),
            )
            .await;
        data["createPost"]["id"].as_str().unwrap().to_string()
    }

    pub async fn create_profile(&self, user_id: &str, member_type: &str) -> String {
        let data = self
            .ok(
                "mutation($dto: CreateProfileInput!) { createProfile(dto: $dto) { id } }",
                serde_json::json!({
                    "dto": {
                        "isMale": true,
                        "yearOfBirth": 1991,
                        "userId": user_id,
                        "memberTypeId": member_type
                    }
                }),
            )
            .await;
        data["createProfile"]["id"].as_str().unwrap().to_string()
    }
}

pub fn is_uuid_format(text: &str) -> bool {
    text.len() == 36
        && text.char_indices().all(|(i, c)| match i {
            8 | 13 | 18 | 23 => c == '-',
            _ => c.is_ascii_hexdigit(),
        })
}
