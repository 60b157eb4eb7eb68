use async_graphql::extensions::Tracing;
use async_graphql::{EmptySubscription, Request, Response, Schema};

use crate::config::Config;
use crate::db::SharedStore;
use crate::graphql::graph::QueryRoot;
use crate::graphql::loaders::Loaders;
use crate::graphql::mutation::MutationRoot;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Bare schema without per-request loaders. Execute through [`GraphqlService`].
pub(crate) fn create_schema(store: SharedStore, config: &Config) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store) // store handle shared by every resolver
        .limit_depth(config.graphql_depth_limit)
        .limit_complexity(config.graphql_complexity_limit)
        .extension(Tracing)
        .finish()
}

/// The schema, built once at startup, plus the store it resolves against.
#[derive(Clone)]
pub struct GraphqlService {
    schema: AppSchema,
    store: SharedStore,
}

impl GraphqlService {
    pub fn new(store: SharedStore, config: &Config) -> Self {
        Self {
            schema: create_schema(store.clone(), config),
            store,
        }
    }

    /// Runs one request with its own set of batch loaders.
    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        let request = request.into().data(Loaders::new(self.store.clone()));
        self.schema.execute(request).await
    }

    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreKind;
    use crate::db::models::{NewPost, NewUser};
    use crate::db::{DataStore, MemoryStore};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn service_resolves_nested_fields() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let alice = store
            .create_user(NewUser { name: "Alice".into(), balance: 1.0 })
            .await
            .unwrap();
        store
            .create_post(NewPost {
                title: "Hello".into(),
                content: "World".into(),
                author_id: alice.id,
            })
            .await
            .unwrap();

        let config = Config {
            data_store: StoreKind::Memory,
            ..Config::default()
        };
        let service = GraphqlService::new(store, &config);
        let response = service
            .execute("{ users { name posts { title author { name } } profile { id } } }")
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({ "users": [{
                "name": "Alice",
                "posts": [{ "title": "Hello", "author": { "name": "Alice" } }],
                "profile": null
            }] })
        );
    }
}
