use crate::config::Config;
use crate::db::SharedStore;
use crate::graphql::GraphqlService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub graphql: GraphqlService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: SharedStore, config: Arc<Config>) -> Self {
        Self {
            graphql: GraphqlService::new(store.clone(), &config),
            store,
            config,
        }
    }
}
