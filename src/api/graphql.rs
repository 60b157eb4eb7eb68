use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::app_state::AppState;

pub fn graphql_routes() -> Router<AppState> {
    Router::new()
        .route("/graphql", get(graphql_playground).post(graphql_handler))
        .route("/graphql/sdl", get(graphql_sdl))
}

pub async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.graphql.execute(req.into_inner()).await.into()
}

async fn graphql_playground(State(state): State<AppState>) -> Response {
    if !state.config.graphql_playground {
        return StatusCode::NOT_FOUND.into_response();
    }

    Html(GraphiQLSource::build().endpoint("/graphql").finish()).into_response()
}

async fn graphql_sdl(State(state): State<AppState>) -> String {
    state.graphql.sdl()
}
