use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use marketplace_core::ServerDeps;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use crate::graphql::{self, AppSchema};

pub fn build_router(deps: Arc<ServerDeps>) -> Router {
    let allowed_origins = deps.file_config.server.allowed_origins.clone();
    let graphql_path = deps.file_config.server.graphql_path.clone();
    let schema = graphql::build_schema(deps);

    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route(&graphql_path, get(graphql_handler).post(graphql_handler))
        .route("/graphiql", get(graphiql_handler))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState {
            schema,
            graphql_path,
        })
}

#[derive(Clone)]
pub struct AppState {
    schema: AppSchema,
    graphql_path: String,
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    let response = state
        .schema
        .execute(req.into_inner())
        .instrument(tracing::info_span!("graphql_request"))
        .await;
    if !response.errors.is_empty() {
        tracing::warn!(errors = ?response.errors, "GraphQL errors");
    }
    response.into()
}

async fn graphiql_handler(State(state): State<AppState>) -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(&state.graphql_path).finish())
}

async fn health() -> &'static str {
    "ok"
}
