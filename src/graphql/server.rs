use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::{
    Router,
    response::{Html, IntoResponse},
    routing::get,
};

use super::AsanaSchema;

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/").finish())
}

pub fn router(schema: AsanaSchema) -> Router {
    Router::new().route("/", get(graphiql).post_service(GraphQL::new(schema)))
}

/// Serve the GraphQL API and GraphiQL on localhost until interrupted.
pub async fn run_server(schema: AsanaSchema, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tracing::info!(port, "GraphQL server listening");
    axum::serve(listener, router(schema))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await
}
