use crate::graphql::{AppState, build_schema};
use anyhow::Result;

use super::CommandContext;
use super::serve::shared_synchronizer;

pub fn handle_query(ctx: &CommandContext, query: String, variables: Option<String>) -> Result<()> {
    let sync = shared_synchronizer(ctx)?;
    let schema = build_schema(AppState::new(sync, &ctx.config));

    let vars: async_graphql::Variables = if let Some(v) = variables {
        serde_json::from_str(&v)?
    } else {
        async_graphql::Variables::default()
    };

    let request = async_graphql::Request::new(query).variables(vars);
    let response = tokio::runtime::Runtime::new()?.block_on(schema.execute(request));

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
