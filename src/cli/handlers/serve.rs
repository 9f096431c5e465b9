use crate::graphql::{AppState, DynSynchronizer, build_schema, run_server};
use crate::remote::RemoteService;
use anyhow::Result;

use super::CommandContext;

/// Synchronizer over a boxed Asana client, as the schema expects.
pub(super) fn shared_synchronizer(ctx: &CommandContext) -> Result<DynSynchronizer> {
    let remote: Box<dyn RemoteService + Send> = Box::new(ctx.client()?);
    Ok(DynSynchronizer::new(remote, (&ctx.config).into()))
}

pub fn handle_serve(ctx: &CommandContext, port: u16, open: bool) -> Result<()> {
    // Build the blocking client before entering the runtime
    let sync = shared_synchronizer(ctx)?;
    let schema = build_schema(AppState::new(sync, &ctx.config));

    let url = format!("http://localhost:{}", port);
    println!("Starting GraphQL server on {}", url);
    println!("GraphiQL: {}", url);

    tokio::runtime::Runtime::new()?.block_on(async move {
        if open {
            if let Err(e) = open::that(&url) {
                tracing::warn!(error = %e, "Could not open browser");
            }
        }
        run_server(schema, port).await
    })?;
    Ok(())
}
