//! GraphQL API over the project cache.
//!
//! This is the presentation boundary: a locally served API (with GraphiQL)
//! exposing the synchronizer's operations and the configured views.
//!
//! ## Usage
//!
//! ```bash
//! # Start the server
//! asana-tool serve --port 4000
//!
//! # Run a query once from the CLI
//! asana-tool query '{ view(projectId: "1204", key: "insurance") { heading tasks { title } } }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `project`, `staleWarning`, `dataAge`, `views`, `view`
//! - **Mutations**: `invalidate`, `refresh`, `addNote`, `addHold`, `tagColor`

mod schema;
mod server;
mod types;

pub use schema::{AppState, AsanaSchema, DynSynchronizer, build_schema};
pub use server::{router, run_server};
pub use types::*;
