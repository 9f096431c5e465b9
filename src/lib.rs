//! # asana-tool - triage Asana projects from a cached local view
//!
//! Pulls a project's tasks from Asana, keeps the last snapshot in memory and
//! tells you when that snapshot has gone stale. Tasks are sorted into views by
//! the colors of their tags, and notes are written back into the task's notes
//! field below the blank separator line.
//!
//! ## Quick Start
//!
//! ```bash
//! # Store credentials (or export ASANA_TOKEN, ASANA_WORKSPACE, ASANA_INITIALS)
//! asana-tool config set token 1/1234:abcd
//! asana-tool config set workspace 998877
//! asana-tool config set initials ajp
//!
//! # Look at a project through a view
//! asana-tool view 120045 insurance
//!
//! # Leave a note, or put a task on hold for yourself
//! asana-tool note 120045 120099 called the clinic
//! asana-tool hold 120045 120099 11/04
//!
//! # GraphQL for scripts
//! asana-tool serve --port 4000
//! ```
//!
//! ## Modules
//!
//! - [`cache`]: the synchronizer and its per-project snapshots
//! - [`model`]: projects, tasks, notes, colors and hold rules
//! - [`remote`]: the Asana REST client
//! - [`views`]: view definitions and task selection
//! - [`graphql`]: schema and HTTP server

/// In-memory project cache and the synchronizer that keeps it fresh.
pub mod cache;

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration file and environment handling.
pub mod config;

/// Error types and result aliases.
pub mod error;

pub mod graphql;

pub mod logging;

/// Projects, tasks, notes and colors.
pub mod model;

/// Access to the Asana API.
pub mod remote;

/// Input validation for identifiers and note text.
pub mod validation;

pub mod views;
