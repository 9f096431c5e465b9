use anyhow::{Context, Result};
use clap::Parser;

use asana_tool::cli::handlers::{self, CommandContext};
use asana_tool::cli::{Cli, Commands};
use asana_tool::config::AppConfig;
use asana_tool::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose, cli.log_file.as_deref());

    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::default_path()?,
    };
    let config = AppConfig::load_with_env(&config_path).with_context(|| {
        format!("Failed to load configuration from {}", config_path.display())
    })?;
    tracing::debug!(path = %config_path.display(), "Loaded configuration");

    let ctx = CommandContext::new(config, config_path);

    match cli.command {
        Commands::Show { project, json } => handlers::handle_show(&ctx, project, json),
        Commands::Views { all, json } => handlers::handle_views(&ctx, all, json),
        Commands::View {
            project,
            view,
            open,
            json,
        } => handlers::handle_view(&ctx, project, view, open, json),
        Commands::Note {
            project,
            task,
            text,
            json,
        } => handlers::handle_note(&ctx, project, task, text, json),
        Commands::Hold {
            project,
            task,
            until,
        } => handlers::handle_hold(&ctx, project, task, until),
        Commands::Color {
            project,
            task,
            color,
        } => handlers::handle_color(&ctx, project, task, color),
        Commands::Config { action } => handlers::handle_config(&ctx, action),
        Commands::Serve { port, open } => handlers::handle_serve(&ctx, port, open),
        Commands::Query { query, variables } => handlers::handle_query(&ctx, query, variables),
    }
}
