use crate::cli::ConfigAction;
use crate::config::AppConfig;
use anyhow::{Context, Result};
use colored::Colorize;

use super::CommandContext;
use super::utils::mask;

pub fn handle_config(ctx: &CommandContext, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", ctx.config_path.display());
        }
        ConfigAction::Show => {
            let mut shown = ctx.config.clone();
            shown.asana.token = shown.asana.token.as_deref().map(mask);
            print!("{}", toml::to_string_pretty(&shown)?);

            match ctx.config.credentials() {
                Ok(_) => println!("\n# {}", "configured".green()),
                Err(e) => println!("\n# {}", e.to_string().yellow()),
            }
        }
        ConfigAction::Set { key, value } => {
            // Edit the file as stored, without environment overrides
            let mut config = AppConfig::load(&ctx.config_path).with_context(|| {
                format!("Failed to load configuration from {}", ctx.config_path.display())
            })?;
            config.set_credential(&key, &value)?;
            config.save(&ctx.config_path)?;

            let shown = match key.as_str() {
                "token" => mask(value.trim()),
                "initials" => value.trim().to_uppercase(),
                _ => value.trim().to_string(),
            };
            println!("{} {} = {}", "Saved".green(), key.cyan(), shown);
            if let Err(e) = config.credentials() {
                println!("{}", e.to_string().yellow());
            }
        }
    }
    Ok(())
}
