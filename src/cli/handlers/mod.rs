mod color;
mod config;
mod hold;
mod note;
mod query;
mod serve;
mod show;
mod utils;
mod view;
mod views;

pub use color::handle_color;
pub use config::handle_config;
pub use hold::handle_hold;
pub use note::handle_note;
pub use query::handle_query;
pub use serve::handle_serve;
pub use show::handle_show;
pub use view::handle_view;
pub use views::handle_views;

use crate::cache::{SyncSettings, Synchronizer};
use crate::config::AppConfig;
use crate::remote::AsanaClient;
use anyhow::Result;
use std::path::PathBuf;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: AppConfig,
    pub config_path: PathBuf,
}

impl CommandContext {
    pub fn new(config: AppConfig, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Build the Asana client. Fails when credentials are incomplete.
    pub fn client(&self) -> Result<AsanaClient> {
        let credentials = self.config.credentials()?;
        Ok(AsanaClient::new(
            &credentials,
            &self.config.asana,
            &self.config.remote,
        )?)
    }

    /// A fresh synchronizer over the Asana client.
    pub fn synchronizer(&self) -> Result<Synchronizer<AsanaClient>> {
        Ok(Synchronizer::new(
            self.client()?,
            SyncSettings::from(&self.config),
        ))
    }
}
