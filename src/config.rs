use crate::error::{AsanaError, Result};
use crate::views::ViewConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Keys settable through `config set`, mirrored by `ASANA_<KEY>` env vars.
pub const CREDENTIAL_KEYS: [&str; 3] = ["token", "workspace", "initials"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub asana: AsanaSettings,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub remote: RemoteSettings,

    #[serde(default = "crate::views::default_views")]
    pub views: Vec<ViewConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            asana: AsanaSettings::default(),
            cache: CacheSettings::default(),
            remote: RemoteSettings::default(),
            views: crate::views::default_views(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsanaSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://app.asana.com/api/1.0".to_string()
}

impl Default for AsanaSettings {
    fn default() -> Self {
        Self {
            token: None,
            workspace: None,
            initials: None,
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,
}

fn default_stale_after_secs() -> u64 {
    300
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            stale_after_secs: default_stale_after_secs(),
        }
    }
}

impl CacheSettings {
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Total attempts for a request answered with 503.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteSettings {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Credentials needed to talk to Asana, once all are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub workspace: String,
    pub initials: String,
}

impl AppConfig {
    /// Default location: the platform config dir, e.g. `~/.config/asana-tool/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "asana-tool").ok_or_else(|| {
            AsanaError::Config("Could not determine a home directory".to_string())
        })?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` and apply `ASANA_*` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for key in CREDENTIAL_KEYS {
            let var = format!("ASANA_{}", key.to_uppercase());
            if let Some(value) = lookup(&var).filter(|v| !v.is_empty()) {
                // set_credential only rejects unknown keys
                let _ = self.set_credential(key, &value);
            }
        }
    }

    pub fn set_credential(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "token" => self.asana.token = Some(value.to_string()),
            "workspace" => self.asana.workspace = Some(value.to_string()),
            "initials" => self.asana.initials = Some(value.to_uppercase()),
            "base_url" => self.asana.base_url = value.trim_end_matches('/').to_string(),
            "stale_after_secs" => {
                self.cache.stale_after_secs = value.parse().map_err(|_| {
                    AsanaError::Config(format!("stale_after_secs must be a number: {}", value))
                })?
            }
            _ => {
                return Err(AsanaError::Config(format!(
                    "Unknown config key '{}'. Expected one of: token, workspace, initials, base_url, stale_after_secs",
                    key
                )));
            }
        }
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let missing: Vec<&str> = [
            ("token", &self.asana.token),
            ("workspace", &self.asana.workspace),
            ("initials", &self.asana.initials),
        ]
        .into_iter()
        .filter(|(_, v)| v.as_deref().is_none_or(str::is_empty))
        .map(|(k, _)| k)
        .collect();

        if !missing.is_empty() {
            return Err(AsanaError::NotConfigured(missing.join(", ")));
        }

        Ok(Credentials {
            token: self.asana.token.clone().unwrap_or_default(),
            workspace: self.asana.workspace.clone().unwrap_or_default(),
            initials: self.asana.initials.clone().unwrap_or_default(),
        })
    }

    pub fn initials(&self) -> Option<&str> {
        self.asana.initials.as_deref().filter(|i| !i.is_empty())
    }

    /// Atomically write the config: temp file in the same dir, then rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| AsanaError::Config(e.to_string()))?;

        let dir = path
            .parent()
            .ok_or_else(|| AsanaError::Config("Config path has no parent directory".to_string()))?;
        std::fs::create_dir_all(dir)?;

        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.as_file().sync_all()?;
        temp_file
            .persist(path)
            .map_err(|e| AsanaError::Config(format!("Failed to persist config: {}", e)))?;

        tracing::info!(path = %path.display(), "Saved configuration");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.cache.stale_after_secs, 300);
        assert_eq!(config.remote.max_retries, 3);
        assert_eq!(config.asana.base_url, "https://app.asana.com/api/1.0");
        assert_eq!(config.views.len(), 9);
        assert!(!config.is_configured());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[asana]\ntoken = \"abc\"\n\n[cache]\nstale_after_secs = 60\n")
            .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.asana.token.as_deref(), Some("abc"));
        assert_eq!(config.cache.stale_after(), Duration::from_secs(60));
        assert_eq!(config.remote.retry_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.set_credential("token", "secret").unwrap();
        config.set_credential("workspace", "12345").unwrap();
        config.set_credential("initials", "ab").unwrap();
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(
            loaded.credentials().unwrap(),
            Credentials {
                token: "secret".to_string(),
                workspace: "12345".to_string(),
                initials: "AB".to_string(),
            }
        );
        assert_eq!(loaded.views.len(), config.views.len());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = AppConfig::default();
        config.set_credential("token", "from-file").unwrap();

        config.apply_env(|key| match key {
            "ASANA_TOKEN" => Some("from-env".to_string()),
            "ASANA_INITIALS" => Some("xy".to_string()),
            "ASANA_WORKSPACE" => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.asana.token.as_deref(), Some("from-env"));
        assert_eq!(config.initials(), Some("XY"));
        assert_eq!(config.asana.workspace, None);
    }

    #[test]
    fn test_credentials_report_missing_keys() {
        let mut config = AppConfig::default();
        config.set_credential("token", "t").unwrap();

        let err = config.credentials().unwrap_err();
        assert!(matches!(err, AsanaError::NotConfigured(ref m) if m == "workspace, initials"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut config = AppConfig::default();
        assert!(config.set_credential("password", "x").is_err());
        assert!(config.set_credential("stale_after_secs", "soon").is_err());
        config.set_credential("stale_after_secs", "120").unwrap();
        assert_eq!(config.cache.stale_after_secs, 120);
    }
}
