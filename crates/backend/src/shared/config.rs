use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub media: MediaConfig,
    pub push: PushConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

/// Image-host settings. The host exposes an upload endpoint returning a
/// public URL plus an opaque deletion handle, and a destroy endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    pub base_url: String,
    pub api_key: String,
    /// Folder/namespace uploads are placed under
    pub folder: String,
}

/// Push-gateway settings for device notifications
#[derive(Debug, Deserialize, Clone)]
pub struct PushConfig {
    pub base_url: String,
    pub server_key: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 5000

[database]
path = "target/db/app.db"

[media]
base_url = "http://localhost:9090"
api_key = "dev"
folder = "agrimarket"

[push]
base_url = "http://localhost:9091"
server_key = "dev"
"#;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Load the config once and keep it for the process lifetime
pub fn init() -> anyhow::Result<&'static Config> {
    if CONFIG.get().is_none() {
        let config = load_config()?;
        let _ = CONFIG.set(config);
    }
    Ok(get())
}

pub fn get() -> &'static Config {
    CONFIG.get().expect("Config has not been initialized")
}

/// Resolve the database file path, relative paths being anchored at the
/// executable directory.
pub fn database_path(config: &Config) -> PathBuf {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(db_path);
        }
    }

    PathBuf::from(&config.database.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.path, "target/db/app.db");
        assert_eq!(config.media.folder, "agrimarket");
    }
}
