use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{error, info};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Port the HTTP/WebSocket listener binds on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path of the screen document pushed by the controller
    #[serde(default = "default_screen")]
    pub screen: PathBuf,
}

impl Config {
    /// Load configuration from `BRAINSTORM_`-prefixed environment variables,
    /// after sourcing a `.env` file if one is present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        match envy::prefixed("BRAINSTORM_").from_env::<Config>() {
            Ok(config) => {
                info!("✅ Configuration loaded successfully");
                Ok(config)
            }
            Err(e) => {
                error!("❌ Failed to load configuration: {}", e);
                Err(ConfigError::EnvError(e))
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            screen: default_screen(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EnvError(envy::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EnvError(e) => write!(f, "Environment variable error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

// Default value functions
fn default_port() -> u16 {
    3333
}

fn default_screen() -> PathBuf {
    std::env::temp_dir().join("brainstorm").join("screen.html")
}
