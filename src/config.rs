use crate::pokekit::pokeapi;

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;

/// Overrides the address of the persistence store.
const STORE_VAR: &str = "POKEJAC_STORE";

const DEFAULT_STORE: &str = "http://localhost:3001";
const DEFAULT_PER_PAGE: usize = 20;
const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pokeapi: String,
    pub store: String,
    pub timeout_secs: u64,
    pub per_page: usize,
}

impl Config {
    pub async fn load() -> Result<Self, anywho::Error> {
        let path = config_path();

        let config = if fs::try_exists(&path).await? {
            log::info!("Loading configuration: {}", path.display());

            Self::parse(&fs::read_to_string(&path).await?)?
        } else {
            Self::default()
        };

        Ok(config.with_store(env::var(STORE_VAR).ok()))
    }

    fn parse(contents: &str) -> Result<Self, ron::error::SpannedError> {
        let mut config: Self = ron::from_str(contents)?;

        if config.per_page == 0 {
            log::warn!("per_page must be positive, using {DEFAULT_PER_PAGE}");
            config.per_page = DEFAULT_PER_PAGE;
        }

        if config.timeout_secs == 0 {
            log::warn!("timeout_secs must be positive, using {DEFAULT_TIMEOUT_SECS}");
            config.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }

        Ok(config)
    }

    fn with_store(self, store: Option<String>) -> Self {
        match store {
            Some(store) if !store.trim().is_empty() => Self { store, ..self },
            _ => self,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pokeapi: pokeapi::DEFAULT_URL.to_owned(),
            store: DEFAULT_STORE.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_default()
        .join(env!("CARGO_PKG_NAME"))
        .join("config.ron")
}
