use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use anyhow::{Error, anyhow};
use tracing::{info, warn};

pub const DATA_DIR: &str = "data";

pub struct Config {
    pub port: u16,
    pub public_dir: PathBuf,
    pub cors_origin: String,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        Ok(Self {
            port: try_load("PORT", "3001")?,
            public_dir: try_load("PUBLIC_DIR", "public")?,
            cors_origin: try_load("CORS_ORIGIN", "http://localhost:3000")?,
        })
    }

    /// Where dishes.csv, bills.csv and ingredients.csv live.
    pub fn data_dir(&self) -> PathBuf {
        self.public_dir.join(DATA_DIR)
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, Error>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            anyhow!("Environment misconfigured! {key}: {e}")
        })
}
