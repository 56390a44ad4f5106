use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
};

use crate::kernel::timer::{DEFAULT_MINUTES, MAX_MINUTES, MIN_MINUTES};

pub const CONFIG_ENV: &str = "MALIKAY_CONFIG";
pub const SECRET_ENV: &str = "MALIKAY_SECRET";

const DEFAULT_BRAND: &str = "Malikay";
// Shared single-tenant secret. Not hashed, no lockout.
const DEFAULT_SECRET: &str = "1234";

/// On-disk shape. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub brand: Option<String>,
    pub secret: Option<String>,
    pub default_timer_minutes: Option<u32>,
    pub export_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub brand: String,
    pub secret: String,
    pub default_timer_minutes: u32,
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            brand: DEFAULT_BRAND.to_string(),
            secret: DEFAULT_SECRET.to_string(),
            default_timer_minutes: DEFAULT_MINUTES,
            export_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// `path` wins over `MALIKAY_CONFIG`. A missing file means defaults;
    /// an unreadable or invalid one is logged and also falls back.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

        let file = path.and_then(|p| read_file(&p)).unwrap_or_default();
        let mut config = Self::from_file(file);

        if let Ok(secret) = env::var(SECRET_ENV) {
            if !secret.is_empty() {
                config.secret = secret;
            }
        }
        config
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<ConfigFile>(content).map(Self::from_file)
    }

    pub fn from_file(file: ConfigFile) -> Self {
        let defaults = Self::default();

        let default_timer_minutes = match file.default_timer_minutes {
            Some(m) if (MIN_MINUTES..=MAX_MINUTES).contains(&m) => m,
            Some(m) => {
                tracing::warn!(
                    "default_timer_minutes {} outside {}..={}, using {}",
                    m,
                    MIN_MINUTES,
                    MAX_MINUTES,
                    DEFAULT_MINUTES
                );
                DEFAULT_MINUTES
            }
            None => DEFAULT_MINUTES,
        };

        Self {
            brand: file.brand.filter(|b| !b.trim().is_empty()).unwrap_or(defaults.brand),
            secret: file.secret.filter(|s| !s.is_empty()).unwrap_or(defaults.secret),
            default_timer_minutes,
            export_dir: file.export_dir.unwrap_or(defaults.export_dir),
        }
    }
}

fn read_file(path: &Path) -> Option<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {:?}, using defaults", path);
        return None;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!("Failed to read config at {:?}: {}", path, err);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            tracing::warn!("Failed to parse config at {:?}: {}", path, err);
            None
        }
    }
}
