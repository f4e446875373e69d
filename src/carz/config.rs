use crate::error::{CarzError, Result};
use crate::view::{SortKey, DEFAULT_SHOWCASE_LIMIT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for carz, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarzConfig {
    /// How many favorites the showcase shows
    #[serde(default = "default_showcase_limit")]
    pub showcase_limit: usize,

    /// Sort applied by `list` when none is given ("name", "rating", "price" or "")
    #[serde(default)]
    pub default_sort: String,
}

fn default_showcase_limit() -> usize {
    DEFAULT_SHOWCASE_LIMIT
}

impl Default for CarzConfig {
    fn default() -> Self {
        Self {
            showcase_limit: DEFAULT_SHOWCASE_LIMIT,
            default_sort: String::new(),
        }
    }
}

impl CarzConfig {
    pub const KEYS: [&'static str; 2] = ["showcase-limit", "default-sort"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CarzError::Io)?;
        let config: CarzConfig =
            serde_json::from_str(&content).map_err(CarzError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CarzError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CarzError::Serialization)?;
        fs::write(config_path, content).map_err(CarzError::Io)?;
        Ok(())
    }

    pub fn sort_key(&self) -> SortKey {
        SortKey::from(self.default_sort.as_str())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "showcase-limit" => Some(self.showcase_limit.to_string()),
            "default-sort" => Some(self.default_sort.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "showcase-limit" => {
                self.showcase_limit = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("showcase-limit must be a number, got {}", value))?;
            }
            "default-sort" => {
                let sort = SortKey::from(value);
                if sort == SortKey::Unsorted && !value.is_empty() && value != "none" {
                    return Err(format!(
                        "default-sort must be one of name, rating, price or none, got {}",
                        value
                    ));
                }
                self.default_sort = sort.as_str().to_string();
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}
