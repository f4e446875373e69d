use crate::api::CarzApi;
use crate::config::CarzConfig;
use crate::error::{CarzError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Overrides the data directory; used by tests and for portable collections.
pub const HOME_ENV: &str = "CARZ_HOME";

pub struct CarzContext {
    pub api: CarzApi<FileStore>,
}

/// Where the collection lives: `$CARZ_HOME` if set, else the platform data dir.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    let proj_dirs = ProjectDirs::from("com", "carz", "carz")
        .ok_or_else(|| CarzError::Api("Could not determine a data directory".to_string()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

pub fn initialize() -> Result<CarzContext> {
    let data_dir = data_dir()?;
    let config = CarzConfig::load(&data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config.json unreadable, using defaults");
        CarzConfig::default()
    });
    tracing::debug!(dir = %data_dir.display(), "using data directory");

    let store = FileStore::new(&data_dir);
    let api = CarzApi::open(store, config, &data_dir);
    Ok(CarzContext { api })
}
