use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default directory scanned for documents
pub const DEFAULT_DOCS_DIR: &str = "data/docs";
/// Number of hits returned when a query does not ask for a specific `k`
pub const DEFAULT_TOP_K: usize = 3;

pub const ENV_DOCS_DIR: &str = "DOCS_DIR";
pub const ENV_TOP_K: &str = "DOCS_TOP_K";

/// Runtime configuration of the document store
///
/// Every field has a default, so a partial serde document
/// (or no document at all) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory backing an [`FsStore`](crate::store::FsStore)
    pub docs_dir: PathBuf,
    /// `k` used by `query(text, None)`
    pub default_top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            default_top_k: DEFAULT_TOP_K,
        }
    }
}

impl Config {
    /// Defaults overlaid with `DOCS_DIR` / `DOCS_TOP_K` from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from an arbitrary key lookup
    ///
    /// # Arguments
    /// * `lookup` - returns the raw value for a variable name, if set
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = lookup(ENV_DOCS_DIR).filter(|v| !v.trim().is_empty()) {
            config.docs_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_TOP_K) {
            config.default_top_k = raw.trim().parse().map_err(|_| Error::Config {
                reason: format!("{ENV_TOP_K} must be a positive integer, got '{raw}'"),
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_top_k == 0 {
            return Err(Error::Config {
                reason: "default_top_k must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
