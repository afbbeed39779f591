use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::url_resolver::config::{ResolverConfig, DEFAULT_MAX_REDIRECTS, DEFAULT_USER_AGENT};

/// Prefix for environment overrides, e.g. `BOOKSHELF_MAX_ITEMS=20`
pub const ENV_PREFIX: &str = "BOOKSHELF";

/// Settings for the link import pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Longest pasted text accepted, in characters
    pub max_text_length: usize,

    /// Most candidates kept from one paste
    pub max_items: usize,

    /// Most redirect resolutions in flight at once
    pub concurrency_limit: usize,

    /// Deadline for resolving a single URL, in milliseconds
    pub timeout_ms: u64,

    /// Redirect hops followed before giving up on a URL
    pub max_redirects: usize,

    /// User-Agent sent while resolving
    pub user_agent: String,

    /// Resolve every link instead of only known shorteners
    pub resolve_all_links: bool,

    /// Directory for log files; logs go to stderr when unset
    pub log_dir: Option<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            max_items: 50,
            concurrency_limit: 5,
            timeout_ms: 5_000,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            resolve_all_links: false,
            log_dir: None,
        }
    }
}

impl ImportConfig {
    /// Loads settings from an optional file, then `BOOKSHELF_*` environment variables.
    ///
    /// Without an explicit path, `bookshelf_import.{toml,json,yaml}` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        builder = match path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                builder.add_source(::config::File::from(path.to_path_buf()).required(true))
            }
            None => builder.add_source(::config::File::with_name("bookshelf_import").required(false)),
        };

        let settings = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        let loaded: ImportConfig = settings
            .try_deserialize()
            .context("Invalid configuration values")?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Rejects settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_items == 0 {
            bail!("max_items must be at least 1");
        }
        if self.concurrency_limit == 0 {
            bail!("concurrency_limit must be at least 1");
        }
        if self.timeout_ms == 0 {
            bail!("timeout_ms must be greater than 0");
        }
        if self.max_text_length == 0 {
            bail!("max_text_length must be greater than 0");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new()
            .with_max_redirects(self.max_redirects)
            .with_user_agent(self.user_agent.clone())
    }
}
