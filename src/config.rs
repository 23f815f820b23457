//! Run configuration: Cloud site coordinates and credentials.
//!
//! Values come from CLI flags, optionally backed by a TOML config file;
//! flags win over file values. Keeping the token in a file keeps it out
//! of shell history.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cloud site domain, e.g. `example.atlassian.net`.
    pub domain: String,
    /// Account email for Basic auth.
    pub email: String,
    /// API token paired with the email.
    pub api_token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    domain: Option<String>,
    email: Option<String>,
    token: Option<String>,
}

impl Config {
    /// Merge CLI flags with an optional config file; flags take precedence.
    pub fn resolve(
        config_path: Option<&Path>,
        domain: Option<String>,
        email: Option<String>,
        token: Option<String>,
    ) -> Result<Self> {
        let file: FileConfig = match config_path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("failed to parse config file {}", path.display()))?
            }
            None => FileConfig::default(),
        };

        let Some(domain) = domain.or(file.domain) else {
            bail!("no Confluence domain given; pass --domain or set it in the config file");
        };
        let Some(email) = email.or(file.email) else {
            bail!("no account email given; pass --email or set it in the config file");
        };
        let Some(api_token) = token.or(file.token) else {
            bail!("no API token given; pass --token or set it in the config file");
        };

        Ok(Self {
            domain,
            email,
            api_token,
        })
    }

    /// Base URL of the Cloud wiki API namespace.
    pub fn base_url(&self) -> String {
        format!("https://{}/wiki", self.domain)
    }
}
