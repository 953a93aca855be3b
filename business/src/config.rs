use std::any::Any;

use directory_states::{SnapshotClone, State, state_assign_impl};
use log::{info, warn};
use serde::Deserialize;
use ustr::Ustr;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:4100";

/// Environment variables read by [`BusinessConfig::from_env`].
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    /// `DIRECTORY_API_URL`
    directory_api_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Origin of the directory service, without the `/api` suffix.
    pub api_base_url: String,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            api_base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Reads `DIRECTORY_API_URL`, falling back to [`DEFAULT_API_BASE_URL`].
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    fn from_vars<I, S>(vars: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let raw: RawConfig = serde_env::from_iter(vars).unwrap_or_else(|err| {
            warn!("Ignoring malformed environment: {err}");
            RawConfig::default()
        });
        let config = raw
            .directory_api_url
            .filter(|url| !url.trim().is_empty())
            .map_or_else(Self::default, Self::new);
        info!("Directory service at {}", config.api_base_url);
        config
    }

    pub fn api_url(&self) -> Ustr {
        if self.api_base_url.is_empty() {
            Ustr::from("/api")
        } else {
            Ustr::from(&format!("{}/api", self.api_base_url))
        }
    }

    /// `<api_url>/<path>`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url(), path.trim_start_matches('/'))
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl SnapshotClone for BusinessConfig {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
