//! Server configuration from environment variables.

use crate::logic::is_valid_bracket_size;
use std::env;

/// Largest bracket accepted when `MAX_TEAM_COUNT` is not set.
pub const DEFAULT_MAX_TEAM_COUNT: u32 = 1024;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    /// Bind host (`HOST`).
    pub host: String,
    /// Bind port (`PORT`).
    pub port: u16,
    /// Seed the demo roster into an empty store (`SEED_DEMO`).
    pub seed_demo: bool,
    /// Largest team count a new tournament may have (`MAX_TEAM_COUNT`).
    pub max_team_count: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            seed_demo: true,
            max_team_count: DEFAULT_MAX_TEAM_COUNT,
        }
    }
}

impl ServerConfig {
    /// Read the environment; unset or unusable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT {:?}, using {}", raw, defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };

        let seed_demo = lookup("SEED_DEMO")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(defaults.seed_demo);

        let max_team_count = match lookup("MAX_TEAM_COUNT") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if is_valid_bracket_size(n) => n,
                _ => {
                    log::warn!(
                        "Ignoring MAX_TEAM_COUNT {:?} (must be a power of two >= 2), using {}",
                        raw,
                        defaults.max_team_count
                    );
                    defaults.max_team_count
                }
            },
            None => defaults.max_team_count,
        };

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            seed_demo,
            max_team_count,
        }
    }

    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
