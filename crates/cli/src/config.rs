//! Process configuration, read from the environment.

use std::path::PathBuf;

/// Path to a JSON catalog file. When unset, the built-in seed is used.
pub const CATALOG_ENV: &str = "STOREFRONT_CATALOG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a closure).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let catalog_path = lookup(CATALOG_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self { catalog_path }
    }
}
