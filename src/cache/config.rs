//! Startup-only configuration for the metadata cache.

use std::time::Duration;

use serde::Deserialize;

/// Tunables for a [`super::CacheContext`], loaded once at startup and
/// immutable for the lifetime of the context.
///
/// Time values are stored as whole seconds so the type round-trips through
/// plain TOML without a duration helper crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Number of LRU lanes. Must be a power of two.
    pub lru_lanes: usize,
    /// How long a cached attribute set is trusted before revalidation.
    pub attr_ttl_secs: u64,
    /// Upper bound of the uniform jitter applied on top of `attr_ttl_secs`.
    pub attr_ttl_jitter_secs: u64,
    /// Maximum quadratic-probe distance for the dirent index.
    pub dirent_max_probe: u64,
    /// Interval between reaper sweeps.
    pub reap_interval_secs: u64,
    /// Per-stage timeout applied during orderly shutdown.
    pub shutdown_stage_timeout_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            lru_lanes: 8,
            attr_ttl_secs: 60,
            attr_ttl_jitter_secs: 5,
            dirent_max_probe: 64,
            reap_interval_secs: 1,
            shutdown_stage_timeout_secs: 5,
        }
    }
}

impl CacheConfig {
    /// Parse configuration from a TOML document, falling back to defaults
    /// for any field that is absent.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn attr_ttl(&self) -> Duration {
        Duration::from_secs(self.attr_ttl_secs)
    }

    pub fn attr_ttl_jitter(&self) -> Duration {
        Duration::from_secs(self.attr_ttl_jitter_secs)
    }

    pub fn reap_interval(&self) -> Duration {
        Duration::from_secs(self.reap_interval_secs)
    }

    pub fn shutdown_stage_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_stage_timeout_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.lru_lanes == 0 || !self.lru_lanes.is_power_of_two() {
            return Err(format!("lru_lanes must be a power of two, got {}", self.lru_lanes));
        }
        if self.dirent_max_probe == 0 {
            return Err("dirent_max_probe must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CacheConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_power_of_two_lanes() {
        let mut config = CacheConfig::default();
        config.lru_lanes = 6;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config = CacheConfig::from_toml("dirent_max_probe = 32\n").unwrap();
        assert_eq!(config.dirent_max_probe, 32);
        assert_eq!(config.lru_lanes, CacheConfig::default().lru_lanes);
    }
}
