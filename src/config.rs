//! Runtime configuration read from environment variables

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CATALOG_PATH: &str = "catalog.json";
const DEFAULT_SETTINGS_PATH: &str = ".cache/playback_settings.json";
const DEFAULT_LOG_DIR: &str = ".logs";
const DEFAULT_TICK_MS: u64 = 250;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub settings_path: PathBuf,
    pub log_dir: PathBuf,
    pub tick_interval: Duration,
    /// Problems found while reading the environment, logged once tracing is up
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            warnings: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from `PLAYQUEUE_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        let path_or = |key: &str, default: PathBuf| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default)
        };

        let tick_interval = match lookup("PLAYQUEUE_TICK_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    warnings.push(format!("ignoring invalid PLAYQUEUE_TICK_MS={raw:?}"));
                    defaults.tick_interval
                }
            },
            None => defaults.tick_interval,
        };

        Self {
            catalog_path: path_or("PLAYQUEUE_CATALOG", defaults.catalog_path),
            settings_path: path_or("PLAYQUEUE_SETTINGS", defaults.settings_path),
            log_dir: path_or("PLAYQUEUE_LOG_DIR", defaults.log_dir),
            tick_interval,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.catalog_path, PathBuf::from("catalog.json"));
        assert_eq!(config.settings_path, PathBuf::from(".cache/playback_settings.json"));
        assert_eq!(config.log_dir, PathBuf::from(".logs"));
        assert_eq!(config.tick_interval, Duration::from_millis(250));
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PLAYQUEUE_CATALOG", "/srv/music/catalog.json"),
            ("PLAYQUEUE_TICK_MS", "100"),
        ]));
        assert_eq!(config.catalog_path, PathBuf::from("/srv/music/catalog.json"));
        assert_eq!(config.tick_interval, Duration::from_millis(100));
    }

    #[test]
    fn invalid_tick_and_blank_paths_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PLAYQUEUE_TICK_MS", "0"),
            ("PLAYQUEUE_SETTINGS", "   "),
        ]));
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.settings_path, PathBuf::from(".cache/playback_settings.json"));
        assert_eq!(config.warnings.len(), 1);
    }
}
