use crate::sources::Delays;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings, read from the environment (and a `.env` file if present)
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory holding the persisted store blobs
    pub storage_dir: PathBuf,
    pub delays: Delays,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".housing-connect"),
            delays: Delays::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let millis = |key: &str, default: Duration| -> Result<Duration> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .with_context(|| {
                        format!("{} must be a number of milliseconds, got {:?}", key, raw)
                    }),
                None => Ok(default),
            }
        };

        Ok(Self {
            storage_dir: lookup("HOUSING_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            delays: Delays {
                fetch: millis("HOUSING_FETCH_DELAY_MS", defaults.delays.fetch)?,
                send: millis("HOUSING_SEND_DELAY_MS", defaults.delays.send)?,
                lookup: millis("HOUSING_LOOKUP_DELAY_MS", defaults.delays.lookup)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn variables_override_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("HOUSING_STORAGE_DIR", "/tmp/housing"),
            ("HOUSING_FETCH_DELAY_MS", "0"),
            ("HOUSING_SEND_DELAY_MS", " 25 "),
        ]))
        .unwrap();

        assert_eq!(settings.storage_dir, PathBuf::from("/tmp/housing"));
        assert_eq!(settings.delays.fetch, Duration::ZERO);
        assert_eq!(settings.delays.send, Duration::from_millis(25));
        assert_eq!(settings.delays.lookup, Delays::default().lookup);
    }

    #[test]
    fn invalid_delay_names_the_variable() {
        let err = Settings::from_lookup(lookup_from(&[("HOUSING_LOOKUP_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("HOUSING_LOOKUP_DELAY_MS"));
    }
}
