//! Configuration loaded from the environment (and `.env`).

use std::path::PathBuf;

use review_queue::{MatchingMode, MissPolicy, DEFAULT_FUZZY_THRESHOLD};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// How answers are judged and what a miss does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewSettings {
    pub matching_mode: MatchingMode,
    pub fuzzy_threshold: f64,
    pub miss_policy: MissPolicy,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            matching_mode: MatchingMode::default(),
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            miss_policy: MissPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub state_dir: PathBuf,
    pub account: String,
    pub settings: ReviewSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let state_dir = lookup("DRILL_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_state_dir);
        let account = lookup("DRILL_ACCOUNT").unwrap_or_else(|| "default".to_string());

        let matching_mode = match lookup("DRILL_MATCHING") {
            Some(value) => MatchingMode::from_str(&value).ok_or(ConfigError::Invalid {
                key: "DRILL_MATCHING",
                value,
            })?,
            None => MatchingMode::default(),
        };

        let fuzzy_threshold = match lookup("DRILL_FUZZY_THRESHOLD") {
            Some(value) => match value.parse::<f64>() {
                Ok(threshold) if (0.0..=1.0).contains(&threshold) => threshold,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DRILL_FUZZY_THRESHOLD",
                        value,
                    })
                }
            },
            None => DEFAULT_FUZZY_THRESHOLD,
        };

        let miss_policy = match lookup("DRILL_MISS_POLICY") {
            Some(value) => MissPolicy::from_str(&value).ok_or(ConfigError::Invalid {
                key: "DRILL_MISS_POLICY",
                value,
            })?,
            None => MissPolicy::default(),
        };

        Ok(Self {
            state_dir,
            account,
            settings: ReviewSettings {
                matching_mode,
                fuzzy_threshold,
                miss_policy,
            },
        })
    }
}

fn default_state_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("review-drill"))
        .unwrap_or_else(|| PathBuf::from(".review-drill"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.account, "default");
        assert_eq!(config.settings, ReviewSettings::default());
        assert!(config.state_dir.ends_with("review-drill") || config.state_dir.ends_with(".review-drill"));
    }

    #[test]
    fn reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            ("DRILL_STATE_DIR", "/tmp/drill"),
            ("DRILL_ACCOUNT", "ada"),
            ("DRILL_MATCHING", "case_insensitive"),
            ("DRILL_FUZZY_THRESHOLD", "0.6"),
            ("DRILL_MISS_POLICY", "advance"),
        ]))
        .unwrap();
        assert_eq!(config.state_dir, PathBuf::from("/tmp/drill"));
        assert_eq!(config.account, "ada");
        assert_eq!(config.settings.matching_mode, MatchingMode::CaseInsensitive);
        assert_eq!(config.settings.fuzzy_threshold, 0.6);
        assert_eq!(config.settings.miss_policy, MissPolicy::Advance);
    }

    #[test]
    fn rejects_unknown_matching_mode() {
        let err = Config::from_lookup(lookup(&[("DRILL_MATCHING", "loose")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "DRILL_MATCHING",
                value: "loose".to_string()
            }
        );
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        assert!(Config::from_lookup(lookup(&[("DRILL_FUZZY_THRESHOLD", "1.5")])).is_err());
        assert!(Config::from_lookup(lookup(&[("DRILL_FUZZY_THRESHOLD", "high")])).is_err());
    }

    #[test]
    fn rejects_unknown_miss_policy() {
        assert!(Config::from_lookup(lookup(&[("DRILL_MISS_POLICY", "skip")])).is_err());
    }
}
