// src/config.rs
use anyhow::{Context, Result};
use dotenv::dotenv;
use log::{info, warn};
use std::env;

use crate::services::heuristics::{parse_keyword_list, NameHeuristics};

const DEFAULT_PORT: u16 = 3030;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub heuristics: NameHeuristics,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: DEFAULT_PORT,
            heuristics: NameHeuristics::default(),
        }
    }
}

impl AppConfig {
    /// Reads `.env` (when present) and the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>()
                .with_context(|| format!("PORT must be a number, got {:?}", raw))?,
            None => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let mut heuristics = NameHeuristics::default();
        if let Some(raw) = lookup("BILL_SEASONAL_KEYWORDS") {
            heuristics.seasonal_keywords = parse_keyword_list(&raw);
        }
        if let Some(raw) = lookup("BILL_FLAT_RATE_KEYWORDS") {
            heuristics.flat_rate_keywords = parse_keyword_list(&raw);
        }
        if let Some(raw) = lookup("BILL_SEASONAL_VARIANCE_KEYWORDS") {
            heuristics.seasonal_variance_keywords = parse_keyword_list(&raw);
        }
        info!("Using PORT: {}, heuristics: {:?}", port, heuristics);

        Ok(AppConfig { port, heuristics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 3030);
        assert_eq!(config.heuristics, NameHeuristics::default());
    }

    #[test]
    fn overrides_keyword_tables() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("BILL_SEASONAL_KEYWORDS", "Water, Sewer"),
        ])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.heuristics.seasonal_keywords, vec!["water", "sewer"]);
        let defaults = NameHeuristics::default();
        assert_eq!(config.heuristics.flat_rate_keywords, defaults.flat_rate_keywords);
    }

    #[test]
    fn rejects_bad_port() {
        assert!(AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).is_err());
    }
}
