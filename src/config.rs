//! Environment configuration. `.env` is honoured by the binaries through dotenvy.

use std::net::SocketAddr;

use thiserror::Error;

use crate::domain::{
    credentials::Credential,
    ids::{IdGenerator, SequentialIds, UuidIds},
};

pub const BIND_ADDR: &str = "AGENDA_BIND_ADDR";
pub const USERS: &str = "AGENDA_USERS";
pub const SEED_SAMPLES: &str = "AGENDA_SEED_SAMPLES";
pub const ID_STRATEGY: &str = "AGENDA_ID_STRATEGY";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy { Sequential, Uuid }

impl IdStrategy {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Sequential => Box::new(SequentialIds::default()),
            IdStrategy::Uuid => Box::new(UuidIds),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub users: Vec<Credential>,
    pub seed_samples: bool,
    pub id_strategy: IdStrategy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|key| std::env::var(key).ok()) }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup(BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| invalid(BIND_ADDR, e.to_string()))?;
        let users = match lookup(USERS) {
            Some(raw) => parse_users(&raw)?,
            None => Vec::new(),
        };
        let seed_samples = match lookup(SEED_SAMPLES) {
            Some(raw) => parse_bool(SEED_SAMPLES, &raw)?,
            None => true,
        };
        let id_strategy = match lookup(ID_STRATEGY).as_deref().map(str::trim) {
            None | Some("") | Some("sequential") => IdStrategy::Sequential,
            Some("uuid") => IdStrategy::Uuid,
            Some(other) => return Err(invalid(ID_STRATEGY, format!("unknown strategy `{other}`"))),
        };
        Ok(Self { bind_addr, users, seed_samples, id_strategy })
    }
}

/// `name:password` pairs separated by commas. Passwords may contain `:`.
fn parse_users(raw: &str) -> Result<Vec<Credential>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((name, password)) if !name.is_empty() => Ok(Credential::new(name, password)),
            _ => Err(invalid(USERS, "expected `username:password` entries".to_string())),
        })
        .collect()
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(invalid(key, format!("`{other}` is not a boolean"))),
    }
}

fn invalid(key: &'static str, reason: String) -> ConfigError { ConfigError::Invalid { key, reason } }

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert!(config.users.is_empty());
        assert!(config.seed_samples);
        assert_eq!(config.id_strategy, IdStrategy::Sequential);
    }

    #[test]
    fn parses_users_and_flags() {
        let config = config(&[(USERS, "ana:s3cret, luis:a:b ,"), (SEED_SAMPLES, "off"), (ID_STRATEGY, "uuid")]).unwrap();
        assert_eq!(config.users, vec![Credential::new("ana", "s3cret"), Credential::new("luis", "a:b")]);
        assert!(!config.seed_samples);
        assert_eq!(config.id_strategy, IdStrategy::Uuid);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(matches!(config(&[(USERS, "nopassword")]), Err(ConfigError::Invalid { key: USERS, .. })));
        assert!(matches!(config(&[(SEED_SAMPLES, "maybe")]), Err(ConfigError::Invalid { key: SEED_SAMPLES, .. })));
        assert!(matches!(config(&[(BIND_ADDR, "localhost")]), Err(ConfigError::Invalid { key: BIND_ADDR, .. })));
        assert!(matches!(config(&[(ID_STRATEGY, "random")]), Err(ConfigError::Invalid { key: ID_STRATEGY, .. })));
    }
}
