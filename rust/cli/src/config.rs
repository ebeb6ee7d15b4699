//! Layered CLI configuration: defaults, then a TOML file named by
//! `CRIBBAGE_CONFIG`, then `CRIBBAGE_*` environment variables. Command-line
//! flags are applied on top by the individual commands.

use cribbage_engine::config::MatchConfig;
use serde::{Deserialize, Serialize};
use std::fs;

pub const ENV_CONFIG: &str = "CRIBBAGE_CONFIG";
pub const ENV_SEED: &str = "CRIBBAGE_SEED";
pub const ENV_MAX_PLAYERS: &str = "CRIBBAGE_MAX_PLAYERS";
pub const ENV_CARDS_PER_HAND: &str = "CRIBBAGE_CARDS_PER_HAND";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub max_players: usize,
    pub cards_per_hand: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub max_players: ValueSource,
    pub cards_per_hand: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            max_players: ValueSource::Default,
            cards_per_hand: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let table = MatchConfig::default();
        Self {
            max_players: table.max_players,
            cards_per_hand: table.cards_per_hand,
            seed: None,
        }
    }
}

impl Config {
    /// Table shape for the engine; `seed` overrides the configured seed.
    pub fn match_config(&self, seed: Option<u64>) -> MatchConfig {
        MatchConfig {
            max_players: self.max_players,
            cards_per_hand: self.cards_per_hand,
            seed: seed.or(self.seed),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    max_players: Option<usize>,
    cards_per_hand: Option<usize>,
    seed: Option<u64>,
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Resolve configuration with `env` standing in for the process environment.
pub fn load_from<F>(env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();
    let var = |key: &str| env(key).filter(|v| !v.is_empty());

    if let Some(path) = var(ENV_CONFIG) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.max_players {
            cfg.max_players = v;
            sources.max_players = ValueSource::File;
        }
        if let Some(v) = f.cards_per_hand {
            cfg.cards_per_hand = v;
            sources.cards_per_hand = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(seed) = var(ENV_SEED) {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(players) = var(ENV_MAX_PLAYERS) {
        cfg.max_players = players
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid max_players".into()))?;
        sources.max_players = ValueSource::Env;
    }
    if let Some(cards) = var(ENV_CARDS_PER_HAND) {
        cfg.cards_per_hand = cards
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid cards_per_hand".into()))?;
        sources.cards_per_hand = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.match_config(None)
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let resolved = load_from(env_of(&[])).unwrap();
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.sources.seed, ValueSource::Default);
        assert_eq!(resolved.config.max_players, 2);
        assert_eq!(resolved.config.cards_per_hand, 6);
    }

    #[test]
    fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cribbage.toml");
        fs::write(&path, "seed = 456\nmax_players = 3\ncards_per_hand = 5\n").unwrap();
        let path = path.to_string_lossy().to_string();

        let resolved = load_from(env_of(&[(ENV_CONFIG, &path), (ENV_SEED, "9")])).unwrap();
        assert_eq!(resolved.config.seed, Some(9));
        assert_eq!(resolved.sources.seed, ValueSource::Env);
        assert_eq!(resolved.config.max_players, 3);
        assert_eq!(resolved.sources.max_players, ValueSource::File);
        assert_eq!(resolved.config.cards_per_hand, 5);
        assert_eq!(resolved.sources.cards_per_hand, ValueSource::File);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let resolved = load_from(env_of(&[(ENV_SEED, "")])).unwrap();
        assert_eq!(resolved.config.seed, None);
    }

    #[test]
    fn rejects_unparseable_and_oversized_tables() {
        assert!(matches!(
            load_from(env_of(&[(ENV_SEED, "abc")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_from(env_of(&[(ENV_MAX_PLAYERS, "8"), (ENV_CARDS_PER_HAND, "7")])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn cli_seed_wins_over_configured_seed() {
        let cfg = Config {
            seed: Some(1),
            ..Config::default()
        };
        assert_eq!(cfg.match_config(Some(2)).seed, Some(2));
        assert_eq!(cfg.match_config(None).seed, Some(1));
    }
}
