//! Tournament configuration loading.
//!
//! The lineup can be loaded from a TOML file. The file is looked up in
//! the following order:
//! 1. Path given with `--config`
//! 2. Path in the `C4_CONFIG` environment variable
//! 3. `c4.toml` in the working directory
//!
//! If none of them exist, built-in defaults are used.

use anyhow::{Context, Result};
use c4_mcts::{Algorithm, DEFAULT_EXPLORATION};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "C4_CONFIG";

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "c4.toml";

/// One tournament participant: an algorithm and its simulation budget.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub algorithm: Algorithm,
    #[serde(default)]
    pub simulations: usize,
}

impl Entrant {
    pub fn new(algorithm: Algorithm, simulations: usize) -> Self {
        Self {
            algorithm,
            simulations,
        }
    }
}

impl fmt::Display for Entrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.algorithm, self.simulations)
    }
}

/// Round-robin tournament settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Games played for every ordered pair of entrants.
    pub games_per_pairing: usize,

    /// Base seed; each game derives its own seed from it.
    pub seed: u64,

    /// UCB1 exploration constant used by UCT entrants.
    pub exploration: f64,

    /// Participants in table order.
    pub entrants: Vec<Entrant>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            games_per_pairing: 100,
            seed: 0,
            exploration: DEFAULT_EXPLORATION,
            entrants: vec![
                Entrant::new(Algorithm::UniformRandom, 0),
                Entrant::new(Algorithm::Pmcgs, 500),
                Entrant::new(Algorithm::Pmcgs, 10_000),
                Entrant::new(Algorithm::Uct, 500),
                Entrant::new(Algorithm::Uct, 10_000),
            ],
        }
    }
}

/// Load the tournament config using the standard search order.
pub fn load_config(explicit: Option<&Path>) -> Result<TournamentConfig> {
    let from_env = std::env::var(CONFIG_ENV).ok();
    load_config_from(explicit, from_env.as_deref(), Path::new("."))
}

/// Search order with the environment value and working directory passed in.
pub fn load_config_from(
    explicit: Option<&Path>,
    from_env: Option<&str>,
    dir: &Path,
) -> Result<TournamentConfig> {
    if let Some(path) = explicit {
        info!("Loading config from {}", path.display());
        return load_from_path(path);
    }

    if let Some(path) = from_env {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_ENV, path.display());
            return load_from_path(&path);
        }
        warn!("{}={} not found, searching defaults", CONFIG_ENV, path.display());
    }

    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        info!("Loading config from {}", path.display());
        return load_from_path(&path);
    }

    debug!("No {} found, using built-in defaults", CONFIG_FILE);
    Ok(TournamentConfig::default())
}

/// Read and validate a config file.
pub fn load_from_path(path: &Path) -> Result<TournamentConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: TournamentConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

impl TournamentConfig {
    /// Reject lineups that cannot be played.
    pub fn validate(&self) -> Result<()> {
        if self.entrants.len() < 2 {
            anyhow::bail!("a tournament needs at least two entrants");
        }
        if self.games_per_pairing == 0 {
            anyhow::bail!("games_per_pairing must be positive");
        }
        if !(self.exploration.is_finite() && self.exploration >= 0.0) {
            anyhow::bail!("exploration must be a non-negative number");
        }
        for entrant in &self.entrants {
            if entrant.algorithm != Algorithm::UniformRandom && entrant.simulations == 0 {
                anyhow::bail!("{} needs a positive simulation count", entrant);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const LINEUP: &str = r#"
games_per_pairing = 6
seed = 99

[[entrants]]
algorithm = "UR"

[[entrants]]
algorithm = "UCT"
simulations = 200
"#;

    #[test]
    fn test_default_lineup() {
        let config = TournamentConfig::default();
        let names: Vec<String> = config.entrants.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            names,
            ["UR(0)", "PMCGS(500)", "PMCGS(10000)", "UCT(500)", "UCT(10000)"]
        );
        assert_eq!(config.games_per_pairing, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: TournamentConfig = toml::from_str(LINEUP).unwrap();
        assert_eq!(config.games_per_pairing, 6);
        assert_eq!(config.seed, 99);
        assert_eq!(config.exploration, DEFAULT_EXPLORATION);
        assert_eq!(
            config.entrants,
            vec![
                Entrant::new(Algorithm::UniformRandom, 0),
                Entrant::new(Algorithm::Uct, 200),
            ]
        );
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("lineup.toml");
        fs::write(&explicit, LINEUP).unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "games_per_pairing = 2").unwrap();

        let config = load_config_from(Some(&explicit), None, dir.path()).unwrap();
        assert_eq!(config.games_per_pairing, 6);
    }

    #[test]
    fn test_env_path_then_working_dir() {
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join("env.toml");
        fs::write(&env_file, LINEUP).unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "games_per_pairing = 2").unwrap();

        let from_env = env_file.to_str().unwrap();
        let config = load_config_from(None, Some(from_env), dir.path()).unwrap();
        assert_eq!(config.games_per_pairing, 6);

        // A dangling env path falls through to c4.toml
        let config = load_config_from(None, Some("/nonexistent/c4.toml"), dir.path()).unwrap();
        assert_eq!(config.games_per_pairing, 2);
    }

    #[test]
    fn test_defaults_when_nothing_found() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(None, None, dir.path()).unwrap();
        assert_eq!(config, TournamentConfig::default());
    }

    #[test]
    fn test_invalid_files_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");

        fs::write(&path, "games_per_pairing = \"many\"").unwrap();
        assert!(load_from_path(&path).is_err());

        fs::write(&path, "[[entrants]]\nalgorithm = \"PMCGS\"\n").unwrap();
        assert!(load_from_path(&path).is_err());

        assert!(load_from_path(&dir.path().join("missing.toml")).is_err());
    }
}
