use clap::ValueEnum;
use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

pub const DEFAULT_SCRAMBLE_LENGTH: usize = 5;

/// Which cube representation to search over.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Model {
    /// 54 facelet labels
    #[default]
    Facelet,
    /// Corner and edge cubies with orientation
    Cubie,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    /// Plain iterative deepening
    Zero,
    /// Misplaced facelets or cubies per turn
    #[default]
    Misplaced,
}

/// Solver defaults, usually read from a TOML file. Command line flags take
/// precedence over these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub model: Model,
    pub heuristic: HeuristicKind,
    pub max_bound: Option<u32>,
    pub seed: Option<u64>,
    pub scramble_length: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            heuristic: HeuristicKind::default(),
            max_bound: None,
            seed: None,
            scramble_length: DEFAULT_SCRAMBLE_LENGTH,
        }
    }
}

impl SolverConfig {
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read solver configuration file {path:?}"))?;
        toml::from_str(&text)
            .wrap_err_with(|| format!("Failed to parse solver configuration file {path:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(toml::from_str::<SolverConfig>("").unwrap(), SolverConfig::default());
    }

    #[test]
    fn test_parse() {
        let config: SolverConfig = toml::from_str(
            r#"
            model = "cubie"
            heuristic = "zero"
            max_bound = 8
            seed = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.model, Model::Cubie);
        assert_eq!(config.heuristic, HeuristicKind::Zero);
        assert_eq!(config.max_bound, Some(8));
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.scramble_length, DEFAULT_SCRAMBLE_LENGTH);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(toml::from_str::<SolverConfig>("depth = 3").is_err());
    }
}
