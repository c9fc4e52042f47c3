use crate::battle::state::TypeValidation;
use crate::errors::ConfigError;
use clap::Parser;
use schema::DiceMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime settings for the companion binaries.
///
/// Read from an optional RON file; every field has a default so a partial
/// file (or none at all) works.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CompanionConfig {
    /// JSON key-value file holding the saved roster.
    pub roster_path: PathBuf,
    /// Custom type chart; the bundled chart is used when unset.
    pub type_chart_path: Option<PathBuf>,
    pub dice_mode: DiceMode,
    pub type_validation: TypeValidation,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from("pokemon_data.json"),
            type_chart_path: None,
            dice_mode: DiceMode::Manual,
            type_validation: TypeValidation::Permissive,
        }
    }
}

impl CompanionConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        ron::from_str(source).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&source)
    }
}

/// Command-line flags shared by the REPL and the MCP server.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about = "Dice and type-bonus companion for tabletop Pokemon battles")]
pub struct CliArgs {
    /// RON config file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// JSON file the roster is saved in
    #[arg(long = "roster")]
    pub roster: Option<PathBuf>,

    /// RON type chart to use instead of the bundled one
    #[arg(long = "type-chart")]
    pub type_chart: Option<PathBuf>,

    /// Dice mode (manual, d6, d4)
    #[arg(long = "dice")]
    pub dice: Option<DiceMode>,

    /// Reject unknown type names and more than two types
    #[arg(long = "strict-types")]
    pub strict_types: bool,

    /// Debug-level logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl CliArgs {
    /// The config file (or defaults) with the command-line flags applied on
    /// top.
    pub fn resolve(&self) -> Result<CompanionConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => CompanionConfig::load(path)?,
            None => CompanionConfig::default(),
        };

        if let Some(roster) = &self.roster {
            config.roster_path = roster.clone();
        }
        if let Some(chart) = &self.type_chart {
            config.type_chart_path = Some(chart.clone());
        }
        if let Some(dice) = self.dice {
            config.dice_mode = dice;
        }
        if self.strict_types {
            config.type_validation = TypeValidation::Strict;
        }
        Ok(config)
    }
}
