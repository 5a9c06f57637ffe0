use blackjack_os::{simulation::SimulationConfig, Rule, SimulationError};
use serde::{Deserialize, Serialize};
use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid report format {0:?}")]
    ReportFormat(String),

    #[error(transparent)]
    Rule(#[from] SimulationError),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rule: ConfigRule,
    pub blackjack_simulator: ConfigBlackjackSimulator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRule {
    pub number_of_decks: u8,
    pub reshuffle_proportion: f64,
    pub allow_double: bool,
    pub allow_split: bool,
    pub allow_late_surrender: bool,
    pub surrender_threshold: f64,
}

impl Default for ConfigRule {
    fn default() -> Self {
        let rule = Rule::default();
        ConfigRule {
            number_of_decks: rule.number_of_decks,
            reshuffle_proportion: rule.reshuffle_proportion,
            allow_double: rule.allow_double,
            allow_split: rule.allow_split,
            allow_late_surrender: rule.allow_late_surrender,
            surrender_threshold: rule.surrender_threshold,
        }
    }
}

impl TryFrom<ConfigRule> for Rule {
    type Error = SimulationError;

    fn try_from(config_rule: ConfigRule) -> Result<Rule, Self::Error> {
        let rule = Rule {
            number_of_decks: config_rule.number_of_decks,
            reshuffle_proportion: config_rule.reshuffle_proportion,
            allow_double: config_rule.allow_double,
            allow_split: config_rule.allow_split,
            allow_late_surrender: config_rule.allow_late_surrender,
            surrender_threshold: config_rule.surrender_threshold,
        };
        rule.validate()?;

        Ok(rule)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_enum_str, Deserialize_enum_str)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Yaml,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigBlackjackSimulator {
    pub number_of_threads: usize,
    pub games: u64,
    pub seed: Option<u64>,
    pub report_format: String,
}

impl Default for ConfigBlackjackSimulator {
    fn default() -> Self {
        let simulation_config = SimulationConfig::default();
        ConfigBlackjackSimulator {
            number_of_threads: simulation_config.number_of_threads,
            games: simulation_config.games,
            seed: simulation_config.seed,
            report_format: ReportFormat::Text.to_string(),
        }
    }
}

impl ConfigBlackjackSimulator {
    pub fn get_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            games: self.games,
            number_of_threads: self.number_of_threads,
            seed: self.seed,
        }
    }

    pub fn get_report_format(&self) -> Result<ReportFormat, ConfigError> {
        self.report_format
            .parse()
            .map_err(|_| ConfigError::ReportFormat(self.report_format.clone()))
    }
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file<P: AsRef<Path>>(filename: P) -> Result<Config, ConfigError> {
    let path = filename.as_ref();
    let file_content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&file_content)
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}
