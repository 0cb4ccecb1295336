use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};

use crate::truco_prelude::*;


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreboardConfig {
    pub rules: MatchRules,
}

// Command-line values take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub max_score: Option<u32>,
    pub us_name: Option<String>,
    pub them_name: Option<String>,
}

impl ScoreboardConfig {
    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(contents).context("Parsing config file")
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(max_score) = overrides.max_score {
            self.rules.max_score = max_score;
        }
        if let Some(name) = overrides.us_name {
            self.rules.team_names[Team::Us] = name;
        }
        if let Some(name) = overrides.them_name {
            self.rules.team_names[Team::Them] = name;
        }
    }
}

pub fn load_config(
    filename: Option<&str>, overrides: ConfigOverrides,
) -> anyhow::Result<ScoreboardConfig> {
    let mut config = match filename {
        Some(filename) => {
            let contents = std::fs::read_to_string(filename)
                .with_context(|| format!("Failed to read config file '{filename}'."))?;
            ScoreboardConfig::from_yaml(&contents)?
        }
        None => ScoreboardConfig::default(),
    };
    config.apply_overrides(overrides);
    config.rules.verify().map_err(|err| anyhow!("Invalid rules: {err}"))?;
    Ok(config)
}
