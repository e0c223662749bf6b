use crate::data::bundle::Tier;
use crate::error::DraftError;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub default_tier: Tier,
    pub autosave: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, DraftError> {
        dotenvy::dotenv().ok();

        let data_dir = env::var("DRAFT_COACH_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let default_tier = match env::var("DRAFT_COACH_TIER") {
            Ok(raw) => raw.parse().map_err(|_| {
                DraftError::ConfigError(format!(
                    "DRAFT_COACH_TIER must be low, mid or high (got '{}')",
                    raw
                ))
            })?,
            Err(_) => Tier::Mid,
        };

        let autosave = env::var("DRAFT_COACH_AUTOSAVE")
            .map(|v| v != "0" && v.to_lowercase() != "false")
            .unwrap_or(true);

        Ok(Config {
            data_dir,
            default_tier,
            autosave,
        })
    }
}
