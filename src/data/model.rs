//! Wire format of the precomputed data bundle.
//!
//! The bundle is produced by the external stats collaborator for one
//! map/tier combination; this module only describes its JSON shape. Hero
//! names arrive as raw strings and are interned to [`crate::data::heroes::HeroId`]
//! in `bundle.rs`, never used as keys past that boundary.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::DraftError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleDto {
    #[serde(default)]
    pub map: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub hero_stats: Vec<HeroStatsDto>,
    #[serde(default)]
    pub synergies: Vec<MatchupDto>,
    #[serde(default)]
    pub counters: Vec<MatchupDto>,
    #[serde(default)]
    pub players: Vec<PlayerDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroStatsDto {
    pub hero: String,
    pub win_rate: f64,
    #[serde(default)]
    pub pick_rate: f64,
    #[serde(default)]
    pub ban_rate: f64,
    pub games_played: u32,
}

/// One pairwise cell. For synergies `win_rate` is the pair's win rate on the
/// same team (symmetric); for counters it is `hero`'s win rate against
/// `other` (asymmetric).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupDto {
    pub hero: String,
    pub other: String,
    pub win_rate: f64,
    pub games_played: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub battletag: String,
    #[serde(default)]
    pub heroes: Vec<PlayerHeroDto>,
    #[serde(default)]
    pub maps: Vec<PlayerMapDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerHeroDto {
    pub hero: String,
    pub games_played: u32,
    pub win_rate: f64,
    /// Precomputed estimator output, [0,1]. Recomputed from `matches` when
    /// absent.
    #[serde(default)]
    pub mawp: Option<f64>,
    #[serde(default)]
    pub matches: Vec<MatchRecordDto>,
    #[serde(default)]
    pub maps: Vec<PlayerMapDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMapDto {
    pub map: String,
    pub games_played: u32,
    pub win_rate: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecordDto {
    pub won: bool,
    pub game_date: DateTime<Utc>,
}

/// Roster file: up to five battletags, slot order preserved.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterDto {
    pub players: Vec<String>,
}

impl BundleDto {
    pub fn load(path: &Path) -> Result<Self, DraftError> {
        let content = fs::read_to_string(path)
            .map_err(|e| DraftError::IoError(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| DraftError::JsonError(format!("{}: {}", path.display(), e)))
    }
}

impl RosterDto {
    pub fn load(path: &Path) -> Result<Self, DraftError> {
        let content = fs::read_to_string(path)
            .map_err(|e| DraftError::IoError(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| DraftError::JsonError(format!("{}: {}", path.display(), e)))
    }
}
