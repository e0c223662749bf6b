//! Per-player hero competency.
//!
//! A single comparable number per (player, hero): win-rate quality times a
//! log-scaled experience factor, with a small multiplier when the player has
//! a proven record on the selected map. The logarithm deliberately damps raw
//! game counts so a 60%-over-40-games hero does not bury a 70%-over-15-games
//! one.

use crate::data::bundle::{MapRecord, PlayerProfile};
use crate::data::heroes::HeroId;

/// Minimum record to call a player "competent" with a hero.
pub const COMPETENT_MIN_GAMES: u32 = 5;
pub const COMPETENT_MIN_WIN_RATE: f64 = 45.0;

/// Minimum record to call a player "good" with a hero.
pub const GOOD_MIN_GAMES: u32 = 5;
pub const GOOD_MIN_WIN_RATE: f64 = 50.0;

const MAP_BONUS_MIN_GAMES: u32 = 3;
const MAP_BONUS_MIN_WIN_RATE: f64 = 60.0;
const MAP_BONUS_MULTIPLIER: f64 = 1.2;

#[derive(Debug, Clone)]
pub struct HeroCompetency {
    pub hero: HeroId,
    /// [0,100].
    pub win_rate: f64,
    pub games: u32,
    pub competency_score: f64,
    pub map_bonus: bool,
}

impl HeroCompetency {
    pub fn is_competent(&self) -> bool {
        self.games >= COMPETENT_MIN_GAMES && self.win_rate >= COMPETENT_MIN_WIN_RATE
    }

    pub fn is_good(&self) -> bool {
        self.games >= GOOD_MIN_GAMES && self.win_rate >= GOOD_MIN_WIN_RATE
    }
}

#[derive(Debug, Clone)]
pub struct PlayerCompetency {
    pub battletag: String,
    pub slot: usize,
    /// Descending by `competency_score`.
    pub top_heroes: Vec<HeroCompetency>,
    pub total_games: u32,
    /// [0,100].
    pub overall_win_rate: f64,
}

impl PlayerCompetency {
    /// Empty struct for an unregistered or unknown player.
    pub fn empty(battletag: &str, slot: usize) -> Self {
        PlayerCompetency {
            battletag: battletag.to_string(),
            slot,
            top_heroes: Vec::new(),
            total_games: 0,
            overall_win_rate: 0.0,
        }
    }

    pub fn hero(&self, hero: HeroId) -> Option<&HeroCompetency> {
        self.top_heroes.iter().find(|h| h.hero == hero)
    }
}

/// Score one hero for one player. Zero games yields an all-zero competency.
pub fn hero_competency(
    hero: HeroId,
    win_rate: f64,
    games: u32,
    selected_map: Option<&str>,
    map_stats: Option<&MapRecord>,
) -> HeroCompetency {
    if games == 0 {
        return HeroCompetency {
            hero,
            win_rate: 0.0,
            games: 0,
            competency_score: 0.0,
            map_bonus: false,
        };
    }

    let map_bonus = selected_map.is_some()
        && map_stats.is_some_and(|m| {
            m.games >= MAP_BONUS_MIN_GAMES && m.win_rate >= MAP_BONUS_MIN_WIN_RATE
        });
    let multiplier = if map_bonus { MAP_BONUS_MULTIPLIER } else { 1.0 };

    let experience = ((games + 1) as f64).ln();
    HeroCompetency {
        hero,
        win_rate,
        games,
        competency_score: (win_rate / 100.0) * experience * multiplier,
        map_bonus,
    }
}

/// Score every hero a player has played, sorted descending by score.
pub fn player_competency(
    battletag: &str,
    slot: usize,
    profile: Option<&PlayerProfile>,
    selected_map: Option<&str>,
) -> PlayerCompetency {
    let profile = match profile {
        Some(p) => p,
        None => return PlayerCompetency::empty(battletag, slot),
    };

    let mut top_heroes: Vec<HeroCompetency> = profile
        .heroes
        .iter()
        .map(|(&hero, stats)| {
            let map_record = selected_map.and_then(|map| stats.map_record(map));
            hero_competency(hero, stats.win_rate, stats.games, selected_map, map_record.as_ref())
        })
        .collect();

    top_heroes.sort_by(|a, b| {
        b.competency_score
            .partial_cmp(&a.competency_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    PlayerCompetency {
        battletag: battletag.to_string(),
        slot,
        top_heroes,
        total_games: profile.total_games(),
        overall_win_rate: profile.overall_win_rate(),
    }
}
