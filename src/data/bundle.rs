//! Resolved, immutable data bundle handed to the engine.
//!
//! Raw bundle DTOs key everything by hero name; resolution interns names to
//! [`HeroId`] once, so downstream lookups are array indexing. Pairwise data
//! lives in dense id-by-id matrices with an explicit no-data sentinel, which
//! also gives deterministic iteration order. The bundle is never mutated
//! mid-draft; callers rebuild it when the underlying stats refresh.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::analysis::mawp::{compute_mawp, MatchRecord};
use crate::data::heroes::{hero_count, HeroId, HeroPool};
use crate::data::model::{BundleDto, PlayerDto};

/// Coarse skill bucket selecting which aggregate statistics apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Tier {
    Low,
    #[default]
    Mid,
    High,
}

impl FromStr for Tier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Tier::Low),
            "mid" => Ok(Tier::Mid),
            "high" => Ok(Tier::High),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Low => "low",
            Tier::Mid => "mid",
            Tier::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// Aggregate base statistics for one hero at the bundle's tier.
#[derive(Debug, Clone, Copy)]
pub struct HeroStats {
    /// [0,100].
    pub win_rate: f64,
    pub pick_rate: f64,
    pub ban_rate: f64,
    pub games: u32,
}

/// One pairwise win-rate sample.
#[derive(Debug, Clone, Copy)]
pub struct MatchupStat {
    /// [0,100].
    pub win_rate: f64,
    pub games: u32,
}

/// Win rate and game count on one map.
#[derive(Debug, Clone, Copy)]
pub struct MapRecord {
    pub games: u32,
    /// [0,100].
    pub win_rate: f64,
}

/// Dense hero-by-hero matrix with an explicit no-data sentinel.
#[derive(Debug, Clone)]
pub struct PairMatrix {
    n: usize,
    cells: Vec<Option<MatchupStat>>,
}

impl PairMatrix {
    pub fn new(n: usize) -> Self {
        PairMatrix {
            n,
            cells: vec![None; n * n],
        }
    }

    pub fn get(&self, a: HeroId, b: HeroId) -> Option<MatchupStat> {
        self.cells[a.0 as usize * self.n + b.0 as usize]
    }

    pub fn set(&mut self, a: HeroId, b: HeroId, stat: MatchupStat) {
        self.cells[a.0 as usize * self.n + b.0 as usize] = Some(stat);
    }
}

/// Per-hero record inside a player profile.
#[derive(Debug, Clone)]
pub struct PlayerHeroStats {
    pub games: u32,
    /// [0,100].
    pub win_rate: f64,
    /// [0,1] fraction, precomputed upstream or derived from raw match logs.
    pub mawp: f64,
    maps: BTreeMap<String, MapRecord>,
}

impl PlayerHeroStats {
    pub fn new(games: u32, win_rate: f64, mawp: f64) -> Self {
        PlayerHeroStats {
            games,
            win_rate,
            mawp,
            maps: BTreeMap::new(),
        }
    }

    pub fn with_map(mut self, map: &str, record: MapRecord) -> Self {
        self.maps.insert(map.to_string(), record);
        self
    }

    pub fn map_record(&self, map: &str) -> Option<MapRecord> {
        self.maps.get(map).copied()
    }
}

/// Everything known about one roster battletag.
#[derive(Debug, Clone, Default)]
pub struct PlayerProfile {
    pub battletag: String,
    pub heroes: BTreeMap<HeroId, PlayerHeroStats>,
    pub maps: BTreeMap<String, MapRecord>,
}

impl PlayerProfile {
    pub fn total_games(&self) -> u32 {
        self.heroes.values().map(|h| h.games).sum()
    }

    pub fn overall_win_rate(&self) -> f64 {
        let total = self.total_games();
        if total == 0 {
            return 0.0;
        }
        let weighted: f64 = self
            .heroes
            .values()
            .map(|h| h.win_rate * h.games as f64)
            .sum();
        weighted / total as f64
    }
}

/// Immutable read-only bundle for one map/tier combination.
#[derive(Debug, Clone)]
pub struct DraftData {
    pub map: Option<String>,
    pub tier: Tier,
    hero_stats: Vec<Option<HeroStats>>,
    synergy: PairMatrix,
    counters: PairMatrix,
    players: HashMap<String, PlayerProfile>,
}

impl DraftData {
    pub fn builder(tier: Tier) -> DraftDataBuilder {
        DraftDataBuilder::new(tier)
    }

    pub fn hero_stats(&self, hero: HeroId) -> Option<HeroStats> {
        self.hero_stats[hero.0 as usize]
    }

    /// Win rate of `a` and `b` together on one team. Symmetric.
    pub fn synergy(&self, a: HeroId, b: HeroId) -> Option<MatchupStat> {
        self.synergy.get(a, b)
    }

    /// Win rate of `a` against `b` on the opposing team. Asymmetric.
    pub fn counter(&self, a: HeroId, b: HeroId) -> Option<MatchupStat> {
        self.counters.get(a, b)
    }

    pub fn player(&self, battletag: &str) -> Option<&PlayerProfile> {
        self.players.get(battletag)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}

/// Step-wise bundle resolution, so a caller can drive a progress bar over
/// the per-player pass (MAWP recomputation is the slow part).
pub struct DraftDataBuilder {
    data: DraftData,
    pool: HeroPool,
    /// Bundle rows referencing heroes missing from the central table.
    pub skipped: Vec<String>,
}

impl DraftDataBuilder {
    pub fn new(tier: Tier) -> Self {
        let n = hero_count();
        DraftDataBuilder {
            data: DraftData {
                map: None,
                tier,
                hero_stats: vec![None; n],
                synergy: PairMatrix::new(n),
                counters: PairMatrix::new(n),
                players: HashMap::new(),
            },
            pool: HeroPool::new(),
            skipped: Vec::new(),
        }
    }

    pub fn set_map(&mut self, map: Option<String>) {
        self.data.map = map;
    }

    pub fn set_tier(&mut self, tier: Tier) {
        self.data.tier = tier;
    }

    fn resolve(&mut self, name: &str) -> Option<HeroId> {
        match self.pool.id(name) {
            Some(id) => Some(id),
            None => {
                self.skipped.push(name.to_string());
                None
            }
        }
    }

    pub fn add_header(&mut self, dto: &BundleDto) {
        self.data.map = dto.map.clone();
        if let Some(tier) = dto.tier.as_deref().and_then(|t| t.parse().ok()) {
            self.data.tier = tier;
        }
    }

    pub fn add_hero_stats(&mut self, dto: &BundleDto) {
        for row in &dto.hero_stats {
            if let Some(id) = self.resolve(&row.hero) {
                self.data.hero_stats[id.0 as usize] = Some(HeroStats {
                    win_rate: row.win_rate,
                    pick_rate: row.pick_rate,
                    ban_rate: row.ban_rate,
                    games: row.games_played,
                });
            }
        }
    }

    pub fn add_matchups(&mut self, dto: &BundleDto) {
        for row in &dto.synergies {
            if let (Some(a), Some(b)) = (self.resolve(&row.hero), self.resolve(&row.other)) {
                let stat = MatchupStat {
                    win_rate: row.win_rate,
                    games: row.games_played,
                };
                // Same-team relation: mirror into both cells.
                self.data.synergy.set(a, b, stat);
                self.data.synergy.set(b, a, stat);
            }
        }
        for row in &dto.counters {
            if let (Some(a), Some(b)) = (self.resolve(&row.hero), self.resolve(&row.other)) {
                self.data.counters.set(
                    a,
                    b,
                    MatchupStat {
                        win_rate: row.win_rate,
                        games: row.games_played,
                    },
                );
            }
        }
    }

    /// Resolve one player profile. Recomputes MAWP from the raw match log
    /// when the bundle did not ship a precomputed value.
    pub fn add_player(&mut self, dto: &PlayerDto) {
        let mut profile = PlayerProfile {
            battletag: dto.battletag.clone(),
            ..Default::default()
        };

        for hero_row in &dto.heroes {
            let Some(id) = self.resolve(&hero_row.hero) else {
                continue;
            };

            let mawp = match hero_row.mawp {
                Some(value) => value,
                None if !hero_row.matches.is_empty() => {
                    let records: Vec<MatchRecord> = hero_row
                        .matches
                        .iter()
                        .map(|m| MatchRecord {
                            won: m.won,
                            game_date: m.game_date,
                        })
                        .collect();
                    compute_mawp(&records, Utc::now())
                }
                None => hero_row.win_rate / 100.0,
            };

            let mut stats = PlayerHeroStats::new(hero_row.games_played, hero_row.win_rate, mawp);
            for map_row in &hero_row.maps {
                stats = stats.with_map(
                    &map_row.map,
                    MapRecord {
                        games: map_row.games_played,
                        win_rate: map_row.win_rate,
                    },
                );
            }
            profile.heroes.insert(id, stats);
        }

        for map_row in &dto.maps {
            profile.maps.insert(
                map_row.map.clone(),
                MapRecord {
                    games: map_row.games_played,
                    win_rate: map_row.win_rate,
                },
            );
        }

        self.data.players.insert(dto.battletag.clone(), profile);
    }

    pub fn finish(self) -> (DraftData, Vec<String>) {
        (self.data, self.skipped)
    }
}
