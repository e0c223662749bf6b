//! Caller-owned draft session state and its reducer.
//!
//! The reducer actions are the only legal mutations. Illegal actions (undo
//! at step 0, selecting past the last step, selecting an unavailable hero)
//! leave the state unchanged rather than failing; the core degrades silently
//! on bad input by policy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::data::bundle::Tier;
use crate::data::heroes::HeroId;
use crate::draft::sequence::{DraftStep, StepAction, Team, DRAFT_LEN, DRAFT_SEQUENCE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Drafting,
    Complete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub battletag: Option<String>,
}

#[derive(Debug, Clone)]
pub enum DraftAction {
    SetMap(String),
    SetTier(Tier),
    SetTeam(Team),
    SetPlayer { slot: usize, battletag: Option<String> },
    StartDraft,
    SelectHero(HeroId),
    AssignPlayer { step: usize, battletag: String },
    Undo,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftState {
    pub phase: Phase,
    pub map: Option<String>,
    pub tier: Tier,
    pub our_team: Team,
    pub current_step: usize,
    /// Step index → selected hero; only ever holds entries below
    /// `current_step`.
    pub selections: BTreeMap<usize, HeroId>,
    pub player_slots: [PlayerSlot; 5],
    /// Step index → battletag assigned to play that pick.
    pub player_assignments: BTreeMap<usize, String>,
}

impl DraftState {
    pub fn new() -> Self {
        DraftState {
            phase: Phase::Setup,
            map: None,
            tier: Tier::Mid,
            our_team: Team::A,
            current_step: 0,
            selections: BTreeMap::new(),
            player_slots: Default::default(),
            player_assignments: BTreeMap::new(),
        }
    }

    /// The step awaiting a selection, or `None` outside the drafting phase.
    pub fn current(&self) -> Option<&'static DraftStep> {
        if self.phase == Phase::Drafting && self.current_step < DRAFT_LEN {
            Some(&DRAFT_SEQUENCE[self.current_step])
        } else {
            None
        }
    }

    /// A hero selected anywhere (ban or pick, either side) is gone for the
    /// rest of the draft.
    pub fn is_available(&self, hero: HeroId) -> bool {
        !self.selections.values().any(|&h| h == hero)
    }

    pub fn picks_for(&self, team: Team) -> Vec<HeroId> {
        self.selections
            .iter()
            .filter(|(&step, _)| {
                DRAFT_SEQUENCE[step].team == team && DRAFT_SEQUENCE[step].action == StepAction::Pick
            })
            .map(|(_, &hero)| hero)
            .collect()
    }

    pub fn bans(&self) -> Vec<HeroId> {
        self.selections
            .iter()
            .filter(|(&step, _)| DRAFT_SEQUENCE[step].action == StepAction::Ban)
            .map(|(_, &hero)| hero)
            .collect()
    }

    pub fn roster_battletags(&self) -> Vec<&str> {
        self.player_slots
            .iter()
            .filter_map(|s| s.battletag.as_deref())
            .collect()
    }

    /// Roster members not yet assigned to a pick.
    pub fn unassigned_battletags(&self) -> Vec<&str> {
        self.roster_battletags()
            .into_iter()
            .filter(|tag| !self.player_assignments.values().any(|a| a == tag))
            .collect()
    }

    pub fn apply(&mut self, action: DraftAction) {
        match action {
            DraftAction::SetMap(map) => {
                self.map = Some(map);
            }
            DraftAction::SetTier(tier) => {
                self.tier = tier;
            }
            DraftAction::SetTeam(team) => {
                self.our_team = team;
            }
            DraftAction::SetPlayer { slot, battletag } => {
                if let Some(entry) = self.player_slots.get_mut(slot) {
                    entry.battletag = battletag;
                }
            }
            DraftAction::StartDraft => {
                if self.phase == Phase::Setup {
                    self.phase = Phase::Drafting;
                    self.current_step = 0;
                }
            }
            DraftAction::SelectHero(hero) => {
                if self.phase == Phase::Drafting
                    && self.current_step < DRAFT_LEN
                    && self.is_available(hero)
                {
                    self.selections.insert(self.current_step, hero);
                    self.current_step += 1;
                    if self.current_step == DRAFT_LEN {
                        self.phase = Phase::Complete;
                    }
                }
            }
            DraftAction::AssignPlayer { step, battletag } => {
                let on_roster = self
                    .roster_battletags()
                    .iter()
                    .any(|tag| *tag == battletag);
                if on_roster && self.selections.contains_key(&step) {
                    self.player_assignments.insert(step, battletag);
                }
            }
            DraftAction::Undo => {
                // Never implicitly leaves Complete; only Reset does.
                if self.phase == Phase::Drafting && self.current_step > 0 {
                    self.current_step -= 1;
                    self.selections.remove(&self.current_step);
                    self.player_assignments.remove(&self.current_step);
                }
            }
            DraftAction::Reset => {
                self.phase = Phase::Setup;
                self.current_step = 0;
                self.selections.clear();
                self.player_assignments.clear();
            }
        }
    }
}

impl Default for DraftState {
    fn default() -> Self {
        Self::new()
    }
}
