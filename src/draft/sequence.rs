//! The fixed 16-step ban/pick protocol.
//!
//! Invariant: every step selects exactly one hero, even where a label groups
//! two consecutive picks into a phase (e.g. the two "Pick 2" steps). Nothing
//! may be inferred from labels; they are display text only.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::A => write!(f, "A"),
            Team::B => write!(f, "B"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepAction {
    Ban,
    Pick,
}

#[derive(Debug, Clone, Copy)]
pub struct DraftStep {
    pub team: Team,
    pub action: StepAction,
    pub label: &'static str,
}

pub const DRAFT_LEN: usize = 16;

pub const DRAFT_SEQUENCE: [DraftStep; DRAFT_LEN] = [
    DraftStep { team: Team::A, action: StepAction::Ban, label: "Ban 1" },
    DraftStep { team: Team::B, action: StepAction::Ban, label: "Ban 1" },
    DraftStep { team: Team::A, action: StepAction::Ban, label: "Ban 2" },
    DraftStep { team: Team::B, action: StepAction::Ban, label: "Ban 2" },
    DraftStep { team: Team::A, action: StepAction::Pick, label: "Pick 1" },
    DraftStep { team: Team::B, action: StepAction::Pick, label: "Pick 1" },
    DraftStep { team: Team::B, action: StepAction::Pick, label: "Pick 2" },
    DraftStep { team: Team::A, action: StepAction::Pick, label: "Pick 2" },
    DraftStep { team: Team::A, action: StepAction::Pick, label: "Pick 3" },
    DraftStep { team: Team::B, action: StepAction::Ban, label: "Ban 3" },
    DraftStep { team: Team::A, action: StepAction::Ban, label: "Ban 3" },
    DraftStep { team: Team::B, action: StepAction::Pick, label: "Pick 3" },
    DraftStep { team: Team::B, action: StepAction::Pick, label: "Pick 4" },
    DraftStep { team: Team::A, action: StepAction::Pick, label: "Pick 4" },
    DraftStep { team: Team::A, action: StepAction::Pick, label: "Pick 5" },
    DraftStep { team: Team::B, action: StepAction::Pick, label: "Pick 5" },
];
