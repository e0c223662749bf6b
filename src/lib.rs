//! Draft companion core for a team-based competitive game.
//!
//! Ingests per-player match history and aggregate hero statistics, then
//! ranks pick/ban options at every step of the fixed 16-step draft. The two
//! numeric subsystems are the MAWP estimator ([`analysis::mawp`]) and the
//! recommendation engine ([`draft::engine`]); everything else feeds or
//! renders them. The core is synchronous pure computation: callers own the
//! [`draft::state::DraftState`] and hand in an immutable
//! [`data::bundle::DraftData`] built upstream.

pub mod analysis;
pub mod config;
pub mod data;
pub mod display;
pub mod draft;
pub mod error;
pub mod session;

pub use analysis::mawp::{
    compute_mawp, compute_mawp_percent, confidence_adjusted_mawp, MatchRecord,
};
pub use draft::engine::{generate_recommendations, DraftRecommendation};
pub use draft::state::{DraftAction, DraftState};
