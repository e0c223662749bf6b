//! Pairing candidate heroes with the roster players best suited to them.

use crate::analysis::competency::{PlayerCompetency, COMPETENT_MIN_GAMES};
use crate::data::heroes::{hero_name, hero_role, HeroId, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Critical,
    Important,
    NiceToHave,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::Important => "important",
            Priority::NiceToHave => "nice-to-have",
        }
    }
}

/// A role the team still needs, with the heroes that would fill it.
#[derive(Debug, Clone)]
pub struct RoleNeed {
    pub role: Role,
    pub priority: Priority,
    pub heroes: Vec<HeroId>,
}

#[derive(Debug, Clone)]
pub struct HeroPlayerMatch {
    pub hero: HeroId,
    /// Best-suited roster player, if anyone has data on the hero.
    pub player: Option<String>,
    pub competency_score: f64,
    pub games: u32,
    pub priority: Priority,
    /// Nobody on the roster has played this hero enough to trust.
    pub no_one_competent: bool,
}

/// Team-composition gap: a critical role no one on the roster can fill.
#[derive(Debug, Clone)]
pub struct CompositionWarning {
    pub role: Role,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    pub recommendations: Vec<HeroPlayerMatch>,
    pub warnings: Vec<CompositionWarning>,
}

const MAX_RECOMMENDATIONS: usize = 10;

/// For each candidate hero, find the roster player with the highest
/// competency score on it (ties go to the earlier player). Heroes nobody has
/// a trustworthy record on are flagged, not dropped, so the caller can still
/// choose to assign someone. Critical role needs no player can cover produce
/// warnings independent of which hero gets picked.
pub fn match_heroes_to_players(
    candidates: &[HeroId],
    players: &[PlayerCompetency],
    role_needs: &[RoleNeed],
) -> MatchOutcome {
    let mut recommendations: Vec<HeroPlayerMatch> = candidates
        .iter()
        .map(|&hero| {
            let mut best: Option<(&PlayerCompetency, f64, u32)> = None;
            let mut anyone_competent = false;

            for player in players {
                if let Some(c) = player.hero(hero) {
                    if c.games >= COMPETENT_MIN_GAMES {
                        anyone_competent = true;
                    }
                    let beats = match best {
                        Some((_, score, _)) => c.competency_score > score,
                        None => true,
                    };
                    if beats {
                        best = Some((player, c.competency_score, c.games));
                    }
                }
            }

            let priority = role_needs
                .iter()
                .find(|need| need.heroes.contains(&hero))
                .map(|need| need.priority)
                .unwrap_or(Priority::NiceToHave);

            HeroPlayerMatch {
                hero,
                player: best.map(|(p, _, _)| p.battletag.clone()),
                competency_score: best.map(|(_, s, _)| s).unwrap_or(0.0),
                games: best.map(|(_, _, g)| g).unwrap_or(0),
                priority,
                no_one_competent: !anyone_competent,
            }
        })
        .collect();

    recommendations.sort_by(|a, b| {
        a.priority.cmp(&b.priority).then(
            b.competency_score
                .partial_cmp(&a.competency_score)
                .unwrap_or(std::cmp::Ordering::Equal),
        )
    });
    recommendations.truncate(MAX_RECOMMENDATIONS);

    let warnings = role_needs
        .iter()
        .filter(|need| need.priority == Priority::Critical)
        .filter(|need| {
            !need.heroes.iter().any(|&hero| {
                players
                    .iter()
                    .any(|p| p.hero(hero).is_some_and(|c| c.games >= COMPETENT_MIN_GAMES))
            })
        })
        .map(|need| CompositionWarning {
            role: need.role,
            message: format!(
                "No roster player has {}+ games on any {} option (e.g. {})",
                COMPETENT_MIN_GAMES,
                need.role.display_name(),
                need.heroes
                    .first()
                    .map(|&h| hero_name(h))
                    .unwrap_or("none listed"),
            ),
        })
        .collect();

    MatchOutcome {
        recommendations,
        warnings,
    }
}

/// Derive the open role needs of a team from its locked picks: a missing
/// Healer or Tank is critical, a missing damage hero important. `available`
/// supplies the heroes that could still fill each need.
pub fn role_needs_for_team(our_picks: &[HeroId], available: &[HeroId]) -> Vec<RoleNeed> {
    let has_role = |role: Role| our_picks.iter().any(|&p| hero_role(p) == role);
    let has_damage = our_picks.iter().any(|&p| hero_role(p).is_damage());
    let available_where = |pred: fn(Role) -> bool| -> Vec<HeroId> {
        available
            .iter()
            .copied()
            .filter(|&h| pred(hero_role(h)))
            .collect()
    };

    let mut needs = Vec::new();
    if !has_role(Role::Healer) {
        needs.push(RoleNeed {
            role: Role::Healer,
            priority: Priority::Critical,
            heroes: available_where(|r| r == Role::Healer),
        });
    }
    if !has_role(Role::Tank) {
        needs.push(RoleNeed {
            role: Role::Tank,
            priority: Priority::Critical,
            heroes: available_where(|r| r == Role::Tank),
        });
    }
    if !has_damage {
        needs.push(RoleNeed {
            role: Role::RangedAssassin,
            priority: Priority::Important,
            heroes: available_where(Role::is_damage),
        });
    }
    needs
}
