//! Scoring engine behind every ban and pick suggestion.
//!
//! For the current step it ranks candidate heroes by an estimated
//! win-probability delta in percentage points from the 50% baseline. Three
//! branches: ban targets (either team's ban), our own pick, and enemy-turn
//! threats. Missing data never errors; a factor with no sample behind it is
//! simply left out of the sum.

use crate::analysis::mawp::{confidence_adjusted_mawp, Confidence, CONFIDENCE_THRESHOLD};
use crate::data::bundle::DraftData;
use crate::data::heroes::{all_heroes, hero_name, hero_role, HeroId, Role};
use crate::draft::sequence::StepAction;
use crate::draft::state::DraftState;

/// Policy knobs. Hand-tuned values carried over intact; fork here, not at
/// call sites.
mod policy {
    /// Candidates returned per turn.
    pub const MAX_RESULTS: usize = 15;
    /// Sample gate for a hero's base win rate.
    pub const BASE_MIN_GAMES: u32 = 100;
    pub const BASE_NOISE_FLOOR: f64 = 0.5;
    /// Sample gate for any pairwise matchup cell.
    pub const MATCHUP_MIN_GAMES: u32 = 30;
    pub const MATCHUP_NOISE_FLOOR: f64 = 1.0;
    /// Player-strength factor: minimum games on the hero and minimum delta
    /// worth reporting.
    pub const PLAYER_MIN_GAMES: u32 = 10;
    pub const PLAYER_MIN_DELTA: f64 = 2.0;
    /// Community ban rate worth denying, and its weight in the ban score.
    pub const CONTESTED_BAN_RATE: f64 = 15.0;
    pub const CONTESTED_BAN_WEIGHT: f64 = 0.1;
    /// A counter must clear this win rate to justify a ban.
    pub const BAN_COUNTER_MIN_WIN_RATE: f64 = 53.0;
    /// Banning a Healer/Tank the enemy already fields wastes the ban.
    pub const BAN_ROLE_FILLED_PENALTY: f64 = -8.0;
    /// First Tank / first Healer / first damage hero.
    pub const ROLE_FIRST_BONUS: f64 = 3.0;
    /// First Bruiser or melee when a Tank is already locked.
    pub const ROLE_FRONTLINE_BONUS: f64 = 1.5;
    /// Second Healer or second Tank.
    pub const ROLE_DUPLICATE_PENALTY: f64 = -15.0;
    /// Third or later Support.
    pub const ROLE_THIRD_SUPPORT_PENALTY: f64 = -8.0;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonKind {
    BaseWinRate,
    ContestedBan,
    ThreatToOurPicks,
    WastedBanRole,
    CountersEnemy,
    SynergyWithAlly,
    PlayerStrength,
    RoleNeeded,
    RoleDuplicate,
}

/// One justification line with its percentage-point contribution.
#[derive(Debug, Clone)]
pub struct RecommendationReason {
    pub kind: ReasonKind,
    pub label: String,
    pub delta: f64,
}

/// Unit of engine output, one per candidate hero.
#[derive(Debug, Clone)]
pub struct DraftRecommendation {
    pub hero: HeroId,
    pub net_delta: f64,
    pub reasons: Vec<RecommendationReason>,
    pub suggested_player: Option<String>,
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Rank candidate actions for the current step. Empty outside the drafting
/// phase. Heroes already selected anywhere are excluded before scoring.
pub fn generate_recommendations(state: &DraftState, data: &DraftData) -> Vec<DraftRecommendation> {
    let step = match state.current() {
        Some(step) => step,
        None => return Vec::new(),
    };

    let available: Vec<HeroId> = all_heroes().filter(|&h| state.is_available(h)).collect();
    let our_picks = state.picks_for(state.our_team);
    let enemy_picks = state.picks_for(state.our_team.opponent());

    let mut recommendations: Vec<DraftRecommendation> = available
        .iter()
        .map(|&hero| match (step.action, step.team == state.our_team) {
            (StepAction::Ban, _) => score_ban_target(hero, &our_picks, &enemy_picks, data),
            (StepAction::Pick, true) => score_our_pick(hero, state, &our_picks, &enemy_picks, data),
            (StepAction::Pick, false) => score_enemy_threat(hero, &our_picks, data),
        })
        .collect();

    recommendations.sort_by(|a, b| {
        b.net_delta
            .partial_cmp(&a.net_delta)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.hero.cmp(&b.hero))
    });
    recommendations.truncate(policy::MAX_RESULTS);
    recommendations
}

fn finish(hero: HeroId, reasons: Vec<RecommendationReason>, suggested_player: Option<String>) -> DraftRecommendation {
    let net_delta = reasons.iter().map(|r| r.delta).sum();
    DraftRecommendation {
        hero,
        net_delta,
        reasons,
        suggested_player,
    }
}

/// Branch (a): what should be removed from the pool, whoever is banning.
fn score_ban_target(
    hero: HeroId,
    our_picks: &[HeroId],
    enemy_picks: &[HeroId],
    data: &DraftData,
) -> DraftRecommendation {
    let mut reasons = Vec::new();

    if let Some(stats) = data.hero_stats(hero) {
        // Deny a strong hero.
        let delta = stats.win_rate - 50.0;
        if delta > 0.0 {
            reasons.push(RecommendationReason {
                kind: ReasonKind::BaseWinRate,
                label: format!("Strong hero ({:.1}% WR)", stats.win_rate),
                delta,
            });
        }
        // Deny a contested hero.
        if stats.ban_rate >= policy::CONTESTED_BAN_RATE {
            reasons.push(RecommendationReason {
                kind: ReasonKind::ContestedBan,
                label: format!("Heavily contested ({:.0}% ban rate)", stats.ban_rate),
                delta: stats.ban_rate * policy::CONTESTED_BAN_WEIGHT,
            });
        }
    }

    // Deny a threat to the picks we already locked in.
    for &pick in our_picks {
        if let Some(matchup) = data.counter(hero, pick) {
            if matchup.games >= policy::MATCHUP_MIN_GAMES
                && matchup.win_rate >= policy::BAN_COUNTER_MIN_WIN_RATE
            {
                reasons.push(RecommendationReason {
                    kind: ReasonKind::ThreatToOurPicks,
                    label: format!(
                        "Counters our {} ({:.1}% WR)",
                        hero_name(pick),
                        matchup.win_rate
                    ),
                    delta: matchup.win_rate - 50.0,
                });
            }
        }
    }

    // A Healer/Tank ban is wasted once the enemy already fields that role.
    let role = hero_role(hero);
    if matches!(role, Role::Healer | Role::Tank)
        && enemy_picks.iter().any(|&p| hero_role(p) == role)
    {
        reasons.push(RecommendationReason {
            kind: ReasonKind::WastedBanRole,
            label: format!("Enemy already has a {}", role.display_name()),
            delta: policy::BAN_ROLE_FILLED_PENALTY,
        });
    }

    finish(hero, reasons, None)
}

/// Branch (b): our pick turn, all six factors.
fn score_our_pick(
    hero: HeroId,
    state: &DraftState,
    our_picks: &[HeroId],
    enemy_picks: &[HeroId],
    data: &DraftData,
) -> DraftRecommendation {
    let mut reasons = Vec::new();

    base_win_rate_factor(hero, data, &mut reasons);

    // Factor 2: counters against each locked enemy pick.
    for &enemy in enemy_picks {
        if let Some(matchup) = data.counter(hero, enemy) {
            if matchup.games >= policy::MATCHUP_MIN_GAMES {
                let delta = round1(matchup.win_rate - 50.0);
                if delta.abs() >= policy::MATCHUP_NOISE_FLOOR {
                    let label = if delta > 0.0 {
                        format!("Strong against {} ({:.1}% WR)", hero_name(enemy), matchup.win_rate)
                    } else {
                        format!("Weak against {} ({:.1}% WR)", hero_name(enemy), matchup.win_rate)
                    };
                    reasons.push(RecommendationReason {
                        kind: ReasonKind::CountersEnemy,
                        label,
                        delta,
                    });
                }
            }
        }
    }

    // Factor 3: synergy with each of our own picks.
    for &ally in our_picks {
        if let Some(matchup) = data.synergy(hero, ally) {
            if matchup.games >= policy::MATCHUP_MIN_GAMES {
                let delta = round1(matchup.win_rate - 50.0);
                if delta.abs() >= policy::MATCHUP_NOISE_FLOOR {
                    let label = if delta > 0.0 {
                        format!("Pairs well with {} ({:.1}% WR)", hero_name(ally), matchup.win_rate)
                    } else {
                        format!("Poor pairing with {} ({:.1}% WR)", hero_name(ally), matchup.win_rate)
                    };
                    reasons.push(RecommendationReason {
                        kind: ReasonKind::SynergyWithAlly,
                        label,
                        delta,
                    });
                }
            }
        }
    }

    // Factor 4: the single best unassigned roster player on this hero.
    let mut suggested_player: Option<String> = None;
    let mut best_delta = 0.0;
    let mut best_games = 0;
    for tag in state.unassigned_battletags() {
        let Some(profile) = data.player(tag) else { continue };
        let Some(hero_stats) = profile.heroes.get(&hero) else { continue };
        if hero_stats.games < policy::PLAYER_MIN_GAMES {
            continue;
        }
        let adjusted = confidence_adjusted_mawp(
            hero_stats.mawp,
            hero_stats.win_rate / 100.0,
            hero_stats.games,
            CONFIDENCE_THRESHOLD,
        );
        let delta = round1(adjusted * 100.0 - 50.0);
        if delta >= policy::PLAYER_MIN_DELTA && delta > best_delta {
            best_delta = delta;
            best_games = hero_stats.games;
            suggested_player = Some(tag.to_string());
        }
    }
    if let Some(ref tag) = suggested_player {
        reasons.push(RecommendationReason {
            kind: ReasonKind::PlayerStrength,
            label: format!(
                "{} is in form on this hero (+{:.1}, {} confidence)",
                tag,
                best_delta,
                Confidence::from_games(best_games).label()
            ),
            delta: best_delta,
        });
    }

    // Factors 5 and 6: composition needs.
    let role = hero_role(hero);
    let tanks = count_role(our_picks, Role::Tank);
    let healers = count_role(our_picks, Role::Healer);
    let supports = count_role(our_picks, Role::Support);
    let damage = our_picks.iter().filter(|&&p| hero_role(p).is_damage()).count();
    let frontline_melee = our_picks
        .iter()
        .filter(|&&p| matches!(hero_role(p), Role::Bruiser | Role::MeleeAssassin))
        .count();

    let first_of_core_role = (role == Role::Tank && tanks == 0)
        || (role == Role::Healer && healers == 0)
        || (role.is_damage() && damage == 0);
    if first_of_core_role {
        reasons.push(RecommendationReason {
            kind: ReasonKind::RoleNeeded,
            label: format!("Team's first {}", role.display_name()),
            delta: policy::ROLE_FIRST_BONUS,
        });
    } else if matches!(role, Role::Bruiser | Role::MeleeAssassin)
        && frontline_melee == 0
        && tanks > 0
    {
        reasons.push(RecommendationReason {
            kind: ReasonKind::RoleNeeded,
            label: "Adds melee presence alongside the Tank".to_string(),
            delta: policy::ROLE_FRONTLINE_BONUS,
        });
    }

    if (role == Role::Healer && healers >= 1) || (role == Role::Tank && tanks >= 1) {
        reasons.push(RecommendationReason {
            kind: ReasonKind::RoleDuplicate,
            label: format!("Second {}", role.display_name()),
            delta: policy::ROLE_DUPLICATE_PENALTY,
        });
    } else if role == Role::Support && supports >= 2 {
        reasons.push(RecommendationReason {
            kind: ReasonKind::RoleDuplicate,
            label: "Third Support".to_string(),
            delta: policy::ROLE_THIRD_SUPPORT_PENALTY,
        });
    }

    finish(hero, reasons, suggested_player)
}

/// Branch (c): enemy pick turn. We cannot know their intent, so surface what
/// would hurt us most: strong heroes and counters to our locked picks. No
/// synergy, role, or player terms; their comp and roster are not ours to
/// reason about.
fn score_enemy_threat(hero: HeroId, our_picks: &[HeroId], data: &DraftData) -> DraftRecommendation {
    let mut reasons = Vec::new();

    base_win_rate_factor(hero, data, &mut reasons);

    for &pick in our_picks {
        if let Some(matchup) = data.counter(hero, pick) {
            if matchup.games >= policy::MATCHUP_MIN_GAMES {
                let delta = round1(matchup.win_rate - 50.0);
                if delta.abs() >= policy::MATCHUP_NOISE_FLOOR {
                    reasons.push(RecommendationReason {
                        kind: ReasonKind::ThreatToOurPicks,
                        label: format!(
                            "Threatens our {} ({:.1}% WR)",
                            hero_name(pick),
                            matchup.win_rate
                        ),
                        delta,
                    });
                }
            }
        }
    }

    finish(hero, reasons, None)
}

/// Factor 1, shared by the pick and enemy-threat branches.
fn base_win_rate_factor(hero: HeroId, data: &DraftData, reasons: &mut Vec<RecommendationReason>) {
    if let Some(stats) = data.hero_stats(hero) {
        if stats.games >= policy::BASE_MIN_GAMES {
            let delta = round1(stats.win_rate - 50.0);
            if delta.abs() >= policy::BASE_NOISE_FLOOR {
                let label = if delta > 0.0 {
                    format!("Above-average hero ({:.1}% WR)", stats.win_rate)
                } else {
                    format!("Below-average hero ({:.1}% WR)", stats.win_rate)
                };
                reasons.push(RecommendationReason {
                    kind: ReasonKind::BaseWinRate,
                    label,
                    delta,
                });
            }
        }
    }
}

fn count_role(picks: &[HeroId], role: Role) -> usize {
    picks.iter().filter(|&&p| hero_role(p) == role).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::bundle::Tier;
    use crate::data::heroes::HeroPool;
    use crate::data::model::BundleDto;
    use crate::draft::sequence::Team;
    use crate::draft::state::DraftAction;
    use serde_json::json;

    fn build_data(value: serde_json::Value) -> DraftData {
        let dto: BundleDto = serde_json::from_value(value).unwrap();
        let mut builder = DraftData::builder(Tier::Mid);
        builder.add_header(&dto);
        builder.add_hero_stats(&dto);
        builder.add_matchups(&dto);
        for p in &dto.players {
            builder.add_player(p);
        }
        let (data, skipped) = builder.finish();
        assert!(skipped.is_empty(), "unknown heroes in fixture: {:?}", skipped);
        data
    }

    fn empty_data() -> DraftData {
        build_data(json!({}))
    }

    fn id(name: &str) -> HeroId {
        HeroPool::new().id(name).expect(name)
    }

    fn ids(names: &[&str]) -> Vec<HeroId> {
        names.iter().map(|n| id(n)).collect()
    }

    fn drafting(our_team: Team) -> DraftState {
        let mut state = DraftState::new();
        state.apply(DraftAction::SetMap("Cursed Hollow".into()));
        state.apply(DraftAction::SetTeam(our_team));
        state.apply(DraftAction::StartDraft);
        state
    }

    fn select_all(state: &mut DraftState, names: &[&str]) {
        for name in names {
            state.apply(DraftAction::SelectHero(id(name)));
        }
    }

    fn find(recs: &[DraftRecommendation], name: &str) -> DraftRecommendation {
        recs.iter()
            .find(|r| r.hero == id(name))
            .unwrap_or_else(|| panic!("{} not in recommendations", name))
            .clone()
    }

    fn has_kind(rec: &DraftRecommendation, kind: ReasonKind) -> bool {
        rec.reasons.iter().any(|r| r.kind == kind)
    }

    // --- branch dispatch and ranking, through the public entry point ---

    #[test]
    fn step_zero_is_ban_scoring_regardless_of_our_team() {
        let data = build_data(json!({
            "heroStats": [
                {"hero": "Jaina", "winRate": 53.0, "banRate": 24.0, "gamesPlayed": 5000}
            ]
        }));

        for team in [Team::A, Team::B] {
            let state = drafting(team);
            let recs = generate_recommendations(&state, &data);
            let jaina = find(&recs, "Jaina");
            assert!(has_kind(&jaina, ReasonKind::ContestedBan));
            assert!(has_kind(&jaina, ReasonKind::BaseWinRate));
            // 3.0 strength + 2.4 contested.
            assert!((jaina.net_delta - 5.4).abs() < 1e-9);
        }
    }

    #[test]
    fn enemy_turn_lists_threats_to_our_comp() {
        let data = build_data(json!({
            "heroStats": [
                {"hero": "The Butcher", "winRate": 52.0, "gamesPlayed": 4000}
            ],
            "counters": [
                {"hero": "The Butcher", "other": "Malfurion", "winRate": 57.0, "gamesPlayed": 120}
            ]
        }));
        let mut state = drafting(Team::A);
        select_all(
            &mut state,
            &["Murky", "Valeera", "Qhira", "Samuro", "Malfurion"],
        );
        assert_eq!(state.current_step, 5); // enemy pick turn

        let recs = generate_recommendations(&state, &data);
        let butcher = find(&recs, "The Butcher");
        assert!((butcher.net_delta - 9.0).abs() < 1e-9); // 2.0 base + 7.0 threat
        assert!(butcher.suggested_player.is_none());
        assert!(butcher.reasons.iter().all(|r| matches!(
            r.kind,
            ReasonKind::BaseWinRate | ReasonKind::ThreatToOurPicks
        )));
    }

    #[test]
    fn selected_heroes_never_reappear_and_complete_draft_is_empty() {
        let data = build_data(json!({
            "heroStats": [
                {"hero": "Jaina", "winRate": 54.0, "banRate": 30.0, "gamesPlayed": 5000}
            ]
        }));
        let picks = [
            "Garrosh", "Johanna", "Diablo", "Muradin", "Raynor", "Valla", "Greymane",
            "Malfurion", "Sonya", "Rehgar", "Uther", "Jaina", "Kael'thas", "Li-Ming",
            "Zeratul", "Illidan",
        ];

        let mut state = drafting(Team::A);
        for name in picks {
            let recs = generate_recommendations(&state, &data);
            assert!(recs.len() <= 15);
            for selected in state.selections.values() {
                assert!(
                    recs.iter().all(|r| r.hero != *selected),
                    "{} resurfaced",
                    hero_name(*selected)
                );
            }
            state.apply(DraftAction::SelectHero(id(name)));
        }

        assert!(generate_recommendations(&state, &data).is_empty());
    }

    #[test]
    fn setup_phase_yields_no_recommendations() {
        let state = DraftState::new();
        assert!(generate_recommendations(&state, &empty_data()).is_empty());
    }

    #[test]
    fn results_sorted_descending_and_truncated() {
        let data = build_data(json!({
            "heroStats": [
                {"hero": "Jaina", "winRate": 58.0, "banRate": 30.0, "gamesPlayed": 5000},
                {"hero": "Raynor", "winRate": 53.0, "banRate": 20.0, "gamesPlayed": 5000}
            ]
        }));
        let state = drafting(Team::A);
        let recs = generate_recommendations(&state, &data);
        assert_eq!(recs.len(), 15);
        assert_eq!(recs[0].hero, id("Jaina"));
        assert_eq!(recs[1].hero, id("Raynor"));
        for pair in recs.windows(2) {
            assert!(pair[0].net_delta >= pair[1].net_delta);
        }
    }

    #[test]
    fn penalized_heroes_rank_below_neutral_ones() {
        // Ban turn with the enemy healer locked: every healer carries -8 and
        // must sort behind the zero-score field, i.e. out of the top 15.
        let mut state = drafting(Team::B);
        select_all(
            &mut state,
            &["Murky", "Valeera", "Qhira", "Samuro", "Malfurion", "Jaina", "Valla", "Greymane", "Sonya"],
        );
        assert_eq!(state.current_step, 9);

        let recs = generate_recommendations(&state, &empty_data());
        assert!(recs
            .iter()
            .all(|r| hero_role(r.hero) != Role::Healer));
    }

    // --- ban-target scoring (branch a), factor by factor ---

    #[test]
    fn ban_ignores_negative_base_delta() {
        let data = build_data(json!({
            "heroStats": [
                {"hero": "Murky", "winRate": 46.0, "banRate": 2.0, "gamesPlayed": 5000}
            ]
        }));
        let rec = score_ban_target(id("Murky"), &[], &[], &data);
        assert!(rec.reasons.is_empty());
        assert_eq!(rec.net_delta, 0.0);
    }

    #[test]
    fn ban_values_counters_to_our_locked_picks() {
        let data = build_data(json!({
            "counters": [
                {"hero": "The Butcher", "other": "Raynor", "winRate": 56.0, "gamesPlayed": 90},
                {"hero": "Illidan", "other": "Raynor", "winRate": 56.0, "gamesPlayed": 10},
                {"hero": "Valeera", "other": "Raynor", "winRate": 52.0, "gamesPlayed": 90}
            ]
        }));
        let ours = ids(&["Raynor"]);

        let butcher = score_ban_target(id("The Butcher"), &ours, &[], &data);
        assert!((butcher.net_delta - 6.0).abs() < 1e-9);
        assert!(has_kind(&butcher, ReasonKind::ThreatToOurPicks));

        // Below the sample gate, and below the 53% bar: no reason either way.
        assert!(score_ban_target(id("Illidan"), &ours, &[], &data).reasons.is_empty());
        assert!(score_ban_target(id("Valeera"), &ours, &[], &data).reasons.is_empty());
    }

    #[test]
    fn ban_penalizes_role_the_enemy_already_fields() {
        let enemy = ids(&["Malfurion", "Jaina"]);
        let data = empty_data();

        let rehgar = score_ban_target(id("Rehgar"), &[], &enemy, &data);
        assert_eq!(rehgar.reasons.len(), 1);
        assert_eq!(rehgar.reasons[0].kind, ReasonKind::WastedBanRole);
        assert!((rehgar.net_delta - (-8.0)).abs() < 1e-9);

        // Enemy has no Tank, so banning one is not wasted.
        let etc = score_ban_target(id("E.T.C."), &[], &enemy, &data);
        assert!(etc.reasons.is_empty());

        // Only Healer and Tank bans can be wasted this way.
        let zeratul = score_ban_target(id("Zeratul"), &[], &ids(&["Illidan"]), &data);
        assert!(zeratul.reasons.is_empty());
    }

    // --- our-pick scoring (branch b), factor by factor ---

    #[test]
    fn first_tank_with_no_other_factors_scores_exactly_plus_three() {
        let state = drafting(Team::A);
        let data = empty_data();

        let garrosh = score_our_pick(id("Garrosh"), &state, &[], &[], &data);
        assert_eq!(garrosh.reasons.len(), 1);
        assert_eq!(garrosh.reasons[0].kind, ReasonKind::RoleNeeded);
        assert!((garrosh.net_delta - 3.0).abs() < 1e-9);
        assert!(garrosh.suggested_player.is_none());

        // First Healer and first damage hero get the same bonus.
        let malfurion = score_our_pick(id("Malfurion"), &state, &[], &[], &data);
        assert!((malfurion.net_delta - 3.0).abs() < 1e-9);
        let raynor = score_our_pick(id("Raynor"), &state, &[], &[], &data);
        assert!((raynor.net_delta - 3.0).abs() < 1e-9);

        // A Support is none of the bonus roles.
        let abathur = score_our_pick(id("Abathur"), &state, &[], &[], &data);
        assert_eq!(abathur.net_delta, 0.0);
    }

    #[test]
    fn frontline_bonus_needs_existing_tank() {
        let state = drafting(Team::A);
        let data = empty_data();
        let ours = ids(&["Garrosh", "Jaina"]);

        let sonya = score_our_pick(id("Sonya"), &state, &ours, &[], &data);
        assert!((sonya.net_delta - 1.5).abs() < 1e-9);

        // A melee assassin is not the team's first damage hero here, so it
        // falls back to the same frontline bonus.
        let butcher = score_our_pick(id("The Butcher"), &state, &ours, &[], &data);
        assert!((butcher.net_delta - 1.5).abs() < 1e-9);

        // Without a Tank there is no frontline bonus.
        let no_tank = ids(&["Jaina"]);
        let sonya = score_our_pick(id("Sonya"), &state, &no_tank, &[], &data);
        assert_eq!(sonya.net_delta, 0.0);
    }

    #[test]
    fn second_healer_penalty_composes_with_other_factors() {
        let data = build_data(json!({
            "counters": [
                {"hero": "Uther", "other": "Jaina", "winRate": 56.0, "gamesPlayed": 200}
            ]
        }));
        let state = drafting(Team::A);
        let ours = ids(&["Malfurion"]);
        let enemy = ids(&["Jaina"]);

        let uther = score_our_pick(id("Uther"), &state, &ours, &enemy, &data);
        // 6.0 counter delta composed with the duplicate-healer penalty.
        assert!((uther.net_delta - (6.0 - 15.0)).abs() < 1e-9);
        assert!(uther
            .reasons
            .iter()
            .any(|r| r.kind == ReasonKind::RoleDuplicate && r.delta == -15.0));

        // Second Tank penalty mirrors it.
        let tanked = ids(&["Garrosh"]);
        let johanna = score_our_pick(id("Johanna"), &state, &tanked, &[], &empty_data());
        assert!((johanna.net_delta - (-15.0)).abs() < 1e-9);
    }

    #[test]
    fn third_support_penalty() {
        let state = drafting(Team::A);
        let data = empty_data();

        let two_supports = ids(&["Abathur", "Zarya"]);
        let medivh = score_our_pick(id("Medivh"), &state, &two_supports, &[], &data);
        assert!((medivh.net_delta - (-8.0)).abs() < 1e-9);

        // Two supports is not yet penalized.
        let one_support = ids(&["Abathur"]);
        let medivh = score_our_pick(id("Medivh"), &state, &one_support, &[], &data);
        assert_eq!(medivh.net_delta, 0.0);
    }

    #[test]
    fn base_factor_gates_and_floors() {
        let data = build_data(json!({
            "heroStats": [
                {"hero": "Raynor", "winRate": 52.3, "gamesPlayed": 5000},
                {"hero": "Jaina", "winRate": 55.0, "gamesPlayed": 99},
                {"hero": "Valla", "winRate": 50.3, "gamesPlayed": 5000}
            ]
        }));
        let state = drafting(Team::A);

        let raynor = score_our_pick(id("Raynor"), &state, &[], &[], &data);
        let base = raynor
            .reasons
            .iter()
            .find(|r| r.kind == ReasonKind::BaseWinRate)
            .expect("base factor");
        assert!((base.delta - 2.3).abs() < 1e-9);

        // 99 games: below the sample gate.
        let jaina = score_our_pick(id("Jaina"), &state, &[], &[], &data);
        assert!(!has_kind(&jaina, ReasonKind::BaseWinRate));
        // 0.3 rounds below the noise floor.
        let valla = score_our_pick(id("Valla"), &state, &[], &[], &data);
        assert!(!has_kind(&valla, ReasonKind::BaseWinRate));
    }

    #[test]
    fn thin_matchup_sample_is_equivalent_to_no_data() {
        // 29 games is under the gate; the factor is omitted, which is
        // numerically the same as the cell being absent entirely.
        let gated = build_data(json!({
            "counters": [
                {"hero": "Greymane", "other": "Jaina", "winRate": 60.0, "gamesPlayed": 29}
            ]
        }));
        let absent = empty_data();
        let state = drafting(Team::A);
        let ours = ids(&["Raynor"]);
        let enemy = ids(&["Jaina"]);

        let with_gated = score_our_pick(id("Greymane"), &state, &ours, &enemy, &gated);
        let with_absent = score_our_pick(id("Greymane"), &state, &ours, &enemy, &absent);
        assert_eq!(with_gated.net_delta, with_absent.net_delta);
        assert_eq!(with_gated.reasons.len(), with_absent.reasons.len());
    }

    #[test]
    fn synergy_counts_only_on_our_pick_turn() {
        let data = build_data(json!({
            "synergies": [
                {"hero": "Greymane", "other": "Malfurion", "winRate": 55.0, "gamesPlayed": 300}
            ]
        }));
        let state = drafting(Team::A);
        let ours = ids(&["Malfurion"]);

        // Enemy-turn threat scoring must not see our synergy.
        let threat = score_enemy_threat(id("Greymane"), &ours, &data);
        assert!(threat.reasons.is_empty());

        // Our own pick turn must.
        let pick = score_our_pick(id("Greymane"), &state, &ours, &[], &data);
        assert!(pick
            .reasons
            .iter()
            .any(|r| r.kind == ReasonKind::SynergyWithAlly && (r.delta - 5.0).abs() < 1e-9));
    }

    #[test]
    fn negative_matchups_count_against_the_sum() {
        let data = build_data(json!({
            "counters": [
                {"hero": "Raynor", "other": "Zeratul", "winRate": 46.5, "gamesPlayed": 400}
            ]
        }));
        let state = drafting(Team::A);
        let enemy = ids(&["Zeratul"]);

        let raynor = score_our_pick(id("Raynor"), &state, &[], &enemy, &data);
        // -3.5 matchup plus the first-damage bonus.
        assert!((raynor.net_delta - (-3.5 + 3.0)).abs() < 1e-9);
        assert!(has_kind(&raynor, ReasonKind::CountersEnemy));
    }

    // --- player-strength factor ---

    #[test]
    fn player_factor_credits_best_unassigned_player_only() {
        let data = build_data(json!({
            "players": [
                {"battletag": "Alpha#1", "heroes": [
                    {"hero": "Greymane", "gamesPlayed": 60, "winRate": 58.0, "mawp": 0.58}
                ]},
                {"battletag": "Beta#2", "heroes": [
                    {"hero": "Greymane", "gamesPlayed": 60, "winRate": 55.0, "mawp": 0.55}
                ]},
                {"battletag": "Gamma#3", "heroes": [
                    {"hero": "Greymane", "gamesPlayed": 9, "winRate": 90.0, "mawp": 0.9}
                ]}
            ]
        }));

        let mut state = drafting(Team::A);
        state.apply(DraftAction::SetPlayer { slot: 0, battletag: Some("Alpha#1".into()) });
        state.apply(DraftAction::SetPlayer { slot: 1, battletag: Some("Beta#2".into()) });
        state.apply(DraftAction::SetPlayer { slot: 2, battletag: Some("Gamma#3".into()) });

        let greymane = score_our_pick(id("Greymane"), &state, &[], &[], &data);
        // Alpha wins at +8.0; Gamma's 9 games are under the gate despite the
        // higher MAWP; only the single best player is credited.
        assert_eq!(greymane.suggested_player.as_deref(), Some("Alpha#1"));
        let player_reasons: Vec<_> = greymane
            .reasons
            .iter()
            .filter(|r| r.kind == ReasonKind::PlayerStrength)
            .collect();
        assert_eq!(player_reasons.len(), 1);
        assert!((player_reasons[0].delta - 8.0).abs() < 1e-9);

        // Once Alpha is assigned to an earlier pick, Beta takes over.
        select_all(&mut state, &["Murky", "Valeera", "Qhira", "Samuro", "Raynor"]);
        state.apply(DraftAction::AssignPlayer { step: 4, battletag: "Alpha#1".into() });

        let greymane = score_our_pick(id("Greymane"), &state, &[], &[], &data);
        assert_eq!(greymane.suggested_player.as_deref(), Some("Beta#2"));
    }

    #[test]
    fn player_factor_requires_plus_two_delta() {
        let data = build_data(json!({
            "players": [
                {"battletag": "Alpha#1", "heroes": [
                    {"hero": "Greymane", "gamesPlayed": 60, "winRate": 51.0, "mawp": 0.51}
                ]}
            ]
        }));
        let mut state = drafting(Team::A);
        state.apply(DraftAction::SetPlayer { slot: 0, battletag: Some("Alpha#1".into()) });

        let greymane = score_our_pick(id("Greymane"), &state, &[], &[], &data);
        // +1.0 is under the reporting bar.
        assert!(greymane.suggested_player.is_none());
        assert!(!has_kind(&greymane, ReasonKind::PlayerStrength));
    }

    #[test]
    fn player_factor_blends_thin_samples_toward_raw_win_rate() {
        // 15 games at the threshold of 30: adjusted value is halfway between
        // raw win rate and MAWP.
        let data = build_data(json!({
            "players": [
                {"battletag": "Alpha#1", "heroes": [
                    {"hero": "Greymane", "gamesPlayed": 15, "winRate": 70.0, "mawp": 0.60}
                ]}
            ]
        }));
        let mut state = drafting(Team::A);
        state.apply(DraftAction::SetPlayer { slot: 0, battletag: Some("Alpha#1".into()) });

        let greymane = score_our_pick(id("Greymane"), &state, &[], &[], &data);
        let player = greymane
            .reasons
            .iter()
            .find(|r| r.kind == ReasonKind::PlayerStrength)
            .expect("player factor");
        // 0.5 * 0.70 + 0.5 * 0.60 = 0.65 -> +15.0 over the baseline.
        assert!((player.delta - 15.0).abs() < 1e-9);
    }
}
