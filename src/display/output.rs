use crate::analysis::matcher::MatchOutcome;
use crate::data::heroes::{hero_name, hero_role};
use crate::draft::engine::DraftRecommendation;
use crate::draft::sequence::{StepAction, DRAFT_SEQUENCE};
use crate::draft::state::{DraftState, Phase};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct RecommendationRow {
    rank: String,
    hero: String,
    role: String,
    delta: String,
    player: String,
    reasons: String,
}

#[derive(Tabled)]
struct BoardRow {
    step: String,
    team: String,
    action: String,
    hero: String,
    player: String,
}

#[derive(Tabled)]
struct MatcherRow {
    hero: String,
    player: String,
    priority: String,
    score: String,
    games: String,
}

pub fn display_recommendations(recommendations: &[DraftRecommendation], title: &str, top_n: usize) {
    println!("\n{}", title.bold().cyan());
    println!("{}", "=".repeat(60).cyan());

    if recommendations.is_empty() {
        println!("{}", "No recommendations available (not enough data)".yellow());
        return;
    }

    let mut rows = vec![];
    for (idx, rec) in recommendations.iter().take(top_n).enumerate() {
        let delta = if rec.net_delta >= 0.0 {
            format!("+{:.1}", rec.net_delta).green().to_string()
        } else {
            format!("{:.1}", rec.net_delta).red().to_string()
        };

        let reasons = if rec.reasons.is_empty() {
            "-".to_string()
        } else {
            rec.reasons
                .iter()
                .map(|r| r.label.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        };

        rows.push(RecommendationRow {
            rank: format!("#{}", idx + 1),
            hero: hero_name(rec.hero).to_string(),
            role: hero_role(rec.hero).display_name().to_string(),
            delta,
            player: rec.suggested_player.clone().unwrap_or_else(|| "-".to_string()),
            reasons,
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_board(state: &DraftState) {
    let phase = match state.phase {
        Phase::Setup => "setup",
        Phase::Drafting => "drafting",
        Phase::Complete => "complete",
    };
    println!(
        "\n{} {} {}",
        "📋 DRAFT BOARD".bold().cyan(),
        format!("(map: {})", state.map.as_deref().unwrap_or("-")).cyan(),
        format!("[{}]", phase).cyan()
    );
    println!("{}", "=".repeat(60).cyan());

    let mut rows = vec![];
    for (idx, step) in DRAFT_SEQUENCE.iter().enumerate() {
        let hero = state
            .selections
            .get(&idx)
            .map(|&h| hero_name(h).to_string())
            .unwrap_or_else(|| {
                if idx == state.current_step && state.phase == Phase::Drafting {
                    "<- next".to_string()
                } else {
                    String::new()
                }
            });

        let team = if step.team == state.our_team {
            format!("{} (us)", step.team)
        } else {
            step.team.to_string()
        };

        let action = match step.action {
            StepAction::Ban => "ban".red().to_string(),
            StepAction::Pick => "pick".green().to_string(),
        };

        rows.push(BoardRow {
            step: format!("{:>2}", idx),
            team,
            action,
            hero,
            player: state
                .player_assignments
                .get(&idx)
                .cloned()
                .unwrap_or_default(),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_matcher(outcome: &MatchOutcome) {
    for warning in &outcome.warnings {
        println!(
            "{} {}",
            "⚠️  Composition gap:".yellow().bold(),
            warning.message
        );
    }

    if outcome.recommendations.is_empty() {
        return;
    }

    println!("\n{}", "👥 WHO SHOULD PLAY WHAT".bold().cyan());
    println!("{}", "=".repeat(60).cyan());

    let mut rows = vec![];
    for rec in &outcome.recommendations {
        let player = match (&rec.player, rec.no_one_competent) {
            (Some(tag), false) => tag.clone(),
            (Some(tag), true) => format!("{} (thin record)", tag),
            (None, _) => "nobody".to_string(),
        };

        rows.push(MatcherRow {
            hero: hero_name(rec.hero).to_string(),
            player,
            priority: rec.priority.label().to_string(),
            score: format!("{:.2}", rec.competency_score),
            games: rec.games.to_string(),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}
