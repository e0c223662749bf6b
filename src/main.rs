use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use std::fs;
use std::path::PathBuf;

use draft_coach::analysis::competency::{player_competency, PlayerCompetency};
use draft_coach::analysis::matcher::{match_heroes_to_players, role_needs_for_team};
use draft_coach::config::Config;
use draft_coach::data::bundle::{DraftData, Tier};
use draft_coach::data::heroes::{all_heroes, hero_name, HeroId, HeroPool};
use draft_coach::data::model::{BundleDto, RosterDto};
use draft_coach::display::output::{
    display_board, display_error, display_info, display_matcher, display_recommendations,
    display_success, display_warning,
};
use draft_coach::draft::engine::generate_recommendations;
use draft_coach::draft::sequence::{StepAction, Team};
use draft_coach::draft::state::{DraftAction, DraftState, Phase};
use draft_coach::error::DraftError;
use draft_coach::session::DraftSession;

#[derive(Parser, Debug)]
#[command(name = "Draft Coach")]
#[command(about = "Live pick/ban recommendations from match history", long_about = None)]
struct Args {
    /// Precomputed stats bundle (JSON) for one map/tier combination
    bundle: PathBuf,

    /// Roster file with up to 5 battletags
    #[arg(short, long)]
    roster: Option<PathBuf>,

    /// Battleground (overrides the bundle's map)
    #[arg(short, long)]
    map: Option<String>,

    /// Skill tier: low, mid or high (overrides the bundle's tier)
    #[arg(short, long)]
    tier: Option<String>,

    /// Which side we draft for (A drafts first)
    #[arg(long, default_value = "A")]
    team: String,

    /// Draft script to replay: `ban X` / `pick X` / `assign STEP TAG` / `undo`
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Rows to display per recommendation table (engine ranks 15)
    #[arg(long, default_value = "8")]
    top: usize,

    /// Restore the autosaved session instead of starting fresh
    #[arg(long)]
    resume: bool,

    /// Skip session autosaves
    #[arg(long)]
    no_save: bool,
}

#[derive(Debug)]
enum ScriptCommand {
    Select { expected: StepAction, hero: String },
    Assign { step: usize, battletag: String },
    Undo,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_env()?;

    display_info(&format!("Loading bundle {}", args.bundle.display()));
    let dto = BundleDto::load(&args.bundle).context("failed to load data bundle")?;

    let data = resolve_bundle(&args, &config, &dto)?;
    display_success(&format!(
        "Bundle ready: map {}, tier {}, {} players",
        data.map.as_deref().unwrap_or("-"),
        data.tier,
        data.player_count()
    ));

    let our_team = parse_team(&args.team)?;
    let mut state = initial_state(&args, &data, our_team)?;

    if state.phase == Phase::Setup {
        state.apply(DraftAction::StartDraft);
    }

    let pool = HeroPool::new();

    if let Some(ref script_path) = args.script {
        let text = fs::read_to_string(script_path)
            .map_err(|e| DraftError::IoError(format!("{}: {}", script_path.display(), e)))?;
        let commands = parse_script(&text)?;

        for command in commands {
            replay_command(&mut state, &data, &pool, command, args.top)?;
            autosave(&args, &state);
        }
    }

    // Advisory output for whatever step the draft is now waiting on.
    show_current_step(&state, &data, args.top);
    display_board(&state);

    if state.phase == Phase::Complete {
        display_success("Draft complete");
        DraftSession::clear();
    } else {
        autosave(&args, &state);
    }

    Ok(())
}

fn resolve_bundle(args: &Args, config: &Config, dto: &BundleDto) -> Result<DraftData> {
    let mut builder = DraftData::builder(config.default_tier);
    builder.add_header(dto);
    builder.add_hero_stats(dto);
    builder.add_matchups(dto);

    if let Some(ref raw) = args.tier {
        let tier: Tier = raw.parse().map_err(|_| {
            DraftError::ConfigError(format!("tier must be low, mid or high (got '{}')", raw))
        })?;
        builder.set_tier(tier);
    }
    if args.map.is_some() {
        builder.set_map(args.map.clone());
    }

    let pb = ProgressBar::new(dto.players.len() as u64);
    pb.set_message("Resolving player stats");
    for player in &dto.players {
        builder.add_player(player);
        pb.inc(1);
    }
    pb.finish_with_message("✓ Player stats resolved");

    let (data, skipped) = builder.finish();
    if !skipped.is_empty() {
        display_warning(&format!(
            "Skipped {} bundle rows naming unknown heroes (e.g. {})",
            skipped.len(),
            skipped[0]
        ));
    }

    Ok(data)
}

fn parse_team(raw: &str) -> Result<Team, DraftError> {
    match raw.to_ascii_uppercase().as_str() {
        "A" => Ok(Team::A),
        "B" => Ok(Team::B),
        _ => Err(DraftError::ConfigError(format!(
            "team must be A or B (got '{}')",
            raw
        ))),
    }
}

fn initial_state(args: &Args, data: &DraftData, our_team: Team) -> Result<DraftState> {
    if args.resume {
        if let Some(session) = DraftSession::load()? {
            display_info(&format!(
                "Resuming session saved {} minutes ago (step {})",
                session.age_minutes(),
                session.state.current_step
            ));
            return Ok(session.state);
        }
        display_warning("No saved session found, starting fresh");
    }

    let mut state = DraftState::new();
    if let Some(ref map) = data.map {
        state.apply(DraftAction::SetMap(map.clone()));
    }
    state.apply(DraftAction::SetTier(data.tier));
    state.apply(DraftAction::SetTeam(our_team));

    if let Some(ref roster_path) = args.roster {
        let roster = RosterDto::load(roster_path).context("failed to load roster")?;
        if roster.players.len() > 5 {
            return Err(DraftError::RosterFull.into());
        }
        for (slot, battletag) in roster.players.iter().enumerate() {
            state.apply(DraftAction::SetPlayer {
                slot,
                battletag: Some(battletag.clone()),
            });
        }
        display_success(&format!("Registered {} roster players", roster.players.len()));
    }

    Ok(state)
}

fn parse_script(text: &str) -> Result<Vec<ScriptCommand>, DraftError> {
    let mut commands = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let err = |message: &str| DraftError::ScriptError {
            line: idx + 1,
            message: message.to_string(),
        };

        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let command = match word.to_ascii_lowercase().as_str() {
            "ban" | "pick" => {
                if rest.is_empty() {
                    return Err(err("expected a hero name"));
                }
                let expected = if word.eq_ignore_ascii_case("ban") {
                    StepAction::Ban
                } else {
                    StepAction::Pick
                };
                ScriptCommand::Select {
                    expected,
                    hero: rest.trim().to_string(),
                }
            }
            "assign" => {
                let (step_raw, battletag) = rest
                    .trim()
                    .split_once(' ')
                    .ok_or_else(|| err("expected: assign STEP BATTLETAG"))?;
                let step = step_raw
                    .parse()
                    .map_err(|_| err("step must be a number 0-15"))?;
                ScriptCommand::Assign {
                    step,
                    battletag: battletag.trim().to_string(),
                }
            }
            "undo" => ScriptCommand::Undo,
            _ => return Err(err(&format!("unknown command '{}'", word))),
        };
        commands.push(command);
    }

    Ok(commands)
}

fn replay_command(
    state: &mut DraftState,
    data: &DraftData,
    pool: &HeroPool,
    command: ScriptCommand,
    top: usize,
) -> Result<(), DraftError> {
    match command {
        ScriptCommand::Select { expected, hero } => {
            let id = pool.id(&hero).ok_or(DraftError::UnknownHero(hero))?;

            if let Some(step) = state.current() {
                show_current_step(state, data, top);
                if step.action != expected {
                    display_warning(&format!(
                        "Script says {} but step {} is a {}",
                        script_word(expected),
                        state.current_step,
                        script_word(step.action)
                    ));
                }
            }
            if !state.is_available(id) {
                display_warning(&format!("{} is already taken", hero_name(id)));
                return Ok(());
            }

            let step_before = state.current_step;
            state.apply(DraftAction::SelectHero(id));
            if state.current_step > step_before {
                display_success(&format!("Step {}: {}", step_before, hero_name(id)));
            }
        }
        ScriptCommand::Assign { step, battletag } => {
            state.apply(DraftAction::AssignPlayer {
                step,
                battletag: battletag.clone(),
            });
            match state.player_assignments.get(&step) {
                Some(tag) if *tag == battletag => {
                    display_success(&format!("{} will play step {}", battletag, step));
                }
                _ => display_warning(&format!(
                    "Could not assign {} to step {} (not on roster, or nothing picked there)",
                    battletag, step
                )),
            }
        }
        ScriptCommand::Undo => {
            let before = state.current_step;
            state.apply(DraftAction::Undo);
            if state.current_step < before {
                display_success(&format!("Undid step {}", state.current_step));
            } else {
                display_warning("Nothing to undo");
            }
        }
    }

    Ok(())
}

fn script_word(action: StepAction) -> &'static str {
    match action {
        StepAction::Ban => "ban",
        StepAction::Pick => "pick",
    }
}

fn show_current_step(state: &DraftState, data: &DraftData, top: usize) {
    let Some(step) = state.current() else { return };

    let recommendations = generate_recommendations(state, data);
    let whose = if step.team == state.our_team {
        "our".to_string()
    } else {
        format!("enemy (team {})", step.team)
    };
    let title = format!(
        "Step {} — {} {} [{}]",
        state.current_step,
        whose,
        script_word(step.action),
        step.label
    );
    display_recommendations(&recommendations, &title, top);

    // On our pick turns, also say who should play what and flag comp gaps.
    if step.action == StepAction::Pick && step.team == state.our_team {
        let players: Vec<PlayerCompetency> = state
            .player_slots
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| {
                entry.battletag.as_deref().map(|tag| {
                    player_competency(tag, slot, data.player(tag), state.map.as_deref())
                })
            })
            .collect();

        if !players.is_empty() {
            let available: Vec<HeroId> =
                all_heroes().filter(|&h| state.is_available(h)).collect();
            let needs = role_needs_for_team(&state.picks_for(state.our_team), &available);
            let candidates: Vec<HeroId> = recommendations.iter().map(|r| r.hero).collect();
            let outcome = match_heroes_to_players(&candidates, &players, &needs);
            display_matcher(&outcome);
        }
    }
}

fn autosave(args: &Args, state: &DraftState) {
    if args.no_save {
        return;
    }
    let session = DraftSession::new(&args.bundle.to_string_lossy(), state.clone());
    let _ = session.save(); // Save to disk silently
}
