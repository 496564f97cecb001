//! Play command - run one session from a script or stdin
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_session(), play_session(), report_final()
//! - Level 3: resolve_max_units(), apply_line()
//! - Level 4: input/output utilities

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexstrat_core::{GameConfig, GameSession};

use crate::render::{render_board, render_hud};
use crate::script::parse_intent;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Game configuration JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum units per side (prompted for when not given)
    #[arg(long, allow_negative_numbers = true)]
    pub max_units: Option<i32>,

    /// Intent script, one intent per line (defaults to stdin)
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Only print the final state
    #[arg(long)]
    pub quiet: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the session from config, flags and prompt
/// 2. Feed it intents until input ends or the game is over
/// 3. Report the final state
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let mut session = build_session(&args, seed)?;

    tracing::info!(
        "Starting session: {}x{} board, {} units per side",
        session.board().rows(),
        session.board().cols(),
        session.max_units_per_side()
    );

    if !args.quiet {
        print_frame(&session);
    }

    let input = open_input(&args)?;
    play_session(&mut session, input, args.quiet)?;

    report_final(&session, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_session(args: &PlayArgs, seed: Option<u64>) -> Result<GameSession> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };

    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    config.max_units_per_side = resolve_max_units(args, &config)?;

    Ok(GameSession::from_config(&config))
}

/// Apply every intent line; stops early once the game is over
fn play_session(session: &mut GameSession, input: Box<dyn BufRead>, quiet: bool) -> Result<()> {
    for (line_no, line) in input.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        let accepted = apply_line(session, &line, line_no + 1);

        if accepted && !quiet {
            print_frame(session);
        }
        if session.is_finished() {
            break;
        }
    }
    Ok(())
}

fn report_final(session: &GameSession, json: bool) -> Result<()> {
    let snap = session.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    } else {
        print!("{}", render_board(&snap));
        print!("{}", render_hud(&snap));
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Flag wins over config file; with neither, ask on stdin
fn resolve_max_units(args: &PlayArgs, config: &GameConfig) -> Result<i32> {
    match (args.max_units, &args.config) {
        (Some(max), _) => Ok(max),
        (None, Some(_)) => Ok(config.max_units_per_side),
        (None, None) => prompt_max_units(),
    }
}

/// Returns true if the line held an accepted intent
fn apply_line(session: &mut GameSession, line: &str, line_no: usize) -> bool {
    let intent = match parse_intent(line) {
        Ok(Some(intent)) => intent,
        Ok(None) => return false,
        Err(e) => {
            tracing::warn!("Line {}: {:#}", line_no, e);
            return false;
        }
    };

    match session.apply(intent) {
        Ok(_) => true,
        Err(e) => {
            println!("! {}", e);
            false
        }
    }
}

// ============================================================================
// LEVEL 4 - I/O UTILITIES
// ============================================================================

fn open_input(args: &PlayArgs) -> Result<Box<dyn BufRead>> {
    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn prompt_max_units() -> Result<i32> {
    print!("Max units per side: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    line.trim()
        .parse()
        .with_context(|| format!("Invalid unit count: {}", line.trim()))
}

fn print_frame(session: &GameSession) {
    let snap = session.snapshot();
    print!("{}", render_board(&snap));
    print!("{}", render_hud(&snap));
    println!();
}
