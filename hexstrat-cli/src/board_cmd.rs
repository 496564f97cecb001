//! Board command - generate and print a board

use anyhow::Result;
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexstrat_core::{Board, GameSession, DEFAULT_TALL_QUOTA};

use crate::render::render_board;

#[derive(Args)]
pub struct BoardArgs {
    /// Number of rows
    #[arg(long, default_value = "8")]
    pub rows: usize,

    /// Number of columns
    #[arg(long, default_value = "8")]
    pub cols: usize,

    /// Maximum number of tall tiles
    #[arg(long, default_value_t = DEFAULT_TALL_QUOTA)]
    pub tall: usize,

    /// Outer hex radius in pixels
    #[arg(long, default_value = "50")]
    pub radius: f32,

    /// Output tiles as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run board command
pub fn run(args: BoardArgs, seed: Option<u64>) -> Result<()> {
    let mut rng = create_rng(seed);
    let board = Board::generate(args.rows, args.cols, args.radius, args.tall, &mut rng);

    tracing::info!(
        "Generated {}x{} board: {} tall of {} interior tiles",
        board.rows(),
        board.cols(),
        board.tall_count(),
        board.interior_count()
    );

    let snap = GameSession::new(board, 0).snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snap.tiles)?);
    } else {
        print!("{}", render_board(&snap));
    }
    Ok(())
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
