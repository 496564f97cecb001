//! HEXSTRAT Core - Board and unit game-state engine
//!
//! This crate provides the rules for a two-player hex tactics game:
//! - Board geometry (row-offset hex grid, tall terrain)
//! - Unit archetypes and per-player rosters
//! - Setup -> Battle -> Finished session state machine
//! - Read-only snapshots for renderers

pub mod board;
pub mod unit;
pub mod roster;
pub mod error;
pub mod config;
pub mod intent;
pub mod session;
pub mod snapshot;

// Re-exports for convenient access
pub use board::{Board, Cell, Point, Tile, DEFAULT_TALL_QUOTA};
pub use unit::{Archetype, Player, Unit, UnitStats, ARCHETYPES};
pub use roster::Roster;
pub use error::GameError;
pub use config::GameConfig;
pub use intent::{Intent, MouseButton};
pub use session::{GameSession, Outcome, Phase, Selection};
pub use snapshot::Snapshot;
