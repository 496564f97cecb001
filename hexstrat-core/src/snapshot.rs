//! Read-only view of a session for renderers

use serde::Serialize;

use crate::board::Tile;
use crate::session::{GameSession, Phase, Selection};
use crate::unit::{Archetype, Player, Unit};

/// Everything a frame needs, captured between intents
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub rows: usize,
    pub cols: usize,
    pub tiles: Vec<Tile>,
    pub player1: Vec<Unit>,
    pub player2: Vec<Unit>,
    pub phase: Phase,
    pub placing_side: Player,
    pub pending_archetype: Archetype,
    pub current_mover: Player,
    pub selection: Option<Selection>,
    pub winner: Option<Player>,
}

impl GameSession {
    pub fn snapshot(&self) -> Snapshot {
        let board = self.board();
        Snapshot {
            rows: board.rows(),
            cols: board.cols(),
            tiles: board.tiles().copied().collect(),
            player1: self.roster(Player::Player1).iter().copied().collect(),
            player2: self.roster(Player::Player2).iter().copied().collect(),
            phase: self.phase(),
            placing_side: self.placing_side(),
            pending_archetype: self.pending_archetype(),
            current_mover: self.current_mover(),
            selection: self.selection(),
            winner: self.winner(),
        }
    }
}

impl Snapshot {
    /// One-line status for the HUD
    pub fn status_line(&self) -> String {
        match self.phase {
            Phase::Setup => format!(
                "Setup: placing {} for {}",
                self.pending_archetype.name(),
                self.placing_side.label()
            ),
            Phase::Battle => format!("Turn: {}", self.current_mover.label()),
            Phase::Finished => match self.winner {
                Some(winner) => format!("Winner: {}", winner.label()),
                None => "Game over: no winner".to_string(),
            },
        }
    }
}
