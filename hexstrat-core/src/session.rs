//! Game session state machine
//!
//! A session owns the board and both rosters and moves through three phases:
//! Setup (placement), Battle (alternating select -> move/attack) and
//! Finished. `GameSession::apply` is the single entry point for player
//! intents; the per-action methods are public for callers that already know
//! which action they want.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::{in_reach, Board, Cell};
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::intent::{Intent, MouseButton};
use crate::roster::Roster;
use crate::unit::{Archetype, Player, Unit};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Movement reach in short radii (one hex step)
const MOVE_RANGE: i32 = 2;

/// Width of each side's placement band in columns
const PLACEMENT_BAND: usize = 2;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Session phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Battle,
    Finished,
}

/// The armed unit awaiting a move or attack target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Index into the mover's roster
    pub index: usize,
    /// Tile the unit was selected from
    pub origin: Cell,
}

/// What an accepted intent did
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Placed {
        owner: Player,
        archetype: Archetype,
        cell: Cell,
    },
    Removed {
        owner: Player,
        cell: Cell,
    },
    SideToggled(Player),
    UnitTypeChanged(Archetype),
    BattleStarted,
    /// Setup confirmed with an empty roster: the game ended at once
    BattleForfeited {
        winner: Option<Player>,
    },
    Selected {
        cell: Cell,
    },
    Attacked {
        target: Cell,
        damage: i32,
        remaining_hp: i32,
        killed: bool,
    },
    Moved {
        from: Cell,
        to: Cell,
    },
}

// ============================================================================
// GAME SESSION
// ============================================================================

/// Single owner of all mutable game state
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    /// Indexed by `Player as usize`
    rosters: [Roster; 2],
    max_units_per_side: i32,
    phase: Phase,

    /// Setup: side and archetype the next left click places
    placing_side: Player,
    pending_archetype: Archetype,

    /// Battle: side to act and its armed unit
    current_mover: Player,
    selection: Option<Selection>,

    winner: Option<Player>,
}

impl GameSession {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a session in Setup on a prepared board
    pub fn new(board: Board, max_units_per_side: i32) -> Self {
        Self {
            board,
            rosters: [Roster::new(), Roster::new()],
            max_units_per_side,
            phase: Phase::Setup,
            placing_side: Player::Player1,
            pending_archetype: Archetype::Knight,
            current_mover: Player::Player1,
            selection: None,
            winner: None,
        }
    }

    /// Create a session with generated terrain
    pub fn from_config(config: &GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        let board = Board::generate(
            config.rows,
            config.cols,
            config.tile_radius,
            config.tall_quota,
            &mut rng,
        );
        tracing::debug!(
            "Generated {}x{} board with {} tall tiles",
            config.rows,
            config.cols,
            board.tall_count()
        );
        Self::new(board, config.max_units_per_side)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn roster(&self, player: Player) -> &Roster {
        &self.rosters[player as usize]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn max_units_per_side(&self) -> i32 {
        self.max_units_per_side
    }

    pub fn placing_side(&self) -> Player {
        self.placing_side
    }

    pub fn pending_archetype(&self) -> Archetype {
        self.pending_archetype
    }

    pub fn current_mover(&self) -> Player {
        self.current_mover
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Surviving side once Finished. None while playing, and also if both
    /// rosters were empty when the game ended.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Unit on a cell, from either roster
    pub fn unit_at(&self, cell: Cell) -> Option<&Unit> {
        self.rosters.iter().find_map(|r| r.unit_at(cell))
    }

    /// Unit currently armed by the mover
    pub fn selected_unit(&self) -> Option<&Unit> {
        let sel = self.selection?;
        self.roster(self.current_mover).get(sel.index)
    }

    /// Check that every tile is occupied iff exactly one unit stands on it
    pub fn occupancy_consistent(&self) -> bool {
        self.board.tiles().all(|tile| {
            let count = self
                .rosters
                .iter()
                .flat_map(|r| r.iter())
                .filter(|u| u.position == tile.cell)
                .count();
            tile.occupied == (count == 1) && count <= 1
        })
    }

    // ========================================================================
    // INTENT DISPATCH
    // ========================================================================

    /// Apply one intent to completion
    pub fn apply(&mut self, intent: Intent) -> Result<Outcome> {
        let result = match self.phase {
            Phase::Setup => self.apply_setup(intent),
            Phase::Battle => self.apply_battle(intent),
            Phase::Finished => Err(GameError::GameOver),
        };

        match &result {
            Ok(outcome) => tracing::debug!("{:?} -> {:?}", intent, outcome),
            Err(e) => tracing::debug!("{:?} rejected: {}", intent, e),
        }

        result
    }

    fn apply_setup(&mut self, intent: Intent) -> Result<Outcome> {
        match intent {
            Intent::ClickCell {
                cell,
                button: MouseButton::Left,
            } => self.place_unit(self.placing_side, self.pending_archetype, cell),
            Intent::ClickCell {
                cell,
                button: MouseButton::Right,
            } => self.remove_unit(self.placing_side, cell),
            Intent::ToggleSide => self.toggle_side(),
            Intent::CycleUnitType => self.cycle_unit_type(),
            Intent::ConfirmSetup => self.confirm_setup(),
        }
    }

    fn apply_battle(&mut self, intent: Intent) -> Result<Outcome> {
        match intent {
            Intent::ClickCell {
                cell,
                button: MouseButton::Left,
            } => self.select_unit(self.current_mover, cell),
            Intent::ClickCell {
                cell,
                button: MouseButton::Right,
            } => self.act_on(cell),
            Intent::ToggleSide | Intent::CycleUnitType | Intent::ConfirmSetup => {
                Err(GameError::WrongPhase(self.phase))
            }
        }
    }

    // ========================================================================
    // SETUP
    // ========================================================================

    /// Place a new unit of `archetype` for `side`
    pub fn place_unit(&mut self, side: Player, archetype: Archetype, cell: Cell) -> Result<Outcome> {
        self.require_phase(Phase::Setup)?;
        self.require_on_board(cell)?;

        if self.board.is_occupied(cell) {
            return Err(GameError::CellOccupied(cell));
        }
        if self.roster(side).is_full(self.max_units_per_side) {
            return Err(GameError::RosterFull(self.max_units_per_side));
        }
        if !self.in_placement_zone(side, cell) {
            return Err(GameError::InvalidZone(cell));
        }

        self.rosters[side as usize].push(Unit::new(archetype, side, cell));
        self.board.set_occupied(cell, true);
        tracing::debug!("{} placed {} at {}", side.label(), archetype.name(), cell);

        Ok(Outcome::Placed {
            owner: side,
            archetype,
            cell,
        })
    }

    /// Take back one of `side`'s units
    pub fn remove_unit(&mut self, side: Player, cell: Cell) -> Result<Outcome> {
        self.require_phase(Phase::Setup)?;
        self.require_on_board(cell)?;

        self.rosters[side as usize]
            .remove_at(cell)
            .ok_or(GameError::CellEmpty(cell))?;
        self.board.set_occupied(cell, false);
        tracing::debug!("{} removed unit at {}", side.label(), cell);

        Ok(Outcome::Removed { owner: side, cell })
    }

    /// Switch which side the next placement belongs to
    pub fn toggle_side(&mut self) -> Result<Outcome> {
        self.require_phase(Phase::Setup)?;
        self.placing_side = self.placing_side.opponent();
        Ok(Outcome::SideToggled(self.placing_side))
    }

    /// Advance the pending archetype Knight -> Archer -> Cleric -> Knight
    pub fn cycle_unit_type(&mut self) -> Result<Outcome> {
        self.require_phase(Phase::Setup)?;
        self.pending_archetype = self.pending_archetype.next();
        Ok(Outcome::UnitTypeChanged(self.pending_archetype))
    }

    /// Start the battle. No minimum roster size is enforced: a side with no
    /// units loses on the spot, reported as `Outcome::BattleForfeited`.
    pub fn confirm_setup(&mut self) -> Result<Outcome> {
        self.require_phase(Phase::Setup)?;

        self.phase = Phase::Battle;
        self.current_mover = Player::Player1;
        self.selection = None;
        tracing::info!(
            "Battle started: {} units vs {} units",
            self.roster(Player::Player1).len(),
            self.roster(Player::Player2).len()
        );

        self.check_termination();
        if self.is_finished() {
            return Ok(Outcome::BattleForfeited {
                winner: self.winner,
            });
        }
        Ok(Outcome::BattleStarted)
    }

    // ========================================================================
    // BATTLE
    // ========================================================================

    /// Arm one of `side`'s units. Read-only apart from the bookmark.
    pub fn select_unit(&mut self, side: Player, cell: Cell) -> Result<Outcome> {
        self.require_phase(Phase::Battle)?;
        if side != self.current_mover {
            return Err(GameError::WrongTurn);
        }
        if self.selection.is_some() {
            return Err(GameError::SelectionActive);
        }
        self.require_on_board(cell)?;

        let index = self
            .roster(side)
            .index_at(cell)
            .ok_or(GameError::CellEmpty(cell))?;
        self.selection = Some(Selection {
            index,
            origin: cell,
        });

        Ok(Outcome::Selected { cell })
    }

    /// Attack when the target is occupied, move otherwise
    fn act_on(&mut self, target: Cell) -> Result<Outcome> {
        self.require_on_board(target)?;
        self.require_selection()?;

        if self.board.is_occupied(target) {
            self.attack(target)
        } else {
            self.move_unit(target)
        }
    }

    /// Hit the opposing unit on `target` with the selected unit
    pub fn attack(&mut self, target: Cell) -> Result<Outcome> {
        self.require_phase(Phase::Battle)?;
        self.require_on_board(target)?;
        let (sel, attacker) = self.require_selection()?;

        if !self.board.is_occupied(target) {
            return Err(GameError::CellEmpty(target));
        }

        let distance = self.board.distance(target, sel.origin);
        if !in_reach(distance, attacker.attack_range, self.board.short_radius()) {
            return Err(GameError::OutOfRange(target));
        }

        // Only the opponent's roster is searched
        let defender_side = self.current_mover.opponent();
        let defenders = &mut self.rosters[defender_side as usize];
        let index = defenders
            .index_at(target)
            .ok_or(GameError::FriendlyTarget(target))?;

        let Some(defender) = defenders.get_mut(index) else {
            return Err(GameError::FriendlyTarget(target));
        };
        let killed = defender.take_damage(attacker.attack_power);
        let remaining_hp = defender.hp;

        if killed {
            defenders.remove_at(target);
            self.board.set_occupied(target, false);
            tracing::info!(
                "{} lost a unit at {} ({} left)",
                defender_side.label(),
                target,
                self.roster(defender_side).len()
            );
        }

        self.end_turn();
        self.check_termination();

        Ok(Outcome::Attacked {
            target,
            damage: attacker.attack_power,
            remaining_hp,
            killed,
        })
    }

    /// Step the selected unit onto the empty neighboring tile `target`
    pub fn move_unit(&mut self, target: Cell) -> Result<Outcome> {
        self.require_phase(Phase::Battle)?;
        self.require_on_board(target)?;
        let (sel, _) = self.require_selection()?;

        if self.board.is_occupied(target) {
            return Err(GameError::CellOccupied(target));
        }

        let distance = self.board.distance(target, sel.origin);
        if !in_reach(distance, MOVE_RANGE, self.board.short_radius()) {
            return Err(GameError::OutOfRange(target));
        }
        if !self.can_climb(sel.origin, target) {
            return Err(GameError::TerrainBlocked(target));
        }

        let mover = self.current_mover;
        if let Some(unit) = self.rosters[mover as usize].get_mut(sel.index) {
            unit.position = target;
        }
        self.board.set_occupied(sel.origin, false);
        self.board.set_occupied(target, true);
        tracing::debug!("{} moved {} -> {}", mover.label(), sel.origin, target);

        self.end_turn();

        Ok(Outcome::Moved {
            from: sel.origin,
            to: target,
        })
    }

    // ========================================================================
    // RULE HELPERS
    // ========================================================================

    /// Player 1 places in the two leftmost columns, Player 2 in the two
    /// rightmost.
    fn in_placement_zone(&self, side: Player, cell: Cell) -> bool {
        match side {
            Player::Player1 => cell.col < PLACEMENT_BAND,
            Player::Player2 => cell.col + PLACEMENT_BAND >= self.board.cols(),
        }
    }

    /// Elevation rule: stepping from flat ground onto a tall tile is only
    /// possible along a row, moving right. Every other combination is open.
    fn can_climb(&self, origin: Cell, target: Cell) -> bool {
        if self.board.is_tall(origin) || !self.board.is_tall(target) {
            return true;
        }
        origin.row == target.row && origin.col < target.col
    }

    fn end_turn(&mut self) {
        self.selection = None;
        self.current_mover = self.current_mover.opponent();
    }

    /// Finish the game once either roster is empty
    fn check_termination(&mut self) {
        let p1_empty = self.roster(Player::Player1).is_empty();
        let p2_empty = self.roster(Player::Player2).is_empty();
        if !p1_empty && !p2_empty {
            return;
        }

        self.phase = Phase::Finished;
        self.selection = None;
        self.winner = match (p1_empty, p2_empty) {
            (false, true) => Some(Player::Player1),
            (true, false) => Some(Player::Player2),
            _ => None,
        };

        match self.winner {
            Some(winner) => tracing::info!("Game over: {} wins", winner.label()),
            None => tracing::info!("Game over: no units left on either side"),
        }
    }

    fn require_phase(&self, phase: Phase) -> Result<()> {
        if self.phase == phase {
            Ok(())
        } else if self.phase == Phase::Finished {
            Err(GameError::GameOver)
        } else {
            Err(GameError::WrongPhase(self.phase))
        }
    }

    fn require_on_board(&self, cell: Cell) -> Result<()> {
        if self.board.contains(cell) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds(cell))
        }
    }

    fn require_selection(&self) -> Result<(Selection, Unit)> {
        let sel = self.selection.ok_or(GameError::NoSelection)?;
        let unit = self
            .roster(self.current_mover)
            .get(sel.index)
            .copied()
            .ok_or(GameError::NoSelection)?;
        Ok((sel, unit))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x4 flat board: Player 1 places in columns 0-1, Player 2 in 2-3
    fn small_session(max: i32) -> GameSession {
        GameSession::new(Board::new(4, 4, 50.0), max)
    }

    fn place(session: &mut GameSession, side: Player, archetype: Archetype, row: usize, col: usize) {
        session
            .place_unit(side, archetype, Cell::new(row, col))
            .unwrap();
    }

    #[test]
    fn test_session_creation() {
        let session = small_session(3);
        assert_eq!(session.phase(), Phase::Setup);
        assert_eq!(session.placing_side(), Player::Player1);
        assert_eq!(session.pending_archetype(), Archetype::Knight);
        assert_eq!(session.current_mover(), Player::Player1);
        assert!(session.selection().is_none());
        assert!(session.winner().is_none());
    }

    #[test]
    fn test_from_config_seeded() {
        let config = GameConfig::default().with_seed(3);
        let a = GameSession::from_config(&config);
        let b = GameSession::from_config(&config);
        let tall_a: Vec<_> = a.board().tiles().map(|t| t.tall).collect();
        let tall_b: Vec<_> = b.board().tiles().map(|t| t.tall).collect();
        assert_eq!(tall_a, tall_b);
        assert_eq!(a.max_units_per_side(), 3);
    }

    #[test]
    fn test_place_unit() {
        let mut session = small_session(3);
        let outcome = session
            .place_unit(Player::Player1, Archetype::Cleric, Cell::new(2, 1))
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Placed {
                owner: Player::Player1,
                archetype: Archetype::Cleric,
                cell: Cell::new(2, 1),
            }
        );
        assert!(session.board().is_occupied(Cell::new(2, 1)));
        let unit = session.unit_at(Cell::new(2, 1)).unwrap();
        assert_eq!(unit.hp, 40);
        assert!(session.occupancy_consistent());
    }

    #[test]
    fn test_place_rejections() {
        let mut session = small_session(1);
        place(&mut session, Player::Player1, Archetype::Knight, 0, 0);

        assert_eq!(
            session.place_unit(Player::Player2, Archetype::Knight, Cell::new(0, 0)),
            Err(GameError::CellOccupied(Cell::new(0, 0)))
        );
        assert_eq!(
            session.place_unit(Player::Player1, Archetype::Knight, Cell::new(1, 0)),
            Err(GameError::RosterFull(1))
        );
        assert_eq!(
            session.place_unit(Player::Player2, Archetype::Knight, Cell::new(1, 1)),
            Err(GameError::InvalidZone(Cell::new(1, 1)))
        );
        assert_eq!(
            session.place_unit(Player::Player2, Archetype::Knight, Cell::new(9, 3)),
            Err(GameError::OutOfBounds(Cell::new(9, 3)))
        );
        assert_eq!(session.roster(Player::Player2).len(), 0);
    }

    #[test]
    fn test_roster_full_is_idempotent() {
        let mut session = small_session(2);
        place(&mut session, Player::Player2, Archetype::Archer, 0, 3);
        place(&mut session, Player::Player2, Archetype::Archer, 1, 3);
        for _ in 0..3 {
            assert_eq!(
                session.place_unit(Player::Player2, Archetype::Archer, Cell::new(2, 3)),
                Err(GameError::RosterFull(2))
            );
        }
        assert_eq!(session.roster(Player::Player2).len(), 2);
        assert!(!session.board().is_occupied(Cell::new(2, 3)));
    }

    #[test]
    fn test_non_positive_limit_blocks_placement() {
        for max in [0, -5] {
            let mut session = small_session(max);
            assert_eq!(
                session.place_unit(Player::Player1, Archetype::Knight, Cell::new(0, 0)),
                Err(GameError::RosterFull(max))
            );
        }
    }

    #[test]
    fn test_place_then_remove() {
        let mut session = small_session(3);
        place(&mut session, Player::Player1, Archetype::Knight, 0, 0);
        let before = session.roster(Player::Player1).len();

        place(&mut session, Player::Player1, Archetype::Archer, 3, 1);
        session.remove_unit(Player::Player1, Cell::new(3, 1)).unwrap();

        assert!(!session.board().is_occupied(Cell::new(3, 1)));
        assert_eq!(session.roster(Player::Player1).len(), before);
        assert!(session.occupancy_consistent());
    }

    #[test]
    fn test_remove_other_sides_unit_fails() {
        let mut session = small_session(3);
        place(&mut session, Player::Player2, Archetype::Knight, 0, 3);
        assert_eq!(
            session.remove_unit(Player::Player1, Cell::new(0, 3)),
            Err(GameError::CellEmpty(Cell::new(0, 3)))
        );
        assert!(session.board().is_occupied(Cell::new(0, 3)));
    }

    #[test]
    fn test_setup_toggles() {
        let mut session = small_session(3);
        assert_eq!(session.apply(Intent::ToggleSide), Ok(Outcome::SideToggled(Player::Player2)));
        assert_eq!(
            session.apply(Intent::CycleUnitType),
            Ok(Outcome::UnitTypeChanged(Archetype::Archer))
        );
        session.apply(Intent::left(1, 2)).unwrap();
        let unit = session.unit_at(Cell::new(1, 2)).unwrap();
        assert_eq!(unit.owner, Player::Player2);
        assert_eq!(unit.archetype, Archetype::Archer);
    }

    #[test]
    fn test_confirm_with_empty_side_finishes() {
        let mut session = small_session(3);
        place(&mut session, Player::Player2, Archetype::Knight, 0, 3);
        assert_eq!(
            session.confirm_setup(),
            Ok(Outcome::BattleForfeited {
                winner: Some(Player::Player2)
            })
        );
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.winner(), Some(Player::Player2));
    }

    #[test]
    fn test_confirm_with_no_units_has_no_winner() {
        let mut session = small_session(3);
        assert_eq!(
            session.confirm_setup(),
            Ok(Outcome::BattleForfeited { winner: None })
        );
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.winner(), None);
        assert_eq!(session.apply(Intent::left(0, 0)), Err(GameError::GameOver));
    }

    #[test]
    fn test_confirm_with_both_sides_starts_battle() {
        let mut session = small_session(3);
        place(&mut session, Player::Player1, Archetype::Knight, 0, 0);
        place(&mut session, Player::Player2, Archetype::Knight, 0, 3);
        assert_eq!(session.confirm_setup(), Ok(Outcome::BattleStarted));
        assert_eq!(session.phase(), Phase::Battle);
        assert!(session.winner().is_none());
    }

    #[test]
    fn test_battle_rejects_setup_intents() {
        let mut session = small_session(3);
        place(&mut session, Player::Player1, Archetype::Knight, 0, 0);
        place(&mut session, Player::Player2, Archetype::Knight, 0, 3);
        session.confirm_setup().unwrap();

        assert_eq!(session.apply(Intent::ToggleSide), Err(GameError::WrongPhase(Phase::Battle)));
        assert_eq!(session.apply(Intent::ConfirmSetup), Err(GameError::WrongPhase(Phase::Battle)));
        assert_eq!(
            session.place_unit(Player::Player1, Archetype::Knight, Cell::new(1, 0)),
            Err(GameError::WrongPhase(Phase::Battle))
        );
    }

    #[test]
    fn test_select_rules() {
        let mut session = small_session(3);
        place(&mut session, Player::Player1, Archetype::Knight, 0, 0);
        place(&mut session, Player::Player2, Archetype::Knight, 0, 3);
        session.confirm_setup().unwrap();

        assert_eq!(
            session.select_unit(Player::Player2, Cell::new(0, 3)),
            Err(GameError::WrongTurn)
        );
        // Enemy unit is not selectable
        assert_eq!(
            session.apply(Intent::left(0, 3)),
            Err(GameError::CellEmpty(Cell::new(0, 3)))
        );
        assert_eq!(session.apply(Intent::left(0, 0)), Ok(Outcome::Selected { cell: Cell::new(0, 0) }));
        assert_eq!(session.apply(Intent::left(0, 0)), Err(GameError::SelectionActive));

        let sel = session.selection().unwrap();
        assert_eq!(sel, Selection { index: 0, origin: Cell::new(0, 0) });
        assert_eq!(session.unit_at(Cell::new(0, 0)).unwrap().hp, 50);
    }

    #[test]
    fn test_action_without_selection() {
        let mut session = small_session(3);
        place(&mut session, Player::Player1, Archetype::Knight, 0, 0);
        place(&mut session, Player::Player2, Archetype::Knight, 0, 3);
        session.confirm_setup().unwrap();

        assert_eq!(session.apply(Intent::right(0, 1)), Err(GameError::NoSelection));
        assert_eq!(session.apply(Intent::right(0, 3)), Err(GameError::NoSelection));
        assert_eq!(session.current_mover(), Player::Player1);
    }

    #[test]
    fn test_attack_out_of_range_keeps_selection() {
        let mut session = small_session(3);
        place(&mut session, Player::Player1, Archetype::Knight, 0, 0);
        place(&mut session, Player::Player2, Archetype::Knight, 0, 3);
        session.confirm_setup().unwrap();

        session.apply(Intent::left(0, 0)).unwrap();
        assert_eq!(
            session.apply(Intent::right(0, 3)),
            Err(GameError::OutOfRange(Cell::new(0, 3)))
        );
        assert_eq!(session.unit_at(Cell::new(0, 3)).unwrap().hp, 50);
        assert!(session.selection().is_some());
        assert_eq!(session.current_mover(), Player::Player1);
    }

    #[test]
    fn test_attack_own_unit_does_nothing() {
        let mut session = small_session(3);
        place(&mut session, Player::Player1, Archetype::Knight, 0, 0);
        place(&mut session, Player::Player1, Archetype::Knight, 0, 1);
        place(&mut session, Player::Player2, Archetype::Knight, 0, 3);
        session.confirm_setup().unwrap();

        session.apply(Intent::left(0, 0)).unwrap();
        assert_eq!(
            session.apply(Intent::right(0, 1)),
            Err(GameError::FriendlyTarget(Cell::new(0, 1)))
        );
        assert_eq!(session.unit_at(Cell::new(0, 1)).unwrap().hp, 50);
        assert!(session.selection().is_some());
        assert_eq!(session.current_mover(), Player::Player1);
    }

    #[test]
    fn test_attack_damages_and_flips_turn() {
        let mut session = small_session(3);
        place(&mut session, Player::Player1, Archetype::Archer, 0, 0);
        place(&mut session, Player::Player2, Archetype::Knight, 0, 3);
        session.confirm_setup().unwrap();

        session.apply(Intent::left(0, 0)).unwrap();
        let outcome = session.apply(Intent::right(0, 3)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Attacked {
                target: Cell::new(0, 3),
                damage: 15,
                remaining_hp: 35,
                killed: false,
            }
        );
        assert!(session.selection().is_none());
        assert_eq!(session.current_mover(), Player::Player2);
    }

    #[test]
    fn test_move_to_neighbor() {
        let mut session = small_session(3);
        place(&mut session, Player::Player1, Archetype::Knight, 1, 1);
        place(&mut session, Player::Player2, Archetype::Knight, 3, 3);
        session.confirm_setup().unwrap();

        session.apply(Intent::left(1, 1)).unwrap();
        assert_eq!(
            session.apply(Intent::right(1, 2)),
            Ok(Outcome::Moved { from: Cell::new(1, 1), to: Cell::new(1, 2) })
        );
        assert!(!session.board().is_occupied(Cell::new(1, 1)));
        assert!(session.board().is_occupied(Cell::new(1, 2)));
        assert_eq!(session.roster(Player::Player1).get(0).unwrap().position, Cell::new(1, 2));
        assert_eq!(session.current_mover(), Player::Player2);
        assert!(session.occupancy_consistent());
    }

    #[test]
    fn test_move_too_far() {
        let mut session = small_session(3);
        place(&mut session, Player::Player1, Archetype::Knight, 1, 0);
        place(&mut session, Player::Player2, Archetype::Knight, 3, 3);
        session.confirm_setup().unwrap();

        session.apply(Intent::left(1, 0)).unwrap();
        assert_eq!(
            session.apply(Intent::right(1, 2)),
            Err(GameError::OutOfRange(Cell::new(1, 2)))
        );
        assert!(session.selection().is_some());
        assert_eq!(session.current_mover(), Player::Player1);
    }

    #[test]
    fn test_climb_rule() {
        let mut board = Board::new(4, 4, 50.0);
        board.set_tall(Cell::new(1, 0), true);
        board.set_tall(Cell::new(1, 2), true);
        board.set_tall(Cell::new(0, 1), true);
        let mut session = GameSession::new(board, 3);
        place(&mut session, Player::Player1, Archetype::Knight, 1, 1);
        place(&mut session, Player::Player2, Archetype::Knight, 3, 3);
        session.confirm_setup().unwrap();

        session.apply(Intent::left(1, 1)).unwrap();
        // Tall tile to the left on the same row
        assert_eq!(
            session.apply(Intent::right(1, 0)),
            Err(GameError::TerrainBlocked(Cell::new(1, 0)))
        );
        // Tall tile on another row
        assert_eq!(
            session.apply(Intent::right(0, 1)),
            Err(GameError::TerrainBlocked(Cell::new(0, 1)))
        );
        // Tall tile to the right on the same row
        assert!(session.apply(Intent::right(1, 2)).is_ok());
    }

    #[test]
    fn test_moves_from_tall_ground() {
        let mut board = Board::new(4, 4, 50.0);
        board.set_tall(Cell::new(2, 1), true);
        board.set_tall(Cell::new(2, 0), true);
        let mut session = GameSession::new(board, 3);
        place(&mut session, Player::Player1, Archetype::Knight, 2, 1);
        place(&mut session, Player::Player2, Archetype::Knight, 0, 3);
        session.confirm_setup().unwrap();

        // Tall to tall, leftward on the same row
        session.apply(Intent::left(2, 1)).unwrap();
        assert_eq!(
            session.apply(Intent::right(2, 0)),
            Ok(Outcome::Moved { from: Cell::new(2, 1), to: Cell::new(2, 0) })
        );
        assert_eq!(session.current_mover(), Player::Player2);

        session.apply(Intent::left(0, 3)).unwrap();
        session.apply(Intent::right(0, 2)).unwrap();
        assert_eq!(session.current_mover(), Player::Player1);

        // Tall to flat, onto another row
        session.apply(Intent::left(2, 0)).unwrap();
        assert_eq!(
            session.apply(Intent::right(3, 0)),
            Ok(Outcome::Moved { from: Cell::new(2, 0), to: Cell::new(3, 0) })
        );
        assert_eq!(session.current_mover(), Player::Player2);
        assert!(session.occupancy_consistent());
    }

    #[test]
    fn test_archer_reach_threshold() {
        // (0, 1) -> (0, 6) is five columns: exactly ten short radii
        let mut session = GameSession::new(Board::new(4, 8, 50.0), 3);
        place(&mut session, Player::Player1, Archetype::Archer, 0, 1);
        place(&mut session, Player::Player2, Archetype::Knight, 0, 6);
        session.confirm_setup().unwrap();

        let r = session.board().short_radius();
        let distance = session.board().distance(Cell::new(0, 1), Cell::new(0, 6));
        assert!((distance - 10.0 * r).abs() < 1e-3);

        session.apply(Intent::left(0, 1)).unwrap();
        assert!(matches!(
            session.apply(Intent::right(0, 6)),
            Ok(Outcome::Attacked { remaining_hp: 35, .. })
        ));
        assert_eq!(session.current_mover(), Player::Player2);

        // (0, 0) -> (0, 6) is six columns: twelve short radii
        let mut session = GameSession::new(Board::new(4, 8, 50.0), 3);
        place(&mut session, Player::Player1, Archetype::Archer, 0, 0);
        place(&mut session, Player::Player2, Archetype::Knight, 0, 6);
        session.confirm_setup().unwrap();

        session.apply(Intent::left(0, 0)).unwrap();
        assert_eq!(
            session.apply(Intent::right(0, 6)),
            Err(GameError::OutOfRange(Cell::new(0, 6)))
        );
        assert_eq!(session.unit_at(Cell::new(0, 6)).unwrap().hp, 50);
        assert_eq!(session.current_mover(), Player::Player1);
        assert!(session.selection().is_some());
    }
}
