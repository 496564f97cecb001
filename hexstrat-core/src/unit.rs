//! Unit archetypes and placed combatants

use serde::{Deserialize, Serialize};

use crate::board::Cell;

/// Side of the table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Player1 = 0,
    Player2 = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    /// Human-facing name ("Player 1")
    pub fn label(self) -> &'static str {
        match self {
            Player::Player1 => "Player 1",
            Player::Player2 => "Player 2",
        }
    }
}

/// Unit archetype
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Knight = 0,
    Archer = 1,
    Cleric = 2,
}

/// All archetypes, in cycle order
pub const ARCHETYPES: [Archetype; 3] = [Archetype::Knight, Archetype::Archer, Archetype::Cleric];

/// Base stats fixed by archetype
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitStats {
    pub hp: i32,
    /// Measured in short radii
    pub attack_range: i32,
    pub attack_power: i32,
    /// Only Clerics carry a non-zero value
    pub heal_amount: i32,
}

impl UnitStats {
    const fn new(hp: i32, attack_range: i32, attack_power: i32, heal_amount: i32) -> Self {
        Self {
            hp,
            attack_range,
            attack_power,
            heal_amount,
        }
    }
}

/// Stat table indexed by `Archetype as usize`
static UNIT_STATS: [UnitStats; 3] = [
    UnitStats::new(50, 2, 20, 0),  // Knight
    UnitStats::new(30, 10, 15, 0), // Archer
    UnitStats::new(40, 8, 10, 15), // Cleric
];

impl Archetype {
    /// Archetype for a cycle index (wraps modulo 3)
    pub fn from_index(idx: usize) -> Self {
        ARCHETYPES[idx % ARCHETYPES.len()]
    }

    /// Next archetype in the Knight -> Archer -> Cleric cycle
    pub fn next(self) -> Self {
        Self::from_index(self as usize + 1)
    }

    pub fn stats(self) -> &'static UnitStats {
        &UNIT_STATS[self as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Archetype::Knight => "Knight",
            Archetype::Archer => "Archer",
            Archetype::Cleric => "Cleric",
        }
    }
}

/// A placed combatant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub archetype: Archetype,
    pub owner: Player,
    pub position: Cell,
    pub hp: i32,
    pub attack_range: i32,
    pub attack_power: i32,
    pub heal_amount: i32,
}

impl Unit {
    /// Create a unit with its archetype's base stats
    pub fn new(archetype: Archetype, owner: Player, position: Cell) -> Self {
        let stats = archetype.stats();
        Self {
            archetype,
            owner,
            position,
            hp: stats.hp,
            attack_range: stats.attack_range,
            attack_power: stats.attack_power,
            heal_amount: stats.heal_amount,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtract damage; returns true if the unit died
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        !self.is_alive()
    }
}
