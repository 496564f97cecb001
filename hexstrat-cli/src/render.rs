//! ASCII board rendering
//!
//! Each tile is a two-character token: the occupant glyph (or `.`) and a
//! marker (`^` tall, `*` selected origin). Player 1 units are upper case,
//! Player 2 lower case. Odd rows are indented half a tile.

use std::fmt::Write;

use hexstrat_core::{Archetype, Player, Snapshot, Unit};

/// Render the board grid with row/column labels
pub fn render_board(snap: &Snapshot) -> String {
    let mut out = String::new();

    out.push_str("    ");
    for col in 0..snap.cols {
        let _ = write!(out, "{:<4}", col);
    }
    out.push('\n');

    for row in 0..snap.rows {
        let _ = write!(out, "{:>2}  ", row);
        if row % 2 == 1 {
            out.push_str("  ");
        }
        for col in 0..snap.cols {
            let Some(tile) = snap.tiles.get(row * snap.cols + col) else {
                continue;
            };
            let glyph = unit_on(snap, row, col).map_or('.', unit_glyph);
            let selected = snap
                .selection
                .map_or(false, |s| s.origin == tile.cell);
            let marker = if selected {
                '*'
            } else if tile.tall {
                '^'
            } else {
                ' '
            };
            let _ = write!(out, "{}{}  ", glyph, marker);
        }
        out.push('\n');
    }

    out
}

/// Render one roster line per player plus the status line
pub fn render_hud(snap: &Snapshot) -> String {
    let mut out = String::new();
    for (player, units) in [(Player::Player1, &snap.player1), (Player::Player2, &snap.player2)] {
        let _ = write!(out, "{}:", player.label());
        if units.is_empty() {
            out.push_str(" -");
        }
        for unit in units.iter() {
            let _ = write!(
                out,
                " {}{} {}hp",
                unit.archetype.name(),
                unit.position,
                unit.hp
            );
        }
        out.push('\n');
    }
    out.push_str(&snap.status_line());
    out.push('\n');
    out
}

fn unit_on(snap: &Snapshot, row: usize, col: usize) -> Option<&Unit> {
    snap.player1
        .iter()
        .chain(snap.player2.iter())
        .find(|u| u.position.row == row && u.position.col == col)
}

fn unit_glyph(unit: &Unit) -> char {
    let glyph = match unit.archetype {
        Archetype::Knight => 'K',
        Archetype::Archer => 'A',
        Archetype::Cleric => 'C',
    };
    match unit.owner {
        Player::Player1 => glyph,
        Player::Player2 => glyph.to_ascii_lowercase(),
    }
}
