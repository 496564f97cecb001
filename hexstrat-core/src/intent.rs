//! Discrete player intents produced by the input layer

use serde::{Deserialize, Serialize};

use crate::board::Cell;

/// Pointer button, already discriminated by the input adapter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}

/// One player intent
///
/// During setup a left click places and a right click removes. During
/// battle a left click selects and a right click attacks (occupied target)
/// or moves (empty target).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    ClickCell { cell: Cell, button: MouseButton },
    ToggleSide,
    CycleUnitType,
    ConfirmSetup,
}

impl Intent {
    pub fn left(row: usize, col: usize) -> Self {
        Intent::ClickCell {
            cell: Cell::new(row, col),
            button: MouseButton::Left,
        }
    }

    pub fn right(row: usize, col: usize) -> Self {
        Intent::ClickCell {
            cell: Cell::new(row, col),
            button: MouseButton::Right,
        }
    }
}
