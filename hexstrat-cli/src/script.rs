//! Text intent grammar
//!
//! One intent per line:
//! - `click <row> <col> [left|right]` (button defaults to left)
//! - `toggle`, `cycle`, `confirm`
//!
//! Blank lines and `#` comments are skipped.

use anyhow::{bail, Context, Result};

use hexstrat_core::{Cell, Intent, MouseButton};

/// Parse one script line; `Ok(None)` for blank lines and comments
pub fn parse_intent(line: &str) -> Result<Option<Intent>> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or("").to_ascii_lowercase();

    let intent = match command.as_str() {
        "click" | "c" => {
            let row = parse_coord(words.next(), "row")?;
            let col = parse_coord(words.next(), "column")?;
            let button = match words.next().map(str::to_ascii_lowercase).as_deref() {
                None | Some("left") | Some("l") => MouseButton::Left,
                Some("right") | Some("r") => MouseButton::Right,
                Some(other) => bail!("Unknown button: {}", other),
            };
            Intent::ClickCell {
                cell: Cell::new(row, col),
                button,
            }
        }
        "toggle" | "space" => Intent::ToggleSide,
        "cycle" | "tab" => Intent::CycleUnitType,
        "confirm" | "finish" => Intent::ConfirmSetup,
        other => bail!("Unknown command: {}", other),
    };

    if let Some(extra) = words.next() {
        bail!("Unexpected argument: {}", extra);
    }

    Ok(Some(intent))
}

fn parse_coord(word: Option<&str>, what: &str) -> Result<usize> {
    let word = word.with_context(|| format!("Missing {}", what))?;
    word.parse()
        .with_context(|| format!("Invalid {}: {}", what, word))
}
