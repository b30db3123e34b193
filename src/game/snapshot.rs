//! Human-readable board snapshots.
//!
//! A snapshot is a grid of cell tokens: `X` for an empty cell, otherwise the
//! occupant's unit id or owning player id. Rendered with every column padded
//! to its widest token and columns joined by tabs:
//!
//! ```text
//! X	X	3
//! 1	X	X
//! X	12	X
//! ```

use std::fmt;

use serde::Serialize;

use crate::game::Board;

/// Token used for unoccupied cells.
pub const EMPTY_CELL: &str = "X";

/// What to print for an occupied cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotLabel {
    /// The occupant's unit id.
    #[default]
    Unit,
    /// The occupant's player id.
    Player,
}

/// A captured board, one token per cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    /// Board width.
    pub width: u16,
    /// Board height.
    pub height: u16,
    /// Labelling used for occupied cells.
    pub label: SnapshotLabel,
    /// Cell tokens, row by row.
    pub rows: Vec<Vec<String>>,
}

impl BoardSnapshot {
    /// Capture the current board.
    #[must_use]
    pub fn capture(board: &Board, label: SnapshotLabel) -> Self {
        let rows = board
            .grid()
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell.and_then(|id| board.unit(id)) {
                        None => EMPTY_CELL.to_string(),
                        Some(unit) => match label {
                            SnapshotLabel::Unit => unit.id.to_string(),
                            SnapshotLabel::Player => unit.player_id.to_string(),
                        },
                    })
                    .collect()
            })
            .collect();

        Self {
            width: board.width(),
            height: board.height(),
            label,
            rows,
        }
    }

    /// Width of the widest token in each column.
    fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0; usize::from(self.width)];
        for row in &self.rows {
            for (w, token) in widths.iter_mut().zip(row) {
                *w = (*w).max(token.len());
            }
        }
        widths
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(token, &width)| format!("{token:<width$}"))
                .collect();
            write!(f, "{}", line.join("\t"))?;
        }
        Ok(())
    }
}
