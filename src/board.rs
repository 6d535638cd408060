//! Dual-grid board model: the player's own grid with ship placement and the
//! opponent grid recording shot history. Pure data; no I/O.

use crate::common::{ClientError, ShotOutcome};
use crate::config::BOARD_SIZE;

/// State of a cell on the player's own grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum OwnCell {
    Empty,
    Ship,
    Miss,
    Hit,
}

/// State of a cell on the opponent grid. `Sunk` is server-reported, never
/// inferred locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum OpponentCell {
    Unknown,
    Miss,
    Hit,
    Sunk,
}

/// Cell state as reported to rendering callbacks, tagged by grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    Own(OwnCell),
    Opponent(OpponentCell),
}

/// Both 10×10 grids, mutable only through the set-operations below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    own: [[OwnCell; BOARD_SIZE]; BOARD_SIZE],
    opponent: [[OpponentCell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create a pair of default-initialized grids.
    pub fn new() -> Self {
        Board {
            own: [[OwnCell::Empty; BOARD_SIZE]; BOARD_SIZE],
            opponent: [[OpponentCell::Unknown; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Reset every cell of both grids to its default state.
    pub fn reset(&mut self) {
        self.own = [[OwnCell::Empty; BOARD_SIZE]; BOARD_SIZE];
        self.opponent = [[OpponentCell::Unknown; BOARD_SIZE]; BOARD_SIZE];
    }

    /// Reset only the opponent grid.
    pub fn reset_opponent(&mut self) {
        self.opponent = [[OpponentCell::Unknown; BOARD_SIZE]; BOARD_SIZE];
    }

    /// Replace own-grid cells from a board snapshot: `'S'` marks a ship
    /// segment, any other character open water.
    ///
    /// Rows beyond the tenth are ignored. A row of the wrong length or a
    /// supply of fewer than ten rows fails with `MalformedBoard`; rows
    /// processed before the failure stay applied, so the caller should treat
    /// the whole grid as untrusted until a corrected snapshot arrives.
    pub fn load_own_board<'a, I>(&mut self, rows: I) -> Result<(), ClientError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut loaded = 0;
        for row in rows {
            if loaded == BOARD_SIZE {
                break;
            }
            let mut cells = [OwnCell::Empty; BOARD_SIZE];
            let mut len = 0;
            for ch in row.chars() {
                if len == BOARD_SIZE {
                    return Err(ClientError::MalformedBoard { rows_loaded: loaded });
                }
                cells[len] = if ch == 'S' { OwnCell::Ship } else { OwnCell::Empty };
                len += 1;
            }
            if len != BOARD_SIZE {
                return Err(ClientError::MalformedBoard { rows_loaded: loaded });
            }
            self.own[loaded] = cells;
            loaded += 1;
        }
        if loaded != BOARD_SIZE {
            return Err(ClientError::MalformedBoard { rows_loaded: loaded });
        }
        Ok(())
    }

    /// Record a shot result on the own grid. `Kill` marks the cell `Hit`;
    /// own-grid cells carry no sunk state.
    pub fn set_own_cell(
        &mut self,
        row: usize,
        col: usize,
        outcome: ShotOutcome,
    ) -> Result<(), ClientError> {
        Self::check_bounds(row, col)?;
        self.own[row][col] = match outcome {
            ShotOutcome::Miss => OwnCell::Miss,
            ShotOutcome::Hit | ShotOutcome::Kill => OwnCell::Hit,
        };
        Ok(())
    }

    /// Record a shot result on the opponent grid.
    pub fn set_opponent_cell(
        &mut self,
        row: usize,
        col: usize,
        outcome: ShotOutcome,
    ) -> Result<(), ClientError> {
        Self::check_bounds(row, col)?;
        self.opponent[row][col] = match outcome {
            ShotOutcome::Miss => OpponentCell::Miss,
            ShotOutcome::Hit => OpponentCell::Hit,
            ShotOutcome::Kill => OpponentCell::Sunk,
        };
        Ok(())
    }

    /// Read a cell of the own grid.
    pub fn own_cell(&self, row: usize, col: usize) -> Result<OwnCell, ClientError> {
        Self::check_bounds(row, col)?;
        Ok(self.own[row][col])
    }

    /// Read a cell of the opponent grid.
    pub fn opponent_cell(&self, row: usize, col: usize) -> Result<OpponentCell, ClientError> {
        Self::check_bounds(row, col)?;
        Ok(self.opponent[row][col])
    }

    fn check_bounds(row: usize, col: usize) -> Result<(), ClientError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            Err(ClientError::OutOfRange { row, col })
        } else {
            Ok(())
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
