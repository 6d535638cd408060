//! Common types for the sea-battle client: shot outcomes, board sides and
//! the non-fatal error taxonomy.

/// Server-reported result of a shot, shared by both boards.
///
/// On the wire the server spells these `miss`, `hit` and `kill`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// Shot landed on open water.
    Miss,
    /// Shot struck a ship segment.
    Hit,
    /// Shot struck the last segment of a ship.
    Kill,
}

impl ShotOutcome {
    /// Parse the server's wire word. Unknown words yield `None` and the
    /// surrounding event is dropped.
    pub fn from_wire(word: &str) -> Option<Self> {
        match word {
            "miss" => Some(ShotOutcome::Miss),
            "hit" => Some(ShotOutcome::Hit),
            "kill" => Some(ShotOutcome::Kill),
            _ => None,
        }
    }
}

/// Which of the two grids a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardSide {
    /// The player's own grid with ship placement.
    Own,
    /// The player's view of shots against the opponent.
    Opponent,
}

/// Errors reported by the client core. None of these are fatal: every one
/// either resets the session to the main menu or is ignored after reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ClientError {
    /// Own-board snapshot had the wrong shape. Rows processed before the
    /// error remain applied; the board should be treated as untrusted until
    /// the next snapshot arrives.
    MalformedBoard { rows_loaded: usize },
    /// Coordinate outside the 10×10 grid.
    OutOfRange { row: usize, col: usize },
    /// Session id was empty or whitespace-only; nothing was sent.
    EmptySessionId,
    /// Transport signalled a disconnect not initiated by this client.
    ConnectionLost,
}

impl core::fmt::Display for ClientError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ClientError::MalformedBoard { rows_loaded } => {
                write!(f, "malformed board snapshot after {} rows", rows_loaded)
            }
            ClientError::OutOfRange { row, col } => {
                write!(f, "coordinate out of range: row={}, col={}", row, col)
            }
            ClientError::EmptySessionId => write!(f, "session id is empty"),
            ClientError::ConnectionLost => write!(f, "disconnected from server"),
        }
    }
}
