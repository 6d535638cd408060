//! Stateless codec between the server's free-text lines and structured
//! events, and between client intents and outbound command strings.
//!
//! Marker strings are matched bit-exact against the server's wording. A
//! frame matching no marker parses to no events and is dropped by the
//! caller; that is deliberate, since the server may interleave unrelated or
//! future-reserved lines.

#[cfg(not(feature = "std"))]
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
use std::{
    string::{String, ToString},
    vec::Vec,
};

use core::fmt;

use crate::common::ShotOutcome;
use crate::config::BOARD_SIZE;

/// Structured event decoded from one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ServerEvent {
    /// `Session created: <id>`. The server opened the requested session.
    SessionCreated { id: String },
    /// `Connected to session: <id>`. The client joined an existing session.
    SessionJoined { id: String },
    /// A frame carrying `Your board:` followed by the grid rows. `rows`
    /// holds the rows as scanned; shape validation is the board's job.
    OwnBoard { rows: Vec<String> },
    /// `Your turn`. The client may fire.
    YourTurn,
    /// `Shot result: <word>`, resolving this client's pending shot.
    ShotResult { outcome: ShotOutcome },
    /// `Opponent shot at (R, C): <word>`, incoming fire on the own grid.
    OpponentShot {
        row: usize,
        col: usize,
        outcome: ShotOutcome,
    },
    /// `Game over: You win!` / `Game over: You lose!`.
    GameOver { won: bool },
}

/// Outbound client intent. `Display` renders the exact wire string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ClientCommand {
    Create { id: String },
    Join { id: String },
    Shoot { row: usize, col: usize },
}

impl fmt::Display for ClientCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientCommand::Create { id } => write!(f, "create:{}", id),
            ClientCommand::Join { id } => write!(f, "join:{}", id),
            ClientCommand::Shoot { row, col } => write!(f, "shoot {} {}", row, col),
        }
    }
}

/// Decode one inbound frame into zero, one or two events.
///
/// Two events arise only from a `Connected to session:` frame that also
/// carries a board snapshot. Frames matching no marker yield an empty vec;
/// malformed numeric fields drop the single affected event.
pub fn parse_server_message(message: &str) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    if let Some(rest) = message.strip_prefix("Session created:") {
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        events.push(ServerEvent::SessionCreated {
            id: rest.trim().to_string(),
        });
    } else if let Some(rest) = message.strip_prefix("Connected to session:") {
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        let id = rest.split('\n').next().unwrap_or("").trim().to_string();
        events.push(ServerEvent::SessionJoined { id });
        if message.contains("Your board:") {
            events.push(ServerEvent::OwnBoard {
                rows: scan_board_rows(message),
            });
        }
    } else if message.contains("Your board:") {
        events.push(ServerEvent::OwnBoard {
            rows: scan_board_rows(message),
        });
    } else if message == "Your turn" {
        events.push(ServerEvent::YourTurn);
    } else if let Some(rest) = message.strip_prefix("Shot result:") {
        if let Some(outcome) = rest
            .strip_prefix(' ')
            .and_then(|rest| ShotOutcome::from_wire(leading_word(rest)))
        {
            events.push(ServerEvent::ShotResult { outcome });
        }
    } else if message.starts_with("Opponent shot at") {
        if let Some(event) = parse_opponent_shot(message) {
            events.push(event);
        }
    } else if message == "Game over: You win!" {
        events.push(ServerEvent::GameOver { won: true });
    } else if message == "Game over: You lose!" {
        events.push(ServerEvent::GameOver { won: false });
    }
    events
}

/// Collect the grid rows following a `Your board:` marker line: non-empty
/// trimmed lines of exactly `BOARD_SIZE` characters, up to `BOARD_SIZE`
/// rows. Lines of any other length between rows are skipped.
fn scan_board_rows(message: &str) -> Vec<String> {
    let mut rows = Vec::new();
    let mut started = false;
    for line in message.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !started {
            if trimmed.contains("Your board:") {
                started = true;
            }
            continue;
        }
        if rows.len() == BOARD_SIZE {
            break;
        }
        if trimmed.chars().count() == BOARD_SIZE {
            rows.push(trimmed.to_string());
        }
    }
    rows
}

fn parse_opponent_shot(message: &str) -> Option<ServerEvent> {
    let rest = message.strip_prefix("Opponent shot at (")?;
    let (row, rest) = leading_number(rest)?;
    let rest = rest.strip_prefix(", ")?;
    let (col, rest) = leading_number(rest)?;
    let rest = rest.strip_prefix("): ")?;
    let outcome = ShotOutcome::from_wire(leading_word(rest))?;
    Some(ServerEvent::OpponentShot { row, col, outcome })
}

fn leading_number(s: &str) -> Option<(usize, &str)> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    let n = s[..end].parse().ok()?;
    Some((n, &s[end..]))
}

fn leading_word(s: &str) -> &str {
    let end = s
        .find(|c: char| !c.is_alphanumeric() && c != '_')
        .unwrap_or(s.len());
    &s[..end]
}
