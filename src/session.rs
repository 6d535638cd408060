//! Session and turn protocol state machine.
//!
//! [`Session`] interprets decoded server events, tracks the session phase
//! and turn flag, and mutates the board model it is handed. Every handler
//! returns the list of [`StateChange`]s the transition produced; the
//! controller fans those out to rendering callbacks and the transport.

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

use log::{debug, warn};

use crate::board::Board;
use crate::common::{BoardSide, ClientError, ShotOutcome};
use crate::config::BOARD_SIZE;
use crate::protocol::{ClientCommand, ServerEvent};

/// Session-level state. `GameOver` is transient: reporting the outcome
/// immediately returns the session to `MainMenu`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    MainMenu,
    AwaitingOpponent,
    InProgress,
    GameOver,
}

/// One observable consequence of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// Command to put on the wire, fire-and-forget.
    Outbound(ClientCommand),
    /// The session phase changed.
    Phase(Phase),
    /// The turn flag changed.
    Turn(bool),
    /// The server confirmed a session id.
    SessionId(String),
    /// A single cell changed; read its state from the board.
    Cell {
        side: BoardSide,
        row: usize,
        col: usize,
    },
    /// Both grids were replaced wholesale; re-read everything.
    BoardsRefreshed,
    /// The game ended. Reported before the automatic reset to `MainMenu`.
    GameOver { won: bool },
    /// A non-fatal error to surface to the presentation layer.
    Error(ClientError),
}

/// The client-side session: confirmed or requested id, phase, turn flag and
/// the single in-flight shot awaiting resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: Option<String>,
    phase: Phase,
    my_turn: bool,
    pending_shot: Option<(usize, usize)>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            id: None,
            phase: Phase::MainMenu,
            my_turn: false,
            pending_shot: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_my_turn(&self) -> bool {
        self.my_turn
    }

    /// Requested or server-confirmed session id.
    pub fn session_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn pending_shot(&self) -> Option<(usize, usize)> {
        self.pending_shot
    }

    /// User asked to create a session. Records the requested id and emits
    /// the `create` command; the server's confirmation advances the phase.
    pub fn request_create(&mut self, id: &str) -> Vec<StateChange> {
        self.request_session(id, true)
    }

    /// User asked to join a session. Same contract as [`request_create`].
    ///
    /// [`request_create`]: Session::request_create
    pub fn request_join(&mut self, id: &str) -> Vec<StateChange> {
        self.request_session(id, false)
    }

    fn request_session(&mut self, id: &str, create: bool) -> Vec<StateChange> {
        let mut changes = Vec::new();
        if self.phase != Phase::MainMenu {
            debug!("ignoring session request in {:?}", self.phase);
            return changes;
        }
        let id = id.trim();
        if id.is_empty() {
            changes.push(StateChange::Error(ClientError::EmptySessionId));
            return changes;
        }
        self.id = Some(id.to_string());
        let command = if create {
            ClientCommand::Create { id: id.to_string() }
        } else {
            ClientCommand::Join { id: id.to_string() }
        };
        changes.push(StateChange::Outbound(command));
        changes
    }

    /// User selected an opponent-grid cell. Ignored unless the game is in
    /// progress and it is this client's turn; firing blocks the turn flag
    /// until the server resolves the shot.
    pub fn select_cell(&mut self, row: usize, col: usize) -> Vec<StateChange> {
        let mut changes = Vec::new();
        if self.phase != Phase::InProgress || !self.my_turn {
            debug!("ignoring cell selection at ({}, {})", row, col);
            return changes;
        }
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            changes.push(StateChange::Error(ClientError::OutOfRange { row, col }));
            return changes;
        }
        self.pending_shot = Some((row, col));
        self.my_turn = false;
        changes.push(StateChange::Outbound(ClientCommand::Shoot { row, col }));
        changes.push(StateChange::Turn(false));
        changes
    }

    /// Apply one decoded server event.
    pub fn handle_event(&mut self, event: ServerEvent, board: &mut Board) -> Vec<StateChange> {
        let mut changes = Vec::new();
        match event {
            ServerEvent::SessionCreated { id } | ServerEvent::SessionJoined { id } => {
                match self.phase {
                    Phase::MainMenu | Phase::AwaitingOpponent => {
                        self.id = Some(id.clone());
                        changes.push(StateChange::SessionId(id));
                        if self.phase == Phase::MainMenu {
                            self.phase = Phase::AwaitingOpponent;
                            changes.push(StateChange::Phase(Phase::AwaitingOpponent));
                        }
                    }
                    _ => warn!("ignoring session confirmation in {:?}", self.phase),
                }
            }
            ServerEvent::OwnBoard { rows } => match self.phase {
                Phase::MainMenu | Phase::AwaitingOpponent => {
                    match board.load_own_board(rows.iter().map(String::as_str)) {
                        Ok(()) => {
                            board.reset_opponent();
                            self.phase = Phase::InProgress;
                            debug!("game started");
                            changes.push(StateChange::BoardsRefreshed);
                            changes.push(StateChange::Phase(Phase::InProgress));
                        }
                        Err(err) => {
                            warn!("rejected board snapshot: {}", err);
                            changes.push(StateChange::Error(err));
                        }
                    }
                }
                _ => warn!("ignoring board snapshot in {:?}", self.phase),
            },
            ServerEvent::YourTurn => {
                if self.phase == Phase::InProgress {
                    if !self.my_turn {
                        self.my_turn = true;
                        changes.push(StateChange::Turn(true));
                    }
                } else {
                    warn!("ignoring turn grant in {:?}", self.phase);
                }
            }
            ServerEvent::ShotResult { outcome } => {
                if self.phase != Phase::InProgress {
                    warn!("ignoring shot result in {:?}", self.phase);
                } else if let Some((row, col)) = self.pending_shot.take() {
                    match board.set_opponent_cell(row, col, outcome) {
                        Ok(()) => changes.push(StateChange::Cell {
                            side: BoardSide::Opponent,
                            row,
                            col,
                        }),
                        Err(err) => changes.push(StateChange::Error(err)),
                    }
                    let my_turn = matches!(outcome, ShotOutcome::Hit | ShotOutcome::Kill);
                    if my_turn != self.my_turn {
                        self.my_turn = my_turn;
                        changes.push(StateChange::Turn(my_turn));
                    }
                } else {
                    debug!("dropping shot result with no pending shot");
                }
            }
            ServerEvent::OpponentShot { row, col, outcome } => {
                if self.phase == Phase::InProgress {
                    match board.set_own_cell(row, col, outcome) {
                        Ok(()) => changes.push(StateChange::Cell {
                            side: BoardSide::Own,
                            row,
                            col,
                        }),
                        Err(err) => changes.push(StateChange::Error(err)),
                    }
                } else {
                    warn!("ignoring opponent shot in {:?}", self.phase);
                }
            }
            ServerEvent::GameOver { won } => {
                if self.phase == Phase::InProgress {
                    self.phase = Phase::GameOver;
                    changes.push(StateChange::GameOver { won });
                    self.reset_into(board, &mut changes);
                } else {
                    warn!("ignoring game over in {:?}", self.phase);
                }
            }
        }
        changes
    }

    /// The transport disconnected out from under us. Unconditional reset to
    /// the main menu, regardless of any in-flight shot.
    pub fn connection_lost(&mut self, board: &mut Board) -> Vec<StateChange> {
        let mut changes = Vec::new();
        changes.push(StateChange::Error(ClientError::ConnectionLost));
        self.reset_into(board, &mut changes);
        changes
    }

    fn reset_into(&mut self, board: &mut Board, changes: &mut Vec<StateChange>) {
        board.reset();
        self.id = None;
        self.pending_shot = None;
        if self.my_turn {
            self.my_turn = false;
            changes.push(StateChange::Turn(false));
        }
        if self.phase != Phase::MainMenu {
            self.phase = Phase::MainMenu;
            changes.push(StateChange::Phase(Phase::MainMenu));
        }
        changes.push(StateChange::BoardsRefreshed);
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}
