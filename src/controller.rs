//! Client controller: owns one session and one board pair, drives the state
//! machine from raw inbound text and UI events, and fans the resulting
//! changes out to registered rendering callbacks.
//!
//! All calls are synchronous and must not overlap; the embedding layer
//! serializes them (single dispatch thread or one actor per session).

#[cfg(not(feature = "std"))]
use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
use std::{
    boxed::Box,
    string::{String, ToString},
    vec::Vec,
};

use log::debug;

use crate::board::{Board, CellState};
use crate::common::{BoardSide, ClientError};
use crate::config::BOARD_SIZE;
use crate::protocol::parse_server_message;
use crate::session::{Phase, Session, StateChange};

type CellCallback = Box<dyn FnMut(BoardSide, usize, usize, CellState)>;
type PhaseCallback = Box<dyn FnMut(Phase)>;
type TurnCallback = Box<dyn FnMut(bool)>;
type SessionIdCallback = Box<dyn FnMut(&str)>;
type GameOverCallback = Box<dyn FnMut(bool)>;
type ErrorCallback = Box<dyn FnMut(&ClientError)>;
type OutboundCallback = Box<dyn FnMut(&str)>;

#[derive(Default)]
struct Callbacks {
    cell: Option<CellCallback>,
    phase: Option<PhaseCallback>,
    turn: Option<TurnCallback>,
    session_id: Option<SessionIdCallback>,
    game_over: Option<GameOverCallback>,
    error: Option<ErrorCallback>,
    outbound: Option<OutboundCallback>,
}

/// Composition root of the client core.
pub struct ClientController {
    session: Session,
    board: Board,
    callbacks: Callbacks,
    last_sent: Option<String>,
}

impl ClientController {
    pub fn new() -> Self {
        ClientController {
            session: Session::new(),
            board: Board::new(),
            callbacks: Callbacks::default(),
            last_sent: None,
        }
    }

    /// Register the cell-state callback. Fired per cell, including one call
    /// per cell after a bulk board replacement.
    pub fn on_board_cell_changed<F>(&mut self, callback: F)
    where
        F: FnMut(BoardSide, usize, usize, CellState) + 'static,
    {
        self.callbacks.cell = Some(Box::new(callback));
    }

    pub fn on_phase_changed<F>(&mut self, callback: F)
    where
        F: FnMut(Phase) + 'static,
    {
        self.callbacks.phase = Some(Box::new(callback));
    }

    pub fn on_turn_changed<F>(&mut self, callback: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.callbacks.turn = Some(Box::new(callback));
    }

    pub fn on_session_id_known<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.callbacks.session_id = Some(Box::new(callback));
    }

    pub fn on_game_over<F>(&mut self, callback: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.callbacks.game_over = Some(Box::new(callback));
    }

    pub fn on_error<F>(&mut self, callback: F)
    where
        F: FnMut(&ClientError) + 'static,
    {
        self.callbacks.error = Some(Box::new(callback));
    }

    /// Register the outbound sink. Receives each wire-ready command string;
    /// sending is fire-and-forget from the core's point of view.
    pub fn on_outbound<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.callbacks.outbound = Some(Box::new(callback));
    }

    /// Feed one whole inbound text frame into the state machine.
    pub fn handle_inbound_text(&mut self, message: &str) {
        let events = parse_server_message(message);
        if events.is_empty() {
            debug!("ignoring unrecognized frame");
            return;
        }
        for event in events {
            let changes = self.session.handle_event(event, &mut self.board);
            self.apply(changes);
        }
    }

    /// Forward a user cell selection. Only opponent-grid cells are
    /// interactive; the selection is dropped when it is not our turn.
    pub fn handle_cell_selected(&mut self, row: usize, col: usize, side: BoardSide) {
        if side == BoardSide::Own {
            debug!("ignoring selection on own grid");
            return;
        }
        let changes = self.session.select_cell(row, col);
        self.apply(changes);
    }

    /// The transport disconnected (not self-initiated).
    pub fn handle_connection_lost(&mut self) {
        let changes = self.session.connection_lost(&mut self.board);
        self.apply(changes);
    }

    pub fn request_create(&mut self, id: &str) {
        let changes = self.session.request_create(id);
        self.apply(changes);
    }

    pub fn request_join(&mut self, id: &str) {
        let changes = self.session.request_join(id);
        self.apply(changes);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Last command string handed to the outbound sink.
    pub fn last_sent(&self) -> Option<&str> {
        self.last_sent.as_deref()
    }

    fn apply(&mut self, changes: Vec<StateChange>) {
        for change in changes {
            match change {
                StateChange::Outbound(command) => {
                    let frame = command.to_string();
                    debug!("sending: {}", frame);
                    if let Some(callback) = self.callbacks.outbound.as_mut() {
                        callback(&frame);
                    }
                    self.last_sent = Some(frame);
                }
                StateChange::Phase(phase) => {
                    if let Some(callback) = self.callbacks.phase.as_mut() {
                        callback(phase);
                    }
                }
                StateChange::Turn(my_turn) => {
                    if let Some(callback) = self.callbacks.turn.as_mut() {
                        callback(my_turn);
                    }
                }
                StateChange::SessionId(id) => {
                    if let Some(callback) = self.callbacks.session_id.as_mut() {
                        callback(&id);
                    }
                }
                StateChange::Cell { side, row, col } => {
                    self.notify_cell(side, row, col);
                }
                StateChange::BoardsRefreshed => {
                    for row in 0..BOARD_SIZE {
                        for col in 0..BOARD_SIZE {
                            self.notify_cell(BoardSide::Own, row, col);
                            self.notify_cell(BoardSide::Opponent, row, col);
                        }
                    }
                }
                StateChange::GameOver { won } => {
                    if let Some(callback) = self.callbacks.game_over.as_mut() {
                        callback(won);
                    }
                }
                StateChange::Error(err) => {
                    if let Some(callback) = self.callbacks.error.as_mut() {
                        callback(&err);
                    }
                }
            }
        }
    }

    fn notify_cell(&mut self, side: BoardSide, row: usize, col: usize) {
        let state = match side {
            BoardSide::Own => self.board.own_cell(row, col).map(CellState::Own),
            BoardSide::Opponent => self.board.opponent_cell(row, col).map(CellState::Opponent),
        };
        if let (Ok(state), Some(callback)) = (state, self.callbacks.cell.as_mut()) {
            callback(side, row, col, state);
        }
    }
}

impl Default for ClientController {
    fn default() -> Self {
        ClientController::new()
    }
}
