use seabattle_client::protocol::{ClientCommand, ServerEvent};
use seabattle_client::{
    Board, BoardSide, ClientError, OpponentCell, OwnCell, Phase, Session, ShotOutcome, StateChange,
};

fn default_rows() -> Vec<String> {
    vec!["..........".to_string(); 10]
}

fn in_progress() -> (Session, Board) {
    let mut session = Session::new();
    let mut board = Board::new();
    session.handle_event(
        ServerEvent::SessionCreated {
            id: "s1".to_string(),
        },
        &mut board,
    );
    session.handle_event(
        ServerEvent::OwnBoard {
            rows: default_rows(),
        },
        &mut board,
    );
    assert_eq!(session.phase(), Phase::InProgress);
    (session, board)
}

fn outbound_of(changes: &[StateChange]) -> Vec<ClientCommand> {
    changes
        .iter()
        .filter_map(|change| match change {
            StateChange::Outbound(command) => Some(command.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn create_request_records_id_and_emits_command() {
    let mut session = Session::new();
    let changes = session.request_create("  alpha  ");
    assert_eq!(
        outbound_of(&changes),
        vec![ClientCommand::Create {
            id: "alpha".to_string()
        }]
    );
    assert_eq!(session.session_id(), Some("alpha"));
    assert_eq!(session.phase(), Phase::MainMenu);
}

#[test]
fn empty_id_fails_locally() {
    let mut session = Session::new();
    for changes in [session.request_create("   "), session.request_join("")] {
        assert_eq!(
            changes,
            vec![StateChange::Error(ClientError::EmptySessionId)]
        );
    }
    assert_eq!(session.session_id(), None);
}

#[test]
fn session_requests_outside_main_menu_are_ignored() {
    let (mut session, _board) = in_progress();
    assert!(session.request_create("other").is_empty());
    assert!(session.request_join("other").is_empty());
    assert_eq!(session.phase(), Phase::InProgress);
}

#[test]
fn session_created_moves_to_awaiting() {
    let mut session = Session::new();
    let mut board = Board::new();
    let changes = session.handle_event(
        ServerEvent::SessionCreated {
            id: "game-1".to_string(),
        },
        &mut board,
    );
    assert!(changes.contains(&StateChange::SessionId("game-1".to_string())));
    assert!(changes.contains(&StateChange::Phase(Phase::AwaitingOpponent)));
    assert_eq!(session.phase(), Phase::AwaitingOpponent);
}

#[test]
fn confirmed_id_overwrites_requested_id() {
    let mut session = Session::new();
    let mut board = Board::new();
    session.request_join("requested");
    session.handle_event(
        ServerEvent::SessionJoined {
            id: "confirmed".to_string(),
        },
        &mut board,
    );
    assert_eq!(session.session_id(), Some("confirmed"));
}

#[test]
fn board_snapshot_starts_game_from_either_lobby_phase() {
    for warm_up in [false, true] {
        let mut session = Session::new();
        let mut board = Board::new();
        if warm_up {
            session.handle_event(
                ServerEvent::SessionCreated {
                    id: "s".to_string(),
                },
                &mut board,
            );
        }
        let changes = session.handle_event(
            ServerEvent::OwnBoard {
                rows: default_rows(),
            },
            &mut board,
        );
        assert!(changes.contains(&StateChange::Phase(Phase::InProgress)));
        assert_eq!(session.phase(), Phase::InProgress);
        assert!(!session.is_my_turn());
    }
}

#[test]
fn malformed_snapshot_reports_and_stays_put() {
    let mut session = Session::new();
    let mut board = Board::new();
    session.handle_event(
        ServerEvent::SessionCreated {
            id: "s".to_string(),
        },
        &mut board,
    );
    let changes = session.handle_event(
        ServerEvent::OwnBoard {
            rows: vec!["S.........".to_string()],
        },
        &mut board,
    );
    assert_eq!(
        changes,
        vec![StateChange::Error(ClientError::MalformedBoard {
            rows_loaded: 1
        })]
    );
    // a corrected snapshot on the next message still starts the game
    assert_eq!(session.phase(), Phase::AwaitingOpponent);
    session.handle_event(
        ServerEvent::OwnBoard {
            rows: default_rows(),
        },
        &mut board,
    );
    assert_eq!(session.phase(), Phase::InProgress);
}

#[test]
fn your_turn_enables_firing_only_in_progress() {
    let mut session = Session::new();
    let mut board = Board::new();
    session.handle_event(ServerEvent::YourTurn, &mut board);
    assert!(!session.is_my_turn());

    let (mut session, mut board) = in_progress();
    let changes = session.handle_event(ServerEvent::YourTurn, &mut board);
    assert_eq!(changes, vec![StateChange::Turn(true)]);
    assert!(session.is_my_turn());

    // a second grant changes nothing
    let changes = session.handle_event(ServerEvent::YourTurn, &mut board);
    assert!(changes.is_empty());
}

#[test]
fn select_cell_emits_shot_and_blocks_turn() {
    let (mut session, mut board) = in_progress();
    session.handle_event(ServerEvent::YourTurn, &mut board);
    let changes = session.select_cell(3, 4);
    assert_eq!(
        outbound_of(&changes),
        vec![ClientCommand::Shoot { row: 3, col: 4 }]
    );
    assert!(changes.contains(&StateChange::Turn(false)));
    assert!(!session.is_my_turn());
    assert_eq!(session.pending_shot(), Some((3, 4)));
}

#[test]
fn select_cell_ignored_when_not_my_turn() {
    let (mut session, _board) = in_progress();
    assert!(session.select_cell(3, 4).is_empty());
    assert_eq!(session.pending_shot(), None);
}

#[test]
fn select_cell_out_of_range_is_reported() {
    let (mut session, mut board) = in_progress();
    session.handle_event(ServerEvent::YourTurn, &mut board);
    let changes = session.select_cell(10, 0);
    assert_eq!(
        changes,
        vec![StateChange::Error(ClientError::OutOfRange {
            row: 10,
            col: 0
        })]
    );
    assert_eq!(session.pending_shot(), None);
    assert!(session.is_my_turn());
}

#[test]
fn second_select_blocked_until_result() {
    let (mut session, mut board) = in_progress();
    session.handle_event(ServerEvent::YourTurn, &mut board);
    session.select_cell(3, 4);
    assert!(session.select_cell(5, 6).is_empty());
    assert_eq!(session.pending_shot(), Some((3, 4)));
}

#[test]
fn miss_result_keeps_turn_blocked() {
    let (mut session, mut board) = in_progress();
    session.handle_event(ServerEvent::YourTurn, &mut board);
    session.select_cell(3, 4);
    let changes = session.handle_event(
        ServerEvent::ShotResult {
            outcome: ShotOutcome::Miss,
        },
        &mut board,
    );
    assert!(changes.contains(&StateChange::Cell {
        side: BoardSide::Opponent,
        row: 3,
        col: 4
    }));
    assert_eq!(board.opponent_cell(3, 4).unwrap(), OpponentCell::Miss);
    assert!(!session.is_my_turn());
    assert_eq!(session.pending_shot(), None);
}

#[test]
fn hit_and_kill_results_grant_another_turn() {
    for (outcome, cell) in [
        (ShotOutcome::Hit, OpponentCell::Hit),
        (ShotOutcome::Kill, OpponentCell::Sunk),
    ] {
        let (mut session, mut board) = in_progress();
        session.handle_event(ServerEvent::YourTurn, &mut board);
        session.select_cell(3, 4);
        let changes = session.handle_event(ServerEvent::ShotResult { outcome }, &mut board);
        assert!(changes.contains(&StateChange::Turn(true)));
        assert_eq!(board.opponent_cell(3, 4).unwrap(), cell);
        assert!(session.is_my_turn());
        assert_eq!(session.pending_shot(), None);
    }
}

#[test]
fn shot_result_without_pending_shot_is_dropped() {
    let (mut session, mut board) = in_progress();
    let changes = session.handle_event(
        ServerEvent::ShotResult {
            outcome: ShotOutcome::Hit,
        },
        &mut board,
    );
    assert!(changes.is_empty());
    assert_eq!(board, {
        let mut expected = Board::new();
        expected.load_own_board(default_rows().iter().map(String::as_str)).unwrap();
        expected
    });
}

#[test]
fn opponent_shot_marks_own_grid_only() {
    let (mut session, mut board) = in_progress();
    let changes = session.handle_event(
        ServerEvent::OpponentShot {
            row: 7,
            col: 2,
            outcome: ShotOutcome::Miss,
        },
        &mut board,
    );
    assert_eq!(
        changes,
        vec![StateChange::Cell {
            side: BoardSide::Own,
            row: 7,
            col: 2
        }]
    );
    assert_eq!(board.own_cell(7, 2).unwrap(), OwnCell::Miss);
    for row in 0..10 {
        for col in 0..10 {
            assert_eq!(board.opponent_cell(row, col).unwrap(), OpponentCell::Unknown);
        }
    }
}

#[test]
fn out_of_range_opponent_shot_is_reported_and_ignored() {
    let (mut session, mut board) = in_progress();
    let changes = session.handle_event(
        ServerEvent::OpponentShot {
            row: 12,
            col: 3,
            outcome: ShotOutcome::Hit,
        },
        &mut board,
    );
    assert_eq!(
        changes,
        vec![StateChange::Error(ClientError::OutOfRange {
            row: 12,
            col: 3
        })]
    );
}

#[test]
fn game_over_reports_then_resets() {
    let (mut session, mut board) = in_progress();
    session.handle_event(ServerEvent::YourTurn, &mut board);
    let changes = session.handle_event(ServerEvent::GameOver { won: true }, &mut board);
    let game_over_at = changes
        .iter()
        .position(|change| matches!(change, StateChange::GameOver { won: true }))
        .expect("game over reported");
    let menu_at = changes
        .iter()
        .position(|change| matches!(change, StateChange::Phase(Phase::MainMenu)))
        .expect("returned to main menu");
    assert!(game_over_at < menu_at);
    assert_eq!(session.phase(), Phase::MainMenu);
    assert_eq!(session.session_id(), None);
    assert!(!session.is_my_turn());
    assert_eq!(board, Board::new());
}

#[test]
fn disconnect_resets_from_any_state() {
    // mid-game with a shot in flight
    let (mut session, mut board) = in_progress();
    session.handle_event(ServerEvent::YourTurn, &mut board);
    session.select_cell(3, 4);
    let changes = session.connection_lost(&mut board);
    assert!(changes.contains(&StateChange::Error(ClientError::ConnectionLost)));
    assert_eq!(session.phase(), Phase::MainMenu);
    assert_eq!(session.pending_shot(), None);
    assert_eq!(board, Board::new());

    // already in the main menu
    let changes = session.connection_lost(&mut board);
    assert!(changes.contains(&StateChange::Error(ClientError::ConnectionLost)));
    assert_eq!(session.phase(), Phase::MainMenu);
}
