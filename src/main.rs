#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::cell::{Cell, RefCell};
#[cfg(feature = "std")]
use std::rc::Rc;

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader};

#[cfg(feature = "std")]
use seabattle_client::{
    init_logging, transport::Transport, Board, BoardSide, ClientController, OpponentCell, OwnCell,
    Phase, WsTransport, BOARD_SIZE, DEFAULT_SERVER_URL,
};

/// Text shell around the client core: renders both grids as ASCII and
/// forwards stdin intents. All game decisions live in the core.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Server URL.
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    url: String,
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut transport = WsTransport::connect(&cli.url).await?;
    println!("Connected to {}", cli.url);
    println!("Commands: create <id> | join <id> | shoot <row> <col> | quit");

    let mut controller = ClientController::new();
    let outbox: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let dirty = Rc::new(Cell::new(false));

    {
        let outbox = outbox.clone();
        controller.on_outbound(move |frame| outbox.borrow_mut().push(frame.to_string()));
    }
    {
        let dirty = dirty.clone();
        controller.on_board_cell_changed(move |_, _, _, _| dirty.set(true));
    }
    controller.on_phase_changed(|phase| match phase {
        Phase::MainMenu => println!("Enter a session id to create or join"),
        Phase::AwaitingOpponent => println!("Waiting for the second player..."),
        Phase::InProgress => println!("Game started!"),
        Phase::GameOver => {}
    });
    controller.on_turn_changed(|my_turn| {
        if my_turn {
            println!("Your turn!");
        } else {
            println!("Waiting for the opponent...");
        }
    });
    controller.on_session_id_known(|id| println!("Session id: {}", id));
    controller.on_game_over(|won| println!("{}", if won { "Victory!" } else { "Defeat!" }));
    controller.on_error(|err| println!("error: {}", err));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            frame = transport.recv() => match frame {
                Ok(frame) => controller.handle_inbound_text(&frame),
                Err(err) => {
                    log::warn!("transport error: {}", err);
                    controller.handle_connection_lost();
                    break;
                }
            },
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !dispatch(&mut controller, line.trim()) {
                            transport.close().await.ok();
                            break;
                        }
                    }
                    None => {
                        transport.close().await.ok();
                        break;
                    }
                }
            }
        }
        let pending: Vec<String> = outbox.borrow_mut().drain(..).collect();
        for frame in pending {
            transport.send(&frame).await?;
        }
        if dirty.replace(false) {
            print_boards(controller.board());
        }
    }
    Ok(())
}

/// Parse one stdin line into a controller call. Returns `false` on `quit`.
#[cfg(feature = "std")]
fn dispatch(controller: &mut ClientController, line: &str) -> bool {
    let mut words = line.split_whitespace();
    match words.next() {
        Some("create") => controller.request_create(words.next().unwrap_or("")),
        Some("join") => controller.request_join(words.next().unwrap_or("")),
        Some("shoot") => {
            let row = words.next().and_then(|w| w.parse().ok());
            let col = words.next().and_then(|w| w.parse().ok());
            match (row, col) {
                (Some(row), Some(col)) => {
                    controller.handle_cell_selected(row, col, BoardSide::Opponent)
                }
                _ => println!("usage: shoot <row> <col>"),
            }
        }
        Some("quit") => return false,
        Some(_) => println!("Commands: create <id> | join <id> | shoot <row> <col> | quit"),
        None => {}
    }
    true
}

#[cfg(feature = "std")]
fn print_boards(board: &Board) {
    let mut header = String::from("   ");
    for col in 0..BOARD_SIZE {
        header.push_str(&format!(" {}", col));
    }
    println!("{}    {}", header, header.trim_start());
    for row in 0..BOARD_SIZE {
        let mut own = format!("{:2} ", row);
        let mut opponent = String::new();
        for col in 0..BOARD_SIZE {
            let ch = match board.own_cell(row, col).unwrap_or(OwnCell::Empty) {
                OwnCell::Empty => '.',
                OwnCell::Ship => 'S',
                OwnCell::Miss => 'o',
                OwnCell::Hit => 'X',
            };
            own.push(' ');
            own.push(ch);
            let ch = match board.opponent_cell(row, col).unwrap_or(OpponentCell::Unknown) {
                OpponentCell::Unknown => '.',
                OpponentCell::Miss => 'o',
                OpponentCell::Hit => 'X',
                OpponentCell::Sunk => '#',
            };
            opponent.push(' ');
            opponent.push(ch);
        }
        println!("{}    {:2} {}", own, row, opponent);
    }
}
