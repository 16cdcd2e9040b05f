//! Daily puzzle in the terminal
//!
//! Fetches a random puzzle from the puzzle service and plays it with a text
//! board. Type moves in UCI form (`e7e5`) or one of the commands listed by
//! `help`.

use std::sync::Arc;

use anyhow::Context;
use chess_core::UciMove;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use puzzle_client::{ClientConfig, PuzzleClient};
use puzzle_screen::config::ScreenConfig;
use puzzle_screen::error::ScreenError;
use puzzle_screen::screen::PuzzleScreen;
use puzzle_screen::solution::spawn_best_move;
use puzzle_screen::widget::TerminalBoard;
use puzzle_session::{format_elapsed, BoardCommand, Event, SessionView};

const HELP: &str = "Commands: <move> (e.g. e7e5), hint, undo, redo, reset, solution, board, status, quit";

fn print_status(view: &SessionView) {
    println!(
        "Puzzle {} ({})  move {}  {}  [{}]",
        view.puzzle_id,
        view.rating,
        view.cursor + 1,
        format_elapsed(view.elapsed_seconds),
        view.hint
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so they don't interleave with the board
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let client_config = ClientConfig::from_env();
    let screen_config = ScreenConfig::from_env();
    let client = Arc::new(PuzzleClient::new(&client_config).context("Failed to build HTTP client")?);

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let (board_tx, mut board_rx) = mpsc::unbounded_channel();

    // Network failures can be retried; a corrupt puzzle ends the screen
    let (screen, handle) = loop {
        info!(base_url = %client_config.base_url, "Fetching puzzle...");
        match PuzzleScreen::load(Arc::clone(&client), screen_config.clone(), board_tx.clone()).await {
            Ok(loaded) => break loaded,
            Err(ScreenError::Fetch(e)) => {
                println!("Error: {e}");
                println!("Press enter to retry, or type quit.");
                match stdin.next_line().await? {
                    Some(line) if line.trim() != "quit" => continue,
                    _ => return Ok(()),
                }
            }
            Err(e) => return Err(e).context("Puzzle could not be started"),
        }
    };
    drop(board_tx);

    let puzzle_id = handle.view().puzzle_id;
    let mut views = handle.subscribe();
    let screen_task = tokio::spawn(screen.run());

    let mut board = TerminalBoard::new();
    let mut last_hint = String::new();
    let (solution_tx, mut solution_rx) = mpsc::unbounded_channel();
    println!("{HELP}");

    loop {
        tokio::select! {
            command = board_rx.recv() => {
                let Some(command) = command else { break };
                let redraw = !matches!(command, BoardCommand::SetGestures(_));
                if let Err(e) = board.handle(command) {
                    warn!(error = %e, "Board rejected command");
                }
                if redraw {
                    println!("{}\n", board.render());
                }
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                if view.hint != last_hint {
                    println!("[{}] {}", format_elapsed(view.elapsed_seconds), view.hint);
                    last_hint = view.hint;
                }
            }
            Some(line) = solution_rx.recv() => println!("{line}"),
            line = stdin.next_line() => {
                let Some(line) = line? else { break };
                let event = match line.trim() {
                    "" => None,
                    "quit" => break,
                    "help" => {
                        println!("{HELP}");
                        None
                    }
                    "hint" => Some(Event::HintRequested),
                    "undo" => Some(Event::Undo),
                    "redo" => Some(Event::Redo),
                    "reset" => Some(Event::Reset),
                    "board" => {
                        println!("{}", board.render());
                        None
                    }
                    "status" => {
                        print_status(&handle.view());
                        None
                    }
                    "solution" => {
                        let move_number = handle.view().move_number;
                        spawn_best_move(Arc::clone(&client), puzzle_id.clone(), move_number, solution_tx.clone());
                        None
                    }
                    token => match token.parse::<UciMove>() {
                        Ok(mv) => match board.try_move(&mv) {
                            Some(fen) => Some(Event::UserMoved { fen }),
                            None if !board.gestures_enabled() => {
                                println!("Wait for your turn.");
                                None
                            }
                            None => {
                                println!("Illegal move: {mv}");
                                None
                            }
                        },
                        Err(e) => {
                            println!("{e}. {HELP}");
                            None
                        }
                    },
                };
                if let Some(event) = event {
                    if !handle.send(event) {
                        warn!("Puzzle screen closed");
                        break;
                    }
                }
            }
        }
    }

    // Leaving the screen cancels pending auto-play and hint requests
    drop(views);
    drop(handle);
    let session = screen_task.await.context("Puzzle screen task failed")?;
    println!(
        "{} in {}",
        if session.is_completed() { "Solved" } else { "Unsolved" },
        format_elapsed(session.clock().elapsed_seconds())
    );
    Ok(())
}
