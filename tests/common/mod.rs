//! In-process stand-in for the puzzle service, speaking the same routes and
//! error bodies as the real one.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chess_core::{fen_of, parse_position, PuzzleRecord, UciMove};
use serde_json::{json, Value};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The four-move opening line used throughout the tests.
pub fn opening_puzzle() -> PuzzleRecord {
    PuzzleRecord {
        id: "op001".to_string(),
        fen: START_FEN.to_string(),
        moves: "e2e4 e7e5 g1f3 b8c6".to_string(),
        rating: 1200,
    }
}

/// A real mate-in-two: the setup move is black's, white solves.
pub fn lichess_puzzle() -> PuzzleRecord {
    PuzzleRecord {
        id: "00sHx".to_string(),
        fen: "q3k1nr/1pp1nQpp/3p4/1P2p3/4P3/B1PP1b2/B5PP/5K2 b k - 0 17".to_string(),
        moves: "e8d7 a2e6 d7d8 f7f8".to_string(),
        rating: 1760,
    }
}

/// FEN after playing `uci` on `fen`.
pub fn fen_after(fen: &str, uci: &str) -> String {
    let mv: UciMove = uci.parse().unwrap();
    fen_of(&mv.play(&parse_position(fen).unwrap()).unwrap())
}

#[derive(Clone, Default)]
pub struct ServiceState {
    pub random: Option<PuzzleRecord>,
    pub puzzles: HashMap<String, PuzzleRecord>,
    pub hints: HashMap<(String, usize), String>,
}

impl ServiceState {
    pub fn serving(record: PuzzleRecord) -> Self {
        let mut puzzles = HashMap::new();
        puzzles.insert(record.id.clone(), record.clone());
        Self {
            random: Some(record),
            puzzles,
            hints: HashMap::new(),
        }
    }

    pub fn with_hint(mut self, id: &str, move_number: usize, hint: &str) -> Self {
        self.hints
            .insert((id.to_string(), move_number), hint.to_string());
        self
    }
}

type Reply = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "error": message })))
}

/// Start the service on an ephemeral port and return its base URL.
pub async fn spawn_service(state: ServiceState) -> String {
    let app = Router::new()
        .route("/puzzles/random/", get(random_puzzle))
        .route("/puzzles/{id}/hints/{move_number}", get(hint))
        .route("/puzzles/{id}/best-moves/{move_number}", get(best_move))
        .with_state(Arc::new(state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn random_puzzle(State(state): State<Arc<ServiceState>>) -> Reply {
    match &state.random {
        Some(record) => (StatusCode::OK, Json(serde_json::to_value(record).unwrap())),
        None => error(StatusCode::NOT_FOUND, "Puzzle does not exist"),
    }
}

fn lookup(state: &ServiceState, id: &str, move_number: usize) -> Result<Vec<String>, Reply> {
    if id.len() != 5 {
        return Err(error(StatusCode::BAD_REQUEST, "Malformed Puzzle ID input"));
    }
    let record = state.puzzles.get(id).ok_or_else(|| {
        error(StatusCode::BAD_REQUEST, "Puzzle ID does not exist in the Database")
    })?;

    let moves: Vec<String> = record.moves.split(' ').map(str::to_string).collect();
    if move_number < 1 {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "Invalid Move Number, must be greater than or equal to 0",
        ));
    }
    if move_number - 1 >= moves.len() {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "Invalid Move Number, must be less than length of puzzle",
        ));
    }
    Ok(moves)
}

async fn hint(
    State(state): State<Arc<ServiceState>>,
    Path((id, move_number)): Path<(String, usize)>,
) -> Reply {
    if let Err(reply) = lookup(&state, &id, move_number) {
        return reply;
    }
    match state.hints.get(&(id, move_number)) {
        Some(hint) => (StatusCode::OK, Json(json!({ "hint": hint }))),
        None => error(StatusCode::INTERNAL_SERVER_ERROR, "Error fetching explanation."),
    }
}

async fn best_move(
    State(state): State<Arc<ServiceState>>,
    Path((id, move_number)): Path<(String, usize)>,
) -> Reply {
    match lookup(&state, &id, move_number) {
        Ok(moves) => (
            StatusCode::OK,
            Json(json!({ "best_move": moves[move_number - 1] })),
        ),
        Err(reply) => reply,
    }
}
