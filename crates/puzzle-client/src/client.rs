use std::time::Duration;

use chess_core::{PuzzleRecord, UciMove};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;

#[derive(Deserialize)]
struct HintBody {
    hint: Option<String>,
}

#[derive(Deserialize)]
struct BestMoveBody {
    best_move: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub struct PuzzleClient {
    client: Client,
    base_url: String,
}

impl PuzzleClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent("DailyPuzzle/1.0")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// GET /puzzles/random/
    pub async fn fetch_random_puzzle(&self) -> Result<PuzzleRecord, ClientError> {
        let record: PuzzleRecord = self.get_json("/puzzles/random/").await?;
        debug!(puzzle_id = %record.id, rating = record.rating, "Fetched puzzle");
        Ok(record)
    }

    /// GET /puzzles/{id}/hints/{move_number}
    ///
    /// `move_number` is the 1-based index of the move in the solution line.
    pub async fn fetch_hint(&self, puzzle_id: &str, move_number: usize) -> Result<String, ClientError> {
        let body: HintBody = self
            .get_json(&format!("/puzzles/{puzzle_id}/hints/{move_number}"))
            .await?;

        match body.hint {
            Some(hint) if !hint.trim().is_empty() => Ok(hint),
            _ => Err(ClientError::MissingHint),
        }
    }

    /// GET /puzzles/{id}/best-moves/{move_number}
    pub async fn fetch_best_move(
        &self,
        puzzle_id: &str,
        move_number: usize,
    ) -> Result<UciMove, ClientError> {
        let body: BestMoveBody = self
            .get_json(&format!("/puzzles/{puzzle_id}/best-moves/{move_number}"))
            .await?;

        let token = body.best_move.ok_or(ClientError::MissingBestMove)?;
        Ok(token.parse()?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).send().await?;
        let resp = Self::check_status(resp).await?;
        Ok(resp.json::<T>().await?)
    }

    /// Turn a non-2xx response into the service's `{"error": ...}` text when
    /// it sent one.
    async fn check_status(resp: Response) -> Result<Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        match resp.json::<ErrorBody>().await {
            Ok(ErrorBody { error: Some(message) }) => {
                warn!(%status, %message, "Puzzle service error");
                Err(ClientError::Service(message))
            }
            _ => {
                warn!(%status, "Puzzle service error without a body");
                Err(ClientError::Status(status))
            }
        }
    }
}
