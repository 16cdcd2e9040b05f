//! Async driver for one puzzle screen.
//!
//! Owns the [`Session`] and feeds it events one at a time: board moves and
//! button presses from the [`ScreenHandle`], clock ticks, and the callbacks
//! of the tasks it spawns for scheduled auto-play and hint requests. Board
//! commands go out over a channel; nothing shares the session.

use std::sync::Arc;

use puzzle_client::PuzzleClient;
use puzzle_session::{BoardCommand, Effect, Event, Puzzle, Session, SessionView};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info, warn};

use crate::config::ScreenConfig;
use crate::error::ScreenError;

/// Tasks whose callbacks would mutate the session. Aborted when superseded
/// and when the screen goes away.
#[derive(Default)]
struct Scheduled {
    reply: Option<JoinHandle<()>>,
    hint: Option<JoinHandle<()>>,
}

impl Scheduled {
    fn replace_reply(&mut self, task: JoinHandle<()>) {
        self.cancel_reply();
        self.reply = Some(task);
    }

    fn replace_hint(&mut self, task: JoinHandle<()>) {
        self.cancel_hint();
        self.hint = Some(task);
    }

    fn cancel_reply(&mut self) {
        if let Some(task) = self.reply.take() {
            task.abort();
        }
    }

    fn cancel_hint(&mut self) {
        if let Some(task) = self.hint.take() {
            task.abort();
        }
    }
}

impl Drop for Scheduled {
    fn drop(&mut self) {
        self.cancel_reply();
        self.cancel_hint();
    }
}

/// Input side of a running screen, held by the board widget and the UI.
/// The screen shuts down once every handle is dropped.
#[derive(Clone)]
pub struct ScreenHandle {
    events: mpsc::UnboundedSender<Event>,
    view: watch::Receiver<SessionView>,
}

impl ScreenHandle {
    /// Queue an event. Returns false when the screen has already closed.
    pub fn send(&self, event: Event) -> bool {
        self.events.send(event).is_ok()
    }

    pub fn view(&self) -> SessionView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view.clone()
    }
}

pub struct PuzzleScreen {
    session: Session,
    client: Arc<PuzzleClient>,
    config: ScreenConfig,
    board: mpsc::UnboundedSender<BoardCommand>,
    inbox: mpsc::UnboundedReceiver<Event>,
    callbacks_tx: mpsc::UnboundedSender<Event>,
    callbacks: mpsc::UnboundedReceiver<Event>,
    view: watch::Sender<SessionView>,
    tasks: Scheduled,
}

impl PuzzleScreen {
    /// Fetch a random puzzle and build a screen for it.
    pub async fn load(
        client: Arc<PuzzleClient>,
        config: ScreenConfig,
        board: mpsc::UnboundedSender<BoardCommand>,
    ) -> Result<(Self, ScreenHandle), ScreenError> {
        let record = client.fetch_random_puzzle().await?;
        let puzzle = Puzzle::from_record(&record)?;
        info!(puzzle_id = %puzzle.id(), rating = puzzle.rating(), "Puzzle loaded");
        Ok(Self::new(puzzle, client, config, board))
    }

    pub fn new(
        puzzle: Puzzle,
        client: Arc<PuzzleClient>,
        config: ScreenConfig,
        board: mpsc::UnboundedSender<BoardCommand>,
    ) -> (Self, ScreenHandle) {
        let session = Session::new(puzzle);
        let (events_tx, inbox) = mpsc::unbounded_channel();
        let (callbacks_tx, callbacks) = mpsc::unbounded_channel();
        let (view, view_rx) = watch::channel(session.view());

        let screen = Self {
            session,
            client,
            config,
            board,
            inbox,
            callbacks_tx,
            callbacks,
            view,
            tasks: Scheduled::default(),
        };
        let handle = ScreenHandle {
            events: events_tx,
            view: view_rx,
        };
        (screen, handle)
    }

    /// Drive the session until every [`ScreenHandle`] is dropped, then cancel
    /// outstanding work and hand back the final session state.
    pub async fn run(mut self) -> Session {
        let effects = self.session.begin();
        self.dispatch(effects);
        self.publish();

        let mut ticker = interval_at(Instant::now() + self.config.tick, self.config.tick);

        loop {
            let event = tokio::select! {
                received = self.inbox.recv() => match received {
                    Some(event) => event,
                    None => break,
                },
                Some(event) = self.callbacks.recv() => event,
                _ = ticker.tick() => Event::Tick,
            };

            let effects = self.session.apply(event);
            self.dispatch(effects);
            self.publish();
        }

        self.tasks.cancel_reply();
        self.tasks.cancel_hint();
        info!(
            puzzle_id = %self.session.puzzle().id(),
            completed = self.session.is_completed(),
            elapsed = self.session.clock().elapsed_seconds(),
            "Puzzle screen closed"
        );
        self.session
    }

    fn dispatch(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Board(command) => {
                    if self.board.send(command).is_err() {
                        debug!("Board widget is gone");
                    }
                }
                Effect::ScheduleReply { delay, generation } => {
                    let wait = self.config.delay_for(delay);
                    let tx = self.callbacks_tx.clone();
                    self.tasks.replace_reply(tokio::spawn(async move {
                        tokio::time::sleep(wait).await;
                        let _ = tx.send(Event::ReplyDue { generation });
                    }));
                }
                Effect::CancelReply => self.tasks.cancel_reply(),
                Effect::FetchHint {
                    request,
                    puzzle_id,
                    move_number,
                } => {
                    let client = Arc::clone(&self.client);
                    let tx = self.callbacks_tx.clone();
                    self.tasks.replace_hint(tokio::spawn(async move {
                        let event = match client.fetch_hint(&puzzle_id, move_number).await {
                            Ok(text) => Event::HintLoaded { request, text },
                            Err(e) => {
                                warn!(error = %e, puzzle_id = %puzzle_id, move_number, "Hint request failed");
                                Event::HintFailed {
                                    request,
                                    message: e.to_string(),
                                }
                            }
                        };
                        let _ = tx.send(event);
                    }));
                }
                Effect::CancelHint => self.tasks.cancel_hint(),
            }
        }
    }

    fn publish(&self) {
        self.view.send_replace(self.session.view());
    }
}
