use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use game_core::ScoreBoard;
use game_types::ScoringType;

use crate::api::ApiError;
use crate::gateway::ProgressGateway;
use crate::session::SessionStore;
use crate::widgets::{FlushOutcome, WidgetTask, spawn_flush_loop, spawn_remount_on_sign_in};

/// Score card for one game: remote summary reconciled with the local score.
#[derive(Clone)]
pub struct ScoreWidget {
    game_id: String,
    gateway: Arc<dyn ProgressGateway>,
    board: Arc<watch::Sender<ScoreBoard>>,
}

impl ScoreWidget {
    pub fn new(game_id: impl Into<String>, scoring_type: ScoringType, gateway: Arc<dyn ProgressGateway>) -> Self {
        let (board, _) = watch::channel(ScoreBoard::new(scoring_type));
        Self {
            game_id: game_id.into(),
            gateway,
            board: Arc::new(board),
        }
    }

    /// Fetch the remote summary. Failures leave the remote side at zero.
    pub async fn mount(&self) {
        match self.gateway.get_score(&self.game_id).await {
            Ok(summary) => self.board.send_modify(|board| board.apply_remote(&summary)),
            Err(ApiError::Unauthorized) => {
                tracing::debug!("Playing game {} without a session, score stays local", self.game_id);
                self.board.send_modify(ScoreBoard::fall_back_to_zero);
            }
            Err(e) => {
                tracing::warn!("Failed to fetch score for game {}: {}", self.game_id, e);
                self.board.send_modify(ScoreBoard::fall_back_to_zero);
            }
        }
    }

    pub fn set_current(&self, score: i32) {
        self.board.send_if_modified(|board| {
            let changed = board.current() != score;
            board.set_current(score);
            changed
        });
    }

    pub fn display_value(&self) -> i32 {
        self.board.borrow().display_value()
    }

    pub fn high_score(&self) -> Option<i32> {
        self.board.borrow().high_score()
    }

    pub fn board(&self) -> ScoreBoard {
        self.board.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScoreBoard> {
        self.board.subscribe()
    }

    /// Push the local score if it is non-zero and changed since the last push.
    pub async fn flush(&self) -> FlushOutcome {
        let Some(submission) = self.board.borrow().pending_flush() else {
            return FlushOutcome::Idle;
        };

        match self.gateway.save_score(&self.game_id, &submission).await {
            Ok(reply) => {
                self.board
                    .send_modify(|board| board.mark_flushed(submission.score, &reply));
                FlushOutcome::Flushed
            }
            Err(e) => {
                tracing::warn!("Failed to save score for game {}: {}", self.game_id, e);
                FlushOutcome::Failed
            }
        }
    }

    pub fn start_flushing(&self, period: Duration) -> WidgetTask {
        let widget = self.clone();
        spawn_flush_loop(period, move || {
            let widget = widget.clone();
            async move { widget.flush().await }
        })
    }

    pub fn remount_on_sign_in(&self, session: &SessionStore) -> WidgetTask {
        let widget = self.clone();
        spawn_remount_on_sign_in(session.subscribe(), move || {
            let widget = widget.clone();
            async move { widget.mount().await }
        })
    }
}
