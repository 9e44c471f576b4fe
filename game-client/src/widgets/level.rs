use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use game_core::LevelBoard;

use crate::api::ApiError;
use crate::gateway::ProgressGateway;
use crate::session::SessionStore;
use crate::widgets::{FlushOutcome, WidgetTask, spawn_flush_loop, spawn_remount_on_sign_in};

#[derive(Clone)]
pub struct LevelWidget {
    game_id: String,
    gateway: Arc<dyn ProgressGateway>,
    board: Arc<watch::Sender<LevelBoard>>,
}

impl LevelWidget {
    pub fn new(game_id: impl Into<String>, current: i32, max_level: i32, gateway: Arc<dyn ProgressGateway>) -> Self {
        let (board, _) = watch::channel(LevelBoard::new(current, max_level));
        Self {
            game_id: game_id.into(),
            gateway,
            board: Arc::new(board),
        }
    }

    pub async fn mount(&self) {
        match self.gateway.get_level(&self.game_id).await {
            Ok(payload) => self.board.send_modify(|board| board.apply_remote(&payload)),
            Err(ApiError::Unauthorized) => self.board.send_modify(LevelBoard::fall_back_to_local),
            Err(e) => {
                tracing::warn!("Failed to fetch level for game {}: {}", self.game_id, e);
                self.board.send_modify(LevelBoard::fall_back_to_local);
            }
        }
    }

    pub fn set_current(&self, level: i32) {
        self.board.send_if_modified(|board| {
            let changed = board.current() != level;
            board.set_current(level);
            changed
        });
    }

    pub fn display_level(&self) -> i32 {
        self.board.borrow().display_level()
    }

    pub fn progress_percent(&self) -> f64 {
        self.board.borrow().progress_percent()
    }

    pub fn board(&self) -> LevelBoard {
        self.board.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LevelBoard> {
        self.board.subscribe()
    }

    pub async fn flush(&self) -> FlushOutcome {
        let Some(payload) = self.board.borrow().pending_flush() else {
            return FlushOutcome::Idle;
        };

        match self.gateway.save_level(&self.game_id, &payload).await {
            Ok(_) => {
                self.board.send_modify(|board| board.mark_flushed(payload.level));
                FlushOutcome::Flushed
            }
            Err(e) => {
                tracing::warn!("Failed to save level for game {}: {}", self.game_id, e);
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
