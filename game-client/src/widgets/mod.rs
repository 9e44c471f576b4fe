pub mod level;
pub mod score;

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::session::AuthState;

pub use level::LevelWidget;
pub use score::ScoreWidget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing new to send.
    Idle,
    Flushed,
    Failed,
}

/// Background task owned by a widget. Dropping it stops the task.
#[derive(Debug)]
pub struct WidgetTask {
    handle: JoinHandle<()>,
}

impl WidgetTask {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for WidgetTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Run `flush` every `period`, starting one period from now.
pub(crate) fn spawn_flush_loop<F, Fut>(period: Duration, flush: F) -> WidgetTask
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = FlushOutcome> + Send,
{
    let period = period.max(Duration::from_millis(1));
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            flush().await;
        }
    });
    WidgetTask { handle }
}

/// Run `mount` each time the session becomes authenticated.
pub(crate) fn spawn_remount_on_sign_in<F, Fut>(mut auth: watch::Receiver<AuthState>, mount: F) -> WidgetTask
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let mut was_authenticated = auth.borrow_and_update().is_authenticated();
    let handle = tokio::spawn(async move {
        while auth.changed().await.is_ok() {
            let authenticated = auth.borrow_and_update().is_authenticated();
            if authenticated && !was_authenticated {
                mount().await;
            }
            was_authenticated = authenticated;
        }
    });
    WidgetTask { handle }
}
