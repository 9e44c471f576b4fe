use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use game_core::{Clock, GameCatalog, GameMetadata, PushTicket, SyncMachine, UpdateDecision};
use game_types::{ProgressRecord, ProgressUpdate};

use crate::gateway::ProgressGateway;
use crate::progress_cache::ProgressCache;
use crate::save_strategy::{SaveStrategy, SaveStrategyRegistry};

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("No game matches route '{0}'")]
    UnknownGame(String),
}

/// How a route entry's load settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteLoad {
    /// The backend had a record; it now backs the cache.
    Resumed(ProgressRecord),
    /// No record, or the fetch failed. Tracking starts from the local cache.
    Fresh,
    /// Another route was entered while this one was loading.
    Superseded,
}

#[derive(Debug)]
pub enum UpdateOutcome {
    /// No route has anchored yet; the update was dropped.
    NotAnchored,
    /// Cached only; the outstanding push will be superseded by a later one.
    Coalesced,
    /// Cached and handed to the save strategy on a background task.
    Pushed(JoinHandle<()>),
}

struct RouteState {
    machine: SyncMachine,
    strategy: Option<Arc<dyn SaveStrategy>>,
}

/// Keeps the progress cache and the backend in step for the active game route.
///
/// At most one push is outstanding. Updates that arrive while it is in flight
/// only refresh the cache, so the next push carries the newest record.
#[derive(Clone)]
pub struct ProgressSynchronizer {
    inner: Arc<SyncInner>,
}

struct SyncInner {
    route: Mutex<RouteState>,
    cache: ProgressCache,
    gateway: Arc<dyn ProgressGateway>,
    strategies: SaveStrategyRegistry,
    catalog: GameCatalog,
    clock: Arc<dyn Clock>,
}

impl ProgressSynchronizer {
    pub fn new(
        cache: ProgressCache,
        gateway: Arc<dyn ProgressGateway>,
        strategies: SaveStrategyRegistry,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_catalog(cache, gateway, strategies, GameCatalog::standard(), clock)
    }

    pub fn with_catalog(
        cache: ProgressCache,
        gateway: Arc<dyn ProgressGateway>,
        strategies: SaveStrategyRegistry,
        catalog: GameCatalog,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inner: Arc::new(SyncInner {
                route: Mutex::new(RouteState {
                    machine: SyncMachine::new(),
                    strategy: None,
                }),
                cache,
                gateway,
                strategies,
                catalog,
                clock,
            }),
        }
    }

    /// Activate the game behind `route_id` and load its remote progress.
    ///
    /// The anchor is attached once the load settles, whether or not it
    /// found anything.
    pub async fn enter_route(&self, route_id: &str) -> Result<RouteLoad, SyncError> {
        let game = self.resolve(route_id)?;

        let ticket = {
            let mut route = self.inner.route.lock().await;
            route.strategy = Some(self.inner.strategies.resolve(game.name));
            route.machine.enter_route(game.id.to_string(), game.name)
        };
        tracing::debug!("Entered route for {}", game.name);

        let fetched = match self.inner.gateway.get_progress(game.name).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Failed to load progress for {}: {}", game.name, e);
                None
            }
        };

        let mut route = self.inner.route.lock().await;
        if !route.machine.is_current(ticket) {
            tracing::debug!("Discarding progress load for {}, route has changed", game.name);
            return Ok(RouteLoad::Superseded);
        }

        if let Some(record) = &fetched {
            if let Err(e) = self.inner.cache.set(record.clone()).await {
                tracing::warn!("Failed to cache progress for {}: {}", game.name, e);
            }
        }
        route.machine.attach_anchor(ticket, self.inner.clock.now_millis());

        Ok(match fetched {
            Some(record) => RouteLoad::Resumed(record),
            None => RouteLoad::Fresh,
        })
    }

    /// Record a finished attempt. Returns once the cache holds it.
    pub async fn update(&self, update: ProgressUpdate) -> UpdateOutcome {
        let mut route = self.inner.route.lock().await;
        let now = self.inner.clock.now_millis();

        let (record, ticket) = match route.machine.begin_update(update, now) {
            UpdateDecision::NotAnchored => {
                tracing::debug!("Ignoring progress update before the route has anchored");
                return UpdateOutcome::NotAnchored;
            }
            UpdateDecision::Coalesced(record) => {
                self.cache_record(record).await;
                return UpdateOutcome::Coalesced;
            }
            UpdateDecision::Push { record, ticket } => (record, ticket),
        };

        self.cache_record(record.clone()).await;

        let strategy = route
            .strategy
            .clone()
            .unwrap_or_else(|| self.inner.strategies.fallback());
        drop(route);

        let sync = self.clone();
        UpdateOutcome::Pushed(tokio::spawn(async move {
            sync.push(strategy, record, ticket).await;
        }))
    }

    async fn push(&self, strategy: Arc<dyn SaveStrategy>, record: ProgressRecord, ticket: PushTicket) {
        match strategy.save(&record).await {
            Ok(response) if response.success => {
                tracing::debug!("Saved progress for {} (push {})", record.game, ticket.sequence());
            }
            Ok(_) => tracing::warn!("Backend declined progress save for {}", record.game),
            Err(e) => tracing::warn!("Failed to save progress for {}: {}", record.game, e),
        }

        let mut route = self.inner.route.lock().await;
        if !route.machine.finish_push(ticket) {
            tracing::debug!("Ignoring duplicate completion of push {}", ticket.sequence());
        } else if !route.machine.owns_push(ticket) {
            tracing::debug!("Push {} settled after its route was replaced", ticket.sequence());
        }
    }

    async fn cache_record(&self, record: ProgressRecord) {
        if let Err(e) = self.inner.cache.set(record).await {
            tracing::warn!("Failed to persist progress locally: {}", e);
        }
    }

    fn resolve(&self, route_id: &str) -> Result<&'static GameMetadata, SyncError> {
        self.inner
            .catalog
            .resolve(route_id)
            .ok_or_else(|| SyncError::UnknownGame(route_id.to_string()))
    }

    pub fn cache(&self) -> &ProgressCache {
        &self.inner.cache
    }

    pub async fn anchor(&self) -> Option<i64> {
        self.inner.route.lock().await.machine.anchor()
    }

    pub async fn push_in_flight(&self) -> bool {
        self.inner.route.lock().await.machine.push_in_flight()
    }

    pub async fn current_game_name(&self) -> Option<String> {
        self.inner
            .route
            .lock()
            .await
            .machine
            .current_game_name()
            .map(str::to_string)
    }
}
