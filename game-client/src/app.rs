use std::sync::Arc;

use game_core::{Clock, GameCatalog, SystemClock};
use game_persistence::LocalStorageRepository;
use game_persistence::connection::connect_and_migrate;
use game_types::ScoringType;

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::gateway::ProgressGateway;
use crate::progress_cache::ProgressCache;
use crate::recognition::{DictionaryClient, RecognitionClient, RecognitionError};
use crate::save_strategy::SaveStrategyRegistry;
use crate::session::SessionStore;
use crate::synchronizer::ProgressSynchronizer;
use crate::widgets::{LevelWidget, ScoreWidget, WidgetTask};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to open local storage: {0}")]
    Storage(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Recognition(#[from] RecognitionError),
}

/// Everything a game screen needs, wired once per process.
#[derive(Clone)]
pub struct PlayLearnClient {
    config: Config,
    session: SessionStore,
    api: Arc<ApiClient>,
    cache: ProgressCache,
    recognition: RecognitionClient,
    dictionary: DictionaryClient,
    clock: Arc<dyn Clock>,
}

impl PlayLearnClient {
    pub async fn connect(config: Config) -> Result<Self, StartupError> {
        let db = connect_and_migrate(&config.database_url).await?;
        Self::start(config, LocalStorageRepository::new(db), Arc::new(SystemClock)).await
    }

    /// Restore the session and the cached progress record, then build the clients.
    pub async fn start(
        config: Config,
        storage: LocalStorageRepository,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StartupError> {
        let session = SessionStore::new(storage.clone(), clock.clone());
        session.restore().await;

        let cache = ProgressCache::new(storage);
        cache.hydrate().await;

        let api = ApiClient::new(&config.api_base_url, config.request_timeout, session.clone())?;
        let recognition = RecognitionClient::new(api.http().clone(), &config.ocr_url, &config.speech_url)?;
        let dictionary = DictionaryClient::new(api.http().clone(), &config.dictionary_base_url)?;

        Ok(Self {
            config,
            session,
            api: Arc::new(api),
            cache,
            recognition,
            dictionary,
            clock,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &ProgressCache {
        &self.cache
    }

    pub fn recognition(&self) -> &RecognitionClient {
        &self.recognition
    }

    pub fn dictionary(&self) -> &DictionaryClient {
        &self.dictionary
    }

    pub fn gateway(&self) -> Arc<dyn ProgressGateway> {
        self.api.clone()
    }

    pub fn synchronizer(&self) -> ProgressSynchronizer {
        let gateway = self.gateway();
        ProgressSynchronizer::with_catalog(
            self.cache.clone(),
            gateway.clone(),
            SaveStrategyRegistry::with_default_routes(gateway),
            GameCatalog::standard(),
            self.clock.clone(),
        )
    }

    pub fn score_widget(&self, game_id: &str, scoring_type: ScoringType) -> ScoreWidget {
        ScoreWidget::new(game_id, scoring_type, self.gateway())
    }

    pub fn level_widget(&self, game_id: &str, current: i32) -> LevelWidget {
        LevelWidget::new(game_id, current, self.config.max_level, self.gateway())
    }

    /// Fetch once, refetch after sign-in, flush on the configured interval.
    /// The widget stops syncing when the returned tasks are dropped.
    pub async fn mount_score_widget(&self, game_id: &str, scoring_type: ScoringType) -> (ScoreWidget, Vec<WidgetTask>) {
        let widget = self.score_widget(game_id, scoring_type);
        widget.mount().await;
        let tasks = vec![
            widget.remount_on_sign_in(&self.session),
            widget.start_flushing(self.config.score_flush_interval),
        ];
        (widget, tasks)
    }

    pub async fn mount_level_widget(&self, game_id: &str, current: i32) -> (LevelWidget, Vec<WidgetTask>) {
        let widget = self.level_widget(game_id, current);
        widget.mount().await;
        let tasks = vec![
            widget.remount_on_sign_in(&self.session),
            widget.start_flushing(self.config.score_flush_interval),
        ];
        (widget, tasks)
    }
}
