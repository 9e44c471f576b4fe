use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use game_core::{SPEECH_EXPLORER, WORD_BUILDER};
use game_types::{ProgressRecord, SaveProgressResponse};

use crate::api::ApiError;
use crate::gateway::{ProgressGateway, SaveEndpoint};

/// How a game's progress record reaches the backend.
#[async_trait]
pub trait SaveStrategy: Send + Sync {
    async fn save(&self, record: &ProgressRecord) -> Result<SaveProgressResponse, ApiError>;
}

pub struct EndpointSaveStrategy {
    gateway: Arc<dyn ProgressGateway>,
    endpoint: SaveEndpoint,
}

impl EndpointSaveStrategy {
    pub fn new(gateway: Arc<dyn ProgressGateway>, endpoint: SaveEndpoint) -> Self {
        Self { gateway, endpoint }
    }

    pub fn endpoint(&self) -> SaveEndpoint {
        self.endpoint
    }
}

#[async_trait]
impl SaveStrategy for EndpointSaveStrategy {
    async fn save(&self, record: &ProgressRecord) -> Result<SaveProgressResponse, ApiError> {
        self.gateway.save_progress(self.endpoint, record).await
    }
}

/// Save strategy per game name, with a fallback for games without one.
#[derive(Clone)]
pub struct SaveStrategyRegistry {
    fallback: Arc<dyn SaveStrategy>,
    by_game: HashMap<String, Arc<dyn SaveStrategy>>,
}

impl SaveStrategyRegistry {
    pub fn new(fallback: Arc<dyn SaveStrategy>) -> Self {
        Self {
            fallback,
            by_game: HashMap::new(),
        }
    }

    /// Generic endpoint for every game, plus the dedicated Word Builder and
    /// Speech Explorer routes.
    pub fn with_default_routes(gateway: Arc<dyn ProgressGateway>) -> Self {
        let mut registry = Self::new(Arc::new(EndpointSaveStrategy::new(
            gateway.clone(),
            SaveEndpoint::Generic,
        )));
        for game in [WORD_BUILDER, SPEECH_EXPLORER] {
            let strategy = EndpointSaveStrategy::new(gateway.clone(), SaveEndpoint::for_game(game));
            registry.register(game, Arc::new(strategy));
        }
        registry
    }

    pub fn register(&mut self, game_name: &str, strategy: Arc<dyn SaveStrategy>) -> &mut Self {
        self.by_game.insert(game_name.to_lowercase(), strategy);
        self
    }

    pub fn resolve(&self, game_name: &str) -> Arc<dyn SaveStrategy> {
        self.by_game
            .get(&game_name.to_lowercase())
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    pub fn fallback(&self) -> Arc<dyn SaveStrategy> {
        self.fallback.clone()
    }
}
