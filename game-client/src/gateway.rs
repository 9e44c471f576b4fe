use async_trait::async_trait;

use game_core::{SPEECH_EXPLORER, WORD_BUILDER};
use game_types::{LevelPayload, ProgressRecord, SaveProgressResponse, ScoreSubmission, ScoreSummary};

use crate::api::{ApiClient, ApiError};

/// Which save-progress route a record is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveEndpoint {
    Generic,
    WordBuilder,
    SpeechExplorer,
}

impl SaveEndpoint {
    pub fn path(&self) -> &'static [&'static str] {
        match self {
            SaveEndpoint::Generic => &["game-progress", "save-progress"],
            SaveEndpoint::WordBuilder => &["game-progress", "save-progress", "word-builder"],
            SaveEndpoint::SpeechExplorer => &["game-progress", "save-progress", "speech-explorer"],
        }
    }

    /// Games with a dedicated route; everything else uses the generic one.
    pub fn for_game(game_name: &str) -> Self {
        if game_name.eq_ignore_ascii_case(WORD_BUILDER) {
            SaveEndpoint::WordBuilder
        } else if game_name.eq_ignore_ascii_case(SPEECH_EXPLORER) {
            SaveEndpoint::SpeechExplorer
        } else {
            SaveEndpoint::Generic
        }
    }
}

/// Remote game-progress operations.
#[async_trait]
pub trait ProgressGateway: Send + Sync {
    async fn save_progress(
        &self,
        endpoint: SaveEndpoint,
        record: &ProgressRecord,
    ) -> Result<SaveProgressResponse, ApiError>;

    /// `Ok(None)` when the backend has nothing stored for the game.
    async fn get_progress(&self, game_name: &str) -> Result<Option<ProgressRecord>, ApiError>;

    async fn save_score(&self, game_id: &str, submission: &ScoreSubmission) -> Result<ScoreSummary, ApiError>;

    async fn get_score(&self, game_id: &str) -> Result<ScoreSummary, ApiError>;

    async fn save_level(&self, game_id: &str, level: &LevelPayload) -> Result<LevelPayload, ApiError>;

    async fn get_level(&self, game_id: &str) -> Result<LevelPayload, ApiError>;
}

#[async_trait]
impl ProgressGateway for ApiClient {
    async fn save_progress(
        &self,
        endpoint: SaveEndpoint,
        record: &ProgressRecord,
    ) -> Result<SaveProgressResponse, ApiError> {
        self.post_json(endpoint.path(), record).await
    }

    async fn get_progress(&self, game_name: &str) -> Result<Option<ProgressRecord>, ApiError> {
        match self
            .get_json::<Option<ProgressRecord>>(&["game-progress", "get-progress", game_name])
            .await
        {
            Err(err) if err.is_not_found() => Ok(None),
            other => other,
        }
    }

    async fn save_score(&self, game_id: &str, submission: &ScoreSubmission) -> Result<ScoreSummary, ApiError> {
        self.post_json(&["game-progress", "scores", game_id], submission).await
    }

    async fn get_score(&self, game_id: &str) -> Result<ScoreSummary, ApiError> {
        self.get_json(&["game-progress", "scores", game_id]).await
    }

    async fn save_level(&self, game_id: &str, level: &LevelPayload) -> Result<LevelPayload, ApiError> {
        self.post_json(&["game-progress", "levels", game_id], level).await
    }

    async fn get_level(&self, game_id: &str) -> Result<LevelPayload, ApiError> {
        self.get_json(&["game-progress", "levels", game_id]).await
    }
}
