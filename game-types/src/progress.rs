use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// What a mini-game reports after an attempt. Timing fields are filled in
/// by the synchronizer, never by the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProgressUpdate {
    pub game: String,
    pub level: i32,
    pub difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    /// Signed: skips and wrong answers may carry a penalty.
    #[serde(default)]
    pub score_delta: i32,
}

impl ProgressUpdate {
    pub fn new(game: impl Into<String>, level: i32, difficulty: impl Into<String>) -> Self {
        Self {
            game: game.into(),
            level,
            difficulty: difficulty.into(),
            word: None,
            is_correct: None,
            score_delta: 0,
        }
    }

    pub fn with_word(mut self, word: impl Into<String>) -> Self {
        self.word = Some(word.into());
        self
    }

    pub fn with_result(mut self, is_correct: bool, score_delta: i32) -> Self {
        self.is_correct = Some(is_correct);
        self.score_delta = score_delta;
        self
    }
}

/// Levels start at 1.
pub const MIN_LEVEL: i32 = 1;

/// The "current progress" snapshot: cached locally and sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProgressRecord {
    pub game: String,
    pub level: i32,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(default)]
    pub score_delta: i32,
    /// Seconds since the previous push (or route entry).
    #[serde(default)]
    pub time_spent: u32,
    /// Epoch milliseconds.
    #[ts(type = "number")]
    pub timestamp: i64,
}

impl ProgressRecord {
    /// Build the record for an update; a level below [`MIN_LEVEL`] is raised to it.
    pub fn stamped(update: ProgressUpdate, timestamp: i64, time_spent: u32) -> Self {
        Self {
            game: update.game,
            level: update.level.max(MIN_LEVEL),
            difficulty: update.difficulty,
            word: update.word,
            is_correct: update.is_correct,
            score_delta: update.score_delta,
            time_spent,
            timestamp,
        }
    }
}
