use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaveProgressResponse {
    pub success: bool,
}

/// How a score card combines local and remote scores. The backend applies the
/// matching aggregation when a submission is tagged with this mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ScoringType {
    Session,
    Persistent,
    Highest,
}

impl ScoringType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringType::Session => "session",
            ScoringType::Persistent => "persistent",
            ScoringType::Highest => "highest",
        }
    }
}

impl std::str::FromStr for ScoringType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "session" => Ok(ScoringType::Session),
            "persistent" => Ok(ScoringType::Persistent),
            "highest" => Ok(ScoringType::Highest),
            other => Err(format!("unknown scoring type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreSubmission {
    pub score: i32,
    #[serde(rename = "type")]
    pub scoring_type: ScoringType,
}

/// Remote score state. GET fills every field; the POST reply may omit some.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScoreSummary {
    #[serde(default)]
    pub total_score: Option<i32>,
    #[serde(default)]
    pub high_score: Option<i32>,
    #[serde(default)]
    pub last_score: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LevelPayload {
    #[serde(default)]
    pub level: i32,
}

/// Handwriting recognizer reply: `text` is a list of tuples whose second
/// element is a recognized substring.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OcrResponse {
    #[serde(default)]
    pub text: Vec<Vec<serde_json::Value>>,
}

impl OcrResponse {
    pub fn fragments(&self) -> Vec<&str> {
        self.text
            .iter()
            .filter_map(|entry| entry.get(1))
            .filter_map(|value| value.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechResponse {
    #[serde(default)]
    pub text: String,
}
