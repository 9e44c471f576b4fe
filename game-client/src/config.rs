use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub ocr_url: String,
    pub speech_url: String,
    pub dictionary_base_url: String,
    pub database_url: String,
    pub request_timeout: Duration,
    pub score_flush_interval: Duration,
    pub max_level: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    /// Read configuration from the process environment.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("PLAYLEARN_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout_seconds: u64 = parse_var(&lookup, "REQUEST_TIMEOUT_SECONDS", 15)?;
        let score_flush_seconds: u64 = parse_var(&lookup, "SCORE_FLUSH_SECONDS", 5)?;
        if score_flush_seconds == 0 {
            return Err(ConfigError::Invalid {
                name: "SCORE_FLUSH_SECONDS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            ocr_url: lookup("PLAYLEARN_OCR_URL")
                .unwrap_or_else(|| format!("{}/ocr/handwriting-ocr", api_base_url)),
            speech_url: lookup("PLAYLEARN_SPEECH_URL")
                .unwrap_or_else(|| format!("{}/speech-recognize/speech-recognize-word", api_base_url)),
            dictionary_base_url: lookup("PLAYLEARN_DICTIONARY_URL")
                .unwrap_or_else(|| DEFAULT_DICTIONARY_URL.to_string()),
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| game_persistence::connection::DEFAULT_DATABASE_URL.to_string()),
            request_timeout: Duration::from_secs(request_timeout_seconds),
            score_flush_interval: Duration::from_secs(score_flush_seconds),
            max_level: parse_var(&lookup, "MAX_LEVEL", 10)?,
            api_base_url,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            ocr_url: format!("{}/ocr/handwriting-ocr", DEFAULT_API_URL),
            speech_url: format!("{}/speech-recognize/speech-recognize-word", DEFAULT_API_URL),
            dictionary_base_url: DEFAULT_DICTIONARY_URL.to_string(),
            database_url: game_persistence::connection::DEFAULT_DATABASE_URL.to_string(),
            request_timeout: Duration::from_secs(15),
            score_flush_interval: Duration::from_secs(5),
            max_level: 10,
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
