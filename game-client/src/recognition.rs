use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, Url};

use game_core::{handwriting_matches, is_candidate_word, join_fragments, speech_matches};
use game_types::{OcrResponse, SpeechResponse};

#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("Recognition service unavailable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Recognition service returned status {0}")]
    Status(u16),
    #[error("Invalid service URL '{0}'")]
    InvalidUrl(String),
}

/// Recorded audio posted to the speech recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub field_name: String,
    pub file_name: String,
    pub mime_type: String,
}

impl AudioClip {
    pub fn webm(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            field_name: "file".to_string(),
            file_name: "recording.webm".to_string(),
            mime_type: "audio/webm".to_string(),
        }
    }
}

/// Client for the handwriting and speech recognizers.
#[derive(Clone)]
pub struct RecognitionClient {
    http: Client,
    ocr_url: Url,
    speech_url: Url,
}

impl RecognitionClient {
    pub fn new(http: Client, ocr_url: &str, speech_url: &str) -> Result<Self, RecognitionError> {
        Ok(Self {
            http,
            ocr_url: parse_url(ocr_url)?,
            speech_url: parse_url(speech_url)?,
        })
    }

    /// Send a PNG of the drawing pad; returns the recognized text, unnormalized.
    pub async fn recognize_handwriting(&self, png: Vec<u8>) -> Result<String, RecognitionError> {
        let part = Part::bytes(png).file_name("handwriting.png").mime_str("image/png")?;
        let form = Form::new().part("file", part);

        let response = self.http.post(self.ocr_url.clone()).multipart(form).send().await?;
        if !response.status().is_success() {
            return Err(RecognitionError::Status(response.status().as_u16()));
        }

        let body: OcrResponse = response.json().await?;
        let text = join_fragments(body.fragments());
        tracing::debug!("Handwriting recognized as '{}'", text);
        Ok(text)
    }

    pub async fn check_handwriting(&self, expected: &str, png: Vec<u8>) -> Result<bool, RecognitionError> {
        let text = self.recognize_handwriting(png).await?;
        Ok(handwriting_matches(expected, [text.as_str()]))
    }

    /// Missing `text` in the reply reads as an empty transcript.
    pub async fn recognize_speech(&self, clip: AudioClip) -> Result<String, RecognitionError> {
        let part = Part::bytes(clip.bytes)
            .file_name(clip.file_name)
            .mime_str(&clip.mime_type)?;
        let form = Form::new().part(clip.field_name, part);

        let response = self.http.post(self.speech_url.clone()).multipart(form).send().await?;
        if !response.status().is_success() {
            return Err(RecognitionError::Status(response.status().as_u16()));
        }

        let body: SpeechResponse = response.json().await?;
        tracing::debug!("Speech recognized as '{}'", body.text);
        Ok(body.text)
    }

    pub async fn check_speech(&self, expected: &str, clip: AudioClip) -> Result<bool, RecognitionError> {
        let text = self.recognize_speech(clip).await?;
        Ok(speech_matches(expected, &text))
    }
}

/// Dictionary lookup used to accept free-form words.
#[derive(Clone)]
pub struct DictionaryClient {
    http: Client,
    base_url: Url,
}

impl DictionaryClient {
    pub fn new(http: Client, base_url: &str) -> Result<Self, RecognitionError> {
        Ok(Self {
            http,
            base_url: parse_url(base_url)?,
        })
    }

    /// 200 means a real word, 404 means not. Anything else is an error.
    pub async fn is_valid_word(&self, word: &str) -> Result<bool, RecognitionError> {
        if !is_candidate_word(word) {
            return Ok(false);
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RecognitionError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "v2", "entries", "en", &word.trim().to_lowercase()]);

        let response = self.http.get(url).send().await?;
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(RecognitionError::Status(status.as_u16())),
        }
    }
}

fn parse_url(url: &str) -> Result<Url, RecognitionError> {
    let parsed = Url::parse(url).map_err(|_| RecognitionError::InvalidUrl(url.to_string()))?;
    if parsed.cannot_be_a_base() {
        return Err(RecognitionError::InvalidUrl(url.to_string()));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webm_clip_defaults() {
        let clip = AudioClip::webm(vec![1, 2, 3]);
        assert_eq!(clip.field_name, "file");
        assert_eq!(clip.file_name, "recording.webm");
        assert_eq!(clip.mime_type, "audio/webm");
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(RecognitionClient::new(Client::new(), "nope", "http://localhost/speech").is_err());
        assert!(DictionaryClient::new(Client::new(), "data:text/plain,hi").is_err());
    }

    #[tokio::test]
    async fn test_non_words_skip_the_lookup() {
        // Unroutable base; a request would fail rather than return false
        let dictionary = DictionaryClient::new(Client::new(), "http://127.0.0.1:9").unwrap();
        assert!(!dictionary.is_valid_word("").await.unwrap());
        assert!(!dictionary.is_valid_word("two words").await.unwrap());
    }
}
