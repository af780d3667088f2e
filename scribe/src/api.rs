use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::{guess_mime, ResponseFormat, TranscribeOptions};
use crate::error::{Error, Result};
use crate::types::{Transcription, VerboseTranscription};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// `json` format body: `{"text": "..."}`.
#[derive(Deserialize)]
struct JsonBody {
    text: String,
}

/// Async client for an OpenAI-compatible transcription API.
///
/// Owns the HTTP connection pool and the credential; construct once and pass
/// by reference into the request call.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Client {
    /// Create a client against the default OpenAI endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint, e.g. a self-hosted
    /// OpenAI-compatible server.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Create a client from the environment.
    ///
    /// Reads `OPENAI_API_KEY` (required) and `OPENAI_BASE_URL` (optional
    /// endpoint override). An empty key counts as missing.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::MissingApiKey)?;

        match std::env::var("OPENAI_BASE_URL") {
            Ok(base) if !base.trim().is_empty() => {
                Ok(Self::with_base_url(api_key, base.trim()))
            }
            _ => Ok(Self::new(api_key)),
        }
    }

    /// Transcribe a local audio file.
    ///
    /// Issues exactly one `POST {base}/audio/transcriptions` call. The path
    /// is validated before any network I/O; a missing file never reaches the
    /// wire. The `language` field is left off the form when unset, and
    /// requesting word timestamps switches the wire format to `verbose_json`
    /// with word-level granularity.
    pub async fn transcribe(
        &self,
        path: impl AsRef<Path>,
        options: &TranscribeOptions,
    ) -> Result<Transcription> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::AudioNotFound {
                path: path.to_path_buf(),
            });
        }

        let format = options.effective_format();
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".into());

        let file_part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str(guess_mime(path))?;

        let mut form = Form::new()
            .part("file", file_part)
            .text("model", options.model.clone())
            .text("response_format", format.as_str());
        if let Some(language) = &options.language {
            form = form.text("language", language.clone());
        }
        if options.word_timestamps {
            form = form.text("timestamp_granularities[]", "word");
        }

        let url = format!("{}/audio/transcriptions", self.base_url);
        info!(%url, model = %options.model, format = format.as_str(), "sending transcription request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, message });
        }

        let transcription = match format {
            ResponseFormat::Json => {
                let body: JsonBody = response.json().await?;
                Transcription::Json { text: body.text }
            }
            ResponseFormat::VerboseJson => {
                let body: VerboseTranscription = response.json().await?;
                Transcription::Verbose(body)
            }
            ResponseFormat::Text | ResponseFormat::Srt | ResponseFormat::Vtt => {
                Transcription::Plain(response.text().await?)
            }
        };

        debug!(chars = transcription.text().len(), "transcription received");
        Ok(transcription)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Write a small fake audio file with a unique name and return its path.
    fn fake_audio(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("scribe_test_{}_{}.wav", std::process::id(), name));
        std::fs::write(&path, b"RIFF fake audio payload").unwrap();
        path
    }

    fn test_client(server: &MockServer) -> Client {
        Client::with_base_url("test-key", server.uri())
    }

    #[tokio::test]
    async fn transcribe_text_returns_plain_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_string_contains("whisper-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello from the api"))
            .mount(&server)
            .await;

        let audio = fake_audio("plain");
        let result = test_client(&server)
            .transcribe(&audio, &TranscribeOptions::default())
            .await
            .unwrap();
        std::fs::remove_file(&audio).ok();

        assert!(matches!(&result, Transcription::Plain(body) if body == "hello from the api"));
    }

    #[tokio::test]
    async fn transcribe_json_extracts_text_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "text": "structured result" })),
            )
            .mount(&server)
            .await;

        let audio = fake_audio("json");
        let opts = TranscribeOptions::new().format(ResponseFormat::Json);
        let result = test_client(&server).transcribe(&audio, &opts).await.unwrap();
        std::fs::remove_file(&audio).ok();

        assert_eq!(result.text(), "structured result");
        assert!(matches!(result, Transcription::Json { .. }));
    }

    #[tokio::test]
    async fn transcribe_with_timestamps_requests_verbose_json_word_granularity() {
        let server = MockServer::start().await;

        // The form must carry the coerced format and the word granularity.
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .and(body_string_contains("verbose_json"))
            .and(body_string_contains("timestamp_granularities[]"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "text": "one two",
                "language": "english",
                "duration": 0.9,
                "words": [
                    {"word": "one", "start": 0.0, "end": 0.4},
                    {"word": "two", "start": 0.4, "end": 0.9}
                ]
            })))
            .mount(&server)
            .await;

        let audio = fake_audio("timestamps");
        let opts = TranscribeOptions::new()
            .format(ResponseFormat::Text)
            .word_timestamps(true);
        let result = test_client(&server).transcribe(&audio, &opts).await.unwrap();
        std::fs::remove_file(&audio).ok();

        let words = result.words().expect("words present");
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].word, "one");
    }

    #[tokio::test]
    async fn transcribe_sends_language_only_when_set() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .and(body_string_contains("name=\"language\""))
            .and(body_string_contains("de"))
            .respond_with(ResponseTemplate::new(200).set_body_string("guten tag"))
            .mount(&server)
            .await;

        let audio = fake_audio("language");
        let opts = TranscribeOptions::new().language("de");
        let result = test_client(&server).transcribe(&audio, &opts).await.unwrap();
        std::fs::remove_file(&audio).ok();

        assert_eq!(result.text(), "guten tag");
    }

    #[tokio::test]
    async fn transcribe_maps_api_failure_to_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let audio = fake_audio("failure");
        let err = test_client(&server)
            .transcribe(&audio, &TranscribeOptions::default())
            .await
            .unwrap_err();
        std::fs::remove_file(&audio).ok();

        assert!(matches!(err, Error::Api { status: 401, .. }));
        assert!(err.to_string().contains("invalid api key"));
    }

    #[tokio::test]
    async fn missing_file_fails_before_any_network_call() {
        // Unroutable endpoint: if the client attempted a request the error
        // would be Error::Http, not AudioNotFound.
        let client = Client::with_base_url("test-key", "http://127.0.0.1:1");

        let err = client
            .transcribe("/definitely/not/here.wav", &TranscribeOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::AudioNotFound { .. }));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = Client::with_base_url("k", "http://localhost:9999///");
        assert_eq!(client.base_url, "http://localhost:9999");
    }

    #[test]
    fn debug_does_not_leak_api_key() {
        let client = Client::new("super-secret");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("super-secret"));
    }
}
