//! Speech-to-text via OpenAI-compatible transcription APIs — audio file in,
//! transcript out.
//!
//! **scribe** wraps the `POST /audio/transcriptions` endpoint: it validates a
//! local file path, uploads the audio as a multipart request, and hands back
//! the transcript as plain text, SRT, WebVTT, or structured JSON with
//! optional word-level timestamps.
//!
//! # Quick start
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> scribe::Result<()> {
//! // Reads OPENAI_API_KEY (and optionally OPENAI_BASE_URL) from the environment.
//! let transcript = scribe::transcribe_file("meeting.mp3").await?;
//! println!("{}", transcript.text());
//!
//! // Or with options and an explicit client:
//! use scribe::{Client, ResponseFormat, TranscribeOptions};
//! let client = Client::from_env()?;
//! let opts = TranscribeOptions::new()
//!     .format(ResponseFormat::Srt)
//!     .language("en");
//! let subtitles = client.transcribe("meeting.mp3", &opts).await?;
//! println!("{}", subtitles.text());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod types;

pub use api::{Client, DEFAULT_BASE_URL};
pub use config::{ResponseFormat, TranscribeOptions};
pub use error::{Error, Result};
pub use types::{Segment, Transcription, VerboseTranscription, Word};

use std::path::Path;

/// Transcribe a local audio file with default options.
///
/// Builds a [`Client`] from the environment; prefer constructing a [`Client`]
/// yourself when making more than one call.
pub async fn transcribe_file(path: impl AsRef<Path>) -> Result<Transcription> {
    transcribe_file_with_options(path, &TranscribeOptions::default()).await
}

/// Transcribe a local audio file with custom options.
pub async fn transcribe_file_with_options(
    path: impl AsRef<Path>,
    options: &TranscribeOptions,
) -> Result<Transcription> {
    let client = Client::from_env()?;
    client.transcribe(path, options).await
}
