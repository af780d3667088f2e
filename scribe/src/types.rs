use serde::{Deserialize, Serialize};

/// A single word with timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// A transcript segment (sentence/phrase) as returned by `verbose_json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Structured result for the `verbose_json` format.
///
/// Optional fields mirror what the service returned: absent fields are
/// skipped on re-serialization so a saved result matches the wire payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerboseTranscription {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<Word>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
}

/// Result of a transcription request.
///
/// Which variant you get depends on the effective response format:
/// `text`/`srt`/`vtt` come back as an already-formatted plain body,
/// `json` as just the transcript text, `verbose_json` as the full
/// structured payload.
#[derive(Debug, Clone)]
pub enum Transcription {
    /// Already-formatted body (`text`, `srt`, `vtt` formats).
    Plain(String),
    /// `json` format: only the transcript text.
    Json { text: String },
    /// `verbose_json` format.
    Verbose(VerboseTranscription),
}

impl Transcription {
    /// Transcript text, regardless of variant.
    ///
    /// For `Plain` this is the raw returned body (already formatted for
    /// `srt`/`vtt`); for the structured variants it is the `text` field.
    pub fn text(&self) -> &str {
        match self {
            Transcription::Plain(body) => body,
            Transcription::Json { text } => text,
            Transcription::Verbose(v) => &v.text,
        }
    }

    /// Word-level timestamps, when the service returned them.
    pub fn words(&self) -> Option<&[Word]> {
        match self {
            Transcription::Verbose(v) => v.words.as_deref(),
            _ => None,
        }
    }

    /// One line per word: `{word}: {start} - {end}`.
    pub fn render_word_timestamps(&self) -> Option<String> {
        let words = self.words()?;
        let mut out = String::new();
        for w in words {
            out.push_str(&format!("{}: {} - {}\n", w.word, w.start, w.end));
        }
        Some(out)
    }

    /// Pretty-printed JSON of the full result.
    ///
    /// Structured variants serialize their payload; a plain body serializes
    /// as a JSON string.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        let value = match self {
            Transcription::Plain(body) => serde_json::Value::String(body.clone()),
            Transcription::Json { text } => serde_json::json!({ "text": text }),
            Transcription::Verbose(v) => serde_json::to_value(v)?,
        };
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
