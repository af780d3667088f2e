use std::fmt;
use std::path::Path;

/// Response format for the transcription endpoint.
///
/// `Text`, `Srt` and `Vtt` come back as already-formatted plain bodies;
/// `Json` and `VerboseJson` come back as structured JSON. Word-level
/// timestamps are only available with `VerboseJson`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    Json,
    VerboseJson,
    Srt,
    Vtt,
}

impl ResponseFormat {
    /// Wire name as the API expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Text => "text",
            ResponseFormat::Json => "json",
            ResponseFormat::VerboseJson => "verbose_json",
            ResponseFormat::Srt => "srt",
            ResponseFormat::Vtt => "vtt",
        }
    }

    /// Whether the API returns a JSON body for this format.
    pub fn is_structured(&self) -> bool {
        matches!(self, ResponseFormat::Json | ResponseFormat::VerboseJson)
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for transcription options.
#[derive(Debug, Clone)]
pub struct TranscribeOptions {
    /// Model name as the service knows it (e.g. "whisper-1").
    pub model: String,
    /// Requested response format.
    pub format: ResponseFormat,
    /// ISO-639-1 language hint (e.g. "en"). Omitted from the request when unset.
    pub language: Option<String>,
    /// Request word-level timestamps. Forces the effective format to
    /// `verbose_json` regardless of `format`.
    pub word_timestamps: bool,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            model: "whisper-1".into(),
            format: ResponseFormat::Text,
            language: None,
            word_timestamps: false,
        }
    }
}

impl TranscribeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn word_timestamps(mut self, enabled: bool) -> Self {
        self.word_timestamps = enabled;
        self
    }

    /// The format actually sent on the wire.
    ///
    /// Word timestamps require `verbose_json`, so requesting them overrides
    /// any user-specified format.
    pub fn effective_format(&self) -> ResponseFormat {
        if self.word_timestamps {
            ResponseFormat::VerboseJson
        } else {
            self.format
        }
    }
}

/// Guess the MIME type of an audio file from its extension.
pub(crate) fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("mp4" | "m4a") => "audio/mp4",
        Some("ogg" | "oga") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("flac") => "audio/flac",
        Some("webm") => "audio/webm",
        _ => "application/octet-stream",
    }
}
