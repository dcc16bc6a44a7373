mod dummy;
mod gemini;

pub use dummy::DummyTranslator;
pub use gemini::GeminiTranslator;

/// Failure modes of one translation attempt. Every variant is
/// terminal for that call only; callers are free to invoke again.
/// The `Display` strings are the user-facing messages, so transport
/// and schema detail stays in the log fields instead.
#[derive(thiserror::Error, Debug)]
pub enum TranslateError {
    #[error("translation failed due to network error")]
    Network(#[source] reqwest::Error),
    #[error("translation failed due to network error (HTTP {status})")]
    Http { status: reqwest::StatusCode },
    #[error("translation failed: invalid JSON response from API")]
    InvalidJson(#[source] serde_json::Error),
    #[error("translation failed: API response structure was unexpected. Raw response: {raw}")]
    UnexpectedStructure { raw: serde_json::Value },
}

pub trait Translator {
    /// Translates one piece of English text to Japanese. `text` is
    /// expected to be non-empty after trimming; the session loop
    /// enforces that before calling.
    fn translate(&self, text: &str) -> Result<String, TranslateError>;
}
