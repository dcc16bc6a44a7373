use crate::config::{ApiKey, ConfigError, ModelId, TranslatorConfig};
use crate::translate::{TranslateError, Translator};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use url::Url;

/// Translator backed by the Gemini generateContent endpoint. One
/// blocking HTTP round trip per call, no retries.
#[derive(Clone)]
pub struct GeminiTranslator {
    client: Client,
    request_url: Url,
}

impl GeminiTranslator {
    pub fn new(config: TranslatorConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout.duration())
            .build()?;
        let request_url = request_url(&config.endpoint, &config.model, &config.api_key)?;

        Ok(Self {
            client,
            request_url,
        })
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<UserTurn>,
}

#[derive(Serialize)]
struct UserTurn {
    role: &'static str,
    parts: Vec<PromptPart>,
}

#[derive(Serialize)]
struct PromptPart {
    text: String,
}

impl GenerateContentRequest {
    fn for_text(text: &str) -> Self {
        Self {
            contents: vec![UserTurn {
                role: "user",
                parts: vec![PromptPart {
                    text: prompt_for(text),
                }],
            }],
        }
    }
}

// Strict schema for the success shape. A body that parses as JSON but
// does not fit these types is the UnexpectedStructure outcome, not a
// malformed-input fault.
#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

// The exact phrasing is part of the contract with the model; changing
// it changes what the model sends back.
fn prompt_for(text: &str) -> String {
    format!(
        "Translate the following English text to Japanese (only provide the Japanese text):\n\n\"{text}\""
    )
}

// The generateContent path is appended to whatever the endpoint
// already carries, so a proxy prefix on the endpoint survives.
fn request_url(endpoint: &str, model: &ModelId, api_key: &ApiKey) -> Result<Url, ConfigError> {
    let mut url = Url::parse(&format!(
        "{}/v1beta/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model.as_str()
    ))?;
    url.query_pairs_mut().append_pair("key", api_key.expose());
    Ok(url)
}

fn extract_translation(body: &str) -> Result<String, TranslateError> {
    let raw: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        tracing::error!(body = %body, "response body is not valid JSON");
        TranslateError::InvalidJson(e)
    })?;

    let parsed: GenerateContentResponse = match serde_json::from_value(raw.clone()) {
        Ok(parsed) => parsed,
        Err(_) => return Err(TranslateError::UnexpectedStructure { raw }),
    };

    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or(TranslateError::UnexpectedStructure { raw })
}

impl Translator for GeminiTranslator {
    fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let request = GenerateContentRequest::for_text(text);

        let response = self
            .client
            .post(self.request_url.clone())
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            // The request URL carries the key query parameter; strip
            // it so the credential cannot surface through the error.
            .map_err(|e| TranslateError::Network(e.without_url()))?;

        // Do not attempt to parse error bodies for a translation; the
        // body is kept for diagnosis only.
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::error!(status = %status, body = %body, "generateContent returned an error status");
            return Err(TranslateError::Http { status });
        }

        let body = response
            .text()
            .map_err(|e| TranslateError::Network(e.without_url()))?;
        extract_translation(&body)
    }
}
