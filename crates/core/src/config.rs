use std::{fmt, time::Duration};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Opaque credential for the generateContent endpoint. The provider
/// requires it as a URL query parameter, so it must never reach logs
/// or error text; `Debug` is redacted accordingly.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, ConfigError> {
        let v = value.into();
        if v.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(v))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(**redacted**)")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelId(String);

impl ModelId {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, ConfigError> {
        let v = value.into();
        if v.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        Ok(Self(v))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self(DEFAULT_MODEL.to_owned())
    }
}

/// Explicit request deadline for the blocking HTTP client. The
/// upstream service gives no guidance here, so the cutoff is ours and
/// must be stated rather than inherited from client defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeoutBudget {
    pub secs: u64,
}

impl TimeoutBudget {
    pub fn new(secs: u64) -> Result<Self, ConfigError> {
        if secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self { secs })
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.secs)
    }
}

impl Default for TimeoutBudget {
    fn default() -> Self {
        Self {
            secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TranslatorConfig {
    pub api_key: ApiKey,
    pub model: ModelId,
    pub endpoint: String,
    pub timeout: TimeoutBudget,
}

impl TranslatorConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            model: ModelId::default(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: TimeoutBudget::default(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("api key must not be empty")]
    EmptyApiKey,
    #[error("model id must not be empty")]
    EmptyModel,
    #[error("timeout must be > 0 seconds")]
    ZeroTimeout,
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_api_key(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
) -> Result<Option<ApiKey>, ConfigError> {
    match cli_value {
        Some(v) => Ok(Some(ApiKey::new(v)?)),
        None => match env.var(env_key) {
            Some(v) => Ok(Some(ApiKey::new(v)?)),
            None => Ok(None),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_cli_takes_precedence_over_env() {
        let env = MapEnv::default().with_var(ENV_GEMINI_API_KEY, "env-key");
        let key = resolve_api_key(Some("cli-key".to_owned()), ENV_GEMINI_API_KEY, &env)
            .expect("valid key")
            .expect("present");
        assert_eq!(key.expose(), "cli-key");
    }

    #[test]
    fn api_key_env_used_when_cli_missing() {
        let env = MapEnv::default().with_var(ENV_GEMINI_API_KEY, "env-key");
        let key = resolve_api_key(None, ENV_GEMINI_API_KEY, &env)
            .expect("valid key")
            .expect("present");
        assert_eq!(key.expose(), "env-key");
    }

    #[test]
    fn api_key_absent_when_both_missing() {
        let env = MapEnv::default();
        let key = resolve_api_key(None, ENV_GEMINI_API_KEY, &env).expect("no error");
        assert!(key.is_none());
    }

    #[test]
    fn empty_api_key_rejected() {
        assert!(matches!(ApiKey::new("  "), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret").expect("valid key");
        assert_eq!(format!("{key:?}"), "ApiKey(**redacted**)");
    }

    #[test]
    fn zero_timeout_rejected() {
        assert!(matches!(
            TimeoutBudget::new(0),
            Err(ConfigError::ZeroTimeout)
        ));
    }

    #[test]
    fn timeout_duration_matches_secs() {
        let t = TimeoutBudget::new(30).expect("nonzero");
        assert_eq!(t.duration(), Duration::from_secs(30));
    }

    #[test]
    fn config_defaults() {
        let cfg = TranslatorConfig::new(ApiKey::new("k").expect("valid key"));
        assert_eq!(cfg.model.as_str(), DEFAULT_MODEL);
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.timeout.secs, DEFAULT_TIMEOUT_SECS);
    }
}
