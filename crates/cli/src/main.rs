#![deny(warnings)]

use anyhow::Context;
use clap::Parser;
use gemini_translator_core::config::{
    resolve_api_key, ApiKey, Env, ModelId, StdEnv, TimeoutBudget, TranslatorConfig, DEFAULT_MODEL,
    DEFAULT_TIMEOUT_SECS, ENV_GEMINI_API_KEY,
};
use gemini_translator_core::shell::run_session;
use gemini_translator_core::translate::GeminiTranslator;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gemini-translator")]
#[command(about = "Interactive English to Japanese translation via the Gemini API")]
struct Args {
    #[arg(long)]
    api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    println!("--- English to Japanese Translator ---");
    println!("This program uses the Google Gemini API for translation.");

    let env = StdEnv;
    let from_env = key_comes_from_env(&args.api_key, &env);
    let api_key = match resolve_api_key(args.api_key, ENV_GEMINI_API_KEY, &env)? {
        Some(key) => {
            if from_env {
                println!("Using API key from {ENV_GEMINI_API_KEY} environment variable.");
            }
            key
        }
        None => prompt_for_key()?,
    };

    let mut config = TranslatorConfig::new(api_key);
    config.model = ModelId::new(args.model)?;
    config.timeout = TimeoutBudget::new(args.timeout_secs)?;

    tracing::info!(
        model = %config.model.as_str(),
        timeout_secs = config.timeout.secs,
        "config loaded"
    );

    let translator =
        GeminiTranslator::new(config).context("failed to set up the Gemini client")?;

    println!("\nEnter English text to translate (type 'exit' to quit):");

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut stdin.lock(), &mut stdout.lock(), &translator)?;

    println!("\nExiting translator. Goodbye!");
    Ok(())
}

fn key_comes_from_env(flag: &Option<String>, env: &impl Env) -> bool {
    flag.is_none() && env.var(ENV_GEMINI_API_KEY).is_some()
}

fn prompt_for_key() -> anyhow::Result<ApiKey> {
    print!("Please enter your Google Gemini API Key: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read API key from stdin")?;
    Ok(ApiKey::new(line.trim())?)
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemini_translator_core::config::MapEnv;

    #[test]
    fn env_notice_shown_when_flag_missing_and_env_set() {
        let env = MapEnv::default().with_var(ENV_GEMINI_API_KEY, "env-key");
        assert!(key_comes_from_env(&None, &env));
    }

    #[test]
    fn env_notice_suppressed_when_flag_provided() {
        let env = MapEnv::default().with_var(ENV_GEMINI_API_KEY, "env-key");
        assert!(!key_comes_from_env(&Some("cli-key".to_owned()), &env));
    }

    #[test]
    fn env_notice_suppressed_when_env_missing() {
        let env = MapEnv::default();
        assert!(!key_comes_from_env(&None, &env));
    }
}
