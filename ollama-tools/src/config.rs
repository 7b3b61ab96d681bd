use std::time::Duration;

use ollama_chat::builder::DEFAULT_BASE_URL;
use ollama_chat::{OllamaClient, DEFAULT_MODEL};
use thiserror::Error;

use crate::cli::ConnectionArgs;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API key: pass --api-key or set OLLAMA_API_KEY")]
    MissingApiKey,
}

/// Everything needed to reach the chat API, resolved from command-line
/// options first, then the environment, then built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Resolves settings against the process environment, after loading a
    /// `.env` file from the working directory if one exists.
    pub fn from_env(args: &ConnectionArgs) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Resolves settings with `lookup` standing in for the environment.
    /// Blank values count as unset.
    pub fn resolve<F>(args: &ConnectionArgs, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |value: &String| !value.trim().is_empty();
        let pick = |flag: &Option<String>, key: &str| {
            flag.clone()
                .filter(present)
                .or_else(|| lookup(key).filter(present))
        };

        Ok(Settings {
            host: pick(&args.host, "OLLAMA_HOST").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: pick(&args.api_key, "OLLAMA_API_KEY").ok_or(ConfigError::MissingApiKey)?,
            model: pick(&args.model, "OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: args.timeout,
        })
    }

    pub fn client(&self) -> ollama_chat::Result<OllamaClient> {
        let builder = OllamaClient::builder()
            .base_url(self.host.clone())
            .api_key(self.api_key.clone());

        match self.timeout {
            Some(timeout) => builder.timeout(timeout).build(),
            None => builder.build(),
        }
    }
}
