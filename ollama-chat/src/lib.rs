use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use self::transport::Transport;

pub mod ac_control;
pub mod ats;
pub mod builder;
pub mod client;
pub mod document;
pub mod parser;
pub mod scrape;
pub mod transport;
pub mod types;

/// Model used by every tool unless told otherwise.
pub const DEFAULT_MODEL: &str = "gpt-oss:120b";

/// Client for the `/api/chat` endpoint of an Ollama server.
///
/// Construct one through [`OllamaClient::builder`].
#[derive(Clone)]
pub struct OllamaClient {
    transport: Arc<dyn Transport + Send + Sync>,
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Error extracting text from {format}: {message}")]
    Extraction { format: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
