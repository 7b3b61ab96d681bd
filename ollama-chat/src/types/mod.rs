//! Request and response types for the Ollama chat API.

pub mod chat;
mod http;
mod shared;

pub use http::*;
pub use shared::*;
