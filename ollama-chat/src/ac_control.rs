//! Helpers for the air-conditioning control assistant.
//!
//! The model is told to answer with a single JSON object naming one of three
//! actions; whatever it actually answers is surfaced as either structured
//! JSON or raw text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::chat::{ChatMessage, SimpleChatRequest};

pub const SYSTEM_PROMPT: &str = r#"
You are an AC control assistant. Always respond ONLY in the following JSON format:
{"action": "<TURN_ON_AC | TURN_OFF_AC | KEEP_STATE>"}

Rules:
- If temperature > 30 → {"action": "TURN_ON_AC"}
- If temperature < 20 → {"action": "TURN_OFF_AC"}
- If 20 <= temperature <= 30 → {"action": "KEEP_STATE"}
"#;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AcAction {
    TurnOnAc,
    TurnOffAc,
    KeepState,
}

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Exit,
    Temperature(f64),
    Invalid,
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.eq_ignore_ascii_case("exit") {
        return Input::Exit;
    }
    line.parse::<f64>()
        .map(Input::Temperature)
        .unwrap_or(Input::Invalid)
}

/// `25.0` renders as `25.0`, not `25`.
pub fn temperature_message(temperature: f64) -> String {
    format!("The current temperature is {:?}°C", temperature)
}

pub fn temperature_request(model: impl Into<String>, temperature: f64) -> SimpleChatRequest {
    SimpleChatRequest::new(model)
        .add_message(ChatMessage::system(SYSTEM_PROMPT))
        .add_message(ChatMessage::user(temperature_message(temperature)))
}

/// The assistant's answer to one reading.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Structured(Value),
    Raw(String),
}

impl Reply {
    /// The requested action, when the reply is a JSON object with a known `action`.
    pub fn action(&self) -> Option<AcAction> {
        match self {
            Reply::Structured(value) => value
                .get("action")
                .cloned()
                .and_then(|action| serde_json::from_value(action).ok()),
            Reply::Raw(_) => None,
        }
    }
}

pub fn interpret_reply(content: &str) -> Reply {
    match serde_json::from_str::<Value>(content) {
        Ok(value) => Reply::Structured(value),
        Err(_) => Reply::Raw(content.to_string()),
    }
}
