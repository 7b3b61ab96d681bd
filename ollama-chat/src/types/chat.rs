//! Contains all data structures used with the Ollama Chat API

use std::pin::Pin;

use crate::parser::{GenericStreamParser, StreamEventExt};
use crate::Result;
use bytes::Bytes;
use futures::Stream;
use ollama_chat_macros::FromBytes;
use serde::{Deserialize, Serialize};

use super::Role;

/// The payload posted to `/api/chat`.
///
/// `stream` is always serialized so the server never falls back to its own
/// default. Build one from [`SimpleChatRequest`] or [`StreamingChatRequest`].
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// The name of the model to use (e.g., "gpt-oss:120b").
    pub model: String,
    /// Messages in conversation order.
    pub messages: Vec<ChatMessage>,
    /// Whether the server should answer with newline-delimited events.
    pub stream: bool,
}

/// A single role-tagged message in a chat request.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// Represents a chat response from the Ollama API.
///
/// Only `message.content` matters to callers; every other field falls back to
/// its default when the server leaves it out.
#[derive(Deserialize, Serialize, Default, FromBytes, Debug, Clone)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub message: ChatResponseMessage,
    #[serde(default)]
    pub done: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ChatResponseMessage {
    #[serde(default = "assistant_role")]
    pub role: Role,
    #[serde(default)]
    pub content: String,
}

impl Default for ChatResponseMessage {
    fn default() -> Self {
        Self {
            role: assistant_role(),
            content: String::new(),
        }
    }
}

fn assistant_role() -> Role {
    Role::Assistant
}

/// A chat request answered with a single [`ChatResponse`].
#[derive(Default, Debug, Clone)]
pub struct SimpleChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl SimpleChatRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
        }
    }

    pub fn add_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }
}

/// A chat request answered with a [`ChatStream`].
#[derive(Default, Debug, Clone)]
pub struct StreamingChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl StreamingChatRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
        }
    }

    pub fn add_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }
}

impl From<SimpleChatRequest> for ChatRequest {
    fn from(value: SimpleChatRequest) -> Self {
        ChatRequest {
            model: value.model,
            messages: value.messages,
            stream: false,
        }
    }
}

impl From<StreamingChatRequest> for ChatRequest {
    fn from(value: StreamingChatRequest) -> Self {
        ChatRequest {
            model: value.model,
            messages: value.messages,
            stream: true,
        }
    }
}

/// Represents an event received from a streaming chat response.
#[derive(Deserialize, Serialize, Debug)]
pub enum ChatStreamEvent {
    /// One decoded response chunk.
    Message(ChatResponse),
    /// The server reported an error mid-stream.
    Error(String),
    /// A line that could not be decoded.
    Partial {
        partial: String,
        error: Option<String>,
    },
}

/// A stream of [`ChatStreamEvent`]s for streaming chat completions.
pub struct ChatStream {
    pub inner: Pin<Box<dyn Stream<Item = Result<ChatStreamEvent>> + Send>>,
}

impl Stream for ChatStream {
    type Item = Result<ChatStreamEvent>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl ChatStream {
    pub fn from_bytes_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + Unpin + 'static,
    {
        let parser = GenericStreamParser::<S, ChatResponse, ChatStreamEvent>::new(stream);
        ChatStream {
            inner: Box::pin(parser),
        }
    }
}

impl StreamEventExt<ChatResponse> for ChatStreamEvent {
    fn from_message(msg: ChatResponse) -> Self {
        ChatStreamEvent::Message(msg)
    }

    fn from_error(err: String) -> Self {
        ChatStreamEvent::Error(err)
    }

    fn partial(partial: String, error: Option<String>) -> Self {
        ChatStreamEvent::Partial { partial, error }
    }
}
