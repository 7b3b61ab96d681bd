use bytes::Bytes;

#[cfg(feature = "metrics")]
use metrics::counter;
#[cfg(feature = "tracing")]
use tracing::{debug, instrument};

use crate::builder::OllamaClientBuilder;
use crate::types::chat::{
    ChatRequest, ChatResponse, ChatStream, SimpleChatRequest, StreamingChatRequest,
};
use crate::types::{HttpRequest, HttpResponse};
use crate::OllamaClient;
use crate::{Error, Result};

const CHAT_PATH: &str = "/api/chat";

impl OllamaClient {
    pub fn builder() -> OllamaClientBuilder {
        OllamaClientBuilder::new()
    }

    /// Sends a non-streaming chat request and decodes the response.
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] when the server answers with anything other than `200`.
    /// - [`Error::Protocol`] when the response has no body.
    /// - [`Error::JsonParse`] when the body is not a chat response.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(model = %request.model)))]
    pub async fn chat_simple(&self, request: SimpleChatRequest) -> Result<ChatResponse> {
        let bytes = self.send_chat(request).await?;
        ChatResponse::from_bytes(bytes)
    }

    /// Sends a non-streaming chat request and returns only the assistant's text.
    pub async fn chat_text(&self, request: SimpleChatRequest) -> Result<String> {
        Ok(self.chat_simple(request).await?.message.content)
    }

    /// Sends a non-streaming chat request and returns the response body untouched.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(model = %request.model)))]
    pub async fn chat_raw(&self, request: SimpleChatRequest) -> Result<String> {
        let bytes = self.send_chat(request).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    #[cfg_attr(feature = "tracing", instrument(skip(self, request), fields(model = %request.model)))]
    pub async fn chat_stream(&self, request: StreamingChatRequest) -> Result<ChatStream> {
        #[cfg(feature = "metrics")]
        counter!("ollama_client.chat_requests_total", "type" => "streaming").increment(1);

        let chat_request = ChatRequest::from(request);
        let request = HttpRequest::new(CHAT_PATH).post().body(chat_request)?;

        let byte_stream = self.transport.send_http_stream_request(request).await?;
        Ok(ChatStream::from_bytes_stream(byte_stream))
    }

    async fn send_chat(&self, request: SimpleChatRequest) -> Result<Bytes> {
        #[cfg(feature = "metrics")]
        counter!("ollama_client.chat_requests_total", "type" => "non_streaming").increment(1);

        let chat_request = ChatRequest::from(request);
        let request = HttpRequest::new(CHAT_PATH).post().body(chat_request)?;

        let response = self.transport.send_http_request(request).await?;
        #[cfg(feature = "tracing")]
        debug!(status = response.status, "chat response received");

        successful_body(response)
    }
}

fn successful_body(response: HttpResponse) -> Result<Bytes> {
    if response.status != 200 {
        let body = response
            .body
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default();
        return Err(Error::Api {
            status: response.status,
            body,
        });
    }

    response
        .body
        .ok_or_else(|| Error::Protocol("Missing response body".into()))
}
