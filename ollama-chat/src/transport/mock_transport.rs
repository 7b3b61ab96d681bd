use std::sync::{Arc, Mutex, MutexGuard};

#[cfg(feature = "tracing")]
use tracing::instrument;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use futures::StreamExt;

use crate::transport::{ByteStream, Transport};
use crate::types::{HttpRequest, HttpResponse};
use crate::{Error, Result};

/// A [`Transport`] that never touches the network.
///
/// Responses are configured up front; every request handed to the transport
/// is recorded so tests can inspect the payload, or assert that nothing was
/// sent at all.
#[derive(Clone, Default)]
pub struct MockTransport {
    /// Lines returned, newline-terminated, by the next streaming request.
    stream_lines: Arc<Mutex<Vec<String>>>,
    /// Returned by the next non-streaming request.
    response: Arc<Mutex<Option<HttpResponse>>>,
    /// Returned by the next request instead of a response, simulating a
    /// connection failure.
    failure: Arc<Mutex<Option<String>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers the next non-streaming request with `response`.
    pub fn with_response(self, response: HttpResponse) -> Self {
        *lock(&self.response) = Some(response);
        self
    }

    /// Answers the next non-streaming request with `200 OK` and a JSON body.
    pub fn with_json_response(self, body: &serde_json::Value) -> Self {
        self.with_response(HttpResponse::ok(body.to_string()))
    }

    /// Answers the next streaming request with `lines`, one per chunk.
    pub fn with_stream_lines<I, L>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        *lock(&self.stream_lines) = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Fails the next request as if the server could not be reached.
    ///
    /// A `reqwest::Error` cannot be built outside reqwest, so the failure
    /// surfaces as [`Error::Protocol`] carrying `message`, not as
    /// [`Error::Transport`].
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *lock(&self.failure) = Some(message.into());
        self
    }

    /// Every request sent through this transport, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }

    fn record(&self, request: HttpRequest) -> Result<()> {
        lock(&self.requests).push(request);
        match lock(&self.failure).take() {
            Some(message) => Err(Error::Protocol(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    /// Returns the configured response, or `200 OK` with no body when none was set.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request)))]
    async fn send_http_request(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.record(request)?;
        Ok(lock(&self.response).take().unwrap_or(HttpResponse {
            status: 200,
            body: None,
        }))
    }

    /// Returns the configured lines as a byte stream, or an empty stream.
    #[cfg_attr(feature = "tracing", instrument(skip(self, request)))]
    async fn send_http_stream_request(&self, request: HttpRequest) -> Result<ByteStream> {
        self.record(request)?;
        let lines = lock(&self.stream_lines).drain(..).collect::<Vec<_>>();
        Ok(stream::iter(lines)
            .map(|line| Ok(Bytes::from(format!("{}\n", line))))
            .boxed())
    }
}
