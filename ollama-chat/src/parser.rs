//! Newline-delimited JSON parsing for streaming chat responses.

use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::types::OllamaError;
use crate::Result;
use bytes::Bytes;
use futures::Stream;
use serde::de::DeserializeOwned;

/// Lets an endpoint-specific event enum be built from a decoded message `M`,
/// a server error string, or an undecodable line.
pub trait StreamEventExt<M>: Sized {
    fn from_message(msg: M) -> Self;

    fn from_error(err: String) -> Self;

    fn partial(partial: String, error: Option<String>) -> Self;
}

/// Splits a byte stream into lines and decodes each line into an event `E`.
///
/// A line is tried as an [`OllamaError`] first, then as `M`; anything else
/// becomes a partial event carrying the raw line. Blank lines are skipped and
/// an unterminated trailing line is decoded once the inner stream ends.
pub struct GenericStreamParser<S, M, E>
where
    S: Stream<Item = Result<Bytes>> + Send + Unpin,
    M: DeserializeOwned,
    E: StreamEventExt<M>,
{
    inner: S,
    buffer: Vec<u8>,
    /// Set once the inner stream has returned `None`; it is never polled again.
    finished: bool,
    _marker: PhantomData<(M, E)>,
}

impl<S, M, E> GenericStreamParser<S, M, E>
where
    S: Stream<Item = Result<Bytes>> + Send + Unpin,
    M: DeserializeOwned,
    E: StreamEventExt<M>,
{
    pub fn new(stream: S) -> Self {
        Self {
            inner: stream,
            buffer: Vec::new(),
            finished: false,
            _marker: PhantomData,
        }
    }

    /// Decodes the next complete line in the buffer, if there is one.
    fn next_line_event(&mut self) -> Option<E> {
        loop {
            let newline_pos = self.buffer.iter().position(|&b| b == b'\n')?;
            let line_bytes = self.buffer.drain(..=newline_pos).collect::<Vec<u8>>();
            let line = String::from_utf8_lossy(&line_bytes);
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            return Some(decode_line(line));
        }
    }
}

fn decode_line<M, E>(line: &str) -> E
where
    M: DeserializeOwned,
    E: StreamEventExt<M>,
{
    if let Ok(err) = serde_json::from_str::<OllamaError>(line) {
        return E::from_error(err.error);
    }

    match serde_json::from_str::<M>(line) {
        Ok(msg) => E::from_message(msg),
        Err(e) => E::partial(line.to_string(), Some(e.to_string())),
    }
}

impl<S, M, E> Stream for GenericStreamParser<S, M, E>
where
    S: Stream<Item = Result<Bytes>> + Send + Unpin,
    M: DeserializeOwned + Unpin,
    E: StreamEventExt<M> + Unpin,
{
    type Item = Result<E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(event) = this.next_line_event() {
                return Poll::Ready(Some(Ok(event)));
            }
            if this.finished {
                return Poll::Ready(None);
            }

            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => this.buffer.extend_from_slice(&bytes),
                Poll::Ready(Some(Err(e))) => return Poll::Ready(Some(Err(e))),
                Poll::Ready(None) => {
                    this.finished = true;
                    let rest = String::from_utf8_lossy(&this.buffer).into_owned();
                    this.buffer.clear();
                    let rest = rest.trim();
                    if rest.is_empty() {
                        return Poll::Ready(None);
                    }
                    return Poll::Ready(Some(Ok(decode_line(rest))));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
