use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::{stream, Stream, StreamExt};
use ollama_chat::parser::{GenericStreamParser, StreamEventExt};
use ollama_chat::types::chat::{ChatResponse, ChatStream, ChatStreamEvent};
use ollama_chat::{Error, Result};
use serde::Deserialize;

#[derive(Debug, PartialEq, Deserialize)]
struct Chunk {
    id: String,
    content: String,
}

#[derive(Debug, PartialEq)]
enum ChunkEvent {
    Message(Chunk),
    Error(String),
    Partial {
        partial: String,
        error: Option<String>,
    },
}

impl StreamEventExt<Chunk> for ChunkEvent {
    fn from_message(msg: Chunk) -> Self {
        ChunkEvent::Message(msg)
    }

    fn from_error(err: String) -> Self {
        ChunkEvent::Error(err)
    }

    fn partial(partial: String, error: Option<String>) -> Self {
        ChunkEvent::Partial { partial, error }
    }
}

fn byte_stream(chunks: Vec<&str>) -> impl Stream<Item = Result<Bytes>> + Send + Unpin {
    stream::iter(
        chunks
            .into_iter()
            .map(|s| Ok(Bytes::from(s.to_string())))
            .collect::<Vec<Result<Bytes>>>(),
    )
}

fn chunk(id: &str, content: &str) -> ChunkEvent {
    ChunkEvent::Message(Chunk {
        id: id.to_string(),
        content: content.to_string(),
    })
}

#[tokio::test]
async fn test_lines_decode_in_order() {
    let stream = byte_stream(vec![
        "{\"id\": \"1\", \"content\": \"first\"}\n",
        "{\"id\": \"2\", \"content\": \"second\"}\n",
    ]);
    let mut parser = GenericStreamParser::<_, Chunk, ChunkEvent>::new(stream);

    assert_eq!(parser.next().await.unwrap().unwrap(), chunk("1", "first"));
    assert_eq!(parser.next().await.unwrap().unwrap(), chunk("2", "second"));
    assert!(parser.next().await.is_none());
}

#[tokio::test]
async fn test_several_lines_in_one_chunk() {
    let stream = byte_stream(vec![
        "{\"id\": \"1\", \"content\": \"a\"}\n{\"id\": \"2\", \"content\": \"b\"}\n",
    ]);
    let mut parser = GenericStreamParser::<_, Chunk, ChunkEvent>::new(stream);

    assert_eq!(parser.next().await.unwrap().unwrap(), chunk("1", "a"));
    assert_eq!(parser.next().await.unwrap().unwrap(), chunk("2", "b"));
    assert!(parser.next().await.is_none());
}

#[tokio::test]
async fn test_line_split_across_chunks() {
    let stream = byte_stream(vec![
        r#"{"id": "1", "content": "hello "#,
        r#"world"}"#,
        "\n",
    ]);
    let mut parser = GenericStreamParser::<_, Chunk, ChunkEvent>::new(stream);

    assert_eq!(parser.next().await.unwrap().unwrap(), chunk("1", "hello world"));
    assert!(parser.next().await.is_none());
}

#[tokio::test]
async fn test_server_error_line() {
    let stream = byte_stream(vec!["{\"error\": \"model not found\"}\n"]);
    let mut parser = GenericStreamParser::<_, Chunk, ChunkEvent>::new(stream);

    assert_eq!(
        parser.next().await.unwrap().unwrap(),
        ChunkEvent::Error("model not found".to_string())
    );
    assert!(parser.next().await.is_none());
}

#[tokio::test]
async fn test_malformed_line_becomes_partial() {
    let raw = r#"{id: "1", content: "hello""#;
    let stream = byte_stream(vec![raw, "\n"]);
    let mut parser = GenericStreamParser::<_, Chunk, ChunkEvent>::new(stream);

    match parser.next().await.unwrap().unwrap() {
        ChunkEvent::Partial { partial, error } => {
            assert_eq!(partial, raw);
            assert!(error.is_some());
        }
        other => panic!("Expected Partial event, got {:?}", other),
    }
    assert!(parser.next().await.is_none());
}

#[tokio::test]
async fn test_blank_lines_are_skipped() {
    let stream = byte_stream(vec![
        "\n",
        "  \n",
        "{\"id\": \"1\", \"content\": \"hello\"}\n",
        "\n",
    ]);
    let mut parser = GenericStreamParser::<_, Chunk, ChunkEvent>::new(stream);

    assert_eq!(parser.next().await.unwrap().unwrap(), chunk("1", "hello"));
    assert!(parser.next().await.is_none());
}

#[tokio::test]
async fn test_unterminated_last_line_is_decoded() {
    let stream = byte_stream(vec![
        "{\"id\": \"1\", \"content\": \"a\"}\n",
        "{\"id\": \"2\", \"content\": \"b\"}",
    ]);
    let mut parser = GenericStreamParser::<_, Chunk, ChunkEvent>::new(stream);

    assert_eq!(parser.next().await.unwrap().unwrap(), chunk("1", "a"));
    assert_eq!(parser.next().await.unwrap().unwrap(), chunk("2", "b"));
    assert!(parser.next().await.is_none());
}

#[tokio::test]
async fn test_truncated_last_line_is_partial() {
    let raw = r#"{"id": "1", "content": "incompl"#;
    let stream = byte_stream(vec![raw]);
    let mut parser = GenericStreamParser::<_, Chunk, ChunkEvent>::new(stream);

    assert!(matches!(
        parser.next().await.unwrap().unwrap(),
        ChunkEvent::Partial { partial, .. } if partial == raw
    ));
    assert!(parser.next().await.is_none());
}

/// Yields its chunks, then `None` once; polling it again panics.
struct UnfusedChunks {
    chunks: VecDeque<&'static str>,
    ended: bool,
}

impl Stream for UnfusedChunks {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        assert!(!self.ended, "inner stream polled after it ended");
        match self.chunks.pop_front() {
            Some(chunk) => Poll::Ready(Some(Ok(Bytes::from(chunk)))),
            None => {
                self.ended = true;
                Poll::Ready(None)
            }
        }
    }
}

#[tokio::test]
async fn test_ended_inner_stream_is_not_polled_again() {
    let inner = UnfusedChunks {
        chunks: VecDeque::from(vec![
            "{\"id\": \"1\", \"content\": \"a\"}\n",
            "{\"id\": \"2\", \"content\": \"b\"}",
        ]),
        ended: false,
    };
    let mut parser = GenericStreamParser::<_, Chunk, ChunkEvent>::new(inner);

    assert_eq!(parser.next().await.unwrap().unwrap(), chunk("1", "a"));
    assert_eq!(parser.next().await.unwrap().unwrap(), chunk("2", "b"));
    assert!(parser.next().await.is_none());
    assert!(parser.next().await.is_none());
}

#[tokio::test]
async fn test_inner_stream_error_is_forwarded() {
    let inner = stream::iter(vec![
        Ok(Bytes::from("{\"id\": \"1\", \"content\": \"a\"}\n")),
        Err(Error::Protocol("connection reset".to_string())),
    ]);
    let mut parser = GenericStreamParser::<_, Chunk, ChunkEvent>::new(inner);

    assert_eq!(parser.next().await.unwrap().unwrap(), chunk("1", "a"));
    assert!(matches!(parser.next().await, Some(Err(Error::Protocol(_)))));
}

#[tokio::test]
async fn test_chat_stream_reassembles_reply() {
    let stream = byte_stream(vec![
        "{\"model\":\"gpt-oss:120b\",\"message\":{\"role\":\"assistant\",\"content\":\"Hel\"},\"done\":false}\n",
        "{\"model\":\"gpt-oss:120b\",\"message\":{\"role\":\"assistant\",\"content\":\"lo\"},\"done\":false}\n",
        "{\"model\":\"gpt-oss:120b\",\"message\":{\"role\":\"assistant\",\"content\":\"\"},\"done\":true}\n",
    ]);
    let mut chat = ChatStream::from_bytes_stream(stream);

    let mut text = String::new();
    let mut done = false;
    while let Some(event) = chat.next().await {
        match event.unwrap() {
            ChatStreamEvent::Message(ChatResponse { message, done: d, .. }) => {
                text.push_str(&message.content);
                done = d;
            }
            other => panic!("Expected Message event, got {:?}", other),
        }
    }

    assert_eq!(text, "Hello");
    assert!(done);
}

#[tokio::test]
async fn test_chat_stream_error_line_is_not_a_message() {
    let stream = byte_stream(vec!["{\"error\":\"unauthorized\"}\n"]);
    let mut chat = ChatStream::from_bytes_stream(stream);

    match chat.next().await.unwrap().unwrap() {
        ChatStreamEvent::Error(error) => assert_eq!(error, "unauthorized"),
        other => panic!("Expected Error event, got {:?}", other),
    }
}
