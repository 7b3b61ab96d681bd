use futures::StreamExt;
use ollama_chat::types::chat::{ChatMessage, ChatStreamEvent, StreamingChatRequest};
use ollama_chat::{OllamaClient, DEFAULT_MODEL};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = OllamaClient::builder().build()?;

    let request = StreamingChatRequest::new(DEFAULT_MODEL)
        .add_message(ChatMessage::system("Answer in at most three sentences."))
        .add_message(ChatMessage::user("Tell me a story about a Rust programmer."));

    let mut stream = client.chat_stream(request).await?;

    while let Some(event) = stream.next().await {
        match event {
            Ok(ChatStreamEvent::Message(response)) => print!("{}", response.message.content),
            Ok(ChatStreamEvent::Error(error)) => println!("\nError Chunk: {}", error),
            Ok(ChatStreamEvent::Partial { .. }) => continue,
            Err(e) => eprintln!("Chat Error: {}", e),
        }
    }
    println!();

    Ok(())
}
