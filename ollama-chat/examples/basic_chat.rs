use ollama_chat::types::chat::{ChatMessage, SimpleChatRequest};
use ollama_chat::{OllamaClient, DEFAULT_MODEL};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reads OLLAMA_HOST and OLLAMA_API_KEY from the environment.
    let client = OllamaClient::builder().build()?;

    let request = SimpleChatRequest::new(DEFAULT_MODEL)
        .add_message(ChatMessage::user("What is the capital of France?"));

    let content = client.chat_text(request).await?;
    println!("Response: {}", content);

    Ok(())
}
