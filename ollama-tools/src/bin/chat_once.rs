use std::io::Write;
use std::process::ExitCode;

use futures::StreamExt;
use ollama_chat::scrape::scrape_content;
use ollama_chat::types::chat::{
    ChatMessage, ChatStreamEvent, SimpleChatRequest, StreamingChatRequest,
};
use ollama_chat::OllamaClient;
use ollama_tools::cli::{self, ChatArgs, Parsed, EXIT_USAGE};
use ollama_tools::config::Settings;
use ollama_tools::{logging, DEFAULT_LOG_FILTER};
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_chat_args(std::env::args().skip(1)) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help) => {
            print!("{}", cli::chat_usage());
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", cli::usage_error(&e, &cli::chat_usage()));
            return ExitCode::from(EXIT_USAGE);
        }
    };

    logging::init(DEFAULT_LOG_FILTER);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: ChatArgs) -> anyhow::Result<()> {
    let settings = Settings::from_env(&args.connection)?;
    let client = settings.client()?;
    debug!(host = %settings.host, model = %settings.model, "client ready");

    if args.stream {
        stream_reply(&client, &settings.model, &args).await
    } else if args.regex {
        let request = SimpleChatRequest::new(settings.model.clone())
            .add_message(ChatMessage::user(args.prompt));
        let raw = client.chat_raw(request).await?;
        match scrape_content(&raw) {
            Some(content) => print_reply(content),
            None => println!("Assistant message not found."),
        }
        Ok(())
    } else {
        let request = SimpleChatRequest::new(settings.model.clone())
            .add_message(ChatMessage::user(args.prompt));
        let content = client.chat_text(request).await?;
        print_reply(&content);
        Ok(())
    }
}

fn print_reply(content: &str) {
    println!("Assistant says:\n");
    println!("{}", content);
}

async fn stream_reply(client: &OllamaClient, model: &str, args: &ChatArgs) -> anyhow::Result<()> {
    let request = StreamingChatRequest::new(model).add_message(ChatMessage::user(args.prompt.as_str()));
    let mut stream = client.chat_stream(request).await?;

    println!("Assistant says:\n");
    let mut stdout = std::io::stdout();
    while let Some(event) = stream.next().await {
        match event? {
            ChatStreamEvent::Message(response) => {
                print!("{}", response.message.content);
                stdout.flush()?;
            }
            ChatStreamEvent::Error(error) => anyhow::bail!("server error: {}", error),
            ChatStreamEvent::Partial { partial, error } => {
                warn!(%partial, error = error.as_deref().unwrap_or("unknown"), "skipping undecodable chunk");
            }
        }
    }
    println!();

    Ok(())
}
