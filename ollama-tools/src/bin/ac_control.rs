use std::io::Write;
use std::process::ExitCode;

use ollama_chat::ac_control::{interpret_reply, parse_input, temperature_request, Input, Reply};
use ollama_tools::cli::{self, AcControlArgs, Parsed, EXIT_USAGE};
use ollama_tools::config::Settings;
use ollama_tools::interrupt::{race, Outcome};
use ollama_tools::{logging, DEFAULT_LOG_FILTER};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const PROMPT: &str = "\nEnter the temperature (or type 'exit' to quit): ";
const GOODBYE: &str = "Exiting AC control assistant.";

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_ac_control_args(std::env::args().skip(1)) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help) => {
            print!("{}", cli::ac_control_usage());
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", cli::usage_error(&e, &cli::ac_control_usage()));
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

async fn run(args: AcControlArgs) -> anyhow::Result<()> {
    let settings = Settings::from_env(&args.connection)?;
    let client = settings.client()?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // Listens for the whole session, including while a request is in flight.
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        let line = match race(lines.next_line(), &mut ctrl_c).await {
            Outcome::Done(line) => line?,
            Outcome::Interrupted => None,
        };
        let Some(line) = line else {
            println!("\n{}", GOODBYE);
            break;
        };

        let temperature = match parse_input(&line) {
            Input::Exit => {
                println!("{}", GOODBYE);
                break;
            }
            Input::Invalid => {
                println!("⚠️ Please enter a valid number.");
                continue;
            }
            Input::Temperature(temperature) => temperature,
        };

        let request = temperature_request(settings.model.clone(), temperature);
        match race(client.chat_text(request), &mut ctrl_c).await {
            Outcome::Done(Ok(content)) => {
                let reply = interpret_reply(&content);
                debug!(temperature, action = ?reply.action(), "assistant replied");
                match reply {
                    Reply::Structured(value) => println!("Assistant says: {}", value),
                    Reply::Raw(raw) => println!("Assistant says (raw): {}", raw),
                }
            }
            Outcome::Done(Err(e)) => println!("Error: {}", e),
            Outcome::Interrupted => {
                println!("\n{}", GOODBYE);
                break;
            }
        }
    }

    Ok(())
}
