use std::path::PathBuf;

use ollama_chat::ats::AtsChecker;
use ollama_chat::{OllamaClient, DEFAULT_MODEL};

/// cargo run --example analyze_resume -- resume.pdf [job.txt]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let resume = args.next().ok_or("usage: analyze_resume <RESUME> [JOB_DESCRIPTION]")?;
    let job_description = args.next();

    let client = OllamaClient::builder().build()?;
    let checker = AtsChecker::new(client, DEFAULT_MODEL);

    let saved = checker
        .check_resume(&resume, job_description.as_deref(), None)
        .await?;
    println!("Report written to {}", saved.display());

    Ok(())
}
