use std::path::PathBuf;
use std::process::ExitCode;

use ollama_chat::ats::{AtsChecker, Stage};
use ollama_tools::cli::{self, AtsArgs, Parsed, EXIT_USAGE};
use ollama_tools::config::Settings;
use ollama_tools::{logging, DEFAULT_LOG_FILTER};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_ats_args(std::env::args().skip(1)) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help) => {
            print!("{}", cli::ats_usage());
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", cli::usage_error(&e, &cli::ats_usage()));
            return ExitCode::from(EXIT_USAGE);
        }
    };

    logging::init(DEFAULT_LOG_FILTER);

    match run(args).await {
        Ok(saved) => {
            println!("\n🎉 Analysis completed successfully!");
            println!("📁 Results saved to: {}", saved.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("❌ Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: AtsArgs) -> anyhow::Result<PathBuf> {
    let settings = Settings::from_env(&args.connection)?;
    let checker = AtsChecker::new(settings.client()?, settings.model.clone());

    println!("🔍 Starting ATS Resume Analysis...");
    let saved = checker
        .check_resume_with(
            &args.resume,
            args.job_description.as_deref(),
            args.output.as_deref(),
            report_stage,
        )
        .await?;

    Ok(saved)
}

fn report_stage(stage: Stage<'_>) {
    match stage {
        Stage::ExtractingResume(path) => {
            println!("📄 Extracting text from resume: {}", path.display())
        }
        Stage::ExtractingJobDescription(path) => {
            println!("📋 Extracting job description from: {}", path.display())
        }
        Stage::Analyzing => println!("🤖 Analyzing resume with Ollama AI..."),
        Stage::Saving => println!("💾 Saving analysis results..."),
        Stage::Saved(path) => {
            println!("✅ Analysis complete! Results saved to: {}", path.display())
        }
    }
}
