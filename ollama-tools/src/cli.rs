//! Argument parsing for the command-line tools.
//!
//! Each parser takes the arguments after the program name and returns either
//! the parsed arguments or [`Parsed::Help`].

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Timeout applied by `ats-checker` when `--timeout` is not given.
pub const ATS_DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Prompt sent by `chat-once` when none is given.
pub const DEFAULT_PROMPT: &str = "Hello";

/// Exit status of every tool when its command line is rejected.
pub const EXIT_USAGE: u8 = 2;

const CONNECTION_OPTIONS: &str = "\
Connection options:
  -m, --model <MODEL>       Model to use (env: OLLAMA_MODEL, default: gpt-oss:120b)
  -k, --api-key <KEY>       API key (env: OLLAMA_API_KEY)
      --host <URL>          API base URL (env: OLLAMA_HOST, default: https://ollama.com)
      --timeout <SECONDS>   Request timeout
  -h, --help                Print help
";

pub fn chat_usage() -> String {
    format!(
        "Send one message to the chat API and print the reply.

Usage: chat-once [OPTIONS] [PROMPT]...

Options:
      --regex               Scrape the reply out of the raw response body
      --stream              Print the reply as it is generated
{CONNECTION_OPTIONS}"
    )
}

pub fn ac_control_usage() -> String {
    format!(
        "Ask the assistant what the air conditioning should do for each temperature you enter.

Usage: ac-control [OPTIONS]

{CONNECTION_OPTIONS}"
    )
}

pub fn ats_usage() -> String {
    format!(
        "Analyze a resume for applicant tracking system compatibility.

Usage: ats-checker [OPTIONS] <RESUME>

Arguments:
  <RESUME>                  Resume file (PDF, DOC, DOCX or TXT)

Options:
  -jd, --job-description <PATH>  Job description file to match against
  -o, --output <PATH>       Report path (default: ats_analysis_<timestamp>.txt)
{CONNECTION_OPTIONS}"
    )
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    #[error("missing value for '{0}'")]
    MissingValue(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("missing required argument <{0}>")]
    MissingArgument(&'static str),

    #[error("invalid timeout '{0}': expected a number of seconds")]
    InvalidTimeout(String),

    #[error("'{0}' cannot be used with '{1}'")]
    Conflict(&'static str, &'static str),
}

/// What a tool prints to stderr before exiting with [`EXIT_USAGE`].
pub fn usage_error(error: &CliError, usage: &str) -> String {
    format!("error: {}\n\n{}", error, usage)
}

#[derive(Debug, PartialEq)]
pub enum Parsed<T> {
    Run(T),
    Help,
}

/// Options shared by every tool for reaching the API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionArgs {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub host: Option<String>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatArgs {
    pub connection: ConnectionArgs,
    pub regex: bool,
    pub stream: bool,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcControlArgs {
    pub connection: ConnectionArgs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtsArgs {
    pub connection: ConnectionArgs,
    pub resume: PathBuf,
    pub job_description: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

struct Args<I: Iterator<Item = String>> {
    inner: I,
}

impl<I: Iterator<Item = String>> Args<I> {
    fn value_for(&mut self, flag: &str) -> Result<String, CliError> {
        self.inner
            .next()
            .ok_or_else(|| CliError::MissingValue(flag.to_string()))
    }
}

impl<I: Iterator<Item = String>> Iterator for Args<I> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next()
    }
}

impl ConnectionArgs {
    /// Consumes `flag` (and its value) if it is a connection option.
    fn accept<I>(&mut self, flag: &str, args: &mut Args<I>) -> Result<bool, CliError>
    where
        I: Iterator<Item = String>,
    {
        match flag {
            "-m" | "--model" => self.model = Some(args.value_for(flag)?),
            "-k" | "--api-key" => self.api_key = Some(args.value_for(flag)?),
            "--host" => self.host = Some(args.value_for(flag)?),
            "--timeout" => {
                let value = args.value_for(flag)?;
                self.timeout = Some(parse_timeout(&value)?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn parse_timeout(value: &str) -> Result<Duration, CliError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .map(Duration::from_secs_f64)
        .ok_or_else(|| CliError::InvalidTimeout(value.to_string()))
}

fn is_help(arg: &str) -> bool {
    arg == "-h" || arg == "--help"
}

fn is_option(arg: &str) -> bool {
    arg.starts_with('-') && arg.len() > 1
}

pub fn parse_chat_args<I>(args: I) -> Result<Parsed<ChatArgs>, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = Args {
        inner: args.into_iter(),
    };
    let mut connection = ConnectionArgs::default();
    let mut regex = false;
    let mut stream = false;
    let mut words = Vec::new();

    while let Some(arg) = args.next() {
        if is_help(&arg) {
            return Ok(Parsed::Help);
        }
        match arg.as_str() {
            "--regex" => regex = true,
            "--stream" => stream = true,
            "--" => {
                words.extend(args.by_ref());
                break;
            }
            flag if is_option(flag) => {
                if !connection.accept(flag, &mut args)? {
                    return Err(CliError::UnknownOption(flag.to_string()));
                }
            }
            _ => words.push(arg),
        }
    }

    if regex && stream {
        return Err(CliError::Conflict("--regex", "--stream"));
    }

    let prompt = if words.is_empty() {
        DEFAULT_PROMPT.to_string()
    } else {
        words.join(" ")
    };

    Ok(Parsed::Run(ChatArgs {
        connection,
        regex,
        stream,
        prompt,
    }))
}

pub fn parse_ac_control_args<I>(args: I) -> Result<Parsed<AcControlArgs>, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = Args {
        inner: args.into_iter(),
    };
    let mut connection = ConnectionArgs::default();

    while let Some(arg) = args.next() {
        if is_help(&arg) {
            return Ok(Parsed::Help);
        }
        if !is_option(&arg) {
            return Err(CliError::UnexpectedArgument(arg));
        }
        if !connection.accept(&arg, &mut args)? {
            return Err(CliError::UnknownOption(arg));
        }
    }

    Ok(Parsed::Run(AcControlArgs { connection }))
}

pub fn parse_ats_args<I>(args: I) -> Result<Parsed<AtsArgs>, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = Args {
        inner: args.into_iter(),
    };
    let mut connection = ConnectionArgs::default();
    let mut resume = None;
    let mut job_description = None;
    let mut output = None;

    while let Some(arg) = args.next() {
        if is_help(&arg) {
            return Ok(Parsed::Help);
        }
        match arg.as_str() {
            "-jd" | "--job-description" => {
                job_description = Some(PathBuf::from(args.value_for(&arg)?));
            }
            "-o" | "--output" => output = Some(PathBuf::from(args.value_for(&arg)?)),
            flag if is_option(flag) => {
                if !connection.accept(flag, &mut args)? {
                    return Err(CliError::UnknownOption(flag.to_string()));
                }
            }
            _ if resume.is_none() => resume = Some(PathBuf::from(arg)),
            _ => return Err(CliError::UnexpectedArgument(arg)),
        }
    }

    let resume = resume.ok_or(CliError::MissingArgument("RESUME"))?;
    connection.timeout.get_or_insert(ATS_DEFAULT_TIMEOUT);

    Ok(Parsed::Run(AtsArgs {
        connection,
        resume,
        job_description,
        output,
    }))
}
