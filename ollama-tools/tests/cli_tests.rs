use std::path::PathBuf;
use std::time::Duration;

use ollama_tools::cli::{
    parse_ac_control_args, parse_ats_args, parse_chat_args, AtsArgs, ChatArgs, CliError,
    ConnectionArgs, Parsed, ATS_DEFAULT_TIMEOUT, DEFAULT_PROMPT,
};
use ollama_tools::cli::{chat_usage, usage_error, EXIT_USAGE};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn chat(list: &[&str]) -> ChatArgs {
    match parse_chat_args(args(list)).unwrap() {
        Parsed::Run(args) => args,
        Parsed::Help => panic!("unexpected help for {:?}", list),
    }
}

fn ats(list: &[&str]) -> AtsArgs {
    match parse_ats_args(args(list)).unwrap() {
        Parsed::Run(args) => args,
        Parsed::Help => panic!("unexpected help for {:?}", list),
    }
}

#[test]
fn test_chat_defaults() {
    let parsed = chat(&[]);

    assert_eq!(parsed.prompt, DEFAULT_PROMPT);
    assert!(!parsed.regex);
    assert!(!parsed.stream);
    assert_eq!(parsed.connection, ConnectionArgs::default());
}

#[test]
fn test_chat_prompt_words_are_joined() {
    let parsed = chat(&["why", "is", "the", "sky", "blue?", "--regex"]);

    assert_eq!(parsed.prompt, "why is the sky blue?");
    assert!(parsed.regex);
}

#[test]
fn test_chat_connection_flags() {
    let parsed = chat(&[
        "-m",
        "llama3",
        "--api-key",
        "secret",
        "--host",
        "http://localhost:11434",
        "--timeout",
        "2.5",
        "--stream",
        "hi",
    ]);

    assert_eq!(
        parsed.connection,
        ConnectionArgs {
            model: Some("llama3".to_string()),
            api_key: Some("secret".to_string()),
            host: Some("http://localhost:11434".to_string()),
            timeout: Some(Duration::from_millis(2500)),
        }
    );
    assert!(parsed.stream);
    assert_eq!(parsed.prompt, "hi");
}

#[test]
fn test_chat_double_dash_ends_options() {
    let parsed = chat(&["--", "--regex", "-m"]);

    assert_eq!(parsed.prompt, "--regex -m");
    assert!(!parsed.regex);
}

#[test]
fn test_chat_errors() {
    assert_eq!(
        parse_chat_args(args(&["--regex", "--stream"])),
        Err(CliError::Conflict("--regex", "--stream"))
    );
    assert_eq!(
        parse_chat_args(args(&["--verbose"])),
        Err(CliError::UnknownOption("--verbose".to_string()))
    );
    assert_eq!(
        parse_chat_args(args(&["hello", "--model"])),
        Err(CliError::MissingValue("--model".to_string()))
    );
}

#[test]
fn test_timeout_must_be_positive_seconds() {
    for bad in ["0", "-1", "soon", "NaN", "inf"] {
        assert_eq!(
            parse_chat_args(args(&["--timeout", bad])),
            Err(CliError::InvalidTimeout(bad.to_string())),
            "accepted {}",
            bad
        );
    }
}

#[test]
fn test_help_wins_anywhere() {
    assert_eq!(parse_chat_args(args(&["hi", "-h"])), Ok(Parsed::Help));
    assert_eq!(parse_ac_control_args(args(&["--help"])), Ok(Parsed::Help));
    assert_eq!(parse_ats_args(args(&["--help"])), Ok(Parsed::Help));
}

#[test]
fn test_ac_control_accepts_only_connection_flags() {
    match parse_ac_control_args(args(&["-k", "secret"])).unwrap() {
        Parsed::Run(parsed) => assert_eq!(parsed.connection.api_key.as_deref(), Some("secret")),
        Parsed::Help => panic!("unexpected help"),
    }
    assert_eq!(
        parse_ac_control_args(args(&["25"])),
        Err(CliError::UnexpectedArgument("25".to_string()))
    );
    assert_eq!(
        parse_ac_control_args(args(&["--stream"])),
        Err(CliError::UnknownOption("--stream".to_string()))
    );
}

#[test]
fn test_ats_arguments() {
    let parsed = ats(&[
        "resume.pdf",
        "-jd",
        "job.txt",
        "--output",
        "reports/out.txt",
    ]);

    assert_eq!(parsed.resume, PathBuf::from("resume.pdf"));
    assert_eq!(parsed.job_description, Some(PathBuf::from("job.txt")));
    assert_eq!(parsed.output, Some(PathBuf::from("reports/out.txt")));
    assert_eq!(parsed.connection.timeout, Some(ATS_DEFAULT_TIMEOUT));
}

#[test]
fn test_ats_explicit_timeout_overrides_default() {
    let parsed = ats(&["--timeout", "5", "--job-description", "jd.docx", "cv.docx"]);

    assert_eq!(parsed.connection.timeout, Some(Duration::from_secs(5)));
    assert_eq!(parsed.job_description, Some(PathBuf::from("jd.docx")));
    assert_eq!(parsed.output, None);
}

#[test]
fn test_ats_errors() {
    assert_eq!(
        parse_ats_args(args(&["-o", "out.txt"])),
        Err(CliError::MissingArgument("RESUME"))
    );
    assert_eq!(
        parse_ats_args(args(&["a.pdf", "b.pdf"])),
        Err(CliError::UnexpectedArgument("b.pdf".to_string()))
    );
    assert_eq!(
        parse_ats_args(args(&["a.pdf", "-jd"])),
        Err(CliError::MissingValue("-jd".to_string()))
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(
        CliError::MissingArgument("RESUME").to_string(),
        "missing required argument <RESUME>"
    );
    assert_eq!(
        CliError::Conflict("--regex", "--stream").to_string(),
        "'--regex' cannot be used with '--stream'"
    );
}

#[test]
fn test_usage_error_names_the_problem_then_shows_usage() {
    let err = parse_chat_args(args(&["--verbose"])).unwrap_err();
    let rendered = usage_error(&err, &chat_usage());

    assert!(rendered.starts_with("error: unknown option '--verbose'\n\n"));
    assert!(rendered.ends_with(&chat_usage()));
    assert_eq!(EXIT_USAGE, 2);
}
