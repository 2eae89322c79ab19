//! One-shot form submission from the command line.
//!
//! Builds a payload from repeated `-F name=value` arguments, submits it, and
//! prints a single line for whichever outcome comes back.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use formrelay_lib::FormClient;
use formrelay_lib::Outcome;
use formrelay_lib::Payload;
use simplelog::ColorChoice;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::TermLogger;
use simplelog::TerminalMode;

#[derive(Parser)]
#[command(name = "formrelay")]
#[command(about = "Submit a form payload and print the outcome.")]
struct Args {
    /// Site base URL that relative action targets resolve against
    #[arg(long)]
    base_url: String,

    /// Form action target (absolute, or relative to the base URL)
    #[arg(long, default_value = "/")]
    action: String,

    /// Form field as name=value (repeatable)
    #[arg(short = 'F', long = "field", value_name = "NAME=VALUE")]
    fields: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_fields(raw: &[String]) -> Result<Vec<(String, String)>, String> {
    raw.iter()
        .map(|field| {
            field
                .split_once('=')
                .map(|(name, value)| (name.to_owned(), value.to_owned()))
                .ok_or_else(|| format!("invalid field `{field}`, expected NAME=VALUE"))
        })
        .collect()
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .expect("Failed to initialize logger");

    let fields = match parse_fields(&args.fields) {
        Ok(fields) => fields,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::from(2);
        }
    };

    let mut builder = FormClient::builder().base_url(args.base_url);
    if let Some(seconds) = args.timeout {
        builder = builder.timeout(Duration::from_secs(seconds));
    }
    let client = builder.build();

    match client.submit_payload(&args.action, Payload::from_pairs(fields)).await {
        Ok(Outcome::Redirect(url)) => println!("redirect to: {url}"),
        Ok(Outcome::Success) => println!("success"),
        Ok(Outcome::ValidationError(detail)) => println!("validation error: {detail}"),
        Ok(Outcome::Unrecognized) => println!("unrecognized response"),
        Err(err) => {
            log::debug!("submission failed: {err:?}");
            eprintln!("submission failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
