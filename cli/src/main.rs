//! The `httpclient` command.
//!
//! - `httpclient GET <url>` - GET with no form fields
//! - `httpclient POST <url>` - POST, form fields from `--data`
//! - `httpclient <url>` - GET
//!
//! Any method other than exactly `POST` falls back to GET. Run without
//! arguments, the command prints its help and exits with status 1.

use std::process;
use std::time::Duration;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use rawhttp_core::{ClientConfig, HttpClient};

mod logger;

#[derive(Parser, Debug)]
#[command(
    name = "httpclient",
    version,
    about = "Send one GET or POST over a raw TCP socket",
    override_usage = "httpclient [OPTIONS] [GET|POST] <URL>"
)]
struct Cli {
    /// Optional method followed by the target URL
    #[arg(value_name = "TARGET", num_args = 1..=2, required = true)]
    target: Vec<String>,

    /// Form field sent with POST, as key=value (repeatable)
    #[arg(short, long = "data", value_name = "KEY=VALUE", value_parser = parse_field)]
    data: Vec<(String, String)>,

    /// Print the response as a JSON object instead of code and body lines
    #[arg(long)]
    json: bool,

    /// Fail when the server stays silent for this many seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Log level for diagnostics on stderr
    #[arg(long = "log-level", env = "RAWHTTP_LOG", default_value = "warn")]
    log_level: String,

    /// Disable colorized log output
    #[arg(long = "no-color")]
    no_color: bool,
}

impl Cli {
    /// `(method, url)`, with GET when no method was given.
    fn method_and_url(&self) -> (&str, &str) {
        match self.target.as_slice() {
            [method, url] => (method.as_str(), url.as_str()),
            [url] => ("GET", url.as_str()),
            _ => unreachable!("clap enforces one or two positional values"),
        }
    }
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got {s:?}")),
    }
}

fn main() -> Result<()> {
    if std::env::args_os().len() <= 1 {
        Cli::command().print_help()?;
        println!();
        process::exit(1);
    }

    let cli = Cli::parse();
    logger::init(&cli.log_level, !cli.no_color)?;

    let (method, url) = cli.method_and_url();
    log::debug!("{method} {url} with {} form field(s)", cli.data.len());

    let client = HttpClient::with_config(ClientConfig {
        read_timeout: cli.timeout.map(Duration::from_secs),
        echo: !cli.json,
    });
    let args = (!cli.data.is_empty()).then_some(cli.data.as_slice());
    let response = client.command(url, method, args)?;

    if cli.json {
        println!("{}", serde_json::to_string(&response)?);
    }
    Ok(())
}
