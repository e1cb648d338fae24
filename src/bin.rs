//! Binary entry point for `bug-reporter`.
//!
//! This module provides the command-line interface for bug-reporter with options
//! for configuration file paths and logging verbosity. It either serves the
//! submission endpoint over HTTP or handles a single serverless function event.

use std::path::PathBuf;

use bug_reporter::{
    base::{config::Config, types::Void},
    host::function::FunctionEvent,
};
use clap::{Parser, Subcommand};
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use tokio::io::AsyncReadExt;
use tracing_subscriber::{Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Bug-reporter – turns landing page bug reports into GitHub issues.
///
/// Configuration can come from `config.toml` or `BUG_REPORTER_*` environment
/// variables. At minimum, `BUG_REPORTER_GITHUB_TOKEN` and
/// `BUG_REPORTER_GITHUB_REPO` must be set for submissions to succeed.
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
struct Args {
    /// Override the config file path (optional).
    ///
    /// By default, the service will look for a config file at `.hidden/config.toml`
    /// in the current directory.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Export spans to an OTLP collector over HTTP.
    ///
    /// The endpoint is taken from the standard `OTEL_EXPORTER_OTLP_*` variables.
    #[arg(long)]
    otlp: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the submission endpoint over HTTP (default).
    Serve,
    /// Handle one serverless function event and print the response as JSON.
    Invoke {
        /// Path to the event JSON; reads stdin when omitted.
        #[arg(short, long)]
        event: Option<PathBuf>,
    },
}

/// Main entry point for the bug-reporter binary.
///
/// Sets up logging based on verbosity, loads configuration, and runs the selected command.
#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer.
    // Logs go to stderr so that `invoke` can print its response on stdout.

    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    // Prepare the otlp layer.

    let otel = if args.otlp {
        let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
        let tracer = opentelemetry_sdk::trace::SdkTracerProvider::builder().with_simple_exporter(exporter).build().tracer("bug-reporter");
        Some(tracing_opentelemetry::layer().with_tracer(tracer).boxed())
    } else {
        None
    };

    tracing_subscriber::registry().with(otel).with(level_filter).with(stderr).init();

    let config = Config::load(args.config.as_deref())?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => bug_reporter::start(config).await,
        Command::Invoke { event } => {
            let raw = match event {
                Some(path) => tokio::fs::read_to_string(path).await?,
                None => {
                    let mut raw = String::new();
                    tokio::io::stdin().read_to_string(&mut raw).await?;
                    raw
                }
            };

            let event: FunctionEvent = serde_json::from_str(&raw)?;
            let response = bug_reporter::invoke(config, event).await?;

            println!("{}", serde_json::to_string_pretty(&response)?);

            Ok(())
        }
    }
}
