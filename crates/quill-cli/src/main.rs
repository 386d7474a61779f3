use anyhow::Result;
use clap::Parser;
use quill_runtime::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

/// Quill configuration language interpreter.
///
/// Reads assignment lines from standard input (or --input), evaluates them
/// and writes the resulting bindings to OUTPUT.
///
/// EXAMPLES:
///     quill out.yaml < app.quill           Evaluate stdin into YAML
///     quill out.json --input app.quill     Read a file, write JSON
///     quill out.txt --format toml          Force the output format
///
/// ENVIRONMENT VARIABLES:
///     QUILL_FORMAT      Default output format (yaml, json, toml)
///     QUILL_SORT_KEYS   Set to '1' to sort output keys
///     QUILL_PROMPT      Set to '0' to suppress the input hint
///     QUILL_JSON        Set to '1' for JSON diagnostics
///     QUILL_LOG         Log filter, e.g. 'debug' or 'quill_runtime=trace'
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(version)]
struct Cli {
    /// File to write the resulting bindings to
    output: PathBuf,

    /// Read configuration from a file instead of standard input
    #[arg(long, short = 'i', value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output format (default: from config, then OUTPUT's extension, then yaml)
    #[arg(long, short = 'f', value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Sort output keys by name
    #[arg(long)]
    sort_keys: bool,

    /// Don't print the input hint
    #[arg(long)]
    no_prompt: bool,

    /// Use this config file instead of searching for quill.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output diagnostics in JSON format
    #[arg(long, env = "QUILL_JSON", value_parser = clap::builder::FalseyValueParser::new())]
    json: bool,

    /// Log evaluation steps to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let args = commands::run::RunArgs {
        output: cli.output,
        input: cli.input,
        format: cli.format,
        sort_keys: cli.sort_keys,
        no_prompt: cli.no_prompt,
        config: cli.config,
        json: cli.json,
    };
    commands::run::run(args)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("QUILL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
