/// tokpress command-line tool — reduce the estimated token cost of text
/// destined for an LLM context window.
///
/// # Command overview
///
/// ```text
/// tokpress <COMMAND> [OPTIONS]
///
/// Commands:
///   json-minify    Minify a JSON document or NDJSON stream
///   diff           Unified diff between two files with normalized headers
///   strip-fillers  Remove filler words and verbose phrasing by preset
///   optimize       Run the full budget-aware optimization pipeline
///   estimate       Print the heuristic token estimate for an input
///   classify       Print the detected content type as JSON
///   sentry         Fail when an input exceeds a hard token budget
///   help           Print help information
///
/// Global options:
///   -v, --verbose    Write pass-level debug logs to stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// Commands that take `[file]` read standard input when no path is given,
/// so the tool drops into shell pipelines.
///
/// # Exit codes
///
/// | Code | Meaning                                   |
/// |------|-------------------------------------------|
/// | 0    | Success                                   |
/// | 1    | I/O failure or input over the size ceiling|
/// | 2    | Invalid JSON / NDJSON input               |
/// | 3    | Sentry: input exceeds the token budget    |
///
/// Reports (`--report`) and sentry advice are JSON on stderr; stdout only
/// ever carries output text, so both streams pipe cleanly.
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokpress_passes::MinifyError;
use tokpress_scan::ScanError;

mod cmd_classify;
mod cmd_diff;
mod cmd_estimate;
mod cmd_json_minify;
mod cmd_optimize;
mod cmd_sentry;
mod cmd_strip_fillers;
mod report;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The tokpress token-reduction tool.
#[derive(Parser)]
#[command(name = "tokpress", version, about = "Deterministic token reduction for LLM prompts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Write pass-level debug logs to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Minify a JSON document or NDJSON stream.
    JsonMinify(JsonMinifyArgs),
    /// Produce a unified diff between two files.
    Diff(DiffArgs),
    /// Remove filler words and verbose phrasing.
    StripFillers(StripFillersArgs),
    /// Run the full optimization pipeline.
    Optimize(OptimizeArgs),
    /// Print the heuristic token estimate.
    Estimate(EstimateArgs),
    /// Print the detected content type as JSON.
    Classify(ClassifyArgs),
    /// Exit non-zero when the input exceeds a hard token budget.
    Sentry(SentryArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `tokpress json-minify`.
#[derive(clap::Args)]
pub struct JsonMinifyArgs {
    /// Input file; standard input when omitted.
    pub file: Option<PathBuf>,

    /// Keep the input's dominant EOL style in the output.
    #[arg(long)]
    pub keep_eol: bool,

    /// Write output to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Emit a JSON savings report on stderr.
    #[arg(long)]
    pub report: bool,
}

/// Arguments for `tokpress diff`.
///
/// Headers are always `--- before` / `+++ after`; the file names never
/// appear in the output, which keeps diffs deterministic and cheap.
#[derive(clap::Args)]
pub struct DiffArgs {
    /// The "before" file.
    pub before: PathBuf,

    /// The "after" file.
    pub after: PathBuf,

    /// Write output to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Keep the "after" file's dominant EOL style in the output.
    #[arg(long)]
    pub keep_eol: bool,

    /// Emit a JSON savings report on stderr (diff vs. full "after" text).
    #[arg(long)]
    pub report: bool,
}

/// Arguments for `tokpress strip-fillers`.
#[derive(clap::Args)]
pub struct StripFillersArgs {
    /// Input file; standard input when omitted.
    pub file: Option<PathBuf>,

    /// Preset: conservative | standard | aggressive | ultra.
    /// Unrecognised names fall back to standard.
    #[arg(long, default_value = "standard")]
    pub preset: String,

    /// Keep the input's dominant EOL style in the output.
    #[arg(long)]
    pub keep_eol: bool,

    /// Emit a JSON savings report on stderr.
    #[arg(long)]
    pub report: bool,
}

/// Arguments for `tokpress optimize`.
///
/// ```text
/// ┌─────────────────────┬────────────────────────────────────────────┐
/// │ Flag                │ Effect                                     │
/// ├─────────────────────┼────────────────────────────────────────────┤
/// │ --preset            │ Filler ladder ceiling (default standard)   │
/// │ --target-savings N  │ Budget: stop at N percent saved            │
/// │ --max-tokens N      │ Budget: stop at N estimated tokens         │
/// │ --no-semantic       │ Disable the semantic compressor            │
/// │ --no-whitespace     │ Disable the whitespace compressor          │
/// │ --no-duplicates     │ Disable the duplicate remover              │
/// │ --no-summarization  │ Disable the summarizer                     │
/// │ --no-context        │ Disable context-specific optimizers        │
/// │ --report            │ JSON savings report on stderr              │
/// └─────────────────────┴────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct OptimizeArgs {
    /// Input file; standard input when omitted.
    pub file: Option<PathBuf>,

    /// Preset: conservative | standard | aggressive | ultra.
    #[arg(long, default_value = "standard")]
    pub preset: String,

    /// Stop once savings reach this percentage.
    #[arg(long)]
    pub target_savings: Option<f64>,

    /// Stop once the token estimate drops to this ceiling.
    #[arg(long)]
    pub max_tokens: Option<u32>,

    #[arg(long)]
    pub no_semantic: bool,

    #[arg(long)]
    pub no_whitespace: bool,

    #[arg(long)]
    pub no_duplicates: bool,

    #[arg(long)]
    pub no_summarization: bool,

    #[arg(long)]
    pub no_context: bool,

    /// Emit a JSON savings report on stderr.
    #[arg(long)]
    pub report: bool,
}

/// Arguments for `tokpress estimate`.
#[derive(clap::Args)]
pub struct EstimateArgs {
    /// Input file; standard input when omitted.
    pub file: Option<PathBuf>,

    /// Model ratio to apply; unknown names fall back to generic.
    #[arg(long, default_value = "generic")]
    pub model: String,

    /// Apply the symbol-density bump for diffs and patches.
    #[arg(long)]
    pub diff: bool,
}

/// Arguments for `tokpress classify`.
#[derive(clap::Args)]
pub struct ClassifyArgs {
    /// Input file; standard input when omitted.
    pub file: Option<PathBuf>,
}

/// Arguments for `tokpress sentry`.
///
/// Exits 3 with suggested actions as JSON on stderr when the estimate
/// exceeds the budget; exits 0 otherwise. Built to gate tooling
/// pipelines, so the check itself never mutates the input.
#[derive(clap::Args)]
pub struct SentryArgs {
    /// Input file; standard input when omitted.
    pub file: Option<PathBuf>,

    /// Hard token budget.
    #[arg(long)]
    pub max_tokens: u32,

    /// Model ratio to apply.
    #[arg(long, default_value = "generic")]
    pub model: String,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    let result = match cli.command {
        Commands::JsonMinify(args) => cmd_json_minify::run(&args),
        Commands::Diff(args) => cmd_diff::run(&args),
        Commands::StripFillers(args) => cmd_strip_fillers::run(&args),
        Commands::Optimize(args) => cmd_optimize::run(&args),
        Commands::Estimate(args) => cmd_estimate::run(&args),
        Commands::Classify(args) => cmd_classify::run(&args),
        Commands::Sentry(args) => cmd_sentry::run(&args),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(exit_code_for(&e));
        }
    }
}

/// Maps an error chain to the documented exit codes: size violations are
/// 1, malformed JSON/NDJSON is 2, anything else (I/O and friends) is 1.
fn exit_code_for(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(minify) = cause.downcast_ref::<MinifyError>() {
            return match minify {
                MinifyError::InputTooLarge { .. } => 1,
                MinifyError::InvalidJson { .. } | MinifyError::InvalidNdjson { .. } => 2,
            };
        }
        if cause.downcast_ref::<ScanError>().is_some() {
            return 1;
        }
    }
    1
}

/// Reads the command input: the file when a path was given, otherwise
/// standard input to EOF.
pub(crate) fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
        }
        None => std::io::read_to_string(std::io::stdin()).context("cannot read standard input"),
    }
}

/// Writes output to the given path, or to stdout with a trailing newline.
pub(crate) fn write_output(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("cannot write {}", path.display()))
        }
        None => {
            // Don't double the final newline of text that already has one.
            if text.ends_with('\n') {
                print!("{text}");
            } else {
                println!("{text}");
            }
            Ok(())
        }
    }
}
