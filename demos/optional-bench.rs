//! Purpose: Developer-only runner for the decode-strategy comparison benchmark.
//! Exports: None (example binary entry point only).
//! Role: Parses flags, installs tracing, and invokes `optional_types::bench`.
//! Invariants: Not part of the library API; built via `cargo run --example optional-bench`.
//! Invariants: Errors are emitted as JSON on stderr unless stderr is a terminal.
use std::io::{self, IsTerminal};

use clap::{Args, Parser};
use tracing_subscriber::EnvFilter;

use optional_types::bench::{self, BenchArgs, BenchFormat, DEFAULT_BODY};
use optional_types::error::{Error, to_exit_code};

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), Error> {
    let cli = BenchCli::parse();
    let format = BenchFormat::parse(&cli.options.format)?;
    bench::run_bench(
        BenchArgs {
            iterations: cli.options.iterations,
            body: cli.options.body,
            format,
        },
        env!("CARGO_PKG_VERSION"),
    )
}

#[derive(Parser)]
#[command(
    name = "optional-bench",
    version,
    about = "Compare struct, map, Optional and Option decoding",
    long_about = None
)]
struct BenchCli {
    #[command(flatten)]
    options: BenchOptions,
}

#[derive(Args)]
struct BenchOptions {
    #[arg(long, default_value_t = 100_000, help = "Decode iterations per strategy")]
    iterations: u64,
    #[arg(long, default_value = DEFAULT_BODY, help = "JSON document to decode")]
    body: String,
    #[arg(long, default_value = "both", help = "Output format: json|table|both")]
    format: String,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn emit_error(err: &Error) {
    eprintln!("{}", err.render(io::stderr().is_terminal()));
}
