use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pagetext_core::{Overrides, config_file, resolve_config};
use pagetext_pdf_mupdf::MupdfBackend;
use tracing_subscriber::EnvFilter;

mod driver;
mod output;
mod progress;

use output::ColorMode;

/// Exit status used by `--strict` when the input could not be extracted.
const EXIT_EXTRACTION_FAILED: u8 = 2;

/// Extract the text of a PDF, print it and save it to a text file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// PDF to read [default: Full_stack_dev_assignment.pdf]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Text file to write [default: assignment_content.txt]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Exit with status 2 when extraction fails (the error text is still saved)
    #[arg(long)]
    strict: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    // Resolve configuration: CLI flags > env vars > config file > defaults
    let file_config = config_file::load_config();
    let config = resolve_config(
        Overrides {
            input: cli.input,
            output: cli.output,
            strict: cli.strict,
        },
        &file_config,
        |key| std::env::var(key).ok(),
    );
    tracing::debug!(?config, "resolved configuration");

    let color = ColorMode(!cli.no_color && std::io::stderr().is_terminal());
    let input_name = config
        .input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| config.input.display().to_string());

    let bar = progress::ExtractionBar::new(&input_name);
    let result = driver::extract(&config, &MupdfBackend::new(), &mut |event| bar.update(&event));
    bar.clear();

    let summary = driver::emit(&config, &result, &mut std::io::stdout().lock())?;
    tracing::debug!(bytes = summary.bytes_written, failed = summary.failure.is_some(), "run finished");

    if let Some(kind) = summary.failure
        && config.strict
    {
        output::print_strict_failure(&mut std::io::stderr(), kind, &config.input, color)?;
        return Ok(ExitCode::from(EXIT_EXTRACTION_FAILED));
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
