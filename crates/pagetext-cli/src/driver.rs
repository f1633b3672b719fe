use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use pagetext_core::{
    Config, ErrorKind, ExtractError, ExtractProgress, ExtractedText, PdfBackend,
    extract_text_with_progress, render_result,
};

use crate::output;

/// What happened during a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Set when extraction failed and the error text was saved instead.
    pub failure: Option<ErrorKind>,
    pub bytes_written: usize,
}

/// Extraction phase: the input handle is opened and released in here.
pub fn extract(
    config: &Config,
    backend: &dyn PdfBackend,
    on_progress: &mut dyn FnMut(ExtractProgress),
) -> Result<ExtractedText, ExtractError> {
    extract_text_with_progress(&config.input, backend, on_progress)
}

/// Output phase: print the result to `stdout`, save it to `config.output`
/// and print the completion notice.
///
/// Extraction failures are rendered as `"Error: ..."` and saved like any
/// other text. Failing to write the output file is returned as an error.
pub fn emit(
    config: &Config,
    result: &Result<ExtractedText, ExtractError>,
    stdout: &mut dyn Write,
) -> anyhow::Result<RunSummary> {
    let failure = result.as_ref().err().map(|e| e.kind());
    let text = render_result(result);

    output::print_text(stdout, &text)?;

    write_output(&config.output, &text)
        .with_context(|| format!("failed to write {}", config.output.display()))?;
    tracing::info!(path = %config.output.display(), bytes = text.len(), "saved text");

    output::print_completion(stdout, &config.output)?;

    Ok(RunSummary {
        failure,
        bytes_written: text.len(),
    })
}

/// Create or truncate `path` and write `text` to it; the handle is
/// closed when this returns.
fn write_output(path: &Path, text: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()
}
