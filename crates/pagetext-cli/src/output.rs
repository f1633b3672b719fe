use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use pagetext_core::ErrorKind;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the rendered extraction result followed by a newline.
pub fn print_text(w: &mut dyn Write, text: &str) -> std::io::Result<()> {
    writeln!(w, "{}", text)?;
    w.flush()
}

/// Print the completion notice after the output file is written.
pub fn print_completion(w: &mut dyn Write, output: &Path) -> std::io::Result<()> {
    writeln!(w, "\n\n=== Text saved to {} ===", output.display())?;
    w.flush()
}

fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Open => "could not open input",
        ErrorKind::Read => "could not read input",
        ErrorKind::Parse => "input is not a readable PDF",
        ErrorKind::Encrypted => "input is encrypted",
        ErrorKind::Page => "a page could not be extracted",
    }
}

/// Print the strict-mode failure notice to stderr.
pub fn print_strict_failure(
    w: &mut dyn Write,
    kind: ErrorKind,
    input: &Path,
    color: ColorMode,
) -> std::io::Result<()> {
    let msg = format!("extraction failed: {} ({})", kind_label(kind), input.display());
    if color.enabled() {
        writeln!(w, "{}", msg.red())?;
    } else {
        writeln!(w, "{}", msg)?;
    }
    Ok(())
}
