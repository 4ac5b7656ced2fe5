use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use pagefeat_core::{DocumentReplayer, PageEvents, PageText, ReplayOptions, SegmenterOptions};
use pagefeat_parse::{EventDump, read_file};

use crate::cli::OutputFormat;
use crate::page_range::parse_page_range;

/// Read an event dump with user-friendly error messages.
pub fn load_dump(file: &Path) -> Result<EventDump, String> {
    if !file.exists() {
        return Err("file not found".to_string());
    }

    let dump = read_file(file).map_err(|e| format!("failed to read event dump: {e}"))?;
    for warning in &dump.warnings {
        tracing::warn!(file = %file.display(), %warning, "skipped record");
    }
    Ok(dump)
}

/// Resolve an optional page range string against the pages of a dump.
///
/// If `pages` is `None`, every page of the dump is selected. Pages named by
/// the range but absent from the dump are silently skipped.
pub fn select_pages<'a>(
    dump: &'a EventDump,
    pages: Option<&str>,
) -> Result<Vec<&'a PageEvents>, String> {
    let Some(range) = pages else {
        return Ok(dump.pages.iter().collect());
    };
    let last_page = dump.pages.last().map_or(0, |p| p.page);
    let wanted = parse_page_range(range, last_page)?;
    Ok(dump
        .pages
        .iter()
        .filter(|p| wanted.binary_search(&p.page).is_ok())
        .collect())
}

/// Segment the text of the given pages, reporting progress on a TTY.
pub fn replay_text(pages: &[&PageEvents], options: &SegmenterOptions) -> Result<Vec<PageText>, String> {
    let progress = ProgressReporter::new(pages.len());
    let mut replayer = DocumentReplayer::new(ReplayOptions {
        segmenter: options.clone(),
        ..ReplayOptions::default()
    });

    let mut texts = Vec::with_capacity(pages.len());
    for (i, page) in pages.iter().enumerate() {
        progress.report(i + 1);
        let text = replayer.replay(page).map_err(|e| e.to_string())?;
        for warning in &text.warnings {
            tracing::warn!(%warning, "segmentation");
        }
        texts.push(text);
    }
    progress.finish();
    Ok(texts)
}

/// Render every input file and print the results in argument order.
///
/// With the `parallel` feature, files are rendered concurrently. A failing
/// file is reported on stderr; the remaining files are still printed and
/// the exit code is 1.
pub fn run_files<F>(files: &[PathBuf], format: OutputFormat, render: F) -> Result<(), i32>
where
    F: Fn(&Path) -> Result<String, String> + Sync,
{
    let outputs = render_all(files, &render);
    let with_headers = files.len() > 1 && format != OutputFormat::Json;
    let mut failed = false;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (file, output) in files.iter().zip(outputs) {
        match output {
            Ok(text) => {
                let written = if with_headers {
                    writeln!(out, "# {}", file.display()).and_then(|_| out.write_all(text.as_bytes()))
                } else {
                    out.write_all(text.as_bytes())
                };
                if let Err(e) = written {
                    eprintln!("Error: failed to write output: {e}");
                    return Err(1);
                }
            }
            Err(message) => {
                eprintln!("Error: {}: {message}", file.display());
                failed = true;
            }
        }
    }
    if failed { Err(1) } else { Ok(()) }
}

#[cfg(feature = "parallel")]
fn render_all<F>(files: &[PathBuf], render: &F) -> Vec<Result<String, String>>
where
    F: Fn(&Path) -> Result<String, String> + Sync,
{
    use rayon::prelude::*;

    files.par_iter().map(|file| render(file.as_path())).collect()
}

#[cfg(not(feature = "parallel"))]
fn render_all<F>(files: &[PathBuf], render: &F) -> Vec<Result<String, String>>
where
    F: Fn(&Path) -> Result<String, String> + Sync,
{
    files.iter().map(|file| render(file.as_path())).collect()
}

/// Escape a string for CSV output.
///
/// If the text contains commas, double quotes, or newlines, wraps it in
/// double quotes and escapes any internal double quotes by doubling them.
pub fn csv_escape(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// A progress reporter that prints "Processing page N/M..." to stderr,
/// but only when stderr is connected to a TTY (terminal).
pub struct ProgressReporter {
    total: usize,
    is_tty: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter for `total` pages.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            is_tty: io::stderr().is_terminal(),
        }
    }

    /// Report progress for page `current` (1-indexed).
    pub fn report(&self, current: usize) {
        if self.is_tty {
            eprint!("\rProcessing page {}/{}...", current, self.total);
            let _ = io::stderr().flush();
        }
    }

    /// Clear the progress line (if TTY).
    pub fn finish(&self) {
        if self.is_tty {
            eprint!("\r{}\r", " ".repeat(40));
            let _ = io::stderr().flush();
        }
    }
}
