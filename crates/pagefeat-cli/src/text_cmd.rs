use std::fmt::Write;

use pagefeat_core::{PageText, SegmenterOptions};

use crate::cli::{InputArgs, OutputFormat};
use crate::shared::{csv_escape, load_dump, replay_text, run_files, select_pages};

pub fn run(input: &InputArgs, options: &SegmenterOptions) -> Result<(), i32> {
    run_files(&input.files, input.format, |file| {
        let dump = load_dump(file)?;
        let pages = select_pages(&dump, input.pages.as_deref())?;
        let texts = replay_text(&pages, options)?;
        render(&texts, input.format)
    })
}

pub fn render(texts: &[PageText], format: OutputFormat) -> Result<String, String> {
    let mut out = String::new();
    match format {
        OutputFormat::Text => write_text(&mut out, texts).map_err(|e| e.to_string())?,
        OutputFormat::Json => write_json(&mut out, texts)?,
        OutputFormat::Csv => write_csv(&mut out, texts).map_err(|e| e.to_string())?,
    }
    Ok(out)
}

/// One `page<TAB>word` line per word, and an empty line after every line.
fn write_text(out: &mut String, texts: &[PageText]) -> std::fmt::Result {
    for page in texts {
        for line in &page.lines {
            for word in &line.words {
                writeln!(out, "{}\t{}", page.page, word.text)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_json(out: &mut String, texts: &[PageText]) -> Result<(), String> {
    let pages: Vec<serde_json::Value> = texts
        .iter()
        .map(|page| {
            let lines: Vec<serde_json::Value> = page
                .lines
                .iter()
                .map(|line| {
                    serde_json::json!({
                        "text": line.text(),
                        "words": line.words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>(),
                        "top": line.top,
                        "baseline": line.baseline,
                    })
                })
                .collect();
            serde_json::json!({ "page": page.page, "lines": lines })
        })
        .collect();
    let json = serde_json::to_string(&pages).map_err(|e| e.to_string())?;
    out.push_str(&json);
    out.push('\n');
    Ok(())
}

fn write_csv(out: &mut String, texts: &[PageText]) -> std::fmt::Result {
    writeln!(out, "page,line,text")?;
    for page in texts {
        for (i, line) in page.lines.iter().enumerate() {
            writeln!(out, "{},{},{}", page.page, i + 1, csv_escape(&line.text()))?;
        }
    }
    Ok(())
}
