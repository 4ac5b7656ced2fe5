use std::fmt::Write;

use pagefeat_core::features::escape_field;
use pagefeat_core::{PageText, SegmenterOptions, Word};

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

/// Geometry of a word as printed: left edge, baseline (from the top),
/// width and height of the glyph union.
struct WordRow<'a> {
    page: usize,
    word: &'a Word,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

fn rows(texts: &[PageText]) -> impl Iterator<Item = WordRow<'_>> {
    texts.iter().flat_map(|page| {
        page.lines.iter().flat_map(move |line| {
            line.words.iter().map(move |word| {
                let bbox = word.bbox();
                WordRow {
                    page: page.page,
                    word,
                    x: bbox.x0,
                    y: bbox.bottom,
                    width: bbox.width(),
                    height: bbox.height(),
                }
            })
        })
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

fn write_text(out: &mut String, texts: &[PageText]) -> std::fmt::Result {
    writeln!(out, "page\ttext\tx\ty\twidth\theight\tfont\tsize\tspace")?;
    for row in rows(texts) {
        let first = row.word.first_glyph();
        writeln!(
            out,
            "{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{}\t{:.2}\t{:.2}",
            row.page,
            escape_field(&row.word.text),
            row.x,
            row.y,
            row.width,
            row.height,
            escape_field(&first.font),
            first.font_size,
            first.space_width,
        )?;
    }
    Ok(())
}

fn write_json(out: &mut String, texts: &[PageText]) -> Result<(), String> {
    let words: Vec<serde_json::Value> = rows(texts)
        .map(|row| {
            let first = row.word.first_glyph();
            serde_json::json!({
                "page": row.page,
                "text": row.word.text,
                "x": row.x,
                "y": row.y,
                "width": row.width,
                "height": row.height,
                "font": first.font,
                "size": first.font_size,
                "space": first.space_width,
            })
        })
        .collect();
    let json = serde_json::to_string(&words).map_err(|e| e.to_string())?;
    out.push_str(&json);
    out.push('\n');
    Ok(())
}

fn write_csv(out: &mut String, texts: &[PageText]) -> std::fmt::Result {
    writeln!(out, "page,text,x,y,width,height,font,size,space")?;
    for row in rows(texts) {
        let first = row.word.first_glyph();
        writeln!(
            out,
            "{},{},{:.2},{:.2},{:.2},{:.2},{},{:.2},{:.2}",
            row.page,
            csv_escape(&row.word.text),
            row.x,
            row.y,
            row.width,
            row.height,
            csv_escape(&first.font),
            first.font_size,
            first.space_width,
        )?;
    }
    Ok(())
}
