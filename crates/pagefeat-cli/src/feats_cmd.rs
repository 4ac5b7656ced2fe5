use std::fmt::Write;

use pagefeat_core::{FeatureRecord, PageEvents, feature_records};

use crate::cli::{InputArgs, OutputFormat};
use crate::shared::{ProgressReporter, csv_escape, load_dump, run_files, select_pages};

pub fn run(input: &InputArgs) -> Result<(), i32> {
    run_files(&input.files, input.format, |file| {
        let dump = load_dump(file)?;
        let pages = select_pages(&dump, input.pages.as_deref())?;
        let records = page_records(&pages)?;
        render(&records, input.format)
    })
}

/// Feature records of each selected page.
///
/// A page that breaks the glyph/draw interleaving contract fails the whole
/// document.
pub fn page_records(pages: &[&PageEvents]) -> Result<Vec<(usize, Vec<FeatureRecord>)>, String> {
    let progress = ProgressReporter::new(pages.len());
    let mut out = Vec::with_capacity(pages.len());
    for (i, page) in pages.iter().enumerate() {
        progress.report(i + 1);
        let records = feature_records(page).map_err(|e| e.to_string())?;
        out.push((page.page, records));
    }
    progress.finish();
    Ok(out)
}

pub fn render(pages: &[(usize, Vec<FeatureRecord>)], format: OutputFormat) -> Result<String, String> {
    let mut out = String::new();
    match format {
        OutputFormat::Text => {
            for record in pages.iter().flat_map(|(_, records)| records) {
                writeln!(out, "{record}").map_err(|e| e.to_string())?;
            }
        }
        OutputFormat::Json => {
            let value: Vec<serde_json::Value> = pages
                .iter()
                .map(|(page, records)| serde_json::json!({ "page": page, "records": records }))
                .collect();
            let json = serde_json::to_string(&value).map_err(|e| e.to_string())?;
            out.push_str(&json);
            out.push('\n');
        }
        OutputFormat::Csv => {
            for record in pages.iter().flat_map(|(_, records)| records) {
                let line = record.to_string();
                let fields: Vec<String> = line.split('\t').map(csv_escape).collect();
                writeln!(out, "{}", fields.join(",")).map_err(|e| e.to_string())?;
            }
        }
    }
    Ok(out)
}
