use std::fmt::Write;

use pagefeat_core::{ImageRegion, RegionFilterOptions, collect};
use pagefeat_parse::EventDump;

use crate::cli::{InputArgs, OutputFormat};
use crate::shared::{load_dump, run_files, select_pages};

pub fn run(input: &InputArgs, options: &RegionFilterOptions) -> Result<(), i32> {
    run_files(&input.files, input.format, |file| {
        let dump = load_dump(file)?;
        let regions = filtered_regions(&dump, input.pages.as_deref(), options)?;
        render(&regions, input.format)
    })
}

/// Collect and filter the regions of the whole document, then keep the
/// selected pages. Duplicate detection always sees every page, and text
/// events never affect the result.
pub fn filtered_regions(
    dump: &EventDump,
    pages: Option<&str>,
    options: &RegionFilterOptions,
) -> Result<Vec<ImageRegion>, String> {
    let selected: Vec<usize> = select_pages(dump, pages)?.iter().map(|p| p.page).collect();
    let regions = collect(&dump.pages, options);

    tracing::debug!(kept = regions.len(), pages = dump.pages.len(), "image regions");

    Ok(regions
        .into_iter()
        .filter(|r| selected.contains(&r.page))
        .collect())
}

pub fn render(regions: &[ImageRegion], format: OutputFormat) -> Result<String, String> {
    let mut out = String::new();
    match format {
        OutputFormat::Text => {
            for r in regions {
                writeln!(out, "{}\t{}\t{}\t{}\t{}", r.page, r.x, r.y, r.width, r.height)
                    .map_err(|e| e.to_string())?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string(regions).map_err(|e| e.to_string())?;
            out.push_str(&json);
            out.push('\n');
        }
        OutputFormat::Csv => {
            out.push_str("page,x,y,width,height\n");
            for r in regions {
                writeln!(out, "{},{},{},{},{}", r.page, r.x, r.y, r.width, r.height)
                    .map_err(|e| e.to_string())?;
            }
        }
    }
    Ok(out)
}
