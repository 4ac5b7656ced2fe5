//! Reading whole event dumps into per-page event lists.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use pagefeat_core::{ExtractWarning, ExtractWarningCode, PageEvents};

use crate::error::ParseError;
use crate::records::{Record, is_blank_or_comment, parse_record};

/// Pages of an event dump plus any non-fatal findings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDump {
    /// Pages in dump order, with strictly increasing indices.
    pub pages: Vec<PageEvents>,
    /// Records that were skipped, such as unknown event kinds.
    pub warnings: Vec<ExtractWarning>,
}

impl EventDump {
    /// Number of pages in the dump.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Read an event dump from any buffered reader.
///
/// # Errors
///
/// [`ParseError::Syntax`] for malformed records, events before the first
/// `PAGE` record and page indices that do not increase;
/// [`ParseError::Io`] when reading fails.
pub fn read_events<R: BufRead>(reader: R) -> Result<EventDump, ParseError> {
    let mut dump = EventDump::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let line = line.trim_end_matches('\r');
        if is_blank_or_comment(line) {
            continue;
        }

        let current = dump.pages.last().map(|p| p.page);
        match parse_record(line_no, line, current.unwrap_or(0))? {
            Record::Page { index, height } => {
                if let Some(previous) = current {
                    if index <= previous {
                        return Err(ParseError::syntax(
                            line_no,
                            format!("page {index} does not follow page {previous}"),
                        ));
                    }
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(page = index, height, "page record");
                dump.pages.push(PageEvents::new(index, height));
            }
            Record::Event { cursor, event } => {
                current_page(&mut dump, line_no)?.push(cursor, event);
            }
            Record::Rect { cursor, corners } => {
                current_page(&mut dump, line_no)?.push_rectangle(cursor, corners);
            }
            Record::Unknown { cursor, kind } => {
                let page = current_page(&mut dump, line_no)?.page;
                #[cfg(feature = "tracing")]
                tracing::warn!(line = line_no, %kind, "skipping unknown event kind");
                dump.warnings.push(
                    ExtractWarning::with_code(
                        ExtractWarningCode::UnsupportedEvent,
                        format!("unknown event kind {kind:?} on line {line_no}"),
                    )
                    .on_page(page)
                    .at_cursor(cursor),
                );
            }
        }
    }
    Ok(dump)
}

fn current_page(dump: &mut EventDump, line_no: usize) -> Result<&mut PageEvents, ParseError> {
    dump.pages
        .last_mut()
        .ok_or_else(|| ParseError::syntax(line_no, "event before the first PAGE record"))
}

/// Read an event dump from a string.
pub fn parse_str(input: &str) -> Result<EventDump, ParseError> {
    read_events(input.as_bytes())
}

/// Read an event dump from a file.
pub fn read_file(path: impl AsRef<Path>) -> Result<EventDump, ParseError> {
    let file = File::open(path.as_ref())?;
    read_events(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagefeat_core::{PageEvent, Point};

    const HI_BYE: &str = "\
# two lines on one page
PAGE\t1\t792
0\tGLYPH\tH\t0\t0\t10\t10\tF1\t12\t5
0\tGLYPH\ti\t10\t0\t5\t10\tF1\t12\t5

1\tGLYPH\tbye\t0\t20\t15\t10\tF1\t12\t5
PAGE\t2\t612
0\tRECT\t0\t0\t10\t0\t10\t5\t0\t5
1\tSTROKE
";

    #[test]
    fn test_reads_pages_and_events() {
        let dump = parse_str(HI_BYE).unwrap();
        assert_eq!(dump.page_count(), 2);
        assert_eq!(dump.pages[0].page, 1);
        assert_eq!(dump.pages[0].height, 792.0);
        assert_eq!(dump.pages[0].events.len(), 3);
        assert!(dump.pages[0].glyphs().all(|g| g.page == 1));
        assert_eq!(dump.pages[1].height, 612.0);
        assert_eq!(dump.pages[1].events.len(), 6);
        assert_eq!(
            dump.pages[1].events[2].event,
            PageEvent::MoveTo(Point::new(10.0, 5.0))
        );
        assert!(dump.warnings.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let dump = parse_str("PAGE\t1\t100\r\n0\tSTROKE\r\n").unwrap();
        assert_eq!(dump.pages[0].events[0].event, PageEvent::Stroke);
    }

    #[test]
    fn test_empty_input() {
        let dump = parse_str("").unwrap();
        assert!(dump.pages.is_empty());
    }

    #[test]
    fn test_event_before_page_is_error() {
        let err = parse_str("# header\n0\tSTROKE\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 2: event before the first PAGE record"
        );
    }

    #[test]
    fn test_non_increasing_page_is_error() {
        let err = parse_str("PAGE\t2\t100\nPAGE\t2\t100\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 2, .. }));
        let err = parse_str("PAGE\t3\t100\nPAGE\t1\t100\n").unwrap_err();
        assert!(err.to_string().contains("page 1 does not follow page 3"));
    }

    #[test]
    fn test_unknown_kind_is_warning() {
        let dump = parse_str("PAGE\t4\t100\n7\tMARKED_CONTENT\tSpan\n7\tSTROKE\n").unwrap();
        assert_eq!(dump.pages[0].events.len(), 1);
        assert_eq!(dump.warnings.len(), 1);
        let warning = &dump.warnings[0];
        assert_eq!(warning.code, ExtractWarningCode::UnsupportedEvent);
        assert_eq!(warning.page, Some(4));
        assert_eq!(warning.cursor, Some(7));
    }

    #[test]
    fn test_syntax_error_line_number() {
        let err = parse_str("PAGE\t1\t100\n\n0\tMOVE_TO\t1\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 3, .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_file("/nonexistent/dump.events").unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
