//! Combined text and drawing feature records.
//!
//! A feature record is one tab-separated line per glyph or drawing operator
//! of a page. Downstream figure detection reads the path records to find
//! ruling lines and filled areas next to the text.

use std::fmt;

use crate::error::PdfError;
use crate::event::{PageEvent, PageEvents, WindingRule};
use crate::geometry::Point;
use crate::glyph::PositionedGlyph;

/// A drawing operator with path coordinates flipped to a top-left origin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawRecord {
    MoveTo(Point),
    LineTo(Point),
    CurveTo { cp1: Point, cp2: Point, end: Point },
    ClosePath,
    EndPath,
    Stroke,
    Fill(WindingRule),
    FillAndStroke(WindingRule),
    ShadingFill(String),
    Clip(WindingRule),
}

impl DrawRecord {
    /// Bracketed tag that starts the record line.
    pub fn tag(&self) -> &'static str {
        match self {
            DrawRecord::MoveTo(_) => "[MOVE_TO]",
            DrawRecord::LineTo(_) => "[LINE_TO]",
            DrawRecord::CurveTo { .. } => "[CURVE_TO]",
            DrawRecord::ClosePath => "[CLOSE_PATH]",
            DrawRecord::EndPath => "[END_PATH]",
            DrawRecord::Stroke => "[STROKE_PATH]",
            DrawRecord::Fill(_) => "[FILL_PATH]",
            DrawRecord::FillAndStroke(_) => "[FILL_AND_STROKE_PATH]",
            DrawRecord::ShadingFill(_) => "[SHADING_FILL]",
            DrawRecord::Clip(_) => "[CLIP]",
        }
    }
}

impl fmt::Display for DrawRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())?;
        match self {
            DrawRecord::MoveTo(p) | DrawRecord::LineTo(p) => write!(f, "\t{}\t{}", p.x, p.y),
            DrawRecord::CurveTo { cp1, cp2, end } => write!(
                f,
                "\t{}\t{}\t{}\t{}\t{}\t{}",
                cp1.x, cp1.y, cp2.x, cp2.y, end.x, end.y
            ),
            // Plain fills carry no rule in the record.
            DrawRecord::Fill(_)
            | DrawRecord::ClosePath
            | DrawRecord::EndPath
            | DrawRecord::Stroke => Ok(()),
            DrawRecord::FillAndStroke(rule) | DrawRecord::Clip(rule) => {
                write!(f, "\t{}", rule.as_str())
            }
            DrawRecord::ShadingFill(name) => write!(f, "\t{name}"),
        }
    }
}

/// One line of feature output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeatureRecord {
    Glyph(PositionedGlyph),
    Draw(DrawRecord),
}

impl fmt::Display for FeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureRecord::Glyph(g) => write!(
                f,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                g.page,
                escape_field(g.text_or_empty()),
                g.x,
                g.y,
                g.width,
                g.height,
                escape_field(&g.font),
                g.font_size,
                g.space_width
            ),
            FeatureRecord::Draw(draw) => draw.fmt(f),
        }
    }
}

/// Escape characters that would break a tab-separated line.
pub fn escape_field(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the feature records of one page.
///
/// Path `y` coordinates are flipped with the page height. Image placements
/// produce no record.
///
/// This layout differs from the classic PDFBox feats dump in two places:
/// `[CURVE_TO]` control and end points are flipped like every other path
/// point, where that dump wrote raw `y`; and `[FILL_AND_STROKE_PATH]` and
/// `[CLIP]` name their rule as `nonzero` or `evenodd` instead of printing
/// the integer winding rule.
///
/// # Errors
///
/// [`PdfError::MalformedInputOrdering`] when a glyph and a draw event share
/// a cursor slot.
pub fn feature_records(page: &PageEvents) -> Result<Vec<FeatureRecord>, PdfError> {
    page.check_interleaving()?;

    let flip = |p: &Point| Point::new(p.x, page.height - p.y);
    let records = page
        .events
        .iter()
        .filter_map(|sequenced| {
            let draw = match &sequenced.event {
                PageEvent::Glyph(g) => return Some(FeatureRecord::Glyph(g.clone())),
                PageEvent::ImagePlacement(_) => return None,
                PageEvent::MoveTo(p) => DrawRecord::MoveTo(flip(p)),
                PageEvent::LineTo(p) => DrawRecord::LineTo(flip(p)),
                PageEvent::CurveTo { cp1, cp2, end } => DrawRecord::CurveTo {
                    cp1: flip(cp1),
                    cp2: flip(cp2),
                    end: flip(end),
                },
                PageEvent::ClosePath => DrawRecord::ClosePath,
                PageEvent::EndPath => DrawRecord::EndPath,
                PageEvent::Stroke => DrawRecord::Stroke,
                PageEvent::Fill(rule) => DrawRecord::Fill(*rule),
                PageEvent::FillAndStroke(rule) => DrawRecord::FillAndStroke(*rule),
                PageEvent::ShadingFill(name) => DrawRecord::ShadingFill(name.clone()),
                PageEvent::Clip(rule) => DrawRecord::Clip(*rule),
            };
            Some(FeatureRecord::Draw(draw))
        })
        .collect();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::ImagePlacement;

    fn glyph() -> PositionedGlyph {
        PositionedGlyph::new(2, Some("A"), 72.5, 100.0, 8.0, 12.0, "Helvetica", 12.0, 3.5)
    }

    #[test]
    fn glyph_record_line() {
        let record = FeatureRecord::Glyph(glyph());
        assert_eq!(record.to_string(), "2\tA\t72.5\t100\t8\t12\tHelvetica\t12\t3.5");
    }

    #[test]
    fn glyph_record_escapes_text() {
        let mut g = glyph();
        g.text = Some("a\tb\\".to_string());
        let line = FeatureRecord::Glyph(g).to_string();
        assert!(line.starts_with("2\ta\\tb\\\\\t"));
        assert_eq!(line.split('\t').count(), 9);
    }

    #[test]
    fn unmapped_glyph_has_empty_text_field() {
        let mut g = glyph();
        g.text = None;
        assert!(FeatureRecord::Glyph(g).to_string().starts_with("2\t\t72.5"));
    }

    #[test]
    fn draw_record_lines() {
        assert_eq!(DrawRecord::MoveTo(Point::new(1.0, 2.0)).to_string(), "[MOVE_TO]\t1\t2");
        assert_eq!(DrawRecord::Stroke.to_string(), "[STROKE_PATH]");
        assert_eq!(DrawRecord::Fill(WindingRule::EvenOdd).to_string(), "[FILL_PATH]");
        assert_eq!(
            DrawRecord::FillAndStroke(WindingRule::EvenOdd).to_string(),
            "[FILL_AND_STROKE_PATH]\tevenodd"
        );
        assert_eq!(DrawRecord::Clip(WindingRule::NonZero).to_string(), "[CLIP]\tnonzero");
        assert_eq!(DrawRecord::ShadingFill("Sh1".into()).to_string(), "[SHADING_FILL]\tSh1");
        assert_eq!(
            DrawRecord::CurveTo {
                cp1: Point::new(1.0, 2.0),
                cp2: Point::new(3.0, 4.0),
                end: Point::new(5.0, 6.0),
            }
            .to_string(),
            "[CURVE_TO]\t1\t2\t3\t4\t5\t6"
        );
    }

    #[test]
    fn path_coordinates_are_flipped() {
        let mut page = PageEvents::new(1, 800.0);
        page.push(0, PageEvent::MoveTo(Point::new(10.0, 700.0)));
        page.push(0, PageEvent::LineTo(Point::new(200.0, 700.0)));
        page.push(
            1,
            PageEvent::CurveTo {
                cp1: Point::new(0.0, 0.0),
                cp2: Point::new(0.0, 800.0),
                end: Point::new(5.0, 100.0),
            },
        );
        let records = feature_records(&page).unwrap();
        assert_eq!(records[0], FeatureRecord::Draw(DrawRecord::MoveTo(Point::new(10.0, 100.0))));
        assert_eq!(records[1], FeatureRecord::Draw(DrawRecord::LineTo(Point::new(200.0, 100.0))));
        assert_eq!(
            records[2],
            FeatureRecord::Draw(DrawRecord::CurveTo {
                cp1: Point::new(0.0, 800.0),
                cp2: Point::new(0.0, 0.0),
                end: Point::new(5.0, 700.0),
            })
        );
    }

    #[test]
    fn records_follow_stream_order_without_images() {
        let mut page = PageEvents::new(1, 792.0);
        page.push(0, PageEvent::Glyph(glyph()));
        page.push(1, PageEvent::ImagePlacement(ImagePlacement::new(0.0, 0.0, 60.0, 60.0)));
        page.push_rectangle(
            2,
            [
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
        );
        page.push(3, PageEvent::Fill(WindingRule::NonZero));
        let lines: Vec<String> = feature_records(&page)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            lines,
            vec![
                "2\tA\t72.5\t100\t8\t12\tHelvetica\t12\t3.5",
                "[MOVE_TO]\t0\t792",
                "[LINE_TO]\t10\t792",
                "[MOVE_TO]\t10\t782",
                "[LINE_TO]\t0\t782",
                "[CLOSE_PATH]",
                "[FILL_PATH]",
            ]
        );
    }

    #[test]
    fn shared_cursor_is_fatal() {
        let mut page = PageEvents::new(5, 792.0);
        page.push(9, PageEvent::Glyph(glyph()));
        page.push(9, PageEvent::EndPath);
        assert_eq!(
            feature_records(&page),
            Err(PdfError::MalformedInputOrdering { page: 5, cursor: 9 })
        );
    }
}
