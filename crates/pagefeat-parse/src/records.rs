//! Record-level parsing of event dump lines.

use pagefeat_core::{
    Ctm, ImagePlacement, PageEvent, Point, PositionedGlyph, WindingRule, fallback_space_width,
};

use crate::error::ParseError;
use crate::tokenizer::Fields;

/// One parsed dump line.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Start of a page.
    Page { index: usize, height: f32 },
    /// A single event at a cursor slot.
    Event { cursor: u64, event: PageEvent },
    /// A rectangle, expanded into path events by the reader.
    Rect { cursor: u64, corners: [Point; 4] },
    /// An event kind this reader does not know.
    Unknown { cursor: u64, kind: String },
}

/// Whether a line carries no record.
pub fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Parse a non-blank, non-comment line.
///
/// `page` is the index of the enclosing page; glyphs are stamped with it.
pub fn parse_record(line_no: usize, line: &str, page: usize) -> Result<Record, ParseError> {
    let mut fields = Fields::new(line_no, line);
    let head = fields.next_str("cursor")?;

    if head == "PAGE" {
        let index = fields.next_num("index")?;
        let height = fields.next_num("height")?;
        fields.finish()?;
        return Ok(Record::Page { index, height });
    }

    let cursor: u64 = head
        .trim()
        .parse()
        .map_err(|_| ParseError::syntax(line_no, format!("invalid cursor {head:?}")))?;
    let kind = fields.next_str("kind")?;

    let event = match kind {
        "GLYPH" => PageEvent::Glyph(parse_glyph(&mut fields, page)?),
        "MOVE_TO" => PageEvent::MoveTo(point(fields.next_f32s::<2>("point")?)),
        "LINE_TO" => PageEvent::LineTo(point(fields.next_f32s::<2>("point")?)),
        "CURVE_TO" => {
            let [x1, y1, x2, y2, x3, y3] = fields.next_f32s::<6>("curve")?;
            PageEvent::CurveTo {
                cp1: Point::new(x1, y1),
                cp2: Point::new(x2, y2),
                end: Point::new(x3, y3),
            }
        }
        "RECT" => {
            let [x0, y0, x1, y1, x2, y2, x3, y3] = fields.next_f32s::<8>("rect")?;
            fields.finish()?;
            return Ok(Record::Rect {
                cursor,
                corners: [
                    Point::new(x0, y0),
                    Point::new(x1, y1),
                    Point::new(x2, y2),
                    Point::new(x3, y3),
                ],
            });
        }
        "CLOSE_PATH" => PageEvent::ClosePath,
        "END_PATH" => PageEvent::EndPath,
        "STROKE" => PageEvent::Stroke,
        "FILL" => PageEvent::Fill(winding_rule(&mut fields)?),
        "FILL_AND_STROKE" => PageEvent::FillAndStroke(winding_rule(&mut fields)?),
        "CLIP" => PageEvent::Clip(winding_rule(&mut fields)?),
        "SHADING_FILL" => PageEvent::ShadingFill(fields.next_str("name")?.to_string()),
        "IMAGE" => {
            let [x, y, w, h] = fields.next_f32s::<4>("image")?;
            PageEvent::ImagePlacement(ImagePlacement::new(x, y, w, h))
        }
        "IMAGE_CTM" => {
            let [a, b, c, d, e, f] = fields.next_f32s::<6>("ctm")?;
            PageEvent::ImagePlacement(ImagePlacement::from_ctm(&Ctm::new(a, b, c, d, e, f)))
        }
        other => {
            return Ok(Record::Unknown {
                cursor,
                kind: other.to_string(),
            });
        }
    };
    fields.finish()?;
    Ok(Record::Event { cursor, event })
}

fn point([x, y]: [f32; 2]) -> Point {
    Point::new(x, y)
}

fn winding_rule(fields: &mut Fields<'_>) -> Result<WindingRule, ParseError> {
    match fields.next_str("rule")? {
        "nonzero" => Ok(WindingRule::NonZero),
        "evenodd" => Ok(WindingRule::EvenOdd),
        other => Err(ParseError::syntax(
            fields.line(),
            format!("unknown winding rule {other:?}"),
        )),
    }
}

fn parse_glyph(fields: &mut Fields<'_>, page: usize) -> Result<PositionedGlyph, ParseError> {
    let text = fields.next_text("text")?;
    let [x, y, width, height] = fields.next_f32s::<4>("glyph box")?;
    let font = fields.next_text("font")?.unwrap_or_default();
    let font_size = fields.next_num("size")?;
    let space_width = fallback_space_width(fields.next_opt_num("space")?, None);
    let advances = fields.next_opt_num::<u32>("advances")?;

    let mut glyph = PositionedGlyph::new(
        page,
        text.as_deref(),
        x,
        y,
        width,
        height,
        font,
        font_size,
        space_width,
    );
    if let Some(advances) = advances {
        glyph.advances = advances;
    }
    Ok(glyph)
}
