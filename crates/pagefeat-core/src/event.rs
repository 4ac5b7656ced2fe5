//! Page content events delivered by the upstream interpreter.
//!
//! The interpreter reports every glyph, path operator and image placement of
//! a page as a [`PageEvent`], in content-stream order. Consumers dispatch on
//! the variant in a single loop (see [`crate::replay`]).

use std::collections::HashMap;

use crate::error::PdfError;
use crate::geometry::Point;
use crate::glyph::PositionedGlyph;
use crate::regions::ImagePlacement;

/// Fill rule used by fill and clip operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindingRule {
    /// Nonzero winding number rule (default).
    #[default]
    NonZero,
    /// Even-odd rule.
    EvenOdd,
}

impl WindingRule {
    /// Lowercase name used in event dumps and feature records.
    pub fn as_str(&self) -> &'static str {
        match self {
            WindingRule::NonZero => "nonzero",
            WindingRule::EvenOdd => "evenodd",
        }
    }
}

/// One drawing event of a page.
///
/// Path coordinates are in PDF user space (origin bottom-left). Glyph and
/// image geometry is already resolved to page space by the interpreter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageEvent {
    /// A rendered glyph.
    Glyph(PositionedGlyph),
    /// Start a new subpath.
    MoveTo(Point),
    /// Straight segment from the current point.
    LineTo(Point),
    /// Cubic Bezier segment.
    CurveTo {
        /// First control point.
        cp1: Point,
        /// Second control point.
        cp2: Point,
        /// Endpoint of the curve.
        end: Point,
    },
    /// Close the current subpath.
    ClosePath,
    /// End the path without painting it.
    EndPath,
    /// Stroke the current path.
    Stroke,
    /// Fill the current path.
    Fill(WindingRule),
    /// Fill, then stroke the current path.
    FillAndStroke(WindingRule),
    /// Paint a named shading over the clip region.
    ShadingFill(String),
    /// A raster image placed on the page.
    ImagePlacement(ImagePlacement),
    /// Intersect the clip region with the current path.
    Clip(WindingRule),
}

impl PageEvent {
    /// Whether this event carries a glyph.
    pub fn is_glyph(&self) -> bool {
        matches!(self, PageEvent::Glyph(_))
    }

    /// Whether this event is a path construction, paint or clip operator.
    pub fn is_draw(&self) -> bool {
        !matches!(self, PageEvent::Glyph(_) | PageEvent::ImagePlacement(_))
    }
}

/// An event together with the cursor slot the interpreter assigned to it.
///
/// Several events may share a slot (all glyphs of one text-showing operator,
/// the segments of an expanded rectangle), but a glyph and a draw event
/// never may.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequencedEvent {
    /// Content-stream cursor slot.
    pub cursor: u64,
    /// The event.
    pub event: PageEvent,
}

impl SequencedEvent {
    pub fn new(cursor: u64, event: PageEvent) -> Self {
        Self { cursor, event }
    }
}

/// All events of one page, in emission order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageEvents {
    /// 1-based page index.
    pub page: usize,
    /// Page height in points, used to flip path coordinates to top-origin.
    pub height: f32,
    /// Events in content-stream order.
    pub events: Vec<SequencedEvent>,
}

impl PageEvents {
    pub fn new(page: usize, height: f32) -> Self {
        Self {
            page,
            height,
            events: Vec::new(),
        }
    }

    /// Append an event at the given cursor slot.
    pub fn push(&mut self, cursor: u64, event: PageEvent) {
        self.events.push(SequencedEvent::new(cursor, event));
    }

    /// Append a rectangle as path events at the given cursor slot.
    pub fn push_rectangle(&mut self, cursor: u64, corners: [Point; 4]) {
        for event in append_rectangle(corners) {
            self.push(cursor, event);
        }
    }

    /// Check that no cursor slot carries both a glyph and a draw event.
    ///
    /// Image placements may share a slot with either kind.
    pub fn check_interleaving(&self) -> Result<(), PdfError> {
        let mut seen: HashMap<u64, (bool, bool)> = HashMap::new();
        for sequenced in &self.events {
            let (has_glyph, has_draw) = seen.entry(sequenced.cursor).or_default();
            if sequenced.event.is_glyph() {
                *has_glyph = true;
            } else if sequenced.event.is_draw() {
                *has_draw = true;
            }
            if *has_glyph && *has_draw {
                return Err(PdfError::MalformedInputOrdering {
                    page: self.page,
                    cursor: sequenced.cursor,
                });
            }
        }
        Ok(())
    }

    /// Glyphs of the page, in stream order.
    pub fn glyphs(&self) -> impl Iterator<Item = &PositionedGlyph> {
        self.events.iter().filter_map(|e| match &e.event {
            PageEvent::Glyph(g) => Some(g),
            _ => None,
        })
    }
}

/// Expand a rectangle into path events.
///
/// The rectangle is recorded as two separate line segments (`p0→p1` and
/// `p2→p3`) followed by a close, which is what figure detection expects
/// when it looks for ruling lines.
pub fn append_rectangle(corners: [Point; 4]) -> [PageEvent; 5] {
    let [p0, p1, p2, p3] = corners;
    [
        PageEvent::MoveTo(p0),
        PageEvent::LineTo(p1),
        PageEvent::MoveTo(p2),
        PageEvent::LineTo(p3),
        PageEvent::ClosePath,
    ]
}
