use crate::geometry::BBox;

/// Space width used when neither the font's space glyph nor its average
/// width can be measured.
pub const DEFAULT_SPACE_WIDTH: f32 = 1.0;

/// Share of the average font width that stands in for a missing space glyph.
const AVERAGE_WIDTH_SPACE_FACTOR: f32 = 0.8;

/// One rendered character, as reported by the content stream interpreter.
///
/// Coordinates are in page space with `y` measured from the top of the page
/// (the glyph's baseline origin). Values are single precision; the
/// segmentation thresholds are tuned for `f32` arithmetic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionedGlyph {
    /// 1-based page index.
    pub page: usize,
    /// Unicode text after font-to-Unicode mapping. `None` when unmapped.
    pub text: Option<String>,
    /// Left edge of the glyph origin.
    pub x: f32,
    /// Baseline position, measured from the top of the page.
    pub y: f32,
    /// Advance width in page space.
    pub width: f32,
    /// Glyph height in page space.
    pub height: f32,
    /// Identifier of the font that rendered this glyph.
    pub font: String,
    /// Font size in text space units.
    pub font_size: f32,
    /// Width of a space in this font and size, in page space.
    pub space_width: f32,
    /// Number of individual character advances this glyph carries.
    ///
    /// Normally 1. Zero marks a glyph whose font reported no widths; such a
    /// glyph gives the segmenter no character-width signal.
    pub advances: u32,
}

impl PositionedGlyph {
    /// Create a glyph with a single advance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        page: usize,
        text: Option<&str>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        font: impl Into<String>,
        font_size: f32,
        space_width: f32,
    ) -> Self {
        Self {
            page,
            text: text.map(str::to_string),
            x,
            y,
            width,
            height,
            font: font.into(),
            font_size,
            space_width,
            advances: 1,
        }
    }

    /// Text of the glyph, or the empty string when unmapped.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Whether this glyph contributes characters to a word.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Bounding box with the baseline as the bottom edge.
    pub fn bbox(&self) -> BBox {
        BBox::new(self.x, self.y - self.height, self.x + self.width, self.y)
    }

    /// Whether this glyph uses a different font or size than `other`.
    pub fn font_changed_from(&self, other: &PositionedGlyph) -> bool {
        self.font != other.font || self.font_size != other.font_size
    }
}

/// Resolve the width of a space from the measurements a font offers.
///
/// Prefers the measured space glyph, then 80% of the average glyph width,
/// then [`DEFAULT_SPACE_WIDTH`]. Zero and non-finite measurements count as
/// missing.
pub fn fallback_space_width(space: Option<f32>, average_font_width: Option<f32>) -> f32 {
    let usable = |v: &f32| v.is_finite() && *v != 0.0;
    if let Some(space) = space.filter(usable) {
        return space;
    }
    if let Some(avg) = average_font_width.filter(usable) {
        return avg * AVERAGE_WIDTH_SPACE_FACTOR;
    }
    DEFAULT_SPACE_WIDTH
}
