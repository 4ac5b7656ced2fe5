//! Line and word segmentation of a page's glyph stream.
//!
//! Glyphs are consumed in content-stream order, never sorted. Each glyph is
//! compared against running aggregates of the current line (vertical
//! envelope, end of the last glyph, recent space widths and average glyph
//! widths) to decide whether it starts a new line or a new word. This is the
//! grouping scheme used by mainstream PDF text strippers.

use crate::error::{ExtractResult, ExtractWarning, ExtractWarningCode};
use crate::geometry::BBox;
use crate::glyph::PositionedGlyph;
use crate::unicode_norm::{UnicodeNorm, normalize_word, reorder_bidi};

/// Two glyph tops closer than this are always on the same line.
pub const LINE_TOP_VARIANCE: f32 = 0.1;
/// Fraction of the average glyph width that counts as a word gap.
pub const AVERAGE_CHAR_TOLERANCE: f32 = 0.3;
/// Fraction of the space width that counts as a word gap.
pub const SPACING_TOLERANCE: f32 = 0.5;

/// Options for segmentation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmenterOptions {
    /// Normalization applied to word text after the presentation-form pass.
    /// Defaults to [`UnicodeNorm::Nfkd`], which splits ligatures such as `ﬁ`.
    pub normalization: UnicodeNorm,
    /// Reorder words containing right-to-left runs with the bidi algorithm.
    pub reorder_bidi: bool,
}

impl Default for SegmenterOptions {
    fn default() -> Self {
        Self {
            normalization: UnicodeNorm::Nfkd,
            reorder_bidi: false,
        }
    }
}

/// A word: consecutive glyphs with no inferred gap between them.
///
/// A word always holds at least one glyph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Word {
    /// Normalized text of the word.
    pub text: String,
    first: PositionedGlyph,
    rest: Vec<PositionedGlyph>,
}

impl Word {
    /// Build a word from its glyphs in stream order. Returns `None` when
    /// `glyphs` is empty.
    pub fn new(text: impl Into<String>, glyphs: Vec<PositionedGlyph>) -> Option<Self> {
        let mut glyphs = glyphs.into_iter();
        let first = glyphs.next()?;
        Some(Self {
            text: text.into(),
            first,
            rest: glyphs.collect(),
        })
    }

    /// First glyph of the word; carries the font context reported for it.
    pub fn first_glyph(&self) -> &PositionedGlyph {
        &self.first
    }

    /// The glyphs that make up this word, in stream order.
    pub fn glyphs(&self) -> impl Iterator<Item = &PositionedGlyph> {
        std::iter::once(&self.first).chain(&self.rest)
    }

    /// 1-based page index.
    pub fn page(&self) -> usize {
        self.first.page
    }

    /// Bounding box enclosing all glyphs of the word.
    pub fn bbox(&self) -> BBox {
        self.rest
            .iter()
            .fold(self.first.bbox(), |acc, g| acc.union(&g.bbox()))
    }
}

/// A line of words sharing a vertical extent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Words in stream order. Never empty.
    pub words: Vec<Word>,
    /// Smallest glyph top (baseline minus height) seen on the line.
    pub top: f32,
    /// Largest baseline seen on the line.
    pub baseline: f32,
}

impl Line {
    /// Word texts joined by single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone)]
enum LineItem {
    Glyph(PositionedGlyph),
    WordSeparator,
}

/// Running state for one page of segmentation.
///
/// Fed one glyph at a time; returns a [`Line`] whenever an incoming glyph
/// does not overlap the current line vertically.
#[derive(Debug, Clone)]
pub struct LineAccumulator {
    items: Vec<LineItem>,
    last: Option<PositionedGlyph>,
    max_y_for_line: f32,
    min_y_top_for_line: f32,
    max_height_for_line: f32,
    end_of_last_text_x: Option<f32>,
    expected_start_of_next_word_x: Option<f32>,
    last_word_spacing: Option<f32>,
    previous_average_char_width: Option<f32>,
    warnings: Vec<ExtractWarning>,
}

impl Default for LineAccumulator {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            last: None,
            max_y_for_line: -f32::MAX,
            min_y_top_for_line: f32::MAX,
            max_height_for_line: -1.0,
            end_of_last_text_x: None,
            expected_start_of_next_word_x: None,
            last_word_spacing: None,
            previous_average_char_width: None,
            warnings: Vec::new(),
        }
    }
}

impl LineAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next glyph in stream order.
    ///
    /// Returns the previous line when this glyph starts a new one.
    pub fn feed(&mut self, glyph: PositionedGlyph, options: &SegmenterOptions) -> Option<Line> {
        if self
            .last
            .as_ref()
            .is_some_and(|last| glyph.font_changed_from(last))
        {
            self.previous_average_char_width = None;
        }

        let space = glyph.space_width;
        let delta_space = if space == 0.0 || space.is_nan() {
            f32::MAX
        } else {
            match self.last_word_spacing {
                Some(last) if last >= 0.0 || last.is_nan() => (space + last) / 2.0 * SPACING_TOLERANCE,
                _ => space * SPACING_TOLERANCE,
            }
        };

        let char_width = (glyph.advances > 0).then(|| glyph.width / glyph.advances as f32);
        let average_char_width = match (char_width, self.previous_average_char_width) {
            (Some(w), Some(prev)) => Some((prev + w) / 2.0),
            (Some(w), None) => Some(w),
            (None, prev) => {
                self.warn_degenerate(&glyph);
                prev
            }
        };
        let delta_char_width = average_char_width.map_or(f32::MAX, |w| w * AVERAGE_CHAR_TOLERANCE);

        if let Some(end) = self.end_of_last_text_x {
            self.expected_start_of_next_word_x = Some(if delta_char_width > delta_space {
                end + delta_space
            } else {
                end + delta_char_width
            });
        }

        let mut finished = None;
        if let Some(last) = self.last.take() {
            if !overlap(
                glyph.y,
                glyph.height,
                self.max_y_for_line,
                self.max_height_for_line,
            ) {
                finished = self.flush_line(options);
                self.expected_start_of_next_word_x = None;
                self.max_y_for_line = -f32::MAX;
                self.max_height_for_line = -1.0;
                self.min_y_top_for_line = f32::MAX;
            }

            let previous_open = last.text.as_deref().is_some_and(|t| !t.ends_with(' '));
            if previous_open
                && self
                    .expected_start_of_next_word_x
                    .is_some_and(|expected| expected < glyph.x)
            {
                self.items.push(LineItem::WordSeparator);
            }
        }

        if glyph.y >= self.max_y_for_line {
            self.max_y_for_line = glyph.y;
        }
        self.end_of_last_text_x = Some(glyph.x + glyph.width);
        self.max_height_for_line = self.max_height_for_line.max(glyph.height);
        self.min_y_top_for_line = self.min_y_top_for_line.min(glyph.y - glyph.height);
        self.last_word_spacing = Some(space);
        if char_width.is_some() {
            self.previous_average_char_width = average_char_width;
        }

        if glyph.has_text() {
            self.items.push(LineItem::Glyph(glyph.clone()));
        }
        self.last = Some(glyph);

        finished
    }

    /// Flush the final line at the end of the page.
    pub fn finish(&mut self, options: &SegmenterOptions) -> Option<Line> {
        self.flush_line(options)
    }

    /// Warnings collected so far.
    pub fn warnings(&self) -> &[ExtractWarning] {
        &self.warnings
    }

    /// Take the collected warnings, leaving none behind.
    pub fn take_warnings(&mut self) -> Vec<ExtractWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn warn_degenerate(&mut self, glyph: &PositionedGlyph) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            page = glyph.page,
            font = %glyph.font,
            "glyph without character widths, skipping width averaging"
        );
        self.warnings.push(
            ExtractWarning::with_code(
                ExtractWarningCode::DegenerateGlyphMetrics,
                "glyph reports no character widths",
            )
            .on_page(glyph.page)
            .with_font(glyph.font.clone()),
        );
    }

    fn flush_line(&mut self, options: &SegmenterOptions) -> Option<Line> {
        let items = std::mem::take(&mut self.items);
        let words = split_words(items, options);
        if words.is_empty() {
            return None;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(words = words.len(), baseline = self.max_y_for_line, "line flushed");

        Some(Line {
            words,
            top: self.min_y_top_for_line,
            baseline: self.max_y_for_line,
        })
    }
}

/// Whether a glyph at `y1` (height `height1`) shares a line whose envelope
/// ends at `y2` with height `height2`.
fn overlap(y1: f32, height1: f32, y2: f32, height2: f32) -> bool {
    within(y1, y2, LINE_TOP_VARIANCE)
        || (y2 <= y1 && y2 >= y1 - height1)
        || (y1 <= y2 && y1 >= y2 - height2)
}

fn within(first: f32, second: f32, variance: f32) -> bool {
    second < first + variance && second > first - variance
}

fn split_words(items: Vec<LineItem>, options: &SegmenterOptions) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Vec<PositionedGlyph> = Vec::new();
    for item in items {
        match item {
            LineItem::Glyph(glyph) => current.push(glyph),
            LineItem::WordSeparator => {
                words.extend(make_word(std::mem::take(&mut current), options));
            }
        }
    }
    words.extend(make_word(current, options));
    words
}

/// Empty runs between separators yield no word.
fn make_word(glyphs: Vec<PositionedGlyph>, options: &SegmenterOptions) -> Option<Word> {
    let raw: String = glyphs.iter().map(PositionedGlyph::text_or_empty).collect();
    let mut text = normalize_word(&raw, options.normalization);
    if options.reorder_bidi {
        text = reorder_bidi(&text);
    }
    Word::new(text, glyphs)
}

/// Segments whole pages of glyphs into lines.
pub struct TextSegmenter;

impl TextSegmenter {
    /// Segment one page's glyphs, given in content-stream order.
    pub fn segment(glyphs: &[PositionedGlyph], options: &SegmenterOptions) -> Vec<Line> {
        Self::segment_with_warnings(glyphs, options).value
    }

    /// Like [`segment`](Self::segment), also returning non-fatal warnings.
    pub fn segment_with_warnings(
        glyphs: &[PositionedGlyph],
        options: &SegmenterOptions,
    ) -> ExtractResult<Vec<Line>> {
        let mut acc = LineAccumulator::new();
        let mut lines = Vec::new();
        for glyph in glyphs {
            lines.extend(acc.feed(glyph.clone(), options));
        }
        lines.extend(acc.finish(options));
        ExtractResult::with_warnings(lines, acc.take_warnings())
    }
}
