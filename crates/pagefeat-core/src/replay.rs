//! Replay of page events into text lines and image regions.
//!
//! A single loop dispatches every [`PageEvent`]: glyphs go to the page's
//! [`LineAccumulator`], image placements to the document's
//! [`RegionCollector`]. Path events are only counted here; feature output
//! reads them through [`crate::features`].

use crate::error::{ExtractWarning, PdfError};
use crate::event::{PageEvent, PageEvents};
use crate::regions::{ImageRegion, RegionCollector, RegionFilterOptions};
use crate::segmenter::{Line, LineAccumulator, SegmenterOptions};

/// Options for a replay run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayOptions {
    /// Text segmentation options.
    pub segmenter: SegmenterOptions,
    /// Image region filter options.
    pub regions: RegionFilterOptions,
}

/// Text of one page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageText {
    /// 1-based page index.
    pub page: usize,
    /// Lines in stream order.
    pub lines: Vec<Line>,
    /// Non-fatal warnings raised while segmenting the page.
    pub warnings: Vec<ExtractWarning>,
}

/// Result of replaying a whole document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentResult {
    /// Per-page text, in page order.
    pub pages: Vec<PageText>,
    /// Image regions that survived filtering.
    pub images: Vec<ImageRegion>,
    /// All warnings of all pages.
    pub warnings: Vec<ExtractWarning>,
}

/// Stateful replayer for one document.
///
/// Segmenter state lives for one page; the region collector lives for the
/// whole document, since duplicate filtering may compare across pages.
#[derive(Debug)]
pub struct DocumentReplayer {
    options: ReplayOptions,
    collector: RegionCollector,
    last_page: Option<usize>,
}

impl DocumentReplayer {
    pub fn new(options: ReplayOptions) -> Self {
        let collector = RegionCollector::new(options.regions.clone());
        Self {
            options,
            collector,
            last_page: None,
        }
    }

    /// Replay the next page.
    ///
    /// # Errors
    ///
    /// [`PdfError::InvalidInput`] when pages do not arrive in increasing
    /// order, [`PdfError::MalformedInputOrdering`] when the page breaks the
    /// glyph/draw interleaving contract.
    pub fn replay(&mut self, page: &PageEvents) -> Result<PageText, PdfError> {
        if let Some(last) = self.last_page {
            if page.page <= last {
                return Err(PdfError::InvalidInput(format!(
                    "page {} after page {last}",
                    page.page
                )));
            }
        }
        self.last_page = Some(page.page);
        page.check_interleaving()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(page = page.page, events = page.events.len(), "replaying page");

        let segmenter = &self.options.segmenter;
        let mut acc = LineAccumulator::new();
        let mut lines = Vec::new();
        let mut warnings = Vec::new();
        for sequenced in &page.events {
            match &sequenced.event {
                PageEvent::Glyph(glyph) => {
                    lines.extend(acc.feed(glyph.clone(), segmenter));
                    warnings.extend(
                        acc.take_warnings()
                            .into_iter()
                            .map(|w| w.at_cursor(sequenced.cursor)),
                    );
                }
                PageEvent::ImagePlacement(placement) => {
                    self.collector.push(page.page, placement, page.height);
                }
                _ => {}
            }
        }
        lines.extend(acc.finish(segmenter));

        #[cfg(feature = "tracing")]
        for warning in &warnings {
            tracing::warn!(%warning, "page replay");
        }

        Ok(PageText {
            page: page.page,
            lines,
            warnings,
        })
    }

    /// Filter the collected image regions.
    pub fn finish(self) -> Vec<ImageRegion> {
        self.collector.finish()
    }
}

/// Replay one page's text in isolation. Image placements are ignored.
pub fn replay_page(page: &PageEvents, options: &SegmenterOptions) -> Result<PageText, PdfError> {
    let mut replayer = DocumentReplayer::new(ReplayOptions {
        segmenter: options.clone(),
        regions: RegionFilterOptions::default(),
    });
    replayer.replay(page)
}

/// Replay every page of a document in page order.
///
/// # Errors
///
/// Fails on the first page that is out of order or violates the
/// interleaving contract; nothing of the document is returned then.
pub fn replay_document(
    pages: &[PageEvents],
    options: &ReplayOptions,
) -> Result<DocumentResult, PdfError> {
    let mut replayer = DocumentReplayer::new(options.clone());
    let mut texts = Vec::with_capacity(pages.len());
    let mut warnings = Vec::new();
    for page in pages {
        let text = replayer.replay(page)?;
        warnings.extend(text.warnings.iter().cloned());
        texts.push(text);
    }
    Ok(DocumentResult {
        pages: texts,
        images: replayer.finish(),
        warnings,
    })
}
