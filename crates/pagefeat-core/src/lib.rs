//! pagefeat-core: Backend-independent data types and algorithms.
//!
//! This crate turns the event stream of a PDF content-stream interpreter
//! (glyphs, path operators, image placements) into lines and words of text
//! and a filtered set of image regions per page. It performs no I/O; see
//! `pagefeat-parse` for reading event dumps.
//!
//! Enable the `serde` feature for serialization of the public types and the
//! `tracing` feature for debug diagnostics.

pub mod error;
pub mod event;
pub mod features;
pub mod geometry;
pub mod glyph;
pub mod regions;
pub mod replay;
pub mod segmenter;
pub mod unicode_norm;

pub use error::{ExtractResult, ExtractWarning, ExtractWarningCode, PdfError};
pub use event::{PageEvent, PageEvents, SequencedEvent, WindingRule, append_rectangle};
pub use features::{DrawRecord, FeatureRecord, feature_records};
pub use geometry::{BBox, Ctm, Point};
pub use glyph::{DEFAULT_SPACE_WIDTH, PositionedGlyph, fallback_space_width};
pub use regions::{
    DuplicateScope, ImagePlacement, ImageRegion, RegionCollector, RegionFilterOptions, collect,
    filter_regions,
};
pub use replay::{
    DocumentReplayer, DocumentResult, PageText, ReplayOptions, replay_document, replay_page,
};
pub use segmenter::{Line, LineAccumulator, SegmenterOptions, TextSegmenter, Word};
pub use unicode_norm::{UnicodeNorm, normalize_word};
