//! pagefeat-parse: reader for page event dumps.
//!
//! An event dump is a tab-separated text serialization of the events a PDF
//! content-stream interpreter reports for each page: `PAGE` records followed
//! by glyph, path and image records tagged with their cursor slot. This
//! crate turns such dumps into [`pagefeat_core::PageEvents`].

pub mod error;
pub mod reader;
pub mod records;
pub mod tokenizer;

pub use error::ParseError;
pub use pagefeat_core;
pub use reader::{EventDump, parse_str, read_events, read_file};
pub use records::{Record, parse_record};
