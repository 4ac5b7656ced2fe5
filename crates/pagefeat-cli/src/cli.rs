use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pagefeat_core::regions::DEFAULT_MIN_SIZE;
use pagefeat_core::{DuplicateScope, RegionFilterOptions, SegmenterOptions, UnicodeNorm};

/// Segment words and lines and filter image regions from PDF page event dumps.
#[derive(Debug, Parser)]
#[command(name = "pagefeat", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print segmented text, one word per line and a blank line between lines
    Text {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        text: TextArgs,
    },

    /// Print words with geometry and font context
    Words {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        text: TextArgs,
    },

    /// Print image regions that survive filtering
    Images {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        images: ImageArgs,
    },

    /// Print glyph and drawing feature records
    Feats {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Input files, page selection and output format shared by all subcommands.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Event dump files
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Page range (e.g. '1,3-5'). Default: all pages
    #[arg(long)]
    pub pages: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Text segmentation flags.
#[derive(Debug, Args)]
pub struct TextArgs {
    /// Unicode normalization of word text (nfkd splits ligatures)
    #[arg(long, value_enum, default_value_t = UnicodeNormArg::Nfkd)]
    pub unicode_norm: UnicodeNormArg,

    /// Reorder words with right-to-left runs using the bidi algorithm
    #[arg(long)]
    pub bidi: bool,
}

impl TextArgs {
    pub fn segmenter_options(&self) -> SegmenterOptions {
        SegmenterOptions {
            normalization: self.unicode_norm.to_unicode_norm(),
            reorder_bidi: self.bidi,
        }
    }
}

/// Image filter flags.
#[derive(Debug, Args)]
pub struct ImageArgs {
    /// Minimum width and height of a reported image
    #[arg(long, default_value_t = DEFAULT_MIN_SIZE)]
    pub min_size: f32,

    /// Drop images repeated at the same position on other pages
    /// instead of within one page
    #[arg(long)]
    pub cross_page_duplicates: bool,

    /// Report y from the top of the page
    #[arg(long)]
    pub flip_y: bool,
}

impl ImageArgs {
    pub fn filter_options(&self) -> RegionFilterOptions {
        RegionFilterOptions {
            min_size: self.min_size,
            duplicate_scope: if self.cross_page_duplicates {
                DuplicateScope::CrossPage
            } else {
                DuplicateScope::SamePage
            },
            flip_y: self.flip_y,
            ..RegionFilterOptions::default()
        }
    }
}

/// Output format for all subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Unicode normalization form argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnicodeNormArg {
    /// Keep glyph text as mapped, apart from presentation forms
    None,
    /// Canonical Decomposition, followed by Canonical Composition
    Nfc,
    /// Canonical Decomposition
    Nfd,
    /// Compatibility Decomposition, followed by Canonical Composition
    Nfkc,
    /// Compatibility Decomposition
    Nfkd,
}

impl UnicodeNormArg {
    /// Convert to the core library's `UnicodeNorm` enum.
    pub fn to_unicode_norm(self) -> UnicodeNorm {
        match self {
            UnicodeNormArg::None => UnicodeNorm::None,
            UnicodeNormArg::Nfc => UnicodeNorm::Nfc,
            UnicodeNormArg::Nfd => UnicodeNorm::Nfd,
            UnicodeNormArg::Nfkc => UnicodeNorm::Nfkc,
            UnicodeNormArg::Nfkd => UnicodeNorm::Nfkd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_text_subcommand_with_file() {
        let cli = Cli::parse_from(["pagefeat", "text", "doc.events"]);
        match cli.command {
            Commands::Text { input, text } => {
                assert_eq!(input.files, vec![PathBuf::from("doc.events")]);
                assert!(input.pages.is_none());
                assert_eq!(input.format, OutputFormat::Text);
                assert_eq!(text.segmenter_options(), SegmenterOptions::default());
            }
            other => panic!("expected Text, got {other:?}"),
        }
    }

    #[test]
    fn parse_text_with_pages_and_format() {
        let cli = Cli::parse_from([
            "pagefeat", "text", "a.events", "b.events", "--pages", "1,3-5", "--format", "json",
        ]);
        let Commands::Text { input, .. } = cli.command else {
            panic!("expected Text");
        };
        assert_eq!(input.files.len(), 2);
        assert_eq!(input.pages.as_deref(), Some("1,3-5"));
        assert_eq!(input.format, OutputFormat::Json);
    }

    #[test]
    fn parse_words_with_normalization_and_bidi() {
        let cli = Cli::parse_from([
            "pagefeat",
            "words",
            "doc.events",
            "--unicode-norm",
            "nfc",
            "--bidi",
        ]);
        let Commands::Words { text, .. } = cli.command else {
            panic!("expected Words");
        };
        let opts = text.segmenter_options();
        assert_eq!(opts.normalization, UnicodeNorm::Nfc);
        assert!(opts.reorder_bidi);
    }

    #[test]
    fn parse_images_defaults() {
        let cli = Cli::parse_from(["pagefeat", "images", "doc.events"]);
        let Commands::Images { images, .. } = cli.command else {
            panic!("expected Images");
        };
        assert_eq!(images.filter_options(), RegionFilterOptions::default());
    }

    #[test]
    fn parse_images_with_all_options() {
        let cli = Cli::parse_from([
            "pagefeat",
            "images",
            "doc.events",
            "--min-size",
            "20",
            "--cross-page-duplicates",
            "--flip-y",
            "--format",
            "csv",
        ]);
        let Commands::Images { input, images } = cli.command else {
            panic!("expected Images");
        };
        assert_eq!(input.format, OutputFormat::Csv);
        let opts = images.filter_options();
        assert_eq!(opts.min_size, 20.0);
        assert_eq!(opts.duplicate_scope, DuplicateScope::CrossPage);
        assert!(opts.flip_y);
    }

    #[test]
    fn parse_feats_subcommand() {
        let cli = Cli::parse_from(["pagefeat", "feats", "doc.events"]);
        assert!(matches!(cli.command, Commands::Feats { .. }));
    }

    #[test]
    fn missing_file_argument_is_rejected() {
        assert!(Cli::try_parse_from(["pagefeat", "text"]).is_err());
    }

    #[test]
    fn invalid_format_is_rejected() {
        assert!(Cli::try_parse_from(["pagefeat", "text", "a", "--format", "xml"]).is_err());
    }

    #[test]
    fn unicode_norm_defaults_to_nfkd_with_opt_out() {
        let cli = Cli::parse_from(["pagefeat", "text", "doc.events"]);
        let Commands::Text { text, .. } = cli.command else {
            panic!("expected Text");
        };
        assert_eq!(text.segmenter_options().normalization, UnicodeNorm::Nfkd);

        let cli = Cli::parse_from(["pagefeat", "text", "doc.events", "--unicode-norm", "none"]);
        let Commands::Text { text, .. } = cli.command else {
            panic!("expected Text");
        };
        assert_eq!(text.segmenter_options().normalization, UnicodeNorm::None);
    }

    #[test]
    fn unicode_norm_arg_conversion() {
        assert_eq!(UnicodeNormArg::None.to_unicode_norm(), UnicodeNorm::None);
        assert_eq!(UnicodeNormArg::Nfc.to_unicode_norm(), UnicodeNorm::Nfc);
        assert_eq!(UnicodeNormArg::Nfd.to_unicode_norm(), UnicodeNorm::Nfd);
        assert_eq!(UnicodeNormArg::Nfkc.to_unicode_norm(), UnicodeNorm::Nfkc);
        assert_eq!(UnicodeNormArg::Nfkd.to_unicode_norm(), UnicodeNorm::Nfkd);
    }
}
