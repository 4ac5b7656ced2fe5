//! Unicode normalization for segmented words.
//!
//! Every word first goes through [`normalize_presentation_forms`], which
//! rewrites Hebrew/Arabic presentation forms one code point at a time. The
//! configured [`UnicodeNorm`] form is applied on top of that.

use unicode_bidi::BidiInfo;
use unicode_normalization::UnicodeNormalization;

/// Unicode normalization form to apply to extracted text.
///
/// Different PDF generators may produce different Unicode representations
/// for the same visual text (e.g., ligature glyphs vs. separate letters).
/// [`Nfkd`](UnicodeNorm::Nfkd) splits compatibility ligatures such as `ﬁ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnicodeNorm {
    /// No normalization beyond the presentation-form pass (default).
    #[default]
    None,
    /// Canonical Decomposition, followed by Canonical Composition (NFC).
    Nfc,
    /// Canonical Decomposition (NFD).
    Nfd,
    /// Compatibility Decomposition, followed by Canonical Composition (NFKC).
    Nfkc,
    /// Compatibility Decomposition (NFKD).
    Nfkd,
}

impl UnicodeNorm {
    /// Apply this normalization form to the given string.
    ///
    /// Returns the input unchanged if normalization is `None`.
    pub fn normalize(&self, text: &str) -> String {
        match self {
            UnicodeNorm::None => text.to_string(),
            UnicodeNorm::Nfc => text.nfc().collect(),
            UnicodeNorm::Nfd => text.nfd().collect(),
            UnicodeNorm::Nfkc => text.nfkc().collect(),
            UnicodeNorm::Nfkd => text.nfkd().collect(),
        }
    }
}

/// ARABIC LIGATURE ALLAH ISOLATED FORM.
const ALLAH_LIGATURE: char = '\u{FDF2}';
/// Replacement for [`ALLAH_LIGATURE`] when it follows an alef. Generic NFKC
/// would produce a second alef here.
const ALLAH_AFTER_ALEF: &str = "\u{0644}\u{0644}\u{0647}";

fn is_presentation_form(c: char) -> bool {
    matches!(c, '\u{FB1D}'..='\u{FDFF}' | '\u{FE70}'..='\u{FEFF}')
}

fn is_alef(c: char) -> bool {
    c == '\u{0627}' || c == '\u{FE8D}'
}

/// Rewrite presentation forms (U+FB1D–U+FDFF, U+FE70–U+FEFF) individually.
///
/// Each such code point is replaced by its own NFKC form with surrounding
/// whitespace trimmed; everything else passes through untouched. U+FDF2
/// directly after an alef becomes lam, lam, heh.
pub fn normalize_presentation_forms(word: &str) -> String {
    if !word.chars().any(is_presentation_form) {
        return word.to_string();
    }

    let mut out = String::with_capacity(word.len() * 2);
    let mut prev: Option<char> = None;
    for c in word.chars() {
        if is_presentation_form(c) {
            if c == ALLAH_LIGATURE && prev.is_some_and(is_alef) {
                out.push_str(ALLAH_AFTER_ALEF);
            } else {
                let normalized: String = c.to_string().nfkc().collect();
                out.push_str(normalized.trim());
            }
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

/// Full word normalization: presentation forms, then `norm`.
pub fn normalize_word(word: &str, norm: UnicodeNorm) -> String {
    norm.normalize(&normalize_presentation_forms(word))
}

/// Reorder a word containing right-to-left runs with the Unicode bidi
/// algorithm. Pure left-to-right words are returned unchanged.
pub fn reorder_bidi(word: &str) -> String {
    let info = BidiInfo::new(word, None);
    if !info.has_rtl() {
        return word.to_string();
    }
    info.paragraphs
        .iter()
        .map(|para| info.reorder_line(para, para.range.clone()).into_owned())
        .collect()
}
