//! Text sanitization for drafted slide content.
//!
//! Normalizes typographic punctuation and whitespace to ASCII-safe forms and
//! replaces corrupted input with a fixed sentinel. Every other component
//! analyzes sanitized text.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Returned in place of content that shows corruption signatures.
///
/// Callers must treat it as "no usable content", never as slide text.
pub const UNPROCESSABLE: &str = "content could not be processed";

/// Regex to collapse runs of spaces and tabs into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Regex to limit blank-line runs to a single paragraph break.
static BLANK_LINES_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Mis-decoded UTF-8 (mojibake) repeated often enough to be a real encoding failure.
static MOJIBAKE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:(?:Ã|Â)[\u{80}-\u{BF}\u{A0}-\u{FF}]|â€[\u{80}-\u{FF}™œ\u{9D}˜¦“”]){3,}").unwrap());

/// Space-like characters mapped to a plain space.
const SPACE_CHARS: &[char] = &[
    '\u{00A0}', // no-break space
    '\u{2002}', '\u{2003}', '\u{2007}', '\u{2009}', '\u{200A}', // typographic spaces
    '\u{202F}', // narrow no-break space
    '\u{3000}', // ideographic space
];

/// Zero-width characters that are dropped.
const ZERO_WIDTH_CHARS: &[char] = &['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

/// Dash-like characters mapped to a hyphen.
const DASH_CHARS: &[char] = &['\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2212}'];

/// Single-quote-like characters mapped to an apostrophe.
const SINGLE_QUOTE_CHARS: &[char] = &['\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}', '\u{2032}'];

/// Double-quote-like characters mapped to a straight double quote.
const DOUBLE_QUOTE_CHARS: &[char] = &['\u{201C}', '\u{201D}', '\u{201E}', '\u{201F}', '\u{2033}'];

/// Line-break characters mapped to `\n`.
const LINE_BREAK_CHARS: &[char] = &['\u{2028}', '\u{2029}', '\u{0085}'];

/// Number of U+FFFD replacement characters treated as a decoding failure.
const REPLACEMENT_CHAR_LIMIT: usize = 2;

/// Sanitizer for drafted slide text.
#[derive(Debug, Clone)]
pub struct TextSanitizer {
    /// Whether to keep line structure (bullets and sections depend on it).
    preserve_line_breaks: bool,
}

impl Default for TextSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSanitizer {
    /// Create a sanitizer that preserves line breaks.
    pub fn new() -> Self {
        Self {
            preserve_line_breaks: true,
        }
    }

    /// Set whether to preserve original line breaks.
    pub fn with_preserve_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Sanitize text. Total and idempotent.
    ///
    /// - Returns [`UNPROCESSABLE`] for corrupted input
    /// - Maps typographic spaces, dashes, quotes and ellipses to ASCII
    /// - Normalizes line endings to `\n`
    /// - Collapses whitespace runs and trims every line
    pub fn sanitize(&self, text: &str) -> String {
        if is_corrupted(text) {
            log::warn!(
                "Corrupted content detected ({} bytes), substituting sentinel",
                text.len()
            );
            return UNPROCESSABLE.to_string();
        }

        let text = text.replace("\r\n", "\n").replace('\r', "\n");

        let mut mapped = String::with_capacity(text.len());
        for c in text.nfc() {
            if SPACE_CHARS.contains(&c) || c == '\t' {
                mapped.push(' ');
            } else if ZERO_WIDTH_CHARS.contains(&c) {
                continue;
            } else if DASH_CHARS.contains(&c) {
                mapped.push('-');
            } else if SINGLE_QUOTE_CHARS.contains(&c) {
                mapped.push('\'');
            } else if DOUBLE_QUOTE_CHARS.contains(&c) {
                mapped.push('"');
            } else if LINE_BREAK_CHARS.contains(&c) {
                mapped.push('\n');
            } else if c == '\u{2026}' {
                mapped.push_str("...");
            } else {
                mapped.push(c);
            }
        }

        // Dropped zero-width characters can leave marks free to compose.
        let output: String = mapped.nfc().collect();

        let result = if self.preserve_line_breaks {
            let joined = output
                .lines()
                .map(|line| WHITESPACE_COLLAPSE_REGEX.replace_all(line, " ").trim().to_string())
                .collect::<Vec<_>>()
                .join("\n");
            BLANK_LINES_REGEX.replace_all(&joined, "\n\n").to_string()
        } else {
            output.split_whitespace().collect::<Vec<_>>().join(" ")
        };

        let result = result.trim().to_string();

        // Dropping zero-width characters can join fragments into a signature.
        if is_corrupted(&result) {
            log::warn!("Corruption signature surfaced after normalization, substituting sentinel");
            return UNPROCESSABLE.to_string();
        }

        result
    }
}

/// Sanitize text with the default settings.
pub fn sanitize(text: &str) -> String {
    TextSanitizer::new().sanitize(text)
}

/// Whether sanitized text is the corruption sentinel or blank.
pub fn is_unusable(sanitized: &str) -> bool {
    sanitized == UNPROCESSABLE || sanitized.trim().is_empty()
}

/// Detect corruption signatures: control bytes, replacement characters, mojibake.
fn is_corrupted(text: &str) -> bool {
    let has_control = text
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t' | '\u{0085}'));
    if has_control {
        return true;
    }

    if text.chars().filter(|&c| c == '\u{FFFD}').count() >= REPLACEMENT_CHAR_LIMIT {
        return true;
    }

    MOJIBAKE_REGEX.is_match(text)
}
