// src/convert/detect.rs
// Code-point classification used by auto mode

use once_cell::sync::Lazy;
use regex::Regex;

/// A named, inclusive block of code points treated as emoji.
#[derive(Debug, Clone, Copy)]
pub struct EmojiRange {
    pub start: char,
    pub end: char,
    pub label: &'static str,
}

/// Blocks that mark a string as emoji-bearing.
///
/// Covers the supplementary emoji planes plus the BMP symbol blocks people actually
/// type as emoji (misc symbols, dingbats, arrows and stars, circled M, the few CJK
/// symbol code points with emoji presentation). CJK ideographs, kana and Hangul are
/// deliberately left out so those scripts auto-route as text.
pub const EMOJI_RANGES: &[EmojiRange] = &[
    EmojiRange { start: '\u{1F600}', end: '\u{1F64F}', label: "emoticons" },
    EmojiRange { start: '\u{1F300}', end: '\u{1F5FF}', label: "symbols & pictographs" },
    EmojiRange { start: '\u{1F680}', end: '\u{1F6FF}', label: "transport & map symbols" },
    EmojiRange { start: '\u{1F1E0}', end: '\u{1F1FF}', label: "regional indicator flags" },
    EmojiRange { start: '\u{2600}', end: '\u{26FF}', label: "miscellaneous symbols" },
    EmojiRange { start: '\u{2702}', end: '\u{27B0}', label: "dingbats" },
    EmojiRange { start: '\u{2B00}', end: '\u{2BFF}', label: "miscellaneous symbols & arrows" },
    EmojiRange { start: '\u{24C2}', end: '\u{24C2}', label: "circled latin M" },
    EmojiRange { start: '\u{3030}', end: '\u{3030}', label: "wavy dash" },
    EmojiRange { start: '\u{303D}', end: '\u{303D}', label: "part alternation mark" },
    EmojiRange { start: '\u{3297}', end: '\u{3297}', label: "circled ideograph congratulation" },
    EmojiRange { start: '\u{3299}', end: '\u{3299}', label: "circled ideograph secret" },
    EmojiRange { start: '\u{1F170}', end: '\u{1F251}', label: "enclosed alphanumeric supplement" },
];

static EMOJI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let class: String = EMOJI_RANGES
        .iter()
        .map(|r| format!(r"\x{{{:X}}}-\x{{{:X}}}", r.start as u32, r.end as u32))
        .collect();
    Regex::new(&format!("[{class}]")).expect("emoji range table builds a valid character class")
});

/// Immutable detection rule. Any single match classifies the whole input as emoji-bearing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmojiDetectionRule;

impl EmojiDetectionRule {
    pub fn matches(&self, text: &str) -> bool {
        EMOJI_PATTERN.is_match(text)
    }

    /// First code point that triggered the rule, if any.
    pub fn first_match(&self, text: &str) -> Option<char> {
        EMOJI_PATTERN
            .find(text)
            .and_then(|m| m.as_str().chars().next())
    }
}
