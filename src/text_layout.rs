//! Rich-text layout: tokenizing, measurement and line wrapping
//!
//! Card text mixes literal runs with inline symbol references like `{T}`
//! or `{G/P}`. This module turns such strings into tokens, measures them
//! (symbols occupy a fixed fraction of the text size whether or not an
//! image exists for them), and wraps paragraphs greedily into a width
//! budget. Font-size fitting on top of these primitives lives in
//! `text_fit`.

use crate::measure::TextMeasurer;
use crate::types::RichToken;

/// Inline symbol glyphs are squares of this fraction of the text size
pub const SYMBOL_SIZE_RATIO: f64 = 0.78;
/// Horizontal room reserved around each symbol, as a fraction of text size
pub const SYMBOL_GAP_RATIO: f64 = 0.06;

/// Split a string into literal-text and symbol tokens.
///
/// Symbols are `{...}` groups; their contents are kept verbatim. A `{`
/// with no closing `}` is not an error; the rest of the string becomes
/// one trailing text token.
pub fn tokenize(text: &str) -> Vec<RichToken> {
    let mut tokens = Vec::new();
    let mut remaining = text;
    while !remaining.is_empty() {
        let Some(open) = remaining.find('{') else {
            tokens.push(RichToken::Text(remaining.to_string()));
            break;
        };
        if open > 0 {
            tokens.push(RichToken::Text(remaining[..open].to_string()));
        }
        let Some(close) = remaining[open..].find('}') else {
            tokens.push(RichToken::Text(remaining[open..].to_string()));
            break;
        };
        let close = open + close;
        tokens.push(RichToken::Symbol(remaining[open + 1..close].to_string()));
        remaining = &remaining[close + 1..];
    }
    tokens
}

/// Measured width of a token sequence at the given text size
pub fn measure_token_width<M: TextMeasurer>(
    measurer: &M,
    tokens: &[RichToken],
    font: &str,
    size: f64,
) -> f64 {
    let symbol_size = size * SYMBOL_SIZE_RATIO;
    let spacing = size * SYMBOL_GAP_RATIO;
    let mut width = 0.0;
    for token in tokens {
        match token {
            RichToken::Text(text) => width += measurer.text_width(text, font, size),
            RichToken::Symbol(_) => width += symbol_size + spacing,
        }
    }
    width
}

/// Measured width of a raw rich-text string at the given text size
pub fn measure_rich_text<M: TextMeasurer>(measurer: &M, text: &str, font: &str, size: f64) -> f64 {
    measure_token_width(measurer, &tokenize(text), font, size)
}

/// One wrapped output line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    pub text: String,
    /// True only for the first line of every paragraph after the first;
    /// downstream spacing hangs off this flag
    pub para_start: bool,
}

/// Split body text into paragraphs on explicit newlines, dropping blanks
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split('\n').filter(|p| !p.trim().is_empty()).collect()
}

/// Greedily wrap paragraphs into lines no wider than `max_width`.
///
/// Words are accumulated until the measured candidate line would exceed
/// the budget; a single word wider than the budget is emitted as an
/// overlong line rather than split.
pub fn wrap_paragraphs<M: TextMeasurer>(
    measurer: &M,
    paragraphs: &[&str],
    font: &str,
    max_width: f64,
    size: f64,
) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    for (p, paragraph) in paragraphs.iter().enumerate() {
        let mut current = String::new();
        let mut first = true;
        for word in paragraph.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure_rich_text(measurer, &candidate, font, size) > max_width && !current.is_empty() {
                lines.push(WrappedLine { text: current, para_start: first && p > 0 });
                current = word.to_string();
                first = false;
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(WrappedLine { text: current, para_start: first && p > 0 });
        }
    }
    lines
}

/// Total vertical extent of wrapped lines.
///
/// Each line advances by one text size; a paragraph start adds
/// `para_spacing` on top of the normal advance.
pub fn compute_height(lines: &[WrappedLine], size: f64, para_spacing: f64) -> f64 {
    if lines.is_empty() {
        return 0.0;
    }
    let mut height = size;
    for line in &lines[1..] {
        height += size;
        if line.para_start {
            height += para_spacing;
        }
    }
    height
}
