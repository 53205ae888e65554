//! Text measurement
//!
//! Every wrap and fit decision needs the rendered width of a string in the
//! font it will be drawn with. The engine consumes that capability through
//! the [`TextMeasurer`] trait so the embedding surface can supply its own
//! metrics; [`FontRegistry`] is a self-contained implementation backed by
//! ttf-parser for embedders that hand us their font bytes.

use std::collections::HashMap;

use crate::error::{RendererError, RendererResult};

/// Average glyph width (in em) assumed when no real metrics are available
const FALLBACK_CHAR_EM: f64 = 0.6;

/// Measurement interface consumed by the wrap/fit engine.
///
/// Implementations must reflect the exact font family and size the final
/// draw call will use, or wrapped lines will not match the rendered output.
pub trait TextMeasurer {
    /// Width in pixels of `text` rendered in `font` at `size` pixels
    fn text_width(&self, text: &str, font: &str, size: f64) -> f64;
}

/// Fixed-ratio measurer: every character is 0.6 em wide.
///
/// Deterministic and font-independent, which makes it suitable for tests
/// and rough previews; real rendering should use actual font metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMeasurer;

impl TextMeasurer for HeuristicMeasurer {
    fn text_width(&self, text: &str, _font: &str, size: f64) -> f64 {
        text.chars().count() as f64 * size * FALLBACK_CHAR_EM
    }
}

/// Per-face advance table, precomputed at registration time.
///
/// `widths[i]` is the em-unit advance of ASCII character `i + 32`,
/// covering 0x20 (space) through 0x7E (~). Characters outside that range
/// fall back to the face's average width.
#[derive(Debug, Clone)]
struct FaceMetrics {
    widths: [f64; 95],
    average_width: f64,
}

impl FaceMetrics {
    fn char_width(&self, ch: char) -> f64 {
        let code = ch as u32;
        if (0x20..=0x7E).contains(&code) {
            self.widths[(code - 0x20) as usize]
        } else {
            self.average_width
        }
    }
}

/// Font measurement registry keyed by font family name.
///
/// Families are registered from raw TTF/OTF bytes; loading those bytes
/// from disk is the embedder's job. Measuring with an unregistered family
/// degrades to the heuristic ratio rather than failing, so layout always
/// produces a result.
#[derive(Debug, Default)]
pub struct FontRegistry {
    faces: HashMap<String, FaceMetrics>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self { faces: HashMap::new() }
    }

    /// Parse a face and precompute its advance table under `family`
    pub fn register(&mut self, family: &str, data: &[u8]) -> RendererResult<()> {
        let face = ttf_parser::Face::parse(data, 0).map_err(|e| {
            RendererError::FontError(format!("failed to parse font for '{family}': {e}"))
        })?;

        let units_per_em = face.units_per_em() as f64;
        if units_per_em <= 0.0 {
            return Err(RendererError::FontError(format!(
                "font for '{family}' reports zero units per em"
            )));
        }

        let mut widths = [FALLBACK_CHAR_EM; 95];
        let mut sum = 0.0;
        let mut measured = 0usize;
        for (i, byte) in (0x20u8..=0x7E).enumerate() {
            if let Some(advance) = face
                .glyph_index(byte as char)
                .and_then(|gid| face.glyph_hor_advance(gid))
            {
                widths[i] = advance as f64 / units_per_em;
                sum += widths[i];
                measured += 1;
            }
        }
        let average_width = if measured > 0 { sum / measured as f64 } else { FALLBACK_CHAR_EM };

        self.faces.insert(family.to_string(), FaceMetrics { widths, average_width });
        Ok(())
    }

    pub fn contains(&self, family: &str) -> bool {
        self.faces.contains_key(family)
    }
}

impl TextMeasurer for FontRegistry {
    fn text_width(&self, text: &str, font: &str, size: f64) -> f64 {
        match self.faces.get(font) {
            Some(metrics) => text.chars().map(|ch| metrics.char_width(ch)).sum::<f64>() * size,
            None => HeuristicMeasurer.text_width(text, font, size),
        }
    }
}
