//! Drawing surface abstraction
//!
//! The engine computes positions; everything pixel-shaped (decoding,
//! compositing, rasterization, asset lookup on disk) happens behind the
//! [`Canvas`] trait supplied by the embedder. [`RecordingCanvas`] is a
//! reference implementation that accumulates the emitted primitives as a
//! [`DrawOp`] list, for tests and for hosts that replay instructions.

use serde::{Deserialize, Serialize};

use crate::measure::TextMeasurer;
use crate::types::{Color, FrameColor, Rarity, Rect};

/// Which card frame family an asset belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStyle {
    Standard,
    Planeswalker,
    Saga,
    Battle,
}

/// Semantic reference to a packaged artwork asset.
///
/// The surface owns the mapping from these to actual files/pixels; a
/// reference it cannot resolve is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "asset", rename_all = "snake_case")]
pub enum AssetKind {
    Frame { style: FrameStyle, color: FrameColor },
    LegendCrown { color: FrameColor },
    PtBox { color: FrameColor },
    SetSymbol { rarity: Rarity },
    /// Separator bar above an even-indexed planeswalker ability slot
    AbilitySeparatorEven,
    AbilitySeparatorOdd,
    LoyaltyPlus,
    LoyaltyMinus,
    LoyaltyNeutral,
    ChapterBadge,
    ChapterDivider,
}

/// One recorded drawing primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Prepare {
        width: f64,
        height: f64,
    },
    FillRect {
        rect: Rect,
        color: Color,
        alpha: f64,
    },
    Text {
        text: String,
        x: f64,
        baseline_y: f64,
        font: String,
        size: f64,
        color: Color,
        /// Present when the glyphs get an outline pass under the fill
        stroke_width: Option<f64>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Color,
        alpha: f64,
    },
    Symbol {
        key: String,
        rect: Rect,
    },
    Asset {
        kind: AssetKind,
        rect: Rect,
    },
    Art {
        url: String,
        rect: Rect,
    },
    Shadow {
        dx: f64,
        dy: f64,
        blur: f64,
    },
    ClearShadow,
}

/// Graphics surface consumed by the renderers.
///
/// Coordinates are in pixels, y growing downward, text positioned by its
/// alphabetic baseline. `draw_art` receives the artwork URL untouched:
/// fetching, decoding and aspect-cropping are surface concerns, as is
/// resolving [`AssetKind`]s and symbol keys to images (missing ones are
/// silent no-ops).
pub trait Canvas: TextMeasurer {
    /// Announce the canvas dimensions before any drawing for a card
    fn prepare(&mut self, width: f64, height: f64);

    fn fill_rect(&mut self, rect: Rect, color: Color, alpha: f64);

    fn fill_text(&mut self, text: &str, x: f64, baseline_y: f64, font: &str, size: f64, color: Color);

    /// Fill with an outline pass of the same color underneath, thickening
    /// the glyphs slightly
    fn fill_text_heavy(
        &mut self,
        text: &str,
        x: f64,
        baseline_y: f64,
        font: &str,
        size: f64,
        color: Color,
        stroke_width: f64,
    );

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Color, alpha: f64);

    /// Draw the image for an inline symbol reference, if one is known
    fn draw_symbol(&mut self, key: &str, rect: Rect);

    fn draw_asset(&mut self, kind: AssetKind, rect: Rect);

    fn draw_art(&mut self, url: &str, rect: Rect);

    /// Drop shadow applied to subsequent draws until cleared
    fn set_shadow(&mut self, dx: f64, dy: f64, blur: f64);

    fn clear_shadow(&mut self);
}

/// Canvas that records every primitive it receives.
///
/// Measurement is delegated to the wrapped measurer so recorded layouts
/// match what a real surface with the same metrics would produce.
#[derive(Debug, Default)]
pub struct RecordingCanvas<M: TextMeasurer> {
    measurer: M,
    pub ops: Vec<DrawOp>,
}

impl<M: TextMeasurer> RecordingCanvas<M> {
    pub fn new(measurer: M) -> Self {
        Self { measurer, ops: Vec::new() }
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

impl<M: TextMeasurer> TextMeasurer for RecordingCanvas<M> {
    fn text_width(&self, text: &str, font: &str, size: f64) -> f64 {
        self.measurer.text_width(text, font, size)
    }
}

impl<M: TextMeasurer> Canvas for RecordingCanvas<M> {
    fn prepare(&mut self, width: f64, height: f64) {
        self.ops.push(DrawOp::Prepare { width, height });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color, alpha: f64) {
        self.ops.push(DrawOp::FillRect { rect, color, alpha });
    }

    fn fill_text(&mut self, text: &str, x: f64, baseline_y: f64, font: &str, size: f64, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            baseline_y,
            font: font.to_string(),
            size,
            color,
            stroke_width: None,
        });
    }

    fn fill_text_heavy(
        &mut self,
        text: &str,
        x: f64,
        baseline_y: f64,
        font: &str,
        size: f64,
        color: Color,
        stroke_width: f64,
    ) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            baseline_y,
            font: font.to_string(),
            size,
            color,
            stroke_width: Some(stroke_width),
        });
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Color, alpha: f64) {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2, width, color, alpha });
    }

    fn draw_symbol(&mut self, key: &str, rect: Rect) {
        self.ops.push(DrawOp::Symbol { key: key.to_string(), rect });
    }

    fn draw_asset(&mut self, kind: AssetKind, rect: Rect) {
        self.ops.push(DrawOp::Asset { kind, rect });
    }

    fn draw_art(&mut self, url: &str, rect: Rect) {
        self.ops.push(DrawOp::Art { url: url.to_string(), rect });
    }

    fn set_shadow(&mut self, dx: f64, dy: f64, blur: f64) {
        self.ops.push(DrawOp::Shadow { dx, dy, blur });
    }

    fn clear_shadow(&mut self) {
        self.ops.push(DrawOp::ClearShadow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::HeuristicMeasurer;

    #[test]
    fn test_recording_preserves_order_and_detail() {
        let mut canvas = RecordingCanvas::new(HeuristicMeasurer);
        canvas.prepare(100.0, 200.0);
        canvas.fill_text("Name", 5.0, 20.0, "Beleren Bold", 12.0, Color::black());
        canvas.fill_text_heavy("I", 8.0, 30.0, "MPlantin", 10.0, Color::black(), 0.6);
        canvas.draw_symbol("G/P", Rect::new(0.0, 0.0, 9.0, 9.0));

        assert_eq!(canvas.ops.len(), 4);
        assert_eq!(canvas.ops[0], DrawOp::Prepare { width: 100.0, height: 200.0 });
        match &canvas.ops[1] {
            DrawOp::Text { text, stroke_width, .. } => {
                assert_eq!(text, "Name");
                assert_eq!(*stroke_width, None);
            }
            other => panic!("unexpected op {other:?}"),
        }
        match &canvas.ops[2] {
            DrawOp::Text { stroke_width, .. } => assert_eq!(*stroke_width, Some(0.6)),
            other => panic!("unexpected op {other:?}"),
        }
        match &canvas.ops[3] {
            DrawOp::Symbol { key, .. } => assert_eq!(key, "G/P"),
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_measurement_delegates_to_wrapped_measurer() {
        let canvas = RecordingCanvas::new(HeuristicMeasurer);
        assert_eq!(
            canvas.text_width("abcd", "MPlantin", 10.0),
            HeuristicMeasurer.text_width("abcd", "MPlantin", 10.0)
        );
    }
}
