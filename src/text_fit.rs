//! Font-size fitting and positioned text drawing
//!
//! Boxes on a card have fixed geometry; the text does not. Each fitter
//! searches downward from a starting font size, one unit at a time, and
//! takes the first (largest) size whose layout fits the box. The descent
//! is deliberately linear: wrapping is not monotonic in font size at the
//! edges, so a bisection could settle on a different size than the
//! largest fitting one.
//!
//! Wrapped blocks stop searching at a floor of 8 and are omitted entirely
//! when nothing above it fits: a cramped box never gets illegibly small
//! or clipped text. Single-line fields instead shrink all the way to 1
//! and always draw.

use log::warn;

use crate::canvas::Canvas;
use crate::layout::{FONT_FLAVOR, FONT_HEIGHT_RATIO};
use crate::measure::TextMeasurer;
use crate::text_layout::{
    compute_height, split_paragraphs, tokenize, wrap_paragraphs, WrappedLine, SYMBOL_GAP_RATIO,
    SYMBOL_SIZE_RATIO,
};
use crate::types::{Color, Rect, RichToken};

/// Smallest size tried for wrapped text blocks (exclusive)
const WRAP_MIN_SIZE: f64 = 8.0;
/// Smallest size tried for single-line fields (exclusive); they always draw
const LINE_MIN_SIZE: f64 = 1.0;
/// Extra separation added before a paragraph's first line, per text size
const PARA_SPACING_RATIO: f64 = 0.35;
/// Divider bar thickness between rules and flavor text
const FLAVOR_BAR_HEIGHT: f64 = 8.0;
/// Outline pass width for body text
const BODY_STROKE_WIDTH: f64 = 0.4;

/// Horizontal alignment for single-line fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Outcome of a successful wrapped-text fit
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub size: f64,
    pub height: f64,
}

/// Draw one line of rich text at a baseline, advancing through tokens.
///
/// Symbols are drawn as squares of 0.78× the text size, raised off the
/// baseline; the pen advances past a symbol whether or not the surface
/// has an image for it, so missing assets cannot shift the rest of the
/// line.
pub fn draw_rich_line<C: Canvas>(
    canvas: &mut C,
    text: &str,
    x: f64,
    baseline_y: f64,
    font: &str,
    size: f64,
    color: Color,
    stroke_width: f64,
) {
    let symbol_size = size * SYMBOL_SIZE_RATIO;
    let spacing = size * SYMBOL_GAP_RATIO / 2.0;
    let mut cur_x = x;
    for token in tokenize(text) {
        match token {
            RichToken::Text(run) => {
                canvas.fill_text_heavy(&run, cur_x, baseline_y, font, size, color, stroke_width);
                cur_x += canvas.text_width(&run, font, size);
            }
            RichToken::Symbol(key) => {
                let symbol_y = baseline_y - symbol_size * 0.85;
                canvas.draw_symbol(
                    &key,
                    Rect::new(cur_x + spacing, symbol_y, symbol_size, symbol_size),
                );
                cur_x += symbol_size + spacing * 2.0;
            }
        }
    }
}

/// Largest size ≤ `start_size` at which `text` measures within `max_width`.
///
/// Bottoms out at 1; a single-line field is always drawable.
pub fn fit_single_line<M: TextMeasurer>(
    measurer: &M,
    text: &str,
    font: &str,
    max_width: f64,
    start_size: f64,
) -> f64 {
    let mut size = start_size;
    while size > LINE_MIN_SIZE {
        if measurer.text_width(text, font, size) <= max_width {
            break;
        }
        size -= 1.0;
    }
    size
}

/// Fit and draw a non-wrapping field (name, type line, numeric badge).
///
/// Returns the size actually used.
pub fn draw_single_line_text<C: Canvas>(
    canvas: &mut C,
    text: &str,
    rect: Rect,
    font: &str,
    start_size: f64,
    align: Align,
    color: Color,
) -> f64 {
    let size = fit_single_line(canvas, text, font, rect.width, start_size);
    let width = canvas.text_width(text, font, size);
    let draw_x = match align {
        Align::Left => rect.x,
        Align::Center => rect.x + (rect.width - width) / 2.0,
        Align::Right => rect.x + rect.width - width,
    };
    let vertical_adjust = (rect.height - size * 0.85) / 2.0;
    canvas.fill_text(
        text,
        draw_x,
        rect.y + vertical_adjust + size * FONT_HEIGHT_RATIO,
        font,
        size,
        color,
    );
    size
}

/// Search for the largest size at which `paragraphs` wrap into `box_height`.
///
/// Wrapping is redone at every candidate size because measurement scales
/// with size. Returns the chosen size and the wrapped lines, or `None`
/// when no size above the floor fits.
fn fit_paragraphs<M: TextMeasurer>(
    measurer: &M,
    paragraphs: &[&str],
    font: &str,
    max_width: f64,
    box_height: f64,
    start_size: f64,
) -> Option<(f64, Vec<WrappedLine>, f64)> {
    let mut size = start_size;
    while size > WRAP_MIN_SIZE {
        let lines = wrap_paragraphs(measurer, paragraphs, font, max_width, size);
        let total = compute_height(&lines, size, size * PARA_SPACING_RATIO);
        if total <= box_height {
            return Some((size, lines, total));
        }
        size -= 1.0;
    }
    None
}

/// Auto-fit search over a single wrapped block, without drawing
pub fn fit_wrapped_text<M: TextMeasurer>(
    measurer: &M,
    text: &str,
    font: &str,
    max_width: f64,
    box_height: f64,
    start_size: f64,
) -> Option<FittedText> {
    let paragraphs = split_paragraphs(text);
    fit_paragraphs(measurer, &paragraphs, font, max_width, box_height, start_size)
        .map(|(size, _, height)| FittedText { size, height })
}

/// Fit a wrapped text block into a box and draw it vertically centered.
///
/// When no size above the floor fits, nothing is drawn and `None` is
/// returned; the block is omitted rather than rendered clipped.
pub fn draw_wrapped_text<C: Canvas>(
    canvas: &mut C,
    text: &str,
    rect: Rect,
    font: &str,
    start_size: f64,
    color: Color,
) -> Option<FittedText> {
    let paragraphs = split_paragraphs(text);
    let Some((size, lines, total)) =
        fit_paragraphs(canvas, &paragraphs, font, rect.width, rect.height, start_size)
    else {
        warn!("text block does not fit its box at any usable size; omitting");
        return None;
    };

    let para_spacing = size * PARA_SPACING_RATIO;
    let vertical_adjust = (rect.height - total + size * 0.15) / 2.0;
    let mut cur_y = 0.0;
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            cur_y += size;
            if line.para_start {
                cur_y += para_spacing;
            }
        }
        draw_rich_line(
            canvas,
            &line.text,
            rect.x,
            rect.y + vertical_adjust + cur_y + size * FONT_HEIGHT_RATIO,
            font,
            size,
            color,
            BODY_STROKE_WIDTH,
        );
    }
    Some(FittedText { size, height: total })
}

/// Fit and draw a combined rules + divider + flavor block as one unit.
///
/// Both sections shrink in lockstep: each candidate size wraps the rules
/// in the body font and the flavor in the italic flavor font, and the
/// trial height covers rules, a fixed-thickness divider with a text-size
/// gap on both sides, and flavor. Returns the shared size, or `None`
/// (nothing drawn) when the combined block fits at no usable size.
pub fn draw_rules_and_flavor<C: Canvas>(
    canvas: &mut C,
    rules_text: &str,
    flavor_text: &str,
    rect: Rect,
    font: &str,
    start_size: f64,
) -> Option<f64> {
    let rule_paras = split_paragraphs(rules_text);
    let flavor_paras = split_paragraphs(flavor_text);

    let mut size = start_size;
    while size > WRAP_MIN_SIZE {
        let rules_lines = wrap_paragraphs(canvas, &rule_paras, font, rect.width, size);
        let flavor_size = size;
        let flavor_lines =
            wrap_paragraphs(canvas, &flavor_paras, FONT_FLAVOR, rect.width, flavor_size);
        let para_spacing = size * PARA_SPACING_RATIO;
        let mut total = compute_height(&rules_lines, size, para_spacing);
        total += size + FLAVOR_BAR_HEIGHT + size;
        total += compute_height(&flavor_lines, flavor_size, flavor_size * PARA_SPACING_RATIO);

        if total <= rect.height {
            let vertical_adjust = (rect.height - total + size * 0.15) / 2.0;
            let mut cur_y = 0.0;
            for (i, line) in rules_lines.iter().enumerate() {
                if i > 0 {
                    cur_y += size;
                    if line.para_start {
                        cur_y += para_spacing;
                    }
                }
                draw_rich_line(
                    canvas,
                    &line.text,
                    rect.x,
                    rect.y + vertical_adjust + cur_y + size * FONT_HEIGHT_RATIO,
                    font,
                    size,
                    Color::black(),
                    BODY_STROKE_WIDTH,
                );
            }

            cur_y += size + size * 0.5;
            let bar_y = rect.y + vertical_adjust + cur_y;
            let bar_width = rect.width * 0.85;
            let bar_x = rect.x + (rect.width - bar_width) / 2.0;
            canvas.draw_line(bar_x, bar_y, bar_x + bar_width, bar_y, 2.0, Color::black(), 0.35);
            cur_y += FLAVOR_BAR_HEIGHT + size * 0.5;

            for (i, line) in flavor_lines.iter().enumerate() {
                if i > 0 {
                    cur_y += flavor_size;
                    if line.para_start {
                        cur_y += flavor_size * PARA_SPACING_RATIO;
                    }
                }
                draw_rich_line(
                    canvas,
                    &line.text,
                    rect.x,
                    rect.y + vertical_adjust + cur_y + flavor_size * FONT_HEIGHT_RATIO,
                    FONT_FLAVOR,
                    flavor_size,
                    Color::black(),
                    BODY_STROKE_WIDTH,
                );
            }
            return Some(size);
        }
        size -= 1.0;
    }
    warn!("rules/flavor block does not fit its box at any usable size; omitting");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::layout::FONT_BODY;
    use crate::measure::HeuristicMeasurer;

    fn canvas() -> RecordingCanvas<HeuristicMeasurer> {
        RecordingCanvas::new(HeuristicMeasurer)
    }

    fn text_ops(ops: &[DrawOp]) -> Vec<&DrawOp> {
        ops.iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
            .collect()
    }

    #[test]
    fn test_single_line_keeps_start_size_when_it_fits() {
        let mut c = canvas();
        let used = draw_single_line_text(
            &mut c,
            "Bolt",
            Rect::new(0.0, 0.0, 500.0, 40.0),
            FONT_BODY,
            30.0,
            Align::Left,
            Color::black(),
        );
        assert_eq!(used, 30.0);
    }

    #[test]
    fn test_single_line_shrinks_until_it_fits() {
        let m = HeuristicMeasurer;
        // 20 chars * 0.6em: fits a 150px box at size 12.5 and below.
        let used = fit_single_line(&m, "abcdefghijklmnopqrst", FONT_BODY, 150.0, 30.0);
        assert!(m.text_width("abcdefghijklmnopqrst", FONT_BODY, used) <= 150.0);
        assert!(m.text_width("abcdefghijklmnopqrst", FONT_BODY, used + 1.0) > 150.0);
    }

    #[test]
    fn test_single_line_never_fails_to_render() {
        let mut c = canvas();
        let long = "an implausibly long single-line name that cannot fit";
        let used = draw_single_line_text(
            &mut c,
            long,
            Rect::new(0.0, 0.0, 10.0, 20.0),
            FONT_BODY,
            24.0,
            Align::Left,
            Color::black(),
        );
        assert!(used <= 1.0);
        assert_eq!(text_ops(&c.ops).len(), 1);
    }

    #[test]
    fn test_single_line_alignment() {
        let rect = Rect::new(100.0, 0.0, 200.0, 40.0);
        for (align, expected_x) in [
            (Align::Left, 100.0),
            // width of "hi" at size 20 = 2 * 20 * 0.6 = 24
            (Align::Center, 100.0 + (200.0 - 24.0) / 2.0),
            (Align::Right, 100.0 + 200.0 - 24.0),
        ] {
            let mut c = canvas();
            draw_single_line_text(&mut c, "hi", rect, FONT_BODY, 20.0, align, Color::black());
            match &c.ops[0] {
                DrawOp::Text { x, .. } => assert!((x - expected_x).abs() < 1e-9),
                other => panic!("unexpected op {other:?}"),
            }
        }
    }

    #[test]
    fn test_single_line_baseline_centering() {
        let mut c = canvas();
        draw_single_line_text(
            &mut c,
            "hi",
            Rect::new(0.0, 100.0, 500.0, 50.0),
            FONT_BODY,
            20.0,
            Align::Left,
            Color::black(),
        );
        match &c.ops[0] {
            DrawOp::Text { baseline_y, .. } => {
                let expected = 100.0 + (50.0 - 20.0 * 0.85) / 2.0 + 20.0 * 0.7;
                assert!((baseline_y - expected).abs() < 1e-9);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_auto_fit_picks_largest_fitting_size() {
        let m = HeuristicMeasurer;
        let text = "Some reasonably sized rules text that wraps a little.";
        let fitted = fit_wrapped_text(&m, text, FONT_BODY, 300.0, 200.0, 30.0).unwrap();
        assert_eq!(fitted.size, 30.0);
    }

    #[test]
    fn test_auto_fit_shrinks_to_fit() {
        let m = HeuristicMeasurer;
        let text = "word ".repeat(40);
        let fitted = fit_wrapped_text(&m, &text, FONT_BODY, 300.0, 120.0, 30.0).unwrap();
        assert!(fitted.size < 30.0);
        assert!(fitted.size > 8.0);
        assert!(fitted.height <= 120.0);
    }

    #[test]
    fn test_auto_fit_is_monotonic_in_box_height() {
        let m = HeuristicMeasurer;
        let text = "word ".repeat(60);
        let mut previous = 0.0;
        for box_height in [60.0, 90.0, 120.0, 200.0, 400.0] {
            let size = fit_wrapped_text(&m, &text, FONT_BODY, 300.0, box_height, 30.0)
                .map(|f| f.size)
                .unwrap_or(0.0);
            assert!(
                size >= previous,
                "more room must never force smaller text ({size} < {previous})"
            );
            previous = size;
        }
    }

    #[test]
    fn test_no_usable_size_omits_the_block() {
        let m = HeuristicMeasurer;
        let text = "word ".repeat(500);
        assert_eq!(fit_wrapped_text(&m, &text, FONT_BODY, 200.0, 3.0, 30.0), None);

        // And the drawing entry point emits nothing at all.
        let mut c = canvas();
        let result = draw_wrapped_text(
            &mut c,
            &text,
            Rect::new(0.0, 0.0, 200.0, 3.0),
            FONT_BODY,
            30.0,
            Color::black(),
        );
        assert_eq!(result, None);
        assert!(c.ops.is_empty());
    }

    #[test]
    fn test_wrapped_text_draws_every_line() {
        let mut c = canvas();
        let fitted = draw_wrapped_text(
            &mut c,
            "First paragraph of card text.\nSecond paragraph.",
            Rect::new(10.0, 10.0, 300.0, 300.0),
            FONT_BODY,
            20.0,
            Color::black(),
        )
        .unwrap();
        assert_eq!(fitted.size, 20.0);
        let texts = text_ops(&c.ops);
        assert!(texts.len() >= 2);
        for op in texts {
            match op {
                DrawOp::Text { x, stroke_width, .. } => {
                    assert_eq!(*x, 10.0);
                    assert_eq!(*stroke_width, Some(0.4));
                }
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn test_rich_line_advances_past_missing_symbols() {
        let mut c = canvas();
        draw_rich_line(&mut c, "{T}: Add {C}.", 100.0, 50.0, FONT_BODY, 20.0, Color::black(), 0.4);
        let symbol_size = 20.0 * 0.78;
        match &c.ops[0] {
            DrawOp::Symbol { key, rect } => {
                assert_eq!(key, "T");
                assert!((rect.x - (100.0 + 20.0 * 0.03)).abs() < 1e-9);
                assert!((rect.y - (50.0 - symbol_size * 0.85)).abs() < 1e-9);
                assert_eq!(rect.width, symbol_size);
            }
            other => panic!("unexpected op {other:?}"),
        }
        // The text run after the symbol starts exactly one symbol advance in.
        match &c.ops[1] {
            DrawOp::Text { text, x, .. } => {
                assert_eq!(text, ": Add ");
                assert!((x - (100.0 + symbol_size + 2.0 * 20.0 * 0.03)).abs() < 1e-9);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_dual_section_draws_rules_divider_flavor_in_order() {
        let mut c = canvas();
        let size = draw_rules_and_flavor(
            &mut c,
            "Destroy all creatures.",
            "\"Legend speaks of the Creators' rage.\"",
            Rect::new(0.0, 0.0, 400.0, 400.0),
            FONT_BODY,
            20.0,
        )
        .unwrap();
        assert_eq!(size, 20.0);

        let divider_index = c
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::Line { .. }))
            .expect("divider drawn");
        let before: Vec<_> = text_ops(&c.ops[..divider_index]);
        let after: Vec<_> = text_ops(&c.ops[divider_index..]);
        assert!(!before.is_empty() && !after.is_empty());
        for op in &after {
            match op {
                DrawOp::Text { font, .. } => assert_eq!(font, FONT_FLAVOR),
                _ => unreachable!(),
            }
        }
        match &c.ops[divider_index] {
            DrawOp::Line { x1, x2, alpha, width, .. } => {
                assert!((x2 - x1 - 400.0 * 0.85).abs() < 1e-9);
                assert_eq!(*alpha, 0.35);
                assert_eq!(*width, 2.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_dual_section_shares_one_size_across_sections() {
        let mut c = canvas();
        // Rules long enough to force shrinking; flavor short.
        let rules = "word ".repeat(60);
        let size = draw_rules_and_flavor(
            &mut c,
            &rules,
            "Short flavor.",
            Rect::new(0.0, 0.0, 300.0, 220.0),
            FONT_BODY,
            30.0,
        )
        .unwrap();
        assert!(size < 30.0);
        for op in text_ops(&c.ops) {
            match op {
                DrawOp::Text { size: drawn, .. } => assert_eq!(*drawn, size),
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn test_dual_section_no_fit_draws_nothing() {
        let mut c = canvas();
        let result = draw_rules_and_flavor(
            &mut c,
            &"word ".repeat(400),
            &"flavor ".repeat(100),
            Rect::new(0.0, 0.0, 200.0, 10.0),
            FONT_BODY,
            24.0,
        );
        assert_eq!(result, None);
        assert!(c.ops.is_empty());
    }
}
