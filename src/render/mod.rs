//! Per-card-type renderers
//!
//! Each renderer walks its card variant in the frame artwork's draw order
//! and emits primitives against the [`Canvas`] surface; all geometry comes
//! from the `layout` tables. Shared pieces (mana cost row, collector
//! footer, single-line slots) live here.

pub mod battle;
pub mod planeswalker;
pub mod saga;
pub mod standard;

use crate::canvas::Canvas;
use crate::layout::{
    ManaSlot, TextSlot, FONT_BODY, FOOTER_DEFAULT_NUMBER, FOOTER_DEFAULT_SET, FOOTER_FONT_SIZE,
    FOOTER_LEFT_X, FOOTER_PRODUCT_MARK, FOOTER_RIGHT_X, FOOTER_Y,
};
use crate::symbols::parse_mana_string;
use crate::text_fit::{draw_single_line_text, Align};
use crate::text_layout::SYMBOL_SIZE_RATIO;
use crate::types::{Card, CardBase, Color, Rect};

/// Card background behind art and frame
pub(crate) const BACKGROUND: Color = Color::rgb(26.0 / 255.0, 26.0 / 255.0, 26.0 / 255.0);

/// Render a parsed card onto the surface
pub fn render_card<C: Canvas>(card: &Card, canvas: &mut C) {
    match card {
        Card::Standard(c) => standard::render_standard(c, canvas),
        Card::Planeswalker(c) => planeswalker::render_planeswalker(c, canvas),
        Card::Saga(c) => saga::render_saga(c, canvas),
        Card::Battle(c) => battle::render_battle(c, canvas),
    }
}

/// Fit-and-draw a single-line slot from a layout table
pub(crate) fn draw_slot_line<C: Canvas>(
    canvas: &mut C,
    text: &str,
    slot: &TextSlot,
    cw: f64,
    ch: f64,
    align: Align,
    color: Color,
) {
    draw_single_line_text(
        canvas,
        text,
        slot.rect.scaled(cw, ch),
        slot.font,
        slot.size * ch,
        align,
        color,
    );
}

/// Draw the mana cost as a right-anchored row of symbol images with a
/// drop shadow. Symbols without an image are silent no-ops surface-side;
/// their space is still reserved so the row keeps its width.
pub(crate) fn draw_mana_cost<C: Canvas>(canvas: &mut C, mana: &str, cw: f64, ch: f64, slot: &ManaSlot) {
    let symbols = parse_mana_string(mana);
    if symbols.is_empty() {
        return;
    }

    let text_size = slot.size * ch;
    let symbol_size = text_size * SYMBOL_SIZE_RATIO;
    let spacing = text_size * 0.04;
    let total_width = symbols.len() as f64 * (symbol_size + spacing * 2.0);
    let right_x = slot.right * cw;
    let symbol_center_y = slot.y * ch + text_size * 0.32;

    canvas.set_shadow(slot.shadow_x * cw, slot.shadow_y * ch, 3.0);
    let mut x = right_x - total_width;
    for symbol in &symbols {
        canvas.draw_symbol(
            symbol,
            Rect::new(x + spacing, symbol_center_y - symbol_size / 2.0, symbol_size, symbol_size),
        );
        x += symbol_size + spacing * 2.0;
    }
    canvas.clear_shadow();
}

/// Collector footer: number/set line, optional artist credit, product mark
pub(crate) fn draw_footer<C: Canvas>(canvas: &mut C, base: &CardBase, cw: f64, ch: f64) {
    let font_size = ch * FOOTER_FONT_SIZE;
    let y = ch * FOOTER_Y;
    let left_x = cw * FOOTER_LEFT_X;
    let right_x = cw * FOOTER_RIGHT_X;

    canvas.set_shadow(1.0, 1.0, 2.0);
    let number = base.collector_number.as_deref().unwrap_or(FOOTER_DEFAULT_NUMBER);
    let set_code = base.set_code.as_deref().unwrap_or(FOOTER_DEFAULT_SET);
    canvas.fill_text(
        &format!("{number} \u{2022} {set_code}"),
        left_x,
        y,
        FONT_BODY,
        font_size,
        Color::white(),
    );
    if let Some(artist) = base.artist.as_deref().filter(|a| !a.is_empty()) {
        canvas.fill_text(
            &format!("\u{1F58C}\u{FE0E} {artist}"),
            left_x,
            y + font_size * 1.4,
            FONT_BODY,
            font_size,
            Color::white(),
        );
    }
    let mark_width = canvas.text_width(FOOTER_PRODUCT_MARK, FONT_BODY, font_size);
    canvas.fill_text(
        FOOTER_PRODUCT_MARK,
        right_x - mark_width,
        y + font_size * 1.4,
        FONT_BODY,
        font_size,
        Color::white(),
    );
    canvas.clear_shadow();
}
