//! Planeswalker card renderer

use crate::canvas::{AssetKind, Canvas, FrameStyle};
use crate::layout::{FONT_BADGE, PW_HEIGHT, PW_LAYOUT, PW_WIDTH};
use crate::render::{draw_footer, draw_mana_cost, draw_slot_line, BACKGROUND};
use crate::text_fit::{draw_wrapped_text, Align};
use crate::types::{Color, PlaneswalkerCard, Rect};

/// Shading for alternating ability rows, drawn under the frame
const EVEN_ROW_COLOR: Color = Color::white();
const EVEN_ROW_ALPHA: f64 = 0.608;
const ODD_ROW_COLOR: Color = Color::rgb(164.0 / 255.0, 164.0 / 255.0, 164.0 / 255.0);
const ODD_ROW_ALPHA: f64 = 0.706;

pub fn render_planeswalker<C: Canvas>(card: &PlaneswalkerCard, canvas: &mut C) {
    let (cw, ch) = (PW_WIDTH, PW_HEIGHT);
    let layout = &PW_LAYOUT;

    canvas.prepare(cw, ch);
    canvas.fill_rect(Rect::new(0.0, 0.0, cw, ch), BACKGROUND, 1.0);

    if let Some(url) = &card.base.art_url {
        canvas.draw_art(url, layout.art.scaled(cw, ch));
    }

    // Ability background shading, pre-frame so the frame overlaps its edges.
    let ability_count = card.abilities.len();
    let ability_start_y = layout.ability.rect.y;
    let ability_h = layout.total_ability_height / ability_count.max(1) as f64;

    for i in 0..ability_count {
        let y = (ability_start_y + i as f64 * ability_h) * ch;
        let h = ability_h * ch;
        let x = layout.ability_box.x * cw;
        let w = layout.ability_box.width * cw;
        if i % 2 == 0 {
            canvas.fill_rect(Rect::new(x, y, w, h), EVEN_ROW_COLOR, EVEN_ROW_ALPHA);
        } else {
            canvas.fill_rect(Rect::new(x, y, w, h), ODD_ROW_COLOR, ODD_ROW_ALPHA);
        }

        if i > 0 {
            let separator = if i % 2 == 0 {
                AssetKind::AbilitySeparatorEven
            } else {
                AssetKind::AbilitySeparatorOdd
            };
            let half_h = ch * 0.0048;
            canvas.draw_asset(separator, Rect::new(x, y - half_h, w, half_h * 2.0));
        }
    }

    canvas.draw_asset(
        AssetKind::Frame { style: FrameStyle::Planeswalker, color: card.base.frame_color },
        Rect::new(0.0, 0.0, cw, ch),
    );

    // Loyalty cost icons, post-frame. Rows beyond the frame art's four
    // anchors get text only in their slot, no icon.
    let icon_rows = layout.icon_rows(ability_count);
    let icon_text_size = ch * layout.icon_text_size;
    for (i, ability) in card.abilities.iter().enumerate() {
        let Some(&row) = icon_rows.get(i) else { break };
        let icon_y = row * ch;
        let cost = ability.cost.as_str();

        let (icon, kind, text_drop) = if cost.contains('+') {
            (layout.plus_icon, AssetKind::LoyaltyPlus, 0.0172)
        } else if cost.contains('-') {
            (layout.minus_icon, AssetKind::LoyaltyMinus, 0.0181)
        } else if !cost.is_empty() {
            (layout.neutral_icon, AssetKind::LoyaltyNeutral, 0.0191)
        } else {
            continue; // static ability, no icon
        };

        canvas.draw_asset(
            kind,
            Rect::new(icon.x * cw, icon_y + icon.y_off * ch, icon.width * cw, icon.height * ch),
        );
        let cost_width = canvas.text_width(cost, FONT_BADGE, icon_text_size);
        canvas.fill_text(
            cost,
            layout.icon_text_x * cw - cost_width / 2.0,
            icon_y + text_drop * ch,
            FONT_BADGE,
            icon_text_size,
            Color::white(),
        );
    }

    // Ability text, one auto-fit block per evenly split slot.
    for (i, ability) in card.abilities.iter().enumerate() {
        let slot = Rect::new(
            layout.ability.rect.x * cw,
            (ability_start_y + i as f64 * ability_h) * ch,
            layout.ability.rect.width * cw,
            ability_h * ch,
        );
        draw_wrapped_text(
            canvas,
            &ability.text,
            slot,
            layout.ability.font,
            layout.ability.size * ch,
            Color::black(),
        );
    }

    draw_slot_line(canvas, &card.base.name, &layout.name, cw, ch, Align::Left, Color::black());
    if let Some(mana) = &card.base.mana_cost {
        draw_mana_cost(canvas, mana, cw, ch, &layout.mana);
    }
    draw_slot_line(canvas, &card.base.type_line, &layout.type_line, cw, ch, Align::Left, Color::black());
    draw_slot_line(
        canvas,
        &card.starting_loyalty,
        &layout.loyalty,
        cw,
        ch,
        Align::Center,
        Color::white(),
    );

    draw_footer(canvas, &card.base, cw, ch);
}
