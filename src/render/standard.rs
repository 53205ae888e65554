//! Standard card renderer (creatures, spells, artifacts, lands)

use crate::canvas::{AssetKind, Canvas, FrameStyle};
use crate::layout::{FONT_FLAVOR, STD_HEIGHT, STD_LAYOUT, STD_WIDTH};
use crate::render::{draw_footer, draw_mana_cost, draw_slot_line, BACKGROUND};
use crate::text_fit::{draw_rules_and_flavor, draw_wrapped_text, Align};
use crate::types::{Color, FrameColor, Rect, StandardCard};

pub fn render_standard<C: Canvas>(card: &StandardCard, canvas: &mut C) {
    let (cw, ch) = (STD_WIDTH, STD_HEIGHT);
    let layout = &STD_LAYOUT;
    let color = card.base.frame_color;

    canvas.prepare(cw, ch);
    canvas.fill_rect(Rect::new(0.0, 0.0, cw, ch), BACKGROUND, 1.0);

    if let Some(url) = &card.base.art_url {
        canvas.draw_art(url, layout.art.scaled(cw, ch));
    }

    canvas.draw_asset(
        AssetKind::Frame { style: FrameStyle::Standard, color },
        Rect::new(0.0, 0.0, cw, ch),
    );

    if card.base.is_legendary {
        // Black bar behind the crown's top edge so the frame border shows
        // through where the crown art is transparent.
        canvas.fill_rect(
            Rect::new(0.0, 0.0, cw, (137.0 / 2814.0) * ch),
            Color::black(),
            1.0,
        );
        canvas.draw_asset(AssetKind::LegendCrown { color }, layout.crown.scaled(cw, ch));
    }

    if card.power.is_some() && card.toughness.is_some() {
        canvas.draw_asset(AssetKind::PtBox { color }, layout.pt_box.scaled(cw, ch));
    }

    // Set symbol rect is a right-aligned allotment: the surface fits the
    // image against the rect's right edge, preserving aspect.
    let symbol_h = layout.set_symbol.height * ch;
    canvas.draw_asset(
        AssetKind::SetSymbol { rarity: card.base.rarity },
        Rect::new(
            (layout.set_symbol.x - layout.set_symbol.width) * cw,
            layout.set_symbol.y * ch - symbol_h / 2.0,
            layout.set_symbol.width * cw,
            symbol_h,
        ),
    );

    draw_slot_line(canvas, &card.base.name, &layout.name, cw, ch, Align::Left, Color::black());
    if let Some(mana) = &card.base.mana_cost {
        draw_mana_cost(canvas, mana, cw, ch, &layout.mana);
    }
    draw_slot_line(canvas, &card.base.type_line, &layout.type_line, cw, ch, Align::Left, Color::black());

    let rules_rect = layout.rules.rect.scaled(cw, ch);
    let rules_size = layout.rules.size * ch;
    match (&card.base.rules_text, &card.base.flavor_text) {
        (Some(rules), Some(flavor)) => {
            draw_rules_and_flavor(canvas, rules, flavor, rules_rect, layout.rules.font, rules_size);
        }
        (Some(rules), None) => {
            draw_wrapped_text(canvas, rules, rules_rect, layout.rules.font, rules_size, Color::black());
        }
        (None, Some(flavor)) => {
            draw_wrapped_text(canvas, flavor, rules_rect, FONT_FLAVOR, rules_size, Color::black());
        }
        (None, None) => {}
    }

    if let (Some(power), Some(toughness)) = (&card.power, &card.toughness) {
        // White text for vehicles; their badge art is dark brown.
        let pt_color = if color == FrameColor::Vehicle { Color::white() } else { Color::black() };
        draw_slot_line(
            canvas,
            &format!("{power}/{toughness}"),
            &layout.pt,
            cw,
            ch,
            Align::Center,
            pt_color,
        );
    }

    draw_footer(canvas, &card.base, cw, ch);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::measure::HeuristicMeasurer;
    use crate::parser::parse_card;
    use crate::types::Card;

    fn render(text: &str) -> Vec<DrawOp> {
        let Card::Standard(card) = parse_card(text).unwrap() else {
            panic!("expected standard card");
        };
        let mut canvas = RecordingCanvas::new(HeuristicMeasurer);
        render_standard(&card, &mut canvas);
        canvas.into_ops()
    }

    #[test]
    fn test_creature_draws_pt_box_and_badge_text() {
        let ops = render("Grizzly Bears {1}{G}\nCreature — Bear\n2/2");
        assert!(ops.iter().any(|op| matches!(op, DrawOp::Asset { kind: AssetKind::PtBox { .. }, .. })));
        assert!(ops.iter().any(|op| matches!(op, DrawOp::Text { text, .. } if text == "2/2")));
    }

    #[test]
    fn test_vehicle_pt_text_is_white() {
        let ops = render("Smuggler's Copter {2}\nArtifact — Vehicle\nFlying\n3/3");
        let pt = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { text, color, .. } if text == "3/3" => Some(*color),
                _ => None,
            })
            .expect("P/T badge text drawn");
        assert_eq!(pt, Color::white());
    }

    #[test]
    fn test_rules_and_flavor_get_a_divider() {
        let ops = render(
            "Lightning Bolt {R}\nInstant\nLightning Bolt deals 3 damage to any target.\n*\"The sparkmage shrieked.\"*",
        );
        assert!(ops.iter().any(|op| matches!(op, DrawOp::Line { .. })));
        assert!(ops.iter().any(|op| matches!(
            op,
            DrawOp::Text { font, .. } if font == FONT_FLAVOR
        )));
    }

    #[test]
    fn test_flavor_only_body_uses_the_flavor_font() {
        let ops = render("Plains\nBasic Land — Plains\n---\nEndless fields.");
        let body_fonts: Vec<_> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, font, .. } if text.contains("Endless") => Some(font.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(body_fonts, vec![FONT_FLAVOR.to_string()]);
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Line { .. })));
    }

    #[test]
    fn test_nonlegendary_card_has_no_crown() {
        let ops = render("Lightning Bolt {R}\nInstant\nBolt.");
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Asset { kind: AssetKind::LegendCrown { .. }, .. })));
    }
}
