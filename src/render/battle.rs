//! Battle card renderer (landscape)

use crate::canvas::{AssetKind, Canvas, FrameStyle};
use crate::layout::{BTL_HEIGHT, BTL_LAYOUT, BTL_WIDTH};
use crate::render::{draw_mana_cost, draw_slot_line, BACKGROUND};
use crate::text_fit::{draw_wrapped_text, Align};
use crate::types::{BattleCard, Color, Rect};

pub fn render_battle<C: Canvas>(card: &BattleCard, canvas: &mut C) {
    let (cw, ch) = (BTL_WIDTH, BTL_HEIGHT);
    let layout = &BTL_LAYOUT;

    canvas.prepare(cw, ch);
    canvas.fill_rect(Rect::new(0.0, 0.0, cw, ch), BACKGROUND, 1.0);

    if let Some(url) = &card.base.art_url {
        canvas.draw_art(url, layout.art.scaled(cw, ch));
    }

    canvas.draw_asset(
        AssetKind::Frame { style: FrameStyle::Battle, color: card.base.frame_color },
        Rect::new(0.0, 0.0, cw, ch),
    );

    draw_slot_line(canvas, &card.base.name, &layout.name, cw, ch, Align::Left, Color::black());
    if let Some(mana) = &card.base.mana_cost {
        draw_mana_cost(canvas, mana, cw, ch, &layout.mana);
    }
    draw_slot_line(canvas, &card.base.type_line, &layout.type_line, cw, ch, Align::Left, Color::black());

    if let Some(rules) = &card.base.rules_text {
        draw_wrapped_text(
            canvas,
            rules,
            layout.rules.rect.scaled(cw, ch),
            layout.rules.font,
            layout.rules.size * ch,
            Color::black(),
        );
    }

    draw_slot_line(
        canvas,
        &card.defense,
        &layout.defense,
        cw,
        ch,
        Align::Center,
        Color::white(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::measure::HeuristicMeasurer;
    use crate::parser::parse_card;
    use crate::types::Card;

    fn render(text: &str) -> Vec<DrawOp> {
        let Card::Battle(card) = parse_card(text).unwrap() else {
            panic!("expected battle card");
        };
        let mut canvas = RecordingCanvas::new(HeuristicMeasurer);
        render_battle(&card, &mut canvas);
        canvas.into_ops()
    }

    #[test]
    fn test_battle_canvas_is_landscape() {
        let ops = render("Invasion of Gobakhan {1}{W}\nBattle — Siege\nSome rules.\nDefense: 3");
        match ops[0] {
            DrawOp::Prepare { width, height } => {
                assert_eq!(width, BTL_WIDTH);
                assert_eq!(height, BTL_HEIGHT);
                assert!(width > height);
            }
            ref other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_defense_badge_is_white_and_centered_slot() {
        let ops = render("Invasion of Gobakhan {1}{W}\nBattle — Siege\nSome rules.\nDefense: 3");
        let defense = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { text, color, .. } if text == "3" => Some(*color),
                _ => None,
            })
            .expect("defense value drawn");
        assert_eq!(defense, Color::white());
    }

    #[test]
    fn test_default_defense_is_drawn_as_zero() {
        let ops = render("Minor Skirmish {1}\nBattle\nSome rules.");
        assert!(ops.iter().any(|op| matches!(
            op,
            DrawOp::Text { text, .. } if text == "0"
        )));
    }

    #[test]
    fn test_battle_frame_style() {
        let ops = render("Invasion of Gobakhan {1}{W}\nBattle — Siege\nRules.\nDefense: 3");
        assert!(ops.iter().any(|op| matches!(
            op,
            DrawOp::Asset { kind: AssetKind::Frame { style: FrameStyle::Battle, .. }, .. }
        )));
    }
}
