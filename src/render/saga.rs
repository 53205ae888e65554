//! Saga card renderer
//!
//! Chapters stack down the left column; each entry draws a divider, its
//! chapter numeral badge(s) and its wrapped text. A single entry can span
//! several numerals ("I, II — ..."), which stacks badges vertically and
//! advances the running numeral counter by the span.

use crate::canvas::{AssetKind, Canvas, FrameStyle};
use crate::layout::{PW_HEIGHT, PW_WIDTH, SAGA_LAYOUT};
use crate::render::{draw_footer, draw_mana_cost, draw_slot_line, BACKGROUND};
use crate::text_fit::{draw_wrapped_text, Align};
use crate::types::{Color, Rect, SagaCard};

fn roman_numeral(n: u32) -> String {
    match n {
        1 => "I".to_string(),
        2 => "II".to_string(),
        3 => "III".to_string(),
        4 => "IV".to_string(),
        5 => "V".to_string(),
        6 => "VI".to_string(),
        _ => n.to_string(),
    }
}

pub fn render_saga<C: Canvas>(card: &SagaCard, canvas: &mut C) {
    let (cw, ch) = (PW_WIDTH, PW_HEIGHT);
    let layout = &SAGA_LAYOUT;

    canvas.prepare(cw, ch);
    canvas.fill_rect(Rect::new(0.0, 0.0, cw, ch), BACKGROUND, 1.0);

    // Art occupies the right half on sagas.
    if let Some(url) = &card.base.art_url {
        canvas.draw_art(url, layout.art.scaled(cw, ch));
    }

    canvas.draw_asset(
        AssetKind::Frame { style: FrameStyle::Saga, color: card.base.frame_color },
        Rect::new(0.0, 0.0, cw, ch),
    );

    let chapter_count = card.chapters.len();
    // Rows shrink below the standard slot height once chapters would
    // overflow the column.
    let slot_h = layout.ability.rect.height.min(0.55 / chapter_count.max(1) as f64);
    let chapter_font_size = ch * layout.chapter_font_size;

    let mut numeral = 1u32;
    for (i, chapter) in card.chapters.iter().enumerate() {
        let row_y = (layout.ability.rect.y + i as f64 * slot_h) * ch;
        let row_h = slot_h * ch;
        let col_x = layout.saga_col.x * cw;
        let col_w = layout.saga_col.width * cw;

        // Divider along the row's top edge, first chapter included.
        let divider_h = layout.divider_height * ch;
        canvas.draw_asset(
            AssetKind::ChapterDivider,
            Rect::new(col_x, row_y - divider_h / 2.0, col_w, divider_h),
        );

        let badge_x = col_x + layout.chapter.x_off * cw;
        let badge_w = layout.chapter.width * cw;
        let badge_h = layout.chapter.height * ch;
        let badge_y = row_y + (row_h - badge_h) / 2.0;
        let text_x = badge_x + layout.chapter.text_off_x * cw;
        let text_y = badge_y + layout.chapter.text_off_y * ch;

        // The badge column has art for one to three stacked numerals;
        // wider spans advance the counter without badges.
        let spread = layout.chapter_spread * ch;
        let offsets: &[f64] = match chapter.count {
            1 => &[0.0],
            2 => &[-1.0, 1.0],
            3 => &[-2.0, 0.0, 2.0],
            _ => &[],
        };
        for (k, offset) in offsets.iter().enumerate() {
            let dy = offset * spread;
            canvas.draw_asset(
                AssetKind::ChapterBadge,
                Rect::new(badge_x, badge_y + dy, badge_w, badge_h),
            );
            let label = roman_numeral(numeral + k as u32);
            let label_width = canvas.text_width(&label, layout.ability.font, chapter_font_size);
            canvas.fill_text_heavy(
                &label,
                text_x - label_width / 2.0,
                text_y + dy,
                layout.ability.font,
                chapter_font_size,
                Color::black(),
                0.6,
            );
        }
        numeral += chapter.count;

        draw_wrapped_text(
            canvas,
            &chapter.text,
            Rect::new(layout.ability.rect.x * cw, row_y, layout.ability.rect.width * cw, row_h),
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

    draw_footer(canvas, &card.base, cw, ch);
}
