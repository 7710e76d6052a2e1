//! Sidebar tab bar

use macroquad::prelude::*;
use super::{theme, Rect, UiContext};

/// Draw a row of equal-width tabs, returns the index of a clicked tab
pub fn draw_tab_bar(ctx: &mut UiContext, rect: Rect, labels: &[&str], active: usize) -> Option<usize> {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, theme::HEADER_COLOR);

    let mut clicked = None;
    let tab_w = rect.w / labels.len() as f32;

    for (i, label) in labels.iter().enumerate() {
        let tab_rect = Rect::new(rect.x + tab_w * i as f32, rect.y, tab_w, rect.h);
        let id = ctx.next_id();
        let hovered = ctx.mouse.inside(&tab_rect);
        if hovered {
            ctx.set_hot(id);
        }
        if ctx.mouse.clicked(&tab_rect) {
            clicked = Some(i);
        }

        if i == active {
            draw_rectangle(tab_rect.x, tab_rect.y, tab_rect.w, tab_rect.h, theme::ACCENT_COLOR);
        } else if hovered {
            draw_rectangle(
                tab_rect.x,
                tab_rect.y,
                tab_rect.w,
                tab_rect.h,
                Color::new(0.2, 0.2, 0.24, 1.0),
            );
        }

        let font_size = theme::FONT_SIZE_SMALL;
        let dims = measure_text(label, None, font_size as u16, 1.0);
        let text_x = (tab_rect.center_x() - dims.width * 0.5).round();
        let text_y = (tab_rect.y + (tab_rect.h + dims.height) * 0.5).round();
        let color = if i == active { WHITE } else { theme::TEXT_COLOR };
        draw_text(label, text_x, text_y, font_size, color);
    }

    clicked
}
