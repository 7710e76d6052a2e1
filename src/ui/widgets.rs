//! Basic UI widgets

use macroquad::prelude::*;
use super::{theme, Rect, UiContext};

/// Draw a rounded rectangle (simple approximation using overlapping rects)
pub fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, w, h - r * 2.0, color);
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}

/// Draw a text button with the given base color, returns true if clicked
pub fn text_button_colored(ctx: &mut UiContext, rect: Rect, label: &str, base: Color) -> bool {
    let id = ctx.next_id();
    let hovered = ctx.mouse.inside(&rect);
    let pressed = ctx.mouse.clicking(&rect);
    let clicked = ctx.mouse.clicked(&rect);

    if hovered {
        ctx.set_hot(id);
    }

    let bg = if pressed {
        Color::new(base.r * 0.7, base.g * 0.7, base.b * 0.7, base.a)
    } else if hovered {
        Color::new(
            (base.r * 1.2).min(1.0),
            (base.g * 1.2).min(1.0),
            (base.b * 1.2).min(1.0),
            base.a,
        )
    } else {
        base
    };

    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 4.0, bg);

    let font_size = theme::FONT_SIZE_CONTENT;
    let dims = measure_text(label, None, font_size as u16, 1.0);
    let text_x = (rect.center_x() - dims.width * 0.5).round();
    let text_y = (rect.y + (rect.h + dims.height) * 0.5).round();
    draw_text(label, text_x, text_y, font_size, WHITE);

    clicked
}

/// Draw an accent-colored text button, returns true if clicked
pub fn text_button(ctx: &mut UiContext, rect: Rect, label: &str) -> bool {
    text_button_colored(ctx, rect, label, theme::ACCENT_COLOR)
}

/// Draw a red destructive-action button, returns true if clicked
pub fn danger_button(ctx: &mut UiContext, rect: Rect, label: &str) -> bool {
    text_button_colored(ctx, rect, label, theme::DANGER_COLOR)
}

/// Draw a checkbox with a label, returns true if the value changed
pub fn checkbox(ctx: &mut UiContext, rect: Rect, label: &str, checked: &mut bool) -> bool {
    let id = ctx.next_id();
    let hovered = ctx.mouse.inside(&rect);
    let clicked = ctx.mouse.clicked(&rect);

    if hovered {
        ctx.set_hot(id);
    }

    let box_size = (rect.h - 6.0).min(16.0);
    let box_y = rect.y + (rect.h - box_size) * 0.5;
    let border = if hovered { theme::ACCENT_COLOR } else { theme::TEXT_DIM };
    draw_rectangle_lines(rect.x, box_y, box_size, box_size, 1.5, border);
    if *checked {
        draw_rectangle(
            rect.x + 3.0,
            box_y + 3.0,
            box_size - 6.0,
            box_size - 6.0,
            theme::ACCENT_COLOR,
        );
    }

    let font_size = theme::FONT_SIZE_CONTENT;
    let dims = measure_text(label, None, font_size as u16, 1.0);
    let text_y = (rect.y + (rect.h + dims.height) * 0.5).round();
    draw_text(label, rect.x + box_size + 8.0, text_y, font_size, theme::TEXT_COLOR);

    if clicked {
        *checked = !*checked;
    }
    clicked
}

/// Draw a left-aligned label, vertically centered in the rect
pub fn label(rect: Rect, text: &str, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let text_y = (rect.y + (rect.h + dims.height) * 0.5).round();
    draw_text(text, rect.x.round(), text_y, font_size, color);
}

/// Clip subsequent draws to a rect; pass None to clear the clip
pub fn scissor(rect: Option<Rect>) {
    gl_use_default_material();
    let region = rect.map(|r| {
        let dpi = screen_dpi_scale();
        (
            (r.x * dpi) as i32,
            (r.y * dpi) as i32,
            (r.w * dpi) as i32,
            (r.h * dpi) as i32,
        )
    });
    unsafe {
        get_internal_gl().quad_gl.scissor(region);
    }
}
