//! Furniture panel - the combined catalog, draggable onto the canvas

use macroquad::prelude::*;

use crate::app::App;
use crate::catalog::FurnitureTemplate;
use crate::ui::{self, theme, Rect, UiContext};

const ROW_H: f32 = 48.0;
const ROW_GAP: f32 = 4.0;
const PREVIEW: f32 = 40.0;

/// Labeled rectangle preview proportional to the template's width:depth
fn draw_preview(rect: Rect, template: &FurnitureTemplate) {
    let longest = template.width.max(template.depth);
    let scale = 0.8;
    let w = rect.w * scale * (template.width / longest);
    let h = rect.h * scale * (template.depth / longest);
    let x = rect.x + (rect.w - w) / 2.0;
    let y = rect.y + (rect.h - h) / 2.0;
    draw_rectangle(x, y, w, h, theme::ITEM_FILL);
    draw_rectangle_lines(x, y, w, h, 2.0, theme::ITEM_BORDER);
}

pub fn draw(app: &mut App, ctx: &mut UiContext, rect: Rect) {
    let mut y = rect.y;
    ui::label(
        Rect::new(rect.x, y, rect.w, 22.0),
        "Furniture",
        theme::FONT_SIZE_HEADER,
        theme::TEXT_COLOR,
    );
    y += 24.0;
    ui::label(
        Rect::new(rect.x, y, rect.w, 18.0),
        "Drag an item onto the floor plan",
        theme::FONT_SIZE_SMALL,
        theme::TEXT_DIM,
    );
    y += 24.0;

    let list = Rect::new(rect.x, y, rect.w, rect.bottom() - y);
    let row_stride = ROW_H + ROW_GAP;
    let content_h = app.catalog.entries().len() as f32 * row_stride;

    // Wheel-scroll the list when it overflows
    if ctx.mouse.inside(&list) && ctx.mouse.scroll != 0.0 {
        let min_scroll = (list.h - content_h).min(0.0);
        app.sidebar_scroll = (app.sidebar_scroll + ctx.mouse.scroll * 24.0).clamp(min_scroll, 0.0);
    }

    let mut carry: Option<usize> = None;
    let mut remove: Option<usize> = None;

    ui::scissor(Some(list));
    for (i, template) in app.catalog.entries().iter().enumerate() {
        let row_y = list.y + app.sidebar_scroll + i as f32 * row_stride;
        let row = Rect::new(list.x, row_y, list.w, ROW_H);
        if row.bottom() < list.y || row.y > list.bottom() {
            continue;
        }

        if ctx.mouse.inside(&row) {
            draw_rectangle(row.x, row.y, row.w, row.h, Color::new(0.15, 0.15, 0.18, 1.0));
        }

        draw_preview(
            Rect::new(row.x + 2.0, row.y + (ROW_H - PREVIEW) / 2.0, PREVIEW, PREVIEW),
            template,
        );
        draw_text(
            &template.name,
            row.x + PREVIEW + 12.0,
            row.y + 20.0,
            theme::FONT_SIZE_CONTENT,
            theme::TEXT_COLOR,
        );
        let mut dims = format!("{} x {} m", template.width, template.depth);
        if template.image.is_some() {
            dims.push_str("  (image)");
        }
        draw_text(
            &dims,
            row.x + PREVIEW + 12.0,
            row.y + 36.0,
            theme::FONT_SIZE_SMALL,
            theme::TEXT_DIM,
        );

        if app.catalog.is_custom(i) {
            let x_rect = Rect::new(row.right() - 30.0, row.y + 12.0, 26.0, 24.0);
            if ui::danger_button(ctx, x_rect, "X") {
                remove = Some(i);
            } else if ctx.mouse.clicked(&row) && !ctx.mouse.inside(&x_rect) {
                carry = Some(i);
            }
        } else if ctx.mouse.clicked(&row) {
            carry = Some(i);
        }
    }
    ui::scissor(None);

    if let Some(i) = remove {
        app.remove_custom_furniture(i);
    } else if let Some(i) = carry {
        app.carried = app.catalog.get(i).cloned();
    }
}
