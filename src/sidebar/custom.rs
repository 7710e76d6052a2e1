//! Custom panel - add user furniture templates

use macroquad::prelude::*;

use crate::app::App;
use crate::ui::{self, theme, Rect, TextInputState, UiContext};

const ROW_H: f32 = 28.0;
const ROW_GAP: f32 = 8.0;

fn field(ctx: &mut UiContext, rect: Rect, label_text: &str, input: &mut TextInputState) {
    let (label_rect, input_rect) = rect.split_h_px(110.0);
    ui::label(label_rect, label_text, theme::FONT_SIZE_CONTENT, theme::TEXT_COLOR);
    ui::draw_text_input(ctx, input_rect, input);
}

pub fn draw(app: &mut App, ctx: &mut UiContext, rect: Rect) {
    let mut y = rect.y;
    ui::label(
        Rect::new(rect.x, y, rect.w, 22.0),
        "Custom Furniture",
        theme::FONT_SIZE_HEADER,
        theme::TEXT_COLOR,
    );
    y += 30.0;

    let mut row = || {
        let r = Rect::new(rect.x, y, rect.w, ROW_H);
        y += ROW_H + ROW_GAP;
        r
    };

    field(ctx, row(), "Name", &mut app.forms.custom_name);
    field(ctx, row(), "Width (m)", &mut app.forms.custom_width);
    field(ctx, row(), "Depth (m)", &mut app.forms.custom_depth);
    field(ctx, row(), "Image URL", &mut app.forms.custom_image);

    // Rotation applied to the image before it is stored as a thumbnail
    let rotation_row = row();
    let (label_rect, button_rect) = rotation_row.split_h_px(rotation_row.w - 96.0);
    ui::label(
        label_rect,
        &format!("Image rotation: {}\u{b0}", app.forms.custom_rotation),
        theme::FONT_SIZE_CONTENT,
        theme::TEXT_COLOR,
    );
    if ui::text_button(ctx, button_rect, "Rotate 45\u{b0}") {
        app.forms.custom_rotation = (app.forms.custom_rotation + 45.0) % 360.0;
    }

    // Rotation preview
    let preview_row = Rect::new(rect.x, y, rect.w, 90.0);
    y += 98.0;
    let size = 64.0;
    draw_rectangle_ex(
        preview_row.center_x(),
        preview_row.center_y(),
        size,
        size * 0.6,
        DrawRectangleParams {
            offset: vec2(0.5, 0.5),
            rotation: app.forms.custom_rotation.to_radians(),
            color: theme::ITEM_FILL,
        },
    );
    draw_rectangle_lines_ex(
        preview_row.center_x(),
        preview_row.center_y(),
        size,
        size * 0.6,
        2.0,
        DrawRectangleParams {
            offset: vec2(0.5, 0.5),
            rotation: app.forms.custom_rotation.to_radians(),
            color: theme::ITEM_BORDER,
        },
    );

    if ui::text_button(ctx, Rect::new(rect.x, y, rect.w, 30.0), "Add Furniture") {
        app.add_custom_furniture();
    }
    y += 40.0;

    ui::label(
        Rect::new(rect.x, y, rect.w, 18.0),
        "Added items appear at the end of the Furniture tab",
        theme::FONT_SIZE_SMALL,
        theme::TEXT_DIM,
    );
}
