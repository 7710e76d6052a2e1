//! Grid panel - measurement grid configuration

use crate::app::App;
use crate::ui::{self, theme, Rect, TextInputState, UiContext};

const ROW_H: f32 = 30.0;
const ROW_GAP: f32 = 8.0;

/// Label + numeric input row. Returns the parsed value when the text
/// changed this frame and parses.
fn number_field(
    ctx: &mut UiContext,
    rect: Rect,
    label_text: &str,
    input: &mut TextInputState,
) -> Option<f32> {
    let (label_rect, input_rect) = rect.split_h_px(rect.w * 0.55);
    ui::label(label_rect, label_text, theme::FONT_SIZE_CONTENT, theme::TEXT_COLOR);
    if ui::draw_text_input(ctx, input_rect, input) {
        input.text.trim().parse().ok()
    } else {
        None
    }
}

pub fn draw(app: &mut App, ctx: &mut UiContext, rect: Rect) {
    let mut y = rect.y;
    ui::label(
        Rect::new(rect.x, y, rect.w, 22.0),
        "Grid Settings",
        theme::FONT_SIZE_HEADER,
        theme::TEXT_COLOR,
    );
    y += 30.0;

    let mut row = || {
        let r = Rect::new(rect.x, y, rect.w, ROW_H);
        y += ROW_H + ROW_GAP;
        r
    };

    if let Some(v) = number_field(ctx, row(), "Grid size (px)", &mut app.forms.grid_size) {
        if v > 0.0 {
            app.plan.grid_size = v;
            app.plan_dirty = true;
        }
    }
    if let Some(v) = number_field(
        ctx,
        row(),
        "Meters per square",
        &mut app.forms.meters_per_square,
    ) {
        if v > 0.0 {
            app.plan.meters_per_square = v;
            app.plan_dirty = true;
        }
    }
    if let Some(v) = number_field(ctx, row(), "Grid offset X (px)", &mut app.forms.grid_offset_x) {
        app.plan.grid_offset_x = v;
        app.plan_dirty = true;
    }
    if let Some(v) = number_field(ctx, row(), "Grid offset Y (px)", &mut app.forms.grid_offset_y) {
        app.plan.grid_offset_y = v;
        app.plan_dirty = true;
    }

    let mut show = app.plan.show_grid;
    if ui::checkbox(ctx, row(), "Show grid", &mut show) {
        app.plan.show_grid = show;
        app.plan_dirty = true;
    }

    let scale_hint = format!(
        "One square = {} m ({} px)",
        app.plan.meters_per_square, app.plan.grid_size
    );
    ui::label(row(), &scale_hint, theme::FONT_SIZE_SMALL, theme::TEXT_DIM);
}
