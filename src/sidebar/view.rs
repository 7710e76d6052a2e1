//! View panel - zoom controls and navigation hints

use crate::app::App;
use crate::ui::{self, theme, Rect, UiContext};

pub fn draw(app: &mut App, ctx: &mut UiContext, rect: Rect) {
    let mut y = rect.y;
    ui::label(
        Rect::new(rect.x, y, rect.w, 22.0),
        "View",
        theme::FONT_SIZE_HEADER,
        theme::TEXT_COLOR,
    );
    y += 30.0;

    let zoom_row = Rect::new(rect.x, y, rect.w, 30.0);
    if ui::text_button(ctx, Rect::new(zoom_row.x, zoom_row.y, 34.0, 30.0), "-") {
        app.view.zoom_out();
    }
    ui::label(
        Rect::new(zoom_row.x + 42.0, zoom_row.y, 70.0, 30.0),
        &format!("{:.0}%", app.view.zoom * 100.0),
        theme::FONT_SIZE_CONTENT,
        theme::TEXT_COLOR,
    );
    if ui::text_button(ctx, Rect::new(zoom_row.x + 112.0, zoom_row.y, 34.0, 30.0), "+") {
        app.view.zoom_in();
    }
    y += 40.0;

    if ui::text_button(ctx, Rect::new(rect.x, y, 120.0, 28.0), "Reset View") {
        app.view.reset();
    }
    y += 42.0;

    for hint in [
        "Scroll to zoom at the pointer",
        "Hold Space and drag to pan",
        "Click an item to select it",
        "R rotates the selection, Delete removes it",
    ] {
        ui::label(
            Rect::new(rect.x, y, rect.w, 18.0),
            hint,
            theme::FONT_SIZE_SMALL,
            theme::TEXT_DIM,
        );
        y += 22.0;
    }
}
