//! RoomPlan: an interactive 2D floor plan designer
//!
//! Upload a floor-plan image, overlay a measurement grid, and drag
//! furniture templates onto the canvas:
//! - Pan/zoom navigation (wheel zoom at the pointer, Space-drag pan)
//! - Exact hit-testing of rotated items
//! - Per-project persistence to local JSON storage

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod catalog;
mod decode;
mod dialogs;
mod editor;
mod project;
mod sidebar;
mod storage;
mod thumbnail;
mod ui;

use macroquad::prelude::*;

use app::App;
use sidebar::SIDEBAR_WIDTH;
use storage::LocalStore;
use ui::{theme, MouseState, Rect, UiContext};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("RoomPlan v{}", VERSION),
        window_width: 1440,
        window_height: 900,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging first
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let store = LocalStore::open_default();
    let mut app = App::boot(store);
    let mut ctx = UiContext::new();

    loop {
        let (mouse_x, mouse_y) = mouse_position();
        let mouse = MouseState {
            x: mouse_x,
            y: mouse_y,
            left_down: is_mouse_button_down(MouseButton::Left),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            left_released: is_mouse_button_released(MouseButton::Left),
            scroll: mouse_wheel().1,
        };
        ctx.begin_frame(mouse);
        app.space_held = is_key_down(KeyCode::Space);

        clear_background(theme::BG_COLOR);

        let screen = Rect::screen(screen_width(), screen_height());
        let (sidebar_rect, canvas_rect) = screen.split_h_px(SIDEBAR_WIDTH);
        sidebar::draw_sidebar(&mut app, &mut ctx, sidebar_rect);
        app.update_canvas(&mut ctx, canvas_rect);
        app.draw_carried_ghost(&ctx);

        // Drop typed characters when no field has focus, so they don't
        // flood the next focused input
        if !app.forms.any_focused() {
            while get_char_pressed().is_some() {}
        }

        app.pump_decodes();
        app.flush_dirty();

        next_frame().await;
    }
}
