//! Sidebar - header, tab bar, and the five panels

mod custom;
mod furniture;
mod grid;
mod projects;
mod view;

use macroquad::prelude::*;

use crate::app::{App, SidebarTab};
use crate::ui::{self, theme, Rect, UiContext};

/// Fixed sidebar width in pixels
pub const SIDEBAR_WIDTH: f32 = 360.0;

const HEADER_H: f32 = 56.0;
const TABS_H: f32 = 32.0;

/// Draw the whole sidebar for one frame
pub fn draw_sidebar(app: &mut App, ctx: &mut UiContext, rect: Rect) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, theme::BG_COLOR);

    let header = rect.slice_top(HEADER_H);
    draw_rectangle(header.x, header.y, header.w, header.h, theme::HEADER_COLOR);
    draw_text(
        "Floor Plan Designer",
        header.x + 12.0,
        header.y + 24.0,
        theme::FONT_SIZE_HEADER,
        theme::TEXT_COLOR,
    );
    if let Some(project) = app.projects.active() {
        draw_text(
            &project.name,
            header.x + 12.0,
            header.y + 42.0,
            theme::FONT_SIZE_SMALL,
            theme::TEXT_DIM,
        );
    }

    let rest = rect.remaining_after_top(HEADER_H);
    let tabs = rest.slice_top(TABS_H);
    let labels: Vec<&str> = SidebarTab::ALL.iter().map(|t| t.label()).collect();
    if let Some(i) = ui::draw_tab_bar(ctx, tabs, &labels, app.tab as usize) {
        if let Some(tab) = SidebarTab::from_index(i) {
            app.tab = tab;
            app.sidebar_scroll = 0.0;
        }
    }

    let body = rest.remaining_after_top(TABS_H).pad(12.0);
    match app.tab {
        SidebarTab::Projects => projects::draw(app, ctx, body),
        SidebarTab::Grid => grid::draw(app, ctx, body),
        SidebarTab::Furniture => furniture::draw(app, ctx, body),
        SidebarTab::Custom => custom::draw(app, ctx, body),
        SidebarTab::View => view::draw(app, ctx, body),
    }
}
