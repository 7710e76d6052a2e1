//! Projects panel - create, open, delete

use macroquad::prelude::*;

use crate::app::App;
use crate::ui::{self, theme, Rect, UiContext};

const ROW_H: f32 = 44.0;

pub fn draw(app: &mut App, ctx: &mut UiContext, rect: Rect) {
    let mut y = rect.y;
    ui::label(
        Rect::new(rect.x, y, rect.w, 22.0),
        "Projects",
        theme::FONT_SIZE_HEADER,
        theme::TEXT_COLOR,
    );
    y += 30.0;

    // New project form
    let input_rect = Rect::new(rect.x, y, rect.w - 78.0, 28.0);
    ui::draw_text_input(ctx, input_rect, &mut app.forms.new_project_name);
    let create_rect = Rect::new(rect.right() - 70.0, y, 70.0, 28.0);
    if ui::text_button(ctx, create_rect, "Create") {
        app.create_project();
    }
    y += 42.0;

    if app.projects.is_empty() {
        ui::label(
            Rect::new(rect.x, y, rect.w, 20.0),
            "No projects yet - create one to start",
            theme::FONT_SIZE_CONTENT,
            theme::TEXT_DIM,
        );
        return;
    }

    let mut open: Option<String> = None;
    let mut delete: Option<String> = None;

    for project in app.projects.projects() {
        let row = Rect::new(rect.x, y, rect.w, ROW_H);
        if row.bottom() > rect.bottom() {
            break;
        }
        let active = app.projects.active_id() == Some(project.id.as_str());
        if active {
            draw_rectangle(row.x, row.y, row.w, row.h, Color::new(0.16, 0.22, 0.3, 1.0));
        } else if ctx.mouse.inside(&row) {
            draw_rectangle(row.x, row.y, row.w, row.h, Color::new(0.15, 0.15, 0.18, 1.0));
        }

        draw_text(
            &project.name,
            row.x + 8.0,
            row.y + 18.0,
            theme::FONT_SIZE_CONTENT,
            theme::TEXT_COLOR,
        );
        let modified = project
            .last_modified
            .get(..10)
            .unwrap_or(project.last_modified.as_str());
        draw_text(
            &format!("Modified {}", modified),
            row.x + 8.0,
            row.y + 34.0,
            theme::FONT_SIZE_SMALL,
            theme::TEXT_DIM,
        );

        let open_rect = Rect::new(row.right() - 96.0, row.y + 10.0, 48.0, 24.0);
        let delete_rect = Rect::new(row.right() - 42.0, row.y + 10.0, 42.0, 24.0);
        if ui::text_button(ctx, open_rect, "Open") {
            open = Some(project.id.clone());
        }
        if ui::danger_button(ctx, delete_rect, "Del") {
            delete = Some(project.id.clone());
        }

        y += ROW_H + 6.0;
    }

    if let Some(id) = open {
        app.open_project(&id);
    }
    if let Some(id) = delete {
        app.delete_project(&id);
    }
}
