//! Plan canvas - interaction state machine and scene rendering
//!
//! `update` translates pointer/keyboard input into plan and view mutations;
//! `draw_scene` renders the current state. The two never mix: the shell
//! calls update first, then draws, so rendering stays a pure function of
//! state.

use macroquad::prelude::*;

use crate::ui::{self, theme, Rect, UiContext};
use super::{PlanState, ViewTransform};

/// Interaction state for the canvas viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasMode {
    Idle,
    /// Space-held pan; pan offset tracks the pointer 1:1 in screen pixels
    Panning { start_x: f32, start_y: f32 },
    /// Moving a placed item, preserving the grab point within it
    DraggingItem { id: u64, grab_dx: f32, grab_dy: f32 },
    /// Pressed on empty canvas; resolves to a click-select on release
    PressedEmpty,
}

/// Grid lines denser than this per axis are skipped rather than drawn
const MAX_GRID_LINES: f32 = 4096.0;

/// Process canvas input for one frame. Returns true if the plan changed.
///
/// `press_blocked` suppresses press handling when the pointer went down on
/// an overlay widget that floats above the canvas.
#[allow(clippy::too_many_arguments)]
pub fn update(
    plan: &mut PlanState,
    view: &mut ViewTransform,
    mode: &mut CanvasMode,
    space_held: bool,
    shortcuts_enabled: bool,
    ctx: &UiContext,
    rect: Rect,
    press_blocked: bool,
) -> bool {
    let mouse = ctx.mouse;
    let inside = mouse.inside(&rect);
    let mut changed = false;

    // Wheel zoom, anchored at the pointer
    if inside && mouse.scroll != 0.0 {
        view.wheel_zoom(mouse.x - rect.x, mouse.y - rect.y, mouse.scroll > 0.0);
    }

    if shortcuts_enabled {
        if is_key_pressed(KeyCode::R) {
            changed |= plan.rotate_selected();
        }
        if is_key_pressed(KeyCode::Delete) || is_key_pressed(KeyCode::Backspace) {
            changed |= plan.delete_selected();
        }
    }

    if mouse.left_pressed && inside && !press_blocked {
        if space_held {
            *mode = CanvasMode::Panning {
                start_x: mouse.x - view.pan_x,
                start_y: mouse.y - view.pan_y,
            };
        } else {
            let (wx, wy) = view.screen_to_world(mouse.x - rect.x, mouse.y - rect.y);
            match plan.item_at(wx, wy) {
                Some(id) => {
                    if let Some(item) = plan.item(id) {
                        let grab = (wx - item.x, wy - item.y);
                        plan.select(Some(id));
                        *mode = CanvasMode::DraggingItem {
                            id,
                            grab_dx: grab.0,
                            grab_dy: grab.1,
                        };
                    }
                }
                None => *mode = CanvasMode::PressedEmpty,
            }
        }
    }

    // Releasing Space ends a pan even while the button is still down
    if !space_held {
        if let CanvasMode::Panning { .. } = *mode {
            *mode = CanvasMode::Idle;
        }
    }

    match *mode {
        CanvasMode::Panning { start_x, start_y } => {
            view.pan_x = mouse.x - start_x;
            view.pan_y = mouse.y - start_y;
        }
        CanvasMode::DraggingItem { id, grab_dx, grab_dy } => {
            if mouse.left_down {
                let (wx, wy) = view.screen_to_world(mouse.x - rect.x, mouse.y - rect.y);
                changed |= plan.move_item(id, wx - grab_dx, wy - grab_dy);
            }
        }
        _ => {}
    }

    if mouse.left_released {
        if *mode == CanvasMode::PressedEmpty && inside {
            let (wx, wy) = view.screen_to_world(mouse.x - rect.x, mouse.y - rect.y);
            plan.select(plan.item_at(wx, wy));
        }
        *mode = CanvasMode::Idle;
    }

    // Leaving the viewport ends any interaction
    if !inside && *mode != CanvasMode::Idle {
        *mode = CanvasMode::Idle;
    }

    changed
}

/// Render the plan: floor plan (or placeholder), grid overlay, placed
/// items, selection highlight. Clipped to the viewport rect.
pub fn draw_scene(plan: &PlanState, view: &ViewTransform, rect: Rect) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, theme::CANVAS_BACKDROP);

    ui::scissor(Some(rect));

    let zoom = view.zoom;
    let origin_x = rect.x + view.pan_x;
    let origin_y = rect.y + view.pan_y;
    let plan_w = plan.dimensions.width * zoom;
    let plan_h = plan.dimensions.height * zoom;

    // 1. Floor plan, stretched to the plan bounds
    if let Some(texture) = &plan.floor_plan {
        draw_texture_ex(
            texture,
            origin_x,
            origin_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(plan_w, plan_h)),
                ..Default::default()
            },
        );
    } else {
        draw_rectangle(origin_x, origin_y, plan_w, plan_h, theme::PLAN_BG);
        let prompt = "Upload a floor plan to get started";
        let font_size = 20.0 * zoom;
        let dims = measure_text(prompt, None, font_size as u16, 1.0);
        draw_text(
            prompt,
            origin_x + (plan_w - dims.width) / 2.0,
            origin_y + (plan_h + dims.height) / 2.0,
            font_size,
            theme::PLAN_PROMPT,
        );
    }

    // 2. Grid overlay, extended both directions from the offset anchor
    let step = plan.grid_size;
    if plan.show_grid
        && step > 0.0
        && plan.dimensions.width / step <= MAX_GRID_LINES
        && plan.dimensions.height / step <= MAX_GRID_LINES
    {
        let thickness = 1.0 * zoom;
        let vline = |wx: f32| {
            let sx = origin_x + wx * zoom;
            draw_line(sx, origin_y, sx, origin_y + plan_h, thickness, theme::GRID_LINE);
        };
        let hline = |wy: f32| {
            let sy = origin_y + wy * zoom;
            draw_line(origin_x, sy, origin_x + plan_w, sy, thickness, theme::GRID_LINE);
        };

        let mut x = plan.grid_offset_x;
        while x <= plan.dimensions.width {
            if x >= 0.0 {
                vline(x);
            }
            x += step;
        }
        let mut x = plan.grid_offset_x - step;
        while x >= 0.0 {
            if x <= plan.dimensions.width {
                vline(x);
            }
            x -= step;
        }
        let mut y = plan.grid_offset_y;
        while y <= plan.dimensions.height {
            if y >= 0.0 {
                hline(y);
            }
            y += step;
        }
        let mut y = plan.grid_offset_y - step;
        while y >= 0.0 {
            if y <= plan.dimensions.height {
                hline(y);
            }
            y -= step;
        }
    }

    // 3. Placed items in list order; later items draw on top
    for item in &plan.items {
        let (fw, fd) = plan.footprint_px(item);
        let w = fw * zoom;
        let d = fd * zoom;
        let cx = origin_x + item.x * zoom;
        let cy = origin_y + item.y * zoom;
        let rotation = item.rotation.to_radians();

        if let Some(texture) = &item.texture {
            draw_texture_ex(
                texture,
                cx - w / 2.0,
                cy - d / 2.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(w, d)),
                    rotation,
                    ..Default::default()
                },
            );
        } else {
            draw_rectangle_ex(
                cx,
                cy,
                w,
                d,
                DrawRectangleParams {
                    offset: vec2(0.5, 0.5),
                    rotation,
                    color: theme::ITEM_FILL,
                },
            );
            draw_rectangle_lines_ex(
                cx,
                cy,
                w,
                d,
                2.0,
                DrawRectangleParams {
                    offset: vec2(0.5, 0.5),
                    rotation,
                    color: theme::ITEM_BORDER,
                },
            );
            draw_rotated_label(&item.name, cx, cy, rotation, fw.min(fd) / 5.0 * zoom);
        }

        // 4. Selection highlight on top of the item
        if plan.selected == Some(item.id) {
            draw_rectangle_lines_ex(
                cx,
                cy,
                w,
                d,
                3.0,
                DrawRectangleParams {
                    offset: vec2(0.5, 0.5),
                    rotation,
                    color: theme::SELECTION_COLOR,
                },
            );
        }
    }

    ui::scissor(None);
}

/// Draw a label centered on (cx, cy), rotated with its item
fn draw_rotated_label(text: &str, cx: f32, cy: f32, rotation: f32, font_size: f32) {
    let font_size = font_size.max(1.0);
    let dims = measure_text(text, None, font_size as u16, 1.0);
    // The text origin is the baseline start; rotate its center-relative
    // offset along with the item
    let local_x = -dims.width / 2.0;
    let local_y = dims.height / 2.0;
    let (sin, cos) = rotation.sin_cos();
    let x = cx + local_x * cos - local_y * sin;
    let y = cy + local_x * sin + local_y * cos;
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font_size: font_size as u16,
            rotation,
            color: theme::ITEM_LABEL,
            ..Default::default()
        },
    );
}

/// Rects for the floating Rotate/Delete buttons near the selected item
pub fn overlay_rects(plan: &PlanState, view: &ViewTransform, rect: Rect) -> Option<(Rect, Rect)> {
    let item = plan.selected_item()?;
    let (fw, fd) = plan.footprint_px(item);
    let cx = rect.x + view.pan_x + item.x * view.zoom;
    let cy = rect.y + view.pan_y + item.y * view.zoom;
    let reach = fw.max(fd) * view.zoom / 2.0;

    let (bw, bh, gap) = (58.0, 24.0, 6.0);
    let x = (cx - bw - gap / 2.0).clamp(rect.x, (rect.right() - bw * 2.0 - gap).max(rect.x));
    let y = (cy - reach - bh - 8.0).clamp(rect.y, (rect.bottom() - bh).max(rect.y));

    let rotate = Rect::new(x, y, bw, bh);
    let delete = Rect::new(x + bw + gap, y, bw, bh);
    Some((rotate, delete))
}

/// Draw the floating Rotate/Delete buttons and apply their actions.
/// Returns true if the plan changed.
pub fn selection_overlay(ctx: &mut UiContext, plan: &mut PlanState, view: &ViewTransform, rect: Rect) -> bool {
    let Some((rotate_rect, delete_rect)) = overlay_rects(plan, view, rect) else {
        return false;
    };

    let mut changed = false;
    if ui::text_button(ctx, rotate_rect, "Rotate") {
        changed |= plan.rotate_selected();
    }
    if ui::danger_button(ctx, delete_rect, "Delete") {
        changed |= plan.delete_selected();
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_rects_require_selection() {
        let plan = PlanState::new();
        let view = ViewTransform::new();
        let rect = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert!(overlay_rects(&plan, &view, rect).is_none());
    }

    #[test]
    fn test_overlay_rects_stay_in_viewport() {
        use crate::catalog::FurnitureTemplate;

        let mut plan = PlanState::new();
        plan.place(
            &FurnitureTemplate {
                name: "Desk".into(),
                width: 1.4,
                depth: 0.7,
                image: None,
            },
            // Near the top-left corner: the buttons would float off-view
            5.0,
            5.0,
            None,
        );
        let view = ViewTransform::new();
        let rect = Rect::new(100.0, 50.0, 800.0, 600.0);

        let (rotate, delete) = overlay_rects(&plan, &view, rect).unwrap();
        assert!(rotate.x >= rect.x && rotate.y >= rect.y);
        assert!(delete.right() <= rect.right() + 0.001);
        assert!(delete.bottom() <= rect.bottom() + 0.001);
    }
}
