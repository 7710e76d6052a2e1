//! Application state and orchestration
//!
//! One `App` owns everything: the persisted collections, the in-memory plan
//! mirror, the view transform, the decode queue, and the form states. All
//! mutation flows through methods here or on the owned state; rendering
//! reads the state and never writes it.

use macroquad::prelude::*;

use crate::catalog::{self, Catalog, FurnitureTemplate};
use crate::decode::{DecodeOutcome, DecodeProduct, DecodeQueue, DecodeTarget, ImageSource};
use crate::dialogs;
use crate::editor::{canvas, CanvasMode, PlanState, ViewTransform};
use crate::project::{fit_dimensions, ProjectStore};
use crate::storage::LocalStore;
use crate::ui::{self, theme, Rect, TextInputState, UiContext};

/// Height of the toolbar strip above the canvas viewport
pub const CANVAS_TOOLBAR_H: f32 = 40.0;

/// Decode requests settled per frame
const DECODE_BUDGET: usize = 2;

/// The sidebar panels (fixed set, one tab each)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarTab {
    Projects = 0,
    Grid = 1,
    Furniture = 2,
    Custom = 3,
    View = 4,
}

impl SidebarTab {
    pub const ALL: [SidebarTab; 5] = [
        SidebarTab::Projects,
        SidebarTab::Grid,
        SidebarTab::Furniture,
        SidebarTab::Custom,
        SidebarTab::View,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SidebarTab::Projects => "Projects",
            SidebarTab::Grid => "Grid",
            SidebarTab::Furniture => "Furniture",
            SidebarTab::Custom => "Custom",
            SidebarTab::View => "View",
        }
    }

    pub fn from_index(i: usize) -> Option<SidebarTab> {
        SidebarTab::ALL.get(i).copied()
    }
}

/// Text-input states for every sidebar form
pub struct Forms {
    pub new_project_name: TextInputState,
    pub grid_size: TextInputState,
    pub meters_per_square: TextInputState,
    pub grid_offset_x: TextInputState,
    pub grid_offset_y: TextInputState,
    pub custom_name: TextInputState,
    pub custom_width: TextInputState,
    pub custom_depth: TextInputState,
    pub custom_image: TextInputState,
    /// Rotation applied to the custom image before it is normalized
    pub custom_rotation: f32,
}

impl Forms {
    fn new() -> Self {
        Self {
            new_project_name: TextInputState::default(),
            grid_size: TextInputState::default(),
            meters_per_square: TextInputState::default(),
            grid_offset_x: TextInputState::default(),
            grid_offset_y: TextInputState::default(),
            custom_name: TextInputState::default(),
            custom_width: TextInputState::default(),
            custom_depth: TextInputState::default(),
            custom_image: TextInputState::default(),
            custom_rotation: 0.0,
        }
    }

    /// Whether any text field has keyboard focus (canvas shortcuts are
    /// suppressed while typing)
    pub fn any_focused(&self) -> bool {
        self.new_project_name.focused
            || self.grid_size.focused
            || self.meters_per_square.focused
            || self.grid_offset_x.focused
            || self.grid_offset_y.focused
            || self.custom_name.focused
            || self.custom_width.focused
            || self.custom_depth.focused
            || self.custom_image.focused
    }

    /// Refresh the grid inputs from the plan (project load/create)
    pub fn sync_grid(&mut self, plan: &PlanState) {
        self.grid_size.set_text(format!("{}", plan.grid_size));
        self.meters_per_square.set_text(format!("{}", plan.meters_per_square));
        self.grid_offset_x.set_text(format!("{}", plan.grid_offset_x));
        self.grid_offset_y.set_text(format!("{}", plan.grid_offset_y));
    }

    /// Clear the custom furniture form after a successful add
    pub fn clear_custom(&mut self) {
        self.custom_name.clear();
        self.custom_width.clear();
        self.custom_depth.clear();
        self.custom_image.clear();
        self.custom_rotation = 0.0;
    }
}

/// Main application state
pub struct App {
    pub store: LocalStore,
    pub projects: ProjectStore,
    pub catalog: Catalog,
    /// In-memory mirror of the active project
    pub plan: PlanState,
    pub view: ViewTransform,
    pub mode: CanvasMode,
    pub decode: DecodeQueue,
    /// Template being dragged out of the catalog, if any
    pub carried: Option<FurnitureTemplate>,
    pub tab: SidebarTab,
    pub forms: Forms,
    pub sidebar_scroll: f32,
    pub space_held: bool,
    /// Plan changed this frame and needs persisting
    pub plan_dirty: bool,
    /// Bumped on every custom-form submission; stale thumbnail decodes are
    /// discarded against it
    pub custom_generation: u64,
}

impl App {
    /// Load persisted collections and open the first project, if any
    pub fn boot(store: LocalStore) -> Self {
        let projects = ProjectStore::load(&store);
        let catalog = Catalog::load(&store);
        let mut app = Self {
            store,
            projects,
            catalog,
            plan: PlanState::new(),
            view: ViewTransform::new(),
            mode: CanvasMode::Idle,
            decode: DecodeQueue::new(),
            carried: None,
            tab: SidebarTab::Projects,
            forms: Forms::new(),
            sidebar_scroll: 0.0,
            space_held: false,
            plan_dirty: false,
            custom_generation: 0,
        };
        app.forms.sync_grid(&app.plan);
        if let Some(first) = app.projects.first_id() {
            app.open_project(&first);
        }
        app
    }

    /// Make a stored project active and mirror it into memory.
    /// Unknown ids are a no-op.
    pub fn open_project(&mut self, id: &str) {
        let Some((pid, name, image, plan)) = ({
            self.projects.activate(id).map(|project| {
                (
                    project.id.clone(),
                    project.name.clone(),
                    project.floor_plan_image.clone(),
                    PlanState::from_project(project),
                )
            })
        }) else {
            return;
        };

        self.plan = plan;
        self.mode = CanvasMode::Idle;
        self.forms.sync_grid(&self.plan);
        if let Some(image) = image {
            // The stored floor plan decodes before it becomes visible;
            // the tag discards it if the user switches projects meanwhile
            self.decode.submit(
                DecodeTarget::FloorPlan {
                    project_id: Some(pid),
                    from_upload: false,
                },
                ImageSource::Reference(image),
            );
        }
        println!("Opened project \"{}\"", name);
    }

    /// Create a project from the name form and make it active
    pub fn create_project(&mut self) {
        let name = self.forms.new_project_name.text.clone();
        match self.projects.create(&name) {
            Ok(_) => {
                self.plan = PlanState::new();
                self.view.reset();
                self.mode = CanvasMode::Idle;
                self.forms.new_project_name.clear();
                self.forms.sync_grid(&self.plan);
                self.projects.persist(&self.store);
            }
            Err(e) => dialogs::alert("New Project", &e.to_string()),
        }
    }

    /// Delete a project behind a confirmation gate
    pub fn delete_project(&mut self, id: &str) {
        if !dialogs::confirm(
            "Delete Project",
            "Are you sure you want to delete this project?",
        ) {
            return;
        }
        let was_active = self.projects.active_id() == Some(id);
        if !self.projects.delete(id) {
            return;
        }
        self.projects.persist(&self.store);

        if was_active {
            match self.projects.first_id() {
                Some(first) => self.open_project(&first),
                None => {
                    self.plan = PlanState::new();
                    self.view.reset();
                    self.mode = CanvasMode::Idle;
                    self.forms.sync_grid(&self.plan);
                }
            }
        }
    }

    /// Pick a floor-plan image file and submit it for decoding
    pub fn upload_floor_plan(&mut self) {
        let Some(path) = dialogs::pick_image_file() else {
            return;
        };
        match std::fs::read(&path) {
            Ok(bytes) => {
                let project_id = self.projects.active_id().map(str::to_string);
                self.decode.submit(
                    DecodeTarget::FloorPlan {
                        project_id,
                        from_upload: true,
                    },
                    ImageSource::Bytes(bytes),
                );
            }
            Err(e) => dialogs::alert(
                "Upload Floor Plan",
                &format!("Failed to read {}: {}", path.display(), e),
            ),
        }
    }

    /// Submit the custom furniture form
    pub fn add_custom_furniture(&mut self) {
        let parsed = catalog::parse_entry(
            &self.forms.custom_name.text,
            &self.forms.custom_width.text,
            &self.forms.custom_depth.text,
        );
        let (name, width, depth) = match parsed {
            Ok(entry) => entry,
            Err(e) => {
                dialogs::alert("Custom Furniture", &e.to_string());
                return;
            }
        };

        let image_ref = self.forms.custom_image.text.trim().to_string();
        if image_ref.is_empty() {
            self.catalog.add_custom(FurnitureTemplate {
                name,
                width,
                depth,
                image: None,
            });
            self.catalog.persist(&self.store);
            self.forms.clear_custom();
        } else {
            // The entry is appended once the thumbnail settles; resubmitting
            // the form first makes the in-flight request stale
            self.custom_generation += 1;
            self.decode.submit(
                DecodeTarget::CustomThumbnail {
                    generation: self.custom_generation,
                    name,
                    width,
                    depth,
                    rotation: self.forms.custom_rotation,
                },
                ImageSource::Reference(image_ref),
            );
        }
    }

    /// Remove a custom catalog entry behind a confirmation gate
    pub fn remove_custom_furniture(&mut self, catalog_index: usize) {
        if !self.catalog.is_custom(catalog_index) {
            return;
        }
        if !dialogs::confirm("Delete Custom Furniture", "Delete this custom furniture item?") {
            return;
        }
        if self.catalog.remove_custom(catalog_index).is_some() {
            self.catalog.persist(&self.store);
        }
    }

    /// Drop a carried template onto the canvas at a world position
    fn drop_template(&mut self, template: FurnitureTemplate, x: f32, y: f32) {
        if let Some(image) = template.image.clone() {
            // The item appears only once its image decode settles
            let project_id = self.projects.active_id().map(str::to_string);
            self.decode.submit(
                DecodeTarget::DroppedItem {
                    project_id,
                    template,
                    x,
                    y,
                },
                ImageSource::Reference(image),
            );
        } else {
            self.plan.place(&template, x, y, None);
            self.plan_dirty = true;
        }
    }

    /// Resolve a catalog drag: release over the viewport drops the carried
    /// template, release anywhere else cancels it
    fn update_carried(&mut self, ctx: &UiContext, viewport: Rect) {
        if self.carried.is_none() || !ctx.mouse.left_released {
            return;
        }
        let Some(template) = self.carried.take() else {
            return;
        };
        if ctx.mouse.inside(&viewport) {
            let (wx, wy) = self
                .view
                .screen_to_world(ctx.mouse.x - viewport.x, ctx.mouse.y - viewport.y);
            self.drop_template(template, wx, wy);
        }
    }

    /// Draw the carried template as a ghost following the pointer
    pub fn draw_carried_ghost(&self, ctx: &UiContext) {
        let Some(template) = &self.carried else {
            return;
        };
        let pps = self.plan.pixels_per_meter() * self.view.zoom;
        let w = template.width * pps;
        let d = template.depth * pps;
        draw_rectangle(
            ctx.mouse.x - w / 2.0,
            ctx.mouse.y - d / 2.0,
            w,
            d,
            theme::ITEM_FILL,
        );
        draw_rectangle_lines(
            ctx.mouse.x - w / 2.0,
            ctx.mouse.y - d / 2.0,
            w,
            d,
            2.0,
            theme::ITEM_BORDER,
        );
    }

    /// Toolbar + canvas viewport for one frame
    pub fn update_canvas(&mut self, ctx: &mut UiContext, rect: Rect) {
        let toolbar = rect.slice_top(CANVAS_TOOLBAR_H);
        let viewport = rect.remaining_after_top(CANVAS_TOOLBAR_H);

        draw_rectangle(toolbar.x, toolbar.y, toolbar.w, toolbar.h, theme::HEADER_COLOR);
        let mut x = toolbar.x + 8.0;
        let mut next = |w: f32| {
            let r = Rect::new(x, toolbar.y + 8.0, w, toolbar.h - 16.0);
            x += w + 6.0;
            r
        };

        if ui::text_button(ctx, next(130.0), "Upload Floor Plan") {
            self.upload_floor_plan();
        }
        if ui::text_button(ctx, next(26.0), "-") {
            self.view.zoom_out();
        }
        ui::label(
            next(44.0),
            &format!("{:.0}%", self.view.zoom * 100.0),
            theme::FONT_SIZE_CONTENT,
            theme::TEXT_COLOR,
        );
        if ui::text_button(ctx, next(26.0), "+") {
            self.view.zoom_in();
        }
        if ui::text_button(ctx, next(54.0), "Reset") {
            self.view.reset();
        }
        if let Some(project) = self.projects.active() {
            let name = project.name.clone();
            let dims = measure_text(&name, None, theme::FONT_SIZE_CONTENT as u16, 1.0);
            ui::label(
                Rect::new(toolbar.right() - dims.width - 12.0, toolbar.y, dims.width, toolbar.h),
                &name,
                theme::FONT_SIZE_CONTENT,
                theme::TEXT_DIM,
            );
        }

        // A press on the floating selection buttons must not fall through
        // to the canvas as a click on empty space
        let press_blocked = canvas::overlay_rects(&self.plan, &self.view, viewport)
            .map(|(rotate, delete)| {
                ctx.mouse.left_pressed
                    && (ctx.mouse.inside(&rotate) || ctx.mouse.inside(&delete))
            })
            .unwrap_or(false);

        let shortcuts_enabled = !self.forms.any_focused();
        let changed = canvas::update(
            &mut self.plan,
            &mut self.view,
            &mut self.mode,
            self.space_held,
            shortcuts_enabled,
            ctx,
            viewport,
            press_blocked,
        );
        canvas::draw_scene(&self.plan, &self.view, viewport);
        let overlay_changed = canvas::selection_overlay(ctx, &mut self.plan, &self.view, viewport);

        self.update_carried(ctx, viewport);

        if changed || overlay_changed {
            self.plan_dirty = true;
        }
    }

    /// Settle queued decodes and apply the outcomes that still belong to
    /// current state
    pub fn pump_decodes(&mut self) {
        for outcome in self.decode.pump(DECODE_BUDGET) {
            self.apply_decode(outcome);
        }
    }

    fn apply_decode(&mut self, outcome: DecodeOutcome) {
        let active = self.projects.active_id().map(str::to_string);
        if !outcome.target.matches(active.as_deref(), self.custom_generation) {
            println!("Discarding stale image decode");
            return;
        }

        match outcome.target {
            DecodeTarget::FloorPlan { from_upload, .. } => match outcome.result {
                Ok(DecodeProduct::Raster {
                    texture,
                    width,
                    height,
                    data_url,
                }) => {
                    self.plan.floor_plan = Some(texture);
                    if from_upload {
                        let dims = fit_dimensions(
                            width as f32,
                            height as f32,
                            screen_width(),
                            screen_height(),
                        );
                        self.plan.dimensions = dims;
                        let mut stored = false;
                        if let Some(project) = self.projects.active_mut() {
                            project.floor_plan_image = Some(data_url);
                            project.floor_plan_dimensions = dims;
                            project.touch();
                            stored = true;
                        }
                        if stored {
                            self.projects.persist(&self.store);
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => println!("Floor plan decode failed: {}", e),
            },
            DecodeTarget::DroppedItem { template, x, y, .. } => {
                // Decode failure degrades to the placeholder rendering
                let texture = match outcome.result {
                    Ok(DecodeProduct::Raster { texture, .. }) => Some(texture),
                    Ok(_) => None,
                    Err(e) => {
                        println!("Furniture image decode failed: {}", e);
                        None
                    }
                };
                self.plan.place(&template, x, y, texture);
                self.plan_dirty = true;
            }
            DecodeTarget::CustomThumbnail {
                name, width, depth, ..
            } => {
                let image = match outcome.result {
                    Ok(DecodeProduct::Thumbnail { data_url }) => Some(data_url),
                    Ok(_) => None,
                    Err(e) => {
                        dialogs::alert(
                            "Custom Furniture",
                            &format!("Failed to load image: {}. Adding furniture without image.", e),
                        );
                        None
                    }
                };
                self.catalog.add_custom(FurnitureTemplate {
                    name,
                    width,
                    depth,
                    image,
                });
                self.catalog.persist(&self.store);
                self.forms.clear_custom();
            }
        }
    }

    /// Merge the in-memory plan back into the active project record and
    /// write the whole collection
    pub fn persist_active(&mut self) {
        {
            let Some(project) = self.projects.active_mut() else {
                return;
            };
            project.placed_items = self.plan.items.clone();
            project.grid_size = self.plan.grid_size;
            project.meters_per_square = self.plan.meters_per_square;
            project.show_grid = self.plan.show_grid;
            project.grid_offset_x = self.plan.grid_offset_x;
            project.grid_offset_y = self.plan.grid_offset_y;
            project.floor_plan_dimensions = self.plan.dimensions;
            project.touch();
        }
        self.projects.persist(&self.store);
    }

    /// Persist at most once per frame, at the frame end
    pub fn flush_dirty(&mut self) {
        if !self.plan_dirty {
            return;
        }
        self.plan_dirty = false;
        self.persist_active();
    }
}
