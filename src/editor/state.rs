//! Plan state - grid config, placed items, selection, hit-testing
//!
//! In-memory mirror of the active project. All mutation goes through the
//! methods here, which keeps interaction logic unit-testable without a
//! rendering surface; drawing reads this state but never writes it.

use crate::catalog::FurnitureTemplate;
use crate::project::{
    PlacedItem, PlanDimensions, Project, DEFAULT_GRID_SIZE, DEFAULT_METERS_PER_SQUARE,
};
use macroquad::texture::Texture2D;

/// The active plan: measurement grid, placed furniture, selection
pub struct PlanState {
    /// Grid cell size in plan pixels
    pub grid_size: f32,
    /// Real-world meters per grid cell
    pub meters_per_square: f32,
    pub show_grid: bool,
    pub grid_offset_x: f32,
    pub grid_offset_y: f32,
    /// Plan canvas size in world pixels
    pub dimensions: PlanDimensions,
    /// Placed furniture, in draw order (later items on top)
    pub items: Vec<PlacedItem>,
    /// Selected item id; at most one item is selected
    pub selected: Option<u64>,
    /// Decoded floor-plan raster, None until the decode settles
    pub floor_plan: Option<Texture2D>,
    next_item_id: u64,
}

impl PlanState {
    /// Fresh plan with default grid config and no items
    pub fn new() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            meters_per_square: DEFAULT_METERS_PER_SQUARE,
            show_grid: true,
            grid_offset_x: 0.0,
            grid_offset_y: 0.0,
            dimensions: PlanDimensions::default(),
            items: Vec::new(),
            selected: None,
            floor_plan: None,
            next_item_id: 1,
        }
    }

    /// Mirror a stored project into memory.
    ///
    /// Items get fresh runtime ids; selection is cleared; the floor plan
    /// texture stays empty until its decode settles.
    pub fn from_project(project: &Project) -> Self {
        let mut state = Self::new();
        state.grid_size = project.grid_size;
        state.meters_per_square = project.meters_per_square;
        state.show_grid = project.show_grid;
        state.grid_offset_x = project.grid_offset_x;
        state.grid_offset_y = project.grid_offset_y;
        state.dimensions = project.floor_plan_dimensions;
        for stored in &project.placed_items {
            let mut item = stored.clone();
            item.id = state.next_item_id;
            item.texture = None;
            state.next_item_id += 1;
            state.items.push(item);
        }
        state
    }

    /// Plan pixels per real-world meter; the one conversion used for both
    /// sizing and hit-testing
    pub fn pixels_per_meter(&self) -> f32 {
        self.grid_size / self.meters_per_square
    }

    /// An item's on-screen footprint in plan pixels (before view zoom)
    pub fn footprint_px(&self, item: &PlacedItem) -> (f32, f32) {
        let pps = self.pixels_per_meter();
        (item.width * pps, item.depth * pps)
    }

    pub fn item(&self, id: u64) -> Option<&PlacedItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn selected_item(&self) -> Option<&PlacedItem> {
        self.selected.and_then(|id| self.item(id))
    }

    fn index_of(&self, id: u64) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    /// Exact point-in-oriented-rectangle hit test, topmost (last drawn)
    /// item first. The query point is inverse-rotated into the item's local
    /// frame; edges and corners count as inside.
    pub fn item_at(&self, wx: f32, wy: f32) -> Option<u64> {
        let pps = self.pixels_per_meter();
        for item in self.items.iter().rev() {
            let half_w = item.width * pps / 2.0;
            let half_d = item.depth * pps / 2.0;

            let dx = wx - item.x;
            let dy = wy - item.y;
            let angle = -item.rotation.to_radians();
            let (sin, cos) = angle.sin_cos();
            let local_x = dx * cos - dy * sin;
            let local_y = dx * sin + dy * cos;

            if local_x.abs() <= half_w && local_y.abs() <= half_d {
                return Some(item.id);
            }
        }
        None
    }

    /// Select an item (or clear with None)
    pub fn select(&mut self, id: Option<u64>) {
        self.selected = id.filter(|id| self.index_of(*id).is_some());
    }

    /// Append a template instance at a world position, with rotation 0,
    /// and select it. Returns the new item's id.
    pub fn place(
        &mut self,
        template: &FurnitureTemplate,
        x: f32,
        y: f32,
        texture: Option<Texture2D>,
    ) -> u64 {
        let id = self.next_item_id;
        self.next_item_id += 1;
        self.items.push(PlacedItem {
            id,
            name: template.name.clone(),
            width: template.width,
            depth: template.depth,
            image: template.image.clone(),
            x,
            y,
            rotation: 0.0,
            texture,
        });
        self.selected = Some(id);
        id
    }

    /// Move an item's center to a world position
    pub fn move_item(&mut self, id: u64, x: f32, y: f32) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.items[index].x = x;
        self.items[index].y = y;
        true
    }

    /// Rotate the selected item by 45 degrees; no-op without a selection
    pub fn rotate_selected(&mut self) -> bool {
        let Some(index) = self.selected.and_then(|id| self.index_of(id)) else {
            return false;
        };
        self.items[index].rotation += 45.0;
        true
    }

    /// Remove the selected item and clear the selection; no-op without one
    pub fn delete_selected(&mut self) -> bool {
        let Some(index) = self.selected.and_then(|id| self.index_of(id)) else {
            return false;
        };
        self.items.remove(index);
        self.selected = None;
        true
    }
}

impl Default for PlanState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str, width: f32, depth: f32) -> FurnitureTemplate {
        FurnitureTemplate {
            name: name.to_string(),
            width,
            depth,
            image: None,
        }
    }

    #[test]
    fn test_footprint_uses_grid_scale() {
        // Double Bed 1.4m x 2.0m at gridSize 50, 1 m/square -> 70x100 px
        let mut plan = PlanState::new();
        plan.place(&template("Double Bed", 1.4, 2.0), 300.0, 300.0, None);

        let item = plan.items.last().unwrap();
        let (w, d) = plan.footprint_px(item);
        assert!((w - 70.0).abs() < 1e-3);
        assert!((d - 100.0).abs() < 1e-3);
        assert_eq!((item.x, item.y), (300.0, 300.0));

        // Rescaling the grid changes the footprint, not the stored meters
        plan.grid_size = 100.0;
        let item = plan.items.last().unwrap();
        let (w, d) = plan.footprint_px(item);
        assert!((w - 140.0).abs() < 1e-3);
        assert!((d - 200.0).abs() < 1e-3);
        assert_eq!(item.width, 1.4);
    }

    #[test]
    fn test_hit_test_rotated_corner() {
        let mut plan = PlanState::new();
        let id = plan.place(&template("Desk", 1.0, 0.5), 0.0, 0.0, None);
        plan.items[0].rotation = 30.0;

        // Half extents: 25 x 12.5 plan px. The corner region of the box,
        // rotated into world space, must classify as inside. Sampled a hair
        // inside the exact corner so two f32 rotations cannot tip the
        // boundary comparison.
        let (half_w, half_d) = (25.0f32 - 1e-3, 12.5f32 - 1e-3);
        let angle = 30.0f32.to_radians();
        let (sin, cos) = angle.sin_cos();
        let corner = (half_w * cos - half_d * sin, half_w * sin + half_d * cos);
        assert_eq!(plan.item_at(corner.0, corner.1), Some(id));

        // Epsilon beyond the corner along the local diagonal is outside
        let eps = 1e-2;
        let out_local = (half_w + eps, half_d + eps);
        let out = (
            out_local.0 * cos - out_local.1 * sin,
            out_local.0 * sin + out_local.1 * cos,
        );
        assert_eq!(plan.item_at(out.0, out.1), None);
    }

    #[test]
    fn test_hit_test_returns_topmost() {
        let mut plan = PlanState::new();
        let below = plan.place(&template("Rug", 2.0, 2.0), 100.0, 100.0, None);
        let above = plan.place(&template("Coffee Table", 1.2, 0.6), 100.0, 100.0, None);

        assert_eq!(plan.item_at(100.0, 100.0), Some(above));

        // Outside the table but still on the rug
        assert_eq!(plan.item_at(100.0, 140.0), Some(below));
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut plan = PlanState::new();
        plan.place(&template("Desk", 1.4, 0.7), 50.0, 50.0, None);
        assert!(plan.selected.is_some());

        assert!(plan.delete_selected());
        assert_eq!(plan.selected, None);
        assert!(plan.items.is_empty());

        // Without a selection both actions are no-ops
        assert!(!plan.delete_selected());
        assert!(!plan.rotate_selected());
    }

    #[test]
    fn test_rotate_accumulates() {
        let mut plan = PlanState::new();
        plan.place(&template("Desk", 1.4, 0.7), 50.0, 50.0, None);
        plan.rotate_selected();
        plan.rotate_selected();
        plan.rotate_selected();
        assert_eq!(plan.items[0].rotation, 135.0);
    }

    #[test]
    fn test_select_validates_id() {
        let mut plan = PlanState::new();
        let id = plan.place(&template("Desk", 1.4, 0.7), 50.0, 50.0, None);

        plan.select(None);
        assert_eq!(plan.selected, None);
        plan.select(Some(id));
        assert_eq!(plan.selected, Some(id));
        plan.select(Some(id + 999));
        assert_eq!(plan.selected, None);
    }

    #[test]
    fn test_from_project_replaces_state() {
        let mut project = Project::new("Bedroom");
        project.grid_size = 80.0;
        project.meters_per_square = 2.0;
        project.show_grid = false;
        project.grid_offset_x = 12.0;
        project.grid_offset_y = -3.0;
        project.floor_plan_dimensions = PlanDimensions {
            width: 640.0,
            height: 480.0,
        };
        project.placed_items.push(PlacedItem {
            id: 0,
            name: "Desk".into(),
            width: 1.4,
            depth: 0.7,
            image: None,
            x: 10.0,
            y: 20.0,
            rotation: 90.0,
            texture: None,
        });

        let plan = PlanState::from_project(&project);
        assert_eq!(plan.grid_size, 80.0);
        assert_eq!(plan.meters_per_square, 2.0);
        assert!(!plan.show_grid);
        assert_eq!(plan.grid_offset_x, 12.0);
        assert_eq!(plan.grid_offset_y, -3.0);
        assert_eq!(plan.dimensions.width, 640.0);
        assert_eq!(plan.items.len(), 1);
        assert!(plan.items[0].id != 0);
        assert_eq!(plan.selected, None);
        assert!(plan.floor_plan.is_none());

        // A project deserialized without grid fields mirrors the defaults
        let bare: Project =
            serde_json::from_str(r#"{"id":"1","name":"Empty"}"#).unwrap();
        let plan = PlanState::from_project(&bare);
        assert_eq!(plan.grid_size, 50.0);
        assert_eq!(plan.meters_per_square, 1.0);
        assert!(plan.show_grid);
        assert_eq!((plan.grid_offset_x, plan.grid_offset_y), (0.0, 0.0));
        assert_eq!(plan.dimensions, PlanDimensions::default());
    }
}
