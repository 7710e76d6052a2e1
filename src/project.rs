//! Project Data
//!
//! A project owns everything the canvas shows: the floor-plan image, the
//! measurement grid configuration, and the placed furniture. The full
//! project list is the unit of persistence: it is read whole on startup and
//! written whole after every structural change, under one storage key.

use crate::storage::{self, KvStore, StorageError, PROJECTS_KEY};
use macroquad::texture::Texture2D;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default measurement grid cell size in plan pixels
pub const DEFAULT_GRID_SIZE: f32 = 50.0;

/// Default real-world meters represented by one grid cell
pub const DEFAULT_METERS_PER_SQUARE: f32 = 1.0;

fn default_grid_size() -> f32 {
    DEFAULT_GRID_SIZE
}

fn default_meters_per_square() -> f32 {
    DEFAULT_METERS_PER_SQUARE
}

fn default_show_grid() -> bool {
    true
}

/// Plan canvas size in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanDimensions {
    pub width: f32,
    pub height: f32,
}

impl Default for PlanDimensions {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

/// Scale an uploaded image down to fit the canvas viewport, preserving
/// aspect ratio. The plan may use at most 60% of the viewport width and the
/// viewport height minus room for the toolbar.
pub fn fit_dimensions(img_w: f32, img_h: f32, viewport_w: f32, viewport_h: f32) -> PlanDimensions {
    let max_w = viewport_w * 0.6;
    let max_h = viewport_h - 100.0;

    let mut width = img_w;
    let mut height = img_h;

    if width > max_w {
        height = height * max_w / width;
        width = max_w;
    }
    if height > max_h {
        width = width * max_h / height;
        height = max_h;
    }

    PlanDimensions {
        width: width.round(),
        height: height.round(),
    }
}

/// A furniture template instance placed on the plan.
///
/// Position is the item's center in world pixels; width/depth stay in
/// meters so rescaling the grid never touches stored items. The runtime id
/// and the decoded texture are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    #[serde(skip)]
    pub id: u64,
    pub name: String,
    pub width: f32,
    pub depth: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub rotation: f32,
    #[serde(skip)]
    pub texture: Option<Texture2D>,
}

/// One named floor plan layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub floor_plan_image: Option<String>,
    #[serde(default)]
    pub placed_items: Vec<PlacedItem>,
    #[serde(default = "default_grid_size")]
    pub grid_size: f32,
    #[serde(default = "default_meters_per_square")]
    pub meters_per_square: f32,
    #[serde(default = "default_show_grid")]
    pub show_grid: bool,
    #[serde(default)]
    pub grid_offset_x: f32,
    #[serde(default)]
    pub grid_offset_y: f32,
    #[serde(default)]
    pub floor_plan_dimensions: PlanDimensions,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub last_modified: String,
}

impl Project {
    /// Create a project with default grid config and an empty item list
    pub fn new(name: impl Into<String>) -> Self {
        let now = now_iso();
        Self {
            id: time_id(),
            name: name.into(),
            floor_plan_image: None,
            placed_items: Vec::new(),
            grid_size: DEFAULT_GRID_SIZE,
            meters_per_square: DEFAULT_METERS_PER_SQUARE,
            show_grid: true,
            grid_offset_x: 0.0,
            grid_offset_y: 0.0,
            floor_plan_dimensions: PlanDimensions::default(),
            created: now.clone(),
            last_modified: now,
        }
    }

    /// Stamp the last-modified timestamp
    pub fn touch(&mut self) {
        self.last_modified = now_iso();
    }
}

/// RFC 3339 timestamp for created/lastModified stamps
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Time-based project id token (millisecond epoch)
fn time_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

/// Errors from project operations
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectError {
    /// Project name missing or whitespace-only
    BlankName,
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectError::BlankName => write!(f, "please enter a project name"),
        }
    }
}

impl std::error::Error for ProjectError {}

/// The project list plus the currently active project
///
/// Exactly one project is active at a time (or none, when the list is
/// empty). In-memory plan state mirrors the active project and is merged
/// back through `App::persist_active`.
pub struct ProjectStore {
    projects: Vec<Project>,
    active: Option<String>,
}

impl ProjectStore {
    /// Read the project collection from storage.
    ///
    /// A malformed document is logged and treated as an empty collection.
    pub fn load(store: &dyn KvStore) -> Self {
        let projects = match storage::get_json::<Vec<Project>>(store, PROJECTS_KEY) {
            Ok(Some(projects)) => projects,
            Ok(None) => Vec::new(),
            Err(StorageError::Serde(msg)) => {
                println!("Ignoring malformed project store: {}", msg);
                Vec::new()
            }
            Err(e) => {
                println!("Failed to read project store: {}", e);
                Vec::new()
            }
        };
        Self {
            projects,
            active: None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn first_id(&self) -> Option<String> {
        self.projects.first().map(|p| p.id.clone())
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    pub fn active(&self) -> Option<&Project> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Project> {
        let id = self.active.clone()?;
        self.get_mut(&id)
    }

    /// Append a new project and make it active.
    ///
    /// Duplicate names are allowed; identity is the time-based id.
    pub fn create(&mut self, name: &str) -> Result<String, ProjectError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProjectError::BlankName);
        }
        let project = Project::new(name);
        let id = project.id.clone();
        self.projects.push(project);
        self.active = Some(id.clone());
        Ok(id)
    }

    /// Make a stored project active; unknown ids are a no-op
    pub fn activate(&mut self, id: &str) -> Option<&Project> {
        if self.get(id).is_some() {
            self.active = Some(id.to_string());
        }
        self.get(id)
    }

    /// Remove a project. If it was active, the first remaining project
    /// becomes active (or none). Returns true if anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == before {
            return false;
        }
        if self.active.as_deref() == Some(id) {
            self.active = self.first_id();
        }
        true
    }

    /// Write the whole collection to storage; an empty list removes the key
    pub fn persist(&self, store: &dyn KvStore) {
        if self.projects.is_empty() {
            if let Some(Err(e)) = store.remove(PROJECTS_KEY).take() {
                println!("Failed to clear project store: {}", e);
            }
            return;
        }
        if let Err(e) = storage::put_json(store, PROJECTS_KEY, &self.projects) {
            println!("Failed to persist projects: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStore;
    use tempfile::TempDir;

    #[test]
    fn test_missing_fields_default() {
        let json = r#"{"id":"1700000000000","name":"Bedroom"}"#;
        let p: Project = serde_json::from_str(json).unwrap();

        assert_eq!(p.grid_size, 50.0);
        assert_eq!(p.meters_per_square, 1.0);
        assert!(p.show_grid);
        assert_eq!(p.grid_offset_x, 0.0);
        assert_eq!(p.grid_offset_y, 0.0);
        assert_eq!(p.floor_plan_dimensions.width, 1200.0);
        assert_eq!(p.floor_plan_dimensions.height, 800.0);
        assert!(p.placed_items.is_empty());
        assert!(p.floor_plan_image.is_none());
    }

    #[test]
    fn test_create_blank_name_rejected() {
        let mut store = ProjectStore {
            projects: Vec::new(),
            active: None,
        };
        assert_eq!(store.create(""), Err(ProjectError::BlankName));
        assert_eq!(store.create("   "), Err(ProjectError::BlankName));
        assert!(store.is_empty());
        assert!(store.active_id().is_none());
    }

    #[test]
    fn test_create_appends_and_activates() {
        let mut store = ProjectStore {
            projects: Vec::new(),
            active: None,
        };
        let id = store.create("Bedroom").unwrap();
        assert_eq!(store.active_id(), Some(id.as_str()));
        assert_eq!(store.projects().len(), 1);

        // Duplicate names are allowed and create a second record
        store.create("Bedroom").unwrap();
        assert_eq!(store.projects().len(), 2);
    }

    #[test]
    fn test_delete_active_falls_back_to_first() {
        let mut store = ProjectStore {
            projects: Vec::new(),
            active: None,
        };
        let a = store.create("A").unwrap();
        let b = store.create("B").unwrap();
        store.activate(&b);

        assert!(store.delete(&b));
        assert_eq!(store.active_id(), Some(a.as_str()));

        assert!(store.delete(&a));
        assert!(store.active_id().is_none());
        assert!(store.is_empty());

        assert!(!store.delete("not-there"));
    }

    #[test]
    fn test_delete_inactive_keeps_active() {
        let mut store = ProjectStore {
            projects: Vec::new(),
            active: None,
        };
        let a = store.create("A").unwrap();
        let b = store.create("B").unwrap();
        store.activate(&a);

        store.delete(&b);
        assert_eq!(store.active_id(), Some(a.as_str()));
    }

    #[test]
    fn test_persist_round_trip_and_empty_removes_key() {
        let dir = TempDir::new().unwrap();
        let kv = LocalStore::with_base_dir(dir.path());

        let mut store = ProjectStore {
            projects: Vec::new(),
            active: None,
        };
        let id = store.create("Bedroom").unwrap();
        store.persist(&kv);

        let reloaded = ProjectStore::load(&kv);
        assert_eq!(reloaded.projects().len(), 1);
        assert_eq!(reloaded.projects()[0].id, id);
        assert_eq!(reloaded.projects()[0].name, "Bedroom");
        // Active project is a session concept, not persisted
        assert!(reloaded.active_id().is_none());

        store.delete(&id);
        store.persist(&kv);
        assert!(!dir.path().join("floorPlanProjects.json").exists());
    }

    #[test]
    fn test_malformed_store_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let kv = LocalStore::with_base_dir(dir.path());
        std::fs::write(dir.path().join("floorPlanProjects.json"), "{oops").unwrap();

        let store = ProjectStore::load(&kv);
        assert!(store.is_empty());
    }

    #[test]
    fn test_fit_dimensions_shrinks_preserving_aspect() {
        // 2000x1000 upload against a 1920x1080 viewport:
        // limits are 1152 wide by 980 tall
        let dims = fit_dimensions(2000.0, 1000.0, 1920.0, 1080.0);
        assert_eq!(dims.width, 1152.0);
        assert_eq!(dims.height, 576.0);
        let aspect = dims.width / dims.height;
        assert!((aspect - 2.0).abs() < 0.01);

        // Small images are left alone
        let dims = fit_dimensions(800.0, 600.0, 1920.0, 1080.0);
        assert_eq!(dims.width, 800.0);
        assert_eq!(dims.height, 600.0);

        // Very tall images are bounded by height
        let dims = fit_dimensions(500.0, 4000.0, 1920.0, 1080.0);
        assert_eq!(dims.height, 980.0);
        assert!(dims.width <= 500.0);
    }

    #[test]
    fn test_placed_item_serde_skips_runtime_fields() {
        let item = PlacedItem {
            id: 7,
            name: "Desk".into(),
            width: 1.4,
            depth: 0.7,
            image: None,
            x: 100.0,
            y: 200.0,
            rotation: 45.0,
            texture: None,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(!json.contains("texture"));
        assert!(!json.contains("image"));

        let back: PlacedItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, 0);
        assert_eq!(back.rotation, 45.0);
        assert_eq!(back.name, "Desk");
    }
}
