//! Furniture Catalog
//!
//! Fixed built-in templates plus the user's custom list. Built-ins always
//! come first in the combined catalog; only the custom tail is persisted
//! (whole-collection, under its own storage key).

use crate::storage::{self, KvStore, StorageError, CUSTOM_FURNITURE_KEY};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named furniture footprint in meters, with an optional image data URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureTemplate {
    pub name: String,
    pub width: f32,
    pub depth: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Built-in templates: name, width (m), depth (m)
const BUILTIN_SPECS: [(&str, f32, f32); 19] = [
    ("Single Bed", 1.0, 2.0),
    ("Double Bed", 1.4, 2.0),
    ("Sofa 2-Seater", 1.8, 0.9),
    ("Sofa 3-Seater", 2.2, 0.9),
    ("Dining Table 4p", 1.2, 0.8),
    ("Dining Table 6p", 1.8, 0.9),
    ("Dining Chair", 0.5, 0.5),
    ("Desk Chair", 0.6, 0.6),
    ("Coffee Table", 1.2, 0.6),
    ("Sq Coffee Table", 0.9, 0.9),
    ("Desk", 1.4, 0.7),
    ("Armchair", 0.9, 0.9),
    ("Wardrobe", 1.2, 0.6),
    ("Chest of Drawers", 0.9, 0.5),
    ("Bedside Cabinet", 0.5, 0.4),
    ("Thin Shelf", 1.0, 0.25),
    ("Shelf", 1.0, 0.4),
    ("Bookshelf", 0.8, 0.3),
    ("TV Stand", 1.5, 0.4),
];

/// Number of built-in templates
pub fn builtin_count() -> usize {
    BUILTIN_SPECS.len()
}

fn builtin_templates() -> Vec<FurnitureTemplate> {
    BUILTIN_SPECS
        .iter()
        .map(|&(name, width, depth)| FurnitureTemplate {
            name: name.to_string(),
            width,
            depth,
            image: None,
        })
        .collect()
}

/// Errors from catalog operations
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Name, width, or depth missing/unparsable on the custom form
    IncompleteForm,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::IncompleteForm => {
                write!(f, "please fill name, width, and depth fields")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Validate the custom-furniture form fields.
///
/// Width and depth must parse as positive meters.
pub fn parse_entry(name: &str, width: &str, depth: &str) -> Result<(String, f32, f32), CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::IncompleteForm);
    }
    let width: f32 = width.trim().parse().map_err(|_| CatalogError::IncompleteForm)?;
    let depth: f32 = depth.trim().parse().map_err(|_| CatalogError::IncompleteForm)?;
    if width <= 0.0 || depth <= 0.0 {
        return Err(CatalogError::IncompleteForm);
    }
    Ok((name.to_string(), width, depth))
}

/// The combined furniture catalog: built-ins followed by custom entries
pub struct Catalog {
    templates: Vec<FurnitureTemplate>,
}

impl Catalog {
    /// Read the custom collection from storage and prepend the built-ins.
    ///
    /// A malformed document is logged and treated as an empty custom list.
    pub fn load(store: &dyn KvStore) -> Self {
        let custom = match storage::get_json::<Vec<FurnitureTemplate>>(store, CUSTOM_FURNITURE_KEY)
        {
            Ok(Some(custom)) => custom,
            Ok(None) => Vec::new(),
            Err(StorageError::Serde(msg)) => {
                println!("Ignoring malformed custom furniture store: {}", msg);
                Vec::new()
            }
            Err(e) => {
                println!("Failed to read custom furniture: {}", e);
                Vec::new()
            }
        };
        let mut templates = builtin_templates();
        templates.extend(custom);
        Self { templates }
    }

    /// All templates, built-ins first
    pub fn entries(&self) -> &[FurnitureTemplate] {
        &self.templates
    }

    pub fn get(&self, index: usize) -> Option<&FurnitureTemplate> {
        self.templates.get(index)
    }

    /// Whether a catalog index addresses a custom entry
    pub fn is_custom(&self, index: usize) -> bool {
        index >= builtin_count() && index < self.templates.len()
    }

    fn custom_slice(&self) -> &[FurnitureTemplate] {
        &self.templates[builtin_count()..]
    }

    /// Append a custom template
    pub fn add_custom(&mut self, template: FurnitureTemplate) {
        self.templates.push(template);
    }

    /// Remove a custom entry addressed by its catalog-wide index.
    ///
    /// Built-in indices (and out-of-range indices) are a no-op.
    pub fn remove_custom(&mut self, catalog_index: usize) -> Option<FurnitureTemplate> {
        if !self.is_custom(catalog_index) {
            return None;
        }
        Some(self.templates.remove(catalog_index))
    }

    /// Write the custom tail to storage
    pub fn persist(&self, store: &dyn KvStore) {
        if let Err(e) = storage::put_json(store, CUSTOM_FURNITURE_KEY, &self.custom_slice()) {
            println!("Failed to persist custom furniture: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStore;
    use tempfile::TempDir;

    fn custom(name: &str) -> FurnitureTemplate {
        FurnitureTemplate {
            name: name.to_string(),
            width: 1.0,
            depth: 1.0,
            image: None,
        }
    }

    #[test]
    fn test_builtin_catalog() {
        assert_eq!(builtin_count(), 19);

        let dir = TempDir::new().unwrap();
        let store = LocalStore::with_base_dir(dir.path());
        let catalog = Catalog::load(&store);

        assert_eq!(catalog.entries().len(), 19);
        assert_eq!(catalog.entries()[0].name, "Single Bed");
        let bed = &catalog.entries()[1];
        assert_eq!(bed.name, "Double Bed");
        assert_eq!(bed.width, 1.4);
        assert_eq!(bed.depth, 2.0);
    }

    #[test]
    fn test_customs_follow_builtins() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::with_base_dir(dir.path());
        let mut catalog = Catalog::load(&store);

        catalog.add_custom(custom("Piano"));
        assert_eq!(catalog.entries().len(), 20);
        assert_eq!(catalog.entries()[19].name, "Piano");
        assert!(catalog.is_custom(19));
        assert!(!catalog.is_custom(0));
        assert!(!catalog.is_custom(42));
    }

    #[test]
    fn test_remove_custom_maps_catalog_index() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::with_base_dir(dir.path());
        let mut catalog = Catalog::load(&store);

        catalog.add_custom(custom("Piano"));
        catalog.add_custom(custom("Aquarium"));

        // Built-in index is refused
        assert!(catalog.remove_custom(3).is_none());
        assert_eq!(catalog.entries().len(), 21);

        let removed = catalog.remove_custom(builtin_count()).unwrap();
        assert_eq!(removed.name, "Piano");
        assert_eq!(catalog.entries()[builtin_count()].name, "Aquarium");
    }

    #[test]
    fn test_persist_only_custom_tail() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::with_base_dir(dir.path());

        let mut catalog = Catalog::load(&store);
        catalog.add_custom(custom("Piano"));
        catalog.persist(&store);

        let reloaded = Catalog::load(&store);
        assert_eq!(reloaded.entries().len(), 20);
        assert_eq!(reloaded.custom_slice().len(), 1);
        assert_eq!(reloaded.custom_slice()[0].name, "Piano");
    }

    #[test]
    fn test_parse_entry_validation() {
        assert!(parse_entry("Piano", "1.5", "0.6").is_ok());
        assert_eq!(
            parse_entry("", "1.5", "0.6"),
            Err(CatalogError::IncompleteForm)
        );
        assert_eq!(
            parse_entry("Piano", "", "0.6"),
            Err(CatalogError::IncompleteForm)
        );
        assert_eq!(
            parse_entry("Piano", "abc", "0.6"),
            Err(CatalogError::IncompleteForm)
        );
        assert_eq!(
            parse_entry("Piano", "1.5", "-2"),
            Err(CatalogError::IncompleteForm)
        );

        let (name, w, d) = parse_entry("  Piano ", " 1.5", "0.6 ").unwrap();
        assert_eq!(name, "Piano");
        assert_eq!(w, 1.5);
        assert_eq!(d, 0.6);
    }
}
