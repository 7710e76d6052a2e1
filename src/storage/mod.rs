//! Storage Abstraction Layer
//!
//! Key-value persistence for project and catalog collections. Each key maps
//! to one JSON document; collections are read whole on init and written
//! whole on change.
//!
//! Uses a fire-and-poll pattern: operations return a handle immediately.
//! The local backend completes synchronously, so handles are always ready,
//! but call sites never assume that.

// Allow unused - the poll surface is part of the handle contract
#![allow(dead_code)]

pub mod local;

pub use local::LocalStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Storage key for the project collection
pub const PROJECTS_KEY: &str = "floorPlanProjects";

/// Storage key for the custom furniture collection
pub const CUSTOM_FURNITURE_KEY: &str = "customFurniture";

/// Storage operation status (fire-and-poll pattern)
#[derive(Debug, Clone)]
pub enum StorageStatus<T> {
    /// Operation is still in progress
    Pending,
    /// Operation completed successfully
    Ready(T),
    /// Operation failed
    Error(StorageError),
}

impl<T> StorageStatus<T> {
    /// Check if the operation is still pending
    pub fn is_pending(&self) -> bool {
        matches!(self, StorageStatus::Pending)
    }

    /// Take the result if ready, returning None if still pending
    pub fn take(self) -> Option<Result<T, StorageError>> {
        match self {
            StorageStatus::Pending => None,
            StorageStatus::Ready(v) => Some(Ok(v)),
            StorageStatus::Error(e) => Some(Err(e)),
        }
    }
}

/// Storage error types
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Key not present in the store
    NotFound(String),
    /// I/O error
    Io(String),
    /// Serialization/deserialization error
    Serde(String),
    /// Other error
    Other(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(key) => write!(f, "not found: {}", key),
            StorageError::Io(msg) => write!(f, "I/O error: {}", msg),
            StorageError::Serde(msg) => write!(f, "serialization error: {}", msg),
            StorageError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            _ => StorageError::Io(e.to_string()),
        }
    }
}

/// Handle for tracking a storage operation
///
/// Holds the result of a storage operation. For the local backend the
/// result is available immediately; callers still go through `take`.
#[derive(Debug)]
pub struct StorageHandle<T> {
    status: StorageStatus<T>,
}

impl<T> StorageHandle<T> {
    /// Create a handle that's immediately ready with a value
    pub fn ready(value: T) -> Self {
        Self {
            status: StorageStatus::Ready(value),
        }
    }

    /// Create a handle that's immediately ready with an error
    pub fn error(err: StorageError) -> Self {
        Self {
            status: StorageStatus::Error(err),
        }
    }

    /// Check if the operation is still pending
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Take the result, consuming the handle
    ///
    /// Returns None if the operation is still pending.
    pub fn take(self) -> Option<Result<T, StorageError>> {
        self.status.take()
    }
}

/// Key-value persistence backend
pub trait KvStore {
    /// Read the raw document stored under a key, None if absent
    fn get(&self, key: &str) -> StorageHandle<Option<String>>;

    /// Write the raw document for a key, creating it if absent
    fn put(&self, key: &str, value: &str) -> StorageHandle<()>;

    /// Remove a key entirely; removing an absent key is not an error
    fn remove(&self, key: &str) -> StorageHandle<()>;
}

/// Read and deserialize a JSON collection, treating an absent key as None.
///
/// A present-but-malformed document is reported as `StorageError::Serde`;
/// callers log it and fall back to an empty collection rather than crashing.
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let raw = match store.get(key).take() {
        Some(Ok(raw)) => raw,
        Some(Err(e)) => return Err(e),
        None => return Ok(None),
    };
    match raw {
        Some(doc) => serde_json::from_str(&doc)
            .map(Some)
            .map_err(|e| StorageError::Serde(e.to_string())),
        None => Ok(None),
    }
}

/// Serialize and write a JSON collection under a key
pub fn put_json<T: Serialize>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let doc = serde_json::to_string(value).map_err(|e| StorageError::Serde(e.to_string()))?;
    match store.put(key, &doc).take() {
        Some(result) => result,
        None => Ok(()),
    }
}
