//! Storage collaborators for floor plan documents.
//!
//! Plans are persisted as whole documents. The editor only talks to the
//! [`PlanStore`] trait; the dashboard backend, the dev-mode in-memory
//! store, and the on-disk store below are interchangeable.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::warn;
use uuid::Uuid;

use crate::error::StorageError;
use crate::model::FloorPlan;
use crate::serialization::{document_from_json, document_to_json_pretty};

/// Whole-document persistence for floor plans.
///
/// `save` assigns an id on first save and returns the persisted
/// document; `load` returns `None` for unknown ids (not-found is a
/// recoverable condition, not an error).
pub trait PlanStore: Send {
    fn save(&mut self, plan: &FloorPlan) -> Result<FloorPlan, StorageError>;
    fn load(&self, id: Uuid) -> Result<Option<FloorPlan>, StorageError>;
    fn list_all(&self) -> Result<Vec<FloorPlan>, StorageError>;
    fn delete(&mut self, id: Uuid) -> Result<(), StorageError>;
}

/// In-memory store used by tests and the dev-mode dashboard.
#[derive(Debug, Default)]
pub struct MemoryStore {
    plans: HashMap<Uuid, FloorPlan>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl PlanStore for MemoryStore {
    fn save(&mut self, plan: &FloorPlan) -> Result<FloorPlan, StorageError> {
        let mut saved = plan.clone();
        let id = *saved.id.get_or_insert_with(Uuid::new_v4);
        self.plans.insert(id, saved.clone());
        Ok(saved)
    }

    fn load(&self, id: Uuid) -> Result<Option<FloorPlan>, StorageError> {
        Ok(self.plans.get(&id).cloned())
    }

    fn list_all(&self) -> Result<Vec<FloorPlan>, StorageError> {
        Ok(self.plans.values().cloned().collect())
    }

    fn delete(&mut self, id: Uuid) -> Result<(), StorageError> {
        self.plans
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound { id })
    }
}

/// Directory-backed JSON store, one `<id>.json` per plan.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) the storage directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn plan_path(&self, id: Uuid) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

impl PlanStore for FileStore {
    fn save(&mut self, plan: &FloorPlan) -> Result<FloorPlan, StorageError> {
        let mut saved = plan.clone();
        let id = *saved.id.get_or_insert_with(Uuid::new_v4);
        let json = document_to_json_pretty(&saved)?;
        fs::write(self.plan_path(id), json)?;
        Ok(saved)
    }

    fn load(&self, id: Uuid) -> Result<Option<FloorPlan>, StorageError> {
        let path = self.plan_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)?;
        Ok(Some(document_from_json(&json)?))
    }

    fn list_all(&self) -> Result<Vec<FloorPlan>, StorageError> {
        let mut plans = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let json = fs::read_to_string(&path)?;
            match document_from_json(&json) {
                Ok(plan) => plans.push(plan),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable plan");
                }
            }
        }
        Ok(plans)
    }

    fn delete(&mut self, id: Uuid) -> Result<(), StorageError> {
        let path = self.plan_path(id);
        if !path.exists() {
            return Err(StorageError::NotFound { id });
        }
        fs::remove_file(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_assigns_id_on_first_save() {
        let mut store = MemoryStore::new();
        let plan = FloorPlan::new("Home");
        assert!(plan.id.is_none());

        let saved = store.save(&plan).unwrap();
        let id = saved.id.unwrap();
        assert_eq!(store.load(id).unwrap().unwrap().name, "Home");

        // Re-saving keeps the id stable.
        let saved_again = store.save(&saved).unwrap();
        assert_eq!(saved_again.id, Some(id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn memory_store_delete_unknown_is_not_found() {
        let mut store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.delete(id),
            Err(StorageError::NotFound { id: missing }) if missing == id
        ));
    }

    #[test]
    fn memory_store_load_unknown_is_none() {
        let store = MemoryStore::new();
        assert!(store.load(Uuid::new_v4()).unwrap().is_none());
    }
}
