//! In-process repository.
//!
//! Holds records in a map behind a mutex and counts calls per operation, so
//! tests can assert what the designer actually sent. `set_unavailable(true)`
//! makes every call fail, for exercising error paths.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use super::{PersistenceError, ProjectRepository};
use crate::catalog::Product;
use crate::project::ProjectRecord;

/// Per-operation call counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub get_all_products: usize,
    pub get_project: usize,
    pub create_project: usize,
    pub update_project: usize,
    pub delete_project: usize,
}

#[derive(Default)]
struct Inner {
    projects: HashMap<String, ProjectRecord>,
    products: Vec<Product>,
    calls: CallCounts,
    unavailable: bool,
}

#[derive(Default)]
pub struct MemoryRepository {
    inner: Mutex<Inner>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose catalog holds `products`.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        let repo = Self::new();
        repo.lock().products = products;
        repo
    }

    /// Store a record directly, bypassing call counting. Returns its id.
    pub fn seed_project(&self, mut record: ProjectRecord) -> String {
        let id = record.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
        record.id = Some(id.clone());
        self.lock().projects.insert(id.clone(), record);
        id
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    #[must_use]
    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    #[must_use]
    pub fn project(&self, id: &str) -> Option<ProjectRecord> {
        self.lock().projects.get(id).cloned()
    }

    #[must_use]
    pub fn project_count(&self) -> usize {
        self.lock().projects.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count the call and fail it if the backend is marked unavailable.
    fn begin(&self, count: impl FnOnce(&mut CallCounts)) -> Result<MutexGuard<'_, Inner>, PersistenceError> {
        let mut inner = self.lock();
        count(&mut inner.calls);
        if inner.unavailable {
            return Err(PersistenceError::Unavailable("memory repository marked unavailable".into()));
        }
        Ok(inner)
    }
}

fn now_ms() -> String {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return "0".into();
    };
    dur.as_millis().to_string()
}

#[async_trait::async_trait]
impl ProjectRepository for MemoryRepository {
    async fn get_all_products(&self) -> Result<Vec<Product>, PersistenceError> {
        let inner = self.begin(|c| c.get_all_products += 1)?;
        Ok(inner.products.clone())
    }

    async fn get_project(&self, id: &str) -> Result<ProjectRecord, PersistenceError> {
        let inner = self.begin(|c| c.get_project += 1)?;
        inner.projects.get(id).cloned().ok_or_else(|| PersistenceError::NotFound(id.to_owned()))
    }

    async fn create_project(&self, fields: ProjectRecord) -> Result<ProjectRecord, PersistenceError> {
        let mut inner = self.begin(|c| c.create_project += 1)?;
        let id = Uuid::new_v4().to_string();
        let ts = now_ms();
        let record =
            ProjectRecord { id: Some(id.clone()), created_at: Some(ts.clone()), updated_at: Some(ts), ..fields.fields() };
        inner.projects.insert(id, record.clone());
        Ok(record)
    }

    async fn update_project(&self, id: &str, fields: ProjectRecord) -> Result<ProjectRecord, PersistenceError> {
        let mut inner = self.begin(|c| c.update_project += 1)?;
        let Some(existing) = inner.projects.get_mut(id) else {
            return Err(PersistenceError::NotFound(id.to_owned()));
        };
        *existing = ProjectRecord {
            id: Some(id.to_owned()),
            created_at: existing.created_at.clone(),
            updated_at: Some(now_ms()),
            ..fields.fields()
        };
        Ok(existing.clone())
    }

    async fn delete_project(&self, id: &str) -> Result<(), PersistenceError> {
        let mut inner = self.begin(|c| c.delete_project += 1)?;
        match inner.projects.remove(id) {
            Some(_) => Ok(()),
            None => Err(PersistenceError::NotFound(id.to_owned())),
        }
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
