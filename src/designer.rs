//! Room designer session: the scene store wired to project storage.
//!
//! DESIGN
//! ======
//! `RoomDesigner` owns one [`SceneStore`], the project currently being edited
//! (if any) and a cached copy of the product catalog. Save, load and delete
//! each make one round trip to the [`ProjectRepository`]. They never return an
//! error: failures are logged and reported as `false` / `None`, and the
//! session is left as it was before the call.
//!
//! `is_saving` / `is_loading` live in an [`Activity`] handle shared with the
//! host, so a UI holding a clone sees them raised while a round trip is
//! pending and can disable its buttons. The flags are lowered by a drop
//! guard, which also covers a save or load future dropped mid-flight. The
//! designer does not itself refuse a second save; gating on the flag is the
//! caller's job.
//!
//! A save captures the viewport camera into the snapshot it sends, but the
//! store only records that camera once the save succeeds. A failed or
//! cancelled save leaves the store as it was.

#[cfg(test)]
#[path = "designer_test.rs"]
mod designer_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info, warn};

use crate::catalog::Product;
use crate::persistence::{ErrorCode, PersistenceError, ProjectRepository};
use crate::project::{DesignProject, ProjectInfo, SnapshotError, parse_project, stringify_project};
use crate::scene::SceneSnapshot;
use crate::store::{Ignored, Outcome, SceneStore};
use crate::viewport::Viewport;

// =============================================================================
// ERROR
// =============================================================================

/// Anything that can go wrong in a save or load round trip.
#[derive(Debug, thiserror::Error)]
pub enum DesignerError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl ErrorCode for DesignerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Persistence(e) => e.error_code(),
            Self::Snapshot(e) => e.error_code(),
        }
    }
}

// =============================================================================
// ACTIVITY
// =============================================================================

/// In-flight flags of one designer. Clones share state, so a host can keep
/// one while the designer itself is borrowed by a pending save or load.
#[derive(Debug, Clone, Default)]
pub struct Activity {
    saving: Arc<AtomicBool>,
    loading: Arc<AtomicBool>,
}

impl Activity {
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }
}

/// Holds a flag raised until dropped.
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn raise(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::Release);
        Self(Arc::clone(flag))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// =============================================================================
// DESIGNER
// =============================================================================

pub struct RoomDesigner {
    store: SceneStore,
    repo: Arc<dyn ProjectRepository>,
    current_project: Option<DesignProject>,
    catalog: Vec<Product>,
    activity: Activity,
}

impl RoomDesigner {
    /// A fresh session on the default scene with no project loaded.
    #[must_use]
    pub fn new(repo: Arc<dyn ProjectRepository>) -> Self {
        Self {
            store: SceneStore::new(),
            repo,
            current_project: None,
            catalog: Vec::new(),
            activity: Activity::default(),
        }
    }

    // --- Projects ---

    /// Save the scene, capturing the viewport camera first.
    ///
    /// Updates the loaded project in place if it has an identity, otherwise
    /// creates a new one (status `Draft` unless `info` says otherwise). On
    /// success the stored result becomes the current project and the
    /// captured camera is recorded in the store.
    pub async fn save_project(&mut self, info: ProjectInfo, viewport: Option<&dyn Viewport>) -> bool {
        let camera = self.store.viewport_camera(viewport);
        let mut scene = self.store.snapshot();
        scene.camera = camera;

        let saving = InFlight::raise(&self.activity.saving);
        let result = self.persist(info, scene).await;
        drop(saving);

        match result {
            Ok(project) => {
                info!(project_id = ?project.id, name = %project.name, "project saved");
                self.store.update_camera(&camera.into());
                self.current_project = Some(project);
                true
            }
            Err(e) => {
                error!(error = %e, code = e.error_code(), "project save failed");
                false
            }
        }
    }

    async fn persist(&self, info: ProjectInfo, scene: SceneSnapshot) -> Result<DesignProject, DesignerError> {
        let loaded = self
            .current_project
            .as_ref()
            .and_then(|p| p.id.clone().map(|id| (p, id)));

        let record = match loaded {
            Some((current, id)) => {
                let mut project = current.clone();
                project.scene = scene;
                project.merge_info(info);
                let fields = stringify_project(&project)?;
                self.repo.update_project(&id, fields).await?
            }
            None => {
                let project = DesignProject::draft(info, scene);
                let fields = stringify_project(&project)?;
                self.repo.create_project(fields).await?
            }
        };

        Ok(parse_project(&record)?)
    }

    /// Fetch a project and make its scene the current one. Nothing changes
    /// unless both the fetch and the decode succeed.
    pub async fn load_project(&mut self, id: &str) -> Option<DesignProject> {
        let loading = InFlight::raise(&self.activity.loading);
        let result = self.fetch(id).await;
        drop(loading);

        match result {
            Ok(project) => {
                info!(project_id = %id, items = project.scene.furniture.len(), "project loaded");
                self.store.replace_scene(project.scene.clone());
                self.current_project = Some(project.clone());
                Some(project)
            }
            Err(e) => {
                error!(project_id = %id, error = %e, code = e.error_code(), "project load failed");
                None
            }
        }
    }

    async fn fetch(&self, id: &str) -> Result<DesignProject, DesignerError> {
        let record = self.repo.get_project(id).await?;
        Ok(parse_project(&record)?)
    }

    /// Delete a stored project. If it is the loaded one the current-project
    /// pointer is cleared; the scene itself stays on screen.
    pub async fn delete_project(&mut self, id: &str) -> bool {
        match self.repo.delete_project(id).await {
            Ok(()) => {
                info!(project_id = %id, "project deleted");
                if self.current_project.as_ref().and_then(|p| p.id.as_deref()) == Some(id) {
                    self.current_project = None;
                }
                true
            }
            Err(e) => {
                error!(project_id = %id, error = %e, code = e.error_code(), "project delete failed");
                false
            }
        }
    }

    /// Start over locally: default scene, no project. No storage call.
    pub fn create_new_project(&mut self) {
        self.store.reset();
        self.current_project = None;
    }

    // --- Catalog ---

    /// Reload the product catalog. On failure the previous catalog is kept.
    pub async fn refresh_catalog(&mut self) -> bool {
        match self.repo.get_all_products().await {
            Ok(products) => {
                info!(count = products.len(), "catalog refreshed");
                self.catalog = products;
                true
            }
            Err(e) => {
                error!(error = %e, code = e.error_code(), "catalog refresh failed");
                false
            }
        }
    }

    /// Place the cached catalog product with id `product_id`.
    pub fn add_catalog_product(&mut self, product_id: &str) -> Outcome {
        let Some(product) = self.catalog.iter().find(|p| p.id == product_id) else {
            warn!(product_id, "product not in catalog");
            return Outcome::Ignored(Ignored::UnknownProduct);
        };
        self.store.add_furniture(product)
    }

    // --- Queries ---

    #[must_use]
    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    /// Mutable access for scene edits between saves.
    pub fn store_mut(&mut self) -> &mut SceneStore {
        &mut self.store
    }

    #[must_use]
    pub fn current_project(&self) -> Option<&DesignProject> {
        self.current_project.as_ref()
    }

    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// A handle on the in-flight flags that stays readable during a save or
    /// load.
    #[must_use]
    pub fn activity(&self) -> Activity {
        self.activity.clone()
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.activity.is_saving()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.activity.is_loading()
    }
}
