//! Design projects and their persisted shape.
//!
//! DESIGN
//! ======
//! In memory a project carries its scene as nested data ([`SceneSnapshot`]).
//! The document store keeps records flat, so the room, camera and furniture
//! are each encoded as an independent JSON text field of a [`ProjectRecord`].
//! [`stringify_project`] and [`parse_project`] convert between the two; a
//! field that fails to decode is reported by name.

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_PROJECT_NAME;
use crate::scene::SceneSnapshot;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid {field} snapshot: {source}")]
    Decode { field: &'static str, source: serde_json::Error },
    #[error("failed to encode {field} snapshot: {source}")]
    Encode { field: &'static str, source: serde_json::Error },
    #[error("cannot encode {field} snapshot: contains a NaN or infinite number")]
    NonFinite { field: &'static str },
}

// =============================================================================
// STATUS
// =============================================================================

/// Workflow states the dashboard offers. Records keep status as free text so
/// values written by other tools still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Draft,
    InProgress,
    Completed,
}

impl ProjectStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

// =============================================================================
// TYPES
// =============================================================================

/// A design project with its scene decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignProject {
    /// Store identity. `None` until the project has been created remotely.
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    /// Owning designer's user id.
    pub designer_id: Option<String>,
    pub scene: SceneSnapshot,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Project as stored: flat fields, scene parts as JSON text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(rename = "$id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designer_id: Option<String>,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub camera: String,
    #[serde(default)]
    pub furniture: String,
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "$updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ProjectRecord {
    /// The writable fields only, with store-managed metadata stripped.
    #[must_use]
    pub fn fields(&self) -> Self {
        Self { id: None, created_at: None, updated_at: None, ..self.clone() }
    }
}

/// Caller-supplied project metadata for a save. Absent fields keep the
/// current project's values (or defaults for a new project).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub designer_id: Option<String>,
}

impl DesignProject {
    /// A project that has not been saved yet.
    #[must_use]
    pub fn draft(info: ProjectInfo, scene: SceneSnapshot) -> Self {
        Self {
            id: None,
            name: info.name.unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_owned()),
            description: info.description,
            status: info.status.unwrap_or_else(|| ProjectStatus::Draft.as_str().to_owned()),
            designer_id: info.designer_id,
            scene,
            created_at: None,
            updated_at: None,
        }
    }

    /// Overlay the fields present in `info`.
    pub fn merge_info(&mut self, info: ProjectInfo) {
        if let Some(name) = info.name {
            self.name = name;
        }
        if info.description.is_some() {
            self.description = info.description;
        }
        if let Some(status) = info.status {
            self.status = status;
        }
        if info.designer_id.is_some() {
            self.designer_id = info.designer_id;
        }
    }
}

// =============================================================================
// CONVERSION
// =============================================================================

/// Encode a project into its flat stored form.
///
/// # Errors
///
/// Returns [`SnapshotError::NonFinite`] if a scene part holds a number JSON
/// cannot represent (it would be written as `null` and never read back), or
/// [`SnapshotError::Encode`] if a part cannot be serialized.
pub fn stringify_project(project: &DesignProject) -> Result<ProjectRecord, SnapshotError> {
    if let Some(field) = project.scene.non_finite_part() {
        return Err(SnapshotError::NonFinite { field });
    }
    Ok(ProjectRecord {
        id: project.id.clone(),
        name: project.name.clone(),
        description: project.description.clone(),
        status: project.status.clone(),
        designer_id: project.designer_id.clone(),
        room: encode("room", &project.scene.room)?,
        camera: encode("camera", &project.scene.camera)?,
        furniture: encode("furniture", &project.scene.furniture)?,
        created_at: project.created_at.clone(),
        updated_at: project.updated_at.clone(),
    })
}

/// Decode a stored record. Blank scene fields decode to their defaults.
///
/// # Errors
///
/// Returns [`SnapshotError::Decode`] naming the first field whose JSON is
/// malformed or has the wrong shape.
pub fn parse_project(record: &ProjectRecord) -> Result<DesignProject, SnapshotError> {
    let scene = SceneSnapshot {
        room: decode("room", &record.room)?,
        camera: decode("camera", &record.camera)?,
        furniture: decode("furniture", &record.furniture)?,
    };
    Ok(DesignProject {
        id: record.id.clone(),
        name: record.name.clone(),
        description: record.description.clone(),
        status: record.status.clone(),
        designer_id: record.designer_id.clone(),
        scene,
        created_at: record.created_at.clone(),
        updated_at: record.updated_at.clone(),
    })
}

fn encode<T: Serialize>(field: &'static str, value: &T) -> Result<String, SnapshotError> {
    serde_json::to_string(value).map_err(|source| SnapshotError::Encode { field, source })
}

fn decode<T: DeserializeOwned + Default>(field: &'static str, text: &str) -> Result<T, SnapshotError> {
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(text).map_err(|source| SnapshotError::Decode { field, source })
}
