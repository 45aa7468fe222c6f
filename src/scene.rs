//! Scene model: the room, the camera and the furniture placed inside it.
//!
//! These types are what the store mutates and what a project snapshot
//! persists. Field names serialize in camelCase so snapshots stay readable by
//! the storefront that shares the same documents.
//!
//! Coordinates are meters in room space. `x` runs along the room width, `z`
//! along the room length and `y` is up. Rotations are Euler angles in radians.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CAMERA_POSITION, DEFAULT_CAMERA_TARGET, DEFAULT_FLOOR_COLOR, DEFAULT_ROOM_HEIGHT, DEFAULT_ROOM_LENGTH,
    DEFAULT_ROOM_WIDTH, DEFAULT_VIEW_ANGLE, DEFAULT_WALL_COLOR,
};
use crate::units::conversion_factor;

/// A point or vector in room space, `[x, y, z]`.
pub type Vec3 = [f64; 3];

// =============================================================================
// ROOM
// =============================================================================

/// The rectangular volume furniture is placed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSettings {
    pub width: f64,
    pub length: f64,
    pub height: f64,
    pub wall_color: String,
    pub floor_color: String,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_ROOM_WIDTH,
            length: DEFAULT_ROOM_LENGTH,
            height: DEFAULT_ROOM_HEIGHT,
            wall_color: DEFAULT_WALL_COLOR.to_owned(),
            floor_color: DEFAULT_FLOOR_COLOR.to_owned(),
        }
    }
}

/// Sparse update for [`RoomSettings`]. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialRoomSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_color: Option<String>,
}

impl RoomSettings {
    /// Merge the present fields of `partial` into `self`. Values are not
    /// validated.
    pub fn apply_partial(&mut self, partial: &PartialRoomSettings) {
        if let Some(w) = partial.width {
            self.width = w;
        }
        if let Some(l) = partial.length {
            self.length = l;
        }
        if let Some(h) = partial.height {
            self.height = h;
        }
        if let Some(ref c) = partial.wall_color {
            self.wall_color.clone_from(c);
        }
        if let Some(ref c) = partial.floor_color {
            self.floor_color.clone_from(c);
        }
    }
}

// =============================================================================
// CAMERA
// =============================================================================

/// Last captured camera pose. Mirrors the live viewport, it does not drive it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSettings {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub view_angle: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self { position: DEFAULT_CAMERA_POSITION, target: DEFAULT_CAMERA_TARGET, view_angle: DEFAULT_VIEW_ANGLE }
    }
}

/// Sparse update for [`CameraSettings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialCameraSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_angle: Option<f64>,
}

impl From<CameraSettings> for PartialCameraSettings {
    fn from(camera: CameraSettings) -> Self {
        Self { position: Some(camera.position), target: Some(camera.target), view_angle: Some(camera.view_angle) }
    }
}

impl CameraSettings {
    pub fn apply_partial(&mut self, partial: &PartialCameraSettings) {
        if let Some(p) = partial.position {
            self.position = p;
        }
        if let Some(t) = partial.target {
            self.target = t;
        }
        if let Some(a) = partial.view_angle {
            self.view_angle = a;
        }
    }
}

// =============================================================================
// FURNITURE
// =============================================================================

/// Product dimensions in the product's own unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index into a [`Vec3`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// One placed instance of a catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureItem {
    /// Source product id. Shared by every placement of the same product.
    pub id: String,
    /// Unique per placement.
    pub instance_id: String,
    pub name: String,
    /// Reference to the 3D asset.
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_url: Option<String>,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f64,
    pub dimensions: Dimensions,
    /// Unit label for `dimensions` (`m`, `cm`, `in`, `ft`).
    #[serde(default)]
    pub dimension_sku: Option<String>,
}

impl FurnitureItem {
    /// Half the width and half the depth of the footprint, in meters.
    #[must_use]
    pub fn half_footprint(&self) -> (f64, f64) {
        let factor = conversion_factor(self.dimension_sku.as_deref());
        (self.dimensions.width * factor / 2.0, self.dimensions.depth * factor / 2.0)
    }

    fn is_finite(&self) -> bool {
        let dims = [self.dimensions.width, self.dimensions.height, self.dimensions.depth, self.scale];
        all_finite(&self.position) && all_finite(&self.rotation) && all_finite(&dims)
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// The full editable scene, as saved into and restored from a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub room: RoomSettings,
    pub camera: CameraSettings,
    pub furniture: Vec<FurnitureItem>,
}

impl SceneSnapshot {
    /// Name of the first part (`room`, `camera` or `furniture`) holding a NaN
    /// or infinite number. JSON has no spelling for those.
    #[must_use]
    pub fn non_finite_part(&self) -> Option<&'static str> {
        let room = [self.room.width, self.room.length, self.room.height];
        let camera = &self.camera;
        if !all_finite(&room) {
            Some("room")
        } else if !all_finite(&camera.position) || !all_finite(&camera.target) || !camera.view_angle.is_finite() {
            Some("camera")
        } else if !self.furniture.iter().all(FurnitureItem::is_finite) {
            Some("furniture")
        } else {
            None
        }
    }
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

// =============================================================================
// PRESETS
// =============================================================================

/// A named room shortcut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPreset {
    pub name: String,
    pub room: RoomSettings,
}

impl RoomPreset {
    fn new(name: &str, width: f64, length: f64, height: f64, wall: &str, floor: &str) -> Self {
        Self {
            name: name.to_owned(),
            room: RoomSettings {
                width,
                length,
                height,
                wall_color: wall.to_owned(),
                floor_color: floor.to_owned(),
            },
        }
    }

    /// The presets offered by the designer, smallest first.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::new("Home Office", 3.0, 3.5, 2.7, "#eef1f4", "#b08d6e"),
            Self::new("Small Bedroom", 3.0, 4.0, 2.7, "#f3ece4", "#c8a27a"),
            Self::new("Dining Room", 4.0, 4.5, 2.8, "#faf6f0", "#8b6a4f"),
            Self::new("Master Bedroom", 4.5, 5.0, 2.8, "#ece8f2", "#a47c5b"),
            Self::new("Living Room", 5.0, 6.0, 2.8, "#f5f5f5", "#d2b48c"),
            Self::new("Studio Apartment", 6.0, 8.0, 3.0, "#ffffff", "#9e9e9e"),
        ]
    }

    /// Look up a built-in preset by name, ignoring case.
    #[must_use]
    pub fn find(name: &str) -> Option<Self> {
        Self::builtin().into_iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }
}
