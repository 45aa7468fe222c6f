//! Scene store: the authoritative in-memory state of one design session.
//!
//! DESIGN
//! ======
//! `SceneStore` owns the room, the last captured camera pose and the ordered
//! furniture list. Furniture is addressed by list index, the same index the
//! host uses for selection. Every mutation is synchronous and total: bad input
//! (an index past the end, a product without a model) is logged and reported
//! as [`Outcome::Ignored`] rather than raised.
//!
//! The one invariant the store enforces is the footprint rule: after
//! [`SceneStore::update_furniture_position`] an item's width x depth rectangle,
//! centered on its position, lies inside the room floor. Changing the room
//! (dimensions or preset) does not re-clamp existing items; callers opt into
//! that with [`SceneStore::reconcile_bounds`].

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use rand::Rng;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::Product;
use crate::consts::{MIN_SCALE, PLACEMENT_JITTER};
use crate::scene::{
    Axis, CameraSettings, FurnitureItem, PartialCameraSettings, PartialRoomSettings, RoomPreset, RoomSettings,
    SceneSnapshot, Vec3,
};
use crate::viewport::Viewport;

// =============================================================================
// OUTCOME
// =============================================================================

/// Why a mutation left the scene untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// The product has no 3D model to place.
    MissingModel,
    /// No furniture item at `index`; the list holds `len` items.
    IndexOutOfRange { index: usize, len: usize },
    /// No catalog product with the requested id.
    UnknownProduct,
}

/// Result of a store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(Ignored),
}

impl Outcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct SceneStore {
    room: RoomSettings,
    camera: CameraSettings,
    furniture: Vec<FurnitureItem>,
    selected: Option<usize>,
    current_product: Option<Product>,
    dragging: bool,
}

impl SceneStore {
    /// A store holding the default room and camera and no furniture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Room / camera ---

    /// Merge `partial` into the room. Existing furniture is not re-clamped.
    pub fn update_room_dimensions(&mut self, partial: &PartialRoomSettings) {
        self.room.apply_partial(partial);
    }

    /// Replace the room with a preset. Existing furniture is not re-clamped.
    pub fn apply_room_preset(&mut self, preset: &RoomPreset) {
        info!(preset = %preset.name, "applying room preset");
        self.room = preset.room.clone();
    }

    pub fn update_camera(&mut self, partial: &PartialCameraSettings) {
        self.camera.apply_partial(partial);
    }

    /// Record the live viewport pose and return it. Without a viewport the
    /// last known settings are returned unchanged.
    pub fn capture_camera(&mut self, viewport: Option<&dyn Viewport>) -> CameraSettings {
        self.camera = self.viewport_camera(viewport);
        self.camera
    }

    /// The pose [`Self::capture_camera`] would record, without recording it.
    #[must_use]
    pub fn viewport_camera(&self, viewport: Option<&dyn Viewport>) -> CameraSettings {
        let Some(view) = viewport else {
            debug!("no viewport attached; keeping last camera settings");
            return self.camera;
        };
        let mut camera = self.camera;
        camera.position = view.camera_position();
        camera.view_angle = view.field_of_view();
        if let Some(target) = view.orbit_target() {
            camera.target = target;
        }
        camera
    }

    // --- Furniture ---

    /// Place a new instance of `product` near the room center and select it.
    pub fn add_furniture(&mut self, product: &Product) -> Outcome {
        let Some(model) = product.model() else {
            debug!(product_id = %product.id, "product has no 3D model; not added");
            return Outcome::Ignored(Ignored::MissingModel);
        };

        let mut rng = rand::rng();
        let position = [
            self.room.width / 2.0 + rng.random_range(-PLACEMENT_JITTER..PLACEMENT_JITTER),
            0.0,
            self.room.length / 2.0 + rng.random_range(-PLACEMENT_JITTER..PLACEMENT_JITTER),
        ];

        let item = FurnitureItem {
            id: product.id.clone(),
            instance_id: Uuid::new_v4().to_string(),
            name: product.name.clone(),
            model: model.to_owned(),
            texture_url: product.default_texture().map(str::to_owned),
            position,
            rotation: [0.0; 3],
            scale: 1.0,
            dimensions: product.dimensions(),
            dimension_sku: Some(product.dimension_sku().to_owned()),
        };

        debug!(product_id = %item.id, instance_id = %item.instance_id, "furniture added");
        self.furniture.push(item);
        self.selected = Some(self.furniture.len() - 1);
        self.current_product = Some(product.clone());
        Outcome::Applied
    }

    /// Move an item, clamping its footprint into the room floor. The vertical
    /// component is taken as given.
    pub fn update_furniture_position(&mut self, index: usize, position: Vec3) -> Outcome {
        let len = self.furniture.len();
        let room = &self.room;
        let Some(item) = self.furniture.get_mut(index) else {
            return out_of_range(index, len);
        };
        item.position = clamp_to_room(item, position, room);
        Outcome::Applied
    }

    pub fn update_furniture_texture(&mut self, index: usize, texture_url: Option<String>) -> Outcome {
        let len = self.furniture.len();
        let Some(item) = self.furniture.get_mut(index) else {
            return out_of_range(index, len);
        };
        item.texture_url = texture_url;
        Outcome::Applied
    }

    /// Add `degrees` to the item's rotation about `axis`.
    pub fn rotate_furniture(&mut self, index: usize, axis: Axis, degrees: f64) -> Outcome {
        let len = self.furniture.len();
        let Some(item) = self.furniture.get_mut(index) else {
            return out_of_range(index, len);
        };
        item.rotation[axis.index()] += degrees.to_radians();
        Outcome::Applied
    }

    /// Multiply the item's scale by `factor`, never going below [`MIN_SCALE`].
    pub fn adjust_scale(&mut self, index: usize, factor: f64) -> Outcome {
        let len = self.furniture.len();
        let Some(item) = self.furniture.get_mut(index) else {
            return out_of_range(index, len);
        };
        item.scale = (item.scale * factor).max(MIN_SCALE);
        Outcome::Applied
    }

    /// Remove the item at `index`. Selection is cleared whether or not the
    /// removed item was the selected one.
    pub fn remove_furniture(&mut self, index: usize) -> Outcome {
        self.selected = None;
        if index >= self.furniture.len() {
            return out_of_range(index, self.furniture.len());
        }
        let removed = self.furniture.remove(index);
        debug!(index, instance_id = %removed.instance_id, "furniture removed");
        Outcome::Applied
    }

    /// Select the item at `index`, or clear the selection with `None`.
    pub fn select_furniture(&mut self, index: Option<usize>) -> Outcome {
        match index {
            Some(i) if i >= self.furniture.len() => out_of_range(i, self.furniture.len()),
            _ => {
                self.selected = index;
                Outcome::Applied
            }
        }
    }

    /// Flip the dragging flag and return its new value.
    pub fn toggle_dragging(&mut self) -> bool {
        self.dragging = !self.dragging;
        self.dragging
    }

    /// Re-clamp every item against the current room. Returns how many moved.
    pub fn reconcile_bounds(&mut self) -> usize {
        let room = &self.room;
        let mut moved = 0;
        for item in &mut self.furniture {
            let clamped = clamp_to_room(item, item.position, room);
            if clamped != item.position {
                item.position = clamped;
                moved += 1;
            }
        }
        if moved > 0 {
            info!(moved, "furniture re-clamped to room bounds");
        }
        moved
    }

    // --- Whole scene ---

    /// Back to the default room and camera with nothing placed or selected.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Copy of the persistable part of the scene.
    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot { room: self.room.clone(), camera: self.camera, furniture: self.furniture.clone() }
    }

    /// Swap in a whole scene at once, as a project load does. Selection and
    /// dragging are cleared since indices no longer refer to the same items.
    pub fn replace_scene(&mut self, scene: SceneSnapshot) {
        self.room = scene.room;
        self.camera = scene.camera;
        self.furniture = scene.furniture;
        self.selected = None;
        self.dragging = false;
    }

    // --- Queries ---

    #[must_use]
    pub fn room(&self) -> &RoomSettings {
        &self.room
    }

    #[must_use]
    pub fn camera(&self) -> CameraSettings {
        self.camera
    }

    #[must_use]
    pub fn furniture(&self) -> &[FurnitureItem] {
        &self.furniture
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&FurnitureItem> {
        self.selected.and_then(|i| self.furniture.get(i))
    }

    /// The product most recently added to the scene.
    #[must_use]
    pub fn current_product(&self) -> Option<&Product> {
        self.current_product.as_ref()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

fn out_of_range(index: usize, len: usize) -> Outcome {
    debug!(index, len, "furniture index out of range; ignored");
    Outcome::Ignored(Ignored::IndexOutOfRange { index, len })
}

/// Clamp the horizontal part of `position` so `item`'s footprint stays on the
/// floor of `room`.
fn clamp_to_room(item: &FurnitureItem, position: Vec3, room: &RoomSettings) -> Vec3 {
    let (half_width, half_depth) = item.half_footprint();
    [
        clamp_axis(position[0], half_width, room.width),
        position[1],
        clamp_axis(position[2], half_depth, room.length),
    ]
}

/// Clamp `value` into `[half, extent - half]`. When the footprint is wider
/// than the room the range is empty and the item is centered instead.
fn clamp_axis(value: f64, half: f64, extent: f64) -> f64 {
    let (lo, hi) = (half, extent - half);
    if lo <= hi { value.clamp(lo, hi) } else { extent / 2.0 }
}
