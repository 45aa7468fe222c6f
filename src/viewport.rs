//! Binding to the live 3D viewport.
//!
//! The renderer owns the real camera and orbit controls. The store never
//! holds on to them; a host passes a [`Viewport`] into
//! [`SceneStore::capture_camera`](crate::store::SceneStore::capture_camera)
//! when it wants the current pose recorded, typically right before a save.

use crate::scene::Vec3;

/// Read-only view of the renderer's camera and orbit controls.
pub trait Viewport {
    /// World-space camera position.
    fn camera_position(&self) -> Vec3;

    /// Vertical field of view in degrees.
    fn field_of_view(&self) -> f64;

    /// Point the orbit controls revolve around. `None` when no controls are
    /// attached, in which case the previous target is kept.
    fn orbit_target(&self) -> Option<Vec3>;
}

/// A viewport whose values were copied out of the renderer by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticViewport {
    pub position: Vec3,
    pub fov: f64,
    pub target: Option<Vec3>,
}

impl Viewport for StaticViewport {
    fn camera_position(&self) -> Vec3 {
        self.position
    }

    fn field_of_view(&self) -> f64 {
        self.fov
    }

    fn orbit_target(&self) -> Option<Vec3> {
        self.target
    }
}
