//! Scene state and project persistence for the furniture room designer.
//!
//! The designer lets a user place catalog furniture inside a rectangular room,
//! move, rotate and scale it, and save the result as a design project. This
//! crate owns the in-memory scene and its placement rules. Rendering, routing
//! and auth live elsewhere; the renderer is reached only through the optional
//! [`viewport::Viewport`] binding and storage only through
//! [`persistence::ProjectRepository`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | In-memory scene store and its mutation operations |
//! | [`designer`] | Store + repository orchestration (save, load, delete, new) |
//! | [`scene`] | Room, camera and furniture types, partial updates, presets |
//! | [`project`] | Persisted project shape and snapshot (de)serialization |
//! | [`persistence`] | Repository trait, in-memory and HTTP backends, config |
//! | [`catalog`] | Catalog product record consumed by the designer |
//! | [`viewport`] | Live camera binding read at capture time |
//! | [`units`] | Unit label to meters conversion |
//! | [`consts`] | Shared defaults (room size, jitter, minimum scale, etc.) |

pub mod catalog;
pub mod consts;
pub mod designer;
pub mod persistence;
pub mod project;
pub mod scene;
pub mod store;
pub mod units;
pub mod viewport;

pub use designer::{Activity, RoomDesigner};
pub use store::{Ignored, Outcome, SceneStore};
