//! The domain module holds the core simulation model: vector math,
//! shape primitives, collision tests, the tank-drive rover rigid body,
//! arena zones and procedural obstacle placement.
//!
//! Everything here is pure world-unit geometry and dynamics with no
//! notion of rendering, input or networking; those collaborators drive
//! the model through [`crate::PhysicsWorld`].

mod arena;
mod basis;
mod collision;
mod placement;
mod rover;
mod shapes;

pub use arena::{ArenaLayout, Zone, ZoneKind};
pub use basis::{normalize_deg, Vector2};
pub use collision::{Collidable, Shape};
pub use placement::{scatter, Obstacle, ObstacleKind, PlacementError};
pub use rover::{Rover, RoverConfig};
pub use shapes::{Circle, OrientedRect, Rect};
