//! Procedural obstacle placement by rejection sampling.
//!
//! Candidates are drawn uniformly over the placement region with a
//! randomized radius per kind, and discarded whenever they overlap an
//! already placed obstacle or a protected rectangle. Retries are
//! bounded so an over-constrained arena fails fast instead of spinning
//! forever; the caller reacts by re-scattering from scratch.

use log::warn;
use rand::Rng;
use thiserror::Error;

use super::basis::Vector2;
use super::collision::{Collidable, Shape};
use super::shapes::{Circle, Rect};

/// Obstacle categories with competition-scale radius ranges.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum ObstacleKind {
    Boulder,
    Crater,
}

impl ObstacleKind {
    /// Radius range in meters.
    pub fn radius_range(&self) -> (f64, f64) {
        match self {
            ObstacleKind::Boulder => (0.15, 0.20),
            ObstacleKind::Crater => (0.20, 0.25),
        }
    }
}

/// A static circular hazard. Boulders and craters never move once
/// placed; the set is replaced wholesale on every arena reset.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Obstacle {
    circle: Circle,
    kind: ObstacleKind,
}

impl Obstacle {
    pub const fn new(circle: Circle, kind: ObstacleKind) -> Self {
        Self { circle, kind }
    }

    pub fn circle(&self) -> Circle {
        self.circle
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }
}

impl Collidable for Obstacle {
    fn shape(&self) -> Shape {
        Shape::Circle(self.circle)
    }
}

#[derive(Error, Debug)]
pub enum PlacementError {
    #[error("no collision-free spot for {kind:?} after {attempts} attempts")]
    Exhausted { kind: ObstacleKind, attempts: u32 },
}

/// Scatter `count` obstacles of `kind` into `region`, appending to
/// `placed`. Candidates overlapping anything in `placed` or any
/// `protected` rectangle are rejected and redrawn, at most
/// `max_attempts` times per obstacle.
pub fn scatter<R: Rng>(
    rng: &mut R,
    kind: ObstacleKind,
    count: usize,
    region: Rect,
    protected: &[Rect],
    placed: &mut Vec<Obstacle>,
    max_attempts: u32,
) -> Result<(), PlacementError> {
    let (radius_min, radius_max) = kind.radius_range();
    for _ in 0..count {
        let mut attempts = 0;
        loop {
            attempts += 1;
            if attempts > max_attempts {
                warn!("placement of {kind:?} exhausted after {max_attempts} attempts");
                return Err(PlacementError::Exhausted {
                    kind,
                    attempts: max_attempts,
                });
            }
            let candidate = Circle::new(
                Vector2::new(
                    rng.random_range(region.x_min()..=region.x_max()),
                    rng.random_range(region.y_min()..=region.y_max()),
                ),
                rng.random_range(radius_min..=radius_max),
            );
            let blocked = placed.iter().any(|obstacle| candidate.collides(obstacle))
                || protected
                    .iter()
                    .any(|zone| candidate.collides(&zone.to_oriented()));
            if !blocked {
                placed.push(Obstacle::new(candidate, kind));
                break;
            }
        }
    }
    Ok(())
}
