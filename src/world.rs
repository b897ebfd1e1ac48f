//! The physics world: arena bounds, the obstacle field and the one
//! dynamic rover.
//!
//! `step` integrates the rover, clamps it back inside the walls with a
//! restitution bounce, and *reports* obstacle contact without resolving
//! the penetration; the external driver decides whether a contact ends
//! the attempt and calls `reset`. The world is single-threaded and
//! exclusively owns all mutable state; drivers wanting parallel
//! episodes create one world per worker.

use std::ops::RangeInclusive;

use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::domain::{
    scatter, ArenaLayout, Collidable, Obstacle, ObstacleKind, PlacementError, Rect, Rover,
    RoverConfig, Vector2, ZoneKind,
};

/// World construction and reset parameters.
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Arena extent in meters; the boundary spans `[0, width] x [0, height]`.
    pub width: f64,
    pub height: f64,
    pub rover: RoverConfig,
    pub layout: ArenaLayout,
    /// Obstacle counts drawn uniformly at each reset.
    pub boulders: RangeInclusive<usize>,
    pub craters: RangeInclusive<usize>,
    /// Sampling region for obstacle centers; defaults to the layout's
    /// obstacle zone, falling back to the full arena.
    pub placement_region: Option<Rect>,
    /// Zone kinds obstacles must keep clear of.
    pub protected_kinds: Vec<ZoneKind>,
    /// Zone kinds the rover physically collides with (arena fixtures).
    pub solid_kinds: Vec<ZoneKind>,
    /// Rejection-sampling bound per obstacle.
    pub max_placement_attempts: u32,
    /// Full re-scatter bound per reset before giving up.
    pub max_reset_attempts: u32,
    /// Fixed RNG seed for reproducible runs; `None` seeds from entropy.
    /// The stream is never re-seeded by `reset`.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 9.88,
            height: 5.0,
            rover: RoverConfig::default(),
            layout: ArenaLayout::competition(),
            boulders: 6..=12,
            craters: 3..=5,
            placement_region: None,
            protected_kinds: vec![ZoneKind::Starting, ZoneKind::Construction, ZoneKind::Column],
            solid_kinds: vec![ZoneKind::Column],
            max_placement_attempts: 200,
            max_reset_attempts: 8,
            seed: None,
        }
    }
}

/// What happened during one `step`. Collisions are ordinary values,
/// never errors.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StepOutcome {
    /// The rover overlaps an obstacle or a solid fixture. Penetration
    /// is left as-is; the driver is expected to `reset`.
    pub collision: bool,
    /// The rover was pushed back inside the arena boundary.
    pub wall_contact: bool,
}

#[derive(Error, Debug)]
pub enum WorldError {
    #[error("arena could not be populated after {attempts} re-scatters")]
    ArenaExhausted {
        attempts: u32,
        #[source]
        source: PlacementError,
    },
    #[error("invalid world configuration: {0}")]
    InvalidConfig(String),
}

pub struct PhysicsWorld {
    config: WorldConfig,
    rover: Rover,
    obstacles: Vec<Obstacle>,
    rng: ChaCha8Rng,
    last_outcome: StepOutcome,
}

impl PhysicsWorld {
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        if config.width <= 0.0 || config.height <= 0.0 {
            return Err(WorldError::InvalidConfig(format!(
                "arena must have positive extent, got {} x {}",
                config.width, config.height
            )));
        }
        if config.max_reset_attempts == 0 {
            return Err(WorldError::InvalidConfig(
                "max_reset_attempts must be at least 1".into(),
            ));
        }
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };
        let mut world = Self {
            rover: Rover::new(&config.rover),
            obstacles: Vec::new(),
            rng,
            last_outcome: StepOutcome::default(),
            config,
        };
        world.reset()?;
        info!(
            "world created: {:.2} x {:.2} m, {} obstacles",
            world.config.width,
            world.config.height,
            world.obstacles.len()
        );
        Ok(world)
    }

    pub fn rover(&self) -> &Rover {
        &self.rover
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn layout(&self) -> &ArenaLayout {
        &self.config.layout
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, self.config.width, 0.0, self.config.height)
    }

    /// Zone under the rover's center.
    pub fn rover_zone(&self) -> ZoneKind {
        self.config.layout.classify(self.rover.position())
    }

    pub fn classify(&self, point: Vector2) -> ZoneKind {
        self.config.layout.classify(point)
    }

    /// Outcome of the most recent `step` (all-clear after a reset).
    pub fn last_outcome(&self) -> StepOutcome {
        self.last_outcome
    }

    /// Feed one control frame: signed torques for the left and right
    /// drive sides, conventionally within [-10, 10].
    pub fn apply_control(&mut self, left_torque: f64, right_torque: f64) {
        self.rover.apply_torque_left(left_torque);
        self.rover.apply_torque_right(right_torque);
    }

    /// Push the rover with a polar force (magnitude, direction in
    /// degrees from +x).
    pub fn apply_force(&mut self, magnitude: f64, direction_deg: f64) {
        self.rover.apply_force(magnitude, direction_deg);
    }

    /// Insert an extra static obstacle, e.g. for scripted scenarios.
    /// Cleared like all others on the next reset.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Advance the simulation by one fixed step.
    pub fn step(&mut self, dt: f64) -> StepOutcome {
        self.rover.integrate(dt);
        let wall_contact = self.resolve_walls();
        let collision = self.detect_collisions();
        let outcome = StepOutcome {
            collision,
            wall_contact,
        };
        self.last_outcome = outcome;
        outcome
    }

    /// Clamp the rover back inside the boundary and reflect the
    /// touched velocity components, scaled by restitution.
    fn resolve_walls(&mut self) -> bool {
        let bounds = self.bounds();
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for corner in self.rover.rect().corners() {
            min_x = min_x.min(corner.x());
            max_x = max_x.max(corner.x());
            min_y = min_y.min(corner.y());
            max_y = max_y.max(corner.y());
        }

        let mut dx = 0.0;
        let mut dy = 0.0;
        if min_x < bounds.x_min() {
            dx = bounds.x_min() - min_x;
        } else if max_x > bounds.x_max() {
            dx = bounds.x_max() - max_x;
        }
        if min_y < bounds.y_min() {
            dy = bounds.y_min() - min_y;
        } else if max_y > bounds.y_max() {
            dy = bounds.y_max() - max_y;
        }
        if dx == 0.0 && dy == 0.0 {
            return false;
        }

        let restitution = self.rover.restitution();
        let velocity = self.rover.velocity();
        let vx = if dx != 0.0 {
            -velocity.x() * restitution
        } else {
            velocity.x()
        };
        let vy = if dy != 0.0 {
            -velocity.y() * restitution
        } else {
            velocity.y()
        };
        self.rover.translate(Vector2::new(dx, dy));
        self.rover.set_velocity(Vector2::new(vx, vy));
        debug!("wall contact, clamped by ({dx:.3}, {dy:.3})");
        true
    }

    fn detect_collisions(&self) -> bool {
        let hit_obstacle = self
            .obstacles
            .iter()
            .any(|obstacle| self.rover.collides(obstacle));
        let hit_fixture = self.config.solid_kinds.iter().any(|kind| {
            self.config
                .layout
                .zone_of(*kind)
                .is_some_and(|zone| self.rover.collides(&zone.bounds().to_oriented()))
        });
        if hit_obstacle || hit_fixture {
            debug!(
                "rover collision at ({:.2}, {:.2})",
                self.rover.position().x(),
                self.rover.position().y()
            );
        }
        hit_obstacle || hit_fixture
    }

    /// Clear the obstacle field, scatter a fresh one and restore the
    /// rover's start pose. The RNG stream continues across resets, so
    /// every reset draws a different arena. When a scatter pass cannot
    /// fit all obstacles it is discarded and retried wholesale, up to
    /// the configured bound.
    pub fn reset(&mut self) -> Result<(), WorldError> {
        let region = self.config.placement_region.unwrap_or_else(|| {
            self.config
                .layout
                .zone_of(ZoneKind::Obstacle)
                .map(|zone| zone.bounds())
                .unwrap_or_else(|| self.bounds())
        });
        let protected: Vec<Rect> = self
            .config
            .protected_kinds
            .iter()
            .filter_map(|kind| self.config.layout.zone_of(*kind))
            .map(|zone| zone.bounds())
            .collect();

        let mut last_error = None;
        for attempt in 1..=self.config.max_reset_attempts {
            let boulders = self.rng.random_range(self.config.boulders.clone());
            let craters = self.rng.random_range(self.config.craters.clone());
            let mut obstacles = Vec::with_capacity(boulders + craters);
            let outcome = scatter(
                &mut self.rng,
                ObstacleKind::Boulder,
                boulders,
                region,
                &protected,
                &mut obstacles,
                self.config.max_placement_attempts,
            )
            .and_then(|()| {
                scatter(
                    &mut self.rng,
                    ObstacleKind::Crater,
                    craters,
                    region,
                    &protected,
                    &mut obstacles,
                    self.config.max_placement_attempts,
                )
            });
            match outcome {
                Ok(()) => {
                    self.obstacles = obstacles;
                    self.rover = Rover::new(&self.config.rover);
                    self.last_outcome = StepOutcome::default();
                    info!("arena reset: {boulders} boulders, {craters} craters");
                    return Ok(());
                }
                Err(error) => {
                    warn!("discarding arena scatter (attempt {attempt}): {error}");
                    last_error = Some(error);
                }
            }
        }

        match last_error {
            Some(source) => Err(WorldError::ArenaExhausted {
                attempts: self.config.max_reset_attempts,
                source,
            }),
            // Unreachable with the construction-time validation, kept
            // total for direct `reset` callers.
            None => Err(WorldError::InvalidConfig(
                "max_reset_attempts must be at least 1".into(),
            )),
        }
    }
}
