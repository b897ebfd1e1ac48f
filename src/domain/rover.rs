//! Tank-drive rover rigid body.
//!
//! The rover carries two independent angular-velocity accumulators, one
//! per drive side. Thrust on one side pivots the body about the
//! opposite edge midpoint, so equal and opposite torques spin the rover
//! in place while equal same-sign torques drive it straight. Headings
//! are in degrees, counter-clockwise positive, with 0 facing the
//! arena's +y direction; `heading_deg` folds the accumulated angle into
//! `(-180, 180]`.

use super::basis::{normalize_deg, Vector2};
use super::collision::{Collidable, Shape};
use super::shapes::OrientedRect;

/// Rover physical parameters. Dimensions and mass follow the
/// competition robot; the start pose is restored on every arena reset.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct RoverConfig {
    /// Body width (left-right) in meters.
    pub width: f64,
    /// Body length (rear-front) in meters.
    pub height: f64,
    pub mass: f64,
    /// Dimensionless per-step decay of the angular accumulators. Not
    /// scaled by dt: two worlds stepped at different rates brake
    /// differently, matching the reference dynamics trained models
    /// were fitted against.
    pub drag: f64,
    /// Velocity reflection factor on wall contact.
    pub restitution: f64,
    /// Per-axis speed clamp applied by force application, m/s.
    pub max_axis_speed: f64,
    pub start_position: Vector2,
    pub start_heading_deg: f64,
}

impl Default for RoverConfig {
    fn default() -> Self {
        Self {
            width: 0.75,
            height: 1.5,
            mass: 80.0,
            drag: 0.2,
            restitution: 0.3,
            max_axis_speed: 20.0,
            start_position: Vector2::new(1.0, 4.0),
            start_heading_deg: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Rover {
    shape: OrientedRect,
    velocity: Vector2,
    omega_left: f64,
    omega_right: f64,
    mass: f64,
    i_edge: f64,
    drag: f64,
    restitution: f64,
    max_axis_speed: f64,
}

impl Rover {
    pub fn new(config: &RoverConfig) -> Self {
        let i_cm = config.mass * (config.width.powi(2) + config.height.powi(2)) / 12.0;
        // Parallel-axis theorem, shifted to an edge midpoint.
        let i_edge = i_cm + config.mass * (config.width / 2.0).powi(2);
        Self {
            shape: OrientedRect::new(
                config.start_position,
                config.width,
                config.height,
                config.start_heading_deg,
            ),
            velocity: Vector2::ZERO,
            omega_left: 0.0,
            omega_right: 0.0,
            mass: config.mass,
            i_edge,
            drag: config.drag,
            restitution: config.restitution,
            max_axis_speed: config.max_axis_speed,
        }
    }

    pub fn rect(&self) -> OrientedRect {
        self.shape
    }

    pub fn position(&self) -> Vector2 {
        self.shape.center()
    }

    /// Heading in degrees, folded into `(-180, 180]`.
    pub fn heading_deg(&self) -> f64 {
        normalize_deg(self.shape.angle_deg())
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    /// Left-side angular accumulator, degrees per step.
    pub fn omega_left(&self) -> f64 {
        self.omega_left
    }

    /// Right-side angular accumulator, degrees per step.
    pub fn omega_right(&self) -> f64 {
        self.omega_right
    }

    pub fn moment_of_inertia_edge(&self) -> f64 {
        self.i_edge
    }

    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    pub fn apply_torque_left(&mut self, torque: f64) {
        self.omega_left += torque / self.i_edge;
    }

    pub fn apply_torque_right(&mut self, torque: f64) {
        self.omega_right += torque / self.i_edge;
    }

    /// Polar force application: accelerate by `magnitude / mass` along
    /// `direction_deg` (from +x), clamping each velocity axis to the
    /// configured top speed.
    pub fn apply_force(&mut self, magnitude: f64, direction_deg: f64) {
        let (sin, cos) = direction_deg.to_radians().sin_cos();
        let max = self.max_axis_speed;
        let clamp = |v: f64| {
            let ratio = (v / max).abs();
            if ratio > 1.0 {
                v / ratio
            } else {
                v
            }
        };
        self.velocity = Vector2::new(
            clamp(self.velocity.x() + magnitude * cos / self.mass),
            clamp(self.velocity.y() + magnitude * sin / self.mass),
        );
    }

    /// One fixed-rate integration step.
    ///
    /// Drag decays both angular accumulators first (per step, never
    /// dt-scaled). The right accumulator then pivots the body about the
    /// left edge midpoint and the left accumulator about the right edge
    /// midpoint; the second rotation uses the pivot already moved by
    /// the first. Finally the center translates by `velocity * dt`.
    pub fn integrate(&mut self, dt: f64) {
        self.omega_left *= 1.0 - self.drag;
        self.omega_right *= 1.0 - self.drag;

        let left_pivot = self.shape.left_edge_midpoint();
        self.shape.rotate_about(left_pivot, self.omega_right);
        let right_pivot = self.shape.right_edge_midpoint();
        self.shape.rotate_about(right_pivot, -self.omega_left);

        self.shape.translate(self.velocity * dt);
    }

    pub(crate) fn translate(&mut self, offset: Vector2) {
        self.shape.translate(offset);
    }

    pub(crate) fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }
}

impl Collidable for Rover {
    fn shape(&self) -> Shape {
        Shape::Rect(self.shape)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    use super::*;

    fn cfg() -> RoverConfig {
        RoverConfig::default()
    }

    fn drive(rover: &mut Rover, left: f64, right: f64, steps: usize) {
        for _ in 0..steps {
            rover.apply_torque_left(left);
            rover.apply_torque_right(right);
            rover.integrate(0.02);
        }
    }

    #[test]
    fn test_moment_of_inertia_edge() {
        // 80 kg, 0.75 x 1.5 m: I_cm = 18.75, edge shift adds 11.25.
        let rover = Rover::new(&cfg());
        assert_abs_diff_eq!(rover.moment_of_inertia_edge(), 30.0);
    }

    #[test]
    fn test_torque_accumulates() {
        let mut rover = Rover::new(&cfg());
        rover.apply_torque_right(5.0);
        rover.apply_torque_right(5.0);
        rover.apply_torque_left(-3.0);
        assert_abs_diff_eq!(rover.omega_right(), 10.0 / 30.0);
        assert_abs_diff_eq!(rover.omega_left(), -0.1);
    }

    #[rstest]
    #[case::positive(5.0)]
    #[case::negative(-5.0)]
    fn test_drag_monotonically_decays_omega(#[case] torque: f64) {
        let mut rover = Rover::new(&cfg());
        rover.apply_torque_left(torque);
        rover.apply_torque_right(torque);
        let mut previous = rover.omega_left().abs();
        for _ in 0..40 {
            rover.integrate(0.02);
            let current = rover.omega_left().abs();
            assert!(current < previous);
            assert_eq!(
                rover.omega_left().signum(),
                torque.signum(),
                "decay must not overshoot through zero"
            );
            assert_abs_diff_eq!(rover.omega_left(), rover.omega_right());
            previous = current;
        }
        assert!(previous < 1e-4);
    }

    #[test]
    fn test_opposite_torques_spin_in_place() {
        let mut rover = Rover::new(&cfg());
        let start = rover.position();
        drive(&mut rover, -5.0, 5.0, 50);
        assert!(rover.heading_deg() > 10.0);
        assert_abs_diff_eq!(rover.position(), start, epsilon = 0.05);
    }

    #[test]
    fn test_equal_torques_drive_straight() {
        let mut rover = Rover::new(&cfg());
        let start = rover.position();
        drive(&mut rover, 5.0, 5.0, 50);
        assert_abs_diff_eq!(rover.heading_deg(), 0.0, epsilon = 1e-9);
        // Forward is +y at heading 0. The sequential pivots leave a
        // second-order lateral drift, nothing more.
        assert!(rover.position().y() > start.y() + 0.1);
        assert_abs_diff_eq!(rover.position().x(), start.x(), epsilon = 0.01);
    }

    #[test]
    fn test_heading_pinned_after_fifty_steps() {
        // Accumulator recurrence: omega = (omega + t/I) * (1 - drag),
        // heading advances by omega_right - omega_left each step.
        let mut expected = 0.0;
        let mut omega = 0.0;
        for _ in 0..50 {
            omega = (omega + 5.0 / 30.0) * 0.8;
            expected += 2.0 * omega;
        }

        let mut rover = Rover::new(&cfg());
        drive(&mut rover, -5.0, 5.0, 50);
        assert_abs_diff_eq!(rover.heading_deg(), expected, epsilon = 1e-9);
        assert_abs_diff_eq!(expected, 61.333, epsilon = 1e-3);
    }

    #[test]
    fn test_heading_normalized_at_query_time() {
        let config = RoverConfig {
            start_heading_deg: 270.0,
            ..cfg()
        };
        let rover = Rover::new(&config);
        assert_abs_diff_eq!(rover.rect().angle_deg(), 270.0);
        assert_abs_diff_eq!(rover.heading_deg(), -90.0);
    }

    #[test]
    fn test_apply_force() {
        let mut rover = Rover::new(&cfg());
        rover.apply_force(160.0, 0.0);
        assert_abs_diff_eq!(rover.velocity(), Vector2::new(2.0, 0.0), epsilon = 1e-12);
        rover.apply_force(160.0, 90.0);
        assert_abs_diff_eq!(rover.velocity(), Vector2::new(2.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_apply_force_clamps_axis_speed() {
        let mut rover = Rover::new(&cfg());
        rover.apply_force(1e6, 45.0);
        assert_abs_diff_eq!(rover.velocity().x(), 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rover.velocity().y(), 20.0, epsilon = 1e-9);
        rover.apply_force(1e6, 180.0 + 45.0);
        assert_abs_diff_eq!(rover.velocity().x(), -20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_velocity_translates_center() {
        let mut rover = Rover::new(&cfg());
        rover.set_velocity(Vector2::new(1.0, -0.5));
        let start = rover.position();
        rover.integrate(0.02);
        assert_abs_diff_eq!(
            rover.position(),
            start + Vector2::new(0.02, -0.01),
            epsilon = 1e-12
        );
        // Linear velocity is not friction-decayed; only angular terms are.
        assert_abs_diff_eq!(rover.velocity(), Vector2::new(1.0, -0.5));
    }
}
