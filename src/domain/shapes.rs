//! Shape primitives: circles, oriented rectangles and axis-aligned
//! bounds, all in world units (meters).

use super::basis::Vector2;

/// Circle in world coordinates. Static circles (boulders, craters)
/// never move after placement.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Circle {
    center: Vector2,
    radius: f64,
    is_static: bool,
}

impl Circle {
    pub const fn new(center: Vector2, radius: f64) -> Self {
        Self {
            center,
            radius,
            is_static: true,
        }
    }

    pub const fn dynamic(center: Vector2, radius: f64) -> Self {
        Self {
            center,
            radius,
            is_static: false,
        }
    }

    pub fn center(&self) -> Vector2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Containment is inclusive of the boundary.
    pub fn contains(&self, point: Vector2) -> bool {
        self.center.distance(point) <= self.radius
    }
}

/// Rectangle centered at a point, rotated by an arbitrary angle.
///
/// Corners are recomputed from the center, dimensions and angle on
/// every query; nothing is cached, so they can never go stale after a
/// mutation.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct OrientedRect {
    center: Vector2,
    width: f64,
    height: f64,
    angle_deg: f64,
}

impl OrientedRect {
    pub const fn new(center: Vector2, width: f64, height: f64, angle_deg: f64) -> Self {
        Self {
            center,
            width,
            height,
            angle_deg,
        }
    }

    pub fn center(&self) -> Vector2 {
        self.center
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Accumulated rotation in degrees, counter-clockwise positive.
    /// Not normalized; see [`normalize_deg`](super::normalize_deg).
    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    /// Corners in counter-clockwise order starting at the bottom-left
    /// (for a zero rotation).
    pub fn corners(&self) -> [Vector2; 4] {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        [
            Vector2::new(-half_w, -half_h),
            Vector2::new(half_w, -half_h),
            Vector2::new(half_w, half_h),
            Vector2::new(-half_w, half_h),
        ]
        .map(|corner| self.center + corner.rotate_deg(self.angle_deg))
    }

    /// Midpoint of the left edge (the -x edge at zero rotation).
    pub fn left_edge_midpoint(&self) -> Vector2 {
        self.center + Vector2::new(-self.width / 2.0, 0.0).rotate_deg(self.angle_deg)
    }

    /// Midpoint of the right edge (the +x edge at zero rotation).
    pub fn right_edge_midpoint(&self) -> Vector2 {
        self.center + Vector2::new(self.width / 2.0, 0.0).rotate_deg(self.angle_deg)
    }

    pub fn set_center(&mut self, center: Vector2) {
        self.center = center;
    }

    pub fn translate(&mut self, offset: Vector2) {
        self.center = self.center + offset;
    }

    /// Rotate the rectangle about an arbitrary pivot, counter-clockwise
    /// degrees. Rotation is additive on the stored angle.
    pub fn rotate_about(&mut self, pivot: Vector2, angle_deg: f64) {
        self.center = pivot + (self.center - pivot).rotate_deg(angle_deg);
        self.angle_deg += angle_deg;
    }

    /// Ray-casting point-in-polygon test over the four edges.
    pub fn contains(&self, point: Vector2) -> bool {
        let corners = self.corners();
        let mut inside = false;
        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            if (a.y() > point.y()) != (b.y() > point.y()) {
                let crossing_x =
                    (b.x() - a.x()) * (point.y() - a.y()) / (b.y() - a.y() + 1e-12) + a.x();
                if point.x() < crossing_x {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// Axis-aligned rectangle given by its extents, inclusive on all four
/// edges. Used for zone bounds and the arena boundary.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Rect {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Rect {
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(
            self.x_min + self.width() / 2.0,
            self.y_min + self.height() / 2.0,
        )
    }

    pub fn contains(&self, point: Vector2) -> bool {
        point.x() >= self.x_min
            && point.x() <= self.x_max
            && point.y() >= self.y_min
            && point.y() <= self.y_max
    }

    /// The same extent as an unrotated [`OrientedRect`], for collision
    /// queries against rotated shapes.
    pub fn to_oriented(&self) -> OrientedRect {
        OrientedRect::new(self.center(), self.width(), self.height(), 0.0)
    }
}
