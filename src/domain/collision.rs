//! Collision detection based on basic shapes.
//!
//! Queries are symmetric dispatchers: `a.collides(b)` equals
//! `b.collides(a)` for every shape pair. Results are booleans only; no
//! contact points or translation vectors are computed, since the world
//! reports collisions instead of resolving them.

use super::basis::Vector2;
use super::shapes::{Circle, OrientedRect};

/// Implemented by everything that occupies space in the arena.
pub trait Collidable {
    fn collides(&self, other: &dyn Collidable) -> bool {
        self.shape().intersects(&other.shape())
    }

    fn shape(&self) -> Shape;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Rect(OrientedRect),
    Circle(Circle),
}

impl Shape {
    fn intersects(&self, other: &Shape) -> bool {
        match (self, other) {
            (Shape::Rect(a), Shape::Rect(b)) => rects_overlap(a, b),
            (Shape::Rect(rect), Shape::Circle(circle))
            | (Shape::Circle(circle), Shape::Rect(rect)) => rect_circle_overlap(rect, circle),
            (Shape::Circle(a), Shape::Circle(b)) => {
                a.center().distance(b.center()) <= a.radius() + b.radius()
            }
        }
    }
}

impl Collidable for OrientedRect {
    fn shape(&self) -> Shape {
        Shape::Rect(*self)
    }
}

impl Collidable for Circle {
    fn shape(&self) -> Shape {
        Shape::Circle(*self)
    }
}

/// Separating-axis test over the edge normals of both rectangles.
/// Degenerate (zero-length) axes are skipped rather than rejected.
fn rects_overlap(a: &OrientedRect, b: &OrientedRect) -> bool {
    let corners_a = a.corners();
    let corners_b = b.corners();
    for axis in edge_normals(&corners_a)
        .into_iter()
        .chain(edge_normals(&corners_b))
    {
        let length = axis.magnitude();
        if length == 0.0 {
            continue;
        }
        let axis = axis * (1.0 / length);
        let (min_a, max_a) = project(&corners_a, axis);
        let (min_b, max_b) = project(&corners_b, axis);
        if max_a < min_b || max_b < min_a {
            return false;
        }
    }
    true
}

fn edge_normals(corners: &[Vector2; 4]) -> [Vector2; 4] {
    [0, 1, 2, 3].map(|i| {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        Vector2::new(-(b.y() - a.y()), b.x() - a.x())
    })
}

fn project(corners: &[Vector2; 4], axis: Vector2) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for corner in corners {
        let dot = corner.dot(axis);
        min = min.min(dot);
        max = max.max(dot);
    }
    (min, max)
}

/// A circle overlaps a rectangle when its center lies inside, or when
/// any edge passes within one radius of the center.
fn rect_circle_overlap(rect: &OrientedRect, circle: &Circle) -> bool {
    if rect.contains(circle.center()) {
        return true;
    }
    let corners = rect.corners();
    (0..4).any(|i| {
        point_segment_distance(circle.center(), corners[i], corners[(i + 1) % 4])
            <= circle.radius()
    })
}

/// Minimum distance from a point to a segment, via the parametric
/// projection clamped to [0, 1].
fn point_segment_distance(point: Vector2, a: Vector2, b: Vector2) -> f64 {
    let segment = b - a;
    let t = ((point - a).dot(segment) / (segment.dot(segment) + 1e-12)).clamp(0.0, 1.0);
    point.distance(a + segment * t)
}
