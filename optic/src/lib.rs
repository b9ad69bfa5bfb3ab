//! A 2D ray casting engine: a point light source emits a fan of rays, which
//! bounce off movable line-segment mirrors and stop on circular targets.
//!
//! The engine is meant to be driven once per frame by an interactive caller,
//! which moves mirrors and advances targets, then asks for the (possibly
//! cached) set of traced [`RayPath`]s to draw.

pub use nalgebra;

use nalgebra::{Point2, Unit, Vector2};

mod cache;
mod circle;
mod config;
mod error;
mod level;
mod mirror;
mod rect;
mod scene;
mod segment;
mod source;
mod target;
mod tracer;

pub use cache::*;
pub use circle::*;
pub use config::*;
pub use error::*;
pub use level::*;
pub use mirror::*;
pub use rect::*;
pub use scene::*;
pub use segment::*;
pub use source::*;
pub use target::*;
pub use tracer::*;

pub type Float = f64;

pub type Point = Point2<Float>;
pub type Vector = Vector2<Float>;

/// A light ray, represented as a half-line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// The starting point of the half-line
    pub origin: Point,
    /// The direction of the half-line, not necessarily of unit length
    pub direction: Vector,
}

impl Ray {
    #[inline]
    #[must_use]
    pub fn new(origin: impl Into<Point>, direction: impl Into<Vector>) -> Self {
        Self {
            origin: origin.into(),
            direction: direction.into(),
        }
    }

    /// A ray of unit direction, `angle` radians counter-clockwise from the `x` axis
    #[inline]
    #[must_use]
    pub fn from_angle(origin: impl Into<Point>, angle: Float) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(origin, Vector::new(cos, sin))
    }

    /// Reflect the ray's direction with respect to a mirror of the given unit `normal`
    #[inline]
    pub fn reflect_dir(&mut self, normal: &Unit<Vector>) {
        self.direction = reflect(&self.direction, normal);
    }

    /// Move the ray's origin forward (or backward if `t < 0.0`) by `t`
    #[inline]
    pub fn advance(&mut self, t: Float) {
        self.origin = self.at(t);
    }

    /// Get the point at parameter `t` (can be negative) along the ray
    #[inline]
    #[must_use]
    pub fn at(&self, t: Float) -> Point {
        self.origin + self.direction * t
    }
}

/// Specular reflection of `v` about a surface with unit normal `normal`.
///
/// Orthogonal symmetries preserve norms, so `v` keeps its length.
#[inline]
#[must_use]
pub fn reflect(v: &Vector, normal: &Unit<Vector>) -> Vector {
    let n = normal.as_ref();
    v - n * (2.0 * v.dot(n))
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;

    pub const TOL: Float = 1e-9;

    pub fn assert_close(a: Float, b: Float) {
        assert!((a - b).abs() <= TOL, "{a} != {b}");
    }

    pub fn assert_point_close(p: &Point, x: Float, y: Float) {
        assert!(
            (p.x - x).abs() <= TOL && (p.y - y).abs() <= TOL,
            "({}, {}) != ({x}, {y})",
            p.x,
            p.y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::test_util::*;
    use super::*;

    #[test]
    fn reflection_keeps_incidence_angle() {
        let normals = [
            Vector::new(1.0, 0.0),
            Vector::new(0.3, -0.7),
            Vector::new(-2.0, 5.0),
        ];
        let dirs = [
            Vector::new(1.0, 0.0),
            Vector::new(-0.4, 0.9),
            Vector::new(3.0, 3.0),
        ];

        for n in normals {
            let n = Unit::new_normalize(n);
            for d in dirs {
                let r = reflect(&d, &n);
                assert_close(r.dot(&n), -d.dot(&n));
                assert_close(r.norm(), d.norm());
            }
        }
    }

    #[test]
    fn head_on_reflection_reverses_direction() {
        let mut ray = Ray::new([0.0, 0.0], [1.0, 0.0]);
        ray.advance(10.0);
        ray.reflect_dir(&Unit::new_normalize(Vector::new(-1.0, 0.0)));

        assert_point_close(&ray.origin, 10.0, 0.0);
        assert_close(ray.direction.x, -1.0);
        assert_close(ray.direction.y, 0.0);
    }

    #[test]
    fn from_angle_is_unit() {
        let ray = Ray::from_angle([3.0, 4.0], 1.234);
        assert_close(ray.direction.norm(), 1.0);
        assert_point_close(&ray.at(0.0), 3.0, 4.0);
    }
}
