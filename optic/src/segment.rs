use super::*;

/// Denominators smaller than this (in absolute value) are treated as a ray
/// running parallel to the segment.
pub const PARALLEL_EPSILON: Float = 1e-6;

/// A line segment, the shape of every mirror.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// Where a ray meets a [`Segment`].
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentHit {
    /// Parameter along the ray: `point == ray.at(t)`
    pub t: Float,
    pub point: Point,
    /// The segment's normal, the direction vector rotated a quarter turn counter-clockwise
    pub normal: Unit<Vector>,
}

impl Segment {
    #[inline]
    #[must_use]
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// `end - start`
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Vector {
        self.end - self.start
    }

    /// Returns the intersection between `ray` and `self`, if any.
    ///
    /// Solves `ray.origin + t * ray.direction = start + u * (end - start)`
    /// for `t >= 0` and `u` in `[0, 1]`. Parallel rays, zero-length segments
    /// and non-finite inputs all yield `None`.
    #[must_use]
    pub fn intersection(&self, ray: &Ray) -> Option<SegmentHit> {
        let s = self.direction();
        let d = &ray.direction;
        let w = self.start - ray.origin;

        // (y2 - y1) * dx - (x2 - x1) * dy
        let denominator = d.perp(&s);

        // negated so that NaN also bails out
        if !(denominator.abs() >= PARALLEL_EPSILON) {
            return None;
        }

        let t = w.perp(&s) / denominator;
        let u = w.perp(d) / denominator;

        if !(t >= 0.0 && (0.0..=1.0).contains(&u)) {
            return None;
        }

        let normal = Unit::try_new(Vector::new(-s.y, s.x), 0.0)?;

        Some(SegmentHit {
            t,
            point: ray.at(t),
            normal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::*;

    fn vertical() -> Segment {
        Segment::new([10.0, -5.0], [10.0, 5.0])
    }

    #[test]
    fn head_on_hit() {
        let hit = vertical()
            .intersection(&Ray::new([0.0, 0.0], [1.0, 0.0]))
            .unwrap();

        assert_close(hit.t, 10.0);
        assert_point_close(&hit.point, 10.0, 0.0);
        assert_close(hit.normal.x, -1.0);
        assert_close(hit.normal.y, 0.0);
    }

    #[test]
    fn t_scales_with_direction_length() {
        let hit = vertical()
            .intersection(&Ray::new([0.0, 0.0], [2.0, 0.0]))
            .unwrap();

        assert_close(hit.t, 5.0);
        assert_point_close(&hit.point, 10.0, 0.0);
    }

    #[test]
    fn endpoints_are_inclusive() {
        let hit = vertical()
            .intersection(&Ray::new([0.0, 5.0], [1.0, 0.0]))
            .unwrap();
        assert_point_close(&hit.point, 10.0, 5.0);
    }

    #[test]
    fn misses_beyond_the_ends() {
        assert!(vertical()
            .intersection(&Ray::new([0.0, 5.5], [1.0, 0.0]))
            .is_none());
        assert!(vertical()
            .intersection(&Ray::new([0.0, -6.0], [1.0, 0.0]))
            .is_none());
    }

    #[test]
    fn misses_behind_the_origin() {
        assert!(vertical()
            .intersection(&Ray::new([20.0, 0.0], [1.0, 0.0]))
            .is_none());
    }

    #[test]
    fn parallel_ray_misses() {
        assert!(vertical()
            .intersection(&Ray::new([10.0, -20.0], [0.0, 1.0]))
            .is_none());
        assert!(vertical()
            .intersection(&Ray::new([0.0, 0.0], [0.0, 1.0]))
            .is_none());
    }

    #[test]
    fn zero_length_segment_misses() {
        let dot = Segment::new([10.0, 0.0], [10.0, 0.0]);
        assert!(dot
            .intersection(&Ray::new([0.0, 0.0], [1.0, 0.0]))
            .is_none());
    }

    #[test]
    fn nan_input_misses() {
        assert!(vertical()
            .intersection(&Ray::new([0.0, 0.0], [Float::NAN, 0.0]))
            .is_none());
        assert!(vertical()
            .intersection(&Ray::new([Float::NAN, 0.0], [1.0, 0.0]))
            .is_none());
    }
}
