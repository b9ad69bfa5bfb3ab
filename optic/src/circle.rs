use super::*;

/// All points at distance `radius` from `center`, the shape of every target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: Float,
}

/// Where a ray enters (or, from the inside, leaves) a [`Circle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleHit {
    /// Parameter along the ray: `point == ray.at(t)`
    pub t: Float,
    pub point: Point,
}

impl Circle {
    #[inline]
    #[must_use]
    pub fn new(center: impl Into<Point>, radius: Float) -> Self {
        Self {
            center: center.into(),
            radius,
        }
    }

    /// Both parameters `[t1, t2]` (`t1 <= t2`, possibly negative) at which
    /// the line carrying `ray` crosses `self`.
    #[must_use]
    pub fn intersections(&self, ray: &Ray) -> Option<[Float; 2]> {
        // substituting `V` for `P + t * D` in the circle equation:
        // `||V - C||^2 = r^2` results in a quadratic equation in `t`.

        let d = &ray.direction;
        let v = ray.origin - self.center;

        let a = d.norm_squared();
        let b = 2.0 * d.dot(&v);
        let c = v.norm_squared() - self.radius * self.radius;

        let delta = b.mul_add(b, -4.0 * a * c);

        if !(a > 0.0 && delta >= 0.0) {
            return None;
        }

        let root = delta.sqrt();
        let two_a = a + a;

        Some([(-b - root) / two_a, (-b + root) / two_a])
    }

    /// The closest forward intersection between `ray` and `self`.
    ///
    /// The nearer crossing is used when it lies ahead of the ray. Otherwise
    /// the ray starts inside the circle and the exit point is used instead.
    #[must_use]
    pub fn intersection(&self, ray: &Ray) -> Option<CircleHit> {
        let [near, far] = self.intersections(ray)?;

        let t = if near > 0.0 {
            near
        } else if far > 0.0 {
            far
        } else {
            return None;
        };

        Some(CircleHit {
            t,
            point: ray.at(t),
        })
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        (p - self.center).norm_squared() <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::*;

    #[test]
    fn hits_the_near_side() {
        let hit = Circle::new([100.0, 0.0], 10.0)
            .intersection(&Ray::new([0.0, 0.0], [1.0, 0.0]))
            .unwrap();

        assert_close(hit.t, 90.0);
        assert_point_close(&hit.point, 90.0, 0.0);
    }

    #[test]
    fn exits_when_starting_inside() {
        let hit = Circle::new([0.0, 0.0], 10.0)
            .intersection(&Ray::new([2.0, 0.0], [1.0, 0.0]))
            .unwrap();

        assert_close(hit.t, 8.0);
        assert_point_close(&hit.point, 10.0, 0.0);
    }

    #[test]
    fn grazing_ray_touches_once() {
        let [t1, t2] = Circle::new([50.0, 10.0], 10.0)
            .intersections(&Ray::new([0.0, 0.0], [1.0, 0.0]))
            .unwrap();

        assert_close(t1, 50.0);
        assert_close(t2, 50.0);
    }

    #[test]
    fn misses() {
        let circle = Circle::new([100.0, 0.0], 10.0);

        // passes above
        assert!(circle
            .intersection(&Ray::new([0.0, 20.0], [1.0, 0.0]))
            .is_none());
        // behind
        assert!(circle
            .intersection(&Ray::new([200.0, 0.0], [1.0, 0.0]))
            .is_none());
        // zero direction
        assert!(circle
            .intersection(&Ray::new([0.0, 0.0], [0.0, 0.0]))
            .is_none());
        // NaN
        assert!(circle
            .intersection(&Ray::new([Float::NAN, 0.0], [1.0, 0.0]))
            .is_none());
    }

    #[test]
    fn contains_boundary() {
        let circle = Circle::new([0.0, 0.0], 5.0);
        assert!(circle.contains(&Point::new(3.0, 4.0)));
        assert!(!circle.contains(&Point::new(3.0, 4.1)));
    }
}
