use super::*;

/// An axis-aligned rectangle, the shape of obstacles.
///
/// Obstacles are part of a level's layout, but are not (yet) consulted
/// when tracing rays. [`Rect::intersection`] is there for when they are.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// The corner with the smallest coordinates
    pub min: Point,
    pub width: Float,
    pub height: Float,
}

pub type Obstacle = Rect;

impl Rect {
    /// # Errors
    ///
    /// if any value isn't finite, or `width`/`height` is negative
    pub fn try_new(
        min: impl Into<Point>,
        width: Float,
        height: Float,
    ) -> Result<Self, ConfigError> {
        let min = min.into();
        ensure_finite("obstacle", &[min.x, min.y, width, height])?;

        if width < 0.0 || height < 0.0 {
            return Err(ConfigError::InvalidRectSize { width, height });
        }

        Ok(Self { min, width, height })
    }

    /// A panicking version of [`Self::try_new`]
    ///
    /// # Panics
    ///
    /// if `try_new` fails
    #[inline]
    #[must_use]
    pub fn new(min: impl Into<Point>, width: Float, height: Float) -> Self {
        Self::try_new(min, width, height).unwrap()
    }

    #[inline]
    #[must_use]
    pub fn max(&self) -> Point {
        self.min + Vector::new(self.width, self.height)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        let max = self.max();
        (self.min.x..=max.x).contains(&p.x) && (self.min.y..=max.y).contains(&p.y)
    }

    /// Smallest `t >= 0` such that `ray.at(t)` lies on the rectangle's
    /// boundary or inside it. Returns `Some(0.0)` if the ray starts inside.
    #[must_use]
    pub fn intersection(&self, ray: &Ray) -> Option<Float> {
        if !ray
            .origin
            .coords
            .iter()
            .chain(ray.direction.iter())
            .all(|v| v.is_finite())
        {
            return None;
        }

        let max = self.max();

        let mut t_min: Float = 0.0;
        let mut t_max = Float::INFINITY;

        for (o, d, lo, hi) in [
            (ray.origin.x, ray.direction.x, self.min.x, max.x),
            (ray.origin.y, ray.direction.y, self.min.y, max.y),
        ] {
            if d == 0.0 {
                if !(lo..=hi).contains(&o) {
                    return None;
                }
                continue;
            }

            let (t0, t1) = ((lo - o) / d, (hi - o) / d);
            let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);

            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::*;

    fn block() -> Rect {
        Rect::new([500.0, 300.0], 200.0, 200.0)
    }

    #[test]
    fn rejects_negative_size() {
        assert_eq!(
            Rect::try_new([0.0, 0.0], -1.0, 5.0),
            Err(ConfigError::InvalidRectSize {
                width: -1.0,
                height: 5.0
            })
        );
        assert!(Rect::try_new([0.0, 0.0], 0.0, 0.0).is_ok());
        assert!(Rect::try_new([Float::NAN, 0.0], 1.0, 1.0).is_err());
        assert!(Rect::try_new([0.0, Float::NAN], 1.0, 5.0).is_err());
    }

    #[test]
    fn hits_the_near_face() {
        let t = block()
            .intersection(&Ray::new([0.0, 400.0], [1.0, 0.0]))
            .unwrap();
        assert_close(t, 500.0);
    }

    #[test]
    fn diagonal_hit() {
        let t = block()
            .intersection(&Ray::new([400.0, 200.0], [1.0, 1.0]))
            .unwrap();
        assert_close(t, 100.0);
    }

    #[test]
    fn starting_inside() {
        assert_eq!(
            block().intersection(&Ray::new([600.0, 400.0], [0.0, -1.0])),
            Some(0.0)
        );
    }

    #[test]
    fn misses() {
        assert!(block()
            .intersection(&Ray::new([0.0, 100.0], [1.0, 0.0]))
            .is_none());
        assert!(block()
            .intersection(&Ray::new([800.0, 400.0], [1.0, 0.0]))
            .is_none());
        assert!(block()
            .intersection(&Ray::new([0.0, 400.0], [Float::NAN, 0.0]))
            .is_none());
    }

    #[test]
    fn containment() {
        assert!(block().contains(&Point::new(500.0, 500.0)));
        assert!(!block().contains(&Point::new(499.0, 400.0)));
    }
}
