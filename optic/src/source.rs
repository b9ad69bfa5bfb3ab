use super::*;

/// A point light source, emitting a fan of `ray_count` rays spread over
/// `spread` degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct LightSource {
    position: Point,
    ray_count: usize,
    spread: Float,
}

impl Default for LightSource {
    fn default() -> Self {
        Self {
            position: Point::new(200.0, 400.0),
            ray_count: 3,
            spread: 30.0,
        }
    }
}

impl LightSource {
    /// # Errors
    ///
    /// if `position` isn't finite, `ray_count == 0`, or `spread` isn't within `0..=360`
    pub fn try_new(
        position: impl Into<Point>,
        ray_count: usize,
        spread: Float,
    ) -> Result<Self, ConfigError> {
        let position = position.into();
        ensure_finite("light source position", &[position.x, position.y])?;

        let mut source = Self {
            position,
            ray_count: 1,
            spread: 0.0,
        };

        source.set_ray_count(ray_count)?;
        source.set_spread(spread)?;

        Ok(source)
    }

    /// A panicking version of [`Self::try_new`]
    ///
    /// # Panics
    ///
    /// if `try_new` fails
    #[inline]
    #[must_use]
    pub fn new(position: impl Into<Point>, ray_count: usize, spread: Float) -> Self {
        Self::try_new(position, ray_count, spread).unwrap()
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    #[inline]
    #[must_use]
    pub const fn ray_count(&self) -> usize {
        self.ray_count
    }

    /// The fan's full angle, in degrees
    #[inline]
    #[must_use]
    pub const fn spread(&self) -> Float {
        self.spread
    }

    /// # Errors
    ///
    /// if `ray_count == 0`
    pub fn set_ray_count(&mut self, ray_count: usize) -> Result<(), ConfigError> {
        if ray_count == 0 {
            return Err(ConfigError::NoRays);
        }
        self.ray_count = ray_count;
        Ok(())
    }

    /// # Errors
    ///
    /// if `spread` isn't within `0..=360`
    pub fn set_spread(&mut self, spread: Float) -> Result<(), ConfigError> {
        if !(0.0..=360.0).contains(&spread) {
            return Err(ConfigError::InvalidSpread { spread });
        }
        self.spread = spread;
        Ok(())
    }

    /// Moves the source. Non-finite coordinates are ignored.
    pub fn move_to(&mut self, x: Float, y: Float) {
        if x.is_finite() && y.is_finite() {
            self.position = Point::new(x, y);
        }
    }

    /// The direction of each ray, in degrees, from `spread / 2` down to `-spread / 2`.
    ///
    /// A single ray points at `spread / 2`.
    pub fn fan_angles(&self) -> impl Iterator<Item = Float> + '_ {
        let step = self.spread / self.ray_count.saturating_sub(1).max(1) as Float;
        (0..self.ray_count).map(move |i| self.spread / 2.0 - i as Float * step)
    }

    /// One ray per [fan angle](Self::fan_angles), all starting at the source.
    pub fn rays(&self) -> impl Iterator<Item = Ray> + '_ {
        self.fan_angles()
            .map(move |deg| Ray::from_angle(self.position, deg.to_radians()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::*;

    #[test]
    fn fan_is_evenly_spread() {
        let angles: Vec<_> = LightSource::new([0.0, 0.0], 3, 30.0).fan_angles().collect();
        assert_eq!(angles, [15.0, 0.0, -15.0]);

        let angles: Vec<_> = LightSource::new([0.0, 0.0], 5, 40.0).fan_angles().collect();
        assert_eq!(angles, [20.0, 10.0, 0.0, -10.0, -20.0]);
    }

    #[test]
    fn single_ray_points_at_half_spread() {
        let source = LightSource::new([0.0, 0.0], 1, 30.0);
        assert_eq!(source.fan_angles().collect::<Vec<_>>(), [15.0]);

        let ray = source.rays().next().unwrap();
        assert_close(ray.direction.x, (15.0 as Float).to_radians().cos());
        assert_close(ray.direction.y, (15.0 as Float).to_radians().sin());
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            LightSource::try_new([0.0, 0.0], 0, 30.0),
            Err(ConfigError::NoRays)
        );
        assert!(LightSource::try_new([0.0, 0.0], 3, -5.0).is_err());
        assert!(LightSource::try_new([0.0, 0.0], 3, Float::NAN).is_err());
        assert!(LightSource::try_new([Float::NAN, 0.0], 3, 30.0).is_err());

        let mut source = LightSource::default();
        assert!(source.set_ray_count(0).is_err());
        assert_eq!(source.ray_count(), 3);
    }
}
