use super::*;

/// The playable area, `[0, width] x [0, height]`. Traced paths never leave it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: Float,
    pub height: Float,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl Bounds {
    /// # Errors
    ///
    /// if `width` or `height` isn't positive and finite
    pub fn try_new(width: Float, height: Float) -> Result<Self, ConfigError> {
        let bounds = Self { width, height };
        bounds.validate().map(|()| bounds)
    }

    /// # Errors
    ///
    /// if `width` or `height` isn't positive and finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self { width, height } = *self;

        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidBounds { width, height })
        }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Parameters of the [`Tracer`].
#[derive(Clone, Debug, PartialEq)]
pub struct TracerConfig {
    /// Bounce budget per ray, a path holds at most `max_bounces + 1` points
    pub max_bounces: usize,
    pub bounds: Bounds,
    /// How far a ray that hits nothing is extended
    pub far_distance: Float,
    /// Mirror hits closer than this to the ray's origin are ignored, so that
    /// a ray leaving a mirror doesn't bump into it again due to roundoff.
    pub min_hit_distance: Float,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            max_bounces: 5,
            bounds: Bounds::default(),
            far_distance: 1000.0,
            min_hit_distance: 1e-6,
        }
    }
}

impl TracerConfig {
    /// # Errors
    ///
    /// if the bounds, far distance or minimum hit distance are invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;

        if !(self.far_distance.is_finite() && self.far_distance > 0.0) {
            return Err(ConfigError::InvalidFarDistance {
                distance: self.far_distance,
            });
        }

        if !(self.min_hit_distance.is_finite() && self.min_hit_distance >= 0.0) {
            return Err(ConfigError::InvalidHitDistance {
                distance: self.min_hit_distance,
            });
        }

        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn with_max_bounces(mut self, max_bounces: usize) -> Self {
        self.max_bounces = max_bounces;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }
}
