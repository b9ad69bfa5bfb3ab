use super::*;

/// Everything that determines where a [`Mirror`] is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// The mirror's midpoint
    pub position: Point,
    /// In degrees, counter-clockwise from the `x` axis
    pub angle: Float,
    pub length: Float,
}

/// A flat, double-sided, movable mirror.
///
/// The mirror keeps track of whether it moved since the last time rays were
/// traced (see [`Self::is_dirty`]). Its endpoints are always derived from its
/// pose, never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Mirror {
    pose: Pose,
    dirty: bool,
}

impl Mirror {
    pub const DEFAULT_LENGTH: Float = 100.0;

    /// Creates a horizontal mirror centered at `position`.
    ///
    /// # Errors
    ///
    /// if `position` isn't finite, or `length` isn't positive and finite
    pub fn try_new(position: impl Into<Point>, length: Float) -> Result<Self, ConfigError> {
        let position = position.into();
        ensure_finite("mirror position", &[position.x, position.y])?;

        if !(length.is_finite() && length > 0.0) {
            return Err(ConfigError::InvalidMirrorLength { length });
        }

        Ok(Self {
            pose: Pose {
                position,
                angle: 0.0,
                length,
            },
            dirty: true,
        })
    }

    /// A panicking version of [`Self::try_new`]
    ///
    /// # Panics
    ///
    /// if `try_new` fails
    #[inline]
    #[must_use]
    pub fn new(position: impl Into<Point>, length: Float) -> Self {
        Self::try_new(position, length).unwrap()
    }

    /// Builder-style version of [`Self::set_angle`]
    #[inline]
    #[must_use]
    pub fn with_angle(mut self, degrees: Float) -> Self {
        self.set_angle(degrees);
        self
    }

    #[inline]
    #[must_use]
    pub const fn pose(&self) -> &Pose {
        &self.pose
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point {
        self.pose.position
    }

    #[inline]
    #[must_use]
    pub const fn angle(&self) -> Float {
        self.pose.angle
    }

    #[inline]
    #[must_use]
    pub const fn length(&self) -> Float {
        self.pose.length
    }

    /// Whether the mirror moved or rotated since rays were last traced.
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Moves the mirror's midpoint to `(x, y)`. Non-finite coordinates are ignored.
    pub fn move_to(&mut self, x: Float, y: Float) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }

        self.pose.position = Point::new(x, y);
        self.dirty = true;
    }

    /// Rotates the mirror around its midpoint. Non-finite angles are ignored.
    pub fn rotate_by(&mut self, delta_degrees: Float) {
        self.set_angle(self.pose.angle + delta_degrees);
    }

    /// Non-finite angles are ignored.
    pub fn set_angle(&mut self, degrees: Float) {
        if degrees.is_finite() {
            self.pose.angle = degrees;
            self.dirty = true;
        }
    }

    /// `[start, end]`, at `position ∓ (length / 2) * (cos θ, sin θ)`
    #[must_use]
    pub fn endpoints(&self) -> [Point; 2] {
        let Pose {
            position,
            angle,
            length,
        } = self.pose;

        let (sin, cos) = angle.to_radians().sin_cos();
        let half = Vector::new(cos, sin) * (length / 2.0);

        [position - half, position + half]
    }

    #[inline]
    #[must_use]
    pub fn segment(&self) -> Segment {
        let [start, end] = self.endpoints();
        Segment { start, end }
    }

    #[inline]
    #[must_use]
    pub fn intersection(&self, ray: &Ray) -> Option<SegmentHit> {
        self.segment().intersection(ray)
    }
}
