use super::*;

/// Back-and-forth motion along one axis, between `min` and `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillator {
    pub min: Float,
    pub max: Float,
    /// Distance travelled per tick
    pub speed: Float,
    /// `1.0` or `-1.0`
    direction: Float,
    /// Steps of `speed` taken away from the target's anchor
    offset: i128,
}

impl Oscillator {
    pub const DEFAULT_SPEED: Float = 2.0;

    /// Starts moving towards `max`.
    ///
    /// # Errors
    ///
    /// if any value isn't finite, `min > max`, or `speed < 0`
    pub fn try_new(min: Float, max: Float, speed: Float) -> Result<Self, ConfigError> {
        ensure_finite("oscillation range", &[min, max])?;

        if min > max {
            return Err(ConfigError::InvalidRange { min, max });
        }

        if !(speed.is_finite() && speed >= 0.0) {
            return Err(ConfigError::InvalidSpeed { speed });
        }

        Ok(Self {
            min,
            max,
            speed,
            direction: 1.0,
            offset: 0,
        })
    }

    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Float {
        self.direction
    }

    /// Moves `ticks` steps of `speed` on from `anchor`, turning around upon
    /// reaching or passing either bound. Returns the new coordinate.
    ///
    /// Positions lie on the lattice `anchor + k * speed`. The bounds are
    /// rounded outwards to it, so the turning points are the first lattice
    /// points at or past `min` and `max`. Runs in constant time.
    fn advance(&mut self, anchor: Float, ticks: u64) -> Float {
        // a still or degenerate oscillation stays put
        if self.speed > 0.0 {
            let low = ((self.min - anchor) / self.speed).floor() as i64;
            let high = ((self.max - anchor) / self.speed).ceil() as i64;

            if low < high {
                self.walk(i128::from(low), i128::from(high), i128::from(ticks));
            }
        }

        anchor + self.offset as Float * self.speed
    }

    fn walk(&mut self, low: i128, high: i128, mut ticks: i128) {
        // heading away from the range, turn back first
        let outward = if self.direction > 0.0 {
            self.offset >= high
        } else {
            self.offset <= low
        };

        if outward {
            self.direction = -self.direction;
        }

        let period = 2 * (high - low);
        let mut bounced = false;

        loop {
            let (bound, ahead) = if self.direction > 0.0 {
                (high, high - self.offset)
            } else {
                (low, self.offset - low)
            };

            if ticks < ahead {
                self.offset += if self.direction > 0.0 { ticks } else { -ticks };
                return;
            }

            ticks -= ahead;
            self.offset = bound;
            self.direction = -self.direction;

            // from a bound on, the motion repeats every `period` ticks
            if !bounced {
                ticks %= period;
                bounced = true;
            }
        }
    }
}

/// A figure-eight (Lissajous 2:1) trajectory:
/// `x = cx + A sin(2t)`, `y = cy + B sin(t)` with `t = speed * tick`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FigureEight {
    pub center: Point,
    pub amplitude: Vector,
    /// Phase increment per tick, in radians
    pub speed: Float,
}

impl FigureEight {
    pub const DEFAULT_AMPLITUDE: [Float; 2] = [200.0, 100.0];
    pub const DEFAULT_SPEED: Float = 0.05;

    /// # Errors
    ///
    /// if any value isn't finite, or `speed < 0`
    pub fn try_new(
        center: impl Into<Point>,
        amplitude: impl Into<Vector>,
        speed: Float,
    ) -> Result<Self, ConfigError> {
        let center = center.into();
        let amplitude = amplitude.into();

        ensure_finite(
            "figure-eight",
            &[center.x, center.y, amplitude.x, amplitude.y],
        )?;

        if !(speed.is_finite() && speed >= 0.0) {
            return Err(ConfigError::InvalidSpeed { speed });
        }

        Ok(Self {
            center,
            amplitude,
            speed,
        })
    }

    #[must_use]
    pub fn position_at(&self, tick: u64) -> Point {
        let phase = self.speed * tick as Float;

        self.center
            + Vector::new(
                self.amplitude.x * (2.0 * phase).sin(),
                self.amplitude.y * phase.sin(),
            )
    }
}

/// How a [`Target`] moves from one tick to the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Static,
    Horizontal(Oscillator),
    Vertical(Oscillator),
    FigureEight(FigureEight),
}

/// A circular target, lit up (see [`Self::hit`]) when a ray reaches it.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    circle: Circle,
    /// Where oscillations are measured from
    anchor: Point,
    motion: Motion,
    hit: bool,
    moved: bool,
    last_tick: u64,
}

impl Target {
    pub const DEFAULT_RADIUS: Float = 30.0;

    /// # Errors
    ///
    /// if `center` isn't finite or `radius` isn't positive and finite
    pub fn try_new(
        center: impl Into<Point>,
        radius: Float,
        motion: Motion,
    ) -> Result<Self, ConfigError> {
        let mut center = center.into();
        ensure_finite("target center", &[center.x, center.y])?;

        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidRadius { radius });
        }

        if let Motion::FigureEight(path) = &motion {
            center = path.position_at(0);
        }

        Ok(Self {
            circle: Circle { center, radius },
            anchor: center,
            motion,
            hit: false,
            moved: false,
            last_tick: 0,
        })
    }

    /// A panicking version of [`Self::try_new`]
    ///
    /// # Panics
    ///
    /// if `try_new` fails
    #[inline]
    #[must_use]
    pub fn new(center: impl Into<Point>, radius: Float, motion: Motion) -> Self {
        Self::try_new(center, radius, motion).unwrap()
    }

    /// A target that never moves
    ///
    /// # Panics
    ///
    /// if `center` isn't finite or `radius` isn't positive and finite
    #[inline]
    #[must_use]
    pub fn fixed(center: impl Into<Point>, radius: Float) -> Self {
        Self::new(center, radius, Motion::Static)
    }

    #[inline]
    #[must_use]
    pub const fn circle(&self) -> &Circle {
        &self.circle
    }

    #[inline]
    #[must_use]
    pub const fn center(&self) -> Point {
        self.circle.center
    }

    #[inline]
    #[must_use]
    pub const fn radius(&self) -> Float {
        self.circle.radius
    }

    #[inline]
    #[must_use]
    pub const fn motion(&self) -> &Motion {
        &self.motion
    }

    /// Whether some ray reached this target during the last trace.
    #[inline]
    #[must_use]
    pub const fn hit(&self) -> bool {
        self.hit
    }

    #[inline]
    pub(crate) fn set_hit(&mut self, hit: bool) {
        self.hit = hit;
    }

    /// Whether the target changed position during the last tick.
    #[inline]
    #[must_use]
    pub const fn moved(&self) -> bool {
        self.moved
    }

    #[inline]
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        !matches!(self.motion, Motion::Static)
    }

    #[inline]
    #[must_use]
    pub fn intersection(&self, ray: &Ray) -> Option<CircleHit> {
        self.circle.intersection(ray)
    }

    /// Brings the target to its state at `tick`.
    ///
    /// Ticks at or before the last applied one are ignored, so calling this
    /// twice in the same frame is harmless.
    pub fn update(&mut self, tick: u64) {
        if tick <= self.last_tick {
            return;
        }

        let elapsed = tick - self.last_tick;
        self.last_tick = tick;

        let before = self.circle.center;
        let center = &mut self.circle.center;

        match &mut self.motion {
            Motion::Static => {}
            Motion::Horizontal(osc) => center.x = osc.advance(self.anchor.x, elapsed),
            Motion::Vertical(osc) => center.y = osc.advance(self.anchor.y, elapsed),
            Motion::FigureEight(path) => *center = path.position_at(tick),
        }

        self.moved = match self.motion {
            Motion::Static => false,
            Motion::FigureEight(_) => true,
            Motion::Horizontal(_) | Motion::Vertical(_) => self.circle.center != before,
        };
    }

    /// Restarts the target's clock from where it stands: the next update
    /// may be for tick `1` again. Oscillators keep their heading.
    pub(crate) fn reset_clock(&mut self) {
        self.last_tick = 0;
        self.moved = false;
        self.hit = false;
        self.anchor = self.circle.center;

        if let Motion::Horizontal(osc) | Motion::Vertical(osc) = &mut self.motion {
            osc.offset = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::*;

    fn horizontal(x: Float, min: Float, max: Float) -> Target {
        Target::new(
            [x, 300.0],
            Target::DEFAULT_RADIUS,
            Motion::Horizontal(Oscillator::try_new(min, max, 2.0).unwrap()),
        )
    }

    #[test]
    fn static_targets_stay_put() {
        let mut target = Target::fixed([1000.0, 200.0], 30.0);
        target.update(1);
        target.update(2);

        assert!(!target.moved());
        assert!(!target.is_moving());
        assert_eq!(target.center(), Point::new(1000.0, 200.0));
    }

    #[test]
    fn oscillator_turns_around_at_bounds() {
        let mut target = horizontal(800.0, 800.0, 810.0);

        for tick in 1..=5 {
            target.update(tick);
            assert!(target.moved());
        }
        assert_close(target.center().x, 810.0);

        let Motion::Horizontal(osc) = target.motion() else {
            unreachable!()
        };
        assert_eq!(osc.direction(), -1.0);

        target.update(6);
        assert_close(target.center().x, 808.0);

        for tick in 7..=10 {
            target.update(tick);
        }
        assert_close(target.center().x, 800.0);

        target.update(11);
        assert_close(target.center().x, 802.0);
    }

    #[test]
    fn vertical_oscillator_moves_y() {
        let mut target = Target::new(
            [900.0, 200.0],
            30.0,
            Motion::Vertical(Oscillator::try_new(200.0, 400.0, 2.0).unwrap()),
        );
        target.update(3);

        assert_close(target.center().x, 900.0);
        assert_close(target.center().y, 206.0);
        assert!(target.moved());
    }

    #[test]
    fn zero_speed_does_not_count_as_moving() {
        let mut target = Target::new(
            [800.0, 300.0],
            30.0,
            Motion::Horizontal(Oscillator::try_new(700.0, 900.0, 0.0).unwrap()),
        );
        target.update(1);

        assert!(target.is_moving());
        assert!(!target.moved());
    }

    #[test]
    fn repeated_ticks_are_ignored() {
        let mut target = horizontal(800.0, 800.0, 1000.0);
        target.update(1);
        target.update(1);
        target.update(0);

        assert_close(target.center().x, 802.0);
    }

    #[test]
    fn skipped_ticks_catch_up() {
        let mut a = horizontal(800.0, 800.0, 1000.0);
        let mut b = a.clone();

        (1..=7).for_each(|tick| a.update(tick));
        b.update(7);

        assert_eq!(a.center(), b.center());
    }

    #[test]
    fn large_tick_gaps_wrap_around() {
        let mut a = horizontal(800.0, 800.0, 1000.0);
        let mut b = a.clone();

        // a round trip takes 200 ticks
        a.update(1 << 40);
        b.update((1 << 40) % 200);

        assert_eq!(a.center(), b.center());
        assert_close(a.center().x, 848.0);
        assert_close(b.center().x, 848.0);
    }

    #[test]
    fn starting_on_the_far_bound_heads_back() {
        let mut target = horizontal(1000.0, 800.0, 1000.0);
        target.update(1);

        assert_close(target.center().x, 998.0);

        let Motion::Horizontal(osc) = target.motion() else {
            unreachable!()
        };
        assert_eq!(osc.direction(), -1.0);
    }

    #[test]
    fn bounds_round_out_to_the_step() {
        // steps of 3 from 800: turns around at 1001, then at 797
        let mut target = Target::new(
            [800.0, 300.0],
            30.0,
            Motion::Horizontal(Oscillator::try_new(798.0, 1000.0, 3.0).unwrap()),
        );

        target.update(67);
        assert_close(target.center().x, 1001.0);

        target.update(67 + 68);
        assert_close(target.center().x, 797.0);

        target.update(67 + 68 + 1);
        assert_close(target.center().x, 800.0);
    }

    #[test]
    fn reset_clock_restarts_from_the_current_position() {
        let mut target = horizontal(800.0, 800.0, 1000.0);
        target.update(30);
        target.set_hit(true);

        target.reset_clock();
        assert!(!target.moved());
        assert!(!target.hit());

        target.update(1);
        assert!(target.moved());
        assert_close(target.center().x, 862.0);
    }

    #[test]
    fn figure_eight_follows_closed_form() {
        let path = FigureEight::try_new([800.0, 400.0], [200.0, 100.0], 0.05).unwrap();
        let mut target = Target::new([0.0, 0.0], 30.0, Motion::FigureEight(path));

        assert_eq!(target.center(), Point::new(800.0, 400.0));

        target.update(10);
        assert!(target.moved());
        assert_close(target.center().x, 800.0 + 200.0 * (1.0 as Float).sin());
        assert_close(target.center().y, 400.0 + 100.0 * (0.5 as Float).sin());
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            Target::try_new([0.0, 0.0], -3.0, Motion::Static),
            Err(ConfigError::InvalidRadius { radius: -3.0 })
        );
        assert_eq!(
            Oscillator::try_new(10.0, 0.0, 1.0),
            Err(ConfigError::InvalidRange {
                min: 10.0,
                max: 0.0
            })
        );
        assert!(Oscillator::try_new(0.0, 10.0, -1.0).is_err());
        assert!(FigureEight::try_new([0.0, 0.0], [1.0, 1.0], Float::NAN).is_err());
    }
}
