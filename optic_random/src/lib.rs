use optic::*;

use core::iter;
pub use rand;

pub trait Random: Sized {
    /// Generate a randomized version of this object using the provided `rng`
    ///
    /// This method must not fail. If creating the object is faillible, keep trying until success
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self;
}

/// A point uniformly distributed in `bounds`
pub fn rand_point(rng: &mut (impl rand::Rng + ?Sized), bounds: &Bounds) -> Point {
    // the rng generates floats in 0.0..1.0, scale the range accordingly
    Point::new(
        rng.gen::<Float>() * bounds.width,
        rng.gen::<Float>() * bounds.height,
    )
}

/// A random angle, in degrees
fn rand_degrees(rng: &mut (impl rand::Rng + ?Sized)) -> Float {
    rng.gen_range(0.0..360.0)
}

/// An oscillation around `coord`
fn rand_oscillator(
    rng: &mut (impl rand::Rng + ?Sized),
    coord: Float,
) -> Result<Oscillator, ConfigError> {
    let reach = rng.gen_range(0.0..200.0);
    Oscillator::try_new(coord - reach, coord + reach, rng.gen_range(0.0..5.0))
}

impl Random for Ray {
    /// A ray starting within the default scene bounds, of unit direction
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        let origin = rand_point(rng, &Bounds::default());
        Self::from_angle(origin, rand_degrees(rng).to_radians())
    }
}

impl Random for Mirror {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        loop {
            let position = rand_point(rng, &Bounds::default());
            let length = rng.gen_range(10.0..300.0);

            if let Ok(mirror) = Self::try_new(position, length) {
                break mirror.with_angle(rand_degrees(rng));
            }
        }
    }
}

impl Random for LightSource {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        const MAX_NUM_RAYS: usize = 32;

        loop {
            let position = rand_point(rng, &Bounds::default());
            let ray_count = rng.gen_range(1..=MAX_NUM_RAYS);
            let spread = rng.gen_range(0.0..=360.0);

            if let Ok(source) = Self::try_new(position, ray_count, spread) {
                break source;
            }
        }
    }
}

impl Random for Target {
    /// A target of any kind of motion, centered within the default scene bounds
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        loop {
            let center = rand_point(rng, &Bounds::default());
            let radius = rng.gen_range(5.0..60.0);

            let motion = match rng.gen_range(0usize..4) {
                0 => Ok(Motion::Static),
                1 => rand_oscillator(rng, center.x).map(Motion::Horizontal),
                2 => rand_oscillator(rng, center.y).map(Motion::Vertical),
                _ => {
                    let amplitude = [rng.gen_range(0.0..200.0), rng.gen_range(0.0..200.0)];
                    FigureEight::try_new(center, amplitude, rng.gen_range(0.0..0.2))
                        .map(Motion::FigureEight)
                }
            };

            if let Ok(target) = motion.and_then(|motion| Target::try_new(center, radius, motion)) {
                break target;
            }
        }
    }
}

impl Random for TracerConfig {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        const MAX_BOUNCES: usize = 12;
        Self::default().with_max_bounces(rng.gen_range(0..=MAX_BOUNCES))
    }
}

impl Random for LevelSpec {
    /// A level with up to 8 targets, without obstacles
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        const MAX_NUM_TARGETS: usize = 8;
        let num_targets = rng.gen_range(0..=MAX_NUM_TARGETS);

        Self {
            mirror_limit: rng.gen_range(0..=16),
            targets: iter::repeat_with(|| Target::random(rng))
                .take(num_targets)
                .collect(),
            ..Default::default()
        }
    }
}

impl Random for Scene {
    /// A scene holding as many random mirrors as its level allows
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        loop {
            let config = TracerConfig::random(rng);
            let source = LightSource::random(rng);
            let level = LevelSpec::random(rng);
            let num_mirrors = level.mirror_limit;

            let Ok(mut scene) = Self::try_new(config, source, level) else {
                continue;
            };

            let placed = iter::repeat_with(|| Mirror::random(rng))
                .take(num_mirrors)
                .try_for_each(|mirror| scene.add_mirror(mirror).map(drop));

            if placed.is_ok() {
                break scene;
            }
        }
    }
}
