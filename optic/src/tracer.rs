use super::*;

use core::slice;

/// A traced light path: the point the ray was emitted from, every mirror it
/// bounced off, and where it stopped.
///
/// Every point is finite and lies within the scene's [`Bounds`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RayPath {
    points: Vec<Point>,
}

impl RayPath {
    /// Keeps the points of `points` up to (excluding) the first non-finite
    /// one, then drops those that lie outside of `bounds`.
    #[must_use]
    pub fn clipped(points: impl IntoIterator<Item = Point>, bounds: &Bounds) -> Self {
        let points: Vec<_> = points.into_iter().collect();

        let finite = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
            .unwrap_or(points.len());

        if finite < points.len() {
            log::debug!(
                "dropping {} path point(s) from the first non-finite one",
                points.len() - finite
            );
        }

        points
            .into_iter()
            .take(finite)
            .filter(|p| bounds.contains(p))
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Point> {
        self.points.iter()
    }

    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Vec<Point> {
        self.points
    }
}

impl FromIterator<Point> for RayPath {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RayPath {
    type Item = &'a Point;
    type IntoIter = slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// What a ray does in one bounce iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bounce {
    /// Reflected off `mirrors[index]` at `point`, the ray keeps going.
    Mirror { index: usize, point: Point },
    /// Absorbed by `targets[index]` at `point`.
    Target { index: usize, point: Point },
    /// Hit nothing. `point` is far along the ray's direction.
    Escape { point: Point },
}

impl Bounce {
    #[inline]
    #[must_use]
    pub const fn point(&self) -> Point {
        match *self {
            Self::Mirror { point, .. } | Self::Target { point, .. } | Self::Escape { point } => {
                point
            }
        }
    }

    #[inline]
    #[must_use]
    pub const fn target(&self) -> Option<usize> {
        match *self {
            Self::Target { index, .. } => Some(index),
            _ => None,
        }
    }
}

/// An iterator over the [`Bounce`]s of a single ray. Ends after the ray
/// reaches a target or escapes. Never ends otherwise, use [`Iterator::take`]
/// to bound it.
#[derive(Clone, Debug)]
pub struct Bounces<'a> {
    ray: Ray,
    mirrors: &'a [Mirror],
    targets: &'a [Target],
    config: &'a TracerConfig,
    done: bool,
}

impl<'a> Bounces<'a> {
    /// The ray as it currently stands: at the last mirror hit, pointing away from it.
    #[inline]
    #[must_use]
    pub const fn ray(&self) -> &Ray {
        &self.ray
    }

    fn closest_target(&self) -> Option<(usize, CircleHit)> {
        self.targets
            .iter()
            .enumerate()
            .filter_map(|(i, target)| target.intersection(&self.ray).map(|hit| (i, hit)))
            .min_by(|(_, a), (_, b)| a.t.total_cmp(&b.t))
    }

    fn closest_mirror(&self) -> Option<(usize, SegmentHit)> {
        let eps = self.config.min_hit_distance;

        self.mirrors
            .iter()
            .enumerate()
            .filter_map(|(i, mirror)| mirror.intersection(&self.ray).map(|hit| (i, hit)))
            .filter(|(_, hit)| hit.t > eps)
            .min_by(|(_, a), (_, b)| a.t.total_cmp(&b.t))
    }
}

impl Iterator for Bounces<'_> {
    type Item = Bounce;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // Targets take priority over mirrors, even closer ones.
        if let Some((index, hit)) = self.closest_target() {
            self.done = true;
            return Some(Bounce::Target {
                index,
                point: hit.point,
            });
        }

        Some(match self.closest_mirror() {
            Some((index, hit)) => {
                self.ray.origin = hit.point;
                self.ray.reflect_dir(&hit.normal);
                Bounce::Mirror {
                    index,
                    point: hit.point,
                }
            }
            None => {
                self.done = true;
                Bounce::Escape {
                    point: self.ray.at(self.config.far_distance),
                }
            }
        })
    }
}

impl core::iter::FusedIterator for Bounces<'_> {}

/// The outcome of tracing one ray.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    pub path: RayPath,
    /// The target the ray ended on, if any
    pub target: Option<usize>,
}

/// Casts rays through a set of mirrors and targets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tracer {
    config: TracerConfig,
}

impl Tracer {
    /// # Errors
    ///
    /// if `config` is invalid, see [`TracerConfig::validate`]
    pub fn try_new(config: TracerConfig) -> Result<Self, ConfigError> {
        config.validate().map(|()| Self { config })
    }

    /// A panicking version of [`Self::try_new`]
    ///
    /// # Panics
    ///
    /// if `config` is invalid
    #[inline]
    #[must_use]
    pub fn new(config: TracerConfig) -> Self {
        Self::try_new(config).unwrap()
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &TracerConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn bounces<'a>(
        &'a self,
        ray: Ray,
        mirrors: &'a [Mirror],
        targets: &'a [Target],
    ) -> Bounces<'a> {
        Bounces {
            ray,
            mirrors,
            targets,
            config: &self.config,
            done: false,
        }
    }

    /// Traces `ray` for at most `max_bounces` iterations, without touching
    /// the targets' state.
    #[must_use]
    pub fn trace(&self, ray: Ray, mirrors: &[Mirror], targets: &[Target]) -> Trace {
        let mut target = None;

        let bounces = self
            .bounces(ray, mirrors, targets)
            .take(self.config.max_bounces)
            .inspect(|bounce| target = target.or(bounce.target()))
            .map(|bounce| bounce.point());

        let path = RayPath::clipped(
            core::iter::once(ray.origin).chain(bounces),
            &self.config.bounds,
        );

        Trace { path, target }
    }

    /// Traces a ray leaving `origin` at `angle` radians, marking the target
    /// it ends on (if any) as hit. Other targets are left untouched.
    pub fn trace_ray(
        &self,
        origin: impl Into<Point>,
        angle: Float,
        mirrors: &[Mirror],
        targets: &mut [Target],
    ) -> RayPath {
        let Trace { path, target } = self.trace(Ray::from_angle(origin, angle), mirrors, targets);

        if let Some(i) = target {
            targets[i].set_hit(true);
        }

        path
    }

    /// Traces every ray of `source`'s fan. Afterwards, a target is
    /// [hit](Target::hit) if and only if one of these rays ended on it.
    pub fn trace_scene(
        &self,
        source: &LightSource,
        mirrors: &[Mirror],
        targets: &mut [Target],
    ) -> Vec<RayPath> {
        targets.iter_mut().for_each(|t| t.set_hit(false));

        let (paths, hits): (Vec<_>, Vec<_>) = source
            .rays()
            .map(|ray| {
                let Trace { path, target } = self.trace(ray, mirrors, targets);
                (path, target)
            })
            .unzip();

        for i in hits.into_iter().flatten() {
            targets[i].set_hit(true);
        }

        paths
    }
}
