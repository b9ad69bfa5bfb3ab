use super::*;

/// The parts of a scene that ray paths depend on, as of the last trace.
#[derive(Clone, Debug, PartialEq)]
struct Snapshot {
    source: LightSource,
    mirrors: Vec<Pose>,
    targets: Vec<Circle>,
}

impl Snapshot {
    fn capture(source: &LightSource, mirrors: &[Mirror], targets: &[Target]) -> Self {
        Self {
            source: source.clone(),
            mirrors: mirrors.iter().map(|m| *m.pose()).collect(),
            targets: targets.iter().map(|t| *t.circle()).collect(),
        }
    }

    fn matches(&self, source: &LightSource, mirrors: &[Mirror], targets: &[Target]) -> bool {
        &self.source == source
            && self.mirrors.len() == mirrors.len()
            && self.targets.len() == targets.len()
            && self.mirrors.iter().zip(mirrors).all(|(a, b)| a == b.pose())
            && self.targets.iter().zip(targets).all(|(a, b)| a == b.circle())
    }
}

/// Remembers the last traced ray paths, and only traces again when
/// something they depend on changed.
#[derive(Clone, Debug, Default)]
pub struct RayCache {
    previous: Option<(Vec<RayPath>, Snapshot)>,
    recomputations: u64,
}

impl RayCache {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The paths returned by the last call to [`Self::update_rays`], if any
    #[inline]
    #[must_use]
    pub fn rays(&self) -> Option<&[RayPath]> {
        self.previous.as_ref().map(|(paths, _)| paths.as_slice())
    }

    /// How many times rays were actually traced
    #[inline]
    #[must_use]
    pub const fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Forces the next call to [`Self::update_rays`] to trace again.
    #[inline]
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Whether [`Self::update_rays`] would trace again: there is no previous
    /// result, a mirror is dirty, a moving target moved during the last
    /// tick, or the scene differs from the one last traced (a mirror or
    /// target was added, removed or displaced, or the source changed).
    #[must_use]
    pub fn needs_update(
        &self,
        source: &LightSource,
        mirrors: &[Mirror],
        targets: &[Target],
    ) -> bool {
        let Some((_, snapshot)) = &self.previous else {
            return true;
        };

        mirrors.iter().any(Mirror::is_dirty)
            || targets.iter().any(|t| t.is_moving() && t.moved())
            || !snapshot.matches(source, mirrors, targets)
    }

    /// Returns the ray paths for the current scene, tracing them again
    /// only if [needed](Self::needs_update).
    ///
    /// When the previous paths are reused, the targets' hit flags are left
    /// as they were. Otherwise every mirror's dirty flag is cleared.
    pub fn update_rays(
        &mut self,
        tracer: &Tracer,
        source: &LightSource,
        mirrors: &mut [Mirror],
        targets: &mut [Target],
    ) -> &[RayPath] {
        if !self.needs_update(source, mirrors, targets) {
            log::trace!("reusing {} cached ray path(s)", source.ray_count());
        } else {
            mirrors.iter_mut().for_each(Mirror::clear_dirty);

            let paths = tracer.trace_scene(source, mirrors, targets);
            let snapshot = Snapshot::capture(source, mirrors, targets);

            self.recomputations += 1;
            log::debug!(
                "traced {} ray(s) (recomputation #{})",
                paths.len(),
                self.recomputations
            );

            self.previous = Some((paths, snapshot));
        }

        self.rays().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        tracer: Tracer,
        source: LightSource,
        mirrors: Vec<Mirror>,
        targets: Vec<Target>,
        cache: RayCache,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                tracer: Tracer::default(),
                source: LightSource::new([200.0, 400.0], 3, 30.0),
                mirrors: vec![Mirror::new([600.0, 400.0], 100.0).with_angle(90.0)],
                targets: vec![Target::fixed([200.0, 100.0], 30.0)],
                cache: RayCache::new(),
            }
        }

        fn update(&mut self) -> Vec<RayPath> {
            self.cache
                .update_rays(
                    &self.tracer,
                    &self.source,
                    &mut self.mirrors,
                    &mut self.targets,
                )
                .to_vec()
        }
    }

    #[test]
    fn first_call_traces() {
        let mut f = Fixture::new();
        assert!(f.cache.rays().is_none());

        let paths = f.update();

        assert_eq!(paths.len(), 3);
        assert_eq!(f.cache.recomputations(), 1);
        assert!(f.mirrors.iter().all(|m| !m.is_dirty()));
    }

    #[test]
    fn unchanged_scene_reuses_paths() {
        let mut f = Fixture::new();

        let first = f.update();
        let second = f.update();

        assert_eq!(first, second);
        assert_eq!(f.cache.recomputations(), 1);
    }

    #[test]
    fn moving_a_mirror_invalidates() {
        let mut f = Fixture::new();
        let before = f.update();

        f.mirrors[0].move_to(500.0, 400.0);
        assert!(f.mirrors[0].is_dirty());

        let after = f.update();

        assert_eq!(f.cache.recomputations(), 2);
        assert!(!f.mirrors[0].is_dirty());
        assert_ne!(before, after);
    }

    #[test]
    fn removing_a_mirror_invalidates() {
        let mut f = Fixture::new();
        f.update();

        f.mirrors.clear();
        f.update();

        assert_eq!(f.cache.recomputations(), 2);
    }

    #[test]
    fn source_changes_invalidate() {
        let mut f = Fixture::new();
        f.update();

        f.source.set_ray_count(5).unwrap();
        assert_eq!(f.update().len(), 5);
        assert_eq!(f.cache.recomputations(), 2);

        f.source.set_spread(60.0).unwrap();
        f.update();
        assert_eq!(f.cache.recomputations(), 3);
    }

    #[test]
    fn moving_targets_invalidate_each_tick() {
        let mut f = Fixture::new();
        f.targets.push(Target::new(
            [800.0, 300.0],
            30.0,
            Motion::Horizontal(Oscillator::try_new(800.0, 1000.0, 2.0).unwrap()),
        ));
        f.update();

        for tick in 1..=3 {
            f.targets.iter_mut().for_each(|t| t.update(tick));
            f.update();
        }

        assert_eq!(f.cache.recomputations(), 4);
    }

    #[test]
    fn cached_result_keeps_hit_flags() {
        let mut f = Fixture::new();
        f.mirrors.clear();
        f.source = LightSource::new([200.0, 400.0], 1, 0.0);
        f.targets = vec![Target::fixed([600.0, 400.0], 30.0)];

        f.update();
        assert!(f.targets[0].hit());

        f.update();
        assert!(f.targets[0].hit());
        assert_eq!(f.cache.recomputations(), 1);
    }

    #[test]
    fn invalidate_forces_a_trace() {
        let mut f = Fixture::new();
        f.update();
        f.cache.invalidate();
        f.update();

        assert_eq!(f.cache.recomputations(), 2);
    }
}
