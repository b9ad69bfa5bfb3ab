use super::*;

/// Everything a frame is made of: the light source, the player's mirrors,
/// the level's targets and obstacles, and the cached ray paths.
///
/// A caller drives it once per frame, typically: mutate mirrors through
/// [`Self::mirror_mut`] and friends, then call [`Self::step`] and draw the
/// returned paths.
#[derive(Clone, Debug)]
pub struct Scene {
    tracer: Tracer,
    source: LightSource,
    mirrors: Vec<Mirror>,
    level: LevelSpec,
    cache: RayCache,
    tick: u64,
}

impl Scene {
    /// The usual offset for a [duplicated](Self::duplicate_mirror) mirror
    pub const DUPLICATE_OFFSET: [Float; 2] = [20.0, 20.0];

    /// # Errors
    ///
    /// if `config` or `level` is invalid
    pub fn try_new(
        config: TracerConfig,
        source: LightSource,
        mut level: LevelSpec,
    ) -> Result<Self, ConfigError> {
        level.validate()?;
        level.targets.iter_mut().for_each(Target::reset_clock);

        Ok(Self {
            tracer: Tracer::try_new(config)?,
            source,
            mirrors: Vec::new(),
            level,
            cache: RayCache::new(),
            tick: 0,
        })
    }

    /// A panicking version of [`Self::try_new`]
    ///
    /// # Panics
    ///
    /// if `try_new` fails
    #[inline]
    #[must_use]
    pub fn new(config: TracerConfig, source: LightSource, level: LevelSpec) -> Self {
        Self::try_new(config, source, level).unwrap()
    }

    /// A scene with the default tracer configuration and light source
    ///
    /// # Errors
    ///
    /// if `level` is invalid
    pub fn from_level(level: LevelSpec) -> Result<Self, ConfigError> {
        Self::try_new(TracerConfig::default(), LightSource::default(), level)
    }

    #[inline]
    #[must_use]
    pub const fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    #[inline]
    #[must_use]
    pub const fn source(&self) -> &LightSource {
        &self.source
    }

    #[inline]
    #[must_use]
    pub fn mirrors(&self) -> &[Mirror] {
        &self.mirrors
    }

    #[inline]
    #[must_use]
    pub fn mirror_mut(&mut self, index: usize) -> Option<&mut Mirror> {
        self.mirrors.get_mut(index)
    }

    #[inline]
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.level.targets
    }

    #[inline]
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.level.obstacles
    }

    #[inline]
    #[must_use]
    pub const fn level(&self) -> &LevelSpec {
        &self.level
    }

    #[inline]
    #[must_use]
    pub const fn cache(&self) -> &RayCache {
        &self.cache
    }

    /// The number of the last tick applied to the targets
    #[inline]
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The paths traced by the last [`Self::update_rays`], empty before the first one
    #[inline]
    #[must_use]
    pub fn rays(&self) -> &[RayPath] {
        self.cache.rays().unwrap_or_default()
    }

    /// Places a new, horizontal mirror centered at `position`, returning its index.
    ///
    /// # Errors
    ///
    /// if the level's mirror limit is reached, or `length` is invalid
    pub fn create_mirror(
        &mut self,
        position: impl Into<Point>,
        length: Float,
    ) -> Result<usize, SceneError> {
        let mirror = Mirror::try_new(position, length)?;
        self.add_mirror(mirror)
    }

    /// # Errors
    ///
    /// if the level's mirror limit is reached
    pub fn add_mirror(&mut self, mirror: Mirror) -> Result<usize, SceneError> {
        let limit = self.level.mirror_limit;

        if self.mirrors.len() >= limit {
            log::warn!("refusing to place a mirror: limit of {limit} reached");
            return Err(SceneError::MirrorLimitReached { limit });
        }

        log::info!(
            "placing mirror {} at ({}, {})",
            self.mirrors.len(),
            mirror.position().x,
            mirror.position().y
        );

        self.mirrors.push(mirror);
        Ok(self.mirrors.len() - 1)
    }

    /// Places a copy of `mirrors[index]` (same length and angle), shifted by
    /// `offset`, returning the copy's index.
    ///
    /// # Errors
    ///
    /// if there is no such mirror, or the level's mirror limit is reached
    pub fn duplicate_mirror(
        &mut self,
        index: usize,
        offset: impl Into<Vector>,
    ) -> Result<usize, SceneError> {
        let original = self
            .mirrors
            .get(index)
            .ok_or(SceneError::NoSuchMirror { index })?;

        let position = original.position() + offset.into();
        let copy = Mirror::try_new(position, original.length())?.with_angle(original.angle());

        self.add_mirror(copy)
    }

    /// Removes `mirrors[index]`, shifting the following mirrors' indices down by one.
    pub fn remove_mirror(&mut self, index: usize) -> Option<Mirror> {
        (index < self.mirrors.len()).then(|| {
            log::info!("removing mirror {index}");
            self.mirrors.remove(index)
        })
    }

    pub fn clear_mirrors(&mut self) {
        if !self.mirrors.is_empty() {
            log::info!("removing all {} mirror(s)", self.mirrors.len());
        }
        self.mirrors.clear();
    }

    /// Replaces the current level: mirrors are removed and the tick count
    /// restarts. Targets start moving again from where they stand.
    ///
    /// # Errors
    ///
    /// if `level` is invalid, in which case the scene is left untouched
    pub fn load_level(&mut self, mut level: LevelSpec) -> Result<(), ConfigError> {
        level.validate()?;
        level.targets.iter_mut().for_each(Target::reset_clock);

        self.level = level;
        self.mirrors.clear();
        self.tick = 0;
        self.cache.invalidate();

        Ok(())
    }

    /// # Errors
    ///
    /// if `ray_count == 0`
    pub fn set_ray_count(&mut self, ray_count: usize) -> Result<(), ConfigError> {
        self.source.set_ray_count(ray_count)
    }

    /// # Errors
    ///
    /// if `spread` isn't within `0..=360`
    pub fn set_spread(&mut self, spread: Float) -> Result<(), ConfigError> {
        self.source.set_spread(spread)
    }

    pub fn move_source(&mut self, x: Float, y: Float) {
        self.source.move_to(x, y);
    }

    /// # Errors
    ///
    /// if `config` is invalid, in which case the current one is kept
    pub fn set_tracer_config(&mut self, config: TracerConfig) -> Result<(), ConfigError> {
        self.tracer = Tracer::try_new(config)?;
        self.cache.invalidate();
        Ok(())
    }

    /// Moves every target to its position at the next tick.
    pub fn advance_targets(&mut self) {
        self.tick += 1;

        let tick = self.tick;
        self.level.targets.iter_mut().for_each(|t| t.update(tick));
    }

    /// See [`RayCache::update_rays`]
    pub fn update_rays(&mut self) -> &[RayPath] {
        self.cache.update_rays(
            &self.tracer,
            &self.source,
            &mut self.mirrors,
            &mut self.level.targets,
        )
    }

    /// One frame: advances the targets, then updates the rays.
    pub fn step(&mut self) -> &[RayPath] {
        self.advance_targets();
        self.update_rays()
    }

    /// Whether the level is complete: it has targets, and all of them are hit.
    #[must_use]
    pub fn all_targets_hit(&self) -> bool {
        let targets = self.targets();
        !targets.is_empty() && targets.iter().all(Target::hit)
    }
}
