use super::*;

/// The data a level seeds a [`Scene`] with.
///
/// Levels only describe what is placed in the scene and the rules the
/// player is held to. Keeping time and scoring are up to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelSpec {
    /// How many mirrors the player may place
    pub mirror_limit: usize,
    /// `0.0` means no time limit
    pub time_limit_seconds: Float,
    pub targets: Vec<Target>,
    pub obstacles: Vec<Obstacle>,
}

impl Default for LevelSpec {
    fn default() -> Self {
        Self {
            mirror_limit: 99,
            time_limit_seconds: 0.0,
            targets: Vec::new(),
            obstacles: Vec::new(),
        }
    }
}

impl LevelSpec {
    #[inline]
    #[must_use]
    pub fn has_time_limit(&self) -> bool {
        self.time_limit_seconds > 0.0
    }

    /// # Errors
    ///
    /// if the time limit is negative or not finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("time limit", &[self.time_limit_seconds])?;

        if self.time_limit_seconds < 0.0 {
            return Err(ConfigError::InvalidTimeLimit {
                seconds: self.time_limit_seconds,
            });
        }

        Ok(())
    }
}
