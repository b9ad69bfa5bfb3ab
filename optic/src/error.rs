use super::Float;

/// Invalid values rejected at the configuration boundary, before they can
/// reach the tracer.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A light source must emit at least one ray.
    #[error("a light source must emit at least one ray")]
    NoRays,

    #[error("spread must be within 0..=360 degrees, got {spread}")]
    InvalidSpread { spread: Float },

    #[error("scene bounds must be positive and finite, got {width}x{height}")]
    InvalidBounds { width: Float, height: Float },

    #[error("far distance must be positive and finite, got {distance}")]
    InvalidFarDistance { distance: Float },

    #[error("minimum hit distance must be non-negative and finite, got {distance}")]
    InvalidHitDistance { distance: Float },

    #[error("rectangle size must be non-negative, got {width}x{height}")]
    InvalidRectSize { width: Float, height: Float },

    #[error("mirror length must be positive and finite, got {length}")]
    InvalidMirrorLength { length: Float },

    #[error("target radius must be positive and finite, got {radius}")]
    InvalidRadius { radius: Float },

    /// An oscillation range whose lower bound exceeds its upper bound.
    #[error("invalid range: min ({min}) is greater than max ({max})")]
    InvalidRange { min: Float, max: Float },

    #[error("speed must be non-negative and finite, got {speed}")]
    InvalidSpeed { speed: Float },

    #[error("time limit must be non-negative, got {seconds}")]
    InvalidTimeLimit { seconds: Float },

    #[error("{what} must be finite")]
    NonFinite { what: &'static str },
}

/// Errors returned by [`Scene`](crate::Scene) operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("mirror limit reached ({limit})")]
    MirrorLimitReached { limit: usize },

    #[error("no mirror at index {index}")]
    NoSuchMirror { index: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Fails with [`ConfigError::NonFinite`] if any coordinate is NaN or infinite.
pub(crate) fn ensure_finite(what: &'static str, values: &[Float]) -> Result<(), ConfigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { what })
    }
}
