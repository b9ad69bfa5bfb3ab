//! Reading scenes and levels from, and writing traced paths to, JSON.
//!
//! Every field documented as optional falls back to the corresponding
//! `Default` value, or constant of the type being deserialized.

use optic::*;
use std::error::Error;

use std::{format as f, ops::Deref};

pub use serde_json;

/// This is essentially `try_into` then `try_map` but the latter is nightly-only
pub fn json_array_to_float_array<const D: usize>(
    json_array: &[serde_json::Value],
) -> Option<[Float; D]> {
    let array: &[serde_json::Value; D] = json_array.try_into().ok()?;

    let mut coords = [0.; D];
    for (coord, value) in coords.iter_mut().zip(array) {
        *coord = value.as_f64()?;
    }
    Some(coords)
}

pub fn map_json_array<C: FromIterator<T>, T>(
    json: &serde_json::Value,
    map: impl FnMut(&serde_json::Value) -> Result<T, Box<dyn Error>>,
) -> Result<C, Box<dyn Error>> {
    json.as_array()
        .ok_or("json value must be an array")?
        .iter()
        .map(map)
        .collect()
}

/// `json[key]` as a float, `default` if absent
fn float_or(json: &serde_json::Value, key: &str, default: Float) -> Result<Float, Box<dyn Error>> {
    json.get(key).map_or(Ok(default), |value| -> Result<Float, Box<dyn Error>> {
        value
            .as_f64()
            .ok_or_else(|| f!("{key} must be a number").into())
    })
}

/// `json[key]` as a non-negative integer, `default` if absent
fn count_or(json: &serde_json::Value, key: &str, default: usize) -> Result<usize, Box<dyn Error>> {
    json.get(key).map_or(Ok(default), |value| -> Result<usize, Box<dyn Error>> {
        let n = value
            .as_u64()
            .ok_or_else(|| f!("{key} must be a non-negative integer"))?;
        Ok(usize::try_from(n)?)
    })
}

/// `json[key]` as a `[x, y]` pair
fn pair(json: &serde_json::Value, key: &str) -> Result<[Float; 2], Box<dyn Error>> {
    let array = json
        .get(key)
        .ok_or_else(|| f!("Missing {key}"))?
        .as_array()
        .ok_or_else(|| f!("{key} must be an array"))?;

    Ok(json_array_to_float_array(array).ok_or_else(|| f!("{key} must be an array of 2 numbers"))?)
}

/// `json[key]` as a `[x, y]` pair, `default` if absent
fn pair_or(
    json: &serde_json::Value,
    key: &str,
    default: [Float; 2],
) -> Result<[Float; 2], Box<dyn Error>> {
    if json.get(key).is_some() {
        pair(json, key)
    } else {
        Ok(default)
    }
}

/// `json[key]` deserialized, `T::default()` if absent
fn field_or_default<T: JsonDes + Default>(
    json: &serde_json::Value,
    key: &str,
) -> Result<T, Box<dyn Error>> {
    json.get(key).map_or_else(|| Ok(T::default()), T::from_json)
}

pub trait JsonSer {
    /// Serialize `self` into a JSON object.
    fn to_json(&self) -> serde_json::Value;
}

impl<T: JsonSer> JsonSer for [T] {
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(Vec::from_iter(self.iter().map(T::to_json)))
    }
}

impl<T: JsonSer> JsonSer for Vec<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for &T {
    fn to_json(&self) -> serde_json::Value {
        (*self).to_json()
    }
}

impl JsonSer for Point {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!([self.x, self.y])
    }
}

impl JsonSer for RayPath {
    /// An array of `[x, y]` points
    fn to_json(&self) -> serde_json::Value {
        self.points().to_json()
    }
}

impl JsonSer for Ray {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "origin": self.origin.to_json(),
            "direction": [self.direction.x, self.direction.y],
        })
    }
}

impl JsonSer for Mirror {
    /// Serialize a mirror into a JSON object.
    ///
    /// The format of the returned object is explained in [`JsonDes::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "position": self.position().to_json(),
            "angle": self.angle(),
            "length": self.length(),
        })
    }
}

impl JsonSer for Target {
    /// The target's current state:
    ///
    /// ```json
    /// {
    ///     "center": [1., 2.],
    ///     "radius": 30.,
    ///     "hit": true
    /// }
    /// ```
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "center": self.center().to_json(),
            "radius": self.radius(),
            "hit": self.hit(),
        })
    }
}

pub trait JsonDes {
    /// Deserialize from a JSON object.
    ///
    /// Returns an error if `json`'s format or values are invalid.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>>
    where
        Self: Sized;
}

impl<T: JsonDes> JsonDes for Vec<T> {
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        map_json_array(json, T::from_json)
    }
}

impl JsonDes for Point {
    /// A `[x, y]` array
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let array = json.as_array().ok_or("point must be an array")?;
        let coords = json_array_to_float_array(array).ok_or("point must be an array of 2 numbers")?;
        Ok(Self::from(coords))
    }
}

impl JsonDes for Ray {
    /// Deserialize a new ray from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "origin": [9., 8.],
    ///     "direction": [9., 8.], // (must have at least one non-zero value)
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let origin = pair(json, "origin")?;
        let direction = Vector::from(pair(json, "direction")?);

        if direction == Vector::zeros() {
            return Err("ray direction must be non-zero".into());
        }

        Ok(Self::new(origin, direction))
    }
}

impl JsonDes for Bounds {
    /// ```json
    /// {
    ///     "width": 1200.,
    ///     "height": 800.
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let default = Self::default();

        Ok(Self::try_new(
            float_or(json, "width", default.width)?,
            float_or(json, "height", default.height)?,
        )?)
    }
}

impl JsonDes for TracerConfig {
    /// All fields are optional:
    ///
    /// ```json
    /// {
    ///     "max_bounces": 5,
    ///     "bounds": { "width": 1200., "height": 800. },
    ///     "far_distance": 1000.,
    ///     "min_hit_distance": 1e-6
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let default = Self::default();

        let config = Self {
            max_bounces: count_or(json, "max_bounces", default.max_bounces)?,
            bounds: field_or_default(json, "bounds")?,
            far_distance: float_or(json, "far_distance", default.far_distance)?,
            min_hit_distance: float_or(json, "min_hit_distance", default.min_hit_distance)?,
        };

        config.validate()?;
        Ok(config)
    }
}

impl JsonDes for LightSource {
    /// All fields are optional:
    ///
    /// ```json
    /// {
    ///     "position": [200., 400.],
    ///     "ray_count": 3,
    ///     "spread": 30. // (degrees)
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let default = Self::default();
        let position = default.position();

        Ok(Self::try_new(
            pair_or(json, "position", [position.x, position.y])?,
            count_or(json, "ray_count", default.ray_count())?,
            float_or(json, "spread", default.spread())?,
        )?)
    }
}

impl JsonDes for Mirror {
    /// ```json
    /// {
    ///     "position": [600., 400.],
    ///     "angle": 45., // (optional, degrees)
    ///     "length": 100. // (optional)
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let position = pair(json, "position")?;
        let length = float_or(json, "length", Self::DEFAULT_LENGTH)?;
        let angle = float_or(json, "angle", 0.0)?;

        if !angle.is_finite() {
            return Err("mirror angle must be finite".into());
        }

        Ok(Self::try_new(position, length)?.with_angle(angle))
    }
}

impl JsonDes for Target {
    /// ```json
    /// {
    ///     "type": "static" | "horizontal" | "vertical" | "figure_eight", // (optional, "static" if absent)
    ///     "center": [1000., 400.],
    ///     "radius": 30., // (optional)
    ///
    ///     // "horizontal" and "vertical" only: the extent of the motion
    ///     // along the axis, and the distance travelled per tick (optional)
    ///     "range": [900., 1100.],
    ///     "speed": 2.,
    ///
    ///     // "figure_eight" only, both optional: the half-extents of the
    ///     // figure, and the phase increment per tick in radians
    ///     "amplitude": [200., 100.],
    ///     "speed": 0.05
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let center = pair(json, "center")?;
        let radius = float_or(json, "radius", Self::DEFAULT_RADIUS)?;

        let target_type = match json.get("type") {
            Some(value) => value.as_str().ok_or("type must be a string")?,
            None => "static",
        };

        let oscillator = || -> Result<Oscillator, Box<dyn Error>> {
            let [min, max] = pair(json, "range")?;
            let speed = float_or(json, "speed", Oscillator::DEFAULT_SPEED)?;
            Ok(Oscillator::try_new(min, max, speed)?)
        };

        let motion = match target_type {
            "static" => Motion::Static,
            "horizontal" => Motion::Horizontal(oscillator()?),
            "vertical" => Motion::Vertical(oscillator()?),
            "figure_eight" => Motion::FigureEight(FigureEight::try_new(
                center,
                pair_or(json, "amplitude", FigureEight::DEFAULT_AMPLITUDE)?,
                float_or(json, "speed", FigureEight::DEFAULT_SPEED)?,
            )?),
            other => return Err(f!("invalid target type: {other}").into()),
        };

        Ok(Self::try_new(center, radius, motion)?)
    }
}

impl JsonDes for Rect {
    /// ```json
    /// {
    ///     "min": [500., 0.], // (the corner with the smallest coordinates)
    ///     "width": 40.,
    ///     "height": 300.
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let min = pair(json, "min")?;
        let width = float_or(json, "width", Float::NAN)?;
        let height = float_or(json, "height", Float::NAN)?;

        Ok(Self::try_new(min, width, height)?)
    }
}

impl JsonDes for LevelSpec {
    /// All fields are optional:
    ///
    /// ```json
    /// {
    ///     "mirror_limit": 99,
    ///     "time_limit": 0., // (seconds, 0 for none)
    ///     "targets": [...],
    ///     "obstacles": [...]
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let default = Self::default();

        let level = Self {
            mirror_limit: count_or(json, "mirror_limit", default.mirror_limit)?,
            time_limit_seconds: float_or(json, "time_limit", default.time_limit_seconds)?,
            targets: field_or_default(json, "targets")?,
            obstacles: field_or_default(json, "obstacles")?,
        };

        level.validate()?;
        Ok(level)
    }
}

impl JsonDes for Scene {
    /// ```json
    /// {
    ///     "config": {...}, // (optional)
    ///     "source": {...}, // (optional)
    ///     "level": {...},
    ///     "mirrors": [...] // (optional, the mirrors already placed)
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let level = LevelSpec::from_json(json.get("level").ok_or("Missing level")?)?;

        let mut scene = Self::try_new(
            field_or_default(json, "config")?,
            field_or_default(json, "source")?,
            level,
        )?;

        let mirrors: Vec<Mirror> = field_or_default(json, "mirrors")?;
        for mirror in mirrors {
            scene.add_mirror(mirror)?;
        }

        Ok(scene)
    }
}

/// A snapshot of `scene` as last traced: the current tick, the traced paths,
/// and the targets' state.
pub fn serialize_frame(scene: &Scene) -> serde_json::Value {
    serde_json::json!({
        "tick": scene.tick(),
        "rays": scene.rays().to_json(),
        "targets": scene.targets().to_json(),
        "complete": scene.all_targets_hit(),
    })
}
