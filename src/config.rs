//! Engine configuration: defaults, environment overrides, and JSON loading.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::animator::TravelFraming;
use crate::consts::{
    DEFAULT_ADD_THRESHOLD, DEFAULT_ANIMATION_MS, DEFAULT_FIRST_WAYPOINT_OFFSET, DEFAULT_HIT_RADIUS, DEFAULT_MAX_SCALE,
    DEFAULT_PAN_SLACK, DEFAULT_SAMPLE_COUNT, DEFAULT_TRAVEL_SCALE, MAX_SAMPLES, MIN_SAMPLES,
};
use crate::projector::CurveProjector;

/// Errors produced while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment value could not be parsed as a number / flag.
    #[error("invalid value for {key}: {value:?}")]
    InvalidNumber { key: String, value: String },

    /// A value parsed but lies outside its allowed range.
    #[error("{key} out of range: {reason}")]
    InvalidRange { key: &'static str, reason: String },

    /// A JSON config document could not be deserialized.
    #[error("config parse failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunables recognised by the engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Zoom floor. `None` uses the fit scale; smaller values are raised to it.
    pub min_scale: Option<f64>,
    /// Zoom ceiling.
    pub max_scale: f64,
    /// World-space pick radius for selecting or dragging a waypoint.
    pub hit_radius: f64,
    /// World-space distance from the path within which a tap adds a waypoint.
    pub add_threshold: f64,
    /// Travel animation duration in milliseconds.
    pub animation_duration_ms: f64,
    /// Projector sampling density.
    pub sample_count: usize,
    /// Newton-refine projector results.
    pub refine_projection: bool,
    /// Screen pixels content may be panned past the frame edge.
    pub pan_slack: f64,
    /// Travel target scale as a multiple of the minimum scale.
    pub travel_scale: f64,
    /// World distance the camera backs off from the first waypoint.
    pub first_waypoint_offset: f64,
    /// Start a travel animation when a tap selects a waypoint.
    pub travel_on_select: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_scale: None,
            max_scale: DEFAULT_MAX_SCALE,
            hit_radius: DEFAULT_HIT_RADIUS,
            add_threshold: DEFAULT_ADD_THRESHOLD,
            animation_duration_ms: DEFAULT_ANIMATION_MS,
            sample_count: DEFAULT_SAMPLE_COUNT,
            refine_projection: false,
            pan_slack: DEFAULT_PAN_SLACK,
            travel_scale: DEFAULT_TRAVEL_SCALE,
            first_waypoint_offset: DEFAULT_FIRST_WAYPOINT_OFFSET,
            travel_on_select: true,
        }
    }
}

impl EngineConfig {
    /// Build config from `TRAILMAP_*` environment variables over the defaults.
    ///
    /// Optional:
    /// - `TRAILMAP_MIN_SCALE`, `TRAILMAP_MAX_SCALE`
    /// - `TRAILMAP_HIT_RADIUS`, `TRAILMAP_ADD_THRESHOLD`
    /// - `TRAILMAP_ANIMATION_MS`, `TRAILMAP_SAMPLE_COUNT`, `TRAILMAP_REFINE`
    /// - `TRAILMAP_PAN_SLACK`, `TRAILMAP_TRAVEL_SCALE`, `TRAILMAP_FIRST_OFFSET`
    /// - `TRAILMAP_TRAVEL_ON_SELECT`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Some(v) = parse_var(&lookup, "TRAILMAP_MIN_SCALE")? {
            cfg.min_scale = Some(v);
        }
        if let Some(v) = parse_var(&lookup, "TRAILMAP_MAX_SCALE")? {
            cfg.max_scale = v;
        }
        if let Some(v) = parse_var(&lookup, "TRAILMAP_HIT_RADIUS")? {
            cfg.hit_radius = v;
        }
        if let Some(v) = parse_var(&lookup, "TRAILMAP_ADD_THRESHOLD")? {
            cfg.add_threshold = v;
        }
        if let Some(v) = parse_var(&lookup, "TRAILMAP_ANIMATION_MS")? {
            cfg.animation_duration_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "TRAILMAP_SAMPLE_COUNT")? {
            cfg.sample_count = v;
        }
        if let Some(v) = parse_var(&lookup, "TRAILMAP_REFINE")? {
            cfg.refine_projection = v;
        }
        if let Some(v) = parse_var(&lookup, "TRAILMAP_PAN_SLACK")? {
            cfg.pan_slack = v;
        }
        if let Some(v) = parse_var(&lookup, "TRAILMAP_TRAVEL_SCALE")? {
            cfg.travel_scale = v;
        }
        if let Some(v) = parse_var(&lookup, "TRAILMAP_FIRST_OFFSET")? {
            cfg.first_waypoint_offset = v;
        }
        if let Some(v) = parse_var(&lookup, "TRAILMAP_TRAVEL_ON_SELECT")? {
            cfg.travel_on_select = v;
        }
        cfg.validate()
    }

    /// Parse a JSON document; absent keys take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()
    }

    /// Check ranges. `sample_count` is clamped into `[MIN_SAMPLES, MAX_SAMPLES]`
    /// rather than rejected; every other violation is an error.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if let Some(min) = self.min_scale {
            require(min.is_finite() && min > 0.0, "min_scale", || format!("must be positive, got {min}"))?;
        }
        let max = self.max_scale;
        require(max.is_finite() && max > 0.0, "max_scale", || format!("must be positive, got {max}"))?;
        let hit = self.hit_radius;
        require(hit.is_finite() && hit >= 0.0, "hit_radius", || format!("must be >= 0, got {hit}"))?;
        let add = self.add_threshold;
        require(add.is_finite() && add >= 0.0, "add_threshold", || format!("must be >= 0, got {add}"))?;
        let ms = self.animation_duration_ms;
        require(ms.is_finite() && ms > 0.0, "animation_duration_ms", || format!("must be positive, got {ms}"))?;
        let slack = self.pan_slack;
        require(slack.is_finite() && slack >= 0.0, "pan_slack", || format!("must be >= 0, got {slack}"))?;
        let travel = self.travel_scale;
        require(travel.is_finite() && travel > 0.0, "travel_scale", || format!("must be positive, got {travel}"))?;
        let offset = self.first_waypoint_offset;
        require(offset.is_finite(), "first_waypoint_offset", || format!("must be finite, got {offset}"))?;
        self.sample_count = self.sample_count.clamp(MIN_SAMPLES, MAX_SAMPLES);
        Ok(self)
    }

    /// Projector built from `sample_count` and `refine_projection`.
    #[must_use]
    pub fn projector(&self) -> CurveProjector {
        CurveProjector::new(self.sample_count).with_refinement(self.refine_projection)
    }

    /// Travel framing built from `travel_scale` and `first_waypoint_offset`.
    #[must_use]
    pub fn framing(&self) -> TravelFraming {
        TravelFraming { scale_factor: self.travel_scale, first_offset: self.first_waypoint_offset }
    }
}

fn require(ok: bool, key: &'static str, reason: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if ok { Ok(()) } else { Err(ConfigError::InvalidRange { key, reason: reason() }) }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber { key: key.to_owned(), value: raw.clone() })
}
