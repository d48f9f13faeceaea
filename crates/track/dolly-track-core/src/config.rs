//! Evaluation configuration for dolly-track-core.

use serde::{Deserialize, Serialize};

use crate::error::TrackError;

/// Tunables for track evaluation.
/// Defaults reproduce the stock camera behaviour; hosts rarely need to touch them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exponent applied to the distance between spline control points.
    pub spline_tension: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spline_tension: 0.6,
        }
    }
}

impl Config {
    /// Read a configuration from JSON; absent fields keep their defaults.
    pub fn from_json(s: &str) -> Result<Self, TrackError> {
        Ok(serde_json::from_str(s)?)
    }
}
