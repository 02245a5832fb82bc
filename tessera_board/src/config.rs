// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Board configuration and its TOML/JSON loaders.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tessera_index::{DEFAULT_CELL_SIZE, ExtentPolicy};

use crate::error::{BoardError, BoardResult};
use crate::viewport::ZoomLimits;

#[allow(dead_code, reason = "Mirror of a foreign enum for serde; never constructed.")]
#[derive(Serialize, Deserialize)]
#[serde(remote = "ExtentPolicy", rename_all = "snake_case")]
enum ExtentPolicyDef {
    Normalized,
    Raw,
}

/// Tunables for a [`Board`](crate::Board).
///
/// Every field has a default, so a partial file only overrides what it names:
///
/// ```toml
/// cell_size = 250.0
/// extent_policy = "raw"
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Edge length of a spatial index cell in world units.
    pub cell_size: f64,
    /// How boxes with negative width or height are indexed and hit-tested.
    #[serde(with = "ExtentPolicyDef")]
    pub extent_policy: ExtentPolicy,
    /// World-space margin added around an element's box when hit-testing.
    pub hit_margin: f64,
    /// Scale change per wheel event.
    pub zoom_step: f64,
    /// Smallest allowed scale.
    pub min_scale: f64,
    /// Largest allowed scale.
    pub max_scale: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            extent_policy: ExtentPolicy::Normalized,
            hit_margin: 5.0,
            zoom_step: 0.1,
            min_scale: 0.1,
            max_scale: 5.0,
        }
    }
}

impl BoardConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> BoardResult<()> {
        let fail = |reason: &str| {
            Err(BoardError::InvalidConfig {
                reason: reason.to_owned(),
            })
        };
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return fail("cell_size must be finite and positive");
        }
        if !(self.hit_margin.is_finite() && self.hit_margin >= 0.0) {
            return fail("hit_margin must be finite and non-negative");
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            return fail("zoom_step must be finite and positive");
        }
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return fail("min_scale must be finite and positive");
        }
        if !(self.max_scale.is_finite() && self.max_scale >= self.min_scale) {
            return fail("max_scale must be finite and at least min_scale");
        }
        Ok(())
    }

    /// Zoom step and clamp range as one value.
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            step: self.zoom_step,
            min: self.min_scale,
            max: self.max_scale,
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> BoardResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> BoardResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, choosing TOML for `.toml` files and JSON otherwise.
    pub fn load(path: impl AsRef<Path>) -> BoardResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)?;
        let config = if path.extension().is_some_and(|e| e == "toml") {
            Self::from_toml_str(&s)?
        } else {
            Self::from_json_str(&s)?
        };
        log::info!("loaded board configuration from {}", path.display());
        Ok(config)
    }
}
