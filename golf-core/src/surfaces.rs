//! Ground surface presets and YAML surface loader.
//!
//! A [`GroundSurface`] is the only thing the bounce and roll model knows
//! about the turf. Three presets are compiled in; further surfaces can be
//! loaded from a directory of YAML files:
//!
//! ```text
//! surfaces/
//! ├── fairway.yaml
//! ├── green.yaml
//! └── rough.yaml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;

/// Names of the compiled-in presets.
pub const PRESET_NAMES: [&str; 3] = ["fairway", "rough", "green"];

/// Lowest accepted turf friction. A sliding ball loses slip at
/// `3.5 * mu * g`, so this bounds how long it can slide before rolling.
pub const MIN_FRICTION: f64 = 0.1;

/// Error type for surface loading operations.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("surface not found: {0}")]
    NotFound(String),

    #[error("invalid surface {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Turf properties for ground contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundSurface {
    pub name: String,

    /// Normal coefficient of restitution for a vertical impact
    pub restitution: f64,

    /// Coulomb friction coefficient between ball and turf
    pub friction: f64,

    /// Rolling resistance, as a fraction of g
    pub rolling_resistance: f64,
}

impl GroundSurface {
    pub fn new(name: impl Into<String>, restitution: f64, friction: f64, rolling_resistance: f64) -> Self {
        Self {
            name: name.into(),
            restitution,
            friction,
            rolling_resistance,
        }
    }

    /// Closely mown fairway grass.
    pub fn fairway() -> Self {
        Self::new("fairway", 0.40, 0.50, 0.30)
    }

    /// Longer grass: dead bounce, high grip, short roll.
    pub fn rough() -> Self {
        Self::new("rough", 0.25, 0.70, 0.60)
    }

    /// Putting surface: soft landing, grippy enough for spin-back, fast roll.
    pub fn green() -> Self {
        Self::new("green", 0.35, 0.60, 0.20)
    }

    /// Look up a compiled-in preset by name (case-insensitive).
    pub fn preset(name: &str) -> Result<Self, SurfaceError> {
        match name.to_ascii_lowercase().as_str() {
            "fairway" => Ok(Self::fairway()),
            "rough" => Ok(Self::rough()),
            "green" => Ok(Self::green()),
            _ => Err(SurfaceError::NotFound(name.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_range("surface restitution", self.restitution, 0.0, 1.0)?;
        ValidationError::check_range("surface friction", self.friction, MIN_FRICTION, 2.0)?;
        ValidationError::check_range(
            "surface rolling resistance",
            self.rolling_resistance,
            0.0,
            1.0,
        )
    }
}

impl Default for GroundSurface {
    fn default() -> Self {
        Self::fairway()
    }
}

/// Surface loader with configurable base directory.
pub struct SurfaceLoader {
    base_path: PathBuf,
}

impl SurfaceLoader {
    /// Create a new loader reading `<base_path>/<name>.yaml`.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a surface by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = SurfaceLoader::new("surfaces");
    /// let green = loader.load("green")?;
    /// ```
    pub fn load(&self, name: &str) -> Result<GroundSurface, SurfaceError> {
        let path = self.base_path.join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(SurfaceError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let surface: GroundSurface = serde_yaml::from_str(&contents)?;
        surface.validate().map_err(|err| SurfaceError::Invalid {
            name: name.to_string(),
            reason: err.to_string(),
        })?;
        Ok(surface)
    }

    /// List all available surfaces, sorted by name.
    pub fn list(&self) -> Result<Vec<String>, SurfaceError> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let file_name = entry?.file_name();
            let name = file_name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".yaml") {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
