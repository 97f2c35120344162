use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::model::MAX_UNSPLIT;
use crate::operations::symmetry::SymmetryAxes;

/// Parameters shared by the packing, placement and pipeline operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildParams {
    /// Largest side a footprint may have on both axes. Wider footprints are
    /// split and packed bricks keep at least one side within this limit.
    pub max_unsplit: u32,
    /// Optional cap on a packed brick's long side.
    pub max_length: Option<u32>,
    /// Axes mirrored by the model pipeline.
    pub symmetry: SymmetryAxes,
}

impl Default for BuildParams {
    fn default() -> Self {
        Self {
            max_unsplit: MAX_UNSPLIT,
            max_length: None,
            symmetry: SymmetryAxes::NONE,
        }
    }
}

impl BuildParams {
    /// Creates parameters with the given footprint limit.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` if `max_unsplit` is zero.
    pub fn new(max_unsplit: u32) -> Result<Self> {
        let params = Self {
            max_unsplit,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    /// Caps the long side of packed bricks.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` if `max_length` is smaller
    /// than `max_unsplit`.
    pub fn with_max_length(mut self, max_length: u32) -> Result<Self> {
        self.max_length = Some(max_length);
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_symmetry(mut self, symmetry: SymmetryAxes) -> Self {
        self.symmetry = symmetry;
        self
    }

    /// Parses and validates parameters from JSON. Missing fields take
    /// their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` describing the first bad value.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.max_unsplit == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "max_unsplit",
                reason: "must be at least 1".to_owned(),
            });
        }
        if let Some(max_length) = self.max_length {
            if max_length < self.max_unsplit {
                return Err(ConfigError::InvalidParameter {
                    parameter: "max_length",
                    reason: format!("{max_length} is below max_unsplit {}", self.max_unsplit),
                });
            }
        }
        Ok(())
    }
}
