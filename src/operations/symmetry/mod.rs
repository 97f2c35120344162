mod enforce_symmetry;

pub use enforce_symmetry::EnforceSymmetry;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Horizontal axes to mirror across.
///
/// `x` mirrors left-right (`x -> width - 1 - x`), `z` mirrors front-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "SymmetrySelector")]
pub struct SymmetryAxes {
    pub x: bool,
    pub z: bool,
}

impl SymmetryAxes {
    pub const NONE: Self = Self { x: false, z: false };
    pub const X: Self = Self { x: true, z: false };
    pub const Z: Self = Self { x: false, z: true };
    pub const BOTH: Self = Self { x: true, z: true };

    /// Boolean shorthand: `true` mirrors left-right only.
    ///
    /// Front-back detail is kept because it usually carries the object's
    /// recognizable features.
    #[must_use]
    pub const fn from_flag(enabled: bool) -> Self {
        if enabled {
            Self::X
        } else {
            Self::NONE
        }
    }

    /// Parses `none | x | z | both` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnresolvedAutoSymmetry` for `auto`, which callers
    /// must resolve to a concrete selector, and `ConfigError::UnknownSymmetry`
    /// for anything else.
    pub fn from_selector(selector: &str) -> Result<Self, ConfigError> {
        match selector.trim().to_ascii_lowercase().as_str() {
            "none" | "false" | "" => Ok(Self::NONE),
            "x" | "true" => Ok(Self::X),
            "z" => Ok(Self::Z),
            "both" | "xz" => Ok(Self::BOTH),
            "auto" => Err(ConfigError::UnresolvedAutoSymmetry),
            _ => Err(ConfigError::UnknownSymmetry(selector.to_owned())),
        }
    }

    /// Returns `true` if no axis is selected.
    #[must_use]
    pub const fn is_none(self) -> bool {
        !self.x && !self.z
    }
}

/// Accepted serialized forms of [`SymmetryAxes`].
#[derive(Deserialize)]
#[serde(untagged)]
enum SymmetrySelector {
    Flag(bool),
    Named(String),
    Axes {
        #[serde(default)]
        x: bool,
        #[serde(default)]
        z: bool,
    },
}

impl TryFrom<SymmetrySelector> for SymmetryAxes {
    type Error = ConfigError;

    fn try_from(value: SymmetrySelector) -> Result<Self, Self::Error> {
        match value {
            SymmetrySelector::Flag(flag) => Ok(Self::from_flag(flag)),
            SymmetrySelector::Named(name) => Self::from_selector(&name),
            SymmetrySelector::Axes { x, z } => Ok(Self { x, z }),
        }
    }
}
