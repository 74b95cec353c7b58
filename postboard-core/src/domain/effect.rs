//! Image effects that can be applied after upload

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Effect applied to an uploaded image by a background job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    #[default]
    None,
    Grayscale,
    Invert,
}

impl Effect {
    /// Every selectable effect, in form order
    pub const ALL: [Effect; 3] = [Effect::None, Effect::Grayscale, Effect::Invert];

    /// Wire name of the effect
    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::None => "none",
            Effect::Grayscale => "grayscale",
            Effect::Invert => "invert",
        }
    }

    /// Human-readable label for form controls
    pub fn label(&self) -> &'static str {
        match self {
            Effect::None => "None",
            Effect::Grayscale => "Grayscale",
            Effect::Invert => "Invert",
        }
    }

    /// Whether choosing this effect spawns a background job
    pub fn requires_job(&self) -> bool {
        !matches!(self, Effect::None)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Effect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Effect::None),
            "grayscale" => Ok(Effect::Grayscale),
            "invert" => Ok(Effect::Invert),
            other => Err(format!(
                "unknown effect '{}' (expected none, grayscale or invert)",
                other
            )),
        }
    }
}
