//! Run settings, usually read from a RON file:
//!
//! ```ron
//! (
//!     render: (frame_count: 64, mode: Full),
//!     looping: (step_limit: Some(10000)),
//! )
//! ```

use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub looping: LoopConfig,
}

impl Config {
    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn to_ron(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, Default::default())?)
    }
}

/// How frames after the first are produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameMode {
    /// Only the wires that changed, drawn over a blank raster.
    #[default]
    Diff,
    /// The previous frame with changed wires drawn over it.
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub frame_count: usize,
    pub mode: FrameMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_count: 32,
            mode: FrameMode::Diff,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// `None` searches until a state repeats.
    pub step_limit: Option<usize>,
}
