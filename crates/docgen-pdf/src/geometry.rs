//! Page sizes and margins, in PDF points (1/72 inch).

use serde::{Deserialize, Serialize};

/// Supported paper sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// 210 x 297 mm.
    #[default]
    A4,
    /// 8.5 x 11 in.
    Letter,
}

impl PageSize {
    pub fn width(self) -> f32 {
        match self {
            PageSize::A4 => 595.275_6,
            PageSize::Letter => 612.0,
        }
    }

    pub fn height(self) -> f32 {
        match self {
            PageSize::A4 => 841.889_8,
            PageSize::Letter => 792.0,
        }
    }
}

/// Distance from each page edge to the text frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 72.0,
            right: 72.0,
            top: 72.0,
            bottom: 18.0,
        }
    }
}
