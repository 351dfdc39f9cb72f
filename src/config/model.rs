use std::collections::BTreeMap;

use crate::{
    config::{dimension::DimensionValue, field::Field},
    foundation::core::{AreaId, Side},
};

/// Background used when a side does not configure one.
pub const DEFAULT_BACKGROUND: &str = "#f5f5f5";

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Fully defaulted settings for one face.
pub struct SideConfig {
    /// Absolute frame image URL, if configured.
    pub image: Option<String>,
    /// Never empty; [`DEFAULT_BACKGROUND`] when not authored.
    pub background: String,
    /// Positive natural width, or unset / cleared pending dimension resolution.
    pub width: Field<f64>,
    /// Positive natural height, or unset / cleared pending dimension resolution.
    pub height: Field<f64>,
}

impl Default for SideConfig {
    fn default() -> Self {
        Self {
            image: None,
            background: DEFAULT_BACKGROUND.to_string(),
            width: Field::Unset,
            height: Field::Unset,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Anchor of content inside its slot.
pub enum Position {
    /// Anchor to the top edge.
    Top,
    /// Anchor to the bottom edge.
    Bottom,
    /// Anchor to the left edge.
    Left,
    /// Anchor to the right edge.
    Right,
    /// Center in both axes.
    #[default]
    Center,
}

impl Position {
    /// Parse a position keyword.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "center" => Some(Self::Center),
            _ => None,
        }
    }

    /// `object-position` keyword.
    pub fn css_keyword(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// How content fills its slot.
pub enum Fit {
    /// Scale to fit entirely inside the slot.
    #[default]
    Contain,
    /// Scale to cover the slot, cropping overflow.
    Cover,
    /// Distort to fill the slot exactly.
    Stretch,
}

impl Fit {
    /// Parse a fit keyword.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contain" => Some(Self::Contain),
            "cover" => Some(Self::Cover),
            "stretch" => Some(Self::Stretch),
            _ => None,
        }
    }

    /// `object-fit` keyword.
    pub fn css_keyword(self) -> &'static str {
        match self {
            Self::Contain => "contain",
            Self::Cover => "cover",
            Self::Stretch => "fill",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Fully defaulted content-area settings.
pub struct ContentAreaConfig {
    /// Unique area id.
    pub area: AreaId,
    /// Owning face.
    pub side: Side,
    /// Left edge, relative to the owning face's natural size.
    pub x: DimensionValue,
    /// Top edge, relative to the owning face's natural size.
    pub y: DimensionValue,
    /// Width, relative to the owning face's natural size.
    pub width: DimensionValue,
    /// Height, relative to the owning face's natural size.
    pub height: DimensionValue,
    /// Content anchor.
    pub position: Position,
    /// Content fitting mode.
    pub fit: Fit,
    /// Authored presentation properties (names as authored).
    pub style: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Immutable, fully resolved theme configuration.
pub struct NormalizedConfig {
    /// Theme base URL, always ending in `/` unless empty.
    pub base_url: String,
    /// Front face settings.
    pub front: SideConfig,
    /// Back face settings (dependent sizes already inherited from front).
    pub back: SideConfig,
    /// Content areas in authored order, ids unique.
    #[serde(rename = "contentArea")]
    pub content_areas: Vec<ContentAreaConfig>,
}

impl NormalizedConfig {
    /// Settings for `side`.
    pub fn side(&self, side: Side) -> &SideConfig {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }

    /// Look up an area by id.
    pub fn area(&self, id: AreaId) -> Option<&ContentAreaConfig> {
        self.content_areas.iter().find(|a| a.area == id)
    }
}
