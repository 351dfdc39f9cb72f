use crate::foundation::error::{CardError, CardResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Host-supplied monotonic timestamp in milliseconds.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Timestamp `ms` milliseconds after `self` (saturating).
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// True once `self` has reached `deadline`.
    pub fn reached(self, deadline: Millis) -> bool {
        self.0 >= deadline.0
    }
}

/// One of the two presentation surfaces of a card.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Face shown when the card is not flipped.
    Front,
    /// Face shown after a flip.
    Back,
}

impl Side {
    /// Parse a side keyword (`"front"` / `"back"`, case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Some(Self::Front),
            "back" => Some(Self::Back),
            _ => None,
        }
    }

    /// Keyword used in descriptors and data attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content-area identifier, unique within one normalized config.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct AreaId(pub u32);

impl AreaId {
    /// Element id used for the slot that hosts this area (`area-<id>`).
    pub fn element_id(self) -> String {
        format!("area-{}", self.0)
    }
}

impl std::fmt::Display for AreaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate a host-supplied rectangle: finite coordinates and non-negative extent.
pub fn checked_rect(rect: Rect) -> CardResult<Rect> {
    let finite = [rect.x0, rect.y0, rect.x1, rect.y1]
        .iter()
        .all(|v| v.is_finite());
    if !finite {
        return Err(CardError::validation("rect coordinates must be finite"));
    }
    if rect.x1 < rect.x0 || rect.y1 < rect.y0 {
        return Err(CardError::validation("rect must have non-negative extent"));
    }
    Ok(rect)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
