use crate::{
    assets::store::{AssetSlot, LoadedAssets},
    config::{field::Field, model::NormalizedConfig},
    foundation::core::Size,
};

/// Width used when neither config nor assets provide one.
pub const FALLBACK_WIDTH: f64 = 800.0;
/// Height used when neither config nor assets provide one.
pub const FALLBACK_HEIGHT: f64 = 600.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Natural sizes for both faces and the card.
pub struct ResolvedDimensions {
    /// Front face natural size.
    pub front: Size,
    /// Back face natural size.
    pub back: Size,
    /// Card natural size; always equal to `front`.
    pub card: Size,
}

/// Resolve natural sizes.
///
/// Front, per axis: explicit config → front frame image → first loaded content image →
/// [`FALLBACK_WIDTH`]×[`FALLBACK_HEIGHT`]. Back, per axis: explicit config → front's resolved
/// value; an explicitly cleared back axis consults the back frame image before falling back
/// to front.
#[tracing::instrument(skip_all)]
pub fn resolve_dimensions(config: &NormalizedConfig, assets: &LoadedAssets) -> ResolvedDimensions {
    let frame = assets.get(AssetSlot::FrontFrame).map(|a| a.size());
    let content = assets.first_content().map(|a| a.size());

    let front = Size::new(
        explicit(&config.front.width)
            .or(frame.map(|s| s.width))
            .or(content.map(|s| s.width))
            .unwrap_or(FALLBACK_WIDTH),
        explicit(&config.front.height)
            .or(frame.map(|s| s.height))
            .or(content.map(|s| s.height))
            .unwrap_or(FALLBACK_HEIGHT),
    );

    let back_frame = assets.get(AssetSlot::BackFrame).map(|a| a.size());
    let back = Size::new(
        back_axis(&config.back.width, back_frame.map(|s| s.width), front.width),
        back_axis(&config.back.height, back_frame.map(|s| s.height), front.height),
    );

    ResolvedDimensions {
        front,
        back,
        card: front,
    }
}

fn explicit(field: &Field<f64>) -> Option<f64> {
    field.get().filter(|v| v.is_finite() && *v > 0.0)
}

fn back_axis(field: &Field<f64>, back_frame: Option<f64>, front: f64) -> f64 {
    match field {
        Field::Value(_) => explicit(field).unwrap_or(front),
        Field::Cleared => back_frame.unwrap_or(front),
        Field::Unset => front,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/dimensions.rs"]
mod tests;
