use std::collections::BTreeMap;

use crate::{
    assets::store::{AssetSlot, LoadedAssets},
    config::{
        dimension::parse_dimension,
        model::{ContentAreaConfig, Fit, NormalizedConfig, Position},
    },
    foundation::core::{AreaId, Point, Rect, Side, Size},
    layout::dimensions::ResolvedDimensions,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
/// What fills a face rectangle.
pub enum FacePaint {
    /// Frame image stretched to exactly fill the face rect.
    Frame {
        /// Loaded frame URL.
        url: String,
    },
    /// Configured color or gradient.
    Background {
        /// CSS background value.
        value: String,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Geometry and paint for one face.
pub struct FaceLayout {
    /// Which face.
    pub side: Side,
    /// Natural (unscaled) size.
    pub natural: Size,
    /// Uniform scale from natural size to pixels.
    pub scale: f64,
    /// Pixel rect in card-local coordinates, centered in the card.
    pub rect: Rect,
    /// Fill.
    pub paint: FacePaint,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Per-face layout results, threaded into slot geometry.
pub struct FaceLayouts {
    /// Front face.
    pub front: FaceLayout,
    /// Back face.
    pub back: FaceLayout,
}

impl FaceLayouts {
    /// Layout for `side`.
    pub fn get(&self, side: Side) -> &FaceLayout {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Geometry and presentation for one content slot.
pub struct AreaLayout {
    /// Area id.
    pub area: AreaId,
    /// Owning face.
    pub side: Side,
    /// Pixel rect in face-local coordinates.
    pub rect: Rect,
    /// Content fitting mode.
    pub fit: Fit,
    /// Content anchor.
    pub position: Position,
    /// Presentation properties with kebab-case names.
    pub style: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Complete layout for one viewport.
pub struct CardLayout {
    /// Viewport the card was fitted into.
    pub viewport: Rect,
    /// Uniform containment scale of the card.
    pub scale: f64,
    /// Card pixel rect in viewport coordinates (the perspective viewport).
    pub card: Rect,
    /// Per-face results.
    pub faces: FaceLayouts,
    /// Per-area results.
    pub areas: BTreeMap<AreaId, AreaLayout>,
}

/// Largest uniform scale that fits `content` inside `container`. Zero for degenerate input.
pub fn containment_scale(container: Size, content: Size) -> f64 {
    if !(content.width > 0.0 && content.height > 0.0) {
        return 0.0;
    }
    let s = (container.width / content.width).min(container.height / content.height);
    if s.is_finite() && s > 0.0 { s } else { 0.0 }
}

/// Compute card, face and slot geometry for `viewport`.
#[tracing::instrument(skip(config, dims, assets))]
pub fn compute_layout(
    config: &NormalizedConfig,
    dims: &ResolvedDimensions,
    assets: &LoadedAssets,
    viewport: Rect,
) -> CardLayout {
    let vp = viewport.size();
    let scale = containment_scale(vp, dims.card);
    let card_px = Size::new(
        (dims.card.width * scale).min(vp.width),
        (dims.card.height * scale).min(vp.height),
    );
    let card = Rect::from_origin_size(
        Point::new(
            viewport.x0 + (vp.width - card_px.width) * 0.5,
            viewport.y0 + (vp.height - card_px.height) * 0.5,
        ),
        card_px,
    );

    let faces = FaceLayouts {
        front: layout_face(config, assets, Side::Front, dims.front, card_px),
        back: layout_face(config, assets, Side::Back, dims.back, card_px),
    };

    let areas = config
        .content_areas
        .iter()
        .map(|a| (a.area, layout_area(a, faces.get(a.side))))
        .collect();

    CardLayout {
        viewport,
        scale,
        card,
        faces,
        areas,
    }
}

fn layout_face(
    config: &NormalizedConfig,
    assets: &LoadedAssets,
    side: Side,
    natural: Size,
    card_px: Size,
) -> FaceLayout {
    let scale = containment_scale(card_px, natural);
    let px = Size::new(
        (natural.width * scale).min(card_px.width),
        (natural.height * scale).min(card_px.height),
    );
    let rect = Rect::from_origin_size(
        Point::new(
            (card_px.width - px.width) * 0.5,
            (card_px.height - px.height) * 0.5,
        ),
        px,
    );

    let slot = match side {
        Side::Front => AssetSlot::FrontFrame,
        Side::Back => AssetSlot::BackFrame,
    };
    let side_cfg = config.side(side);
    let paint = match (&side_cfg.image, assets.get(slot)) {
        (Some(_), Some(frame)) => FacePaint::Frame {
            url: frame.url.clone(),
        },
        _ => FacePaint::Background {
            value: side_cfg.background.clone(),
        },
    };

    FaceLayout {
        side,
        natural,
        scale,
        rect,
        paint,
    }
}

fn layout_area(area: &ContentAreaConfig, face: &FaceLayout) -> AreaLayout {
    let nat = face.natural;
    let x = parse_dimension(&area.x, nat.width) * face.scale;
    let y = parse_dimension(&area.y, nat.height) * face.scale;
    let w = (parse_dimension(&area.width, nat.width) * face.scale).max(0.0);
    let h = (parse_dimension(&area.height, nat.height) * face.scale).max(0.0);

    AreaLayout {
        area: area.area,
        side: area.side,
        rect: Rect::from_origin_size(Point::new(x, y), Size::new(w, h)),
        fit: area.fit,
        position: area.position,
        style: area
            .style
            .iter()
            .map(|(k, v)| (css_property_name(k), v.clone()))
            .collect(),
    }
}

/// Translate an authored property name (`borderRadius`) into CSS form (`border-radius`).
///
/// Names already in kebab-case and custom properties (`--x`) pass through unchanged; vendor
/// prefixes gain a leading dash (`WebkitMask` / `msFlex` → `-webkit-mask` / `-ms-flex`).
pub fn css_property_name(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 4);
    if name.starts_with("ms") && name[2..].starts_with(|c: char| c.is_ascii_uppercase()) {
        out.push('-');
    }
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
