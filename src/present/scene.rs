use std::collections::BTreeMap;

use crate::{
    config::model::{Fit, Position},
    foundation::core::{AreaId, Rect, Side, Size},
    layout::engine::{AreaLayout, CardLayout, FaceLayout, FacePaint},
    present::tilt::Tilt,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
/// What a slot currently shows.
pub enum SlotContent {
    /// Nothing mounted.
    #[default]
    Empty,
    /// Image element. `natural` is `None` when the image failed to load.
    Image {
        /// Image URL.
        src: String,
        /// Alternative text.
        alt: Option<String>,
        /// Natural size when loaded.
        natural: Option<Size>,
    },
    /// Rendered, sanitized markup.
    Markup {
        /// Markup string.
        html: String,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Owned handle for one mounted content area.
pub struct SlotHandle {
    /// Element id (`area-<id>`).
    pub element_id: String,
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
    /// Authored style, kebab-case names.
    pub style: BTreeMap<String, String>,
    /// Mounted content.
    pub content: SlotContent,
    /// Configure revision that created the handle.
    pub created_revision: u64,
    /// Configure revision that last filled it.
    pub filled_revision: u64,
}

impl SlotHandle {
    fn new(area: &AreaLayout, revision: u64) -> Self {
        Self {
            element_id: area.area.element_id(),
            area: area.area,
            side: area.side,
            rect: area.rect,
            fit: area.fit,
            position: area.position,
            style: BTreeMap::new(),
            content: SlotContent::Empty,
            created_revision: revision,
            filled_revision: revision,
        }
    }

    fn apply_geometry(&mut self, area: &AreaLayout) {
        self.side = area.side;
        self.rect = area.rect;
        self.fit = area.fit;
        self.position = area.position;
        self.style = area.style.clone();
    }

    /// Inline style for the slot element: geometry, fitting, then authored properties.
    pub fn inline_style(&self) -> BTreeMap<String, String> {
        let mut out = rect_style(self.rect);
        if matches!(self.content, SlotContent::Image { .. }) {
            out.insert("object-fit".to_string(), self.fit.css_keyword().to_string());
            out.insert(
                "object-position".to_string(),
                self.position.css_keyword().to_string(),
            );
        }
        for (k, v) in &self.style {
            out.insert(k.clone(), v.clone());
        }
        out
    }
}

/// Mapping from area id to its owned slot handle.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct SlotTable {
    slots: BTreeMap<AreaId, SlotHandle>,
}

impl SlotTable {
    /// Handle for `area`.
    pub fn get(&self, area: AreaId) -> Option<&SlotHandle> {
        self.slots.get(&area)
    }

    /// Handles in area-id order.
    pub fn iter(&self) -> impl Iterator<Item = &SlotHandle> {
        self.slots.values()
    }

    /// Number of mounted slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Element ids in area-id order.
    pub fn element_ids(&self) -> Vec<String> {
        self.slots.values().map(|s| s.element_id.clone()).collect()
    }

    /// The one routine that creates, reuses, clears and fills slots.
    ///
    /// Afterwards there is exactly one handle per laid-out area; handles for areas that still
    /// exist are reused, stale ones are dropped, and every handle holds `fills[id]` or nothing.
    pub(crate) fn rebuild(
        &mut self,
        layout: &CardLayout,
        mut fills: BTreeMap<AreaId, SlotContent>,
        revision: u64,
    ) {
        self.slots.retain(|id, _| layout.areas.contains_key(id));
        for (id, area) in &layout.areas {
            let handle = self
                .slots
                .entry(*id)
                .or_insert_with(|| SlotHandle::new(area, revision));
            handle.apply_geometry(area);
            handle.content = fills.remove(id).unwrap_or_default();
            handle.filled_revision = revision;
        }
    }

    pub(crate) fn relayout(&mut self, layout: &CardLayout) {
        for (id, handle) in self.slots.iter_mut() {
            if let Some(area) = layout.areas.get(id) {
                handle.apply_geometry(area);
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        for handle in self.slots.values_mut() {
            handle.content = SlotContent::Empty;
            handle.style.clear();
        }
    }

    pub(crate) fn drain(&mut self) {
        self.slots.clear();
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One face surface of the mounted card.
pub struct FaceSurface {
    /// Which face.
    pub side: Side,
    /// Pixel rect in card-local coordinates.
    pub rect: Rect,
    /// Fill, when laid out.
    pub paint: Option<FacePaint>,
    /// Inline presentation properties.
    pub inline_style: BTreeMap<String, String>,
}

impl FaceSurface {
    fn new(side: Side) -> Self {
        Self {
            side,
            rect: Rect::ZERO,
            paint: None,
            inline_style: BTreeMap::new(),
        }
    }

    fn apply(&mut self, face: &FaceLayout) {
        self.rect = face.rect;
        self.paint = Some(face.paint.clone());
        let mut style = rect_style(face.rect);
        match &face.paint {
            FacePaint::Frame { url } => {
                style.insert("background-image".to_string(), format!("url(\"{url}\")"));
                style.insert("background-size".to_string(), "100% 100%".to_string());
            }
            FacePaint::Background { value } => {
                style.insert("background".to_string(), value.clone());
            }
        }
        self.inline_style = style;
    }

    fn clear(&mut self) {
        self.paint = None;
        self.inline_style.clear();
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Owned presentation subtree painted by the host.
pub struct CardScene {
    /// Host container element id.
    pub container_id: String,
    /// Card rect in container coordinates; the perspective viewport.
    pub card: Rect,
    /// Whether the back face is showing.
    pub flipped: bool,
    /// Whether the card is visible.
    pub visible: bool,
    /// Applied perspective tilt.
    pub tilt: Tilt,
    /// Front face.
    pub front: FaceSurface,
    /// Back face.
    pub back: FaceSurface,
    /// Content slots.
    pub slots: SlotTable,
}

impl CardScene {
    pub(crate) fn new(container_id: String) -> Self {
        Self {
            container_id,
            card: Rect::ZERO,
            flipped: false,
            visible: false,
            tilt: Tilt::NEUTRAL,
            front: FaceSurface::new(Side::Front),
            back: FaceSurface::new(Side::Back),
            slots: SlotTable::default(),
        }
    }

    /// Face surface for `side`.
    pub fn face(&self, side: Side) -> &FaceSurface {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }

    /// Data attributes for the card element, consumed by the host stylesheet.
    pub fn data_attributes(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("data-flipped", self.flipped.to_string()),
            ("data-visible", self.visible.to_string()),
        ])
    }

    pub(crate) fn mount(
        &mut self,
        layout: &CardLayout,
        fills: BTreeMap<AreaId, SlotContent>,
        revision: u64,
    ) {
        self.apply_geometry(layout);
        self.slots.rebuild(layout, fills, revision);
    }

    pub(crate) fn relayout(&mut self, layout: &CardLayout) {
        self.apply_geometry(layout);
        self.slots.relayout(layout);
    }

    pub(crate) fn clear_content(&mut self) {
        self.front.clear();
        self.back.clear();
        self.slots.clear();
    }

    pub(crate) fn unmount(&mut self) {
        self.clear_content();
        self.slots.drain();
        self.card = Rect::ZERO;
        self.tilt = Tilt::NEUTRAL;
        self.flipped = false;
        self.visible = false;
    }

    fn apply_geometry(&mut self, layout: &CardLayout) {
        self.card = layout.card;
        self.front.apply(&layout.faces.front);
        self.back.apply(&layout.faces.back);
    }
}

fn rect_style(rect: Rect) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("left".to_string(), px(rect.x0)),
        ("top".to_string(), px(rect.y0)),
        ("width".to_string(), px(rect.width())),
        ("height".to_string(), px(rect.height())),
    ])
}

fn px(v: f64) -> String {
    format!("{}px", (v * 1000.0).round() / 1000.0)
}

#[cfg(test)]
#[path = "../../tests/unit/present/scene.rs"]
mod tests;
