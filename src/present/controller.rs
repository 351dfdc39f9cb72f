use std::{collections::BTreeMap, sync::Arc};

use crate::{
    assets::{
        resolver::AssetResolver,
        store::{AssetSlot, LoadedAssets, load_assets},
    },
    config::{
        descriptor::RawThemeDescriptor,
        model::NormalizedConfig,
        normalize::{normalize, with_trailing_slash},
    },
    foundation::{
        core::{AreaId, Millis, Point, Rect, Vec2, checked_rect},
        error::{CardError, CardResult},
    },
    layout::{
        dimensions::{ResolvedDimensions, resolve_dimensions},
        engine::{CardLayout, compute_layout},
    },
    markup::capability::MarkupCapability,
    present::{
        content::{ConfigureOptions, ContentBody, ContentItem},
        scene::{CardScene, SlotContent},
        tilt::{PointerKind, Tilt, pointer_offset, tilt_for_offset},
    },
};

/// Name of the descriptor file inside a theme directory.
pub const THEME_CONFIG_FILE: &str = "config.json";

/// Tunables for [`PresentationController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerOptions {
    /// Maximum tilt in degrees for mouse input.
    pub max_tilt_mouse_deg: f64,
    /// Maximum tilt in degrees for touch input.
    pub max_tilt_touch_deg: f64,
    /// Flip transition duration; flips are refused until it elapses.
    pub flip_duration_ms: u64,
    /// Quiet window before a resize triggers relayout.
    pub resize_debounce_ms: u64,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            max_tilt_mouse_deg: 10.0,
            max_tilt_touch_deg: 20.0,
            flip_duration_ms: 600,
            resize_debounce_ms: 100,
        }
    }
}

/// Host element the card is mounted into.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    /// Element id; must be non-empty.
    pub id: String,
    /// Current content rect of the element.
    pub rect: Rect,
}

impl Container {
    /// Container `id` with content rect `rect`.
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Coarse lifecycle phase.
///
/// There is no separate unmounted or loading phase. Construction binds the container, so
/// a controller always exists mounted. `configure` loads and mounts before it returns, so
/// loading is never observable between calls.
pub enum Phase {
    /// Constructed, never configured.
    Idle,
    /// Configured, front face showing.
    Ready,
    /// Configured, back face showing.
    Flipped,
    /// Terminal.
    Destroyed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Presentation flags owned by the controller.
pub struct PresentationState {
    /// Back face showing.
    pub is_flipped: bool,
    /// Flip transition in progress.
    pub is_animating: bool,
    /// At least one configure has completed.
    pub is_initialized: bool,
    /// Card shown.
    pub is_visible: bool,
    /// Last pointer offset from the viewport center (fractions of half extents).
    pub last_pointer: Option<Vec2>,
}

#[derive(Clone, Copy, Debug)]
struct PendingResize {
    rect: Rect,
    due: Millis,
}

#[derive(Clone, Debug)]
struct Resolved {
    config: NormalizedConfig,
    dims: ResolvedDimensions,
    assets: LoadedAssets,
    layout: CardLayout,
}

/// Stateful driver for one framed card.
///
/// The host feeds it configuration, timestamps, resize and pointer events, and paints
/// [`PresentationController::scene`]. Timers fire from [`PresentationController::advance`];
/// coalesced tilt is applied from [`PresentationController::animation_frame`].
pub struct PresentationController {
    resolver: Arc<dyn AssetResolver>,
    markup: Arc<MarkupCapability>,
    opts: ControllerOptions,
    container_rect: Rect,
    state: PresentationState,
    destroyed: bool,
    revision: u64,
    resolved: Option<Resolved>,
    scene: CardScene,
    flip_settles_at: Option<Millis>,
    pending_resize: Option<PendingResize>,
    observing_resize: bool,
    pending_tilt: Option<Tilt>,
}

impl std::fmt::Debug for PresentationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationController")
            .field("container", &self.scene.container_id)
            .field("phase", &self.phase())
            .field("state", &self.state)
            .field("revision", &self.revision)
            .finish()
    }
}

impl PresentationController {
    /// Create a controller bound to `container`.
    ///
    /// Fails only when no container is supplied (empty id) or its rect is invalid.
    pub fn new(
        container: Container,
        resolver: Arc<dyn AssetResolver>,
        markup: Arc<MarkupCapability>,
        opts: ControllerOptions,
    ) -> CardResult<Self> {
        if container.id.trim().is_empty() {
            return Err(CardError::precondition("a mount container must be supplied"));
        }
        let rect = checked_rect(container.rect)?;
        Ok(Self {
            resolver,
            markup,
            opts,
            container_rect: rect,
            state: PresentationState::default(),
            destroyed: false,
            revision: 0,
            resolved: None,
            scene: CardScene::new(container.id),
            flip_settles_at: None,
            pending_resize: None,
            observing_resize: false,
            pending_tilt: None,
        })
    }

    /// Load the theme and contents, lay out, and mount.
    ///
    /// The first call performs full initialization. Later calls update in place: flip state
    /// is reset, content and inline styles are cleared, then everything is reloaded and the
    /// existing slot handles are refilled.
    #[tracing::instrument(skip(self, options), fields(theme = %options.theme_path))]
    pub fn configure(&mut self, options: &ConfigureOptions) {
        if !self.alive("configure") {
            return;
        }
        if self.state.is_initialized {
            self.cancel_flip();
            self.state.is_flipped = false;
            self.scene.flipped = false;
            self.clear_tilt();
            self.scene.clear_content();
        }

        let base = with_trailing_slash(&options.theme_path);
        let config_url = format!("{base}{THEME_CONFIG_FILE}");
        let descriptor = match self.resolver.fetch_json(&config_url) {
            Some(v) => RawThemeDescriptor::from_value(&v),
            None => {
                tracing::warn!(url = %config_url, "theme config unavailable; using defaults");
                RawThemeDescriptor::default()
            }
        };
        let config = normalize(&descriptor, &base);

        let matched = match_contents(&config, &options.contents);
        let assets = load_assets(self.resolver.as_ref(), asset_requests(&config, &matched));
        let dims = resolve_dimensions(&config, &assets);
        let layout = compute_layout(&config, &dims, &assets, self.container_rect);

        self.revision += 1;
        let fills = self.fills(&matched, &assets);
        self.scene.mount(&layout, fills, self.revision);

        self.resolved = Some(Resolved {
            config,
            dims,
            assets,
            layout,
        });
        if !self.state.is_initialized {
            tracing::debug!("controller initialized");
        }
        self.state.is_initialized = true;
        self.observing_resize = true;
    }

    /// Toggle the visible face. Refused (returns `false`) while a flip is animating.
    pub fn flip(&mut self, now: Millis) -> bool {
        if !self.alive("flip") || !self.state.is_initialized {
            return false;
        }
        if self.state.is_animating {
            tracing::debug!("flip dropped; animation in progress");
            return false;
        }
        self.clear_tilt();
        self.state.is_flipped = !self.state.is_flipped;
        self.scene.flipped = self.state.is_flipped;
        self.state.is_animating = true;
        self.flip_settles_at = Some(now.after(self.opts.flip_duration_ms));
        true
    }

    /// Snap to the front face without animating.
    pub fn reset(&mut self) {
        if !self.alive("reset") {
            return;
        }
        self.cancel_flip();
        self.state.is_flipped = false;
        self.scene.flipped = false;
    }

    /// Make the card visible.
    pub fn show(&mut self) {
        if !self.alive("show") {
            return;
        }
        self.state.is_visible = true;
        self.scene.visible = true;
    }

    /// Hide the card and reset to the front face.
    pub fn hide(&mut self) {
        if !self.alive("hide") {
            return;
        }
        self.state.is_visible = false;
        self.scene.visible = false;
        self.clear_tilt();
        self.reset();
    }

    /// Tear down: cancel pending work, detach from resize, unmount. Terminal.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.pending_tilt = None;
        self.pending_resize = None;
        self.observing_resize = false;
        self.flip_settles_at = None;
        self.scene.unmount();
        self.resolved = None;
        self.state = PresentationState {
            is_initialized: self.state.is_initialized,
            ..PresentationState::default()
        };
        self.destroyed = true;
        tracing::debug!("controller destroyed");
    }

    /// Fire timers that are due at `now`.
    pub fn advance(&mut self, now: Millis) {
        if !self.alive("advance") {
            return;
        }
        if let Some(at) = self.flip_settles_at {
            if now.reached(at) {
                self.flip_settles_at = None;
                self.state.is_animating = false;
            }
        }
        if let Some(p) = self.pending_resize {
            if now.reached(p.due) {
                self.pending_resize = None;
                self.apply_resize(p.rect);
            }
        }
    }

    /// Resize-observer callback. Relayout happens once the debounce window passes quietly.
    pub fn resize(&mut self, rect: Rect, now: Millis) -> CardResult<()> {
        let rect = checked_rect(rect)?;
        if !self.alive("resize") {
            return Ok(());
        }
        if !self.observing_resize {
            self.container_rect = rect;
            return Ok(());
        }
        self.pending_resize = Some(PendingResize {
            rect,
            due: now.after(self.opts.resize_debounce_ms),
        });
        Ok(())
    }

    /// Pointer or touch moved over the card. Suspended while a flip animates.
    pub fn pointer_move(&mut self, pointer: Point, kind: PointerKind) {
        if !self.alive("pointer_move") || !self.state.is_initialized || self.state.is_animating {
            return;
        }
        let Some(offset) = pointer_offset(self.scene.card, pointer) else {
            return;
        };
        let max = match kind {
            PointerKind::Mouse => self.opts.max_tilt_mouse_deg,
            PointerKind::Touch => self.opts.max_tilt_touch_deg,
        };
        self.state.last_pointer = Some(offset);
        self.pending_tilt = Some(tilt_for_offset(offset, max));
    }

    /// Pointer left the card or the touch ended: back to neutral.
    pub fn pointer_leave(&mut self) {
        if !self.alive("pointer_leave") {
            return;
        }
        self.clear_tilt();
    }

    /// True when a tilt update is waiting for the next frame.
    pub fn wants_animation_frame(&self) -> bool {
        self.pending_tilt.is_some()
    }

    /// Frame callback: apply at most one coalesced tilt. Returns whether anything changed.
    pub fn animation_frame(&mut self) -> bool {
        if self.destroyed || self.state.is_animating {
            self.pending_tilt = None;
            return false;
        }
        match self.pending_tilt.take() {
            Some(t) => {
                self.scene.tilt = t;
                true
            }
            None => false,
        }
    }

    /// Coarse lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.destroyed {
            Phase::Destroyed
        } else if !self.state.is_initialized {
            Phase::Idle
        } else if self.state.is_flipped {
            Phase::Flipped
        } else {
            Phase::Ready
        }
    }

    /// Current flags.
    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    /// Whether the card is visible.
    pub fn is_visible(&self) -> bool {
        self.state.is_visible
    }

    /// Whether the back face is showing.
    pub fn is_flipped(&self) -> bool {
        self.state.is_flipped
    }

    /// Whether a flip is animating.
    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    /// Whether a configure has completed.
    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized
    }

    /// Whether [`PresentationController::destroy`] was called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Mounted presentation subtree.
    pub fn scene(&self) -> &CardScene {
        &self.scene
    }

    /// Current container rect.
    pub fn container_rect(&self) -> Rect {
        self.container_rect
    }

    /// Normalized config from the last configure.
    pub fn config(&self) -> Option<&NormalizedConfig> {
        self.resolved.as_ref().map(|r| &r.config)
    }

    /// Dimensions from the last configure.
    pub fn dimensions(&self) -> Option<&ResolvedDimensions> {
        self.resolved.as_ref().map(|r| &r.dims)
    }

    /// Current layout.
    pub fn layout(&self) -> Option<&CardLayout> {
        self.resolved.as_ref().map(|r| &r.layout)
    }

    /// Assets loaded by the last configure.
    pub fn assets(&self) -> Option<&LoadedAssets> {
        self.resolved.as_ref().map(|r| &r.assets)
    }

    fn alive(&self, op: &'static str) -> bool {
        if self.destroyed {
            tracing::debug!(op, "controller destroyed; ignoring");
        }
        !self.destroyed
    }

    fn cancel_flip(&mut self) {
        self.flip_settles_at = None;
        self.state.is_animating = false;
    }

    fn clear_tilt(&mut self) {
        self.pending_tilt = None;
        self.scene.tilt = Tilt::NEUTRAL;
    }

    fn apply_resize(&mut self, rect: Rect) {
        self.container_rect = rect;
        let Some(resolved) = self.resolved.as_mut() else {
            return;
        };
        resolved.layout = compute_layout(&resolved.config, &resolved.dims, &resolved.assets, rect);
        self.scene.relayout(&resolved.layout);
    }

    fn fills(
        &self,
        matched: &[(usize, &ContentItem)],
        assets: &LoadedAssets,
    ) -> BTreeMap<AreaId, SlotContent> {
        matched
            .iter()
            .map(|(idx, item)| {
                let content = match &item.body {
                    ContentBody::Image { src, alt } => SlotContent::Image {
                        src: src.clone(),
                        alt: alt.clone(),
                        natural: assets.get(AssetSlot::Content(*idx)).map(|a| a.size()),
                    },
                    ContentBody::Text { content } => SlotContent::Markup {
                        html: self.markup.render(content),
                    },
                };
                (item.area, content)
            })
            .collect()
    }
}

/// Pair each content item with its list index, dropping items with no matching area and
/// repeats for an area already filled.
fn match_contents<'a>(
    config: &NormalizedConfig,
    contents: &'a [ContentItem],
) -> Vec<(usize, &'a ContentItem)> {
    let mut taken = std::collections::BTreeSet::new();
    let mut out = Vec::with_capacity(contents.len());
    for (idx, item) in contents.iter().enumerate() {
        if config.area(item.area).is_none() {
            tracing::warn!(area = %item.area, "no content area for item; dropping");
            continue;
        }
        if !taken.insert(item.area) {
            tracing::warn!(area = %item.area, "area already has content; dropping item");
            continue;
        }
        out.push((idx, item));
    }
    out
}

fn asset_requests(
    config: &NormalizedConfig,
    matched: &[(usize, &ContentItem)],
) -> Vec<(AssetSlot, String)> {
    let mut out = Vec::new();
    if let Some(url) = &config.front.image {
        out.push((AssetSlot::FrontFrame, url.clone()));
    }
    if let Some(url) = &config.back.image {
        out.push((AssetSlot::BackFrame, url.clone()));
    }
    for (idx, item) in matched {
        if let ContentBody::Image { src, .. } = &item.body {
            out.push((AssetSlot::Content(*idx), src.clone()));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/present/controller.rs"]
mod tests;
