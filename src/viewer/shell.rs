use std::sync::Arc;

use crate::{
    assets::resolver::AssetResolver,
    config::normalize::with_trailing_slash,
    foundation::{
        core::{Millis, Rect},
        error::{CardError, CardResult},
    },
    markup::capability::MarkupCapability,
    present::{
        content::{ConfigureOptions, ContentItem},
        controller::{Container, ControllerOptions, PresentationController},
    },
};

/// Duration of the overlay open and close transitions.
pub const OVERLAY_TRANSITION_MS: u64 = 300;

/// Notification callback fired when an overlay transition completes.
pub type ViewerHook = Box<dyn FnMut() + Send>;

/// Viewer wiring: element ids, base paths and notification hooks.
pub struct ViewerOptions {
    /// Id of the modal overlay element.
    pub overlay_id: String,
    /// Id of the element the card mounts into.
    pub container_id: String,
    /// Initial content rect of the card container.
    pub container_rect: Rect,
    /// Base path for original media files.
    pub media_base: String,
    /// Base path holding one directory per theme.
    pub theme_base: String,
    /// Theme used when an item names none.
    pub default_theme: String,
    /// Controller tunables.
    pub controller: ControllerOptions,
    /// Called once the open transition completes.
    pub on_open: Option<ViewerHook>,
    /// Called once the close transition completes.
    pub on_close: Option<ViewerHook>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            overlay_id: "card-overlay".to_string(),
            container_id: "card-container".to_string(),
            container_rect: Rect::new(0.0, 0.0, 800.0, 600.0),
            media_base: "/media".to_string(),
            theme_base: "/themes".to_string(),
            default_theme: "default".to_string(),
            controller: ControllerOptions::default(),
            on_open: None,
            on_close: None,
        }
    }
}

impl std::fmt::Debug for ViewerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewerOptions")
            .field("overlay_id", &self.overlay_id)
            .field("container_id", &self.container_id)
            .field("container_rect", &self.container_rect)
            .field("media_base", &self.media_base)
            .field("theme_base", &self.theme_base)
            .field("default_theme", &self.default_theme)
            .field("controller", &self.controller)
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One media item to present.
pub struct MediaItem {
    /// File name under the media base.
    pub filename: String,
    /// Title; also the image alt text.
    pub title: String,
    /// Body text (markdown).
    #[serde(default)]
    pub description: String,
    /// Trailing note rendered in emphasis.
    #[serde(default)]
    pub postscript: Option<String>,
    /// Theme directory name; the viewer default when absent.
    #[serde(default)]
    pub theme: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Modal overlay state.
pub enum OverlayState {
    /// Hidden.
    Closed,
    /// Open transition running until `done_at`.
    Opening {
        /// When the transition completes.
        done_at: Millis,
    },
    /// Shown.
    Open,
    /// Close transition running until `done_at`.
    Closing {
        /// When the transition completes.
        done_at: Millis,
    },
}

impl OverlayState {
    /// True while a transition is pending.
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Opening { .. } | Self::Closing { .. })
    }
}

/// Modal media viewer owning one [`PresentationController`], reused across items.
pub struct Viewer {
    overlay_id: String,
    media_base: String,
    theme_base: String,
    default_theme: String,
    on_open: Option<ViewerHook>,
    on_close: Option<ViewerHook>,
    overlay: OverlayState,
    attached: bool,
    controller: PresentationController,
}

impl std::fmt::Debug for Viewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewer")
            .field("overlay_id", &self.overlay_id)
            .field("overlay", &self.overlay)
            .field("attached", &self.attached)
            .field("controller", &self.controller)
            .finish()
    }
}

impl Viewer {
    /// Bind to the overlay and container described by `opts`.
    pub fn new(
        opts: ViewerOptions,
        resolver: Arc<dyn AssetResolver>,
        markup: Arc<MarkupCapability>,
    ) -> CardResult<Self> {
        if opts.overlay_id.trim().is_empty() {
            return Err(CardError::precondition("an overlay element must be supplied"));
        }
        let controller = PresentationController::new(
            Container::new(opts.container_id, opts.container_rect),
            resolver,
            markup,
            opts.controller,
        )?;
        Ok(Self {
            overlay_id: opts.overlay_id,
            media_base: opts.media_base,
            theme_base: opts.theme_base,
            default_theme: opts.default_theme,
            on_open: opts.on_open,
            on_close: opts.on_close,
            overlay: OverlayState::Closed,
            attached: true,
            controller,
        })
    }

    /// Present `item`. Ignored (returns `false`) while a transition is pending or after destroy.
    #[tracing::instrument(skip(self, item), fields(filename = %item.filename))]
    pub fn show(&mut self, item: &MediaItem, now: Millis) -> bool {
        if !self.attached {
            tracing::debug!("viewer destroyed; ignoring show");
            return false;
        }
        if self.overlay.is_transitioning() {
            tracing::debug!(state = ?self.overlay, "overlay busy; ignoring show");
            return false;
        }
        let options = self.configure_options(item);
        self.controller.configure(&options);
        self.controller.show();
        self.overlay = OverlayState::Opening {
            done_at: now.after(OVERLAY_TRANSITION_MS),
        };
        true
    }

    /// Start closing. The card is hidden (and reset to front) immediately.
    pub fn close(&mut self, now: Millis) -> bool {
        if !self.attached {
            return false;
        }
        match self.overlay {
            OverlayState::Closed | OverlayState::Closing { .. } => false,
            OverlayState::Opening { .. } | OverlayState::Open => {
                self.controller.hide();
                self.overlay = OverlayState::Closing {
                    done_at: now.after(OVERLAY_TRANSITION_MS),
                };
                true
            }
        }
    }

    /// Fire due controller timers and complete overlay transitions.
    pub fn advance(&mut self, now: Millis) {
        if !self.attached {
            return;
        }
        self.controller.advance(now);
        match self.overlay {
            OverlayState::Opening { done_at } if now.reached(done_at) => {
                self.overlay = OverlayState::Open;
                if let Some(hook) = self.on_open.as_mut() {
                    hook();
                }
            }
            OverlayState::Closing { done_at } if now.reached(done_at) => {
                self.overlay = OverlayState::Closed;
                if let Some(hook) = self.on_close.as_mut() {
                    hook();
                }
            }
            _ => {}
        }
    }

    /// Destroy the controller and detach from the overlay. Terminal.
    pub fn destroy(&mut self) {
        if !self.attached {
            return;
        }
        self.controller.destroy();
        self.overlay = OverlayState::Closed;
        self.on_open = None;
        self.on_close = None;
        self.attached = false;
        tracing::debug!(overlay = %self.overlay_id, "viewer detached");
    }

    /// Current overlay state.
    pub fn overlay(&self) -> OverlayState {
        self.overlay
    }

    /// Overlay element id.
    pub fn overlay_id(&self) -> &str {
        &self.overlay_id
    }

    /// True once the open transition has completed.
    pub fn is_open(&self) -> bool {
        self.overlay == OverlayState::Open
    }

    /// Whether the viewer is still bound to its overlay.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// The card controller.
    pub fn controller(&self) -> &PresentationController {
        &self.controller
    }

    /// The card controller, for forwarding flip, pointer and resize input.
    pub fn controller_mut(&mut self) -> &mut PresentationController {
        &mut self.controller
    }

    /// Contents and theme path for `item`.
    pub fn configure_options(&self, item: &MediaItem) -> ConfigureOptions {
        let theme = item
            .theme
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.default_theme);
        ConfigureOptions {
            theme_path: format!("{}{theme}", with_trailing_slash(&self.theme_base)),
            contents: vec![
                ContentItem::image(
                    0,
                    format!("{}{}", with_trailing_slash(&self.media_base), item.filename),
                    Some(item.title.clone()),
                ),
                ContentItem::text(1, description_markdown(item)),
            ],
        }
    }
}

/// Back-face markdown: strong title, description, emphasised postscript.
pub fn description_markdown(item: &MediaItem) -> String {
    let mut parts = Vec::with_capacity(3);
    if !item.title.trim().is_empty() {
        parts.push(format!("**{}**", item.title.trim()));
    }
    if !item.description.trim().is_empty() {
        parts.push(item.description.trim().to_string());
    }
    if let Some(ps) = item.postscript.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        parts.push(format!("_{ps}_"));
    }
    parts.join("\n\n")
}

#[cfg(test)]
#[path = "../../tests/unit/viewer/shell.rs"]
mod tests;
