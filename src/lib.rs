//! Cardframe presents a single media item as a two-sided framed card.
//!
//! A theme (a `config.json` descriptor plus optional frame images) decides the look of each
//! face and where content slots sit on it. The crate turns that descriptor into concrete
//! geometry for whatever rectangle the host provides, and keeps the flip and tilt state.
//!
//! # Pipeline overview
//!
//! 1. **Normalize**: `RawThemeDescriptor -> NormalizedConfig` (defaults, paths, conventions)
//! 2. **Load**: frame and content images are probed concurrently through an [`AssetResolver`]
//! 3. **Resolve**: `NormalizedConfig + LoadedAssets -> ResolvedDimensions`
//! 4. **Layout**: `ResolvedDimensions + viewport -> CardLayout` (containment, faces, slots)
//! 5. **Present**: [`PresentationController`] mounts the layout into a [`CardScene`]
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Headless**: the host paints [`CardScene`]; fetching, image probing and markdown are
//!   injected capabilities.
//! - **Explicit time**: timers run off host-supplied [`Millis`] via `advance(now)`.
//! - **Forgiving input**: malformed themes and missing assets degrade to defaults; only a
//!   missing mount container is an error.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod assets;
mod config;
mod foundation;
mod layout;
mod markup;
mod present;
mod viewer;

pub use assets::resolver::{AssetResolver, FsResolver, ImageInfo, MemoryResolver};
pub use assets::store::{AssetSlot, LoadedAsset, LoadedAssets, load_assets};
pub use config::descriptor::{RawContentArea, RawSide, RawThemeDescriptor};
pub use config::dimension::{DimensionValue, parse_dimension};
pub use config::field::Field;
pub use config::model::{
    ContentAreaConfig, DEFAULT_BACKGROUND, Fit, NormalizedConfig, Position, SideConfig,
};
pub use config::normalize::{ConventionWarning, check_conventions, normalize, resolve_asset_path};
pub use foundation::core::{AreaId, Millis, Point, Rect, Side, Size, Vec2, checked_rect};
pub use foundation::error::{CardError, CardResult};
pub use layout::dimensions::{
    FALLBACK_HEIGHT, FALLBACK_WIDTH, ResolvedDimensions, resolve_dimensions,
};
pub use layout::engine::{
    AreaLayout, CardLayout, FaceLayout, FaceLayouts, FacePaint, compute_layout,
    containment_scale, css_property_name,
};
pub use markup::capability::{MarkdownRenderer, MarkupCapability, escape_html, plain_text};
pub use markup::inline::InlineMarkdown;
pub use present::content::{ConfigureOptions, ContentBody, ContentItem};
pub use present::controller::{
    Container, ControllerOptions, Phase, PresentationController, PresentationState,
    THEME_CONFIG_FILE,
};
pub use present::scene::{CardScene, FaceSurface, SlotContent, SlotHandle, SlotTable};
pub use present::tilt::{PointerKind, Tilt, pointer_offset, tilt_for_offset};
pub use viewer::shell::{
    MediaItem, OVERLAY_TRANSITION_MS, OverlayState, Viewer, ViewerHook, ViewerOptions,
    description_markdown,
};
