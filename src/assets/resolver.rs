use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context;
use serde_json::Value;

use crate::config::normalize::has_scheme;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Natural pixel size reported by an image probe.
pub struct ImageInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Host capability for fetching theme descriptors and probing images.
///
/// Implementations never fail the caller: anything unavailable is `None`.
pub trait AssetResolver: Send + Sync {
    /// Fetch and parse a JSON document.
    fn fetch_json(&self, url: &str) -> Option<Value>;

    /// Report the natural size of an image.
    fn probe_image(&self, url: &str) -> Option<ImageInfo>;
}

/// In-memory resolver keyed by exact URL. Records every request it serves.
#[derive(Debug, Default)]
pub struct MemoryResolver {
    json: HashMap<String, Value>,
    images: HashMap<String, ImageInfo>,
    requests: Mutex<Vec<String>>,
}

impl MemoryResolver {
    /// Empty resolver: every lookup is unavailable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a JSON document at `url`.
    pub fn with_json(mut self, url: impl Into<String>, value: Value) -> Self {
        self.json.insert(url.into(), value);
        self
    }

    /// Register an image of `width`×`height` at `url`.
    pub fn with_image(mut self, url: impl Into<String>, width: u32, height: u32) -> Self {
        self.images.insert(url.into(), ImageInfo { width, height });
        self
    }

    /// URLs requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        match self.requests.lock() {
            Ok(r) => r.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, url: &str) {
        match self.requests.lock() {
            Ok(mut r) => r.push(url.to_string()),
            Err(poisoned) => poisoned.into_inner().push(url.to_string()),
        }
    }
}

impl AssetResolver for MemoryResolver {
    fn fetch_json(&self, url: &str) -> Option<Value> {
        self.record(url);
        self.json.get(url).cloned()
    }

    fn probe_image(&self, url: &str) -> Option<ImageInfo> {
        self.record(url);
        self.images.get(url).copied()
    }
}

/// Resolver backed by a directory on disk.
///
/// Relative and `/`-rooted URLs are resolved under `root`; `file://` URLs are used as-is;
/// other schemes are reported unavailable.
#[derive(Clone, Debug)]
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    /// Resolver rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used for relative URLs.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, url: &str) -> Option<PathBuf> {
        if let Some(rest) = url.strip_prefix("file://") {
            return Some(PathBuf::from(rest));
        }
        if has_scheme(url) {
            return None;
        }
        Some(self.root.join(url.trim_start_matches('/')))
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read theme descriptor '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse json '{}'", path.display()))
}

impl AssetResolver for FsResolver {
    fn fetch_json(&self, url: &str) -> Option<Value> {
        let path = self.path_for(url)?;
        match read_json(&path) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::debug!(url, error = %format!("{e:#}"), "json unavailable");
                None
            }
        }
    }

    fn probe_image(&self, url: &str) -> Option<ImageInfo> {
        let path = self.path_for(url)?;
        match image::image_dimensions(&path) {
            Ok((width, height)) => Some(ImageInfo { width, height }),
            Err(e) => {
                tracing::debug!(url, error = %e, "image unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
