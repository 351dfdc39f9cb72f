use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::{assets::resolver::AssetResolver, foundation::core::Size};

/// Logical slot a loaded asset belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetSlot {
    /// Front frame image.
    FrontFrame,
    /// Back frame image.
    BackFrame,
    /// Image content item at this index of the content list.
    Content(usize),
}

impl std::fmt::Display for AssetSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FrontFrame => f.write_str("frontFrame"),
            Self::BackFrame => f.write_str("backFrame"),
            Self::Content(i) => write!(f, "content_{i}"),
        }
    }
}

impl serde::Serialize for AssetSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// An asset that resolved successfully, with its natural size.
pub struct LoadedAsset {
    /// Natural width in pixels (> 0).
    pub width: u32,
    /// Natural height in pixels (> 0).
    pub height: u32,
    /// URL the asset was loaded from.
    pub url: String,
}

impl LoadedAsset {
    /// Natural size as floating-point geometry.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
/// Assets loaded for one configuration. Missing entries are normal.
pub struct LoadedAssets {
    by_slot: BTreeMap<AssetSlot, LoadedAsset>,
}

impl LoadedAssets {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the asset for `slot`.
    pub fn insert(&mut self, slot: AssetSlot, asset: LoadedAsset) {
        self.by_slot.insert(slot, asset);
    }

    /// Asset for `slot`, if it loaded.
    pub fn get(&self, slot: AssetSlot) -> Option<&LoadedAsset> {
        self.by_slot.get(&slot)
    }

    /// First loaded content image by content-list index.
    pub fn first_content(&self) -> Option<&LoadedAsset> {
        self.by_slot
            .iter()
            .find(|(slot, _)| matches!(slot, AssetSlot::Content(_)))
            .map(|(_, a)| a)
    }

    /// Number of loaded assets.
    pub fn len(&self) -> usize {
        self.by_slot.len()
    }

    /// True when nothing loaded.
    pub fn is_empty(&self) -> bool {
        self.by_slot.is_empty()
    }

    /// Iterate loaded assets in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&AssetSlot, &LoadedAsset)> {
        self.by_slot.iter()
    }
}

/// Probe every requested image concurrently and join on all of them.
///
/// Unavailable or zero-sized images are left out; the join never aborts early.
#[tracing::instrument(skip(resolver, requests), fields(count = requests.len()))]
pub fn load_assets(resolver: &dyn AssetResolver, requests: Vec<(AssetSlot, String)>) -> LoadedAssets {
    let loaded: Vec<(AssetSlot, LoadedAsset)> = requests
        .into_par_iter()
        .filter_map(|(slot, url)| match resolver.probe_image(&url) {
            Some(info) if info.width > 0 && info.height > 0 => Some((
                slot,
                LoadedAsset {
                    width: info.width,
                    height: info.height,
                    url,
                },
            )),
            _ => {
                tracing::debug!(%slot, url = %url, "asset unavailable");
                None
            }
        })
        .collect();

    let mut out = LoadedAssets::new();
    for (slot, asset) in loaded {
        out.insert(slot, asset);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
