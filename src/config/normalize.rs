use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value};

use crate::{
    config::{
        descriptor::{RawContentArea, RawSide, RawThemeDescriptor, json_kind},
        dimension::DimensionValue,
        field::Field,
        model::{
            ContentAreaConfig, DEFAULT_BACKGROUND, Fit, NormalizedConfig, Position, SideConfig,
        },
    },
    foundation::core::{AreaId, Side},
};

/// Structural convention violations found in a normalized config. Never fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConventionWarning {
    /// The conventional area id is not present at all.
    MissingArea {
        /// Expected area id.
        area: AreaId,
        /// Side the area is expected on.
        expected: Side,
    },
    /// The conventional area exists but sits on the other face.
    WrongSide {
        /// Offending area id.
        area: AreaId,
        /// Side the area is expected on.
        expected: Side,
        /// Side it was configured on.
        found: Side,
    },
}

impl std::fmt::Display for ConventionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingArea { area, expected } => {
                write!(f, "content area {area} is missing (expected on {expected})")
            }
            Self::WrongSide {
                area,
                expected,
                found,
            } => write!(
                f,
                "content area {area} should be on {expected} but is on {found}"
            ),
        }
    }
}

/// Produce a fully defaulted, path-rewritten configuration from an untrusted descriptor.
///
/// Never fails: every field has a safe default and convention violations are only logged.
#[tracing::instrument(skip(raw))]
pub fn normalize(raw: &RawThemeDescriptor, theme_base_url: &str) -> NormalizedConfig {
    let base_url = with_trailing_slash(theme_base_url);

    let front = normalize_side(raw.front.value(), Side::Front, &base_url);
    let mut back = normalize_side(raw.back.value(), Side::Back, &base_url);

    // Single-level: front never depends on back. Explicitly cleared back axes stay cleared.
    if back.width.is_unset() {
        if let Some(w) = front.width.get() {
            back.width = Field::Value(w);
        }
    }
    if back.height.is_unset() {
        if let Some(h) = front.height.get() {
            back.height = Field::Value(h);
        }
    }

    let content_areas = match raw.content_area.value() {
        Some(list) if !list.is_empty() => normalize_areas(list),
        _ => normalize_areas(&[RawContentArea::default(), RawContentArea::default()]),
    };

    let config = NormalizedConfig {
        base_url,
        front,
        back,
        content_areas,
    };
    for w in check_conventions(&config) {
        tracing::warn!("{w}");
    }
    config
}

/// Check the area-0-on-front / area-1-on-back convention.
pub fn check_conventions(config: &NormalizedConfig) -> Vec<ConventionWarning> {
    [(AreaId(0), Side::Front), (AreaId(1), Side::Back)]
        .into_iter()
        .filter_map(|(area, expected)| match config.area(area) {
            None => Some(ConventionWarning::MissingArea { area, expected }),
            Some(a) if a.side != expected => Some(ConventionWarning::WrongSide {
                area,
                expected,
                found: a.side,
            }),
            Some(_) => None,
        })
        .collect()
}

/// Resolve a theme image reference against the theme base URL.
///
/// URLs with a scheme (`https://…`, `data:`, `blob:`) and absolute paths are kept; a leading
/// `./` is stripped; anything else is joined onto the base.
pub fn resolve_asset_path(path: &str, base_url: &str) -> String {
    if has_scheme(path) || path.starts_with('/') {
        return path.to_string();
    }
    let base = with_trailing_slash(base_url);
    let rel = path.strip_prefix("./").unwrap_or(path);
    format!("{base}{rel}")
}

pub(crate) fn with_trailing_slash(base: &str) -> String {
    if base.is_empty() || base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    }
}

pub(crate) fn has_scheme(path: &str) -> bool {
    let Some((scheme, rest)) = path.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid {
        return false;
    }
    let scheme = scheme.to_ascii_lowercase();
    rest.starts_with("//") || scheme == "data" || scheme == "blob"
}

fn normalize_side(raw: Option<&RawSide>, side: Side, base_url: &str) -> SideConfig {
    let Some(raw) = raw else {
        return SideConfig::default();
    };

    let image = raw
        .image
        .value()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| resolve_asset_path(s, base_url));

    let background = raw
        .background
        .value()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BACKGROUND)
        .to_string();

    SideConfig {
        image,
        background,
        width: normalize_size(&raw.width, side, "width"),
        height: normalize_size(&raw.height, side, "height"),
    }
}

fn normalize_size(raw: &Field<Value>, side: Side, axis: &'static str) -> Field<f64> {
    let v = match raw {
        Field::Unset => return Field::Unset,
        Field::Cleared => return Field::Cleared,
        Field::Value(v) => v,
    };
    let parsed = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let t = s.trim();
            let t = t.strip_suffix("px").unwrap_or(t);
            t.trim().parse::<f64>().ok()
        }
        _ => None,
    };
    match parsed {
        Some(px) if px.is_finite() && px > 0.0 => Field::Value(px),
        _ => {
            tracing::warn!(%side, axis, value = %v, "side size must be a positive number; ignoring");
            Field::Cleared
        }
    }
}

fn normalize_areas(list: &[RawContentArea]) -> Vec<ContentAreaConfig> {
    let mut seen = HashSet::<AreaId>::new();
    let mut out = Vec::with_capacity(list.len());
    for (idx, raw) in list.iter().enumerate() {
        let area = normalize_area(raw, idx);
        if !seen.insert(area.area) {
            tracing::warn!(area = %area.area, index = idx, "duplicate content area id; dropping");
            continue;
        }
        out.push(area);
    }
    out
}

struct AreaDefaults {
    side: Side,
    rect: [f64; 4],
}

fn area_defaults(idx: usize) -> AreaDefaults {
    if idx == 0 {
        AreaDefaults {
            side: Side::Front,
            rect: [0.0, 0.0, 1.0, 1.0],
        }
    } else {
        AreaDefaults {
            side: Side::Back,
            rect: [0.1, 0.1, 0.8, 0.8],
        }
    }
}

fn normalize_area(raw: &RawContentArea, idx: usize) -> ContentAreaConfig {
    let defaults = area_defaults(idx);
    let positional = AreaId(u32::try_from(idx).unwrap_or(u32::MAX));

    let area = match &raw.area {
        Field::Value(v) => parse_area_id(v).unwrap_or_else(|| {
            tracing::warn!(index = idx, value = %v, "invalid area id; using list position");
            positional
        }),
        Field::Unset | Field::Cleared => positional,
    };

    let side = keyword(&raw.side, "side", idx, Side::parse).unwrap_or(defaults.side);
    let position = keyword(&raw.position, "position", idx, Position::parse).unwrap_or_default();
    let fit = keyword(&raw.fit, "fit", idx, Fit::parse).unwrap_or_default();

    let dim = |f: &Field<DimensionValue>, default: f64| {
        f.value()
            .cloned()
            .unwrap_or(DimensionValue::Number(default))
    };
    let [dx, dy, dw, dh] = defaults.rect;

    ContentAreaConfig {
        area,
        side,
        x: dim(&raw.x, dx),
        y: dim(&raw.y, dy),
        width: dim(&raw.width, dw),
        height: dim(&raw.height, dh),
        position,
        fit,
        style: raw
            .style
            .value()
            .map(|m| normalize_style(m, area))
            .unwrap_or_default(),
    }
}

/// Non-negative whole numbers, including float spellings such as `1.0` or `"2"`.
fn parse_area_id(v: &Value) -> Option<AreaId> {
    let raw = match v {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole_number)),
        Value::String(s) => {
            let t = s.trim();
            t.parse::<u64>()
                .ok()
                .or_else(|| t.parse::<f64>().ok().and_then(whole_number))
        }
        _ => None,
    }?;
    u32::try_from(raw).ok().map(AreaId)
}

fn whole_number(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX)).then_some(f as u64)
}

fn keyword<T>(
    raw: &Field<String>,
    name: &'static str,
    idx: usize,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let s = raw.value()?;
    let parsed = parse(s);
    if parsed.is_none() {
        tracing::warn!(index = idx, field = name, value = %s, "unknown keyword; using default");
    }
    parsed
}

fn normalize_style(map: &Map<String, Value>, area: AreaId) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (k, v) in map {
        let value = match v {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                tracing::warn!(%area, property = %k, kind = json_kind(other), "unsupported style value");
                continue;
            }
        };
        out.insert(k.clone(), value);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/config/normalize.rs"]
mod tests;
