use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::config::{dimension::DimensionValue, field::Field};

/// Raw per-side descriptor as authored in `config.json`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RawSide {
    /// Frame image URL or theme-relative path.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub image: Field<String>,
    /// CSS color or gradient used when no frame image is painted.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub background: Field<String>,
    /// Natural width; number or numeric string.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub width: Field<Value>,
    /// Natural height; number or numeric string.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub height: Field<Value>,
}

/// Raw content-area entry as authored in `config.json`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RawContentArea {
    /// Area identifier; integer or numeric string.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub area: Field<Value>,
    /// `"front"` or `"back"`.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub side: Field<String>,
    /// Left edge relative to the owning face.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub x: Field<DimensionValue>,
    /// Top edge relative to the owning face.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub y: Field<DimensionValue>,
    /// Slot width relative to the owning face.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub width: Field<DimensionValue>,
    /// Slot height relative to the owning face.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub height: Field<DimensionValue>,
    /// Content anchor inside the slot.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub position: Field<String>,
    /// Content fitting mode.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub fit: Field<String>,
    /// Presentation properties applied verbatim to the slot.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub style: Field<Map<String, Value>>,
}

/// Untrusted theme descriptor. Every part may be missing or malformed.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RawThemeDescriptor {
    /// Front side settings.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub front: Field<RawSide>,
    /// Back side settings.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub back: Field<RawSide>,
    /// Content-area list.
    #[serde(rename = "contentArea", skip_serializing_if = "Field::is_unset")]
    pub content_area: Field<Vec<RawContentArea>>,
}

impl RawThemeDescriptor {
    /// Decode leniently from parsed JSON.
    ///
    /// Every field is decoded on its own: a value of the wrong shape is reported and cleared
    /// while its siblings keep their authored values. A section that is not an object is
    /// cleared; a content-area entry that is not an object keeps its list position with no
    /// authored fields.
    pub fn from_value(value: &Value) -> Self {
        let obj = match value {
            Value::Object(obj) => obj,
            Value::Null => return Self::default(),
            other => {
                tracing::warn!(kind = json_kind(other), "theme descriptor is not an object");
                return Self::default();
            }
        };

        Self {
            front: decode_section(obj, "front"),
            back: decode_section(obj, "back"),
            content_area: decode_areas(obj),
        }
    }

    /// Parse descriptor text; a syntax error yields the empty descriptor.
    pub fn from_json_str(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(v) => Self::from_value(&v),
            Err(e) => {
                tracing::warn!(error = %e, "theme descriptor is not valid JSON");
                Self::default()
            }
        }
    }
}

fn decode_section(obj: &Map<String, Value>, key: &'static str) -> Field<RawSide> {
    match obj.get(key) {
        None => Field::Unset,
        Some(Value::Null) => Field::Cleared,
        Some(Value::Object(side)) => Field::Value(RawSide {
            image: decode_field(side, "image", key),
            background: decode_field(side, "background", key),
            width: decode_field(side, "width", key),
            height: decode_field(side, "height", key),
        }),
        Some(other) => {
            tracing::warn!(section = key, kind = json_kind(other), "ignoring malformed side descriptor");
            Field::Cleared
        }
    }
}

fn decode_areas(obj: &Map<String, Value>) -> Field<Vec<RawContentArea>> {
    match obj.get("contentArea") {
        None => Field::Unset,
        Some(Value::Null) => Field::Cleared,
        Some(Value::Array(items)) => Field::Value(
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| decode_area(idx, item))
                .collect(),
        ),
        Some(other) => {
            tracing::warn!(kind = json_kind(other), "contentArea is not a list");
            Field::Cleared
        }
    }
}

fn decode_area(idx: usize, item: &Value) -> RawContentArea {
    let Value::Object(entry) = item else {
        tracing::warn!(index = idx, kind = json_kind(item), "ignoring malformed content area");
        return RawContentArea::default();
    };
    let section = "contentArea";
    RawContentArea {
        area: decode_field(entry, "area", section),
        side: decode_field(entry, "side", section),
        x: decode_field(entry, "x", section),
        y: decode_field(entry, "y", section),
        width: decode_field(entry, "width", section),
        height: decode_field(entry, "height", section),
        position: decode_field(entry, "position", section),
        fit: decode_field(entry, "fit", section),
        style: decode_field(entry, "style", section),
    }
}

/// Decode one key on its own; a value of the wrong shape is cleared, not fatal to its siblings.
fn decode_field<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    key: &'static str,
    section: &'static str,
) -> Field<T> {
    match obj.get(key) {
        None => Field::Unset,
        Some(Value::Null) => Field::Cleared,
        Some(v) => match T::deserialize(v) {
            Ok(t) => Field::Value(t),
            Err(e) => {
                tracing::warn!(section, field = key, error = %e, "ignoring malformed field");
                Field::Cleared
            }
        },
    }
}

pub(crate) fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/descriptor.rs"]
mod tests;
