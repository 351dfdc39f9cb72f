use crate::foundation::core::AreaId;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
/// Payload of a content item.
pub enum ContentBody {
    /// Image mounted into the slot.
    Image {
        /// Absolute image URL.
        src: String,
        /// Alternative text.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    /// Markdown text rendered through the markup capability.
    Text {
        /// Markdown source.
        content: String,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Caller-supplied content for one area.
pub struct ContentItem {
    /// Target area id.
    pub area: AreaId,
    /// Payload.
    #[serde(flatten)]
    pub body: ContentBody,
}

impl ContentItem {
    /// Image item for `area`.
    pub fn image(area: u32, src: impl Into<String>, alt: Option<String>) -> Self {
        Self {
            area: AreaId(area),
            body: ContentBody::Image {
                src: src.into(),
                alt,
            },
        }
    }

    /// Markdown text item for `area`.
    pub fn text(area: u32, content: impl Into<String>) -> Self {
        Self {
            area: AreaId(area),
            body: ContentBody::Text {
                content: content.into(),
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Input to [`crate::PresentationController::configure`].
pub struct ConfigureOptions {
    /// Theme directory URL; `config.json` is fetched from here.
    pub theme_path: String,
    /// Content items, matched to areas by id.
    #[serde(default)]
    pub contents: Vec<ContentItem>,
}

#[cfg(test)]
#[path = "../../tests/unit/present/content.rs"]
mod tests;
