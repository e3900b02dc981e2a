//! Zone schema primitives.
//!
//! A *zone* is a named, typed content region declared by a template. The set
//! of zone kinds is closed: payloads arriving with a tag outside this enum
//! fail deserialization instead of being carried around as opaque strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of zone content kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    RichText,
    Conditional,
    Repeater,
    MediaGallery,
    FileList,
    LinkList,
    FormEmbed,
}

impl ZoneKind {
    /// The wire tag for this kind (matches the serde representation).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RichText => "rich_text",
            Self::Conditional => "conditional",
            Self::Repeater => "repeater",
            Self::MediaGallery => "media_gallery",
            Self::FileList => "file_list",
            Self::LinkList => "link_list",
            Self::FormEmbed => "form_embed",
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single zone declared by a template.
///
/// Zone definitions are authored as part of a template's static schema and
/// are immutable at runtime. `key` is unique within its template; the order
/// of definitions in the template is the rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDefinition {
    pub key: String,
    pub kind: ZoneKind,
    pub label: String,
    pub required: bool,
}

impl ZoneDefinition {
    #[must_use]
    pub fn new(key: impl Into<String>, kind: ZoneKind, label: impl Into<String>) -> Self {
        Self { key: key.into(), kind, label: label.into(), required: false }
    }

    /// Marks the zone as required for content validation.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// One card of a repeater zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeaterItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub title: String,
    pub text: String,
}

/// One image of a media gallery zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// One downloadable entry of a file list zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileItem {
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One anchor of a link list zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkItem {
    pub label: String,
    pub url: String,
}

/// An embedded form reference.
///
/// `kind` is the embed mode tag (`built-in` or `embed` are the modes the
/// renderer understands); exactly one of `form_id` / `embed_code` is
/// expected to be present depending on the mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEmbed {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "formId", default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
    #[serde(rename = "embedCode", default, skip_serializing_if = "Option::is_none")]
    pub embed_code: Option<String>,
}
