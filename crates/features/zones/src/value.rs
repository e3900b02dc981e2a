use serde::de::DeserializeOwned;
use serde_json::Value;
use tessera_domain::zone::{FileItem, FormEmbed, GalleryItem, LinkItem, RepeaterItem, ZoneKind};

/// A zone value parsed against its declared kind.
///
/// Parsing is the single place shape rules live: the validator asks "does it
/// parse?", the renderer renders the parsed variant. `rich_text` and
/// `conditional` share the [`Self::Text`] variant: both are plain HTML
/// strings that differ only in how templates use them.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneValue {
    Text(String),
    Repeater(Vec<RepeaterItem>),
    Gallery(Vec<GalleryItem>),
    Files(Vec<FileItem>),
    Links(Vec<LinkItem>),
    Form(FormEmbed),
}

impl ZoneValue {
    /// Parses a raw JSON value against `kind`.
    ///
    /// Returns `None` when the value does not match the kind's shape rule:
    /// wrong JSON type, missing record fields, or blank required fields.
    #[must_use]
    pub fn parse(kind: ZoneKind, raw: &Value) -> Option<Self> {
        match kind {
            ZoneKind::RichText | ZoneKind::Conditional => {
                raw.as_str().map(|s| Self::Text(s.to_owned()))
            },
            ZoneKind::Repeater => {
                let items = parse_items::<RepeaterItem>(raw, |item| {
                    !is_blank(&item.title) && !is_blank(&item.text)
                })?;
                Some(Self::Repeater(items))
            },
            ZoneKind::MediaGallery => {
                let items = parse_items::<GalleryItem>(raw, |item| !is_blank(&item.url))?;
                Some(Self::Gallery(items))
            },
            ZoneKind::FileList => {
                let items = parse_items::<FileItem>(raw, |item| {
                    !is_blank(&item.url) && !is_blank(&item.name)
                })?;
                Some(Self::Files(items))
            },
            ZoneKind::LinkList => {
                let items = parse_items::<LinkItem>(raw, |item| {
                    !is_blank(&item.label) && !is_blank(&item.url)
                })?;
                Some(Self::Links(items))
            },
            ZoneKind::FormEmbed => {
                let embed: FormEmbed = serde_json::from_value(raw.clone()).ok()?;
                let has_target = embed.form_id.as_deref().is_some_and(|v| !is_blank(v))
                    || embed.embed_code.as_deref().is_some_and(|v| !is_blank(v));
                (!is_blank(&embed.kind) && has_target).then_some(Self::Form(embed))
            },
        }
    }
}

/// Parses a JSON array into typed items; every element must both
/// deserialize and pass the per-item shape check.
fn parse_items<T: DeserializeOwned>(raw: &Value, valid: impl Fn(&T) -> bool) -> Option<Vec<T>> {
    let entries = raw.as_array()?;
    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let item: T = serde_json::from_value(entry.clone()).ok()?;
        if !valid(&item) {
            return None;
        }
        items.push(item);
    }
    Some(items)
}

pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_kinds_accept_any_string() {
        assert!(ZoneValue::parse(ZoneKind::RichText, &json!("<p>hi</p>")).is_some());
        assert!(ZoneValue::parse(ZoneKind::Conditional, &json!("")).is_some());
        assert!(ZoneValue::parse(ZoneKind::RichText, &json!(42)).is_none());
        assert!(ZoneValue::parse(ZoneKind::RichText, &json!(["x"])).is_none());
    }

    #[test]
    fn repeater_requires_title_and_text() {
        let ok = json!([{ "icon": "⚡", "title": "Fast", "text": "Speedy" }]);
        assert!(ZoneValue::parse(ZoneKind::Repeater, &ok).is_some());

        let blank_title = json!([{ "title": "  ", "text": "Speedy" }]);
        assert!(ZoneValue::parse(ZoneKind::Repeater, &blank_title).is_none());

        let missing_text = json!([{ "title": "Fast" }]);
        assert!(ZoneValue::parse(ZoneKind::Repeater, &missing_text).is_none());
    }

    #[test]
    fn one_bad_element_poisons_the_list() {
        let mixed = json!([
            { "label": "Home", "url": "/" },
            { "label": "Broken" }
        ]);
        assert!(ZoneValue::parse(ZoneKind::LinkList, &mixed).is_none());
    }

    #[test]
    fn form_embed_needs_a_target() {
        let built_in = json!({ "type": "built-in", "formId": "contact" });
        assert!(ZoneValue::parse(ZoneKind::FormEmbed, &built_in).is_some());

        let embed = json!({ "type": "embed", "embedCode": "<iframe></iframe>" });
        assert!(ZoneValue::parse(ZoneKind::FormEmbed, &embed).is_some());

        let no_target = json!({ "type": "built-in" });
        assert!(ZoneValue::parse(ZoneKind::FormEmbed, &no_target).is_none());

        let no_type = json!({ "type": "", "formId": "contact" });
        assert!(ZoneValue::parse(ZoneKind::FormEmbed, &no_type).is_none());
    }
}
