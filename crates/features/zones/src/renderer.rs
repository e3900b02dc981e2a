//! # Zone Rendering
//!
//! Produces one HTML fragment per zone from a schema and a raw payload.
//!
//! ## Rendering policy
//! Rendering is fail-open: a missing value, a shape mismatch, or an unknown
//! form-embed mode all yield an empty fragment for that zone, never an
//! error. Partially configured content renders whatever is usable. The
//! validator is the loud half of the pipeline; render time stays silent.
//!
//! Fragments are byte-stable for a given input, so re-rendering the same
//! payload is idempotent.

use crate::ZoneValues;
use crate::value::ZoneValue;
use fxhash::FxHashMap;
use serde_json::Value;
use std::fmt::Write as _;
use tessera_domain::zone::{FormEmbed, ZoneDefinition};

/// Renders every zone of a schema into a key → fragment map.
///
/// The map itself is unordered; page assembly iterates the template's zone
/// sequence, which defines top-to-bottom order.
#[must_use]
pub fn render_all(zones: &[ZoneDefinition], values: &ZoneValues) -> FxHashMap<String, String> {
    zones
        .iter()
        .map(|zone| (zone.key.clone(), render_zone(zone, values.get(&zone.key))))
        .collect()
}

/// Renders a single zone. `None` or malformed input renders as `""`.
#[must_use]
pub fn render_zone(zone: &ZoneDefinition, value: Option<&Value>) -> String {
    value
        .and_then(|raw| ZoneValue::parse(zone.kind, raw))
        .map_or_else(String::new, |parsed| render_value(&parsed))
}

fn render_value(value: &ZoneValue) -> String {
    match value {
        // Pre-sanitized editor HTML, passed through unescaped.
        ZoneValue::Text(html) => html.clone(),
        ZoneValue::Repeater(items) => items.iter().fold(String::new(), |mut out, item| {
            let _ = write!(
                out,
                "<div class=\"feature-card\"><div class=\"feature-icon\">{}</div><h3>{}</h3><p>{}</p></div>",
                escape_html(item.icon.as_deref().unwrap_or_default()),
                escape_html(&item.title),
                escape_html(&item.text),
            );
            out
        }),
        ZoneValue::Gallery(items) => items.iter().fold(String::new(), |mut out, item| {
            let _ = write!(
                out,
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(&item.url),
                escape_html(item.alt.as_deref().unwrap_or_default()),
            );
            out
        }),
        ZoneValue::Files(items) => items.iter().fold(String::new(), |mut out, item| {
            let _ = write!(
                out,
                "<div class=\"file-item\"><a href=\"{}\">{}</a><span class=\"file-description\">{}</span></div>",
                escape_html(&item.url),
                escape_html(&item.name),
                escape_html(item.description.as_deref().unwrap_or_default()),
            );
            out
        }),
        ZoneValue::Links(items) => items.iter().fold(String::new(), |mut out, item| {
            let _ =
                write!(out, "<a href=\"{}\">{}</a>", escape_html(&item.url), escape_html(&item.label));
            out
        }),
        ZoneValue::Form(embed) => render_form(embed),
    }
}

fn render_form(embed: &FormEmbed) -> String {
    match embed.kind.as_str() {
        "built-in" => embed.form_id.as_deref().map_or_else(String::new, |form_id| {
            format!("<div class=\"form-embed\" data-form-id=\"{}\"></div>", escape_html(form_id))
        }),
        // Embed codes are trusted editor-provided markup.
        "embed" => embed.embed_code.clone().unwrap_or_default(),
        _ => String::new(),
    }
}

/// Escapes text for use in HTML text and attribute positions.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tessera_domain::zone::ZoneKind;

    #[test]
    fn missing_value_renders_empty() {
        let zone = ZoneDefinition::new("hero", ZoneKind::RichText, "Hero");
        assert_eq!(render_zone(&zone, None), "");
    }

    #[test]
    fn malformed_value_renders_empty() {
        let zone = ZoneDefinition::new("links", ZoneKind::LinkList, "Links");
        assert_eq!(render_zone(&zone, Some(&json!([{ "label": "no url" }]))), "");
    }

    #[test]
    fn gallery_escapes_attributes() {
        let zone = ZoneDefinition::new("shots", ZoneKind::MediaGallery, "Shots");
        let value = json!([{ "url": "/a.png?w=1&h=2", "alt": "a \"quote\"" }]);
        assert_eq!(
            render_zone(&zone, Some(&value)),
            "<img src=\"/a.png?w=1&amp;h=2\" alt=\"a &quot;quote&quot;\">"
        );
    }

    #[test]
    fn unknown_form_mode_renders_empty() {
        let zone = ZoneDefinition::new("signup", ZoneKind::FormEmbed, "Signup");
        let value = json!({ "type": "popup", "formId": "x" });
        assert_eq!(render_zone(&zone, Some(&value)), "");
    }

    #[test]
    fn rich_text_is_passed_through_unescaped() {
        let zone = ZoneDefinition::new("hero", ZoneKind::RichText, "Hero");
        let value = json!("<h1>Big & bold</h1>");
        assert_eq!(render_zone(&zone, Some(&value)), "<h1>Big & bold</h1>");
    }
}
