use serde_json::{Value, json};
use tessera_domain::zone::{ZoneDefinition, ZoneKind};
use tessera_zones::{ZoneValues, renderer, validator};

fn payload(entries: &[(&str, Value)]) -> ZoneValues {
    entries.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect()
}

#[test]
fn repeater_feature_card_end_to_end() {
    let zones = [ZoneDefinition::new("features", ZoneKind::Repeater, "Features").required()];
    let values =
        payload(&[("features", json!([{ "title": "Fast", "icon": "⚡", "text": "Speedy" }]))]);

    assert!(validator::validate_all(&zones, &values));

    let fragments = renderer::render_all(&zones, &values);
    assert_eq!(
        fragments["features"],
        "<div class=\"feature-card\"><div class=\"feature-icon\">⚡</div><h3>Fast</h3><p>Speedy</p></div>"
    );
}

#[test]
fn link_list_missing_url_fails_validation() {
    let zones = [ZoneDefinition::new("links", ZoneKind::LinkList, "Links").required()];
    let values = payload(&[("links", json!([{ "label": "Home" }]))]);

    assert!(!validator::validate_all(&zones, &values));
    // Rendering the same payload stays silent.
    assert_eq!(renderer::render_all(&zones, &values)["links"], "");
}

#[test]
fn built_in_form_embed_renders_placeholder() {
    let zones = [ZoneDefinition::new("contact", ZoneKind::FormEmbed, "Contact form").required()];
    let values = payload(&[("contact", json!({ "type": "built-in", "formId": "contact" }))]);

    assert!(validator::validate_all(&zones, &values));
    assert_eq!(
        renderer::render_all(&zones, &values)["contact"],
        "<div class=\"form-embed\" data-form-id=\"contact\"></div>"
    );
}

#[test]
fn embed_form_passes_code_through() {
    let zones = [ZoneDefinition::new("signup", ZoneKind::FormEmbed, "Signup")];
    let values = payload(&[(
        "signup",
        json!({ "type": "embed", "embedCode": "<iframe src=\"https://forms.example\"></iframe>" }),
    )]);
    assert_eq!(
        renderer::render_all(&zones, &values)["signup"],
        "<iframe src=\"https://forms.example\"></iframe>"
    );
}

#[test]
fn rendering_is_idempotent() {
    let zones = [
        ZoneDefinition::new("hero", ZoneKind::RichText, "Hero").required(),
        ZoneDefinition::new("gallery", ZoneKind::MediaGallery, "Gallery"),
        ZoneDefinition::new("files", ZoneKind::FileList, "Downloads"),
        ZoneDefinition::new("absent", ZoneKind::LinkList, "Never filled"),
    ];
    let values = payload(&[
        ("hero", json!("<h1>Hello</h1>")),
        ("gallery", json!([{ "url": "/a.png" }, { "url": "/b.png", "alt": "B" }])),
        ("files", json!([{ "url": "/f.pdf", "name": "Fact sheet", "description": "PDF, 2 MB" }])),
    ]);

    let first = renderer::render_all(&zones, &values);
    let second = renderer::render_all(&zones, &values);
    assert_eq!(first, second);

    // Every schema key is present, including the zone with no value.
    assert_eq!(first.len(), zones.len());
    assert_eq!(first["absent"], "");
}

#[test]
fn file_list_renders_link_and_description() {
    let zones = [ZoneDefinition::new("files", ZoneKind::FileList, "Downloads")];
    let values =
        payload(&[("files", json!([{ "url": "/f.pdf", "name": "Fact sheet", "description": "PDF" }]))]);
    assert_eq!(
        renderer::render_all(&zones, &values)["files"],
        "<div class=\"file-item\"><a href=\"/f.pdf\">Fact sheet</a><span class=\"file-description\">PDF</span></div>"
    );
}

#[test]
fn mutating_an_optional_zone_never_changes_the_aggregate() {
    let zones = [
        ZoneDefinition::new("hero", ZoneKind::RichText, "Hero").required(),
        ZoneDefinition::new("aside", ZoneKind::Repeater, "Aside"),
    ];
    let mut values = payload(&[("hero", json!("<p>ok</p>"))]);
    assert!(validator::validate_all(&zones, &values));

    values.insert("aside".to_owned(), json!(17));
    assert!(validator::validate_all(&zones, &values));
}
