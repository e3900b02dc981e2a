use tessera_domain::zone::{FormEmbed, ZoneDefinition, ZoneKind};

#[test]
fn zone_kind_tags_roundtrip() {
    for kind in [
        ZoneKind::RichText,
        ZoneKind::Conditional,
        ZoneKind::Repeater,
        ZoneKind::MediaGallery,
        ZoneKind::FileList,
        ZoneKind::LinkList,
        ZoneKind::FormEmbed,
    ] {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.as_str()));
        let back: ZoneKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}

#[test]
fn unknown_zone_kind_is_rejected() {
    let err = serde_json::from_str::<ZoneKind>("\"carousel\"");
    assert!(err.is_err(), "unrecognized zone kinds must not deserialize");
}

#[test]
fn zone_definition_builder_defaults_to_optional() {
    let zone = ZoneDefinition::new("hero", ZoneKind::RichText, "Hero banner");
    assert!(!zone.required);
    let zone = zone.required();
    assert!(zone.required);
}

#[test]
fn form_embed_uses_editor_field_names() {
    let embed: FormEmbed =
        serde_json::from_str(r#"{ "type": "built-in", "formId": "contact" }"#).unwrap();
    assert_eq!(embed.kind, "built-in");
    assert_eq!(embed.form_id.as_deref(), Some("contact"));
    assert!(embed.embed_code.is_none());
}
