//! Property tests for the per-kind shape rules: generated valid fixtures
//! always validate, generated invalid fixtures never do.

use proptest::prelude::*;
use serde_json::{Value, json};
use tessera_domain::zone::{ZoneDefinition, ZoneKind};
use tessera_zones::validator::validate_zone;

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,15}".prop_map(|s| s.trim().to_owned()).prop_filter(
        "non-blank",
        |s| !s.is_empty(),
    )
}

fn valid_value(kind: ZoneKind) -> BoxedStrategy<Value> {
    match kind {
        ZoneKind::RichText | ZoneKind::Conditional => any::<String>().prop_map(Value::String).boxed(),
        ZoneKind::Repeater => prop::collection::vec((word(), word()), 0..4)
            .prop_map(|items| {
                Value::Array(
                    items
                        .into_iter()
                        .map(|(title, text)| json!({ "title": title, "text": text }))
                        .collect(),
                )
            })
            .boxed(),
        ZoneKind::MediaGallery => prop::collection::vec(word(), 0..4)
            .prop_map(|urls| Value::Array(urls.into_iter().map(|u| json!({ "url": u })).collect()))
            .boxed(),
        ZoneKind::FileList => prop::collection::vec((word(), word()), 0..4)
            .prop_map(|items| {
                Value::Array(
                    items.into_iter().map(|(u, n)| json!({ "url": u, "name": n })).collect(),
                )
            })
            .boxed(),
        ZoneKind::LinkList => prop::collection::vec((word(), word()), 0..4)
            .prop_map(|items| {
                Value::Array(
                    items.into_iter().map(|(l, u)| json!({ "label": l, "url": u })).collect(),
                )
            })
            .boxed(),
        ZoneKind::FormEmbed => (word(), prop::bool::ANY)
            .prop_map(|(target, built_in)| {
                if built_in {
                    json!({ "type": "built-in", "formId": target })
                } else {
                    json!({ "type": "embed", "embedCode": target })
                }
            })
            .boxed(),
    }
}

/// Values that are the wrong JSON type for every zone kind's shape rule.
fn alien_value(kind: ZoneKind) -> BoxedStrategy<Value> {
    match kind {
        // Text kinds reject anything that is not a string.
        ZoneKind::RichText | ZoneKind::Conditional => prop_oneof![
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
            Just(json!({ "text": "nested" })),
            Just(json!(["a", "b"])),
        ]
        .boxed(),
        // List kinds reject non-arrays and records with blank/missing fields.
        ZoneKind::Repeater => prop_oneof![
            any::<String>().prop_map(Value::String),
            Just(json!([{ "title": "only title" }])),
            Just(json!([{ "title": "  ", "text": "body" }])),
        ]
        .boxed(),
        ZoneKind::MediaGallery => prop_oneof![
            any::<i64>().prop_map(Value::from),
            Just(json!([{ "alt": "no url" }])),
            Just(json!([{ "url": "" }])),
        ]
        .boxed(),
        ZoneKind::FileList => prop_oneof![
            any::<String>().prop_map(Value::String),
            Just(json!([{ "url": "/f.pdf" }])),
            Just(json!([{ "name": "orphan" }])),
        ]
        .boxed(),
        ZoneKind::LinkList => prop_oneof![
            any::<bool>().prop_map(Value::from),
            Just(json!([{ "label": "Home" }])),
            Just(json!([{ "url": "/" }])),
        ]
        .boxed(),
        ZoneKind::FormEmbed => prop_oneof![
            any::<String>().prop_map(Value::String),
            Just(json!({ "formId": "contact" })),
            Just(json!({ "type": "built-in" })),
            Just(json!({ "type": " ", "formId": "contact" })),
        ]
        .boxed(),
    }
}

const ALL_KINDS: [ZoneKind; 7] = [
    ZoneKind::RichText,
    ZoneKind::Conditional,
    ZoneKind::Repeater,
    ZoneKind::MediaGallery,
    ZoneKind::FileList,
    ZoneKind::LinkList,
    ZoneKind::FormEmbed,
];

fn kind_strategy() -> impl Strategy<Value = ZoneKind> {
    prop::sample::select(ALL_KINDS.to_vec())
}

proptest! {
    #[test]
    fn valid_fixtures_validate(kind in kind_strategy().prop_flat_map(|k| (Just(k), valid_value(k)))) {
        let (kind, value) = kind;
        let zone = ZoneDefinition::new("z", kind, "Zone").required();
        prop_assert!(validate_zone(&zone, &value));
    }

    #[test]
    fn invalid_fixtures_never_validate(kind in kind_strategy().prop_flat_map(|k| (Just(k), alien_value(k)))) {
        let (kind, value) = kind;
        let zone = ZoneDefinition::new("z", kind, "Zone").required();
        prop_assert!(!validate_zone(&zone, &value));
    }
}
