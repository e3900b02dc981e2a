//! # Zone Validation
//!
//! Checks editor-supplied zone payloads against a template's zone schema.
//!
//! ## Validation policy
//! Only zones marked `required` are checked; optional zones are always
//! considered valid, even if malformed. Malformed optional data degrades to
//! an empty fragment at render time instead of blocking a save. The
//! aggregate answer is a single boolean; [`violations`] re-derives per-zone
//! detail by re-running the same shape rules.

use crate::ZoneValues;
use crate::value::ZoneValue;
use serde_json::Value;
use tessera_domain::zone::{ZoneDefinition, ZoneKind};

/// Why a required zone failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationReason {
    /// No value was supplied for the zone key.
    Missing,
    /// A value was supplied but does not match the zone kind's shape rule.
    ShapeMismatch,
}

/// A single failed required zone, for edit-time error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneViolation {
    pub key: String,
    pub kind: ZoneKind,
    pub reason: ViolationReason,
}

/// Checks one value against one zone definition's shape rule.
///
/// `required` is not consulted here; this is the raw per-type check of the
/// shape table. A value passes exactly when it parses as the zone's kind.
#[must_use]
pub fn validate_zone(zone: &ZoneDefinition, value: &Value) -> bool {
    ZoneValue::parse(zone.kind, value).is_some()
}

/// Validates a full payload against a zone schema.
///
/// Returns `true` iff every `required` zone has a value that passes
/// [`validate_zone`]. Each zone is checked independently; schema order does
/// not matter here.
#[must_use]
pub fn validate_all(zones: &[ZoneDefinition], values: &ZoneValues) -> bool {
    zones
        .iter()
        .filter(|zone| zone.required)
        .all(|zone| values.get(&zone.key).is_some_and(|value| validate_zone(zone, value)))
}

/// Collects per-zone failures for the zones [`validate_all`] would reject.
///
/// Empty result means `validate_all` returns `true` for the same input.
#[must_use]
pub fn violations(zones: &[ZoneDefinition], values: &ZoneValues) -> Vec<ZoneViolation> {
    zones
        .iter()
        .filter(|zone| zone.required)
        .filter_map(|zone| {
            let reason = match values.get(&zone.key) {
                None => ViolationReason::Missing,
                Some(value) if !validate_zone(zone, value) => ViolationReason::ShapeMismatch,
                Some(_) => return None,
            };
            Some(ZoneViolation { key: zone.key.clone(), kind: zone.kind, reason })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tessera_domain::zone::ZoneDefinition;

    fn payload(entries: &[(&str, Value)]) -> ZoneValues {
        entries.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect()
    }

    #[test]
    fn optional_zones_are_never_checked() {
        let zones = [ZoneDefinition::new("aside", ZoneKind::LinkList, "Aside links")];
        let values = payload(&[("aside", json!("definitely not a link list"))]);
        assert!(validate_all(&zones, &values));
        assert!(violations(&zones, &values).is_empty());
    }

    #[test]
    fn required_zone_must_be_present_and_well_shaped() {
        let zones = [ZoneDefinition::new("links", ZoneKind::LinkList, "Links").required()];

        let missing = payload(&[]);
        assert!(!validate_all(&zones, &missing));
        assert_eq!(violations(&zones, &missing)[0].reason, ViolationReason::Missing);

        let malformed = payload(&[("links", json!([{ "label": "Home" }]))]);
        assert!(!validate_all(&zones, &malformed));
        assert_eq!(violations(&zones, &malformed)[0].reason, ViolationReason::ShapeMismatch);

        let valid = payload(&[("links", json!([{ "label": "Home", "url": "/" }]))]);
        assert!(validate_all(&zones, &valid));
    }

    #[test]
    fn one_invalid_required_zone_flips_the_aggregate() {
        let zones = [
            ZoneDefinition::new("hero", ZoneKind::RichText, "Hero").required(),
            ZoneDefinition::new("features", ZoneKind::Repeater, "Features").required(),
        ];
        let mut values = payload(&[
            ("hero", json!("<h1>Welcome</h1>")),
            ("features", json!([{ "title": "Fast", "text": "Speedy" }])),
        ]);
        assert!(validate_all(&zones, &values));

        values.insert("features".to_owned(), json!({ "not": "an array" }));
        assert!(!validate_all(&zones, &values));
    }
}
