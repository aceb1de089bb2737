//! Normalization of raw retailer feeds into [`Station`]s.
//!
//! Retailers publish loosely specified JSON: some serve a bare array of
//! sites, others wrap it as `{"stations": [...]}`; coordinates may be numbers
//! or strings; brand and prices are optional. Nothing here assumes one
//! retailer's schema holds for another. Every field is checked for presence
//! and type before a [`Station`] is built, and entries that fail the checks
//! are dropped individually.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::{Location, Station};

/// Text used for a coordinate the feed did not provide.
pub const UNDEFINED: &str = "undefined";

/// Why a raw entry was dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    /// The entry was not a JSON object
    #[error("entry is not an object")]
    NotAnObject,

    /// A required field was absent, null, false, zero or empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The address was present but not a string
    #[error("address is not a string")]
    AddressNotText,
}

/// Normalize one feed's payload into stations, in feed order.
///
/// Returns an empty list if the payload has no recognizable station list.
/// Never fails: malformed entries are skipped.
pub fn normalize(payload: &Value, source_name: &str) -> Vec<Station> {
    let Some(entries) = station_list(payload) else {
        warn!(source = %source_name, "unexpected feed structure, no station list found");
        return Vec::new();
    };

    let mut stations = Vec::with_capacity(entries.len());
    let mut skipped = 0usize;

    for (index, entry) in entries.iter().enumerate() {
        match convert_entry(entry, source_name) {
            Ok(station) => stations.push(station),
            Err(reason) => {
                skipped += 1;
                debug!(source = %source_name, index, %reason, "skipping feed entry");
            }
        }
    }

    debug!(
        source = %source_name,
        stations = stations.len(),
        skipped,
        "normalized feed"
    );

    stations
}

/// Locate the station array: either the payload itself or its `stations` field.
pub fn station_list(payload: &Value) -> Option<&Vec<Value>> {
    match payload {
        Value::Array(entries) => Some(entries),
        Value::Object(fields) => fields.get("stations").and_then(Value::as_array),
        _ => None,
    }
}

/// Convert a single raw entry to a station.
pub fn convert_entry(entry: &Value, source_name: &str) -> Result<Station, SkipReason> {
    let fields = entry.as_object().ok_or(SkipReason::NotAnObject)?;

    let site_id = required(fields, "site_id")?;
    let address = required(fields, "address")?;
    let location = required(fields, "location")?;

    let Value::String(address) = address else {
        return Err(SkipReason::AddressNotText);
    };

    let brand = match fields.get("brand") {
        Some(brand) if is_truthy(brand) => to_text(brand),
        _ => source_name.to_string(),
    };

    let coordinate = |name: &str| {
        location
            .as_object()
            .and_then(|l| l.get(name))
            .map_or_else(|| UNDEFINED.to_string(), to_text)
    };

    Ok(Station {
        site_id: to_text(site_id),
        brand,
        address: address.clone(),
        postcode: fields.get("postcode").and_then(postcode),
        location: Location {
            latitude: coordinate("latitude"),
            longitude: coordinate("longitude"),
        },
        prices: fields.get("prices").map(prices).unwrap_or_default(),
    })
}

fn required<'a>(
    fields: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a Value, SkipReason> {
    fields
        .get(name)
        .filter(|v| is_truthy(v))
        .ok_or(SkipReason::MissingField(name))
}

/// Loose truthiness: null, false, zero, NaN and the empty string are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render any JSON value as text the way a loosely typed consumer would.
///
/// Whole floats lose their `.0` so `51.0` and `51` agree.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_to_text(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    if f == 0.0 {
        return "0".to_string();
    }

    // Outside [1e-6, 1e21) loosely typed consumers switch to exponent form.
    let magnitude = f.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{f:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        };
    }

    if f.fract() == 0.0 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

fn postcode(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_to_text(n)),
        _ => None,
    }
}

/// Keep price entries that are numbers or numeric strings.
fn prices(value: &Value) -> BTreeMap<String, f64> {
    let Some(entries) = value.as_object() else {
        return BTreeMap::new();
    };

    entries
        .iter()
        .filter_map(|(grade, price)| {
            let price = match price {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok().filter(|p| p.is_finite()),
                _ => None,
            }?;
            Some((grade.clone(), price))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn bristol() -> Value {
        json!({
            "site_id": "1",
            "address": "1 High St, Bristol",
            "location": {"latitude": "51.4", "longitude": "-2.5"},
            "prices": {"E10": 1.4}
        })
    }

    #[test]
    fn bare_list_and_envelope_normalize_identically() {
        let bare = json!([bristol()]);
        let envelope = json!({"last_updated": "17/10/2026 08:00:00", "stations": [bristol()]});

        let from_bare = normalize(&bare, "Asda");
        let from_envelope = normalize(&envelope, "Asda");

        assert_eq!(from_bare.len(), 1);
        assert_eq!(from_bare, from_envelope);
    }

    #[test]
    fn unrecognized_shape_yields_nothing() {
        assert!(normalize(&json!({"sites": [bristol()]}), "Asda").is_empty());
        assert!(normalize(&json!({"stations": "none"}), "Asda").is_empty());
        assert!(normalize(&json!("stations"), "Asda").is_empty());
        assert!(normalize(&Value::Null, "Asda").is_empty());
    }

    #[test]
    fn builds_canonical_station() {
        let stations = normalize(&json!([bristol()]), "Asda");
        let station = &stations[0];

        assert_eq!(station.site_id, "1");
        assert_eq!(station.brand, "Asda");
        assert_eq!(station.address, "1 High St, Bristol");
        assert_eq!(station.postcode, None);
        assert_eq!(station.location.latitude, "51.4");
        assert_eq!(station.location.longitude, "-2.5");
        assert_eq!(station.prices.get("E10"), Some(&1.4));
    }

    #[test]
    fn drops_entries_missing_required_fields() {
        let mut no_id = bristol();
        no_id.as_object_mut().unwrap().remove("site_id");
        let mut no_address = bristol();
        no_address["address"] = json!("");
        let mut null_location = bristol();
        null_location["location"] = Value::Null;
        let mut no_location = bristol();
        no_location.as_object_mut().unwrap().remove("location");

        let feed = json!([no_id, bristol(), no_address, null_location, no_location, 42, null]);
        let stations = normalize(&feed, "Tesco");

        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].site_id, "1");
    }

    #[test]
    fn skip_reasons() {
        assert_eq!(convert_entry(&json!(7), "X"), Err(SkipReason::NotAnObject));
        assert_eq!(
            convert_entry(&json!({"address": "a", "location": {}}), "X"),
            Err(SkipReason::MissingField("site_id"))
        );
        assert_eq!(
            convert_entry(&json!({"site_id": 0, "address": "a", "location": {}}), "X"),
            Err(SkipReason::MissingField("site_id"))
        );
        assert_eq!(
            convert_entry(&json!({"site_id": "1", "address": ["a"], "location": {}}), "X"),
            Err(SkipReason::AddressNotText)
        );
        assert_eq!(
            convert_entry(&json!({"site_id": "1", "address": "a"}), "X"),
            Err(SkipReason::MissingField("location"))
        );
    }

    #[test]
    fn brand_from_feed_or_source_name() {
        let mut branded = bristol();
        branded["brand"] = json!("ESSO");
        let mut empty_brand = bristol();
        empty_brand["brand"] = json!("");

        let stations = normalize(&json!([branded, empty_brand]), "Esso Tesco Alliance");
        assert_eq!(stations[0].brand, "ESSO");
        assert_eq!(stations[1].brand, "Esso Tesco Alliance");
    }

    #[test]
    fn numeric_coordinates_become_text() {
        let mut entry = bristol();
        entry["location"] = json!({"latitude": 51.454513, "longitude": -2.58791});
        let station = convert_entry(&entry, "Moto").unwrap();
        assert_eq!(station.location.latitude, "51.454513");
        assert_eq!(station.location.longitude, "-2.58791");
    }

    #[test]
    fn missing_coordinates_are_undefined() {
        let mut entry = bristol();
        entry["location"] = json!({"lat": 51.4});
        let station = convert_entry(&entry, "Moto").unwrap();
        assert_eq!(station.location.latitude, UNDEFINED);
        assert_eq!(station.location.longitude, UNDEFINED);

        entry["location"] = json!({"latitude": null, "longitude": 0});
        let station = convert_entry(&entry, "Moto").unwrap();
        assert_eq!(station.location.latitude, "null");
        assert_eq!(station.location.longitude, "0");
    }

    #[test]
    fn numeric_site_id_and_postcode_become_text() {
        let mut entry = bristol();
        entry["site_id"] = json!(10234);
        entry["postcode"] = json!("BS1 4DJ");
        let station = convert_entry(&entry, "JET Retail UK").unwrap();
        assert_eq!(station.site_id, "10234");
        assert_eq!(station.postcode.as_deref(), Some("BS1 4DJ"));
    }

    #[test]
    fn prices_keep_numbers_and_numeric_strings() {
        let mut entry = bristol();
        entry["prices"] = json!({"E10": 139.9, "B7": "147.9", "SDV": null, "E5": "n/a"});
        let station = convert_entry(&entry, "Rontec").unwrap();
        assert_eq!(station.prices.len(), 2);
        assert_eq!(station.prices["E10"], 139.9);
        assert_eq!(station.prices["B7"], 147.9);
    }

    #[test]
    fn absent_or_malformed_prices_are_empty() {
        let mut entry = bristol();
        entry.as_object_mut().unwrap().remove("prices");
        assert!(convert_entry(&entry, "X").unwrap().prices.is_empty());

        entry["prices"] = json!([139.9]);
        assert!(convert_entry(&entry, "X").unwrap().prices.is_empty());
    }

    #[test]
    fn text_coercion() {
        assert_eq!(to_text(&json!("51.4")), "51.4");
        assert_eq!(to_text(&json!(51)), "51");
        assert_eq!(to_text(&json!(51.0)), "51");
        assert_eq!(to_text(&json!(-0.0)), "0");
        assert_eq!(to_text(&json!(true)), "true");
        assert_eq!(to_text(&Value::Null), "null");
        assert_eq!(to_text(&json!([1, null, "a"])), "1,,a");
        assert_eq!(to_text(&json!({"a": 1})), "[object Object]");
    }

    #[test]
    fn text_coercion_switches_to_exponent_form_at_extremes() {
        assert_eq!(to_text(&json!(1e-7)), "1e-7");
        assert_eq!(to_text(&json!(-1.5e-7)), "-1.5e-7");
        assert_eq!(to_text(&json!(0.000001)), "0.000001");
        assert_eq!(to_text(&json!(1e21)), "1e+21");
        assert_eq!(to_text(&json!(1.23e22)), "1.23e+22");
        assert_eq!(to_text(&json!(1e20)), "100000000000000000000");
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!(-1)));
    }

    #[test]
    fn preserves_feed_order() {
        let feed: Vec<Value> = (1..=5)
            .map(|i| {
                let mut e = bristol();
                e["site_id"] = json!(i.to_string());
                e
            })
            .collect();
        let ids: Vec<_> = normalize(&Value::Array(feed), "X")
            .into_iter()
            .map(|s| s.site_id)
            .collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
    }
}
