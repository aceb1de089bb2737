//! Address search over aggregated stations.

use crate::domain::Station;

/// Keep stations whose address contains `query`, ignoring case.
///
/// Order is preserved and duplicates are kept. An empty query matches every
/// station; rejecting blank queries is the caller's job.
pub fn filter_by_address(stations: Vec<Station>, query: &str) -> Vec<Station> {
    let needle = query.to_lowercase();
    stations
        .into_iter()
        .filter(|s| s.address_contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::Location;

    fn station(site_id: &str, address: &str) -> Station {
        Station {
            site_id: site_id.to_string(),
            brand: "Morrisons".to_string(),
            address: address.to_string(),
            postcode: None,
            location: Location {
                latitude: "51.5".to_string(),
                longitude: "-0.1".to_string(),
            },
            prices: BTreeMap::new(),
        }
    }

    fn ids(stations: &[Station]) -> Vec<&str> {
        stations.iter().map(|s| s.site_id.as_str()).collect()
    }

    #[test]
    fn substring_match_ignores_case() {
        let stations = vec![station("1", "123 London Road"), station("2", "1 High St, Bristol")];

        assert_eq!(ids(&filter_by_address(stations.clone(), "don")), ["1"]);
        assert_eq!(ids(&filter_by_address(stations.clone(), "LONDON")), ["1"]);
        assert_eq!(ids(&filter_by_address(stations, "bRiStOl")), ["2"]);
    }

    #[test]
    fn no_match_is_empty() {
        let stations = vec![station("1", "1 High St, Bristol")];
        assert!(filter_by_address(stations, "london").is_empty());
    }

    #[test]
    fn preserves_order_and_duplicates() {
        let stations = vec![
            station("3", "Leeds Road, Bradford"),
            station("1", "Otley Road, Leeds"),
            station("3", "Leeds Road, Bradford"),
        ];
        assert_eq!(ids(&filter_by_address(stations, "leeds")), ["3", "1", "3"]);
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(filter_by_address(Vec::new(), "york").is_empty());
    }
}
