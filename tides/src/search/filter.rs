//! Substring matching over the cached stations.

use crate::domain::Station;

use super::config::MatchCase;

/// Stations whose name or state code contains `query`.
///
/// Preserves cache order. An empty query matches nothing; the coordinator
/// never runs a filter for one, but callers outside it might.
pub fn matching_stations(stations: &[Station], query: &str, case: MatchCase) -> Vec<Station> {
    if query.is_empty() {
        return Vec::new();
    }

    match case {
        MatchCase::Sensitive => stations
            .iter()
            .filter(|s| s.name.contains(query) || s.state.contains(query))
            .cloned()
            .collect(),
        MatchCase::Insensitive => {
            let needle = query.to_lowercase();
            stations
                .iter()
                .filter(|s| {
                    s.name.to_lowercase().contains(&needle)
                        || s.state.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;

    fn station(id: &str, name: &str, state: &str) -> Station {
        Station::new(StationId::parse(id).unwrap(), name, state, 0.0, 0.0)
    }

    fn new_england() -> Vec<Station> {
        vec![
            station("1", "Boston", "MA"),
            station("2", "Portland", "ME"),
            station("3", "Bar Harbor", "ME"),
        ]
    }

    fn ids(stations: &[Station]) -> Vec<&str> {
        stations.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn matches_state_code() {
        let result = matching_stations(&new_england(), "ME", MatchCase::Sensitive);
        assert_eq!(ids(&result), vec!["2", "3"]);
    }

    #[test]
    fn matches_name_substring() {
        let result = matching_stations(&new_england(), "rt", MatchCase::Sensitive);
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn sensitive_matching_respects_case() {
        assert!(matching_stations(&new_england(), "boston", MatchCase::Sensitive).is_empty());
        assert!(matching_stations(&new_england(), "me", MatchCase::Sensitive).is_empty());
    }

    #[test]
    fn insensitive_matching_ignores_case() {
        let result = matching_stations(&new_england(), "boston", MatchCase::Insensitive);
        assert_eq!(ids(&result), vec!["1"]);

        let result = matching_stations(&new_england(), "me", MatchCase::Insensitive);
        assert_eq!(ids(&result), vec!["2", "3"]);
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(matching_stations(&new_england(), "", MatchCase::Sensitive).is_empty());
    }

    #[test]
    fn no_match_is_empty() {
        assert!(matching_stations(&new_england(), "Seattle", MatchCase::Sensitive).is_empty());
    }
}
