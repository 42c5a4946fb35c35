//! In-memory station cache.
//!
//! Holds the full station list after the first successful fetch. The list is
//! shared behind an `Arc` so state snapshots and filter tasks can hold it
//! without copying; it is replaced wholesale, never edited.

use std::sync::Arc;

use crate::domain::Station;

/// The full set of known stations.
#[derive(Debug, Clone, Default)]
pub struct StationCache {
    stations: Arc<Vec<Station>>,
}

impl StationCache {
    /// An unpopulated cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached list.
    pub fn replace(&mut self, stations: Vec<Station>) {
        self.stations = Arc::new(stations);
    }

    /// Shared handle to the cached list.
    pub fn shared(&self) -> Arc<Vec<Station>> {
        Arc::clone(&self.stations)
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// An empty cache is treated as unpopulated: the next non-empty query
    /// fetches again.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl PartialEq for StationCache {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.stations, &other.stations) || self.stations == other.stations
    }
}

impl From<Vec<Station>> for StationCache {
    fn from(stations: Vec<Station>) -> Self {
        Self {
            stations: Arc::new(stations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;

    fn station(id: &str, name: &str) -> Station {
        Station::new(StationId::parse(id).unwrap(), name, "MA", 0.0, 0.0)
    }

    #[test]
    fn starts_empty() {
        let cache = StationCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn replace_swaps_whole_list() {
        let mut cache = StationCache::new();
        cache.replace(vec![station("1", "Boston"), station("2", "Salem")]);
        let before = cache.shared();

        cache.replace(vec![station("3", "Nahant")]);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stations()[0].name, "Nahant");
        // Earlier handles keep the old list
        assert_eq!(before.len(), 2);
    }

    #[test]
    fn equality_by_contents() {
        let a = StationCache::from(vec![station("1", "Boston")]);
        let b = StationCache::from(vec![station("1", "Boston")]);
        let c = a.clone();

        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_ne!(a, StationCache::new());
    }
}
