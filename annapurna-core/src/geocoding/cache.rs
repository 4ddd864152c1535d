use crate::entities::MapPoint;
use std::collections::HashMap;

/// Remembers resolved addresses for the lifetime of a session.
///
/// Keys are the addresses exactly as they were requested, i.e.
/// neither trimmed nor otherwise normalized. There is no eviction.
#[derive(Debug, Default, Clone)]
pub struct GeocodeCache {
    entries: HashMap<String, MapPoint>,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, address: &str) -> Option<MapPoint> {
        self.entries.get(address).copied()
    }

    pub fn insert(&mut self, address: &str, pos: MapPoint) {
        debug_assert!(pos.is_valid());
        self.entries.insert(address.to_owned(), pos);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
