//! Set of roads currently removed from the network.

use super::Road;

/// Roads temporarily removed from an otherwise intact network.
///
/// Each entry keeps the road exactly as it was when removed (original cost
/// included) so it can be restored unchanged. Entries are only ever created
/// by [`RoadNetwork::remove_road`](super::RoadNetwork::remove_road), and are
/// listed in the order they were broken.
#[derive(Debug, Clone, Default)]
pub struct BrokenRoadSet {
    roads: Vec<Road>,
}

impl BrokenRoadSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the road `from -> to` is currently broken.
    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.roads.iter().any(|r| r.connects(from, to))
    }

    /// Returns the broken road `from -> to`, if any.
    pub fn get(&self, from: &str, to: &str) -> Option<&Road> {
        self.roads.iter().find(|r| r.connects(from, to))
    }

    /// Broken roads in the order they were broken.
    pub fn iter(&self) -> impl Iterator<Item = &Road> {
        self.roads.iter()
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    pub(crate) fn insert(&mut self, road: Road) {
        self.roads.push(road);
    }

    pub(crate) fn take(&mut self, from: &str, to: &str) -> Option<Road> {
        let pos = self.roads.iter().position(|r| r.connects(from, to))?;
        Some(self.roads.remove(pos))
    }

    pub(crate) fn drain(&mut self) -> Vec<Road> {
        std::mem::take(&mut self.roads)
    }
}
