//! WatchSet entity - ordered, capacity-bounded collection of targets

use crate::domain::value_objects::WatchHandle;

use super::WatchTarget;

/// Ordered collection of watch targets.
///
/// Never holds more than `capacity` targets and never two targets with the
/// same path string.
#[derive(Debug, Clone)]
pub struct WatchSet {
    targets: Vec<WatchTarget>,
    capacity: usize,
}

impl WatchSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            targets: Vec::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Add a target. Returns false (and drops it) when the set is full or
    /// already holds the same path.
    pub fn insert(&mut self, target: WatchTarget) -> bool {
        if self.is_full() || self.contains_path(target.path()) {
            return false;
        }
        self.targets.push(target);
        true
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.targets.iter().any(|t| t.path() == path)
    }

    pub fn find(&self, path: &str) -> Option<&WatchTarget> {
        self.targets.iter().find(|t| t.path() == path)
    }

    /// Index of the Active target currently bound through `handle`
    pub fn position_of(&self, handle: WatchHandle) -> Option<usize> {
        self.targets
            .iter()
            .position(|t| t.is_active() && t.handle() == Some(handle))
    }

    pub fn get(&self, index: usize) -> Option<&WatchTarget> {
        self.targets.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut WatchTarget> {
        self.targets.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WatchTarget> {
        self.targets.iter()
    }

    pub fn active_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_active()).count()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.targets.len() >= self.capacity
    }
}

impl<'a> IntoIterator for &'a WatchSet {
    type Item = &'a WatchTarget;
    type IntoIter = std::slice::Iter<'a, WatchTarget>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(path: &str, raw: u64) -> WatchTarget {
        WatchTarget::new(path, WatchHandle::new(raw))
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut set = WatchSet::with_capacity(3);
        assert!(set.insert(target("b", 1)));
        assert!(set.insert(target("a", 2)));

        let paths: Vec<_> = set.iter().map(|t| t.path()).collect();
        assert_eq!(paths, vec!["b", "a"]);
    }

    #[test]
    fn test_insert_rejects_duplicate_path() {
        let mut set = WatchSet::with_capacity(3);
        assert!(set.insert(target("a", 1)));
        assert!(!set.insert(target("a", 2)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.find("a").and_then(|t| t.handle()), Some(WatchHandle::new(1)));
    }

    #[test]
    fn test_insert_respects_capacity() {
        let mut set = WatchSet::with_capacity(2);
        assert!(set.insert(target("a", 1)));
        assert!(set.insert(target("b", 2)));
        assert!(!set.insert(target("c", 3)));
        assert_eq!(set.len(), 2);
        assert!(set.is_full());
    }

    #[test]
    fn test_position_of_ignores_detached_targets() {
        let mut set = WatchSet::with_capacity(2);
        set.insert(target("a", 1));
        set.insert(target("b", 2));

        assert_eq!(set.position_of(WatchHandle::new(2)), Some(1));

        set.get_mut(1).unwrap().detach();
        assert_eq!(set.position_of(WatchHandle::new(2)), None);
        assert_eq!(set.active_count(), 1);
    }
}
