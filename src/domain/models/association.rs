use serde::Serialize;
use std::collections::BTreeSet;

/// Set difference between the promoters an event has and the ones it should have.
/// Computed once, then applied as a single batch: inserts first, then deletes.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct PromoterDiff {
    pub to_add: BTreeSet<String>,
    pub to_remove: BTreeSet<String>,
}

impl PromoterDiff {
    pub fn between(current: &BTreeSet<String>, desired: &BTreeSet<String>) -> Self {
        Self {
            to_add: desired.difference(current).cloned().collect(),
            to_remove: current.difference(desired).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn diff_splits_into_additions_and_removals() {
        let diff = PromoterDiff::between(&set(&["p1", "p2"]), &set(&["p2", "p3"]));
        assert_eq!(diff.to_add, set(&["p3"]));
        assert_eq!(diff.to_remove, set(&["p1"]));
    }

    #[test]
    fn identical_sets_produce_empty_diff() {
        let diff = PromoterDiff::between(&set(&["p1", "p2"]), &set(&["p2", "p1"]));
        assert!(diff.is_empty());
    }

    #[test]
    fn fresh_event_adds_everything() {
        let diff = PromoterDiff::between(&BTreeSet::new(), &set(&["p1"]));
        assert_eq!(diff.to_add, set(&["p1"]));
        assert!(diff.to_remove.is_empty());
    }
}
