use std::collections::BTreeSet;
use std::sync::Arc;

/// Snapshot of expanded node ids.
///
/// Never mutated in place: every change produces a new snapshot, so holders
/// of an older one keep seeing the state they were handed. Clones share the
/// underlying set.
#[derive(Debug, Clone, Default)]
pub struct ExpandedIds(Arc<BTreeSet<String>>);

impl ExpandedIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Snapshot with `id` added. Returns a clone of `self` if already present.
    pub fn with(&self, id: &str) -> Self {
        if self.contains(id) {
            return self.clone();
        }
        let mut set = (*self.0).clone();
        set.insert(id.to_string());
        Self(Arc::new(set))
    }

    /// Snapshot with `id` removed. Returns a clone of `self` if absent.
    pub fn without(&self, id: &str) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        let mut set = (*self.0).clone();
        set.remove(id);
        Self(Arc::new(set))
    }

    pub fn toggled(&self, id: &str) -> Self {
        if self.contains(id) {
            self.without(id)
        } else {
            self.with(id)
        }
    }

    /// True when both handles point at the same snapshot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ExpandedIds {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Eq for ExpandedIds {}

impl<S: Into<String>> FromIterator<S> for ExpandedIds {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(Arc::new(iter.into_iter().map(Into::into).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_updates_share_the_snapshot() {
        let a: ExpandedIds = ["x"].into_iter().collect();
        assert!(a.with("x").ptr_eq(&a));
        assert!(a.without("y").ptr_eq(&a));
    }

    #[test]
    fn updates_leave_previous_snapshot_untouched() {
        let a: ExpandedIds = ["x"].into_iter().collect();
        let b = a.with("y");
        assert!(!a.contains("y"));
        assert!(b.contains("x") && b.contains("y"));
        assert_eq!(b.toggled("y"), a);
        assert!(!b.toggled("y").ptr_eq(&a));
    }
}
