//! A variable correspondence is not necessarily a function: when a
//! query atom mentions the same variable twice, e.g., `($x, $x)`, and
//! the rule head it unifies with mentions two, `($a, $b)`, `$x` must
//! map to both `$a` and `$b`.  `VarMultimap` is the association we use
//! to represent such correspondences without dropping targets.
use crate::variable::Var;
use std::collections::{BTreeMap, BTreeSet};

/// A sorted set multimap from source to target variables.  Each
/// (source, target) pair appears at most once, and sources are only
/// present when they have at least one target.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VarMultimap {
    map: BTreeMap<Var, BTreeSet<Var>>,
}

impl VarMultimap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the pair `source -> target`, and returns whether the pair
    /// was new.
    pub fn insert(&mut self, source: Var, target: Var) -> bool {
        self.map.entry(source).or_default().insert(target)
    }

    /// Returns the targets of `source`, in ascending order.  The
    /// iterator is empty when `source` is unmapped.
    pub fn get<'a>(&'a self, source: &Var) -> impl Iterator<Item = &'a Var> + 'a {
        self.map.get(source).into_iter().flatten()
    }

    #[must_use]
    pub fn contains_key(&self, source: &Var) -> bool {
        self.map.contains_key(source)
    }

    #[must_use]
    pub fn contains_value(&self, target: &Var) -> bool {
        self.map.values().any(|targets| targets.contains(target))
    }

    #[must_use]
    pub fn contains_pair(&self, source: &Var, target: &Var) -> bool {
        self.map
            .get(source)
            .map_or(false, |targets| targets.contains(target))
    }

    /// Returns the mapped source variables, in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &Var> {
        self.map.keys()
    }

    /// Returns the set of all target variables.
    #[must_use]
    pub fn values(&self) -> BTreeSet<&Var> {
        self.map.values().flatten().collect()
    }

    /// Returns every (source, target) pair, sorted by source, then by
    /// target.
    pub fn pairs(&self) -> impl Iterator<Item = (&Var, &Var)> {
        self.map
            .iter()
            .flat_map(|(source, targets)| targets.iter().map(move |target| (source, target)))
    }

    /// Returns the number of pairs (not of sources).
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the multimap with each `s -> t` pair flipped to `t -> s`.
    #[must_use]
    pub fn inverse(&self) -> VarMultimap {
        self.pairs()
            .map(|(source, target)| (target.clone(), source.clone()))
            .collect()
    }

    /// Returns true iff every pair in `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &VarMultimap) -> bool {
        self.map.iter().all(|(source, targets)| {
            other
                .map
                .get(source)
                .map_or(false, |other_targets| targets.is_subset(other_targets))
        })
    }

    /// Returns the multimap with the pairs of both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &VarMultimap) -> VarMultimap {
        let mut ret = self.clone();
        ret.extend(
            other
                .pairs()
                .map(|(source, target)| (source.clone(), target.clone())),
        );
        ret
    }
}

impl Extend<(Var, Var)> for VarMultimap {
    fn extend<I: IntoIterator<Item = (Var, Var)>>(&mut self, iter: I) {
        for (source, target) in iter {
            self.insert(source, target);
        }
    }
}

impl std::iter::FromIterator<(Var, Var)> for VarMultimap {
    fn from_iter<I: IntoIterator<Item = (Var, Var)>>(iter: I) -> Self {
        let mut ret = VarMultimap::new();
        ret.extend(iter);
        ret
    }
}

#[cfg(test)]
fn multimap(pairs: &[(&str, &str)]) -> VarMultimap {
    pairs
        .iter()
        .map(|(s, t)| (Var::new(s), Var::new(t)))
        .collect()
}

#[test]
fn test_insert_dedup() {
    let mut map = VarMultimap::new();

    assert!(map.is_empty());
    assert!(map.insert(Var::new("x"), Var::new("a")));
    assert!(map.insert(Var::new("x"), Var::new("b")));
    assert!(!map.insert(Var::new("x"), Var::new("a")));

    assert_eq!(map.len(), 2);
    assert_eq!(map.keys().count(), 1);
    assert_eq!(
        map.get(&Var::new("x")).cloned().collect::<Vec<_>>(),
        [Var::new("a"), Var::new("b")]
    );
    assert_eq!(map.get(&Var::new("y")).count(), 0);
}

#[test]
fn test_lookups() {
    let map = multimap(&[("x", "a"), ("y", "a"), ("y", "b")]);

    assert!(map.contains_key(&Var::new("y")));
    assert!(!map.contains_key(&Var::new("a")));
    assert!(map.contains_value(&Var::new("b")));
    assert!(!map.contains_value(&Var::new("x")));
    assert!(map.contains_pair(&Var::new("y"), &Var::new("b")));
    assert!(!map.contains_pair(&Var::new("x"), &Var::new("b")));
    assert_eq!(map.values().len(), 2);
    assert_eq!(
        map.pairs()
            .map(|(s, t)| format!("{}{}", s.name(), t.name()))
            .collect::<Vec<_>>(),
        ["xa", "ya", "yb"]
    );
}

#[test]
fn test_order_independent_equality() {
    assert_eq!(
        multimap(&[("x", "a"), ("y", "b"), ("x", "c")]),
        multimap(&[("x", "c"), ("y", "b"), ("x", "a"), ("x", "a")])
    );
}

#[test]
fn test_inverse() {
    let map = multimap(&[("x", "a"), ("x", "b"), ("y", "a")]);

    assert_eq!(
        map.inverse(),
        multimap(&[("a", "x"), ("b", "x"), ("a", "y")])
    );
    assert_eq!(map.inverse().inverse(), map);
    assert!(VarMultimap::new().inverse().is_empty());
}

#[test]
fn test_subset_union() {
    let small = multimap(&[("x", "a")]);
    let big = multimap(&[("x", "a"), ("y", "b")]);
    let other = multimap(&[("x", "b")]);

    assert!(small.is_subset(&big));
    assert!(!big.is_subset(&small));
    assert!(!other.is_subset(&big));
    assert!(VarMultimap::new().is_subset(&small));
    assert_eq!(small.union(&other), multimap(&[("x", "a"), ("x", "b")]));
    assert_eq!(small.union(&big), big);
}
