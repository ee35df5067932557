//! A unifier is one concrete way to rename the variables of a source
//! pattern onto those of a target pattern.  Unifiers are values: they
//! are built once from a correspondence, and every operation returns a
//! new unifier.
use super::VarMultimap;
use crate::ground::Answer;
use crate::variable::Var;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// The mapping is shared behind an `Arc`, so unifiers may be cloned
/// into many multi-unifiers (and across threads) for the price of a
/// reference count.  Equality, hashing, and ordering only look at the
/// mapping's pairs.
///
/// The empty mapping is the identity: it matches trivially, and leaves
/// every variable as is.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Unifier {
    mapping: Arc<VarMultimap>,
}

impl Unifier {
    #[must_use]
    pub fn new(mapping: VarMultimap) -> Self {
        Self {
            mapping: Arc::new(mapping),
        }
    }

    /// Returns the identity (trivial) unifier.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Returns the unifier with all the `source -> target` `pairs`.
    pub fn from_pairs<I: IntoIterator<Item = (Var, Var)>>(pairs: I) -> Self {
        pairs.into_iter().collect()
    }

    #[must_use]
    pub fn mapping(&self) -> &VarMultimap {
        &self.mapping
    }

    /// Returns the targets of `source`; empty when `source` is unmapped.
    pub fn get<'a>(&'a self, source: &Var) -> impl Iterator<Item = &'a Var> + 'a {
        self.mapping.get(source)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Var> {
        self.mapping.keys()
    }

    #[must_use]
    pub fn values(&self) -> BTreeSet<&Var> {
        self.mapping.values()
    }

    /// Returns every `source -> target` pair.
    pub fn mappings(&self) -> impl Iterator<Item = (&Var, &Var)> {
        self.mapping.pairs()
    }

    #[must_use]
    pub fn contains_key(&self, source: &Var) -> bool {
        self.mapping.contains_key(source)
    }

    #[must_use]
    pub fn contains_value(&self, target: &Var) -> bool {
        self.mapping.contains_value(target)
    }

    /// Returns true iff every pair in `other` is also in `self`:
    /// `self` is at least as constraining as `other`.
    #[must_use]
    pub fn contains_all(&self, other: &Unifier) -> bool {
        other.mapping.is_subset(&self.mapping)
    }

    /// Number of `source -> target` pairs.
    #[must_use]
    pub fn size(&self) -> usize {
        self.mapping.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.is_empty()
    }

    /// Swaps the roles of source and target variables.
    #[must_use]
    pub fn inverse(&self) -> Unifier {
        Unifier::new(self.mapping.inverse())
    }

    /// Returns the unifier with the pairs of both `self` and `other`.
    #[must_use]
    pub fn merge(&self, other: &Unifier) -> Unifier {
        Unifier::new(self.mapping.union(&other.mapping))
    }

    /// Composes `self` with `other`: renaming an answer with the result
    /// is the same as renaming it with `self`, then with `other`, as
    /// long as the answer does not already bind targets of `self`.
    ///
    /// Targets of `self` that `other` does not rename are kept, and so
    /// are the pairs of `other` whose source `self` neither renames nor
    /// produces.  When no source of `other` is a variable of `self`,
    /// this degenerates to `merge`.
    #[must_use]
    pub fn combine(&self, other: &Unifier) -> Unifier {
        let produced = self.values();
        let mut ret = VarMultimap::new();

        for (source, target) in self.mappings() {
            if other.contains_key(target) {
                ret.extend(
                    other
                        .get(target)
                        .map(|renamed| (source.clone(), renamed.clone())),
                );
            } else {
                ret.insert(source.clone(), target.clone());
            }
        }

        ret.extend(
            other
                .mappings()
                .filter(|(source, _)| {
                    !produced.contains(source) && !self.contains_key(source)
                })
                .map(|(source, target)| (source.clone(), target.clone())),
        );

        Unifier::new(ret)
    }

    /// Renames the variables of `answer`: each mapped variable's
    /// concept is bound to all its targets, and unmapped variables
    /// are kept.
    ///
    /// Returns `None` when the renaming would bind the same variable to
    /// two different concepts, e.g., `{$x->$z, $y->$z}` applied to an
    /// answer where `$x` and `$y` differ.
    #[must_use]
    pub fn apply(&self, answer: &Answer) -> Option<Answer> {
        let mut renamed = Vec::with_capacity(answer.len());

        for (var, concept) in answer.iter() {
            if self.contains_key(var) {
                renamed.extend(self.get(var).map(|target| (target.clone(), concept)));
            } else {
                renamed.push((var.clone(), concept));
            }
        }

        Answer::try_from_bindings(renamed)
    }
}

impl From<VarMultimap> for Unifier {
    fn from(mapping: VarMultimap) -> Self {
        Self::new(mapping)
    }
}

impl std::iter::FromIterator<(Var, Var)> for Unifier {
    fn from_iter<I: IntoIterator<Item = (Var, Var)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Unifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (source, target)) in self.mappings().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}->{}", source, target)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
fn unifier(pairs: &[(&str, &str)]) -> Unifier {
    pairs
        .iter()
        .map(|(s, t)| (Var::new(s), Var::new(t)))
        .collect()
}

#[cfg(test)]
fn answer(pairs: &[(&str, u32)]) -> Answer {
    use crate::ground::Concept;

    pairs
        .iter()
        .map(|(name, id)| (Var::new(name), Concept::new(*id)))
        .collect()
}

#[test]
fn test_identity() {
    let id = Unifier::identity();

    assert!(id.is_identity());
    assert!(id.is_empty());
    assert_eq!(id.size(), 0);
    assert_eq!(id, Unifier::default());
    assert_eq!(id, Unifier::new(VarMultimap::new()));
    assert_eq!(id.inverse(), id);
    assert_eq!(id.to_string(), "{}");
}

#[test]
fn test_accessors() {
    let u = unifier(&[("x", "a"), ("x", "b"), ("y", "b")]);

    assert_eq!(u.size(), 3);
    assert!(!u.is_identity());
    assert!(u.contains_key(&Var::new("x")));
    assert!(!u.contains_key(&Var::new("b")));
    assert!(u.contains_value(&Var::new("b")));
    assert!(!u.contains_value(&Var::new("y")));
    assert_eq!(u.keys().count(), 2);
    assert_eq!(u.values().len(), 2);
    assert_eq!(
        u.get(&Var::new("x")).cloned().collect::<Vec<_>>(),
        [Var::new("a"), Var::new("b")]
    );
    assert_eq!(u.to_string(), "{$x->$a, $x->$b, $y->$b}");
}

#[test]
fn test_structural_equality() {
    use std::collections::HashSet;

    let u1 = Unifier::from_pairs(vec![
        (Var::new("x"), Var::new("a")),
        (Var::new("y"), Var::new("b")),
    ]);
    let u2 = unifier(&[("y", "b"), ("x", "a")]);

    assert_eq!(u1, u2);
    assert_eq!(
        [u1, u2].iter().cloned().collect::<HashSet<_>>().len(),
        1
    );
}

#[test]
fn test_inverse() {
    let u = unifier(&[("x", "a"), ("y", "b")]);

    assert_eq!(u.inverse(), unifier(&[("a", "x"), ("b", "y")]));
    assert_eq!(u.inverse().inverse(), u);

    // Non-injective unifiers invert to multi-valued ones.
    let merging = unifier(&[("x", "a"), ("y", "a")]);
    assert_eq!(merging.inverse(), unifier(&[("a", "x"), ("a", "y")]));
    assert_eq!(merging.inverse().inverse(), merging);
}

#[test]
fn test_contains_all() {
    let general = unifier(&[("x", "a"), ("y", "b")]);
    let specific = unifier(&[("x", "a")]);

    assert!(general.contains_all(&specific));
    assert!(!specific.contains_all(&general));
    assert!(general.contains_all(&general));
    assert!(general.contains_all(&Unifier::identity()));
    assert!(!general.contains_all(&unifier(&[("x", "b")])));
}

#[test]
fn test_merge() {
    assert_eq!(
        unifier(&[("x", "a")]).merge(&unifier(&[("x", "b"), ("y", "c")])),
        unifier(&[("x", "a"), ("x", "b"), ("y", "c")])
    );
}

#[test]
fn test_combine_chains() {
    let first = unifier(&[("x", "a"), ("y", "b")]);
    let second = unifier(&[("a", "p"), ("a", "q"), ("c", "r")]);

    assert_eq!(
        first.combine(&second),
        unifier(&[("x", "p"), ("x", "q"), ("y", "b"), ("c", "r")])
    );
}

#[test]
fn test_combine_renamed_source() {
    // `$x` is renamed away by `first`, so `second`'s `$x->$q` never
    // sees it.
    let first = unifier(&[("x", "a")]);
    let second = unifier(&[("a", "p"), ("x", "q")]);
    let combined = first.combine(&second);
    let ans = answer(&[("x", 1)]);

    assert_eq!(combined, unifier(&[("x", "p")]));
    assert_eq!(combined.apply(&ans), Some(answer(&[("p", 1)])));
    assert_eq!(
        combined.apply(&ans),
        first.apply(&ans).and_then(|renamed| second.apply(&renamed))
    );
}

#[test]
fn test_combine_disjoint_is_merge() {
    let first = unifier(&[("x", "a")]);
    let second = unifier(&[("y", "b")]);

    assert_eq!(first.combine(&second), first.merge(&second));
}

#[test]
fn test_combine_identity() {
    let u = unifier(&[("x", "a"), ("y", "a")]);

    assert_eq!(u.combine(&Unifier::identity()), u);
    assert_eq!(Unifier::identity().combine(&u), u);
}

#[test]
fn test_combine_with_inverse() {
    let u = unifier(&[("x", "a"), ("y", "b")]);

    assert_eq!(u.combine(&u.inverse()), unifier(&[("x", "x"), ("y", "y")]));
}

#[test]
fn test_apply() {
    let u = unifier(&[("x", "a"), ("y", "b")]);

    assert_eq!(
        u.apply(&answer(&[("x", 1), ("y", 2), ("z", 3)])),
        Some(answer(&[("a", 1), ("b", 2), ("z", 3)]))
    );
    assert_eq!(
        Unifier::identity().apply(&answer(&[("x", 1)])),
        Some(answer(&[("x", 1)]))
    );
}

#[test]
fn test_apply_fans_out() {
    let u = unifier(&[("x", "a"), ("x", "b")]);

    assert_eq!(
        u.apply(&answer(&[("x", 1)])),
        Some(answer(&[("a", 1), ("b", 1)]))
    );
}

#[test]
fn test_apply_conflict() {
    let u = unifier(&[("x", "z"), ("y", "z")]);

    assert_eq!(u.apply(&answer(&[("x", 1), ("y", 2)])), None);
    assert_eq!(
        u.apply(&answer(&[("x", 1), ("y", 1)])),
        Some(answer(&[("z", 1)]))
    );
}
