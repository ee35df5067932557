//! Matching a pattern in a graph is inherently disjunctive: a query
//! atom may align with a rule head in zero, one, or many structurally
//! distinct ways.  A `MultiUnifier` holds all of these alternatives.
//!
//! There are no special variants.  "No unification exists" is the
//! empty set (`non_existent`), "the patterns already agree" is the set
//! containing only the identity (`trivial`), and every operation
//! applies uniformly to both.
use super::{Result, Unifier, UnifierError, VarMultimap};
use crate::config::UnifierConfig;
use crate::ground::Answer;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// An immutable, deduplicated set of alternative unifiers.
///
/// The set is sorted, so iteration (and `get_any`) is deterministic
/// for a given set of alternatives.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MultiUnifier {
    unifiers: Arc<BTreeSet<Unifier>>,
}

impl MultiUnifier {
    /// Collects `unifiers` into a multi-unifier; structurally equal
    /// unifiers collapse into one alternative.
    pub fn new<I: IntoIterator<Item = Unifier>>(unifiers: I) -> Self {
        let unifiers: BTreeSet<Unifier> = unifiers.into_iter().collect();

        trace!(alternatives = unifiers.len(), "multi_unifier_new");
        Self {
            unifiers: Arc::new(unifiers),
        }
    }

    /// Returns the multi-unifier with `unifier` as its sole alternative.
    #[must_use]
    pub fn single(unifier: Unifier) -> Self {
        Self::new(std::iter::once(unifier))
    }

    /// Returns a multi-unifier with one alternative per mapping.
    pub fn from_mappings<I: IntoIterator<Item = VarMultimap>>(mappings: I) -> Self {
        Self::new(mappings.into_iter().map(Unifier::new))
    }

    /// The patterns trivially unify: the only alternative is the
    /// identity.
    #[must_use]
    pub fn trivial() -> Self {
        Self::single(Unifier::identity())
    }

    /// The patterns do not unify: there is no alternative.
    #[must_use]
    pub fn non_existent() -> Self {
        Self::new(std::iter::empty())
    }

    #[must_use]
    pub fn unifiers(&self) -> &BTreeSet<Unifier> {
        &self.unifiers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unifier> {
        self.unifiers.iter()
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.unifiers.len()
    }

    /// True iff no unification is possible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unifiers.is_empty()
    }

    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.size() == 1 && self.iter().all(Unifier::is_identity)
    }

    /// Returns the only alternative.
    ///
    /// # Errors
    ///
    /// Returns `NotSingleton` unless there is exactly one alternative.
    pub fn get_unifier(&self) -> Result<&Unifier> {
        match (self.size(), self.iter().next()) {
            (1, Some(unifier)) => Ok(unifier),
            (size, _) => Err(UnifierError::NotSingleton { size }),
        }
    }

    /// Returns any alternative.  The current implementation always
    /// returns the smallest one, but callers must not rely on which
    /// alternative they get when there is more than one.
    ///
    /// # Errors
    ///
    /// Returns `NoUnifierExists` when there is no alternative.
    pub fn get_any(&self) -> Result<&Unifier> {
        self.iter().next().ok_or(UnifierError::NoUnifierExists)
    }

    /// True iff some alternative subsumes `unifier`, i.e., `unifier` is
    /// a more specific instance of one of the alternatives.
    #[must_use]
    pub fn contains(&self, unifier: &Unifier) -> bool {
        self.iter().any(|member| member.contains_all(unifier))
    }

    /// True iff every alternative of `other` is `contain`ed in `self`.
    #[must_use]
    pub fn contains_all(&self, other: &MultiUnifier) -> bool {
        other.iter().all(|unifier| self.contains(unifier))
    }

    /// Inverts every alternative.  Distinct alternatives may invert to
    /// the same unifier, so the result may be smaller.
    #[must_use]
    pub fn inverse(&self) -> MultiUnifier {
        Self::new(self.iter().map(Unifier::inverse))
    }

    /// Returns the alternatives that satisfy `predicate`.
    #[must_use]
    pub fn filter<P: FnMut(&Unifier) -> bool>(&self, mut predicate: P) -> MultiUnifier {
        Self::new(self.iter().filter(|unifier| predicate(*unifier)).cloned())
    }

    /// Combines every alternative of `self` with every alternative of
    /// `other` (see `Unifier::combine`).  The trivial multi-unifier is a
    /// unit, and the non-existent one absorbs everything.
    ///
    /// # Errors
    ///
    /// Returns `AlternativeLimitExceeded` when the cartesian product is
    /// larger than `config.max_alternatives`.
    pub fn combine(&self, other: &MultiUnifier, config: &UnifierConfig) -> Result<MultiUnifier> {
        let required = self.size().saturating_mul(other.size());

        if !config.allows(required) {
            debug!(
                required,
                limit = config.max_alternatives,
                "multi_unifier_combine_limit"
            );
            return Err(UnifierError::AlternativeLimitExceeded {
                limit: config.max_alternatives,
                required,
            });
        }

        Ok(Self::new(self.iter().flat_map(move |first| {
            other.iter().map(move |second| first.combine(second))
        })))
    }

    /// Applies every alternative to `answer`, and returns the distinct
    /// consistent results.
    #[must_use]
    pub fn apply(&self, answer: &Answer) -> BTreeSet<Answer> {
        let consistent: Vec<Answer> = self
            .iter()
            .filter_map(|unifier| unifier.apply(answer))
            .collect();

        if consistent.len() < self.size() {
            trace!(
                alternatives = self.size(),
                dropped = self.size() - consistent.len(),
                "multi_unifier_apply_dropped"
            );
        }

        consistent.into_iter().collect()
    }
}

impl From<Unifier> for MultiUnifier {
    fn from(unifier: Unifier) -> Self {
        Self::single(unifier)
    }
}

impl std::iter::FromIterator<Unifier> for MultiUnifier {
    fn from_iter<I: IntoIterator<Item = Unifier>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a MultiUnifier {
    type Item = &'a Unifier;
    type IntoIter = std::collections::btree_set::Iter<'a, Unifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.unifiers.iter()
    }
}

impl fmt::Display for MultiUnifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, unifier) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", unifier)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
fn mapping(pairs: &[(&str, &str)]) -> VarMultimap {
    use crate::variable::Var;

    pairs
        .iter()
        .map(|(s, t)| (Var::new(s), Var::new(t)))
        .collect()
}

#[cfg(test)]
fn unifier(pairs: &[(&str, &str)]) -> Unifier {
    Unifier::new(mapping(pairs))
}

#[test]
fn test_trivial() {
    let trivial = MultiUnifier::trivial();

    assert_eq!(trivial.size(), 1);
    assert!(!trivial.is_empty());
    assert!(trivial.is_trivial());
    assert_eq!(trivial.get_unifier(), Ok(&Unifier::identity()));
    assert!(trivial.get_unifier().expect("singleton").is_empty());
    assert_eq!(trivial.get_any(), Ok(&Unifier::identity()));
    assert_eq!(trivial.to_string(), "[{}]");
}

#[test]
fn test_non_existent() {
    let none = MultiUnifier::non_existent();

    assert!(none.is_empty());
    assert_eq!(none.size(), 0);
    assert!(!none.is_trivial());
    assert_eq!(none.get_any(), Err(UnifierError::NoUnifierExists));
    assert_eq!(
        none.get_unifier(),
        Err(UnifierError::NotSingleton { size: 0 })
    );
    assert_eq!(none.iter().count(), 0);
    assert_eq!(none.to_string(), "[]");
}

#[test]
fn test_dedup() {
    let m1 = mapping(&[("x", "a")]);
    let m2 = mapping(&[("x", "b")]);

    let distinct = MultiUnifier::from_mappings(vec![m1.clone(), m2]);
    assert_eq!(distinct.size(), 2);

    let same = MultiUnifier::from_mappings(vec![m1.clone(), m1]);
    assert_eq!(same.size(), 1);

    let independently_built: MultiUnifier = vec![
        unifier(&[("x", "a"), ("y", "b")]),
        unifier(&[("y", "b"), ("x", "a")]),
    ]
    .into_iter()
    .collect();
    assert_eq!(independently_built.size(), 1);
}

#[test]
fn test_get_unifier() {
    let u = unifier(&[("x", "a")]);
    let single: MultiUnifier = u.clone().into();

    assert_eq!(single.get_unifier(), Ok(&u));
    assert_eq!(MultiUnifier::single(u.clone()), single);

    let double = MultiUnifier::new(vec![u, unifier(&[("x", "b")])]);
    assert_eq!(
        double.get_unifier(),
        Err(UnifierError::NotSingleton { size: 2 })
    );
    // `get_any` is fine with multiple alternatives.
    assert!(double.contains(double.get_any().expect("non-empty")));
}

#[test]
fn test_contains() {
    let general = unifier(&[("x", "a"), ("y", "b")]);
    let specific = unifier(&[("x", "a")]);

    assert!(MultiUnifier::single(general.clone()).contains(&specific));
    assert!(!MultiUnifier::single(specific.clone()).contains(&general));
    assert!(!MultiUnifier::non_existent().contains(&specific));
    // Every non-empty multi-unifier covers the identity.
    assert!(MultiUnifier::single(specific).contains(&Unifier::identity()));
}

#[test]
fn test_contains_all() {
    let m = MultiUnifier::new(vec![
        unifier(&[("x", "a"), ("y", "b")]),
        unifier(&[("x", "b"), ("y", "a")]),
    ]);
    let narrower = MultiUnifier::new(vec![unifier(&[("x", "a")]), unifier(&[("y", "a")])]);
    let other = MultiUnifier::single(unifier(&[("x", "c")]));

    assert!(m.contains_all(&m));
    assert!(m.contains_all(&narrower));
    assert!(!narrower.contains_all(&m));
    assert!(!m.contains_all(&other));
    assert!(m.contains_all(&MultiUnifier::non_existent()));
    assert!(MultiUnifier::non_existent().contains_all(&MultiUnifier::non_existent()));
}

#[test]
fn test_inverse() {
    let m = MultiUnifier::new(vec![
        unifier(&[("x", "a"), ("y", "b")]),
        unifier(&[("x", "b"), ("y", "a")]),
    ]);

    assert_eq!(
        m.inverse(),
        MultiUnifier::new(vec![
            unifier(&[("a", "x"), ("b", "y")]),
            unifier(&[("b", "x"), ("a", "y")]),
        ])
    );
    assert_eq!(m.inverse().inverse(), m);
    assert_eq!(MultiUnifier::trivial().inverse(), MultiUnifier::trivial());
    assert!(MultiUnifier::non_existent().inverse().is_empty());
}

#[test]
fn test_filter() {
    use crate::variable::Var;

    let m = MultiUnifier::new(vec![
        unifier(&[("x", "a")]),
        unifier(&[("x", "b")]),
        unifier(&[("x", "a"), ("y", "b")]),
    ]);

    let filtered = m.filter(|u| u.contains_value(&Var::new("a")));
    assert_eq!(filtered.size(), 2);
    assert!(m.contains_all(&filtered));
    assert_eq!(m.size(), 3);
    assert!(m.filter(|_| false).is_empty());
}

#[test]
fn test_combine() {
    let config = UnifierConfig::default();
    let first = MultiUnifier::new(vec![unifier(&[("x", "a")]), unifier(&[("x", "b")])]);
    let second = MultiUnifier::new(vec![unifier(&[("a", "p"), ("b", "p")])]);

    // Each alternative renames `$x` to `$p`; the pair of `second` that
    // the alternative does not produce passes through.
    assert_eq!(
        first.combine(&second, &config).expect("ok"),
        MultiUnifier::new(vec![
            unifier(&[("x", "p"), ("b", "p")]),
            unifier(&[("x", "p"), ("a", "p")]),
        ])
    );
    assert_eq!(
        first.combine(&MultiUnifier::trivial(), &config).expect("ok"),
        first
    );
    assert_eq!(
        MultiUnifier::trivial().combine(&first, &config).expect("ok"),
        first
    );
    assert!(first
        .combine(&MultiUnifier::non_existent(), &config)
        .expect("ok")
        .is_empty());
}

#[test]
fn test_combine_limit() {
    let config = UnifierConfig {
        max_alternatives: 3,
    };
    let first = MultiUnifier::new(vec![unifier(&[("x", "a")]), unifier(&[("x", "b")])]);

    assert_eq!(
        first.combine(&first, &config),
        Err(UnifierError::AlternativeLimitExceeded {
            limit: 3,
            required: 4
        })
    );
    assert!(first.combine(&first, &UnifierConfig::unlimited()).is_ok());
}

#[test]
fn test_apply() {
    use crate::ground::Concept;
    use crate::variable::Var;

    let answer: Answer = vec![
        (Var::new("x"), Concept::new(1)),
        (Var::new("y"), Concept::new(2)),
    ]
    .into_iter()
    .collect();
    let m = MultiUnifier::new(vec![
        unifier(&[("x", "a"), ("y", "b")]),
        unifier(&[("x", "b"), ("y", "a")]),
        unifier(&[("x", "a"), ("y", "a")]),
    ]);

    let results = m.apply(&answer);
    assert_eq!(results.len(), 2);
    assert!(results.contains(
        &vec![
            (Var::new("a"), Concept::new(1)),
            (Var::new("b"), Concept::new(2)),
        ]
        .into_iter()
        .collect()
    ));

    assert!(MultiUnifier::non_existent().apply(&answer).is_empty());
    assert_eq!(
        MultiUnifier::trivial().apply(&answer),
        std::iter::once(answer).collect()
    );
}

#[test]
fn test_apply_merges_equal_answers() {
    use crate::ground::Concept;
    use crate::variable::Var;

    // Both alternatives are consistent and rename `$x=1` to `$a=1`.
    let answer: Answer = std::iter::once((Var::new("x"), Concept::new(1))).collect();
    let m = MultiUnifier::new(vec![
        unifier(&[("x", "a")]),
        unifier(&[("x", "a"), ("y", "b")]),
    ]);

    assert_eq!(
        m.apply(&answer),
        std::iter::once(std::iter::once((Var::new("a"), Concept::new(1))).collect()).collect()
    );
}

#[test]
fn test_iteration() {
    let m = MultiUnifier::new(vec![unifier(&[("x", "b")]), unifier(&[("x", "a")])]);

    let mut count = 0;
    for u in &m {
        assert!(m.unifiers().contains(u));
        count += 1;
    }
    assert_eq!(count, m.size());
    assert_eq!(m.to_string(), "[{$x->$a}, {$x->$b}]");
}

#[test]
fn test_thread_sharing() {
    let m = MultiUnifier::single(unifier(&[("x", "a")]));
    let shared = m.clone();

    let rebuilt = std::thread::spawn(move || {
        MultiUnifier::new(shared.iter().cloned().chain(vec![unifier(&[("x", "a")])]))
    })
    .join()
    .expect("thread ok");

    assert_eq!(rebuilt, m);
}
