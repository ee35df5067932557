//! An answer is the unit of data flowing out of query execution: a
//! binding of each (selected) query variable to a concept.  Answers
//! are what resolution reconciles when a rule head's variables must be
//! renamed to the variables of the atom that triggered the rule.
//!
//! Answers are stored in differential dataflow collections, so they
//! should stay light: a sorted map with shared variable names.

use crate::ground::Concept;
use crate::variable::Var;
use std::collections::BTreeMap;
use std::fmt;
// This I/O stuff is only needed for the stub Abomonation trait
// implementation.
use std::io::Result as IOResult;
use std::io::Write;

#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Answer {
    bindings: BTreeMap<Var, Concept>,
}

impl Answer {
    /// Returns the empty answer, which binds no variable.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, var: &Var) -> Option<Concept> {
        self.bindings.get(var).copied()
    }

    /// Returns the bound variables, in ascending order.
    pub fn vars(&self) -> impl Iterator<Item = &Var> {
        self.bindings.keys()
    }

    /// Returns the (variable, concept) bindings, sorted by variable.
    pub fn iter(&self) -> impl Iterator<Item = (&Var, Concept)> {
        self.bindings.iter().map(|(var, concept)| (var, *concept))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Restricts the answer to `vars`.  Variables absent from the
    /// answer are silently ignored.
    #[must_use]
    pub fn project(&self, vars: &[Var]) -> Answer {
        vars.iter()
            .filter_map(|var| self.get(var).map(|concept| (var.clone(), concept)))
            .collect()
    }

    /// Returns the union of `self` and `other`, or `None` if they bind
    /// the same variable to different concepts.
    #[must_use]
    pub fn merge(&self, other: &Answer) -> Option<Answer> {
        let mut bindings = self.bindings.clone();

        for (var, concept) in other.iter() {
            if !bind(&mut bindings, var.clone(), concept) {
                return None;
            }
        }

        Some(Answer { bindings })
    }

    /// Builds an answer from `bindings`, or returns `None` if the same
    /// variable is bound to two different concepts.
    pub fn try_from_bindings<I>(bindings: I) -> Option<Answer>
    where
        I: IntoIterator<Item = (Var, Concept)>,
    {
        let mut ret = BTreeMap::new();

        for (var, concept) in bindings {
            if !bind(&mut ret, var, concept) {
                return None;
            }
        }

        Some(Answer { bindings: ret })
    }
}

/// Binds `var` to `concept` in `bindings`, and returns false on
/// conflict with a prior binding.
fn bind(bindings: &mut BTreeMap<Var, Concept>, var: Var, concept: Concept) -> bool {
    *bindings.entry(var).or_insert(concept) == concept
}

/// Later bindings override earlier ones; use `try_from_bindings` to
/// detect conflicts.
impl std::iter::FromIterator<(Var, Concept)> for Answer {
    fn from_iter<I: IntoIterator<Item = (Var, Concept)>>(iter: I) -> Self {
        Answer {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (var, concept)) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", var, concept.id())?;
        }
        write!(f, "}}")
    }
}

/// Differential Dataflow has a hard requirement on "Abomonating" data
/// in Collection, but we don't exercise the logic that actually
/// abomonates.
#[cfg(not(tarpaulin_include))]
impl abomonation::Abomonation for Answer {
    unsafe fn entomb<W: Write>(&self, _write: &mut W) -> IOResult<()> {
        panic!("Abomonation not implemented for Answers.");
    }

    unsafe fn exhume<'a, 'b>(&'a mut self, _bytes: &'b mut [u8]) -> Option<&'b mut [u8]> {
        panic!("Abomonation not implemented for Answers.");
    }

    fn extent(&self) -> usize {
        panic!("Abomonation not implemented for Answers.");
    }
}

#[cfg(test)]
fn answer(pairs: &[(&str, u32)]) -> Answer {
    pairs
        .iter()
        .map(|(name, id)| (Var::new(name), Concept::new(*id)))
        .collect()
}

#[test]
fn construct() {
    let x = Var::new("x");
    let ans = answer(&[("y", 2), ("x", 1)]);

    assert_eq!(ans.len(), 2);
    assert!(!ans.is_empty());
    assert_eq!(ans.get(&x), Some(Concept::new(1)));
    assert_eq!(ans.get(&Var::new("z")), None);
    assert_eq!(
        ans.vars().cloned().collect::<Vec<_>>(),
        [Var::new("x"), Var::new("y")]
    );
    assert_eq!(ans.to_string(), "{$x=1, $y=2}");
    assert!(Answer::new().is_empty());
}

#[test]
fn try_from_bindings_conflict() {
    let x = Var::new("x");

    assert_eq!(
        Answer::try_from_bindings(vec![(x.clone(), Concept::new(1)), (x.clone(), Concept::new(1))]),
        Some(answer(&[("x", 1)]))
    );
    assert_eq!(
        Answer::try_from_bindings(vec![(x.clone(), Concept::new(1)), (x, Concept::new(2))]),
        None
    );
}

#[test]
fn project() {
    let ans = answer(&[("x", 1), ("y", 2), ("z", 3)]);

    assert_eq!(
        ans.project(&[Var::new("z"), Var::new("x"), Var::new("w")]),
        answer(&[("x", 1), ("z", 3)])
    );
    assert!(ans.project(&[]).is_empty());
}

#[test]
fn merge() {
    let left = answer(&[("x", 1), ("y", 2)]);

    assert_eq!(
        left.merge(&answer(&[("y", 2), ("z", 3)])),
        Some(answer(&[("x", 1), ("y", 2), ("z", 3)]))
    );
    assert_eq!(left.merge(&answer(&[("y", 4)])), None);
    assert_eq!(left.merge(&Answer::new()), Some(left.clone()));
}
