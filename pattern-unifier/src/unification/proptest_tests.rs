//! Property-based tests for the unifier algebra.

use super::{MultiUnifier, Unifier, UnifierError, VarMultimap};
use crate::config::UnifierConfig;
use crate::ground::{Answer, Concept};
use crate::variable::Var;
use proptest::prelude::*;

const SOURCES: [&str; 4] = ["x", "y", "z", "w"];
const TARGETS: [&str; 4] = ["a", "b", "c", "d"];
const RENAMED: [&str; 3] = ["p", "q", "r"];

fn arb_unifier() -> impl Strategy<Value = Unifier> {
    proptest::collection::vec((0..SOURCES.len(), 0..TARGETS.len()), 0..6).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(s, t)| (Var::new(SOURCES[s]), Var::new(TARGETS[t])))
            .collect::<Unifier>()
    })
}

/// Renames sources and targets alike into `RENAMED`, so that it may
/// chain after, or overlap with, `arb_unifier`.
fn arb_renaming() -> impl Strategy<Value = Unifier> {
    let sources = [SOURCES, TARGETS].concat();
    proptest::collection::vec((0..sources.len(), 0..RENAMED.len()), 0..6).prop_map(move |pairs| {
        pairs
            .into_iter()
            .map(|(s, t)| (Var::new(sources[s]), Var::new(RENAMED[t])))
            .collect::<Unifier>()
    })
}

/// Answers only bind source variables.
fn arb_answer() -> impl Strategy<Value = Answer> {
    proptest::collection::vec((0..SOURCES.len(), 1..4u32), 0..4).prop_map(|bindings| {
        bindings
            .into_iter()
            .map(|(var, id)| (Var::new(SOURCES[var]), Concept::new(id)))
            .collect::<Answer>()
    })
}

fn arb_multi_unifier() -> impl Strategy<Value = MultiUnifier> {
    proptest::collection::vec(arb_unifier(), 0..4).prop_map(MultiUnifier::new)
}

proptest! {
    #[test]
    fn prop_unifier_double_inverse(u in arb_unifier()) {
        prop_assert_eq!(u.inverse().inverse(), u);
    }

    #[test]
    fn prop_inverse_preserves_pairs(u in arb_unifier()) {
        let inverse = u.inverse();
        prop_assert_eq!(inverse.size(), u.size());
        for (source, target) in u.mappings() {
            prop_assert!(inverse.mapping().contains_pair(target, source));
        }
    }

    #[test]
    fn prop_multi_double_inverse(m in arb_multi_unifier()) {
        // Unifier inversion is injective, so no alternative collapses.
        prop_assert_eq!(m.inverse().size(), m.size());
        prop_assert_eq!(m.inverse().inverse(), m);
    }

    #[test]
    fn prop_contains_all_reflexive(m in arb_multi_unifier()) {
        prop_assert!(m.contains_all(&m));
    }

    #[test]
    fn prop_contains_matches_subset(m in arb_multi_unifier(), u in arb_unifier()) {
        let expected = m.iter().any(|member| u.mapping().is_subset(member.mapping()));
        prop_assert_eq!(m.contains(&u), expected);
    }

    #[test]
    fn prop_merge_contains_both(u in arb_unifier(), v in arb_unifier()) {
        let merged = u.merge(&v);
        prop_assert!(merged.contains_all(&u));
        prop_assert!(merged.contains_all(&v));
    }

    #[test]
    fn prop_combine_identity_unit(u in arb_unifier()) {
        prop_assert_eq!(u.combine(&Unifier::identity()), u.clone());
        prop_assert_eq!(Unifier::identity().combine(&u), u);
    }

    #[test]
    fn prop_combine_is_sequential_apply(first in arb_unifier(), second in arb_renaming(), ans in arb_answer()) {
        let combined = first.combine(&second).apply(&ans);
        let sequential = first.apply(&ans).and_then(|renamed| second.apply(&renamed));
        prop_assert_eq!(combined, sequential);
    }

    #[test]
    fn prop_multi_combine_trivial_unit(m in arb_multi_unifier()) {
        let config = UnifierConfig::unlimited();
        prop_assert_eq!(m.combine(&MultiUnifier::trivial(), &config).expect("ok"), m.clone());
        prop_assert!(m.combine(&MultiUnifier::non_existent(), &config).expect("ok").is_empty());
    }

    #[test]
    fn prop_dedup_by_value(u in arb_unifier()) {
        let rebuilt: Unifier = u
            .mappings()
            .map(|(s, t)| (s.clone(), t.clone()))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        let m = MultiUnifier::new(vec![u.clone(), rebuilt]);
        prop_assert_eq!(m.size(), 1);
        prop_assert_eq!(m.get_unifier(), Ok(&u));
    }

    #[test]
    fn prop_accessor_contracts(m in arb_multi_unifier()) {
        match m.size() {
            0 => {
                prop_assert_eq!(m.get_any(), Err(UnifierError::NoUnifierExists));
                prop_assert_eq!(m.get_unifier(), Err(UnifierError::NotSingleton { size: 0 }));
            }
            1 => {
                prop_assert_eq!(m.get_unifier(), m.get_any());
            }
            size => {
                prop_assert_eq!(m.get_unifier(), Err(UnifierError::NotSingleton { size }));
                prop_assert!(m.get_any().is_ok());
            }
        }
    }
}

#[test]
fn test_subsumption_scenario() {
    let (x, y, a, b) = (Var::new("x"), Var::new("y"), Var::new("a"), Var::new("b"));
    let unifier1 = Unifier::from_pairs(vec![(x.clone(), a.clone()), (y.clone(), b.clone())]);
    let unifier2 = Unifier::from_pairs(vec![(x, a)]);

    assert!(MultiUnifier::single(unifier1.clone()).contains(&unifier2));
    assert!(!MultiUnifier::single(unifier2).contains(&unifier1));
}

#[test]
fn test_inverse_scenario() {
    let mapping: VarMultimap = vec![
        (Var::new("x"), Var::new("a")),
        (Var::new("y"), Var::new("b")),
    ]
    .into_iter()
    .collect();
    let expected = Unifier::from_pairs(vec![
        (Var::new("a"), Var::new("x")),
        (Var::new("b"), Var::new("y")),
    ]);

    assert_eq!(Unifier::new(mapping).inverse(), expected);
}
