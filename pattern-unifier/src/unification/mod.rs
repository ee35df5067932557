//! The reasoner never unifies arbitrary terms: by the time two graph
//! patterns reach this module, an upstream alignment step has already
//! decided which variable of one pattern may stand for which variable
//! of the other.  What remains is an algebra of variable
//! correspondences, used to rewrite queries when resolving them
//! against rule heads, and to reconcile the answers that come back.
//!
//! A `Unifier` is one such correspondence, a `MultiUnifier` is the
//! (disjunctive) set of every admissible correspondence between two
//! patterns.  Both are immutable values, safe to share across
//! reasoning threads; every operation builds a new value.
//!
//! The only failures are contract violations on `MultiUnifier`
//! accessors (see `UnifierError`): "no unification exists" is a
//! perfectly normal value, the empty `MultiUnifier`.
mod error;
mod multi_unifier;
mod multimap;
mod unifier;

#[cfg(test)]
mod proptest_tests;

pub use error::Result;
pub use error::UnifierError;
pub use multi_unifier::MultiUnifier;
pub use multimap::VarMultimap;
pub use unifier::Unifier;
