//! Variable unification for a graph-query reasoner.
//!
//! When the reasoner resolves a query atom against a rule head (or
//! another atom), it needs to know how the variables of one pattern
//! may be renamed onto those of the other.  There may be no such
//! renaming, or several: this crate represents each renaming as a
//! [`Unifier`](unification::Unifier) and the set of all admissible
//! renamings as a [`MultiUnifier`](unification::MultiUnifier), and
//! implements the algebra (inversion, subsumption, composition) that
//! resolution is built on.
//!
//! ```
//! use pattern_unifier::unification::{MultiUnifier, Unifier};
//! use pattern_unifier::variable::Var;
//!
//! let u = Unifier::from_pairs(vec![(Var::new("x"), Var::new("a"))]);
//! let multi = MultiUnifier::single(u.clone());
//!
//! assert_eq!(multi.get_unifier(), Ok(&u));
//! assert_eq!(multi.inverse().inverse(), multi);
//! assert!(MultiUnifier::non_existent().get_any().is_err());
//! ```
pub mod config;
pub mod execution;
pub mod ground;
pub mod unification;
pub mod variable;

pub use config::UnifierConfig;
pub use unification::{MultiUnifier, Unifier, UnifierError, VarMultimap};
pub use variable::Var;
