//! Query variables name the placeholders of a pattern, e.g., `$x` in
//! `($x, $y) isa friendship`.  The unification core never looks inside
//! a variable: all it needs is equality, hashing, and a total order so
//! that unifiers iterate and print deterministically.
mod var;

pub use var::Var;
