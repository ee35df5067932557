//! The execution layer bridges the narrow gap between multi-unifiers
//! and differential dataflow's collections: resolution produces
//! answers in the variables of a rule, and consumers want them in the
//! variables of the query atom that triggered the rule.
mod sink;
mod unify_answers;

pub use sink::AnswerSink;
pub use sink::AnswerWriter;
pub use unify_answers::unify_and_project;
pub use unify_answers::unify_answers;
pub use unify_answers::AnswerCollection;
