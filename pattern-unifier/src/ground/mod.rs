//! Unifiers rename variables; what they rename in practice are
//! answers, i.e., bindings from query variables to the ground
//! concepts stored in the graph.  This module only defines the
//! minimal ground vocabulary needed to push answers through unifiers:
//! concepts are opaque identifiers, and the storage layer owns
//! everything else about them.

mod answer;
mod concept;

pub use answer::Answer;
pub use concept::Concept;
