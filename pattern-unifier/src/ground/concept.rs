//! Concepts are the ground values bound to variables in an answer.
//! The reasoner only ever compares them for equality, so they are
//! represented by an opaque identity.

/// A concept is simply a machine integer.  The storage layer maps
/// these identifiers to actual things, relations and attributes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Concept(u32);

impl Concept {
    /// Returns a fresh unique concept.
    #[must_use]
    pub fn fresh() -> Self {
        #[cfg(not(tarpaulin_include))]
        fn id() -> u32 {
            use std::sync::atomic;
            static COUNTER: atomic::AtomicU32 = atomic::AtomicU32::new(1);

            COUNTER.fetch_add(1, atomic::Ordering::Relaxed)
        }

        Self::new(id())
    }

    /// A new concept must have a positive id.
    #[must_use]
    pub fn new(id: u32) -> Self {
        assert!(id > 0);
        Self(id)
    }

    #[inline]
    #[must_use]
    pub fn id(self) -> u32 {
        self.0
    }
}

#[test]
fn test_fresh() {
    assert_ne!(Concept::fresh(), Concept::fresh());
}

#[test]
fn test_id() {
    assert_eq!(Concept::new(3).id(), 3);
    assert_eq!(Concept::new(3), Concept::new(3));
}

#[test]
#[should_panic]
fn test_zero_id() {
    let _ = Concept::new(0);
}
