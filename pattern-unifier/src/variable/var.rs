use std::fmt;
use std::sync::Arc;

/// A query variable is identified by its name: two variables parsed
/// from `$x` in different atoms are the same variable.
///
/// Names are reference counted, so cloning a `Var` never copies the
/// underlying string.  The implicit order sorts by name.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Var {
    name: Arc<str>,
}

impl Var {
    /// Returns the variable named `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }

    /// Returns a fresh anonymous variable, distinct from every other
    /// fresh variable.
    #[must_use]
    pub fn fresh() -> Self {
        #[cfg(not(tarpaulin_include))]
        fn id() -> usize {
            use std::sync::atomic::{AtomicUsize, Ordering};
            static VAR_COUNTER: AtomicUsize = AtomicUsize::new(0);

            VAR_COUNTER.fetch_add(1, Ordering::Relaxed)
        }

        Self::new(&format!("anon{}", id()))
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Var {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.name)
    }
}

#[test]
fn test_smoke() {
    let a = Var::new("a");
    let b = Var::new("b");

    assert!(a < b);
    assert_ne!(a, b);
    assert_eq!(a.name(), "a");
    assert_eq!(a.to_string(), "$a");
}

#[test]
fn test_fresh() {
    assert_ne!(Var::fresh(), Var::fresh());
}

#[test]
fn test_eq_hash() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::Hash;
    use std::hash::Hasher;

    // Variables with the same name are the same variable, however
    // they were constructed.
    let x0 = Var::new("x");
    let x1: Var = "x".into();
    let y = Var::new("y");

    assert_eq!(x0, x1);
    assert_ne!(x0, y);

    {
        let mut h0 = DefaultHasher::new();
        let mut h1 = DefaultHasher::new();

        x0.hash(&mut h0);
        x1.hash(&mut h1);
        assert_eq!(h0.finish(), h1.finish());
    }

    {
        let mut h0 = DefaultHasher::new();
        let mut h1 = DefaultHasher::new();

        x0.hash(&mut h0);
        y.hash(&mut h1);
        assert_ne!(h0.finish(), h1.finish());
    }
}
