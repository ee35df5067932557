use thiserror::Error;

/// Contract violations reported by `MultiUnifier` accessors.  None of
/// these are recoverable conditions: each one means the caller skipped
/// a precondition (`size() == 1`, `!is_empty()`, a bounded product)
/// that it could have checked beforehand.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum UnifierError {
    /// `get_unifier` requires exactly one alternative.
    #[error("expected exactly one unifier, found {size}")]
    NotSingleton { size: usize },

    /// `get_any` requires at least one alternative.
    #[error("no unifier exists")]
    NoUnifierExists,

    /// Combining multi-unifiers would yield more alternatives than
    /// the configured limit.
    #[error("combining multi-unifiers requires {required} alternatives, limit is {limit}")]
    AlternativeLimitExceeded { limit: usize, required: usize },
}

pub type Result<T> = std::result::Result<T, UnifierError>;

#[test]
fn test_messages() {
    assert_eq!(
        UnifierError::NotSingleton { size: 2 }.to_string(),
        "expected exactly one unifier, found 2"
    );
    assert_eq!(UnifierError::NoUnifierExists.to_string(), "no unifier exists");
    assert_eq!(
        UnifierError::AlternativeLimitExceeded {
            limit: 4,
            required: 6
        }
        .to_string(),
        "combining multi-unifiers requires 6 alternatives, limit is 4"
    );
}
