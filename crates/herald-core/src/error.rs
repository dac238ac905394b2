//! Contract violations raised to the immediate caller.

/// Error for malformed input at the API boundary.
///
/// Missing bindings, missing worlds and absent records are not errors; they
/// resolve to sentinels or pass-through text instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MacroError {
    /// Key string does not match `[A-Za-z][A-Za-z0-9_.]*`.
    #[error("Invalid macro key: {0:?}")]
    InvalidKey(String),
    /// A required argument was empty.
    #[error("Argument cannot be blank: {0}")]
    BlankArgument(&'static str),
}
