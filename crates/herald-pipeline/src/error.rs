//! Pipeline error type.

use herald_core::MacroError;

/// Error raised by [`MessagePipeline`](crate::MessagePipeline) operations.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A key or binding was rejected.
    #[error(transparent)]
    Macro(#[from] MacroError),
}
