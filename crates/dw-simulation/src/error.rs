use dw_core::RenderError;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised inside the simulation engines.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SimError {
    /// A zone behavior callback failed.
    #[error("zone behavior failure: {0}")]
    Behavior(String),

    /// A renderer call failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}
