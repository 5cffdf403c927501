/// Alias for `Result<T, RenderError>`.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors a renderer may return when asked to attach or detach a resource.
///
/// These are non-fatal to the simulation: engines degrade a rejection to
/// "effect not shown" and still complete the logical transition.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    /// The renderer refused to attach the named resource.
    #[error("renderer rejected attach of \"{0}\"")]
    AttachRejected(String),

    /// The renderer refused to detach the named resource.
    #[error("renderer rejected detach of \"{0}\"")]
    DetachRejected(String),
}
