//! Error taxonomy for the vision adapter.

/// Errors that can cross the adapter boundary.
///
/// Nothing is handled inside the adapter except logging; every variant is
/// propagated unchanged so the host's own error-reporting path stays the
/// single point of user-visible failure reporting.
#[derive(thiserror::Error, Debug)]
pub enum VisionError {
    /// A required configuration attribute is absent.
    #[error("missing required config attribute '{0}'")]
    MissingAttribute(String),

    /// A configuration attribute is present but not a non-empty string.
    #[error("config attribute '{0}' must be a non-empty string")]
    InvalidAttribute(String),

    /// The named camera is not among the resolved dependencies.
    #[error("camera '{0}' not found among resolved dependencies")]
    DependencyNotFound(String),

    /// The camera collaborator failed to produce a frame.
    #[error("camera error: {0}")]
    Camera(String),

    /// The outbound model request failed. Status is present when the
    /// service answered with a non-success HTTP code.
    #[error("model call failed{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    ModelCall {
        status: Option<u16>,
        message: String,
    },

    /// The model answered but produced no usable text.
    #[error("model returned no text candidate")]
    EmptyResponse,

    /// Semantic signal for the host's background-capture pipeline: this
    /// capture produced nothing worth persisting.
    #[error("no classification produced, nothing to store")]
    NoCaptureToStore,

    /// Capability surface this adapter deliberately does not support.
    #[error("'{0}' is not implemented by this service")]
    Unimplemented(&'static str),
}

/// Convenience result type.
pub type VisionResult<T> = Result<T, VisionError>;
