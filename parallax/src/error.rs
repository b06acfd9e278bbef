use alloc::string::String;

/// Result type for parallax operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while building or driving a layer animation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A keyframe key names a property the registry does not know.
    ///
    /// This points at a mismatch between the host's control schema and the registry, not at bad
    /// user input.
    #[error("unknown animatable property: {0}")]
    UnknownProperty(String),

    /// Setup ran before the target element existed. Retried on the next mount.
    #[error("target element is not available yet")]
    MissingTargetElement,
}
