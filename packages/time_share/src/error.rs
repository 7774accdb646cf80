use thiserror::Error;

/// Errors that can occur when starting and stopping action timers.
///
/// Both variants signal a logic error at the call site (unbalanced start or
/// stop calls); neither is recoverable by retrying.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller attempted to start an action that already has a running timer.
    ///
    /// Each action name can have at most one running timer at a time. Stop the
    /// action first, or use a different name for re-entrant timing.
    #[error("attempted to start action '{action}' which has already started")]
    AlreadyStarted {
        /// Name of the action that already had a running timer.
        action: String,
    },

    /// The caller attempted to stop an action that has no running timer.
    #[error("attempted to stop action '{action}' which was never started")]
    NeverStarted {
        /// Name of the action that had no running timer.
        action: String,
    },
}

/// A specialized `Result` type for timer operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
