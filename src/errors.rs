/// Errors returned by the resource clients.
///
/// `E` is the error type of the [`Transport`](crate::concepts::Transport) in use. Transport
/// failures are carried as-is in [`Error::Transport`] and never retried.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// A required argument was missing or empty. Raised before any request is sent.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The file type could not be inferred from the file extension.
    #[error(
        "File type not found for '{path}'. Use attach_file_with_type(path, file_type) instead"
    )]
    UnknownFileType { path: String },

    /// Reading a file to attach failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The response did not contain an expected field.
    #[error("Response is missing the '{0}' field")]
    MissingResponseField(&'static str),

    /// The request failed in the transport or upstream.
    #[error("Transport error: {0}")]
    Transport(#[source] E),
}

/// A specialized `Result` type for resource client operations.
pub type Result<T, E> = std::result::Result<T, Error<E>>;
