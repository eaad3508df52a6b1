pub(crate) type DynError = Box<dyn std::error::Error + Send + Sync>;

/// The Errors that may occur when looking up an ISBN.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    source: Option<DynError>,
}

/// Types of errors that make up an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The ISBN provided is not 10 or 13 digits long.
    InvalidIsbn,
    /// Open Library has no book for the ISBN.
    NotFound,
    /// Open Library answered with an unexpected (non success) status code.
    Status(u16),
    /// Open Library answered with an empty body.
    Empty,
    /// An error caused when parsing/deserialization fails.
    Deserialize,
    /// The request to Open Library took too long.
    Timeout,
    /// The error is associated with an underlying IO error.
    IO,
}

impl Error {
    /// Creates a new [`Error`] based on the [`ErrorKind`] and message to describe the error.
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            source: None,
        }
    }

    /// Wraps an existing error as the source of [`Error`].
    pub fn wrap<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<DynError>,
    {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
        }
    }

    /// Attaches `source` as the cause of this [`Error`].
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Into<DynError>,
    {
        self.source = Some(source.into());
        self
    }

    /// Returns the kind of error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human readable message without the underlying cause.
    ///
    /// Falls back to a description of the [`ErrorKind`] when the error was created with
    /// [`Error::wrap`].
    #[must_use]
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or_else(|| self.kind.description())
    }
}

impl ErrorKind {
    const fn description(self) -> &'static str {
        match self {
            Self::InvalidIsbn => "Invalid ISBN error",
            Self::NotFound => "Not found error",
            Self::Status(_) => "Unexpected status error",
            Self::Empty => "Empty response error",
            Self::Deserialize => "Deserialize error",
            Self::Timeout => "Timeout error",
            Self::IO => "IO error",
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // the cause is reachable via `source` so is not repeated here
        f.write_str(self.message())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| &**e as _)
    }
}
