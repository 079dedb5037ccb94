use std::borrow::Cow;

/// All categories of failure that may occur while calling the
/// `SwitchBot` cloud API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The base endpoint and a route cannot be joined into a valid URL.
    InvalidUrl,
    /// The method and URL cannot form a valid `HTTP` request.
    Request,
    /// A network-layer failure occurred while sending a request:
    /// name resolution, connection, `TLS`, timeout, or cancellation.
    Transport,
    /// The server replied with an `HTTP` status other than `200 OK`.
    UnexpectedStatus,
    /// A response body does not contain the expected JSON data.
    JsonResponse,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUrl => "invalid URL",
            Self::Request => "request construction",
            Self::Transport => "transport",
            Self::UnexpectedStatus => "unexpected status",
            Self::JsonResponse => "JSON response",
        }
        .fmt(f)
    }
}

/// A library error composed of an [`ErrorKind`] and a description of
/// the encountered failure.
#[derive(Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    description: Cow<'static, str>,
    status: Option<u16>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, description: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            description: description.into(),
            status: None,
        }
    }

    pub(crate) fn unexpected_status(code: u16) -> Self {
        Self {
            kind: ErrorKind::UnexpectedStatus,
            description: Cow::Owned(format!("Invalid status code: {code}")),
            status: Some(code),
        }
    }

    /// Returns the [`ErrorKind`] associated with the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the `HTTP` status code observed by the client.
    ///
    /// The code is present only for errors of kind
    /// [`ErrorKind::UnexpectedStatus`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {}", self.kind, self.description)
    }
}

impl std::error::Error for Error {}

/// A specialized `Result` type for `SwitchBot` client operations.
pub type Result<T> = std::result::Result<T, Error>;
