use std::borrow::Cow;

/// Errors crossing the backend boundary.
#[evhub_derive::evhub_error]
pub enum BackendError {
    /// Builder input rejected before any request is made.
    #[error("Backend validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid backend URL{}: {source}", format_context(.context))]
    Url { source: url::ParseError, context: Option<Cow<'static, str>> },

    /// Transport failure, including per-request timeouts.
    #[error("HTTP request failed{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },

    /// The backend answered with a non-success status.
    #[error("Backend responded {status}{}: {message}", format_context(.context))]
    Status { status: u16, message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Write or lookup against a record that does not exist.
    #[error("Record not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Malformed backend payload{}: {source}", format_context(.context))]
    Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The backend did not become healthy during startup probing.
    #[error("Backend unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal backend error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl BackendError {
    /// Status code for [`BackendError::Status`], or the one carried by a transport error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http { source, .. } if source.is_timeout())
    }
}
