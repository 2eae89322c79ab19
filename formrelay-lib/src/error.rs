//! Error types

/// Errors that can occur while submitting a form.
///
/// [`Transport`](Error::Transport) and [`Decode`](Error::Decode) both surface
/// to outcome handlers as the single transport-failure signal; the split here
/// exists for diagnostics only.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network error before a response body was obtained.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Response decode error: {message}")]
    Decode {
        /// Description of the decode error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// The form's action target could not be resolved to an absolute URL.
    #[error("Invalid action target `{action}`: {source}")]
    InvalidAction {
        /// The action target as declared on the form.
        action: String,
        /// The underlying URL parse error.
        source: url::ParseError,
    },

    /// No form with the given id is bound in the registry.
    #[error("Unknown form: {0}")]
    UnknownForm(String),
}

impl Error {
    /// Creates a new decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new decode error retaining the raw response body.
    pub fn decode_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Creates a new invalid-action error.
    pub fn invalid_action(action: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidAction {
            action: action.into(),
            source,
        }
    }

    /// Returns the HTTP status code, if the transport layer observed one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Returns the raw response body retained by a decode error.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Decode { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if this error maps to the transport-failure signal.
    ///
    /// Resolution and registry errors happen before a submission attempt is
    /// made and are not transport failures.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode { .. })
    }
}
