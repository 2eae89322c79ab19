//! Response classification and outcome signals

use serde_json::Value;

use crate::envelope::Envelope;
use crate::envelope::truthy;
use crate::error::Error;

/// Classification of a decoded [`Envelope`].
///
/// Produced by a single classify step so the branching is total and
/// exhaustive rather than a chain of truthy checks spread through callers.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The server asked for a navigation to the given URL.
    Redirect(String),
    /// The submission was accepted.
    Success,
    /// The submission failed validation; the detail is whatever shape the
    /// server sent (a message string, a per-field map, ...).
    ValidationError(Value),
    /// The envelope carried none of the recognized keys.
    Unrecognized,
}

impl Outcome {
    /// Classifies an envelope in fixed priority order: redirect, then
    /// success, then error. Falsy values fall through to the next check.
    pub fn classify(envelope: Envelope) -> Self {
        if let Some(redirect) = envelope.redirect.filter(truthy) {
            return Self::Redirect(value_to_text(redirect));
        }
        if envelope.success.as_ref().is_some_and(truthy) {
            return Self::Success;
        }
        if let Some(detail) = envelope.error.filter(truthy) {
            return Self::ValidationError(detail);
        }
        Self::Unrecognized
    }

    /// Returns the redirect target, if this is a redirect outcome.
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Self::Redirect(url) => Some(url),
            _ => None,
        }
    }

    /// Returns `true` if the submission was accepted.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<Envelope> for Outcome {
    fn from(envelope: Envelope) -> Self {
        Self::classify(envelope)
    }
}

/// Renders a truthy `redirect` value as the URL text.
///
/// Servers send a string here; anything else is rendered to its JSON text
/// rather than rejected.
fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

// =============================================================================
// Handler-facing signal
// =============================================================================

/// The signal delivered to an outcome handler, exactly once per submission
/// attempt.
///
/// Extends [`Outcome`] with the transport-failure case: the request failed
/// before any envelope was obtained (network failure or non-JSON body), which
/// is distinct from an envelope with no recognized keys.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The server asked for a navigation to the given URL.
    Redirect(String),
    /// The submission was accepted.
    Success,
    /// The submission failed validation.
    ValidationError(Value),
    /// The envelope carried none of the recognized keys.
    Unrecognized,
    /// No envelope was obtained for this attempt.
    TransportFailure(Error),
}

impl SubmitOutcome {
    /// Returns `true` if no envelope was obtained.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }

    /// Returns the redirect target, if this is a redirect signal.
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Self::Redirect(url) => Some(url),
            _ => None,
        }
    }

    /// Returns the validation detail, if this is a validation-error signal.
    pub fn validation_detail(&self) -> Option<&Value> {
        match self {
            Self::ValidationError(detail) => Some(detail),
            _ => None,
        }
    }
}

impl From<Outcome> for SubmitOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Redirect(url) => Self::Redirect(url),
            Outcome::Success => Self::Success,
            Outcome::ValidationError(detail) => Self::ValidationError(detail),
            Outcome::Unrecognized => Self::Unrecognized,
        }
    }
}

impl From<Result<Outcome, Error>> for SubmitOutcome {
    fn from(result: Result<Outcome, Error>) -> Self {
        match result {
            Ok(outcome) => outcome.into(),
            Err(err) => Self::TransportFailure(err),
        }
    }
}
