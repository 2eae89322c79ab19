//! Wire envelope for form responses

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// The JSON body a form endpoint returns for script-originated submissions.
///
/// At most one of `redirect`, `success`, `error` is expected to be meaningfully
/// populated, but any combination (including none) decodes; unknown extra keys
/// are ignored. Each key carries an arbitrary JSON value so the classifier can
/// apply the same truthiness rules the endpoints were written against.
///
/// The type also serializes, so the server side of the contract can be
/// expressed directly:
///
/// ```ignore
/// let body = serde_json::to_string(&Envelope::redirect("https://example.com/thanks"))?;
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    /// Target URL the user should be sent to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Value>,
    /// Truthy marker for a successful submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<Value>,
    /// Validation failure detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl Envelope {
    /// Creates an envelope instructing a redirect to the given URL.
    pub fn redirect(url: impl Into<String>) -> Self {
        Self {
            redirect: Some(Value::String(url.into())),
            ..Self::default()
        }
    }

    /// Creates a success envelope.
    pub fn success() -> Self {
        Self {
            success: Some(Value::Bool(true)),
            ..Self::default()
        }
    }

    /// Creates a validation-failure envelope with the given detail.
    pub fn error(detail: impl Into<Value>) -> Self {
        Self {
            error: Some(detail.into()),
            ..Self::default()
        }
    }

    /// Creates an envelope with no recognized keys.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// JSON truthiness as the source endpoints apply it.
///
/// Null, `false`, `0`, and `""` are falsy; everything else, including empty
/// arrays and objects, is truthy.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
