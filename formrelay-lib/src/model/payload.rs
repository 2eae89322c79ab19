//! Captured submission payload

use reqwest::multipart;

/// The field values captured from a form at the moment of submission.
///
/// Built fresh per attempt and immutable once built: there is no mutation
/// API, so the payload a request carries is exactly the snapshot taken when
/// the submission was triggered. Field order is preserved and duplicate names
/// are permitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    fields: Vec<(String, String)>,
}

impl Payload {
    /// Builds a payload from name/value pairs.
    pub fn from_pairs<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Returns the number of captured fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields were captured.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the value of the first field with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates the captured pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Converts the payload into the multipart body it is sent as.
    pub(crate) fn into_multipart(self) -> multipart::Form {
        self.fields
            .into_iter()
            .fold(multipart::Form::new(), |form, (name, value)| {
                form.text(name, value)
            })
    }
}
