//! Submission execution logic
//!
//! This module contains the HTTP execution logic for form submissions.

use crate::FormClient;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::model::FormElement;
use crate::model::Payload;
use crate::outcome::Outcome;

/// Header marking a request as script-originated, so the server returns a
/// JSON envelope instead of performing an HTTP redirect.
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";

/// The value sent with [`REQUESTED_WITH_HEADER`].
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

impl FormClient {
    /// Submits a form, capturing its current field values.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let outcome = client.submit(&form).await?;
    /// if let Some(url) = outcome.redirect_url() {
    ///     navigate(url);
    /// }
    /// ```
    pub async fn submit(&self, form: &FormElement) -> Result<Outcome, Error> {
        self.submit_payload(form.action(), form.capture()).await
    }

    /// Submits an already-captured payload to an action target.
    ///
    /// The payload is sent as a multipart body with the script-origin marker
    /// header. The HTTP status code is not inspected: a non-2xx response with
    /// a valid JSON body classifies like any other, and a non-JSON body (an
    /// HTML error page, say) surfaces as a [`Error::Decode`] failure.
    ///
    /// No retries, no in-flight guard: each call is an independent attempt,
    /// and concurrent calls proceed unordered.
    pub async fn submit_payload(&self, action: &str, payload: Payload) -> Result<Outcome, Error> {
        let url = self.resolve_action(action)?;
        log::debug!("submitting {} field(s) to {url}", payload.len());

        let mut request = self
            .http_client()
            .post(url)
            .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE)
            .multipart(payload.into_multipart());

        if let Some(timeout) = self.timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(Error::from)?;
        let body = response.text().await.map_err(Error::from)?;

        let envelope: Envelope = serde_json::from_str(&body).map_err(|err| {
            log::warn!("response body was not a JSON envelope: {err}");
            Error::decode_with_body(err.to_string(), body)
        })?;

        Ok(Outcome::classify(envelope))
    }
}
