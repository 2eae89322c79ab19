//! Form binding and outcome signaling
//!
//! The registry is the explicit registration step: enumerate the forms that
//! carry the marker class once at startup, attach one handler per form, and
//! route every submission attempt to exactly one outcome signal.

use std::sync::Arc;

use crate::FormClient;
use crate::error::Error;
use crate::model::FormElement;
use crate::outcome::SubmitOutcome;

/// The class a form must carry to be bound by default.
pub const DEFAULT_MARKER: &str = "ajax-form";

/// Receives the outcome signal for a submission attempt.
///
/// Implemented for plain closures, so UI presentation stays a caller concern:
///
/// ```ignore
/// registry.bind(form, |form_id: &str, outcome: &SubmitOutcome| {
///     println!("{form_id}: {outcome:?}");
/// });
/// ```
pub trait OutcomeHandler: Send + Sync {
    /// Called exactly once per submission attempt on the bound form.
    fn on_outcome(&self, form_id: &str, outcome: &SubmitOutcome);
}

impl<F> OutcomeHandler for F
where
    F: Fn(&str, &SubmitOutcome) + Send + Sync,
{
    fn on_outcome(&self, form_id: &str, outcome: &SubmitOutcome) {
        self(form_id, outcome)
    }
}

struct Binding {
    form: FormElement,
    handler: Arc<dyn OutcomeHandler>,
}

/// Binds marker-matching forms to outcome handlers and submits on demand.
///
/// # Example
///
/// ```ignore
/// use formrelay_lib::{FormClient, FormElement, FormRegistry};
///
/// let client = FormClient::builder().base_url("https://site.example.com").build();
/// let mut registry = FormRegistry::new(client);
/// registry.bind_all(page_forms, handler);
///
/// registry.submit("contact").await?;
/// ```
pub struct FormRegistry {
    client: FormClient,
    marker: String,
    bindings: Vec<Binding>,
}

impl FormRegistry {
    /// Creates a registry binding forms that carry [`DEFAULT_MARKER`].
    pub fn new(client: FormClient) -> Self {
        Self {
            client,
            marker: DEFAULT_MARKER.to_owned(),
            bindings: Vec::new(),
        }
    }

    /// Overrides the marker class forms must carry to be bound.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Binds a form to a handler if it carries the marker class.
    ///
    /// A handler is installed at most once per form id; binding an already
    /// bound id is a no-op. Returns `true` if the binding was installed.
    pub fn bind<H>(&mut self, form: FormElement, handler: H) -> bool
    where
        H: OutcomeHandler + 'static,
    {
        self.install(form, Arc::new(handler))
    }

    /// Enumerates a collection of forms, binding every marker match to the
    /// same handler. Returns the number of bindings installed.
    pub fn bind_all<H>(&mut self, forms: impl IntoIterator<Item = FormElement>, handler: H) -> usize
    where
        H: OutcomeHandler + 'static,
    {
        let handler: Arc<dyn OutcomeHandler> = Arc::new(handler);
        forms
            .into_iter()
            .filter(|form| self.install_shared(form, &handler))
            .count()
    }

    fn install(&mut self, form: FormElement, handler: Arc<dyn OutcomeHandler>) -> bool {
        if !form.has_class(&self.marker) {
            log::debug!("skipping form `{}`: no `{}` marker", form.id(), self.marker);
            return false;
        }
        if self.bindings.iter().any(|b| b.form.id() == form.id()) {
            log::debug!("form `{}` already bound", form.id());
            return false;
        }
        self.bindings.push(Binding { form, handler });
        true
    }

    fn install_shared(&mut self, form: &FormElement, handler: &Arc<dyn OutcomeHandler>) -> bool {
        self.install(form.clone(), handler.clone())
    }

    /// Returns the bound form with the given id.
    pub fn form(&self, form_id: &str) -> Option<&FormElement> {
        self.bindings
            .iter()
            .find(|b| b.form.id() == form_id)
            .map(|b| &b.form)
    }

    /// Returns the bound form with the given id for field updates.
    pub fn form_mut(&mut self, form_id: &str) -> Option<&mut FormElement> {
        self.bindings
            .iter_mut()
            .find(|b| b.form.id() == form_id)
            .map(|b| &mut b.form)
    }

    /// Returns the number of bound forms.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if no forms are bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Submits the bound form with the given id.
    ///
    /// Captures a fresh payload from the form's current values, submits it,
    /// and delivers exactly one [`SubmitOutcome`] to the bound handler — a
    /// classified envelope, or [`SubmitOutcome::TransportFailure`] when no
    /// envelope was obtained. The signal is also returned to the caller.
    ///
    /// Submitting an id that was never bound is an error and delivers no
    /// signal: no submission attempt happened. Concurrent submissions of the
    /// same form are independent attempts with no mutual exclusion.
    pub async fn submit(&self, form_id: &str) -> Result<SubmitOutcome, Error> {
        let binding = self
            .bindings
            .iter()
            .find(|b| b.form.id() == form_id)
            .ok_or_else(|| Error::UnknownForm(form_id.to_owned()))?;

        let result = self.client.submit(&binding.form).await;
        let outcome = SubmitOutcome::from(result);
        binding.handler.on_outcome(form_id, &outcome);
        Ok(outcome)
    }
}
