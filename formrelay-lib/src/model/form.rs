//! Form element model

use crate::model::Payload;

/// A form on the page: an action target plus named fields with current values.
///
/// Forms live for the life of the program; the submission machinery never
/// creates or destroys them. Field values can be updated between submissions,
/// and [`capture`](FormElement::capture) snapshots them at the moment of
/// submission.
#[derive(Debug, Clone)]
pub struct FormElement {
    id: String,
    action: String,
    classes: Vec<String>,
    fields: Vec<Field>,
}

#[derive(Debug, Clone)]
struct Field {
    name: String,
    value: String,
}

impl FormElement {
    /// Creates a form with the given id and action target.
    ///
    /// The action may be absolute or relative to the client's base URL.
    pub fn new(id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            action: action.into(),
            classes: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Adds a class to the form's marker set.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Adds a named field with an initial value.
    ///
    /// The same name may appear more than once (multi-valued fields).
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Returns the form's id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the declared action target.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns `true` if the form carries the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns the current value of the first field with the given name.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// Sets a field's value, appending the field if it does not exist yet.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => field.value = value.into(),
            None => self.fields.push(Field {
                name: name.to_owned(),
                value: value.into(),
            }),
        }
    }

    /// Snapshots the current field values into a fresh [`Payload`].
    ///
    /// Later changes to the form do not affect the captured payload.
    pub fn capture(&self) -> Payload {
        Payload::from_pairs(
            self.fields
                .iter()
                .map(|field| (field.name.clone(), field.value.clone())),
        )
    }
}
