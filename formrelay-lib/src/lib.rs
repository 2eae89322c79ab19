//! Async form submission client
//!
//! A Rust async client for content-management form endpoints: capture a form's
//! fields, POST them as a multipart body with a script-origin marker header, and
//! classify the JSON response into a single user-facing outcome.

pub mod envelope;
pub mod error;
pub mod model;
pub mod outcome;
pub mod registry;

mod client;
mod submit;

pub use client::*;
pub use envelope::Envelope;
pub use error::Error;
pub use model::FormElement;
pub use model::Payload;
pub use outcome::Outcome;
pub use outcome::SubmitOutcome;
pub use registry::FormRegistry;
pub use registry::OutcomeHandler;
pub use submit::REQUESTED_WITH_HEADER;
pub use submit::REQUESTED_WITH_VALUE;
