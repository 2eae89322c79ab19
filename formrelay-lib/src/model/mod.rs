//! Form and payload types

mod form;
mod payload;

pub use form::*;
pub use payload::*;
