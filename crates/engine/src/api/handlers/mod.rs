//! Command handlers, one module per area.
//!
//! Handlers parse arguments, call one use case and render the outcome.

pub(crate) mod catalog;
pub(crate) mod character;
pub(crate) mod inventory;
pub(crate) mod reward;
