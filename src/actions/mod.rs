//! Pluggable action effects.
//!
//! `invoke` looks the requested action up in an [`ActionRegistry`] and awaits
//! its effect. Embedders register real effects (restart, deploy, ...); any
//! name left unregistered completes as a report-only stub.

mod action;
mod registry;

pub use action::{Action, ActionRequest, NoopAction};
pub use registry::ActionRegistry;
