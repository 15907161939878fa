//! Job lifecycle handler.
//!
//! An orchestrator calls into this crate at three points of a job's life:
//!
//! - `invoke` performs a named action against a target (or pretends to, for
//!   a dry run) and reports progress as it goes.
//! - `error` turns an upstream failure into a fatal, non-recoverable error.
//! - `halt` acknowledges a cooperative cancellation request.
//!
//! Every call is stateless. Diagnostics go to an injected
//! [`Observer`](observability::Observer); action effects come from a
//! pluggable [`ActionRegistry`](actions::ActionRegistry). Queueing, retries,
//! secret provisioning and persistence belong to the orchestrator.

pub mod actions;
pub mod config;
pub mod context;
pub mod entrypoint;
pub mod error;
pub mod handler;
pub mod observability;
pub mod payload;
pub mod result;
pub mod secrets;

pub use actions::{Action, ActionRegistry, ActionRequest};
pub use config::HandlerConfig;
pub use context::ExecutionContext;
pub use entrypoint::{Entrypoint, dispatch};
pub use error::{ActionError, ConfigError, HandlerError};
pub use handler::{JobHandler, LifecycleEntrypoint};
pub use payload::{ErrorPayload, HaltPayload, InvokePayload, JobFailure};
pub use result::{HaltResult, InvokeResult, JobStatus};
