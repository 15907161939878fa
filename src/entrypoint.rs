//! Dispatch by entrypoint name with JSON payloads.
//!
//! Orchestrators address handlers as `invoke` / `error` / `halt` and speak
//! JSON. [`dispatch`] decodes the payload for the named entrypoint, runs it on
//! any [`LifecycleEntrypoint`], and encodes the result.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::context::ExecutionContext;
use crate::error::{HandlerError, Result};
use crate::handler::LifecycleEntrypoint;

/// Names of the lifecycle entrypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entrypoint {
    Invoke,
    Error,
    Halt,
}

impl Entrypoint {
    pub const ALL: [Entrypoint; 3] = [Entrypoint::Invoke, Entrypoint::Error, Entrypoint::Halt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invoke => "invoke",
            Self::Error => "error",
            Self::Halt => "halt",
        }
    }
}

impl fmt::Display for Entrypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entrypoint {
    type Err = HandlerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "invoke" => Ok(Self::Invoke),
            "error" => Ok(Self::Error),
            "halt" => Ok(Self::Halt),
            other => Err(HandlerError::UnknownEntrypoint(other.to_string())),
        }
    }
}

fn decode<T: DeserializeOwned>(entrypoint: Entrypoint, payload: serde_json::Value) -> Result<T> {
    serde_json::from_value(payload)
        .map_err(|e| HandlerError::InvalidPayload(format!("{} payload: {}", entrypoint, e)))
}

/// Run the named entrypoint on `handler` with a JSON payload.
pub async fn dispatch<H>(
    handler: &H,
    entrypoint: Entrypoint,
    payload: serde_json::Value,
    ctx: &ExecutionContext,
) -> Result<serde_json::Value>
where
    H: LifecycleEntrypoint + ?Sized,
{
    tracing::debug!(entrypoint = entrypoint.as_str(), "Dispatching");

    match entrypoint {
        Entrypoint::Invoke => {
            let payload = decode(entrypoint, payload)?;
            let result = handler.invoke(&payload, ctx).await?;
            Ok(serde_json::to_value(result)?)
        }
        Entrypoint::Error => {
            let payload = decode(entrypoint, payload)?;
            let never = handler.error(&payload, ctx).await?;
            match never {}
        }
        Entrypoint::Halt => {
            let payload = decode(entrypoint, payload)?;
            let result = handler.halt(&payload, ctx).await?;
            Ok(serde_json::to_value(result)?)
        }
    }
}
