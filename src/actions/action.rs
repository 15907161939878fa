//! Action trait and types.

use async_trait::async_trait;

use crate::error::ActionError;

/// What an action is asked to do. Never carries secrets.
#[derive(Debug, Clone, Copy)]
pub struct ActionRequest<'a> {
    /// Entity the action is performed against.
    pub target: &'a str,
    /// Ordered options from the invocation payload.
    pub options: &'a [String],
    /// Runtime profile resolved from the context.
    pub environment: &'a str,
}

impl ActionRequest<'_> {
    /// Returns true if `option` was passed.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// A named effect that `invoke` performs against a target.
///
/// Dry runs never reach `perform`.
#[async_trait]
pub trait Action: Send + Sync {
    /// Get the action name, as it appears in the invocation payload.
    fn name(&self) -> &str;

    /// Get a description of what the action does.
    fn description(&self) -> &str;

    /// Perform the effect.
    async fn perform(&self, request: &ActionRequest<'_>) -> Result<(), ActionError>;
}

/// Stand-in effect for actions nothing has registered.
///
/// Reports the request and completes immediately.
#[derive(Debug)]
pub struct NoopAction;

#[async_trait]
impl Action for NoopAction {
    fn name(&self) -> &str {
        "noop"
    }

    fn description(&self) -> &str {
        "Completes without producing any effect."
    }

    async fn perform(&self, request: &ActionRequest<'_>) -> Result<(), ActionError> {
        tracing::debug!(
            job_target = request.target,
            options = request.options.len(),
            "No effect registered, nothing to do"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_action_succeeds() {
        let options = vec!["force".to_string()];
        let request = ActionRequest {
            target: "server-1",
            options: &options,
            environment: "development",
        };

        assert!(tokio_test::block_on(NoopAction.perform(&request)).is_ok());
        assert!(request.has_option("force"));
        assert!(!request.has_option("quiet"));
    }
}
