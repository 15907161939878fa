//! The job handler: `invoke`, `error` and `halt`.
//!
//! Each entrypoint is a stateless async call. The handler reads the payload
//! and context, reports its progress to the injected [`Observer`], and
//! returns a result record. It never mutates the context and keeps nothing
//! between calls.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use secrecy::ExposeSecret;

use crate::actions::{ActionRegistry, ActionRequest};
use crate::config::HandlerConfig;
use crate::context::ExecutionContext;
use crate::error::{HandlerError, Result};
use crate::observability::{JobEvent, JobMetric, Observer, create_observer};
use crate::payload::{ErrorPayload, HaltPayload, InvokePayload};
use crate::result::{HaltResult, InvokeResult, JobStatus};
use crate::secrets::mask_secret;

/// The three lifecycle entrypoints an orchestrator calls into.
#[async_trait]
pub trait LifecycleEntrypoint: Send + Sync {
    /// Perform the payload's action against its target.
    async fn invoke(&self, payload: &InvokePayload, ctx: &ExecutionContext)
    -> Result<InvokeResult>;

    /// Convert an upstream failure into a fatal error. Never succeeds.
    async fn error(&self, payload: &ErrorPayload, ctx: &ExecutionContext) -> Result<Infallible>;

    /// Acknowledge a cooperative cancellation request.
    async fn halt(&self, payload: &HaltPayload, ctx: &ExecutionContext) -> Result<HaltResult>;
}

/// Default [`LifecycleEntrypoint`] implementation.
pub struct JobHandler {
    config: HandlerConfig,
    observer: Arc<dyn Observer>,
    actions: ActionRegistry,
}

impl JobHandler {
    /// Create a handler reporting to `observer`, with no registered actions.
    pub fn new(config: HandlerConfig, observer: Arc<dyn Observer>) -> Self {
        Self {
            config,
            observer,
            actions: ActionRegistry::new(),
        }
    }

    /// Create a handler with the observer backend named in `config`.
    pub fn from_config(config: HandlerConfig) -> Self {
        let observer: Arc<dyn Observer> = Arc::from(create_observer(&config.observability));
        Self::new(config, observer)
    }

    /// Replace the action registry.
    pub fn with_actions(mut self, actions: ActionRegistry) -> Self {
        self.actions = actions;
        self
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    pub fn observer(&self) -> &Arc<dyn Observer> {
        &self.observer
    }

    fn emit(&self, event: JobEvent) {
        self.observer.record_event(&event);
    }

    /// Report what the context makes available to this run.
    fn report_context(&self, ctx: &ExecutionContext, environment: &str) {
        self.emit(JobEvent::Environment {
            profile: environment.to_string(),
        });

        let key = ctx
            .secret(&self.config.api_key_secret)
            .filter(|k| !k.expose_secret().is_empty());
        if let Some(key) = key {
            self.emit(JobEvent::ApiKeyInUse {
                key: mask_secret(key),
            });
        }

        if !ctx.outputs.is_empty() {
            self.emit(JobEvent::PriorOutputsAvailable {
                count: ctx.outputs.len(),
            });
            self.emit(JobEvent::PriorOutputKeys {
                job_ids: ctx.prior_job_ids().into_iter().map(String::from).collect(),
            });
        }
    }
}

#[async_trait]
impl LifecycleEntrypoint for JobHandler {
    async fn invoke(
        &self,
        payload: &InvokePayload,
        ctx: &ExecutionContext,
    ) -> Result<InvokeResult> {
        payload.validate()?;

        self.emit(JobEvent::InvokeStarted);
        self.emit(JobEvent::TargetSelected {
            target: payload.target.clone(),
        });
        self.emit(JobEvent::ActionSelected {
            action: payload.action.clone(),
        });
        if payload.dry_run {
            self.emit(JobEvent::DryRun);
        }

        let environment = ctx.environment(&self.config.default_environment);
        self.report_context(ctx, environment);

        self.emit(JobEvent::ActionStarted {
            action: payload.action.clone(),
            target: payload.target.clone(),
        });
        if !payload.options.is_empty() {
            self.emit(JobEvent::OptionsReceived {
                options: payload.options.clone(),
            });
        }

        if !payload.dry_run {
            let action = self.actions.resolve(&payload.action);
            let request = ActionRequest {
                target: &payload.target,
                options: &payload.options,
                environment,
            };

            let started = Instant::now();
            if let Err(e) = action.perform(&request).await {
                tracing::warn!(
                    action = payload.action.as_str(),
                    "Action failed on {}: {}",
                    payload.target,
                    e
                );
                return Err(HandlerError::Action(e));
            }
            self.observer.record_metric(&JobMetric::ActionDuration {
                action: payload.action.clone(),
                duration: started.elapsed(),
            });
        }

        self.emit(JobEvent::ActionCompleted {
            action: payload.action.clone(),
            target: payload.target.clone(),
        });

        let status = if payload.dry_run {
            JobStatus::DryRunCompleted
        } else {
            JobStatus::Success
        };

        Ok(InvokeResult {
            status,
            target: payload.target.clone(),
            processed_at: Utc::now(),
        })
    }

    async fn error(&self, payload: &ErrorPayload, _ctx: &ExecutionContext) -> Result<Infallible> {
        self.emit(JobEvent::JobErrored {
            target: payload.target.clone(),
            message: payload.error.message.clone(),
        });

        Err(HandlerError::fatal(payload.error.message.clone()))
    }

    async fn halt(&self, payload: &HaltPayload, _ctx: &ExecutionContext) -> Result<HaltResult> {
        let target = payload.target_or_unknown().to_string();

        self.emit(JobEvent::JobHalted {
            target: target.clone(),
            reason: payload.reason.clone(),
        });

        Ok(HaltResult {
            status: JobStatus::Halted,
            target,
            reason: payload.reason.clone(),
            halted_at: Utc::now(),
        })
    }
}
