//! Per-call execution context supplied by the orchestrator.
//!
//! The context is read-only input: environment variables, provisioned
//! secrets, and the outputs of jobs that ran earlier in the same pipeline.
//! Secrets are held as [`SecretString`] so `Debug` output never contains them.

use std::collections::{BTreeMap, HashMap};

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Environment variable that selects the runtime profile.
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// Result mapping produced by a prior job.
pub type JobOutputs = serde_json::Map<String, serde_json::Value>;

/// Execution context shared by all three entrypoints.
#[derive(Debug, Default, Deserialize)]
pub struct ExecutionContext {
    /// Environment variables visible to the job.
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Secrets provisioned for the job.
    #[serde(default, deserialize_with = "deserialize_secrets")]
    pub secrets: HashMap<String, SecretString>,
    /// Outputs of prior jobs, keyed by job identifier.
    #[serde(default)]
    pub outputs: BTreeMap<String, JobOutputs>,
}

impl ExecutionContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an environment variable.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Provision a secret.
    pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets
            .insert(name.into(), SecretString::from(value.into()));
        self
    }

    /// Record the outputs of a prior job.
    pub fn with_output(mut self, job_id: impl Into<String>, outputs: JobOutputs) -> Self {
        self.outputs.insert(job_id.into(), outputs);
        self
    }

    /// Look up an environment variable.
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// Runtime profile selected by `ENVIRONMENT`, or `default` when it is
    /// unset or empty.
    pub fn environment<'a>(&'a self, default: &'a str) -> &'a str {
        self.env_var(ENVIRONMENT_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    /// Look up a secret by name.
    pub fn secret(&self, name: &str) -> Option<&SecretString> {
        self.secrets.get(name)
    }

    /// Identifiers of prior jobs whose outputs are available, in sorted order.
    pub fn prior_job_ids(&self) -> Vec<&str> {
        self.outputs.keys().map(String::as_str).collect()
    }
}

fn deserialize_secrets<'de, D>(deserializer: D) -> Result<HashMap<String, SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| (name, SecretString::from(value)))
        .collect())
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn empty_object_is_a_valid_context() {
        let ctx: ExecutionContext = serde_json::from_str("{}").unwrap();
        assert!(ctx.env.is_empty());
        assert!(ctx.secrets.is_empty());
        assert!(ctx.outputs.is_empty());
    }

    #[test]
    fn environment_defaults_when_unset_or_empty() {
        let ctx = ExecutionContext::new();
        assert_eq!(ctx.environment("development"), "development");

        let ctx = ExecutionContext::new().with_env("ENVIRONMENT", "");
        assert_eq!(ctx.environment("development"), "development");

        let ctx = ExecutionContext::new().with_env("ENVIRONMENT", "production");
        assert_eq!(ctx.environment("development"), "production");
    }

    #[test]
    fn deserializes_secrets_and_outputs() {
        let ctx: ExecutionContext = serde_json::from_value(serde_json::json!({
            "env": {"ENVIRONMENT": "staging"},
            "secrets": {"API_KEY": "sk-abcdef1234"},
            "outputs": {
                "build": {"artifact": "app.tar"},
                "approve": {"approved": true}
            }
        }))
        .unwrap();

        assert_eq!(ctx.environment("development"), "staging");
        assert_eq!(
            ctx.secret("API_KEY").unwrap().expose_secret(),
            "sk-abcdef1234"
        );
        assert_eq!(ctx.prior_job_ids(), vec!["approve", "build"]);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let ctx = ExecutionContext::new().with_secret("API_KEY", "sk-abcdef1234");
        let rendered = format!("{:?}", ctx);
        assert!(!rendered.contains("sk-abcdef1234"));
    }

    #[test]
    fn rejects_non_object_outputs() {
        let result: Result<ExecutionContext, _> =
            serde_json::from_value(serde_json::json!({"outputs": {"build": 3}}));
        assert!(result.is_err());
    }
}
