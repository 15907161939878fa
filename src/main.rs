//! Local runner for the job handler.
//!
//! Runs one entrypoint with a JSON payload and context and prints the result
//! JSON on stdout. Logs go to stderr.

use std::path::Path;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use job_handler::config::LogFormat;
use job_handler::{Entrypoint, ExecutionContext, HandlerConfig, JobHandler, dispatch};

#[derive(Parser, Debug)]
#[command(name = "job-handler", version, about = "Run a job lifecycle entrypoint")]
struct Cli {
    /// Entrypoint to run: invoke, error or halt
    entrypoint: Entrypoint,

    /// Payload as JSON, or @path to read it from a file
    #[arg(short, long)]
    payload: String,

    /// Execution context as JSON, or @path to read it from a file
    #[arg(short, long, default_value = "{}")]
    context: String,
}

/// Parse an inline JSON argument, or read it from the file named after `@`.
fn read_json_arg(raw: &str) -> anyhow::Result<serde_json::Value> {
    let text = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("failed to read {}", path))?,
        None => raw.to_string(),
    };
    serde_json::from_str(&text).context("argument is not valid JSON")
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = HandlerConfig::from_env()?;
    init_tracing(config.log_format);

    let payload = read_json_arg(&cli.payload).context("invalid --payload")?;
    let ctx: ExecutionContext =
        serde_json::from_value(read_json_arg(&cli.context).context("invalid --context")?)
            .context("invalid execution context")?;

    let handler = JobHandler::from_config(config);
    let result = dispatch(&handler, cli.entrypoint, payload, &ctx).await;
    handler.observer().flush();

    let value = result?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_entrypoint_and_defaults_context() {
        let cli = Cli::try_parse_from(["job-handler", "halt", "--payload", "{}"]).unwrap();
        assert_eq!(cli.entrypoint, Entrypoint::Halt);
        assert_eq!(cli.context, "{}");

        assert!(Cli::try_parse_from(["job-handler", "retry", "--payload", "{}"]).is_err());
    }

    #[test]
    fn help_is_handled_by_the_parser() {
        let err = Cli::try_parse_from(["job-handler", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn reads_inline_json() {
        let value = read_json_arg(r#"{"reason": "drain"}"#).unwrap();
        assert_eq!(value["reason"], "drain");
        assert!(read_json_arg("not json").is_err());
    }

    #[test]
    fn reads_json_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"target": "server-1", "action": "restart"}}"#).unwrap();

        let arg = format!("@{}", file.path().display());
        let value = read_json_arg(&arg).unwrap();
        assert_eq!(value["action"], "restart");

        assert!(read_json_arg("@/definitely/not/here.json").is_err());
    }
}
