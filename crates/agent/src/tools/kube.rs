//! KubeTool: run kubectl/helm commands as a subprocess.

use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use super::{parse_args, Tool, ToolDescriptor};

const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

static DESCRIPTOR: ToolDescriptor = ToolDescriptor {
    name: "KubeTool",
    description: "A tool for running Kubernetes commands (kubectl, helm) on a Kubernetes cluster.",
    args_schema: r#"{"type":"object","properties":{"commands":{"type":"string", "description": "The kubectl/helm related command to run. e.g. kubectl get pods"}}}"#,
};

#[derive(Deserialize)]
struct KubeArgs {
    #[serde(default)]
    commands: String,
}

/// Executes the command directly (no shell interpretation): the cleaned
/// string is split on whitespace into a program and its argv.
pub struct KubeTool;

impl KubeTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KubeTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip surrounding whitespace, quotes and backticks the model tends to
/// wrap commands in.
pub fn clean_command(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '`')
        .to_string()
}

#[async_trait]
impl Tool for KubeTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &DESCRIPTOR
    }

    async fn invoke(&self, raw_args: &str) -> String {
        let args: KubeArgs = match parse_args(raw_args) {
            Ok(args) => args,
            Err(observation) => return observation,
        };

        let cleaned = clean_command(&args.commands);
        let parts: Vec<&str> = cleaned.split_whitespace().collect();
        let Some((program, argv)) = parts.split_first() else {
            return "Error: empty command".to_string();
        };

        debug!("running command: {} {:?}", program, argv);

        let mut command = Command::new(program);
        command.args(argv).stdout(Stdio::piped()).stderr(Stdio::piped());

        let output = match tokio::time::timeout(COMMAND_TIMEOUT, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return format!("Command failed: {}", e),
            Err(_) => {
                return format!(
                    "Command timed out after {} seconds",
                    COMMAND_TIMEOUT.as_secs()
                )
            }
        };

        if !output.status.success() {
            return format!(
                "Command exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        format!(
            "The result of the command execution: {}",
            String::from_utf8_lossy(&output.stdout)
        )
    }
}
