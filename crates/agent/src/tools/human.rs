//! HumanTool: interactive confirmation gate for dangerous operations.

use async_trait::async_trait;
use serde::Deserialize;

use super::{parse_args, Tool, ToolDescriptor};
use crate::ui;

static DESCRIPTOR: ToolDescriptor = ToolDescriptor {
    name: "HumanTool",
    description: "When you determine that you need to perform dangerous operations, such as deletion, you need to use this tool to initiate a confirmation request to humans first.",
    args_schema: r#"{"type":"object","properties":{"prompt":{"type":"string", "description": "The action you want to perform, such as deleting a pod", "example": "Please confirm whether to delete the foo-app pod in the default namespace"}}}"#,
};

#[derive(Deserialize)]
struct HumanArgs {
    #[serde(default)]
    prompt: String,
}

/// The loop's only interactive suspension point. Prints the model's prompt
/// and blocks for one line of input. The gating of destructive actions on
/// this tool's answer is instructed in the prompt, not enforced here.
pub struct HumanTool;

impl HumanTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HumanTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Map the human's raw reply to the sentinel strings the model is told to
/// look for.
pub fn interpret_confirmation(input: &str) -> String {
    match input {
        "y" | "yes" => "Human confirmed! Do I need to use a tool? Yes".to_string(),
        "n" | "no" => "Human declined! Do I need to use a tool? No".to_string(),
        other => format!("Human response: {}", other),
    }
}

#[async_trait]
impl Tool for HumanTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &DESCRIPTOR
    }

    async fn invoke(&self, raw_args: &str) -> String {
        let args: HumanArgs = match parse_args(raw_args) {
            Ok(args) => args,
            Err(observation) => return observation,
        };

        ui::print_yellow_no_newline(&format!("{} (yes/no): ", args.prompt));

        let mut input = String::new();
        if let Err(e) = std::io::stdin().read_line(&mut input) {
            return format!("Error reading confirmation: {}", e);
        }

        interpret_confirmation(input.trim())
    }
}
