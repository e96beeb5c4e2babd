//! Command implementations for the kubepilot CLI.

use anyhow::{Context, Result};
use std::sync::Arc;

use kubepilot_agent::prompt::{apply_namespace, render_prompt};
use kubepilot_agent::tools::{
    CreateTool, DeleteTool, HumanTool, KubeTool, ListTool, RequestsTool, SearchTool,
};
use kubepilot_agent::{ui, AgentLoop, Conversation, ResourceClient, ToolRegistry, TurnOutcome};
use kubepilot_config::Config;
use kubepilot_provider::{OpenAiProvider, Provider};

/// Interactive resource management: create, list, delete, with a human
/// confirmation gate.
pub async fn chat_command(namespace: String, debug: bool, max_loops: u32) -> Result<()> {
    let config = Config::load().await?;
    let provider: Arc<dyn Provider> = Arc::new(OpenAiProvider::new(
        config.model.api_key.clone(),
        config.model.api_base.clone(),
    ));

    let api = ResourceClient::new(config.cluster.resource_api.clone());
    api.health()
        .await
        .context("resource API is unreachable at startup")?;

    let mut tools = ToolRegistry::new();
    tools.register(CreateTool::new(
        provider.clone(),
        config.model.model.clone(),
        api.clone(),
    ));
    tools.register(ListTool::new(api.clone()));
    tools.register(DeleteTool::new(api));
    tools.register(HumanTool::new());

    let agent = AgentLoop::new(provider, config.model.model, tools, max_loops).with_debug(debug);
    run_repl(&agent, &namespace, debug).await
}

/// Interactive diagnostics: kubectl/helm, web search and page fetch.
pub async fn check_command(namespace: String, debug: bool, max_loops: u32) -> Result<()> {
    let config = Config::load().await?;
    let provider: Arc<dyn Provider> = Arc::new(OpenAiProvider::new(
        config.model.api_key.clone(),
        config.model.api_base.clone(),
    ));

    let mut tools = ToolRegistry::new();
    tools.register(KubeTool::new());
    tools.register(SearchTool::new(config.serpapi_key()));
    tools.register(RequestsTool::new());

    let agent = AgentLoop::new(provider, config.model.model, tools, max_loops).with_debug(debug);
    run_repl(&agent, &namespace, debug).await
}

/// Shared read-eval loop: one line of input is one full turn. The
/// conversation is rebuilt around each turn; nothing persists between them.
async fn run_repl(agent: &AgentLoop, namespace: &str, debug: bool) -> Result<()> {
    if !namespace.is_empty() {
        println!("Using namespace: {}", namespace);
    }
    ui::print_cyan("Hello, I'm your Kubernetes assistant, how can I help you today? (type 'exit' to quit)");

    let mut conversation = Conversation::new();

    loop {
        ui::print_yellow_no_newline("> ");

        let mut line = String::new();
        let bytes_read = std::io::stdin()
            .read_line(&mut line)
            .context("error reading input")?;
        if bytes_read == 0 {
            // End of input
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" {
            break;
        }

        let query = apply_namespace(input, namespace);
        let prompt = render_prompt(&agent.tools().descriptors(), &query);
        if debug {
            println!("User prompt: {}", prompt);
        }

        conversation.clear();
        conversation.push_user(prompt);

        match agent.run_turn(&mut conversation).await {
            TurnOutcome::Answered(answer) => ui::print_cyan(&answer),
            TurnOutcome::Exhausted => ui::print_yellow(
                "Exceeded maximum number of reasoning loops. Stopping execution.",
            ),
        }

        conversation.clear();
    }

    ui::print_green("Goodbye!");
    Ok(())
}
