//! Tests for the per-turn reasoning loop, driven by a scripted provider.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use kubepilot_agent::{AgentLoop, Conversation, Tool, ToolDescriptor, ToolRegistry, TurnOutcome};
use kubepilot_provider::{Message, Provider, ProviderError};

/// Provider that replays a fixed script of replies and counts calls.
struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<Message, ProviderError>>>,
    calls: AtomicU32,
}

impl ScriptedProvider {
    fn new(replies: Vec<Result<Message, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicU32::new(0),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn chat(&self, _model: &str, _messages: &[Message]) -> Result<Message, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Message::assistant("script exhausted")))
    }
}

static ECHO: ToolDescriptor = ToolDescriptor {
    name: "EchoTool",
    description: "echoes its raw input",
    args_schema: r#"{"type":"object"}"#,
};

struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &ECHO
    }
    async fn invoke(&self, raw_args: &str) -> String {
        format!("echo: {}", raw_args)
    }
}

fn loop_with(provider: Arc<ScriptedProvider>, max_iterations: u32) -> AgentLoop {
    let mut tools = ToolRegistry::new();
    tools.register(EchoTool);
    AgentLoop::new(provider, "test-model", tools, max_iterations)
}

fn started_conversation() -> Conversation {
    let mut conversation = Conversation::new();
    conversation.push_user("rendered user prompt");
    conversation
}

#[tokio::test]
async fn test_final_answer_terminates_without_appending() {
    let provider = ScriptedProvider::new(vec![Ok(Message::assistant("Final Answer: 42"))]);
    let agent = loop_with(provider.clone(), 5);
    let mut conversation = started_conversation();

    let outcome = agent.run_turn(&mut conversation).await;

    assert_eq!(outcome, TurnOutcome::Answered("42".to_string()));
    assert_eq!(provider.calls(), 1);
    // The terminating reply is not recorded; the turn is over.
    assert_eq!(conversation.len(), 2);
}

#[tokio::test]
async fn test_action_appends_assistant_then_observation() {
    let action_reply = "Thought: Do I need to use a tool? Yes\nAction: EchoTool\nAction Input: {\"x\":1}";
    let provider = ScriptedProvider::new(vec![
        Ok(Message::assistant(action_reply)),
        Ok(Message::assistant("Final Answer: done")),
    ]);
    let agent = loop_with(provider.clone(), 5);
    let mut conversation = started_conversation();

    let outcome = agent.run_turn(&mut conversation).await;

    assert_eq!(outcome, TurnOutcome::Answered("done".to_string()));
    assert_eq!(provider.calls(), 2);
    // system, user prompt, assistant reply, user observation
    assert_eq!(conversation.len(), 4);

    let snapshot = conversation.snapshot();
    assert_eq!(snapshot[2].role, "assistant");
    assert_eq!(snapshot[2].content, action_reply);
    assert_eq!(snapshot[3].role, "user");
    assert_eq!(
        snapshot[3].content,
        format!("{}\nObservation: echo: {{\"x\":1}}", action_reply)
    );
}

#[tokio::test]
async fn test_unknown_tool_becomes_observation() {
    let action_reply = "Action: MysteryTool\nAction Input: {}";
    let provider = ScriptedProvider::new(vec![
        Ok(Message::assistant(action_reply)),
        Ok(Message::assistant("Final Answer: recovered")),
    ]);
    let agent = loop_with(provider.clone(), 5);
    let mut conversation = started_conversation();

    let outcome = agent.run_turn(&mut conversation).await;

    assert_eq!(outcome, TurnOutcome::Answered("recovered".to_string()));
    assert!(conversation.snapshot()[3]
        .content
        .ends_with("Observation: Unknown tool: MysteryTool"));
}

#[tokio::test]
async fn test_actionless_reply_consumes_iteration_without_observation() {
    let provider = ScriptedProvider::new(vec![
        Ok(Message::assistant("I'm thinking out loud with no markers")),
        Ok(Message::assistant("Final Answer: ok")),
    ]);
    let agent = loop_with(provider.clone(), 5);
    let mut conversation = started_conversation();

    let outcome = agent.run_turn(&mut conversation).await;

    assert_eq!(outcome, TurnOutcome::Answered("ok".to_string()));
    assert_eq!(provider.calls(), 2);
    // Only the assistant reply was appended, no observation.
    assert_eq!(conversation.len(), 3);
    assert_eq!(conversation.snapshot()[2].role, "assistant");
}

#[tokio::test]
async fn test_exhaustion_caps_model_calls() {
    let provider = ScriptedProvider::new(vec![
        Ok(Message::assistant("no markers 1")),
        Ok(Message::assistant("no markers 2")),
        Ok(Message::assistant("no markers 3")),
        Ok(Message::assistant("Final Answer: too late")),
    ]);
    let agent = loop_with(provider.clone(), 3);
    let mut conversation = started_conversation();

    let outcome = agent.run_turn(&mut conversation).await;

    assert_eq!(outcome, TurnOutcome::Exhausted);
    // Exactly max_iterations calls, never the N+1th.
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn test_provider_error_becomes_apology_and_loop_continues() {
    let provider = ScriptedProvider::new(vec![
        Err(ProviderError::Api("backend down".to_string())),
        Ok(Message::assistant("Final Answer: back up")),
    ]);
    let agent = loop_with(provider.clone(), 5);
    let mut conversation = started_conversation();

    let outcome = agent.run_turn(&mut conversation).await;

    assert_eq!(outcome, TurnOutcome::Answered("back up".to_string()));
    assert_eq!(provider.calls(), 2);

    let apology = &conversation.snapshot()[2];
    assert_eq!(apology.role, "assistant");
    assert!(apology
        .content
        .starts_with("Sorry, I encountered an error when processing your request:"));
    assert!(apology.content.contains("backend down"));
}

#[tokio::test]
async fn test_debug_dumps_do_not_change_the_turn() {
    let action_reply = "Action: EchoTool\nAction Input: {\"x\":1}";
    let provider = ScriptedProvider::new(vec![
        Ok(Message::assistant(action_reply)),
        Ok(Message::assistant("Final Answer: done")),
    ]);
    let agent = loop_with(provider.clone(), 5).with_debug(true);
    let mut conversation = started_conversation();

    let outcome = agent.run_turn(&mut conversation).await;

    // Round and final-answer dumps are stdout only; the outcome and the
    // transcript are identical to a non-debug run.
    assert_eq!(outcome, TurnOutcome::Answered("done".to_string()));
    assert_eq!(provider.calls(), 2);
    assert_eq!(conversation.len(), 4);
    assert_eq!(
        conversation.snapshot()[3].content,
        format!("{}\nObservation: echo: {{\"x\":1}}", action_reply)
    );
}

#[tokio::test]
async fn test_final_answer_wins_over_action_in_same_reply() {
    let provider = ScriptedProvider::new(vec![Ok(Message::assistant(
        "Final Answer: finished\nAction: EchoTool\nAction Input: {}",
    ))]);
    let agent = loop_with(provider.clone(), 5);
    let mut conversation = started_conversation();

    let outcome = agent.run_turn(&mut conversation).await;

    assert_eq!(outcome, TurnOutcome::Answered("finished".to_string()));
    assert_eq!(provider.calls(), 1);
    // No dispatch happened, nothing was appended.
    assert_eq!(conversation.len(), 2);
}
