//! The per-turn reasoning loop.
//!
//! One turn alternates model calls with tool dispatch until the model
//! produces a final answer or the iteration ceiling is reached. Every
//! failure below the loop (transport, bad JSON, unknown tool, tool backend)
//! is folded back into the conversation as text; the loop itself cannot
//! fail.

use std::sync::Arc;
use tracing::{debug, warn};

use kubepilot_provider::{Message, Provider};

use crate::conversation::Conversation;
use crate::parser::{parse_reply, ParsedAction};
use crate::tools::ToolRegistry;
use crate::ui;

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The model emitted a final answer within the iteration budget.
    Answered(String),
    /// The ceiling was reached without a final answer.
    Exhausted,
}

pub struct AgentLoop {
    provider: Arc<dyn Provider>,
    model: String,
    tools: ToolRegistry,
    max_iterations: u32,
    debug: bool,
}

impl AgentLoop {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        tools: ToolRegistry,
        max_iterations: u32,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            tools,
            max_iterations,
            debug: false,
        }
    }

    /// Enable round-by-round dumps on stdout.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Run one user turn to completion. The conversation must already hold
    /// the system prompt plus the rendered user prompt; the caller resets
    /// it afterwards.
    pub async fn run_turn(&self, conversation: &mut Conversation) -> TurnOutcome {
        for iteration in 1..=self.max_iterations {
            debug!("reasoning iteration {}/{}", iteration, self.max_iterations);
            if self.debug {
                println!(
                    "---------------- Response round {} ----------------",
                    iteration
                );
                print_transcript_stats(conversation);
            }

            let reply = match self
                .provider
                .chat(&self.model, conversation.snapshot())
                .await
            {
                Ok(reply) => reply,
                Err(e) => {
                    warn!("model call failed: {}", e);
                    Message::assistant(format!(
                        "Sorry, I encountered an error when processing your request: {}",
                        e
                    ))
                }
            };

            if self.debug {
                println!("# Response from LLM:");
                println!("{}\n", reply.content);
            } else if !reply.content.contains("Final Answer:") {
                ui::print_cyan("Thinking...");
            }

            match parse_reply(&reply.content) {
                ParsedAction::FinalAnswer(answer) => {
                    debug!("final answer after {} iteration(s)", iteration);
                    if self.debug {
                        println!("# Final Answer from LLM:");
                        println!("{}\n", reply.content);
                    }
                    return TurnOutcome::Answered(answer);
                }
                ParsedAction::Action { name, input } => {
                    let content = reply.content.clone();
                    conversation.push_assistant(reply);

                    if self.debug {
                        println!("# Action Debug:");
                        println!("Action: {}", name);
                        println!("Action Input: {}", input);
                    }

                    let result = self.tools.dispatch(&name, &input).await;
                    if self.debug {
                        println!("Result: {}", result);
                    }

                    // The observation rides back as a user message, stacked
                    // under the reply that requested it.
                    let stacked = format!("{}\nObservation: {}", content, result);
                    if self.debug {
                        println!("# Round {} user prompt:", iteration);
                        println!("{}\n", stacked);
                    }
                    conversation.push_user(stacked);
                }
                ParsedAction::None => {
                    // No markers at all. Record the reply and spend the
                    // iteration; the ceiling still bounds the turn.
                    conversation.push_assistant(reply);
                }
            }
        }

        TurnOutcome::Exhausted
    }
}

fn print_transcript_stats(conversation: &Conversation) {
    println!("# Conversation Debug:");
    println!("Number of messages: {}", conversation.len());
    for (i, message) in conversation.snapshot().iter().enumerate() {
        println!(
            "Message {}: Role={}, Content length={}",
            i,
            message.role,
            message.content.len()
        );
    }
}
