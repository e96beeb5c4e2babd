//! Agent core for kubepilot.
//!
//! Holds the conversation transcript, renders the instruction prompt,
//! parses model replies against the Thought/Action/Final Answer text
//! protocol, dispatches actions to registered tools and drives the
//! per-turn reasoning loop.

use thiserror::Error;

pub mod agent_loop;
pub mod conversation;
pub mod parser;
pub mod prompt;
pub mod resource;
pub mod tools;
pub mod ui;

pub use agent_loop::{AgentLoop, TurnOutcome};
pub use conversation::Conversation;
pub use parser::{parse_reply, ParsedAction};
pub use resource::ResourceClient;
pub use tools::{Tool, ToolDescriptor, ToolRegistry};

/// Agent errors. Tool failures are not represented here: by design they
/// become observation text fed back to the model. These variants cover
/// program-level failures only.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("resource API health check failed: {0}")]
    HealthCheck(String),
}

pub type Result<T> = std::result::Result<T, AgentError>;
