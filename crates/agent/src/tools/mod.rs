//! Tool capability trait and registry.
//!
//! Every capability the model can request is a `Tool`: static descriptor
//! metadata for the prompt, plus an `invoke` that turns a raw JSON argument
//! string into observation text. No tool outcome is ever a program error:
//! unknown names, bad JSON and backend failures all come back as strings so
//! the model can read them and self-correct.

pub mod create;
pub mod delete;
pub mod human;
pub mod kube;
pub mod list;
pub mod requests;
pub mod search;

pub use create::CreateTool;
pub use delete::DeleteTool;
pub use human::HumanTool;
pub use kube::KubeTool;
pub use list::ListTool;
pub use requests::RequestsTool;
pub use search::SearchTool;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Static metadata for one tool: the dispatch key (also the literal token
/// the model must emit on an `Action:` line), a capability summary, and a
/// JSON-Schema-shaped argument description. The schema is documentation for
/// the model, never validated at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub args_schema: &'static str,
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn descriptor(&self) -> &ToolDescriptor;

    /// Execute against the raw `Action Input:` string. Always returns
    /// observation text, success or failure.
    async fn invoke(&self, raw_args: &str) -> String;
}

/// Deserialize a tool's action input, mapping failure to the canonical
/// observation string.
pub fn parse_args<T: DeserializeOwned>(raw: &str) -> std::result::Result<T, String> {
    serde_json::from_str(raw).map_err(|e| format!("Error: Failed to parse action input: {}", e))
}

type BoxedTool = Box<dyn Tool>;

/// Registry of tools for one session. Insertion order is preserved: it is
/// the order descriptors appear in the rendered prompt.
pub struct ToolRegistry {
    tools: Vec<BoxedTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.push(Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.descriptor().name == name)
            .map(|t| t.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn descriptors(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.descriptor().name).collect()
    }

    /// Dispatch an action to the tool with the exactly matching name. A
    /// miss is an observation, not an error.
    pub async fn dispatch(&self, name: &str, raw_args: &str) -> String {
        match self.get(name) {
            Some(tool) => tool.invoke(raw_args).await,
            None => format!("Unknown tool: {}", name),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
