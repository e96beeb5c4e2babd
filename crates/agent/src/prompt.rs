//! Prompt templates and rendering.

use regex::Regex;
use std::sync::OnceLock;

use crate::tools::ToolDescriptor;

/// Fixed system prompt; the first message of every conversation.
pub const SYSTEM_PROMPT: &str = "\
You are a Kubernetes expert assisting a user with their cluster. Identify \
the problem behind each question and provide a solution. Always gather \
accurate data through the available tools before answering.";

/// System prompt for the secondary model call that generates manifests.
pub const MANIFEST_PROMPT: &str = "\
You are a Kubernetes expert. Generate a valid Kubernetes resource \
definition from the user's requirements.

Output guidelines:
- Output ONLY the YAML content, with no explanations, comments, or markdown formatting
- The YAML must be directly applyable with \"kubectl apply\"
- Include every field required for the requested resource type
- Use correct YAML indentation
- Follow Kubernetes naming conventions and best practices
- ALWAYS set the namespace in the YAML
";

/// Instruction template rendered once per user turn. Three slots are
/// substituted in order: the tool descriptor blocks, the comma-joined tool
/// names, and the verbatim user query.
const TEMPLATE: &str = "\
IMPORTANT:
1. If the \"Action\" is a tool, do not make up an \"Observation\" or a \"Final Answer\"
2. For ANY deletion operation, you MUST first use HumanTool to get confirmation
3. ONLY use DeleteTool AFTER receiving explicit confirmation through HumanTool
------

TOOLS:
------

You have access to the following tools:

{tools}

To use a tool, please use the following format:

Thought: Do I need to use a tool? Yes
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action. should be a valid JSON object in the format of {\"prompt\":\"xxx\", \"resource\":\"xxx\"}
Pause: wait for the Human to report the result of the action as an Observation

... (this Thought/Action/Action Input/Observation can repeat N times)
When you have a response to say to the Human, or if you do not need to use a tool, you MUST use the format:

Thought: Do I need to use a tool? No
Final Answer: [your response here]

Begin!

New input: {query}
";

/// Render the instruction prompt for one user query. Pure and
/// deterministic: the same descriptors and query always yield the same
/// string.
pub fn render_prompt(descriptors: &[&ToolDescriptor], query: &str) -> String {
    let blocks: Vec<String> = descriptors
        .iter()
        .map(|d| {
            format!(
                "Name: {}\nDescription: {}\nArgsSchema: {}\n",
                d.name, d.description, d.args_schema
            )
        })
        .collect();
    let names: Vec<&str> = descriptors.iter().map(|d| d.name).collect();

    TEMPLATE
        .replacen("{tools}", &blocks.join("\n"), 1)
        .replacen("{tool_names}", &names.join(", "), 1)
        .replacen("{query}", query, 1)
}

fn namespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("(?i)namespace").expect("static regex"))
}

/// Append the default namespace to a query unless it already mentions one.
pub fn apply_namespace(input: &str, namespace: &str) -> String {
    if namespace.is_empty() {
        return input.to_string();
    }
    if namespace_re().is_match(input) {
        input.to_string()
    } else {
        format!("{} (in namespace {})", input, namespace)
    }
}
