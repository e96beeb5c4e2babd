//! Parsing model replies against the text protocol.
//!
//! The grammar is line-oriented and case-sensitive on three literal
//! markers: `Final Answer:`, `Action:` and `Action Input:`. Only the first
//! occurrence of each marker counts, and a final answer always wins over
//! action lines found in the same reply.

use regex::Regex;
use std::sync::OnceLock;

/// Structured result of parsing one model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAction {
    /// The turn's success terminal: the answer text, trimmed.
    FinalAnswer(String),
    /// A tool invocation request: tool name plus its raw JSON argument
    /// string, both trimmed, neither validated here.
    Action { name: String, input: String },
    /// Neither marker matched; the reply consumes an iteration without
    /// dispatching anything.
    None,
}

fn final_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)Final Answer:[ \t]*(.*)$").expect("static regex"))
}

fn action_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)Action:[ \t]*(.*)$").expect("static regex"))
}

fn input_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)Action Input:[ \t]*(.*)$").expect("static regex"))
}

/// Classify a reply into one of the three outcomes, in priority order.
pub fn parse_reply(content: &str) -> ParsedAction {
    if let Some(caps) = final_re().captures(content) {
        return ParsedAction::FinalAnswer(caps[1].trim().to_string());
    }

    if let (Some(action), Some(input)) = (
        action_re().captures(content),
        input_re().captures(content),
    ) {
        return ParsedAction::Action {
            name: action[1].trim().to_string(),
            input: input[1].trim().to_string(),
        };
    }

    ParsedAction::None
}
