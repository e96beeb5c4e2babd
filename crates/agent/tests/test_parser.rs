//! Tests for the reply parser grammar.

use kubepilot_agent::{parse_reply, ParsedAction};

#[test]
fn test_final_answer_is_extracted_and_trimmed() {
    let reply = "Thought: Do I need to use a tool? No\nFinal Answer:   all pods are healthy  ";
    assert_eq!(
        parse_reply(reply),
        ParsedAction::FinalAnswer("all pods are healthy".to_string())
    );
}

#[test]
fn test_final_answer_takes_precedence_over_action_lines() {
    let reply = "Final Answer: done\nAction: ListTool\nAction Input: {\"resource\":\"pod\"}";
    assert_eq!(
        parse_reply(reply),
        ParsedAction::FinalAnswer("done".to_string())
    );
}

#[test]
fn test_final_answer_precedence_with_action_first() {
    let reply = "Action: ListTool\nAction Input: {}\nFinal Answer: X";
    assert_eq!(parse_reply(reply), ParsedAction::FinalAnswer("X".to_string()));
}

#[test]
fn test_action_and_input_are_extracted() {
    let reply = "Thought: Do I need to use a tool? Yes\nAction: ListTool\nAction Input: {\"resource\":\"pod\",\"namespace\":\"default\"}";
    assert_eq!(
        parse_reply(reply),
        ParsedAction::Action {
            name: "ListTool".to_string(),
            input: r#"{"resource":"pod","namespace":"default"}"#.to_string(),
        }
    );
}

#[test]
fn test_exact_scenario_from_protocol() {
    let reply = "Action: ListTool\nAction Input: {\"resource\":\"pod\",\"namespace\":\"default\"}";
    match parse_reply(reply) {
        ParsedAction::Action { name, input } => {
            assert_eq!(name, "ListTool");
            let parsed: serde_json::Value = serde_json::from_str(&input).unwrap();
            assert_eq!(parsed["resource"], "pod");
            assert_eq!(parsed["namespace"], "default");
        }
        other => panic!("expected action, got {:?}", other),
    }
}

#[test]
fn test_action_without_input_is_none() {
    let reply = "Thought: maybe\nAction: ListTool";
    assert_eq!(parse_reply(reply), ParsedAction::None);
}

#[test]
fn test_input_without_action_is_none() {
    let reply = "Action Input: {\"resource\":\"pod\"}";
    assert_eq!(parse_reply(reply), ParsedAction::None);
}

#[test]
fn test_plain_text_is_none() {
    assert_eq!(parse_reply("I am not sure what to do."), ParsedAction::None);
    assert_eq!(parse_reply(""), ParsedAction::None);
}

#[test]
fn test_markers_are_case_sensitive() {
    assert_eq!(parse_reply("final answer: nope"), ParsedAction::None);
    assert_eq!(
        parse_reply("action: ListTool\naction input: {}"),
        ParsedAction::None
    );
}

#[test]
fn test_only_first_occurrence_is_honored() {
    let reply = "Action: FirstTool\nAction Input: {\"a\":1}\nAction: SecondTool\nAction Input: {\"b\":2}";
    assert_eq!(
        parse_reply(reply),
        ParsedAction::Action {
            name: "FirstTool".to_string(),
            input: r#"{"a":1}"#.to_string(),
        }
    );

    let reply = "Final Answer: first\nFinal Answer: second";
    assert_eq!(
        parse_reply(reply),
        ParsedAction::FinalAnswer("first".to_string())
    );
}

#[test]
fn test_action_capture_stops_at_end_of_line() {
    let reply = "Action: KubeTool\nAction Input: {\"commands\":\"kubectl get pods\"}\nPause: waiting";
    assert_eq!(
        parse_reply(reply),
        ParsedAction::Action {
            name: "KubeTool".to_string(),
            input: r#"{"commands":"kubectl get pods"}"#.to_string(),
        }
    );
}

#[test]
fn test_final_answer_parsing_is_idempotent() {
    let reply = "Final Answer: stable";
    let first = parse_reply(reply);
    let second = parse_reply(reply);
    assert_eq!(first, second);
    assert_eq!(first, ParsedAction::FinalAnswer("stable".to_string()));
}
