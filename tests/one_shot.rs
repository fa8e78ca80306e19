//! One-shot parser tests driven by the scripted mock engine.

use harmony_parser::{ChannelOutput, DecodedMessage, HarmonyParser, MockEngine, ToolCall};

fn message(channel: &str, recipient: Option<&str>, content: &[&str]) -> DecodedMessage {
    DecodedMessage {
        channel: Some(channel.to_string()),
        recipient: recipient.map(str::to_string),
        content: content.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_reasoning_and_final_messages() {
    let text = "<analysis>thinking</analysis><final>hello</final>";

    let mut engine = MockEngine::new();
    engine.script_chunk(text, vec![]);
    engine.script_messages(vec![
        message("analysis", None, &["thinking"]),
        message("final", None, &["hello"]),
    ]);

    let mut parser = HarmonyParser::with_engine(engine);
    let result = parser.parse(text).unwrap();
    assert_eq!(
        result,
        ChannelOutput {
            content: Some("hello".to_string()),
            reasoning_content: Some("thinking".to_string()),
            tool_calls: Some(vec![]),
        }
    );
}

#[test]
fn test_tool_call_message() {
    let text = "turn";

    let mut engine = MockEngine::new();
    engine.script_chunk(text, vec![]);
    engine.script_messages(vec![message(
        "commentary",
        Some("functions.get_weather"),
        &["{\"city\":\"NYC\"}"],
    )]);

    let mut parser = HarmonyParser::with_engine(engine);
    let result = parser.parse(text).unwrap();
    assert_eq!(
        result.tool_calls,
        Some(vec![ToolCall {
            name: "get_weather".to_string(),
            arguments: "{\"city\":\"NYC\"}".to_string(),
        }])
    );
    assert!(result.content.is_none());
}

#[test]
fn test_multiple_tool_calls_append() {
    let text = "turn";

    let mut engine = MockEngine::new();
    engine.script_chunk(text, vec![]);
    engine.script_messages(vec![
        message("commentary", Some("functions.first"), &["{}"]),
        message("commentary", Some("functions.second"), &["{\"n\":2}"]),
    ]);

    let mut parser = HarmonyParser::with_engine(engine);
    let result = parser.parse(text).unwrap();
    let calls = result.tool_calls.unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].name, "first");
    assert_eq!(calls[1].name, "second");
    assert_eq!(calls[1].arguments, "{\"n\":2}");
}

#[test]
fn test_function_recipient_beats_analysis_tag() {
    let text = "turn";

    let mut engine = MockEngine::new();
    engine.script_chunk(text, vec![]);
    engine.script_messages(vec![message(
        "analysis",
        Some("functions.lookup"),
        &["{\"q\":\"x\"}"],
    )]);

    let mut parser = HarmonyParser::with_engine(engine);
    let result = parser.parse(text).unwrap();
    assert!(result.reasoning_content.is_none());
    assert_eq!(
        result.tool_calls,
        Some(vec![ToolCall {
            name: "lookup".to_string(),
            arguments: "{\"q\":\"x\"}".to_string(),
        }])
    );
}

#[test]
fn test_commentary_without_recipient_is_dropped() {
    let text = "turn";

    let mut engine = MockEngine::new();
    engine.script_chunk(text, vec![]);
    engine.script_messages(vec![message("commentary", None, &["orphaned"])]);

    let mut parser = HarmonyParser::with_engine(engine);
    let result = parser.parse(text).unwrap();
    assert_eq!(result.tool_calls, Some(vec![]));
    assert!(result.content.is_none());
    assert!(result.reasoning_content.is_none());
}

#[test]
fn test_unknown_channels_are_dropped() {
    let text = "turn";

    let mut engine = MockEngine::new();
    engine.script_chunk(text, vec![]);
    engine.script_messages(vec![
        message("critique", None, &["not surfaced"]),
        message("final", None, &["kept"]),
    ]);

    let mut parser = HarmonyParser::with_engine(engine);
    let result = parser.parse(text).unwrap();
    assert_eq!(result.content.as_deref(), Some("kept"));
    assert!(result.reasoning_content.is_none());
    assert_eq!(result.tool_calls, Some(vec![]));
}

#[test]
fn test_text_after_marker_is_discarded() {
    // Only the truncated text is scripted; a parser that failed to cut at
    // the marker would fail to encode.
    let mut engine = MockEngine::new();
    engine.script_chunk("{\"a\":1}<|call|>", vec![]);
    engine.script_messages(vec![message(
        "commentary",
        Some("functions.run"),
        &["{\"a\":1}"],
    )]);

    let mut parser = HarmonyParser::with_engine(engine);
    let result = parser.parse("{\"a\":1}<|call|>garbage after the call").unwrap();
    assert_eq!(
        result.tool_calls,
        Some(vec![ToolCall {
            name: "run".to_string(),
            arguments: "{\"a\":1}".to_string(),
        }])
    );
}

#[test]
fn test_later_messages_replace_earlier_on_same_channel() {
    let text = "turn";

    let mut engine = MockEngine::new();
    engine.script_chunk(text, vec![]);
    engine.script_messages(vec![
        message("final", None, &["draft"]),
        message("final", None, &["revised"]),
    ]);

    let mut parser = HarmonyParser::with_engine(engine);
    let result = parser.parse(text).unwrap();
    assert_eq!(result.content.as_deref(), Some("revised"));
}

#[test]
fn test_output_serializes_to_json() {
    let output = ChannelOutput {
        content: Some("hello".to_string()),
        reasoning_content: None,
        tool_calls: Some(vec![ToolCall {
            name: "get_weather".to_string(),
            arguments: "{}".to_string(),
        }]),
    };

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["content"], "hello");
    assert_eq!(json["tool_calls"][0]["name"], "get_weather");
}
