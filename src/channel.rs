//! Channel classification for decoded Harmony fragments.

/// Channel tag carrying model reasoning.
pub const CHANNEL_ANALYSIS: &str = "analysis";
/// Channel tag carrying tool-call payloads.
pub const CHANNEL_COMMENTARY: &str = "commentary";
/// Channel tag carrying user-visible output.
pub const CHANNEL_FINAL: &str = "final";
/// Recipient namespace prefix identifying callable functions.
pub const FUNCTION_NAMESPACE_PREFIX: &str = "functions.";
/// Token sequence marking the end of a tool invocation's argument payload.
pub const END_TOOL_CALL_MARKER: &str = "<|call|>";

/// Logical channel of a decoded fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Internal reasoning (analysis channel)
    Reasoning,
    /// Tool/function invocation (commentary channel or function recipient)
    ToolCall,
    /// User-visible output (final channel)
    Final,
    /// Channels this parser does not surface
    Unclassified,
}

/// Classify a fragment by its reported channel tag and recipient.
///
/// A non-empty recipient containing the function namespace prefix wins over
/// the channel tag, since tool calls may arrive tagged as analysis-adjacent
/// in upstream encodings.
pub fn classify(channel: Option<&str>, recipient: Option<&str>) -> Channel {
    let has_function_recipient = recipient
        .map(|r| !r.is_empty() && r.contains(FUNCTION_NAMESPACE_PREFIX))
        .unwrap_or(false);

    if channel == Some(CHANNEL_COMMENTARY) || has_function_recipient {
        return Channel::ToolCall;
    }

    match channel {
        Some(CHANNEL_ANALYSIS) => Channel::Reasoning,
        Some(CHANNEL_FINAL) => Channel::Final,
        _ => Channel::Unclassified,
    }
}

/// Derive the bare tool name from a recipient string
/// (e.g. `functions.get_weather` -> `get_weather`).
pub fn function_name(recipient: &str) -> String {
    recipient.replace(FUNCTION_NAMESPACE_PREFIX, "")
}
