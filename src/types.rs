use serde::{Deserialize, Serialize};

/// Parsed tool call from model output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// Name of the function to call
    pub name: String,
    /// Raw argument text, passed through without validation
    pub arguments: String,
}

/// Output of one parse call, split by channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChannelOutput {
    /// Final-channel text (user visible)
    pub content: Option<String>,
    /// Analysis-channel text (model reasoning)
    pub reasoning_content: Option<String>,
    /// `None` means no tool call was observed during this call, as opposed
    /// to `Some(vec![])` which means the call completed without one.
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ChannelOutput {
    /// Build an output from per-call accumulators, mapping empty text to `None`.
    pub(crate) fn from_fragments(
        content: Vec<String>,
        reasoning: Vec<String>,
        tool_calls: Option<Vec<ToolCall>>,
    ) -> Self {
        let join = |fragments: Vec<String>| {
            let text = fragments.concat();
            (!text.is_empty()).then_some(text)
        };

        Self {
            content: join(content),
            reasoning_content: join(reasoning),
            tool_calls,
        }
    }
}
