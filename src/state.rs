use crate::types::ToolCall;

/// Current classification state of the streaming parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserMode {
    /// No tool call in progress
    Normal,
    /// A tool call's argument text is being accumulated
    CapturingArguments,
    /// Terminal; no more input will be processed
    Finished,
}

/// Per-stream mutable state, owned by exactly one parser instance.
///
/// The pending function name and argument buffer live inside the
/// `CapturingArguments` variant, so a non-empty buffer cannot coexist with
/// `Normal`. Fragments are appended individually and joined exactly once at
/// flush time.
#[derive(Debug, Clone, Default)]
pub enum StreamState {
    #[default]
    Normal,
    CapturingArguments {
        function_name: String,
        argument_buffer: Vec<String>,
    },
    Finished,
}

impl StreamState {
    /// The mode discriminant of this state.
    pub fn mode(&self) -> ParserMode {
        match self {
            StreamState::Normal => ParserMode::Normal,
            StreamState::CapturingArguments { .. } => ParserMode::CapturingArguments,
            StreamState::Finished => ParserMode::Finished,
        }
    }

    /// Enter `CapturingArguments` with the first argument fragment.
    pub fn begin_tool_call(&mut self, function_name: String, fragment: String) {
        *self = StreamState::CapturingArguments {
            function_name,
            argument_buffer: vec![fragment],
        };
    }

    /// Append one argument fragment; no-op outside `CapturingArguments`.
    pub fn push_argument(&mut self, fragment: String) {
        if let StreamState::CapturingArguments {
            argument_buffer, ..
        } = self
        {
            argument_buffer.push(fragment);
        }
    }

    /// Flush the pending tool call and move to `Finished`.
    ///
    /// When no call is in progress the synthesized call has empty name and
    /// arguments, matching an end marker that arrives outside a tool call.
    pub fn finish(&mut self) -> ToolCall {
        match std::mem::replace(self, StreamState::Finished) {
            StreamState::CapturingArguments {
                function_name,
                argument_buffer,
            } => ToolCall {
                name: function_name,
                arguments: argument_buffer.concat(),
            },
            _ => ToolCall {
                name: String::new(),
                arguments: String::new(),
            },
        }
    }
}
