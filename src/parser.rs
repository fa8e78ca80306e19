//! One-shot and streaming extraction of Harmony channel content.

use tracing::debug;

use crate::{
    channel::{self, Channel, END_TOOL_CALL_MARKER},
    engine::{GptOssEngine, HarmonyEngine},
    errors::ParserResult,
    state::{ParserMode, StreamState},
    types::{ChannelOutput, ToolCall},
};

/// Truncate `text` to end immediately after the first end-of-call marker.
fn truncate_at_marker(text: &str) -> Option<&str> {
    text.find(END_TOOL_CALL_MARKER)
        .map(|idx| &text[..idx + END_TOOL_CALL_MARKER.len()])
}

/// Parser for one Harmony-encoded model response stream.
///
/// One instance tracks exactly one stream; give each concurrent stream its
/// own instance. All methods are synchronous and must be called strictly in
/// sequence by the owner.
pub struct HarmonyParser<E = GptOssEngine> {
    engine: E,
    state: StreamState,
}

impl HarmonyParser<GptOssEngine> {
    /// Create a parser backed by the Harmony GPT-OSS encoding.
    pub fn new() -> ParserResult<Self> {
        Ok(Self::with_engine(GptOssEngine::new()?))
    }
}

impl<E: HarmonyEngine> HarmonyParser<E> {
    /// Create a parser over a caller-supplied engine.
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            state: StreamState::Normal,
        }
    }

    /// Current mode of the streaming state machine.
    pub fn mode(&self) -> ParserMode {
        self.state.mode()
    }

    /// Parse a complete text for one model turn.
    ///
    /// Content after the first end-of-call marker is discarded. Each decoded
    /// message lands in at most one result field; reasoning and final text
    /// replace earlier messages on the same channel while tool calls append.
    pub fn parse(&mut self, text: &str) -> ParserResult<ChannelOutput> {
        let text = truncate_at_marker(text).unwrap_or(text);

        let mut output = ChannelOutput {
            tool_calls: Some(Vec::new()),
            ..ChannelOutput::default()
        };

        let tokens = self.engine.encode(text)?;
        for message in self.engine.decode_complete(&tokens)? {
            let recipient = message.recipient.as_deref().unwrap_or("");
            let text = message.content.first().cloned().unwrap_or_default();

            match channel::classify(message.channel.as_deref(), message.recipient.as_deref()) {
                Channel::ToolCall if !recipient.is_empty() => {
                    if let Some(calls) = output.tool_calls.as_mut() {
                        calls.push(ToolCall {
                            name: channel::function_name(recipient),
                            arguments: text,
                        });
                    }
                }
                Channel::Reasoning => output.reasoning_content = Some(text),
                Channel::Final => output.content = Some(text),
                _ => {
                    debug!(
                        channel = ?message.channel,
                        recipient = ?message.recipient,
                        "dropping fragment on unsurfaced channel"
                    );
                }
            }
        }

        Ok(output)
    }

    /// Parse one chunk of an ongoing stream.
    ///
    /// Returns the content accumulated during this call plus a flag that is
    /// true once the end-of-call marker has been consumed. Result fields
    /// cover only the deltas seen during this call; the completed tool call,
    /// when present, is always whole and emitted exactly once. After the
    /// marker the parser is finished and further calls return `(None, true)`.
    pub fn parse_streaming(&mut self, chunk: &str) -> ParserResult<(Option<ChannelOutput>, bool)> {
        if self.state.mode() == ParserMode::Finished {
            return Ok((None, true));
        }

        let (chunk, ends_stream) = match truncate_at_marker(chunk) {
            Some(truncated) => (truncated, true),
            None => (chunk, false),
        };

        let mut content = Vec::new();
        let mut reasoning = Vec::new();

        for token in self.engine.encode(chunk)? {
            let event = self.engine.process(token)?;
            let Some(delta) = event.delta.filter(|d| !d.is_empty()) else {
                continue;
            };

            // Once a tool call starts, everything up to the end marker is
            // argument text; channel tags are not re-checked.
            if self.state.mode() == ParserMode::CapturingArguments {
                self.state.push_argument(delta);
                continue;
            }

            match channel::classify(event.channel.as_deref(), event.recipient.as_deref()) {
                Channel::ToolCall => {
                    let name =
                        channel::function_name(event.recipient.as_deref().unwrap_or_default());
                    debug!(function = %name, "entering tool-call argument capture");
                    self.state.begin_tool_call(name, delta);
                }
                Channel::Reasoning => reasoning.push(delta),
                Channel::Final => content.push(delta),
                Channel::Unclassified => {
                    debug!(channel = ?event.channel, "dropping delta on unsurfaced channel");
                }
            }
        }

        if ends_stream {
            let call = self.state.finish();
            debug!(function = %call.name, "stream finished, flushing tool call");
            let output = ChannelOutput::from_fragments(content, reasoning, Some(vec![call]));
            return Ok((Some(output), true));
        }

        let output = ChannelOutput::from_fragments(content, reasoning, None);
        Ok((Some(output), false))
    }

    /// Flush a stream that ended without the end-of-call marker.
    ///
    /// When a tool call is being captured, the marker is force-fed through
    /// the streaming path so the pending call is emitted. Otherwise this is
    /// a safe no-op returning `(None, false)`.
    pub fn finalize_stream(&mut self) -> ParserResult<(Option<ChannelOutput>, bool)> {
        if self.state.mode() == ParserMode::CapturingArguments {
            return self.parse_streaming(END_TOOL_CALL_MARKER);
        }
        Ok((None, false))
    }

    /// Return the parser to its initial state so it can track a new stream.
    pub fn reset(&mut self) -> ParserResult<()> {
        self.engine.reset()?;
        self.state = StreamState::Normal;
        Ok(())
    }
}
