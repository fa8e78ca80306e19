//! Channel-aware parser for Harmony (gpt-oss) model output.
//!
//! Model responses in the Harmony encoding multiplex three logical channels:
//! internal reasoning (`analysis`), tool-call invocations (`commentary`), and
//! user-visible text (`final`). This crate decodes that stream into a
//! structured [`ChannelOutput`], either from a complete turn
//! ([`HarmonyParser::parse`]) or incrementally one chunk at a time
//! ([`HarmonyParser::parse_streaming`]), accumulating a tool call's argument
//! payload across chunk boundaries until the `<|call|>` marker arrives.

pub mod channel;
pub mod engine;
pub mod errors;
pub mod parser;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use channel::Channel;
pub use engine::{DecodedMessage, GptOssEngine, HarmonyEngine, MockEngine, StreamDelta};
pub use errors::{ParserError, ParserResult};
pub use parser::HarmonyParser;
pub use state::{ParserMode, StreamState};
pub use types::{ChannelOutput, ToolCall};
