//! Engine seam over the Harmony tokenizer and message-decoding machinery.
//!
//! The parser never touches tokens directly; it talks to a [`HarmonyEngine`],
//! which the production [`GptOssEngine`] implements on top of the
//! openai-harmony crate and [`MockEngine`] implements with scripted events
//! for tests.

mod gpt_oss;
mod mock;

pub use gpt_oss::GptOssEngine;
pub use mock::MockEngine;

use crate::errors::ParserResult;

/// One fully decoded message from a complete token stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedMessage {
    /// Channel tag reported by the engine, if any
    pub channel: Option<String>,
    /// Recipient string, if the message addresses one
    pub recipient: Option<String>,
    /// Content blocks; the classifier inspects the first one
    pub content: Vec<String>,
}

/// Per-token event from the incremental decoder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamDelta {
    /// Newly produced text, if this token completed any
    pub delta: Option<String>,
    /// Channel context at the time of this delta
    pub channel: Option<String>,
    /// Recipient context at the time of this delta
    pub recipient: Option<String>,
}

/// Tokenizer/message-decoding engine behind the parser.
///
/// The incremental decode context is owned by the implementation; one engine
/// instance tracks exactly one stream and must not be shared across streams.
pub trait HarmonyEngine {
    /// Tokenize text with special tokens allowed.
    fn encode(&self, text: &str) -> ParserResult<Vec<u32>>;

    /// Decode a complete, well-formed completion token stream into messages.
    fn decode_complete(&self, tokens: &[u32]) -> ParserResult<Vec<DecodedMessage>>;

    /// Feed one token to the stateful incremental decoder.
    fn process(&mut self, token: u32) -> ParserResult<StreamDelta>;

    /// Discard the incremental decode context and start a fresh stream.
    fn reset(&mut self) -> ParserResult<()>;
}
