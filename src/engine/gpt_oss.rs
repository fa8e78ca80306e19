//! Production engine backed by the openai-harmony crate.

use std::sync::OnceLock;

use openai_harmony::{
    HarmonyEncoding, HarmonyEncodingName, StreamableParser,
    chat::{Content, Role},
    load_harmony_encoding,
};

use super::{DecodedMessage, HarmonyEngine, StreamDelta};
use crate::errors::{ParserError, ParserResult};

/// Global Harmony GPT-OSS encoding (initialized once, thread-safe).
static HARMONY_ENCODING: OnceLock<HarmonyEncoding> = OnceLock::new();

/// Get or initialize the global Harmony GPT-OSS encoding.
fn harmony_encoding() -> ParserResult<&'static HarmonyEncoding> {
    HARMONY_ENCODING.get_or_init(|| {
        match load_harmony_encoding(HarmonyEncodingName::HarmonyGptOss) {
            Ok(enc) => enc,
            Err(e) => panic!("Failed to load Harmony encoding: {}", e),
        }
    });

    HARMONY_ENCODING
        .get()
        .ok_or_else(|| ParserError::EncodingLoad("Harmony encoding not initialized".to_string()))
}

fn new_stream_parser(encoding: &HarmonyEncoding) -> ParserResult<StreamableParser> {
    StreamableParser::new(encoding.clone(), Some(Role::Assistant)).map_err(|e| {
        ParserError::EncodingLoad(format!("Failed to create streamable parser: {}", e))
    })
}

/// Extract the text of every `Content::Text` block in a message.
fn text_blocks(content: &[Content]) -> Vec<String> {
    content
        .iter()
        .filter_map(|c| match c {
            Content::Text(tc) => Some(tc.text.clone()),
            _ => None,
        })
        .collect()
}

/// Engine backed by the Harmony GPT-OSS encoding and its streamable parser.
///
/// Holds the per-stream incremental decode context; create one engine per
/// model-response stream.
pub struct GptOssEngine {
    encoding: &'static HarmonyEncoding,
    parser: StreamableParser,
}

impl GptOssEngine {
    pub fn new() -> ParserResult<Self> {
        let encoding = harmony_encoding()?;
        let parser = new_stream_parser(encoding)?;
        Ok(Self { encoding, parser })
    }
}

impl HarmonyEngine for GptOssEngine {
    fn encode(&self, text: &str) -> ParserResult<Vec<u32>> {
        Ok(self
            .encoding
            .tokenizer()
            .encode_with_special_tokens(text)
            .into_iter()
            .collect())
    }

    fn decode_complete(&self, tokens: &[u32]) -> ParserResult<Vec<DecodedMessage>> {
        let messages = self
            .encoding
            .parse_messages_from_completion_tokens(tokens.iter().copied(), Some(Role::Assistant))
            .map_err(|e| {
                ParserError::DecodeFailed(format!("Failed to parse completion tokens: {}", e))
            })?;

        Ok(messages
            .iter()
            .map(|msg| DecodedMessage {
                channel: msg.channel.clone(),
                recipient: msg.recipient.clone(),
                content: text_blocks(&msg.content),
            })
            .collect())
    }

    fn process(&mut self, token: u32) -> ParserResult<StreamDelta> {
        self.parser.process(token).map_err(|e| {
            ParserError::DecodeFailed(format!("Failed to process token {}: {}", token, e))
        })?;

        let delta = self
            .parser
            .last_content_delta()
            .map_err(|e| ParserError::DecodeFailed(format!("Failed to read content delta: {}", e)))?;

        Ok(StreamDelta {
            delta,
            channel: self.parser.current_channel(),
            recipient: self.parser.current_recipient(),
        })
    }

    fn reset(&mut self) -> ParserResult<()> {
        // StreamableParser has no reset; recreate it to drop the decode context.
        self.parser = new_stream_parser(self.encoding)?;
        Ok(())
    }
}
