//! Scripted engine implementation for testing

use std::collections::HashMap;

use super::{DecodedMessage, HarmonyEngine, StreamDelta};
use crate::errors::{ParserError, ParserResult};

/// Deterministic engine that replays scripted decode events.
///
/// Chunks are registered up front with the per-token events they produce;
/// `encode` hands out synthetic token ids and `process` replays the
/// registered event for each id. Unregistered text yields an encode failure
/// so error propagation can be exercised.
#[derive(Default)]
pub struct MockEngine {
    chunks: HashMap<String, Vec<u32>>,
    events: HashMap<u32, StreamDelta>,
    messages: Vec<DecodedMessage>,
    next_token: u32,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the per-token events produced when `text` is encoded.
    pub fn script_chunk(&mut self, text: impl Into<String>, events: Vec<StreamDelta>) {
        let mut tokens = Vec::with_capacity(events.len());
        for event in events {
            let token = self.next_token;
            self.next_token += 1;
            self.events.insert(token, event);
            tokens.push(token);
        }
        self.chunks.insert(text.into(), tokens);
    }

    /// Register the messages returned by `decode_complete`.
    pub fn script_messages(&mut self, messages: Vec<DecodedMessage>) {
        self.messages = messages;
    }
}

impl HarmonyEngine for MockEngine {
    fn encode(&self, text: &str) -> ParserResult<Vec<u32>> {
        self.chunks
            .get(text)
            .cloned()
            .ok_or_else(|| ParserError::EncodeFailed(format!("no scripted tokens for {:?}", text)))
    }

    fn decode_complete(&self, _tokens: &[u32]) -> ParserResult<Vec<DecodedMessage>> {
        Ok(self.messages.clone())
    }

    fn process(&mut self, token: u32) -> ParserResult<StreamDelta> {
        self.events
            .get(&token)
            .cloned()
            .ok_or_else(|| ParserError::DecodeFailed(format!("no scripted event for token {}", token)))
    }

    fn reset(&mut self) -> ParserResult<()> {
        // Scripted events are stateless; nothing to discard.
        Ok(())
    }
}
