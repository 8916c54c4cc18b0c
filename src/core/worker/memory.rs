use super::{Envelope, MessageSink, MessageSource};
use crate::core::error::AppError;
use mandate_types::Payload;
use std::collections::VecDeque;

/// Source backed by a queue of envelopes.
#[derive(Debug, Default)]
pub struct InMemorySource {
    queue: VecDeque<Envelope>,
}

impl InMemorySource {
    pub fn new(envelopes: impl IntoIterator<Item = Envelope>) -> Self {
        Self {
            queue: envelopes.into_iter().collect(),
        }
    }

    pub fn push(&mut self, envelope: Envelope) {
        self.queue.push_back(envelope);
    }
}

impl MessageSource for InMemorySource {
    fn next_message(&mut self) -> Result<Option<Envelope>, AppError> {
        Ok(self.queue.pop_front())
    }
}

/// Sink that keeps everything it receives.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub delivered: Vec<(String, Payload)>,
    /// Rejected message ids with the error code.
    pub rejected: Vec<(String, String)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageSink for InMemorySink {
    fn deliver(&mut self, id: &str, payload: &Payload) -> Result<(), AppError> {
        self.delivered.push((id.to_string(), payload.clone()));
        Ok(())
    }

    fn reject(&mut self, envelope: &Envelope, error: &AppError) -> Result<(), AppError> {
        self.rejected.push((envelope.id.clone(), error.code.clone()));
        Ok(())
    }
}
