#![allow(clippy::result_large_err)]

//! Pulls messages from a source, transforms them and hands them to a sink.

mod directory;
mod memory;

pub use directory::{DirectorySink, DirectorySource, REPORT_SUFFIX};
pub use memory::{InMemorySink, InMemorySource};

use crate::core::catalog::Catalog;
use crate::core::error::AppError;
use mandate_types::Payload;
use serde::Serialize;

/// One message and the identifier it is reported under.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub id: String,
    pub payload: Payload,
}

impl Envelope {
    pub fn new(id: impl Into<String>, payload: Payload) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }
}

/// Producer of messages. `Ok(None)` means the source is drained.
///
/// An `Err` describes one unreadable message; the source must have moved
/// past it. Attach the message id as the `message_id` context entry.
pub trait MessageSource {
    fn next_message(&mut self) -> Result<Option<Envelope>, AppError>;
}

/// Consumer of transformed and rejected messages. Errors here stop the run.
pub trait MessageSink {
    fn deliver(&mut self, id: &str, payload: &Payload) -> Result<(), AppError>;

    fn reject(&mut self, _envelope: &Envelope, _error: &AppError) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub id: String,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub delivered: usize,
    pub rejected: Vec<Rejection>,
    /// Set when the run stopped at the first rejection.
    pub halted: bool,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

pub struct Worker<'a> {
    catalog: &'a Catalog,
    continue_on_error: bool,
}

impl<'a> Worker<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            continue_on_error: true,
        }
    }

    pub fn continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Drain `source`, delivering every message that transforms cleanly.
    pub fn run<S, K>(&self, source: &mut S, sink: &mut K) -> Result<RunSummary, AppError>
    where
        S: MessageSource + ?Sized,
        K: MessageSink + ?Sized,
    {
        let mut summary = RunSummary::default();

        loop {
            let envelope = match source.next_message() {
                Ok(Some(envelope)) => envelope,
                Ok(None) => break,
                Err(error) => {
                    summary.processed += 1;
                    let id = error
                        .context
                        .get("message_id")
                        .cloned()
                        .unwrap_or_else(|| "<unknown>".to_string());
                    tracing::warn!(message_id = %id, code = %error.code, "unreadable message: {}", error.message);
                    summary.rejected.push(rejection(&id, &error));
                    if !self.continue_on_error {
                        summary.halted = true;
                        break;
                    }
                    continue;
                }
            };

            summary.processed += 1;
            match self.catalog.process(envelope.payload.clone()) {
                Ok(output) => {
                    sink.deliver(&envelope.id, &output)?;
                    summary.delivered += 1;
                    tracing::debug!(message_id = %envelope.id, "message delivered");
                }
                Err(error) => {
                    tracing::warn!(
                        message_id = %envelope.id,
                        code = %error.code,
                        "message rejected: {}",
                        error.message
                    );
                    sink.reject(&envelope, &error)?;
                    summary.rejected.push(rejection(&envelope.id, &error));
                    if !self.continue_on_error {
                        summary.halted = true;
                        break;
                    }
                }
            }
        }

        tracing::info!(
            processed = summary.processed,
            delivered = summary.delivered,
            rejected = summary.rejected.len(),
            "run finished"
        );
        Ok(summary)
    }
}

fn rejection(id: &str, error: &AppError) -> Rejection {
    Rejection {
        id: id.to_string(),
        code: error.code.clone(),
        message: error.message.clone(),
    }
}
