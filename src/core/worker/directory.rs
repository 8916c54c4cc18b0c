use super::{Envelope, MessageSink, MessageSource};
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use crate::utils::files::{sha256_hex, walk_files};
use crate::utils::serialization::{
    parse_payload, write_payload, FileSerializer, FileUtils, JsonSerializer,
};
use mandate_types::Payload;
use serde_json::json;
use std::collections::{BTreeMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix of the error report written next to a rejected message.
pub const REPORT_SUFFIX: &str = ".error.json";

fn is_message_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    name.ends_with(".json") && !name.ends_with(REPORT_SUFFIX)
}

/// Reads every `*.json` file under a directory tree, in sorted order.
///
/// Message ids are paths relative to the root, using `/` separators. Error
/// reports left by [`DirectorySink`] are never picked up as messages.
#[derive(Debug)]
pub struct DirectorySource {
    root: PathBuf,
    pending: VecDeque<PathBuf>,
}

impl DirectorySource {
    pub fn open(root: &Path) -> Result<Self, AppError> {
        let pending = walk_files(root)?
            .into_iter()
            .filter(|path| is_message_file(path))
            .collect();
        Ok(Self {
            root: root.to_path_buf(),
            pending,
        })
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    fn message_id(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|part| part.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl MessageSource for DirectorySource {
    fn next_message(&mut self) -> Result<Option<Envelope>, AppError> {
        while let Some(path) = self.pending.pop_front() {
            let id = self.message_id(&path);
            let tag_id = |mut error: AppError| {
                error.add_context("message_id", &id);
                error
            };
            let bytes = fs::read(&path).map_err(|e| {
                tag_id(AppError::new(
                    ErrorCategory::IoError,
                    format!("Failed to read message {}: {}", path.display(), e),
                ))
            })?;
            if bytes.is_empty() {
                tracing::warn!(message_id = %id, "skipping empty message file");
                continue;
            }
            let payload = parse_payload(&bytes, &path).map_err(tag_id)?;
            tracing::debug!(message_id = %id, digest = %sha256_hex(&bytes), "message pulled");
            return Ok(Some(Envelope::new(id, payload)));
        }
        Ok(None)
    }
}

/// Writes transformed messages under `output_dir` with the same relative id.
///
/// Rejected messages are copied untouched under `rejected_dir`, next to a
/// `<id>.error.json` report, when that directory is configured.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    output_dir: PathBuf,
    rejected_dir: Option<PathBuf>,
}

impl DirectorySink {
    pub fn new(output_dir: impl Into<PathBuf>, rejected_dir: Option<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            rejected_dir,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl MessageSink for DirectorySink {
    fn deliver(&mut self, id: &str, payload: &Payload) -> Result<(), AppError> {
        write_payload(&self.output_dir.join(id), payload)
    }

    fn reject(&mut self, envelope: &Envelope, error: &AppError) -> Result<(), AppError> {
        let Some(rejected_dir) = &self.rejected_dir else {
            return Ok(());
        };
        write_payload(&rejected_dir.join(&envelope.id), &envelope.payload)?;

        let context: BTreeMap<&String, &String> = error.context.iter().collect();
        let report = json!({
            "id": envelope.id,
            "code": error.code,
            "category": error.category,
            "message": error.message,
            "context": context,
            "occurred_at": error.occurred_at,
        });
        let report_path = rejected_dir.join(format!("{}{}", envelope.id, REPORT_SUFFIX));
        FileUtils
            .save_to_file(&report_path, &report, &JsonSerializer::pretty())
            .map_err(AppError::from)
    }
}
