use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use anyhow::Result;
use mandate_types::Payload;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

pub trait Serializer {
    fn serialize<T: serde::Serialize>(&self, data: &T) -> Result<Vec<u8>>;
    fn deserialize<T: serde::de::DeserializeOwned>(&self, data: &[u8]) -> Result<T>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer {
    pub pretty: bool,
}

impl JsonSerializer {
    pub fn pretty() -> Self {
        JsonSerializer { pretty: true }
    }
}

impl Serializer for JsonSerializer {
    fn serialize<T: serde::Serialize>(&self, data: &T) -> Result<Vec<u8>> {
        let mut bytes = if self.pretty {
            serde_json::to_vec_pretty(data)?
        } else {
            serde_json::to_vec(data)?
        };
        if self.pretty {
            bytes.push(b'\n');
        }
        Ok(bytes)
    }

    fn deserialize<T: serde::de::DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        serde_json::from_slice(data).map_err(Into::into)
    }
}

pub trait FileSerializer {
    fn save_to_file<T, S: Serializer>(&self, path: &Path, data: &T, serializer: &S) -> Result<()>
    where
        T: Serialize;
    fn load_from_file<T, S: Serializer>(&self, path: &Path, serializer: &S) -> Result<T>
    where
        T: DeserializeOwned;
}

pub struct FileUtils;

impl FileSerializer for FileUtils {
    fn save_to_file<T, S: Serializer>(&self, path: &Path, data: &T, serializer: &S) -> Result<()>
    where
        T: serde::Serialize,
    {
        let content = serializer.serialize(data)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(&content)?;
        Ok(())
    }

    fn load_from_file<T, S: Serializer>(&self, path: &Path, serializer: &S) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let mut file = fs::File::open(path)?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        serializer.deserialize(&content)
    }
}

/// Read a JSON file that must hold an object.
pub fn read_payload(path: &Path) -> std::result::Result<Payload, AppError> {
    let bytes = fs::read(path).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("Failed to read message {}: {}", path.display(), e),
        )
    })?;
    parse_payload(&bytes, path)
}

/// Parse bytes read from `path` into a payload; the root must be an object.
pub fn parse_payload(bytes: &[u8], path: &Path) -> std::result::Result<Payload, AppError> {
    let value: Value = JsonSerializer::default().deserialize(bytes).map_err(|e| {
        AppError::new(
            ErrorCategory::SerializationError,
            format!("Failed to read message {}: {}", path.display(), e),
        )
    })?;
    match value {
        Value::Object(payload) => Ok(payload),
        other => Err(AppError::new(
            ErrorCategory::SerializationError,
            format!(
                "message {} must be a JSON object, found {}",
                path.display(),
                json_kind(&other)
            ),
        )),
    }
}

/// Write a payload as pretty JSON, creating parent directories.
pub fn write_payload(path: &Path, payload: &Payload) -> std::result::Result<(), AppError> {
    FileUtils
        .save_to_file(path, payload, &JsonSerializer::pretty())
        .map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to write message {}: {}", path.display(), e),
            )
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
