//! Utility helpers: file walking/hashing and JSON serialization.
pub mod files;
pub mod serialization;

pub use files::{is_file_empty, sha256_digest, sha256_hex, walk_files};
pub use serialization::{parse_payload, read_payload, write_payload, FileSerializer, FileUtils, JsonSerializer, Serializer};
