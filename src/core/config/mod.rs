use crate::core::ops::OperationKind;
use mandate_types::BoundOperation;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main mandate configuration loaded from mandate.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MandateConfig {
    /// Router configuration
    #[serde(default)]
    pub router: RouterConfig,

    /// Worker configuration
    #[serde(default)]
    pub worker: WorkerConfig,

    /// Declared transformer types, in declaration order
    #[serde(default)]
    pub transformers: Vec<TransformerConfig>,
}

/// Router configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Payload field holding the discriminator tag
    #[serde(default = "default_tag_field")]
    pub tag_field: String,
}

/// Worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Keep processing after a message is rejected
    #[serde(default = "default_continue_on_error")]
    pub continue_on_error: bool,

    /// Directory receiving transformed messages
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory receiving rejected messages, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_dir: Option<PathBuf>,
}

/// One transformer type declared in configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformerConfig {
    /// Transformer type name used in error messages
    pub name: String,

    /// Discriminator tag the payload must carry
    pub tag: String,

    /// Discriminator field; defaults to `router.tag_field`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Earlier transformer whose operations are composed into this one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherits: Option<String>,

    /// Operations declared by this transformer
    #[serde(default)]
    pub operations: Vec<OperationConfig>,

    /// Invocation list applied to every message routed here
    #[serde(default)]
    pub pipeline: Vec<BoundOperation>,
}

/// One declared operation and its marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationConfig {
    pub name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(flatten)]
    pub kind: OperationKind,
}

// Default functions
fn default_tag_field() -> String {
    "correspondence".to_string()
}

fn default_continue_on_error() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("transformed")
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            tag_field: default_tag_field(),
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        WorkerConfig {
            continue_on_error: default_continue_on_error(),
            output_dir: default_output_dir(),
            rejected_dir: None,
        }
    }
}

impl TransformerConfig {
    /// Discriminator field after falling back to the router's.
    pub fn discriminator_field<'a>(&'a self, router: &'a RouterConfig) -> &'a str {
        self.field.as_deref().unwrap_or(&router.tag_field)
    }
}


pub mod loader;

pub use loader::{ConfigLoader, CONFIG_FILE_NAME};
