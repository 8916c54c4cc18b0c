pub mod catalog;
pub mod config;
pub mod error;
pub mod ops;
pub mod router;
pub mod transformer;
pub mod types;
pub mod worker;

pub use catalog::Catalog;
pub use config::{ConfigLoader, MandateConfig};
pub use error::AppError;
pub use router::{RouteError, TransformerRouter, TransformerRouterBuilder};
pub use transformer::{
    CoverageReport, DefinitionError, TransformError, Transformer, TransformerBuilder,
};
pub use types::*;
pub use worker::{RunSummary, Worker};
