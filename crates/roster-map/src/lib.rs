//! Schema registry and column mapper.

#![deny(unsafe_code)]

pub mod error;
pub mod mapper;
pub mod registry;

pub use error::MappingError;
pub use mapper::{ColumnMapper, MappingSummary, project};
pub use registry::SchemaRegistry;
