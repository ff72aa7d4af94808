//! Shift design-token compiler
//!
//! Compiles a nested token document into CSS custom properties and TypeScript
//! modules: name validation, alias resolution and flattening, dimension
//! normalization, then emission. `pipeline` strings the stages together for a
//! single document and `batch` runs it over a directory.

pub mod batch;
pub mod config;
pub mod emitters;
pub mod file_processor;
#[macro_use]
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod resolution;
pub mod units;
pub mod utils;
pub mod validation;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults};
pub use emitters::{EmitterContext, OutputFormat};
pub use model::{BreakpointConfig, FlatTokenMap, ThemeConfig, TokenGroup};
pub use pipeline::{PipelineError, PipelineOptions, PipelineResult};
