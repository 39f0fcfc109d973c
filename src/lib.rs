#![forbid(unsafe_code)]
//! micromodel: procedural 2D porous-medium image synthesis.
//!
//! Modules:
//! - grid: staggered (brick-like) circle placement with position/radius jitter
//! - raster: binary solid/void mask rasterization and porosity
//! - container: structured output file with geometry tables and attributes
//! - pipeline: one-shot generate -> rasterize -> serialize runs
//!
//! The pipeline is strictly linear and single-threaded: a grid of circles is
//! generated, painted into a pixel buffer as a union of filled disks, reduced
//! to a porosity scalar, and written to a single container file together with
//! the generating geometry and run metadata.
pub mod config;
pub mod container;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod raster;

/// Convenient re-exports for common types. Import with `use micromodel::prelude::*;`.
pub mod prelude {
    pub use crate::config::MicromodelConfig;
    pub use crate::container::{
        read_container, write_container, ContainerContents, ImageAttributes,
    };
    pub use crate::error::{Error, Result};
    pub use crate::grid::{Circle, OffsetGrid};
    pub use crate::pipeline::{run, RunSummary};
    pub use crate::raster::{rasterize, BinaryImage};
}
