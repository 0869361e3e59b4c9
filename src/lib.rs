//! C curve, Dragon curve and Koch curve generation.
//!
//! The engine in [`fractal`] is pure geometry over [`geometry`] types. The
//! remaining modules are the viewer's plumbing: drawing into a frame buffer,
//! pacing generations and reading the command line.

pub mod config;
pub mod curve;
pub mod error;
pub mod fractal;
pub mod geometry;
pub mod raster;

pub use fractal::{next_generation, subdivide, Generations, Rule};
pub use geometry::{write_listing, Point, Segment};
