//! Seeded blue-noise point patterns for starfield textures.
//!
//! [`poisson_disk_sampling`] scatters points with a guaranteed minimum
//! spacing, driven by the reproducible [`Mulberry32`] generator, and
//! [`rasterize`] stamps a star at each of them.

pub mod config;
pub mod error;
pub mod poisson;
pub mod raster;
pub mod rng;

pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use poisson::{poisson_disk_sampling, PoissonDisk};
pub use raster::{rasterize, PointRaster};
pub use rng::Mulberry32;
