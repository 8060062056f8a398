#![warn(clippy::all, rust_2018_idioms)]

pub mod brush;
pub mod config;
pub mod error;
pub mod request;
pub mod terrain;

pub use brush::{Falloff, Interpolation, Kernel, MergeOperation, PatchImage};
pub use config::ModifierConfig;
pub use error::{ErrorKind, ModifyError, ModifyResult};
pub use request::{BrushRequest, CircleRequest, EllipseRequest, PatchRequest};
pub use terrain::{Footprint, HeightField, HeightMap, TerrainModifier};
