// 地形修改模块

pub mod compositor;
pub mod heightmap;
pub mod modifier;
pub mod noise;

pub use compositor::{apply_kernel, Footprint, GridPoint};
pub use heightmap::{HeightField, HeightMap};
pub use modifier::TerrainModifier;
pub use noise::{NoiseConfig, NoiseGenerator};
