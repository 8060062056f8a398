use super::heightmap::HeightMap;
use noise::{Fbm, NoiseFn, Perlin};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for the fBm terrain used to seed demo and benchmark height maps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Random seed for reproducible generation
    pub seed: u32,

    /// Base frequency in cycles per grid cell
    /// Typical range: 0.005 - 0.05
    pub frequency: f64,

    /// Number of noise layers to combine
    pub octaves: usize,

    /// Amplitude decay between octaves
    pub persistence: f64,

    /// Frequency multiplier between octaves
    pub lacunarity: f64,

    /// Height of the terrain at noise value 1.0
    pub amplitude: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frequency: 0.02,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            amplitude: 1.0,
        }
    }
}

impl NoiseConfig {
    pub fn new(seed: u32, frequency: f64, octaves: usize, persistence: f64, lacunarity: f64) -> Self {
        Self {
            seed,
            frequency,
            octaves,
            persistence,
            lacunarity,
            ..Default::default()
        }
    }

    /// Rolling terrain with a random seed
    pub fn terrain() -> Self {
        Self {
            seed: rand::random(),
            octaves: 6,
            ..Default::default()
        }
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }
}

/// Fractional Brownian Motion height source
pub struct NoiseGenerator {
    fbm: Fbm<Perlin>,
    frequency: f64,
    amplitude: f32,
}

impl NoiseGenerator {
    pub fn new(config: &NoiseConfig) -> Self {
        let mut fbm = Fbm::<Perlin>::new(config.seed);
        fbm.octaves = config.octaves;
        fbm.persistence = config.persistence;
        fbm.lacunarity = config.lacunarity;

        Self {
            fbm,
            frequency: config.frequency,
            amplitude: config.amplitude,
        }
    }

    /// Height at a grid position, in `[0, amplitude]`
    pub fn height_at(&self, x: f32, y: f32) -> f32 {
        let raw = self
            .fbm
            .get([x as f64 * self.frequency, y as f64 * self.frequency]);
        let normalized = ((raw + 1.0) * 0.5).clamp(0.0, 1.0);
        normalized as f32 * self.amplitude
    }

    /// Overwrite every cell of `map` with noise heights
    pub fn fill(&self, map: &mut HeightMap) {
        let size = map.size();
        if size == 0 {
            return;
        }
        map.data_mut()
            .par_chunks_mut(size)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = self.height_at(x as f32, y as f32);
                }
            });
    }
}

impl HeightMap {
    /// Build a `size × size` height map from fBm noise
    pub fn from_noise(size: usize, config: &NoiseConfig) -> Self {
        let mut map = HeightMap::new(size);
        NoiseGenerator::new(config).fill(&mut map);
        map
    }
}
