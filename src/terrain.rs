//! Generation pipeline: octave noise, island shaping, mesh construction.

use crate::heightmap::Heightmap;
use crate::island::{self, ShapeStats};
use crate::mesh::{self, TriangleSoup};
use crate::octaves;
use crate::params::{GenError, GenParams};
use crate::progress::Progress;
use crate::seeds::TerrainSeeds;

/// Everything a generation run produces.
///
/// The mesh is the render artifact; the heightmap is kept alongside it for
/// ground-height queries by movement code.
pub struct TerrainData {
    /// Seeds used for generation (allows recreation)
    pub seeds: TerrainSeeds,
    pub size: usize,
    pub heightmap: Heightmap,
    pub water_level: f64,
    pub min_height: f64,
    pub mesh: TriangleSoup,
}

impl TerrainData {
    /// Convenience accessor for the master seed.
    pub fn seed(&self) -> u64 {
        self.seeds.master
    }

    /// Terrain height at a world-space position (the mesh's coordinate
    /// frame, centered on the map). Returns 0 outside the map, matching the
    /// water level baseline at the edges.
    pub fn ground_height(&self, x: f32, z: f32) -> f64 {
        let half = (self.size / 2) as f64;
        let gx = x as f64 + half;
        let gz = z as f64 + half;
        if gx < 0.0 || gz < 0.0 || gx > (self.size - 1) as f64 || gz > (self.size - 1) as f64 {
            return 0.0;
        }
        self.heightmap.sample_bilinear(gx, gz)
    }
}

/// Run the full pipeline.
///
/// Phases and their progress milestones: parallel octave accumulation
/// (0-40), island shaping (50), mesh construction (50-100). The progress
/// counter reaches exactly 100 when the returned data is complete; there is
/// no other completion signal.
pub fn generate(
    params: &GenParams,
    seeds: TerrainSeeds,
    progress: &Progress,
) -> Result<TerrainData, GenError> {
    params.validate()?;

    let mut heightmap = octaves::accumulate(
        params.size,
        params.iterations,
        params.amplitude,
        seeds.octaves,
        progress,
    )?;
    heightmap.sanitize();
    progress.advance_to(40);

    let ShapeStats {
        min_height,
        water_level,
    } = island::shape_island(&mut heightmap, &params.island, seeds.island);
    progress.advance_to(50);

    let mesh = mesh::build_mesh(&heightmap, water_level, progress);
    progress.advance_to(100);

    Ok(TerrainData {
        seeds,
        size: params.size,
        heightmap,
        water_level,
        min_height,
        mesh,
    })
}
