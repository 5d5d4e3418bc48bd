//! Seed management for terrain generation.
//!
//! Each phase gets its own seed derived from a master seed, so the octave
//! noise and island shaping draw from independent, reproducible streams
//! instead of racing over one global random source.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for the generation phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Octave noise layers (each layer is further salted by its index)
    pub octaves: u64,
    /// Island peak placement
    pub island: u64,
}

impl TerrainSeeds {
    /// Derive all phase seeds deterministically from a master seed.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            octaves: derive_seed(master, "octaves"),
            island: derive_seed(master, "island"),
        }
    }
}

impl Default for TerrainSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

impl std::fmt::Display for TerrainSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TerrainSeeds {{ master: {}, octaves: {}, island: {} }}",
            self.master, self.octaves, self.island,
        )
    }
}

/// Derive a phase seed from the master seed and a phase name.
fn derive_seed(master: u64, phase: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    phase.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        let a = TerrainSeeds::from_master(12345);
        let b = TerrainSeeds::from_master(12345);
        assert_eq!(a, b);
    }

    #[test]
    fn test_phases_get_different_seeds() {
        let seeds = TerrainSeeds::from_master(12345);
        assert_ne!(seeds.octaves, seeds.island);
        assert_ne!(seeds.octaves, seeds.master);
    }

    #[test]
    fn test_different_masters_differ() {
        let a = TerrainSeeds::from_master(1);
        let b = TerrainSeeds::from_master(2);
        assert_ne!(a.octaves, b.octaves);
        assert_ne!(a.island, b.island);
    }
}
