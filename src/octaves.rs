//! Multi-octave noise synthesis.
//!
//! Each octave is an independent grid of uniform random samples at a
//! power-of-two frequency, upsampled to full resolution and summed into the
//! master heightmap. Octaves run in parallel; every task owns a private
//! output grid and the merge happens serially after the join, so no two
//! layers ever write the same memory.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::heightmap::Heightmap;
use crate::interpolate::{upsample_bicubic, upsample_bilinear};
use crate::params::GenError;
use crate::progress::Progress;

/// Share of the overall progress budget spent on the noise phase.
const NOISE_PROGRESS_CAP: usize = 40;

/// Frequencies at or below `2^(log2(size)/3)` are upsampled with cheap
/// bilinear interpolation; coarser octaves get the smoother spline pass.
fn use_bilinear(size: usize, frequency: usize) -> bool {
    frequency as f64 <= 2f64.powf((size as f64).log2() / 3.0)
}

/// Generate one octave of noise at full resolution.
///
/// Fills a `(size / frequency)^2` grid with independent uniform samples in
/// `[0, amplitude)`, then upsamples it to `size x size`. A frequency of 1
/// is per-cell noise and needs no interpolation. `amplitude` must be
/// positive and `frequency` must divide `size`.
pub fn generate_layer(size: usize, frequency: usize, amplitude: f64, seed: u64) -> Heightmap {
    debug_assert_eq!(size % frequency, 0);

    let s = size / frequency;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut layer = Heightmap::new(s);
    for (_, _, cell) in layer.iter_mut() {
        *cell = rng.gen_range(0.0..amplitude);
    }

    if frequency == 1 {
        layer
    } else if use_bilinear(size, frequency) {
        upsample_bilinear(&layer, frequency)
    } else {
        upsample_bicubic(&layer, frequency)
    }
}

/// The octave plan for a map: `(index, frequency)` pairs with
/// `frequency = 2^index`, running while `2^i < size / 2` and, when
/// `iterations` is nonzero, at most `iterations` octaves.
pub fn schedule(size: usize, iterations: usize) -> Vec<(usize, usize)> {
    let limit = if iterations == 0 { usize::MAX } else { iterations };
    let mut octaves = Vec::new();
    let mut frequency = 1;
    let mut i = 0;
    while i < limit && frequency < size / 2 {
        octaves.push((i, frequency));
        i += 1;
        frequency *= 2;
    }
    octaves
}

/// Run all octaves in parallel and sum their private grids into one map.
///
/// Octave `i` uses `frequency = 2^i` and `amplitude = 2^i * base_amplitude`
/// (amplitude grows with the octave index). Progress advances linearly to
/// 40% as layers complete.
pub fn accumulate(
    size: usize,
    iterations: usize,
    base_amplitude: f64,
    seed: u64,
    progress: &Progress,
) -> Result<Heightmap, GenError> {
    let octaves = schedule(size, iterations);
    for &(_, frequency) in &octaves {
        if size % frequency != 0 {
            return Err(GenError::FrequencyMismatch { size, frequency });
        }
    }

    let total = octaves.len().max(1);
    let completed = AtomicUsize::new(0);

    let layers: Vec<Heightmap> = octaves
        .par_iter()
        .map(|&(i, frequency)| {
            let amplitude = frequency as f64 * base_amplitude;
            let layer = generate_layer(size, frequency, amplitude, seed.wrapping_add(i as u64));
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            progress.advance_to((done * NOISE_PROGRESS_CAP / total) as u32);
            layer
        })
        .collect();

    let mut map = Heightmap::new(size);
    for layer in &layers {
        map.add(layer);
    }

    Ok(map)
}
