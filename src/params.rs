//! Generation parameters and fail-fast validation.

use serde::{Deserialize, Serialize};

use crate::island::IslandParams;

/// Smallest map that still forms a usable triangle grid.
pub const MIN_SIZE: usize = 8;

/// Parameters for a terrain generation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GenParams {
    /// Map size in cells per side. Must be a power of two so every octave
    /// frequency divides it evenly.
    pub size: usize,
    /// Maximum number of noise octaves. 0 means "run until the frequency
    /// bound", i.e. while `2^i < size / 2`.
    pub iterations: usize,
    /// Base noise amplitude; octave `i` contributes samples in
    /// `[0, 2^i * amplitude)`.
    pub amplitude: f64,
    /// Island shaping configuration.
    pub island: IslandParams,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            size: 1024,
            iterations: 0,
            amplitude: 0.25,
            island: IslandParams::default(),
        }
    }
}

impl GenParams {
    /// Check the configuration before any generation work starts.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.size < MIN_SIZE {
            return Err(GenError::SizeTooSmall(self.size));
        }
        if !self.size.is_power_of_two() {
            return Err(GenError::SizeNotPowerOfTwo(self.size));
        }
        if !self.amplitude.is_finite() || self.amplitude <= 0.0 {
            return Err(GenError::InvalidAmplitude(self.amplitude));
        }
        Ok(())
    }
}

/// Configuration errors reported before generation starts.
#[derive(Clone, Debug, PartialEq)]
pub enum GenError {
    /// Octave frequencies only tile the map cleanly for power-of-two sizes.
    SizeNotPowerOfTwo(usize),
    SizeTooSmall(usize),
    /// Amplitude must be a finite positive number.
    InvalidAmplitude(f64),
    /// An octave frequency does not evenly divide the map size, which would
    /// silently truncate that layer's coverage.
    FrequencyMismatch { size: usize, frequency: usize },
}

impl std::fmt::Display for GenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenError::SizeNotPowerOfTwo(size) => {
                write!(f, "map size {} is not a power of two", size)
            }
            GenError::SizeTooSmall(size) => {
                write!(f, "map size {} is below the minimum of {}", size, MIN_SIZE)
            }
            GenError::InvalidAmplitude(amplitude) => {
                write!(f, "amplitude {} is not a finite positive number", amplitude)
            }
            GenError::FrequencyMismatch { size, frequency } => {
                write!(
                    f,
                    "octave frequency {} does not evenly divide map size {}",
                    frequency, size
                )
            }
        }
    }
}

impl std::error::Error for GenError {}
