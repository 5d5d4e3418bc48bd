//! PNG export of generated terrain.

use image::{ImageBuffer, Rgb, RgbImage};

use crate::heightmap::Heightmap;
use crate::mesh::{GRASS_COLOR, SAND_BAND, SAND_COLOR, WATER_COLOR};
use crate::terrain::TerrainData;

/// Export a heightmap as a colormapped PNG, normalized to its own range.
pub fn export_heightmap(map: &Heightmap, path: &str) -> Result<(), image::ImageError> {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for (_, _, h) in map.iter() {
        if h < min {
            min = h;
        }
        if h > max {
            max = h;
        }
    }
    let range = (max - min).max(f64::EPSILON);

    let mut img: RgbImage = ImageBuffer::new(map.size as u32, map.size as u32);
    for (x, z, h) in map.iter() {
        let t = ((h - min) / range) as f32;
        img.put_pixel(x as u32, z as u32, Rgb(elevation_colormap(t)));
    }
    img.save(path)
}

/// Elevation colormap: deep blue through green to white at the peaks.
fn elevation_colormap(t: f32) -> [u8; 3] {
    let colors: [[f32; 3]; 7] = [
        [0.10, 0.15, 0.45], // deep water
        [0.20, 0.40, 0.75], // shallows
        [0.76, 0.70, 0.50], // shoreline sand
        [0.25, 0.60, 0.25], // lowland grass
        [0.15, 0.40, 0.15], // highland
        [0.50, 0.45, 0.40], // rock
        [0.95, 0.95, 0.95], // peaks
    ];

    let t_scaled = t.clamp(0.0, 1.0) * 6.0;
    let idx = (t_scaled as usize).min(5);
    let frac = t_scaled - idx as f32;

    let c1 = colors[idx];
    let c2 = colors[idx + 1];
    [
        ((c1[0] + (c2[0] - c1[0]) * frac) * 255.0) as u8,
        ((c1[1] + (c2[1] - c1[1]) * frac) * 255.0) as u8,
        ((c1[2] + (c2[2] - c1[2]) * frac) * 255.0) as u8,
    ]
}

/// Export a top-down biome preview using the same water/sand/grass
/// classification the mesh builder applies.
pub fn export_preview(data: &TerrainData, path: &str) -> Result<(), image::ImageError> {
    let map = &data.heightmap;
    let mut img: RgbImage = ImageBuffer::new(map.size as u32, map.size as u32);

    for (x, z, h) in map.iter() {
        let color = if h < data.water_level {
            WATER_COLOR
        } else if ((h - data.water_level) as f32) < SAND_BAND {
            SAND_COLOR
        } else {
            GRASS_COLOR
        };
        img.put_pixel(
            x as u32,
            z as u32,
            Rgb([
                (color.x * 255.0) as u8,
                (color.y * 255.0) as u8,
                (color.z * 255.0) as u8,
            ]),
        );
    }
    img.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colormap_endpoints() {
        assert_eq!(elevation_colormap(0.0), [25, 38, 114]);
        let peak = elevation_colormap(1.0);
        assert!(peak.iter().all(|&c| c > 230));
    }

    #[test]
    fn test_colormap_clamps_out_of_range() {
        assert_eq!(elevation_colormap(-1.0), elevation_colormap(0.0));
        assert_eq!(elevation_colormap(2.0), elevation_colormap(1.0));
    }
}
