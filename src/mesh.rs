//! Triangle-soup mesh construction from a finished heightmap.
//!
//! Triangles are emitted as independent vertex groups with no index buffer:
//! normals are flat per triangle and colors are uniform within a triangle,
//! both duplicated across the triangle's three vertices. The arrays are laid
//! out for direct upload as vertex buffers.

use glam::Vec3;

use crate::heightmap::Heightmap;
use crate::progress::Progress;

pub const GRASS_COLOR: Vec3 = Vec3::new(0.2, 1.0, 0.2);
pub const SAND_COLOR: Vec3 = Vec3::new(0.76, 0.7, 0.5);
pub const WATER_COLOR: Vec3 = Vec3::new(0.2, 0.2, 1.0);

/// Height band above the water level still classified as sand.
pub const SAND_BAND: f32 = 2.5;

/// Triangle list as three parallel arrays of equal length.
#[derive(Clone, Debug, Default)]
pub struct TriangleSoup {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<Vec3>,
}

impl TriangleSoup {
    fn with_capacity(triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(triangles * 3),
            normals: Vec::with_capacity(triangles * 3),
            colors: Vec::with_capacity(triangles * 3),
        }
    }

    fn push_triangle(&mut self, corners: [Vec3; 3], normal: Vec3, color: Vec3) {
        self.positions.extend_from_slice(&corners);
        self.normals.extend_from_slice(&[normal; 3]);
        self.colors.extend_from_slice(&[color; 3]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Raw bytes of the position array, ready for a vertex buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}

/*
   ______
v1 |\   | v3
   | \  |
   |  \ |
v2 |___\| v4
*/

/// Build the terrain mesh from a heightmap.
///
/// Each grid cell up to `size - 2` emits the two triangles above, with a
/// face normal from the cross product of two edge vectors and a color from
/// the triangle's mean height against the water level. Vertices are centered
/// so the map spans `[-size/2, size/2)` on both horizontal axes. A water
/// plane quad at the water level is appended last. Progress advances from
/// 50 to 100 as rows complete.
pub fn build_mesh(map: &Heightmap, water_level: f64, progress: &Progress) -> TriangleSoup {
    let size = map.size;
    let half = (size / 2) as f32;
    let level = water_level as f32;
    let mut soup = TriangleSoup::with_capacity(2 * (size - 1) * (size - 1) + 2);

    for i in 0..size - 1 {
        let x0 = i as f32 - half;
        let x1 = (i + 1) as f32 - half;
        for j in 0..size - 1 {
            let z0 = j as f32 - half;
            let z1 = (j + 1) as f32 - half;

            let v1 = Vec3::new(x0, map.get(i, j) as f32, z0);
            let v2 = Vec3::new(x1, map.get(i + 1, j) as f32, z0);
            let v3 = Vec3::new(x0, map.get(i, j + 1) as f32, z1);
            let v4 = Vec3::new(x1, map.get(i + 1, j + 1) as f32, z1);

            let normal = (v1 - v4).cross(v1 - v2);
            soup.push_triangle([v2, v1, v4], normal, classify(v1, v2, v4, level));

            let normal = (v1 - v3).cross(v1 - v4);
            soup.push_triangle([v1, v3, v4], normal, classify(v1, v3, v4, level));
        }
        progress.advance_to((50 + (i + 1) * 50 / size) as u32);
    }

    push_water_plane(&mut soup, size, level);
    progress.advance_to(100);
    soup
}

/// Sand when the triangle's mean height sits within the sand band above the
/// water level, grass otherwise.
fn classify(a: Vec3, b: Vec3, c: Vec3, water_level: f32) -> Vec3 {
    if (a.y + b.y + c.y) / 3.0 - water_level < SAND_BAND {
        SAND_COLOR
    } else {
        GRASS_COLOR
    }
}

/// One horizontal quad at the water level, spanning `[-size, size]` on both
/// axes so it reaches past the terrain edges from any viewpoint.
fn push_water_plane(soup: &mut TriangleSoup, size: usize, level: f32) {
    let s = size as f32;
    soup.push_triangle(
        [
            Vec3::new(-s, level, -s),
            Vec3::new(-s, level, s),
            Vec3::new(s, level, -s),
        ],
        Vec3::Y,
        WATER_COLOR,
    );
    soup.push_triangle(
        [
            Vec3::new(s, level, -s),
            Vec3::new(-s, level, s),
            Vec3::new(s, level, s),
        ],
        Vec3::Y,
        WATER_COLOR,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(map: &Heightmap, water_level: f64) -> TriangleSoup {
        build_mesh(map, water_level, &Progress::new())
    }

    #[test]
    fn test_triangle_count_invariant() {
        for size in [8, 16] {
            let map = Heightmap::new(size);
            let soup = build(&map, 0.0);
            assert_eq!(soup.triangle_count(), 2 * (size - 1) * (size - 1) + 2);
            assert_eq!(soup.positions.len(), soup.normals.len());
            assert_eq!(soup.positions.len(), soup.colors.len());
        }
    }

    #[test]
    fn test_flat_terrain_normals_point_up() {
        let map = Heightmap::new(8);
        let soup = build(&map, -1.0);
        // Skip the water plane at the end; terrain triangles of a flat map
        // must all face +Y.
        for normal in &soup.normals[..soup.normals.len() - 6] {
            let n = normal.normalize();
            assert!((n - Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn test_water_plane_is_appended_last() {
        let map = Heightmap::new(8);
        let water_level = 1.5;
        let soup = build(&map, water_level);
        let tail = soup.positions.len() - 6;
        for k in 0..6 {
            assert_eq!(soup.positions[tail + k].y, water_level as f32);
            assert_eq!(soup.normals[tail + k], Vec3::Y);
            assert_eq!(soup.colors[tail + k], WATER_COLOR);
        }
        // The plane spans twice the centered map footprint.
        assert_eq!(soup.positions[tail].x, -8.0);
        assert_eq!(soup.positions[tail + 5].x, 8.0);
    }

    #[test]
    fn test_biome_threshold_arithmetic() {
        // Plateau of height 5 in the middle of a 4x4 map. The water level is
        // the map mean, 20/16 = 1.25, so the sand cutoff sits at 3.75: the
        // outer-ring triangles (mean height well below) are sand, triangles
        // fully on the plateau (mean height 5) are grass.
        let mut map = Heightmap::new(4);
        for (x, z, cell) in map.iter_mut() {
            if (1..3).contains(&x) && (1..3).contains(&z) {
                *cell = 5.0;
            }
        }
        let water_level = map.stats().mean;
        assert!((water_level - 1.25).abs() < 1e-12);

        let soup = build(&map, water_level);

        // Colors come in groups of 6 per cell (two triangles), cells in
        // row-major (i, j) order.
        let cell_color = |i: usize, j: usize, triangle: usize| {
            soup.colors[(i * 3 + j) * 6 + triangle * 3]
        };

        // Corner cell: mean height (0 + 0 + 5) / 3 is inside the sand band.
        assert_eq!(cell_color(0, 0, 0), SAND_COLOR);
        assert_eq!(cell_color(0, 0, 1), SAND_COLOR);
        // Plateau cell: mean height 5 > 3.75, grass on both triangles.
        assert_eq!(cell_color(1, 1, 0), GRASS_COLOR);
        assert_eq!(cell_color(1, 1, 1), GRASS_COLOR);
    }

    #[test]
    fn test_mesh_progress_completes() {
        let progress = Progress::new();
        let map = Heightmap::new(8);
        build_mesh(&map, 0.0, &progress);
        assert_eq!(progress.get(), 100);
    }

    #[test]
    fn test_byte_views_cover_all_vertices() {
        let map = Heightmap::new(8);
        let soup = build(&map, 0.0);
        assert_eq!(
            soup.position_bytes().len(),
            soup.vertex_count() * std::mem::size_of::<Vec3>()
        );
    }
}
