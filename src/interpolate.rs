//! Interpolation kernels: bilinear rectangle interpolation and natural
//! cubic splines, plus the grid upsampling passes built on them.

use crate::heightmap::Heightmap;

/*
      __________
y2  v2|        |v4
      |        |
      |        |
y1  v1|________|v3

     x1        x2
*/

/// Bilinear interpolation over an axis-aligned rectangle.
///
/// `v1..v4` are the known corner values laid out as in the diagram above;
/// `(x, y)` is the query point inside or on the rectangle. The caller must
/// supply a non-degenerate rectangle (`x1 != x2`, `y1 != y2`).
pub fn bilinear(
    v1: f64,
    v2: f64,
    v3: f64,
    v4: f64,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
    x: f64,
    y: f64,
) -> f64 {
    let x2x = x2 - x;
    let y2y = y2 - y;
    let yy1 = y - y1;
    let xx1 = x - x1;
    (v1 * x2x * y2y + v3 * xx1 * y2y + v2 * x2x * yy1 + v4 * xx1 * yy1)
        / ((x2 - x1) * (y2 - y1))
}

/// Natural cubic spline through a set of knots.
///
/// Second derivatives are zero at both ends, and evaluation past the first
/// or last knot extrapolates linearly with the boundary slope. Knot x
/// positions must be strictly increasing.
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivative at each knot.
    m: Vec<f64>,
}

impl CubicSpline {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        debug_assert_eq!(xs.len(), ys.len());
        let n = xs.len();
        let mut m = vec![0.0; n];

        if n > 2 {
            // Thomas algorithm on the interior second derivatives; the
            // natural boundary pins m[0] and m[n-1] at zero.
            let mut sup = vec![0.0; n];
            let mut rhs = vec![0.0; n];
            for i in 1..n - 1 {
                let h0 = xs[i] - xs[i - 1];
                let h1 = xs[i + 1] - xs[i];
                let diag = 2.0 * (h0 + h1);
                let r = 6.0 * ((ys[i + 1] - ys[i]) / h1 - (ys[i] - ys[i - 1]) / h0);

                let w = diag - h0 * sup[i - 1];
                sup[i] = h1 / w;
                rhs[i] = (r - h0 * rhs[i - 1]) / w;
            }
            for i in (1..n - 1).rev() {
                m[i] = rhs[i] - sup[i] * m[i + 1];
            }
        }

        Self { xs, ys, m }
    }

    /// Evaluate the spline at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        if n == 1 {
            return self.ys[0];
        }

        if x <= self.xs[0] {
            let h = self.xs[1] - self.xs[0];
            let slope = (self.ys[1] - self.ys[0]) / h - h * self.m[1] / 6.0;
            return self.ys[0] + slope * (x - self.xs[0]);
        }
        if x >= self.xs[n - 1] {
            let h = self.xs[n - 1] - self.xs[n - 2];
            let slope = (self.ys[n - 1] - self.ys[n - 2]) / h + h * self.m[n - 2] / 6.0;
            return self.ys[n - 1] + slope * (x - self.xs[n - 1]);
        }

        // Segment i holds xs[i] <= x < xs[i+1].
        let i = self.xs.partition_point(|&knot| knot <= x) - 1;
        let h = self.xs[i + 1] - self.xs[i];
        let t = x - self.xs[i];
        let b = (self.ys[i + 1] - self.ys[i]) / h - h * (2.0 * self.m[i] + self.m[i + 1]) / 6.0;
        self.ys[i] + b * t + self.m[i] / 2.0 * t * t + (self.m[i + 1] - self.m[i]) / (6.0 * h) * t * t * t
    }
}

/// Knot positions for a coarse grid embedded in a full-resolution one:
/// `0, gap, 2*gap, ...` up to `size`.
pub fn knot_positions(size: usize, gap: usize) -> Vec<f64> {
    (0..size).step_by(gap).map(|i| i as f64).collect()
}

/// Upsample a coarse grid to `coarse.size * gap` per side using two-pass
/// cubic spline interpolation: first each coarse column is interpolated
/// across all row positions, then every output row is interpolated across
/// the same knot spacing.
pub fn upsample_bicubic(coarse: &Heightmap, gap: usize) -> Heightmap {
    let s = coarse.size;
    let size = s * gap;
    let mut out = Heightmap::new(size);
    let knots = knot_positions(size, gap);

    // Columns at known x positions.
    for x in 0..s {
        let column: Vec<f64> = (0..s).map(|z| coarse.get(x, z)).collect();
        let spline = CubicSpline::new(knots.clone(), column);
        for z in 0..size {
            out.set(x * gap, z, spline.eval(z as f64));
        }
    }

    // Every output row.
    for z in 0..size {
        let row: Vec<f64> = (0..s).map(|i| out.get(i * gap, z)).collect();
        let spline = CubicSpline::new(knots.clone(), row);
        for x in 0..size {
            out.set(x, z, spline.eval(x as f64));
        }
    }

    out
}

/// Upsample a coarse grid to `coarse.size * gap` per side using bilinear
/// interpolation. Neighbor lookups wrap at the high edge, so the last
/// partial cell blends back toward the first samples.
pub fn upsample_bilinear(coarse: &Heightmap, gap: usize) -> Heightmap {
    let s = coarse.size;
    let size = s * gap;
    let gap_f = gap as f64;
    let mut out = Heightmap::new(size);

    for x in 0..size {
        let cx = x / gap;
        let cx1 = if cx < s - 1 { cx + 1 } else { 0 };
        let x1 = (x - x % gap) as f64;
        for z in 0..size {
            let cz = z / gap;
            let cz1 = if cz < s - 1 { cz + 1 } else { 0 };
            let z1 = (z - z % gap) as f64;

            out.set(
                x,
                z,
                bilinear(
                    coarse.get(cx, cz),
                    coarse.get(cx, cz1),
                    coarse.get(cx1, cz),
                    coarse.get(cx1, cz1),
                    x1,
                    x1 + gap_f,
                    z1,
                    z1 + gap_f,
                    x as f64,
                    z as f64,
                ),
            );
        }
    }

    out
}
